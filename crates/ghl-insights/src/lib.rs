//! Metrics snapshot provider and dashboard rendering for Go High Level
//! business reporting.
//!
//! The crate is split along the two halves of the dashboard: [`metrics`]
//! owns the immutable snapshot model, its validation, and the cached
//! provider; [`dashboard`] turns a snapshot into serializable page view
//! models; [`render`] turns those views into self-contained HTML with
//! inline SVG charts. [`config`], [`telemetry`], and [`error`] carry the
//! service plumbing shared with the `ghl-insights-dashboard` binary.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fmt;
pub mod metrics;
pub mod render;
pub mod telemetry;
