//! Metrics snapshot model, source seam, and the cached provider.

mod model;
mod provider;
mod source;

pub use model::{
    AttendanceByDay, BookingPatterns, BusinessAnswers, ContactMetrics, EventMetrics,
    HourlyBookings, LeadTimeAnalysis, MetricsSnapshot, MonthlyBookings, SegmentShare, StatusShare,
};
pub use provider::MetricsProvider;
pub use source::{bundled_snapshot, BundledMetricsSource, MetricsSource};

/// Tolerance applied when checking that a share distribution sums to 1.0.
pub const SHARE_SUM_TOLERANCE: f64 = 0.001;

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// The backing source (file export, API) could not produce a snapshot.
    #[error("metrics source '{source_name}' unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },
    /// The source produced a snapshot that violates a model invariant.
    #[error("metrics snapshot rejected: {reason}")]
    Invalid { reason: String },
}
