//! Page view-models: pure functions from a metrics snapshot to the
//! serializable structures each dashboard page displays.

mod insights;
mod questions;
mod segmentation;
mod summary;

pub use insights::{key_insights, InsightCard};
pub use questions::{
    attendance_points, build_questions, AttendanceQuestion, BookingQuestion, DayAttendancePoint,
    HourBar, LeadTimeBucket, LeadTimePoint, LeadTimeQuestion, MonthBar, MonthThirds, PointSource,
    QuestionsView,
};
pub use segmentation::{build_segmentation, DonutSlice, MetricTile, SegmentationView};
pub use summary::{build_summary, MetricCard, SummaryView};

use serde::Serialize;

/// The three dashboard pages. Selection is a stateless dispatch; picking a
/// page rebuilds it fully from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPage {
    Summary,
    BusinessQuestions,
    Segmentation,
}

impl DashboardPage {
    pub const fn ordered() -> [Self; 3] {
        [Self::Summary, Self::BusinessQuestions, Self::Segmentation]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Summary => "Executive Summary",
            Self::BusinessQuestions => "Business Questions",
            Self::Segmentation => "Segmentation & Metrics",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::BusinessQuestions => "business-questions",
            Self::Segmentation => "segmentation",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|page| page.slug() == slug)
    }
}
