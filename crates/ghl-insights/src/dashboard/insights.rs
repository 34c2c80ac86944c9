use crate::fmt::{hour_label, percent, thousands};
use crate::metrics::MetricsSnapshot;
use serde::Serialize;

/// One narrative insight block: a headline value, the finding behind it,
/// and a fixed recommendation. Built here as structured data so the text
/// is testable independent of markup.
#[derive(Debug, Clone, Serialize)]
pub struct InsightCard {
    pub title: &'static str,
    pub value: String,
    pub finding: String,
    pub recommendation: &'static str,
}

/// The three key insights of the executive summary. Every figure is
/// interpolated from the snapshot; nothing is restated as a literal.
pub fn key_insights(snapshot: &MetricsSnapshot) -> Vec<InsightCard> {
    let attendance = &snapshot.answers.attendance_by_day;
    let lead_time = &snapshot.answers.lead_time;
    let patterns = &snapshot.answers.booking_patterns;

    let mut insights = vec![
        InsightCard {
            title: "Best Time of Month",
            value: format!("Day {}", attendance.best_day),
            finding: format!(
                "{} attendance vs {} on day {}",
                percent(attendance.best_rate),
                percent(attendance.worst_rate),
                attendance.worst_day
            ),
            recommendation: "Concentrate campaigns in the first half of the month",
        },
        InsightCard {
            title: "Ideal Booking Window",
            value: lead_time.optimal_window.clone(),
            finding: format!(
                "{} attendance vs {} same-day",
                percent(lead_time.optimal_rate),
                percent(lead_time.same_day_rate)
            ),
            recommendation: "Automate reminders one to two weeks ahead of the event",
        },
    ];

    // The peak-hour insight is cross-checked against the distribution, not
    // the stored peak_hour field.
    if let Some(busiest) = patterns.busiest_hour() {
        insights.push(InsightCard {
            title: "Peak Booking Pattern",
            value: format!("{} {}", patterns.peak_day, hour_label(busiest.hour)),
            finding: format!(
                "Peak hour records {} bookings",
                thousands(busiest.count)
            ),
            recommendation: "Extend availability around the peak afternoon slot",
        });
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::bundled_snapshot;

    #[test]
    fn booking_window_insight_interpolates_rates_and_label() {
        let snapshot = bundled_snapshot();
        let insights = key_insights(&snapshot);
        let window = &insights[1];
        assert_eq!(window.value, "1-2_Semanas");
        assert!(window.finding.contains("10.1%"));
        assert!(window.finding.contains("3.3%"));
    }

    #[test]
    fn best_day_insight_names_both_extremes() {
        let snapshot = bundled_snapshot();
        let best = &key_insights(&snapshot)[0];
        assert_eq!(best.value, "Day 2");
        assert!(best.finding.contains("66.7%"));
        assert!(best.finding.contains("day 16"));
    }

    #[test]
    fn peak_insight_uses_the_derived_busiest_hour() {
        let mut snapshot = bundled_snapshot();
        // Contradict the stored peak_hour; the distribution must win.
        snapshot.answers.booking_patterns.peak_hour = 21;
        let insights = key_insights(&snapshot);
        let peak = &insights[2];
        assert!(peak.value.ends_with("16:00"));
        assert!(peak.finding.contains("78"));
    }
}
