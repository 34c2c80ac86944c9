use super::insights::{key_insights, InsightCard};
use crate::fmt::{hour_label, thousands};
use crate::metrics::MetricsSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub cards: Vec<MetricCard>,
    pub insights: Vec<InsightCard>,
}

/// Builds the executive-summary page: four headline cards plus the three
/// key insights.
pub fn build_summary(snapshot: &MetricsSnapshot) -> SummaryView {
    let patterns = &snapshot.answers.booking_patterns;
    let peak_hour = patterns
        .busiest_hour()
        .map(|entry| hour_label(entry.hour))
        .unwrap_or_else(|| "n/a".to_string());

    let cards = vec![
        MetricCard {
            label: "Total Contacts",
            value: thousands(snapshot.contacts.total_contacts),
        },
        MetricCard {
            label: "Total Events",
            value: thousands(snapshot.events.total_events),
        },
        MetricCard {
            label: "Optimal Window",
            value: snapshot.answers.lead_time.optimal_window.clone(),
        },
        MetricCard {
            label: "Peak Hour",
            value: peak_hour,
        },
    ];

    SummaryView {
        cards,
        insights: key_insights(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::bundled_snapshot;

    #[test]
    fn headline_cards_use_thousands_separators() {
        let view = build_summary(&bundled_snapshot());
        assert_eq!(view.cards[0].value, "9,599");
        assert_eq!(view.cards[1].value, "1,034");
    }

    #[test]
    fn peak_hour_card_comes_from_the_distribution() {
        let mut snapshot = bundled_snapshot();
        snapshot.answers.booking_patterns.peak_hour = 9;
        let view = build_summary(&snapshot);
        // 16:00 holds the maximum in the distribution regardless of the
        // stored field.
        assert_eq!(view.cards[3].value, "16:00");
    }

    #[test]
    fn optimal_window_card_keeps_the_source_label() {
        let view = build_summary(&bundled_snapshot());
        assert_eq!(view.cards[2].value, "1-2_Semanas");
        assert_eq!(view.insights.len(), 3);
    }
}
