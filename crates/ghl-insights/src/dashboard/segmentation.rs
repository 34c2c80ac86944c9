use crate::fmt::{minutes, percent};
use crate::metrics::MetricsSnapshot;
use serde::Serialize;

/// Fixed donut palette, assigned to segments in snapshot order and cycled
/// if the segmentation ever grows past five buckets.
const SEGMENT_PALETTE: [&str; 5] = ["#10B981", "#3B82F6", "#F59E0B", "#EF4444", "#6B7280"];

#[derive(Debug, Clone, Serialize)]
pub struct DonutSlice {
    pub label: String,
    pub share_pct: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentationView {
    pub slices: Vec<DonutSlice>,
    pub contact_tiles: Vec<MetricTile>,
    pub event_tiles: Vec<MetricTile>,
}

/// Builds the segmentation page: the tenure donut plus three contactability
/// tiles and three event tiles.
pub fn build_segmentation(snapshot: &MetricsSnapshot) -> SegmentationView {
    let slices = snapshot
        .contacts
        .segmentation
        .iter()
        .enumerate()
        .map(|(index, segment)| DonutSlice {
            label: segment.label.clone(),
            share_pct: segment.share * 100.0,
            color: SEGMENT_PALETTE[index % SEGMENT_PALETTE.len()],
        })
        .collect();

    let contact_tiles = vec![
        MetricTile {
            label: "Email Rate",
            value: percent(snapshot.contacts.email_rate),
        },
        MetricTile {
            label: "Phone Rate",
            value: percent(snapshot.contacts.phone_rate),
        },
        MetricTile {
            label: "Avg Completeness",
            value: percent(snapshot.contacts.avg_completeness),
        },
    ];

    let event_tiles = vec![
        MetricTile {
            label: "Avg Duration",
            value: minutes(snapshot.events.avg_duration_minutes),
        },
        MetricTile {
            label: "Business Hours",
            value: percent(snapshot.events.business_hours_rate),
        },
        MetricTile {
            label: "Weekend",
            value: percent(snapshot.events.weekend_rate),
        },
    ];

    SegmentationView {
        slices,
        contact_tiles,
        event_tiles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::bundled_snapshot;

    #[test]
    fn slices_keep_snapshot_order_and_palette() {
        let view = build_segmentation(&bundled_snapshot());
        let labels: Vec<_> = view.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Establecido", "Reciente", "Nuevo", "Muy_Nuevo", "Antiguo"]
        );
        assert_eq!(view.slices[0].color, "#10B981");
        assert_eq!(view.slices[4].color, "#6B7280");
    }

    #[test]
    fn slice_percentages_cover_the_whole_base() {
        let view = build_segmentation(&bundled_snapshot());
        let total: f64 = view.slices.iter().map(|s| s.share_pct).sum();
        assert!((total - 100.0).abs() <= 0.1);
    }

    #[test]
    fn tiles_carry_the_fixed_formats() {
        let view = build_segmentation(&bundled_snapshot());
        assert_eq!(view.contact_tiles[0].value, "14.8%");
        assert_eq!(view.contact_tiles[2].value, "32.1%");
        assert_eq!(view.event_tiles[0].value, "60 min");
        assert_eq!(view.event_tiles[1].value, "77.7%");
    }
}
