use crate::fmt::{hour_label, percent, signed_correlation, thousands};
use crate::metrics::{AttendanceByDay, MetricsSnapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Whether a chart point was measured or generated to fill a gap.
///
/// The export only carries the best and worst day of the attendance series;
/// the remaining days are synthetic filler and are flagged as such all the
/// way into the rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointSource {
    Observed,
    Synthetic,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayAttendancePoint {
    pub day: u8,
    pub rate_pct: f64,
    pub source: PointSource,
}

/// Attendance-rate filler bands by day of month, in percent.
const FILLER_BANDS: [(u8, u8, f64, f64); 3] =
    [(1, 10, 20.0, 35.0), (11, 20, 15.0, 25.0), (21, 31, 10.0, 20.0)];

/// The full 31-day attendance series: observed extremes from the snapshot,
/// every other day drawn from the filler band for its third of the month.
/// The RNG is injected so a seeded render is reproducible.
pub fn attendance_points<R: Rng>(
    attendance: &AttendanceByDay,
    rng: &mut R,
) -> Vec<DayAttendancePoint> {
    (1..=31)
        .map(|day| {
            if day == attendance.best_day {
                DayAttendancePoint {
                    day,
                    rate_pct: attendance.best_rate * 100.0,
                    source: PointSource::Observed,
                }
            } else if day == attendance.worst_day {
                DayAttendancePoint {
                    day,
                    rate_pct: attendance.worst_rate * 100.0,
                    source: PointSource::Observed,
                }
            } else {
                let (_, _, low, high) = FILLER_BANDS
                    .iter()
                    .copied()
                    .find(|(from, to, _, _)| (*from..=*to).contains(&day))
                    .unwrap_or((21, 31, 10.0, 20.0));
                DayAttendancePoint {
                    day,
                    rate_pct: rng.gen_range(low..high),
                    source: PointSource::Synthetic,
                }
            }
        })
        .collect()
}

/// Coarse month-third attendance averages shown alongside chart A.
#[derive(Debug, Clone, Serialize)]
pub struct MonthThirds {
    pub early: f64,
    pub mid: f64,
    pub late: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceQuestion {
    pub question: &'static str,
    pub answer: String,
    pub points: Vec<DayAttendancePoint>,
    /// Inclusive day range highlighted as the optimal booking zone.
    pub optimal_zone: (u8, u8),
    pub month_thirds: MonthThirds,
}

/// The six lead-time buckets in their fixed canonical order. Chart B must
/// always render them in this order, never alphabetical or input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTimeBucket {
    SameDay,
    OneToThreeDays,
    FourToSevenDays,
    OneToTwoWeeks,
    TwoToFourWeeks,
    OverOneMonth,
}

impl LeadTimeBucket {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::SameDay,
            Self::OneToThreeDays,
            Self::FourToSevenDays,
            Self::OneToTwoWeeks,
            Self::TwoToFourWeeks,
            Self::OverOneMonth,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SameDay => "Same-day",
            Self::OneToThreeDays => "1-3d",
            Self::FourToSevenDays => "4-7d",
            Self::OneToTwoWeeks => "1-2wk",
            Self::TwoToFourWeeks => "2-4wk",
            Self::OverOneMonth => ">1mo",
        }
    }

    /// Maps a window label as stored in the export onto a bucket. Labels
    /// arrive in the export's own spelling ("1-2_Semanas"); unknown labels
    /// yield `None` and the caller falls back to the series maximum.
    pub fn from_window_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "mismo_día" | "mismo_dia" | "same-day" | "same_day" => Some(Self::SameDay),
            "1-3_días" | "1-3_dias" | "1-3d" => Some(Self::OneToThreeDays),
            "4-7_días" | "4-7_dias" | "4-7d" => Some(Self::FourToSevenDays),
            "1-2_semanas" | "1-2wk" => Some(Self::OneToTwoWeeks),
            "2-4_semanas" | "2-4wk" => Some(Self::TwoToFourWeeks),
            "más_1_mes" | "mas_1_mes" | ">1mo" => Some(Self::OverOneMonth),
            _ => None,
        }
    }
}

/// Attendance percentages from the export's lead-time correlation table,
/// indexed by [`LeadTimeBucket::ordered`]. The same-day and optimal points
/// are overridden from the snapshot so the chart never contradicts it.
const LEAD_TIME_RATES_PCT: [f64; 6] = [3.3, 4.7, 5.5, 10.1, 8.6, 0.0];

#[derive(Debug, Clone, Serialize)]
pub struct LeadTimePoint {
    pub bucket: LeadTimeBucket,
    pub label: &'static str,
    pub rate_pct: f64,
    /// The star-marked optimum of the series.
    pub optimal: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadTimeQuestion {
    pub question: &'static str,
    pub answer: String,
    pub points: Vec<LeadTimePoint>,
    pub correlation_label: String,
}

/// Hourly bars at or above this count are highlighted.
const HOUR_HIGHLIGHT_THRESHOLD: u64 = 70;

#[derive(Debug, Clone, Serialize)]
pub struct HourBar {
    pub hour: u8,
    pub label: String,
    pub count: u64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthBar {
    pub month: String,
    pub count: u64,
    /// Position of this bar on the sequential color scale, 0.0 for the
    /// lightest-booked month and 1.0 for the busiest.
    pub intensity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingQuestion {
    pub question: &'static str,
    pub answer: String,
    pub hour_bars: Vec<HourBar>,
    pub month_bars: Vec<MonthBar>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionsView {
    pub attendance: AttendanceQuestion,
    pub lead_time: LeadTimeQuestion,
    pub bookings: BookingQuestion,
}

/// Builds the business-questions page. `seed` pins the synthetic filler of
/// chart A; the same snapshot and seed always yield the same view.
pub fn build_questions(snapshot: &MetricsSnapshot, seed: u64) -> QuestionsView {
    let mut rng = StdRng::seed_from_u64(seed);

    QuestionsView {
        attendance: attendance_question(snapshot, &mut rng),
        lead_time: lead_time_question(snapshot),
        bookings: booking_question(snapshot),
    }
}

fn attendance_question<R: Rng>(snapshot: &MetricsSnapshot, rng: &mut R) -> AttendanceQuestion {
    let attendance = &snapshot.answers.attendance_by_day;
    AttendanceQuestion {
        question: "How does attendance vary across the month?",
        answer: format!(
            "Day {} of the month reaches {} attendance vs {} on day {}",
            attendance.best_day,
            percent(attendance.best_rate),
            percent(attendance.worst_rate),
            attendance.worst_day
        ),
        points: attendance_points(attendance, rng),
        optimal_zone: (1, 10),
        month_thirds: MonthThirds {
            early: attendance.early_month_avg,
            mid: attendance.mid_month_avg,
            late: attendance.late_month_avg,
        },
    }
}

fn lead_time_question(snapshot: &MetricsSnapshot) -> LeadTimeQuestion {
    let lead_time = &snapshot.answers.lead_time;
    let optimal_bucket = LeadTimeBucket::from_window_label(&lead_time.optimal_window);

    let mut points: Vec<LeadTimePoint> = LeadTimeBucket::ordered()
        .into_iter()
        .zip(LEAD_TIME_RATES_PCT)
        .map(|(bucket, baseline)| {
            let rate_pct = if bucket == LeadTimeBucket::SameDay {
                lead_time.same_day_rate * 100.0
            } else if optimal_bucket == Some(bucket) {
                lead_time.optimal_rate * 100.0
            } else {
                baseline
            };
            LeadTimePoint {
                bucket,
                label: bucket.label(),
                rate_pct,
                optimal: false,
            }
        })
        .collect();

    let optimal_index = match optimal_bucket {
        Some(bucket) => points
            .iter()
            .position(|point| point.bucket == bucket)
            .unwrap_or(0),
        // Unknown window label: star the series maximum instead.
        None => points
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.rate_pct.total_cmp(&b.rate_pct))
            .map(|(index, _)| index)
            .unwrap_or(0),
    };
    points[optimal_index].optimal = true;

    LeadTimeQuestion {
        question: "How does booking lead time correlate with attendance?",
        answer: format!(
            "{} bookings reach {} attendance vs {} same-day (correlation {})",
            lead_time.optimal_window,
            percent(lead_time.optimal_rate),
            percent(lead_time.same_day_rate),
            signed_correlation(lead_time.correlation)
        ),
        points,
        correlation_label: signed_correlation(lead_time.correlation),
    }
}

fn booking_question(snapshot: &MetricsSnapshot) -> BookingQuestion {
    let patterns = &snapshot.answers.booking_patterns;

    let hour_bars = patterns
        .hour_distribution
        .iter()
        .map(|entry| HourBar {
            hour: entry.hour,
            label: hour_label(entry.hour),
            count: entry.count,
            highlighted: entry.count >= HOUR_HIGHLIGHT_THRESHOLD,
        })
        .collect();

    let min_count = patterns
        .monthly_distribution
        .iter()
        .map(|entry| entry.count)
        .min()
        .unwrap_or(0);
    let max_count = patterns
        .monthly_distribution
        .iter()
        .map(|entry| entry.count)
        .max()
        .unwrap_or(0);
    let span = max_count.saturating_sub(min_count);

    let month_bars = patterns
        .monthly_distribution
        .iter()
        .map(|entry| MonthBar {
            month: entry.month.clone(),
            count: entry.count,
            intensity: if span == 0 {
                1.0
            } else {
                (entry.count - min_count) as f64 / span as f64
            },
        })
        .collect();

    let answer = match (patterns.busiest_hour(), patterns.peak_month_count()) {
        (Some(busiest), Some(month_count)) => format!(
            "{} {} records {} bookings; {} peaks at {} bookings",
            patterns.peak_day,
            hour_label(busiest.hour),
            thousands(busiest.count),
            patterns.peak_month,
            thousands(month_count)
        ),
        _ => format!("{} is the busiest booking day", patterns.peak_day),
    };

    BookingQuestion {
        question: "When do bookings concentrate by hour, day, and month?",
        answer,
        hour_bars,
        month_bars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::bundled_snapshot;

    #[test]
    fn attendance_series_has_two_observed_points_in_band() {
        let view = build_questions(&bundled_snapshot(), 7);
        let points = &view.attendance.points;
        assert_eq!(points.len(), 31);

        let observed: Vec<_> = points
            .iter()
            .filter(|p| p.source == PointSource::Observed)
            .collect();
        assert_eq!(observed.len(), 2);
        assert_eq!(observed[0].day, 2);
        assert!((observed[0].rate_pct - 66.7).abs() < 1e-9);
        assert_eq!(observed[1].day, 16);
        assert_eq!(observed[1].rate_pct, 0.0);

        for point in points.iter().filter(|p| p.source == PointSource::Synthetic) {
            let (low, high) = match point.day {
                1..=10 => (20.0, 35.0),
                11..=20 => (15.0, 25.0),
                _ => (10.0, 20.0),
            };
            assert!(
                point.rate_pct >= low && point.rate_pct < high,
                "day {} rate {} outside [{low}, {high})",
                point.day,
                point.rate_pct
            );
        }
    }

    #[test]
    fn filler_is_deterministic_per_seed() {
        let snapshot = bundled_snapshot();
        let a = build_questions(&snapshot, 99);
        let b = build_questions(&snapshot, 99);
        let c = build_questions(&snapshot, 100);
        for (left, right) in a.attendance.points.iter().zip(&b.attendance.points) {
            assert_eq!(left.rate_pct, right.rate_pct);
        }
        assert!(a
            .attendance
            .points
            .iter()
            .zip(&c.attendance.points)
            .any(|(left, right)| left.rate_pct != right.rate_pct));
    }

    #[test]
    fn lead_time_series_keeps_canonical_order() {
        let view = build_questions(&bundled_snapshot(), 0);
        let buckets: Vec<_> = view.lead_time.points.iter().map(|p| p.bucket).collect();
        assert_eq!(buckets, LeadTimeBucket::ordered().to_vec());
        let labels: Vec<_> = view.lead_time.points.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["Same-day", "1-3d", "4-7d", "1-2wk", "2-4wk", ">1mo"]);
    }

    #[test]
    fn optimum_is_resolved_from_the_window_label() {
        let view = build_questions(&bundled_snapshot(), 0);
        let optimal: Vec<_> = view
            .lead_time
            .points
            .iter()
            .filter(|p| p.optimal)
            .collect();
        assert_eq!(optimal.len(), 1);
        assert_eq!(optimal[0].bucket, LeadTimeBucket::OneToTwoWeeks);
        assert!((optimal[0].rate_pct - 10.1).abs() < 1e-9);
    }

    #[test]
    fn unknown_window_label_stars_the_series_maximum() {
        let mut snapshot = bundled_snapshot();
        snapshot.answers.lead_time.optimal_window = "Quincena_Dorada".to_string();
        let view = build_questions(&snapshot, 0);
        let optimal = view
            .lead_time
            .points
            .iter()
            .find(|p| p.optimal)
            .expect("one point is starred");
        assert_eq!(optimal.bucket, LeadTimeBucket::OneToTwoWeeks);
    }

    #[test]
    fn hour_bars_highlight_seventy_plus_counts() {
        let view = build_questions(&bundled_snapshot(), 0);
        let highlighted: Vec<_> = view
            .bookings
            .hour_bars
            .iter()
            .filter(|bar| bar.highlighted)
            .map(|bar| bar.hour)
            .collect();
        assert_eq!(highlighted, vec![16, 17, 19]);
    }

    #[test]
    fn month_bars_normalize_intensity_over_the_count_range() {
        let view = build_questions(&bundled_snapshot(), 0);
        let bars = &view.bookings.month_bars;
        assert_eq!(bars[0].month, "July");
        assert!((bars[0].intensity - 1.0).abs() < 1e-9);
        assert!((bars[2].intensity - 0.0).abs() < 1e-9);
        assert!(bars[1].intensity > 0.0 && bars[1].intensity < 1.0);
    }

    #[test]
    fn booking_answer_is_derived_not_restated() {
        let view = build_questions(&bundled_snapshot(), 0);
        assert!(view.bookings.answer.contains("Wednesday 16:00"));
        assert!(view.bookings.answer.contains("78 bookings"));
        assert!(view.bookings.answer.contains("July peaks at 172"));
    }
}
