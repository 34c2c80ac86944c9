use super::{MetricsError, SHARE_SUM_TOLERANCE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Share of the contact base that falls into one tenure segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentShare {
    pub label: String,
    pub share: f64,
}

/// Share of events that ended with one outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusShare {
    pub label: String,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMetrics {
    pub total_contacts: u64,
    pub contacts_with_email: u64,
    pub contacts_with_phone: u64,
    pub email_rate: f64,
    pub phone_rate: f64,
    pub avg_completeness: f64,
    /// Ordered tenure segmentation; shares are expected to sum to 1.0.
    pub segmentation: Vec<SegmentShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetrics {
    pub total_events: u64,
    pub avg_duration_minutes: f64,
    pub business_hours_rate: f64,
    pub weekend_rate: f64,
    /// Ordered outcome distribution; shares are expected to sum to 1.0.
    pub status_distribution: Vec<StatusShare>,
}

/// Attendance extremes by day of month plus coarse month-third averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceByDay {
    pub best_day: u8,
    pub best_rate: f64,
    pub worst_day: u8,
    pub worst_rate: f64,
    pub early_month_avg: f64,
    pub mid_month_avg: f64,
    pub late_month_avg: f64,
}

/// Booking-window analysis: how far in advance bookings land best.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeAnalysis {
    /// Label of the best-performing booking window, kept verbatim from the
    /// source data (for the bundled snapshot this is "1-2_Semanas").
    pub optimal_window: String,
    pub optimal_rate: f64,
    pub same_day_rate: f64,
    pub correlation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyBookings {
    pub hour: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBookings {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPatterns {
    pub peak_hour: u8,
    pub peak_day: String,
    pub peak_month: String,
    /// Bookings per hour of day, ordered by hour.
    pub hour_distribution: Vec<HourlyBookings>,
    /// Bookings per month, ordered as curated by the source (busiest first).
    pub monthly_distribution: Vec<MonthlyBookings>,
}

impl BookingPatterns {
    /// Busiest hour derived from the distribution itself, never the stored
    /// `peak_hour` field. Ties resolve to the earlier hour.
    pub fn busiest_hour(&self) -> Option<&HourlyBookings> {
        self.hour_distribution.iter().fold(None, |best, entry| {
            match best {
                Some(current) if entry.count > current.count => Some(entry),
                Some(current) if entry.count == current.count && entry.hour < current.hour => {
                    Some(entry)
                }
                Some(current) => Some(current),
                None => Some(entry),
            }
        })
    }

    /// Booking count recorded for the curated peak month, when present.
    pub fn peak_month_count(&self) -> Option<u64> {
        self.monthly_distribution
            .iter()
            .find(|entry| entry.month == self.peak_month)
            .map(|entry| entry.count)
    }
}

/// Three independent fact groups answering the standing business questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessAnswers {
    pub attendance_by_day: AttendanceByDay,
    pub lead_time: LeadTimeAnalysis,
    pub booking_patterns: BookingPatterns,
}

/// Immutable point-in-time copy of every metric one render cycle uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub contacts: ContactMetrics,
    pub events: EventMetrics,
    pub answers: BusinessAnswers,
}

impl MetricsSnapshot {
    /// Checks the invariants a snapshot must satisfy before any page may
    /// render it. Violations surface as [`MetricsError::Invalid`] so the
    /// caller can show an error banner instead of bad numbers.
    pub fn validate(&self) -> Result<(), MetricsError> {
        for (field, value) in self.rate_fields() {
            if !value.is_finite() {
                return Err(invalid(format!("{field} is not a finite number")));
            }
        }

        check_share_sum("contact segmentation", self.contacts.segmentation.iter().map(|s| s.share))?;
        check_share_sum(
            "event status distribution",
            self.events.status_distribution.iter().map(|s| s.share),
        )?;

        let attendance = &self.answers.attendance_by_day;
        for (field, day) in [
            ("attendance best_day", attendance.best_day),
            ("attendance worst_day", attendance.worst_day),
        ] {
            if !(1..=31).contains(&day) {
                return Err(invalid(format!("{field} {day} outside 1..=31")));
            }
        }

        for entry in &self.answers.booking_patterns.hour_distribution {
            if entry.hour > 23 {
                return Err(invalid(format!(
                    "hour distribution contains impossible hour {}",
                    entry.hour
                )));
            }
        }

        Ok(())
    }

    /// Returns a copy with every rate-like field clamped into 0..=1. Each
    /// clamped field is logged; an out-of-range rate never reaches a page
    /// unannounced. Non-finite values pass through for `validate` to reject.
    pub fn sanitized(&self) -> MetricsSnapshot {
        let mut snapshot = self.clone();
        snapshot.contacts.email_rate = clamp_rate("email_rate", snapshot.contacts.email_rate);
        snapshot.contacts.phone_rate = clamp_rate("phone_rate", snapshot.contacts.phone_rate);
        snapshot.contacts.avg_completeness =
            clamp_rate("avg_completeness", snapshot.contacts.avg_completeness);
        snapshot.events.business_hours_rate =
            clamp_rate("business_hours_rate", snapshot.events.business_hours_rate);
        snapshot.events.weekend_rate = clamp_rate("weekend_rate", snapshot.events.weekend_rate);

        let attendance = &mut snapshot.answers.attendance_by_day;
        attendance.best_rate = clamp_rate("best_rate", attendance.best_rate);
        attendance.worst_rate = clamp_rate("worst_rate", attendance.worst_rate);
        attendance.early_month_avg = clamp_rate("early_month_avg", attendance.early_month_avg);
        attendance.mid_month_avg = clamp_rate("mid_month_avg", attendance.mid_month_avg);
        attendance.late_month_avg = clamp_rate("late_month_avg", attendance.late_month_avg);

        let lead_time = &mut snapshot.answers.lead_time;
        lead_time.optimal_rate = clamp_rate("optimal_rate", lead_time.optimal_rate);
        lead_time.same_day_rate = clamp_rate("same_day_rate", lead_time.same_day_rate);

        snapshot
    }

    fn rate_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("email_rate", self.contacts.email_rate),
            ("phone_rate", self.contacts.phone_rate),
            ("avg_completeness", self.contacts.avg_completeness),
            ("business_hours_rate", self.events.business_hours_rate),
            ("weekend_rate", self.events.weekend_rate),
            ("best_rate", self.answers.attendance_by_day.best_rate),
            ("worst_rate", self.answers.attendance_by_day.worst_rate),
            ("early_month_avg", self.answers.attendance_by_day.early_month_avg),
            ("mid_month_avg", self.answers.attendance_by_day.mid_month_avg),
            ("late_month_avg", self.answers.attendance_by_day.late_month_avg),
            ("optimal_rate", self.answers.lead_time.optimal_rate),
            ("same_day_rate", self.answers.lead_time.same_day_rate),
            ("correlation", self.answers.lead_time.correlation),
        ];
        for segment in &self.contacts.segmentation {
            fields.push(("segmentation share", segment.share));
        }
        for status in &self.events.status_distribution {
            fields.push(("status share", status.share));
        }
        fields
    }
}

fn check_share_sum(
    what: &str,
    shares: impl Iterator<Item = f64>,
) -> Result<(), MetricsError> {
    let total: f64 = shares.sum();
    if (total - 1.0).abs() > SHARE_SUM_TOLERANCE {
        return Err(invalid(format!(
            "{what} shares sum to {total:.4}, expected 1.0 within {SHARE_SUM_TOLERANCE}"
        )));
    }
    Ok(())
}

fn clamp_rate(field: &'static str, value: f64) -> f64 {
    if value.is_finite() && !(0.0..=1.0).contains(&value) {
        let clamped = value.clamp(0.0, 1.0);
        warn!(field, value, clamped, "clamped out-of-range rate");
        clamped
    } else {
        value
    }
}

fn invalid(reason: String) -> MetricsError {
    MetricsError::Invalid { reason }
}

#[cfg(test)]
mod tests {
    use super::super::bundled_snapshot;
    use super::*;

    #[test]
    fn bundled_snapshot_satisfies_all_invariants() {
        bundled_snapshot().validate().expect("bundled data is valid");
    }

    #[test]
    fn busiest_hour_breaks_ties_toward_the_earlier_hour() {
        let snapshot = bundled_snapshot();
        let busiest = snapshot
            .answers
            .booking_patterns
            .busiest_hour()
            .expect("distribution is not empty");
        // 16:00 and 19:00 both record 78 bookings in the bundled data.
        assert_eq!(busiest.hour, 16);
        assert_eq!(busiest.count, 78);
    }

    #[test]
    fn busiest_hour_ignores_entry_order() {
        let mut snapshot = bundled_snapshot();
        snapshot
            .answers
            .booking_patterns
            .hour_distribution
            .reverse();
        let busiest = snapshot
            .answers
            .booking_patterns
            .busiest_hour()
            .expect("distribution is not empty");
        assert_eq!(busiest.hour, 16);
    }

    #[test]
    fn peak_month_count_reads_the_distribution() {
        let snapshot = bundled_snapshot();
        assert_eq!(snapshot.answers.booking_patterns.peak_month_count(), Some(172));
    }

    #[test]
    fn validate_rejects_broken_segmentation_sum() {
        let mut snapshot = bundled_snapshot();
        snapshot.contacts.segmentation[0].share += 0.05;
        let err = snapshot.validate().expect_err("sum is off by 5%");
        assert!(err.to_string().contains("segmentation"));
    }

    #[test]
    fn validate_rejects_non_finite_rates() {
        let mut snapshot = bundled_snapshot();
        snapshot.contacts.email_rate = f64::NAN;
        let err = snapshot.validate().expect_err("NaN must not render");
        assert!(err.to_string().contains("email_rate"));
    }

    #[test]
    fn validate_rejects_impossible_days_and_hours() {
        let mut snapshot = bundled_snapshot();
        snapshot.answers.attendance_by_day.worst_day = 32;
        assert!(snapshot.validate().is_err());

        let mut snapshot = bundled_snapshot();
        snapshot.answers.booking_patterns.hour_distribution[0].hour = 24;
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn sanitized_clamps_out_of_range_rates() {
        let mut snapshot = bundled_snapshot();
        snapshot.contacts.email_rate = 1.4;
        snapshot.events.weekend_rate = -0.2;
        let clean = snapshot.sanitized();
        assert_eq!(clean.contacts.email_rate, 1.0);
        assert_eq!(clean.events.weekend_rate, 0.0);
        // In-range values pass through untouched.
        assert_eq!(clean.contacts.phone_rate, snapshot.contacts.phone_rate);
    }
}
