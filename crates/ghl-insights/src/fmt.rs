//! Value formatting shared by cards, insight text, and chart labels.
//!
//! Every number a page shows goes through one of these helpers so the
//! formatting contract stays in one place: counts carry thousands
//! separators, rates render as one-decimal percentages, and hours render
//! as `HH:00` booking slots.

/// Formats an integer count with comma separators: `9599` becomes `"9,599"`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

/// Formats a 0..=1 rate as a percentage with one decimal: `0.101` becomes `"10.1%"`.
pub fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Formats an hour of day as a booking slot label: `16` becomes `"16:00"`.
pub fn hour_label(hour: u8) -> String {
    format!("{hour}:00")
}

/// Formats an average duration in whole minutes: `60.01` becomes `"60 min"`.
pub fn minutes(value: f64) -> String {
    format!("{value:.0} min")
}

/// Formats a correlation coefficient with an explicit sign: `0.029` becomes `"+0.029"`.
pub fn signed_correlation(value: f64) -> String {
    format!("{value:+.3}")
}
