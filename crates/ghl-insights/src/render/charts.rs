//! Inline SVG chart builders. Each function turns a page view-model slice
//! into a self-contained `<svg>` string; no client-side scripting.

use super::html::escape_html;
use crate::dashboard::{DayAttendancePoint, DonutSlice, HourBar, LeadTimePoint, MonthBar, PointSource};
use std::f64::consts::PI;
use std::fmt::Write as _;

const AXIS_COLOR: &str = "#E5E7EB";
const LABEL_COLOR: &str = "#6B7280";
const TITLE_COLOR: &str = "#374151";

/// Chart A: attendance by day of month with the early-month optimal zone.
/// Observed points render solid; synthetic filler renders hollow and the
/// chart is captioned accordingly.
pub(crate) fn attendance_chart(points: &[DayAttendancePoint], zone: (u8, u8)) -> String {
    let width = 680.0;
    let height = 400.0;
    let margin = 50.0;
    let chart_width = width - 2.0 * margin;
    let chart_height = height - 2.0 * margin - 20.0;

    if points.is_empty() {
        return String::from("<svg></svg>");
    }

    let max_rate = points
        .iter()
        .map(|p| p.rate_pct)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.15;
    let step = chart_width / (points.len().saturating_sub(1).max(1)) as f64;
    let x_of = |index: usize| margin + index as f64 * step;
    let y_of = |rate: f64| margin + chart_height - (rate / max_rate) * chart_height;

    let zone_x0 = x_of(zone.0.saturating_sub(1) as usize);
    let zone_x1 = x_of(zone.1.saturating_sub(1) as usize);

    let mut line_path = String::new();
    let mut markers = String::new();
    for (index, point) in points.iter().enumerate() {
        let x = x_of(index);
        let y = y_of(point.rate_pct);
        if index == 0 {
            write!(line_path, "M{x:.1},{y:.1}").expect("write path start");
        } else {
            write!(line_path, " L{x:.1},{y:.1}").expect("write path segment");
        }
        match point.source {
            PointSource::Observed => write!(
                markers,
                r##"<circle cx="{x:.1}" cy="{y:.1}" r="5" fill="#3B82F6"/>"##
            )
            .expect("write observed marker"),
            PointSource::Synthetic => write!(
                markers,
                r##"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="white" stroke="#3B82F6" stroke-width="1.5" opacity="0.6"/>"##
            )
            .expect("write synthetic marker"),
        }
    }

    let baseline = margin + chart_height;
    let area_path = format!(
        "{line_path} L{:.1},{baseline:.1} L{margin:.1},{baseline:.1} Z",
        x_of(points.len() - 1)
    );

    let mut x_labels = String::new();
    for day in [1u8, 5, 10, 15, 20, 25, 31] {
        let x = x_of(day.saturating_sub(1) as usize);
        write!(
            x_labels,
            r##"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{LABEL_COLOR}">{day}</text>"##,
            baseline + 18.0
        )
        .expect("write day label");
    }

    format!(
        r##"<svg viewBox="0 0 {width} {height}" role="img" style="background:white; border-radius:8px">
  <text x="{margin}" y="24" font-size="14" font-weight="600" fill="{TITLE_COLOR}">Attendance by Day of Month</text>
  <rect x="{zone_x0:.1}" y="{margin}" width="{zone_w:.1}" height="{chart_height:.1}" fill="rgba(16, 185, 129, 0.1)"/>
  <text x="{zone_mid:.1}" y="{zone_y:.1}" text-anchor="middle" font-size="11" fill="#10B981">Optimal zone - early month</text>
  <line x1="{margin}" y1="{baseline:.1}" x2="{x_end:.1}" y2="{baseline:.1}" stroke="{AXIS_COLOR}" stroke-width="2"/>
  <line x1="{margin}" y1="{margin}" x2="{margin}" y2="{baseline:.1}" stroke="{AXIS_COLOR}" stroke-width="2"/>
  <path d="{area_path}" fill="#3B82F6" opacity="0.12"/>
  <path d="{line_path}" fill="none" stroke="#3B82F6" stroke-width="3"/>
  {markers}
  {x_labels}
  <text x="15" y="{y_mid:.1}" text-anchor="middle" font-size="12" fill="{LABEL_COLOR}" transform="rotate(-90, 15, {y_mid:.1})">% Attendance</text>
  <text x="{margin}" y="{caption_y:.1}" font-size="11" fill="{LABEL_COLOR}">Solid markers are observed; hollow markers are synthetic filler, not measured data.</text>
</svg>"##,
        zone_w = zone_x1 - zone_x0,
        zone_mid = (zone_x0 + zone_x1) / 2.0,
        zone_y = margin + 16.0,
        x_end = width - margin,
        y_mid = margin + chart_height / 2.0,
        caption_y = height - 8.0,
    )
}

/// Chart B: attendance by lead-time bucket, optimum star-marked.
pub(crate) fn lead_time_chart(points: &[LeadTimePoint]) -> String {
    let width = 680.0;
    let height = 400.0;
    let margin = 60.0;
    let chart_width = width - 2.0 * margin;
    let chart_height = height - 2.0 * margin;

    if points.is_empty() {
        return String::from("<svg></svg>");
    }

    let max_rate = points
        .iter()
        .map(|p| p.rate_pct)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.2;
    let step = chart_width / (points.len().saturating_sub(1).max(1)) as f64;
    let baseline = margin + chart_height;

    let mut line_path = String::new();
    let mut markers = String::new();
    let mut x_labels = String::new();
    for (index, point) in points.iter().enumerate() {
        let x = margin + index as f64 * step;
        let y = baseline - (point.rate_pct / max_rate) * chart_height;
        if index == 0 {
            write!(line_path, "M{x:.1},{y:.1}").expect("write path start");
        } else {
            write!(line_path, " L{x:.1},{y:.1}").expect("write path segment");
        }

        write!(
            markers,
            r##"<circle cx="{x:.1}" cy="{y:.1}" r="6" fill="#EF4444"/>"##
        )
        .expect("write marker");
        if point.optimal {
            write!(
                markers,
                r##"<polygon points="{}" fill="#10B981"/>"##,
                star_points(x, y, 13.0)
            )
            .expect("write star marker");
        }
        write!(
            markers,
            r##"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{TITLE_COLOR}">{:.1}%</text>"##,
            y - 16.0,
            point.rate_pct
        )
        .expect("write value label");

        write!(
            x_labels,
            r##"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{LABEL_COLOR}">{}</text>"##,
            baseline + 20.0,
            escape_html(point.label)
        )
        .expect("write bucket label");
    }

    format!(
        r##"<svg viewBox="0 0 {width} {height}" role="img" style="background:white; border-radius:8px">
  <text x="{margin}" y="24" font-size="14" font-weight="600" fill="{TITLE_COLOR}">Lead Time vs Attendance</text>
  <line x1="{margin}" y1="{baseline:.1}" x2="{x_end:.1}" y2="{baseline:.1}" stroke="{AXIS_COLOR}" stroke-width="2"/>
  <line x1="{margin}" y1="{margin}" x2="{margin}" y2="{baseline:.1}" stroke="{AXIS_COLOR}" stroke-width="2"/>
  <path d="{line_path}" fill="none" stroke="#EF4444" stroke-width="4"/>
  {markers}
  {x_labels}
  <text x="{legend_x:.1}" y="30" font-size="11" fill="#10B981">&#9733; optimal window</text>
  <text x="15" y="{y_mid:.1}" text-anchor="middle" font-size="12" fill="{LABEL_COLOR}" transform="rotate(-90, 15, {y_mid:.1})">% Attendance</text>
</svg>"##,
        x_end = width - margin,
        legend_x = width - 160.0,
        y_mid = margin + chart_height / 2.0,
    )
}

/// Chart C: bookings by hour; bars at or above the highlight threshold
/// render amber, the rest gray.
pub(crate) fn hourly_chart(bars: &[HourBar]) -> String {
    let colors: Vec<&str> = bars
        .iter()
        .map(|bar| if bar.highlighted { "#F59E0B" } else { "#6B7280" })
        .collect();
    let labels: Vec<String> = bars.iter().map(|bar| bar.label.clone()).collect();
    let counts: Vec<u64> = bars.iter().map(|bar| bar.count).collect();
    bar_chart("Bookings by Hour", &labels, &counts, &colors)
}

/// Chart D: bookings by month on a sequential red-to-green scale.
pub(crate) fn monthly_chart(bars: &[MonthBar]) -> String {
    let colors: Vec<String> = bars
        .iter()
        .map(|bar| sequential_color(bar.intensity))
        .collect();
    let color_refs: Vec<&str> = colors.iter().map(String::as_str).collect();
    let labels: Vec<String> = bars.iter().map(|bar| bar.month.clone()).collect();
    let counts: Vec<u64> = bars.iter().map(|bar| bar.count).collect();
    bar_chart("Bookings by Month", &labels, &counts, &color_refs)
}

fn bar_chart(title: &str, labels: &[String], counts: &[u64], colors: &[&str]) -> String {
    let width = 680.0;
    let height = 350.0;
    let margin = 50.0;
    let chart_width = width - 2.0 * margin;
    let chart_height = height - 2.0 * margin;

    if labels.is_empty() {
        return String::from("<svg></svg>");
    }

    let max_count = counts.iter().copied().max().unwrap_or(1).max(1);
    let slot = chart_width / labels.len() as f64;
    let bar_width = slot * 0.6;
    let baseline = margin + chart_height;

    let mut bars = String::new();
    let mut x_labels = String::new();
    for (index, ((label, count), color)) in
        labels.iter().zip(counts).zip(colors).enumerate()
    {
        let x = margin + index as f64 * slot + (slot - bar_width) / 2.0;
        let bar_height = (*count as f64 / max_count as f64) * chart_height;
        let y = baseline - bar_height;
        let center = x + bar_width / 2.0;
        write!(
            bars,
            r##"<rect x="{x:.1}" y="{y:.1}" width="{bar_width:.1}" height="{bar_height:.1}" fill="{color}" opacity="0.9" rx="3"/>"##
        )
        .expect("write bar");
        write!(
            bars,
            r##"<text x="{center:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{TITLE_COLOR}">{count}</text>"##,
            y - 6.0
        )
        .expect("write count label");
        write!(
            x_labels,
            r##"<text x="{center:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{LABEL_COLOR}">{}</text>"##,
            baseline + 18.0,
            escape_html(label)
        )
        .expect("write axis label");
    }

    format!(
        r##"<svg viewBox="0 0 {width} {height}" role="img" style="background:white; border-radius:8px">
  <text x="{margin}" y="24" font-size="14" font-weight="600" fill="{TITLE_COLOR}">{title}</text>
  <line x1="{margin}" y1="{baseline:.1}" x2="{x_end:.1}" y2="{baseline:.1}" stroke="{AXIS_COLOR}" stroke-width="2"/>
  <line x1="{margin}" y1="{margin}" x2="{margin}" y2="{baseline:.1}" stroke="{AXIS_COLOR}" stroke-width="2"/>
  {bars}
  {x_labels}
</svg>"##,
        title = escape_html(title),
        x_end = width - margin,
    )
}

/// Segmentation donut: ring arcs with a 40% hole and a side legend.
pub(crate) fn donut_chart(slices: &[DonutSlice]) -> String {
    let width = 680.0;
    let height = 400.0;
    let cx = 200.0;
    let cy = 210.0;
    let outer = 140.0;
    let inner = outer * 0.4;

    if slices.is_empty() {
        return String::from("<svg></svg>");
    }

    let total: f64 = slices.iter().map(|s| s.share_pct).sum();
    let total = if total > 0.0 { total } else { 1.0 };

    let mut arcs = String::new();
    let mut legend = String::new();
    let mut angle = -PI / 2.0;
    for (index, slice) in slices.iter().enumerate() {
        // A full-circle slice would collapse the arc; cap just short of 2pi.
        let sweep = (slice.share_pct / total * 2.0 * PI).min(2.0 * PI - 1e-4);
        let end = angle + sweep;
        let large = u8::from(sweep > PI);

        let (x0o, y0o) = polar(cx, cy, outer, angle);
        let (x1o, y1o) = polar(cx, cy, outer, end);
        let (x0i, y0i) = polar(cx, cy, inner, angle);
        let (x1i, y1i) = polar(cx, cy, inner, end);
        write!(
            arcs,
            r##"<path d="M{x0o:.1},{y0o:.1} A{outer},{outer} 0 {large},1 {x1o:.1},{y1o:.1} L{x1i:.1},{y1i:.1} A{inner},{inner} 0 {large},0 {x0i:.1},{y0i:.1} Z" fill="{}" stroke="white" stroke-width="2"/>"##,
            slice.color
        )
        .expect("write donut arc");

        let swatch_y = 80.0 + index as f64 * 28.0;
        write!(
            legend,
            r##"<rect x="400" y="{swatch_y:.1}" width="14" height="14" rx="3" fill="{}"/><text x="422" y="{:.1}" font-size="13" fill="{TITLE_COLOR}">{} - {:.1}%</text>"##,
            slice.color,
            swatch_y + 12.0,
            escape_html(&slice.label),
            slice.share_pct
        )
        .expect("write legend entry");

        angle = end;
    }

    format!(
        r##"<svg viewBox="0 0 {width} {height}" role="img" style="background:white; border-radius:8px">
  <text x="40" y="30" font-size="14" font-weight="600" fill="{TITLE_COLOR}">Contacts by Tenure Segment</text>
  {arcs}
  {legend}
</svg>"##
    )
}

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

/// Five-spike star polygon centered on the marked point.
fn star_points(cx: f64, cy: f64, r: f64) -> String {
    let inner = r * 0.45;
    let mut points = String::new();
    for spike in 0..10 {
        let radius = if spike % 2 == 0 { r } else { inner };
        let angle = -PI / 2.0 + spike as f64 * PI / 5.0;
        let (x, y) = polar(cx, cy, radius, angle);
        if spike > 0 {
            points.push(' ');
        }
        write!(points, "{x:.1},{y:.1}").expect("write star point");
    }
    points
}

/// Red -> amber -> green interpolation over `t` in 0..=1, mirroring the
/// original chart's RdYlGn scale.
fn sequential_color(t: f64) -> String {
    const RED: (f64, f64, f64) = (239.0, 68.0, 68.0);
    const AMBER: (f64, f64, f64) = (245.0, 158.0, 11.0);
    const GREEN: (f64, f64, f64) = (16.0, 185.0, 129.0);

    let t = t.clamp(0.0, 1.0);
    let (from, to, local) = if t < 0.5 {
        (RED, AMBER, t * 2.0)
    } else {
        (AMBER, GREEN, (t - 0.5) * 2.0)
    };
    let channel = |a: f64, b: f64| (a + (b - a) * local).round() as u8;
    format!(
        "#{:02X}{:02X}{:02X}",
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_questions;
    use crate::metrics::bundled_snapshot;

    #[test]
    fn attendance_chart_draws_every_day_and_flags_the_filler() {
        let view = build_questions(&bundled_snapshot(), 1);
        let svg = attendance_chart(&view.attendance.points, view.attendance.optimal_zone);
        assert_eq!(svg.matches("<circle").count(), 31);
        assert_eq!(svg.matches(r#"opacity="0.6""#).count(), 29);
        assert!(svg.contains("synthetic filler"));
        assert!(svg.contains("Optimal zone"));
    }

    #[test]
    fn lead_time_chart_orders_buckets_and_stars_the_optimum() {
        let view = build_questions(&bundled_snapshot(), 1);
        let svg = lead_time_chart(&view.lead_time.points);
        let same_day = svg.find("Same-day").expect("first bucket present");
        let over_month = svg.find("&gt;1mo").expect("last bucket present");
        assert!(same_day < over_month);
        assert_eq!(svg.matches("<polygon").count(), 1);
    }

    #[test]
    fn monthly_chart_scales_colors_with_count() {
        let view = build_questions(&bundled_snapshot(), 1);
        let svg = monthly_chart(&view.bookings.month_bars);
        // Busiest month green, lightest month red.
        assert!(svg.contains("#10B981"));
        assert!(svg.contains("#EF4444"));
    }

    #[test]
    fn sequential_color_hits_the_scale_endpoints() {
        assert_eq!(sequential_color(0.0), "#EF4444");
        assert_eq!(sequential_color(0.5), "#F59E0B");
        assert_eq!(sequential_color(1.0), "#10B981");
    }

    #[test]
    fn donut_draws_one_arc_per_segment() {
        let slices = crate::dashboard::build_segmentation(&bundled_snapshot()).slices;
        let svg = donut_chart(&slices);
        assert_eq!(svg.matches("<path").count(), 5);
        assert!(svg.contains("Establecido - 45.9%"));
    }
}
