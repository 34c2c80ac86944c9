//! HTML rendering: pure functions from a metrics snapshot (plus the filler
//! seed) to complete, self-contained page documents.

mod charts;
mod html;

use crate::dashboard::{
    build_questions, build_segmentation, build_summary, AttendanceQuestion, DashboardPage,
    InsightCard, MetricCard, MetricTile,
};
use crate::fmt::{percent, thousands};
use crate::metrics::{MetricsError, MetricsSnapshot};
use html::{escape_html, page_shell, PageChrome};
use std::fmt::Write as _;

/// Renders the selected page. Rendering the same snapshot with the same
/// seed twice yields byte-identical output.
pub fn render_page(page: DashboardPage, snapshot: &MetricsSnapshot, seed: u64) -> String {
    match page {
        DashboardPage::Summary => render_summary(snapshot),
        DashboardPage::BusinessQuestions => render_questions(snapshot, seed),
        DashboardPage::Segmentation => render_segmentation(snapshot),
    }
}

pub fn render_summary(snapshot: &MetricsSnapshot) -> String {
    let view = build_summary(snapshot);
    let mut body = String::new();

    body.push_str("<h2>Executive Summary</h2>\n<div class=\"cards\">");
    for card in &view.cards {
        write_metric_card(&mut body, card);
    }
    body.push_str("</div>\n<h2>Key Insights</h2>\n");
    for insight in &view.insights {
        write_insight_card(&mut body, insight);
    }

    page_shell(&chrome(snapshot, DashboardPage::Summary), &body)
}

pub fn render_questions(snapshot: &MetricsSnapshot, seed: u64) -> String {
    let view = build_questions(snapshot, seed);
    let mut body = String::new();

    body.push_str("<h2>Business Questions</h2>\n");

    write_question_banner(
        &mut body,
        "Question 1",
        view.attendance.question,
        &view.attendance.answer,
    );
    writeln!(
        body,
        "<div class=\"chart\">{}</div>",
        charts::attendance_chart(&view.attendance.points, view.attendance.optimal_zone)
    )
    .expect("write chart A");
    write_month_thirds(&mut body, &view.attendance);

    write_question_banner(
        &mut body,
        "Question 2",
        view.lead_time.question,
        &view.lead_time.answer,
    );
    writeln!(
        body,
        "<div class=\"chart\">{}</div>",
        charts::lead_time_chart(&view.lead_time.points)
    )
    .expect("write chart B");

    write_question_banner(
        &mut body,
        "Question 3",
        view.bookings.question,
        &view.bookings.answer,
    );
    writeln!(
        body,
        "<div class=\"chart-row\"><div class=\"chart\">{}</div><div class=\"chart\">{}</div></div>",
        charts::hourly_chart(&view.bookings.hour_bars),
        charts::monthly_chart(&view.bookings.month_bars)
    )
    .expect("write charts C and D");

    page_shell(&chrome(snapshot, DashboardPage::BusinessQuestions), &body)
}

pub fn render_segmentation(snapshot: &MetricsSnapshot) -> String {
    let view = build_segmentation(snapshot);
    let mut body = String::new();

    body.push_str("<h2>Segmentation &amp; System Metrics</h2>\n");
    writeln!(
        body,
        "<div class=\"chart\">{}</div>",
        charts::donut_chart(&view.slices)
    )
    .expect("write donut");

    body.push_str("<h3>Contactability</h3>\n<div class=\"tiles\">");
    for tile in &view.contact_tiles {
        write_tile(&mut body, tile);
    }
    body.push_str("</div>\n<h3>Event Metrics</h3>\n<div class=\"tiles\">");
    for tile in &view.event_tiles {
        write_tile(&mut body, tile);
    }
    body.push_str("</div>\n");

    page_shell(&chrome(snapshot, DashboardPage::Segmentation), &body)
}

/// Full-shell error banner shown when the metrics source fails; the page
/// shell renders without the snapshot headline.
pub fn render_error_page(error: &MetricsError) -> String {
    let body = format!(
        "<div class=\"error-banner\"><h2>Metrics unavailable</h2><p>{}</p>\
         <p>The dashboard will retry the metrics source on the next request.</p></div>",
        escape_html(&error.to_string())
    );
    page_shell(
        &PageChrome {
            title: "Metrics Unavailable".to_string(),
            active: None,
            headline: "Metrics source unreachable".to_string(),
            footer: "GHL Insights".to_string(),
        },
        &body,
    )
}

/// Error shell for unknown dashboard slugs.
pub fn render_not_found(slug: &str) -> String {
    let body = format!(
        "<div class=\"error-banner\"><h2>Page not found</h2>\
         <p>No dashboard page is registered under &quot;{}&quot;.</p></div>",
        escape_html(slug)
    );
    page_shell(
        &PageChrome {
            title: "Page Not Found".to_string(),
            active: None,
            headline: "Unknown dashboard page".to_string(),
            footer: "GHL Insights".to_string(),
        },
        &body,
    )
}

fn chrome(snapshot: &MetricsSnapshot, active: DashboardPage) -> PageChrome {
    PageChrome {
        title: active.label().to_string(),
        active: Some(active),
        headline: format!(
            "Data: {} contacts | {} events | System: ACTIVE",
            thousands(snapshot.contacts.total_contacts),
            thousands(snapshot.events.total_events)
        ),
        footer: format!(
            "Snapshot generated {} | GHL Insights",
            snapshot.generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
    }
}

fn write_metric_card(body: &mut String, card: &MetricCard) {
    write!(
        body,
        "<div class=\"metric-card\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
        escape_html(card.label),
        escape_html(&card.value)
    )
    .expect("write metric card");
}

fn write_insight_card(body: &mut String, insight: &InsightCard) {
    write!(
        body,
        "<div class=\"insight-card\"><h3>{}</h3><h2>{}</h2>\
         <p><strong>Finding:</strong> {}</p>\
         <p><strong>Recommendation:</strong> {}</p></div>",
        escape_html(insight.title),
        escape_html(&insight.value),
        escape_html(&insight.finding),
        escape_html(insight.recommendation)
    )
    .expect("write insight card");
}

fn write_question_banner(body: &mut String, number: &str, question: &str, answer: &str) {
    write!(
        body,
        "<div class=\"question\"><h3>{}: {}</h3><h4>Answer: {}</h4></div>",
        escape_html(number),
        escape_html(question),
        escape_html(answer)
    )
    .expect("write question banner");
}

fn write_month_thirds(body: &mut String, attendance: &AttendanceQuestion) {
    let thirds = &attendance.month_thirds;
    write!(
        body,
        "<div class=\"thirds\">\
         <div class=\"tile\"><div class=\"label\">Days 1-10</div><div class=\"value\">{}</div></div>\
         <div class=\"tile\"><div class=\"label\">Days 11-20</div><div class=\"value\">{}</div></div>\
         <div class=\"tile\"><div class=\"label\">Days 21-31</div><div class=\"value\">{}</div></div>\
         </div>",
        percent(thirds.early),
        percent(thirds.mid),
        percent(thirds.late)
    )
    .expect("write month thirds");
}

fn write_tile(body: &mut String, tile: &MetricTile) {
    write!(
        body,
        "<div class=\"tile\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
        escape_html(tile.label),
        escape_html(&tile.value)
    )
    .expect("write tile");
}
