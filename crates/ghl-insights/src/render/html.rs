use crate::dashboard::DashboardPage;
use std::fmt::Write as _;

/// Palette and layout mirroring the original dashboard: blue masthead
/// gradient, green insight accents, amber question banners.
const STYLES: &str = r#"
:root { color-scheme: light; }
* { box-sizing: border-box; }
body { margin: 0; font-family: 'Segoe UI', system-ui, sans-serif; background: #F9FAFB; color: #111827; }
.masthead { background: linear-gradient(90deg, #3B82F6 0%, #1E40AF 100%); color: white; padding: 2rem; border-radius: 0 0 10px 10px; box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1); }
.masthead h1 { margin: 0 0 0.25rem 0; }
.masthead p { margin: 0.5rem 0 0 0; opacity: 0.9; }
nav { margin: 1rem 2rem; }
nav a { display: inline-block; margin-right: 0.75rem; padding: 0.5rem 1rem; border-radius: 8px; text-decoration: none; color: #1E40AF; background: #E5E7EB; }
nav a.active { background: #3B82F6; color: white; }
main { margin: 0 2rem 2rem 2rem; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
.metric-card { background: white; border-radius: 10px; padding: 1.25rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.metric-card .label { color: #6B7280; font-size: 0.85rem; }
.metric-card .value { font-size: 1.6rem; font-weight: 600; color: #1E40AF; }
.insight-card { background: linear-gradient(135deg, #F3F4F6 0%, #E5E7EB 100%); padding: 1.5rem; border-radius: 10px; border-left: 4px solid #10B981; margin-bottom: 1rem; }
.insight-card h2 { color: #3B82F6; margin: 0.25rem 0; }
.question { background: linear-gradient(135deg, #FEF3C7 0%, #FDE68A 100%); padding: 1.5rem; border-radius: 10px; border-left: 4px solid #F59E0B; margin: 1.5rem 0 1rem 0; }
.question h4 { color: #10B981; margin: 0.5rem 0 0 0; }
.chart { background: white; border-radius: 10px; padding: 1rem; margin-bottom: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.chart-row { display: flex; gap: 1rem; flex-wrap: wrap; }
.chart-row .chart { flex: 1 1 320px; }
.thirds { display: flex; gap: 1rem; margin-bottom: 1rem; }
.tile { background: white; border-radius: 10px; padding: 1rem 1.25rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.tile .label { color: #6B7280; font-size: 0.85rem; }
.tile .value { font-size: 1.3rem; font-weight: 600; }
.tiles { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
.error-banner { background: #FEE2E2; border-left: 4px solid #EF4444; border-radius: 10px; padding: 1.5rem; }
.error-banner h2 { color: #EF4444; margin-top: 0; }
footer { margin: 2rem; color: #6B7280; font-size: 0.85rem; border-top: 1px solid #E5E7EB; padding-top: 1rem; }
"#;

pub(crate) struct PageChrome {
    pub title: String,
    pub active: Option<DashboardPage>,
    /// Headline data line under the masthead title, already escaped.
    pub headline: String,
    pub footer: String,
}

/// Wraps a page body in the self-contained document shell: inline CSS,
/// masthead, nav, footer. No external assets, no scripts.
pub(crate) fn page_shell(chrome: &PageChrome, body: &str) -> String {
    let mut nav = String::new();
    for page in DashboardPage::ordered() {
        let class = if chrome.active == Some(page) {
            " class=\"active\""
        } else {
            ""
        };
        write!(
            nav,
            "<a href=\"/dashboard/{}\"{}>{}</a>",
            page.slug(),
            class,
            escape_html(page.label())
        )
        .expect("write nav link");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLES}</style>\n</head>\n<body>\n\
         <header class=\"masthead\"><h1>GHL Executive Dashboard</h1>\
         <h3>Go High Level Business Intelligence</h3><p>{headline}</p></header>\n\
         <nav>{nav}</nav>\n<main>\n{body}\n</main>\n<footer>{footer}</footer>\n\
         </body>\n</html>\n",
        title = escape_html(&chrome.title),
        headline = chrome.headline,
        footer = chrome.footer,
    )
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<b>\"Muy_Nuevo\" & 'Antiguo'</b>"),
            "&lt;b&gt;&quot;Muy_Nuevo&quot; &amp; &#39;Antiguo&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn shell_marks_the_active_page() {
        let chrome = PageChrome {
            title: "Executive Summary".to_string(),
            active: Some(DashboardPage::Summary),
            headline: "headline".to_string(),
            footer: "footer".to_string(),
        };
        let html = page_shell(&chrome, "<p>body</p>");
        assert!(html.contains("<a href=\"/dashboard/summary\" class=\"active\">"));
        assert!(html.contains("<a href=\"/dashboard/business-questions\">"));
        assert!(html.contains("<p>body</p>"));
    }
}
