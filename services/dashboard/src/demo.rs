use crate::infra::resolve_filler_seed;
use clap::{Args, ValueEnum};
use ghl_insights::config::AppConfig;
use ghl_insights::dashboard::{
    build_questions, build_segmentation, build_summary, DashboardPage, PointSource,
};
use ghl_insights::error::AppError;
use ghl_insights::metrics::{BundledMetricsSource, MetricsProvider, MetricsSnapshot};
use ghl_insights::render::render_page;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PageArg {
    Summary,
    BusinessQuestions,
    Segmentation,
}

impl From<PageArg> for DashboardPage {
    fn from(value: PageArg) -> Self {
        match value {
            PageArg::Summary => DashboardPage::Summary,
            PageArg::BusinessQuestions => DashboardPage::BusinessQuestions,
            PageArg::Segmentation => DashboardPage::Segmentation,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Dashboard page to render
    #[arg(long, value_enum, default_value_t = PageArg::Summary)]
    pub(crate) page: PageArg,
    /// Seed for the synthetic chart filler (defaults to config, then entropy)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Write the HTML to this path instead of stdout
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for the synthetic chart filler (defaults to config, then entropy)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

fn load_snapshot() -> Result<(std::sync::Arc<MetricsSnapshot>, AppConfig), AppError> {
    let config = AppConfig::load()?;
    let provider = MetricsProvider::new(BundledMetricsSource, Duration::ZERO);
    let snapshot = provider.snapshot()?;
    Ok((snapshot, config))
}

pub(crate) fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let (snapshot, config) = load_snapshot()?;
    let seed = resolve_filler_seed(args.seed.or(config.dashboard.filler_seed));
    let html = render_page(args.page.into(), &snapshot, seed);

    match args.out {
        Some(path) => {
            fs::write(&path, html)?;
            println!("wrote {} (filler seed {seed})", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (snapshot, config) = load_snapshot()?;
    let seed = resolve_filler_seed(args.seed.or(config.dashboard.filler_seed));

    println!("=== GHL Executive Dashboard Demo ===");
    println!(
        "Snapshot generated {} | filler seed {seed}",
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    print_summary(&snapshot);
    print_questions(&snapshot, seed);
    print_segmentation(&snapshot);

    println!("Demo complete. Run `serve` to browse the same pages over HTTP.");
    Ok(())
}

fn print_summary(snapshot: &MetricsSnapshot) {
    let view = build_summary(snapshot);

    println!("--- {} ---", DashboardPage::Summary.label());
    for card in &view.cards {
        println!("  {:<16} {}", card.label, card.value);
    }
    println!();
    for insight in &view.insights {
        println!("  {}", insight.title);
        println!("    Value:          {}", insight.value);
        println!("    Finding:        {}", insight.finding);
        println!("    Recommendation: {}", insight.recommendation);
    }
    println!();
}

fn print_questions(snapshot: &MetricsSnapshot, seed: u64) {
    let view = build_questions(snapshot, seed);

    println!("--- {} ---", DashboardPage::BusinessQuestions.label());

    println!("  Q1: {}", view.attendance.question);
    println!("      {}", view.attendance.answer);
    let synthetic = view
        .attendance
        .points
        .iter()
        .filter(|p| p.source == PointSource::Synthetic)
        .count();
    println!(
        "      Chart: 31 days, {} observed / {synthetic} synthetic filler points, optimal zone days {}-{}",
        view.attendance.points.len() - synthetic,
        view.attendance.optimal_zone.0,
        view.attendance.optimal_zone.1
    );

    println!("  Q2: {}", view.lead_time.question);
    println!("      {}", view.lead_time.answer);
    for point in &view.lead_time.points {
        let marker = if point.optimal { " <- optimal" } else { "" };
        println!("      {:<9} {:>5.1}%{marker}", point.label, point.rate_pct);
    }

    println!("  Q3: {}", view.bookings.question);
    println!("      {}", view.bookings.answer);
    for bar in &view.bookings.hour_bars {
        let marker = if bar.highlighted { " *" } else { "" };
        println!("      {:<6} {:>4} bookings{marker}", bar.label, bar.count);
    }
    for bar in &view.bookings.month_bars {
        println!("      {:<8} {:>4} bookings", bar.month, bar.count);
    }
    println!();
}

fn print_segmentation(snapshot: &MetricsSnapshot) {
    let view = build_segmentation(snapshot);

    println!("--- {} ---", DashboardPage::Segmentation.label());
    for slice in &view.slices {
        println!("  {:<12} {:>5.1}%", slice.label, slice.share_pct);
    }
    println!();
    for tile in view.contact_tiles.iter().chain(&view.event_tiles) {
        println!("  {:<16} {}", tile.label, tile.value);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_arg_maps_onto_dashboard_pages() {
        assert_eq!(DashboardPage::from(PageArg::Summary), DashboardPage::Summary);
        assert_eq!(
            DashboardPage::from(PageArg::BusinessQuestions),
            DashboardPage::BusinessQuestions
        );
        assert_eq!(
            DashboardPage::from(PageArg::Segmentation),
            DashboardPage::Segmentation
        );
    }
}
