//! Text rendering of console replies and dashboard notices

use std::fmt::Write;

use crate::capture::CaptureDisplay;
use crate::catalog::{category_label, FilterState, Product};
use crate::config::OutputFormat;
use crate::events::DashboardEvent;
use crate::signal::MeterReading;
use crate::state::DashboardStatus;

use super::protocol::Response;

const GAUGE_WIDTH: usize = 40;

/// Commands listed by `help`
pub const HELP: &[&str] = &[
    "start                      begin analysis",
    "stop                       end analysis",
    "reset                      reset confidence and indicators",
    "status                     show the dashboard",
    "products                   list products passing the filters",
    "filter category <v|all>    restrict to a category",
    "filter condition <v|all>   restrict to a condition",
    "search <text>              search title, brand and description",
    "sort <order>               newest, price_low or price_high",
    "clear-filters              restore default filters",
    "filters                    show or hide the filter panel",
    "show <id>                  open a product's details",
    "close                      close the details",
    "options                    list filter and sort values",
    "quit                       exit",
];

/// Render a reply as plain text
pub fn render(response: &Response) -> String {
    match response {
        Response::Status(status) => render_status(status),
        Response::Accepted { command } => format!("ok: {}", command),
        Response::Products {
            filters,
            filter_panel,
            selected,
            products,
        } => render_products(filters, *filter_panel, selected.as_deref(), products),
        Response::Filters { filters } => format!("filters: {}", describe_filters(filters)),
        Response::FilterPanel { shown } => {
            format!("filter panel {}", if *shown { "shown" } else { "hidden" })
        }
        Response::Detail { product } => render_detail(product),
        Response::Closed => "details closed".to_string(),
        Response::Options {
            categories,
            conditions,
            sort,
        } => {
            let mut out = String::new();
            for (title, entries) in [
                ("Category", categories),
                ("Condition", conditions),
                ("Sort By", sort),
            ] {
                let _ = writeln!(out, "{}:", title);
                for entry in entries {
                    let _ = writeln!(out, "  {:<12} {}", entry.value, entry.label);
                }
            }
            out.trim_end().to_string()
        }
        Response::Help { commands } => commands.join("\n"),
        Response::Error { message, .. } => format!("error: {}", message),
    }
}

/// Render a dashboard event as a notice line, if it has one
pub fn render_notice(event: &DashboardEvent) -> Option<String> {
    event
        .notice()
        .map(|(title, description)| format!("== {} == {}", title, description))
}

/// Line to print for an event: notices in text mode, every event as JSON
pub fn event_line(event: &DashboardEvent, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Text => render_notice(event),
        OutputFormat::Json => serde_json::to_string(event).ok(),
    }
}

fn render_status(status: &DashboardStatus) -> String {
    let snapshot = &status.dashboard;
    let mut out = String::new();

    let camera = match status.capture {
        CaptureDisplay::Live => "RECORDING",
        CaptureDisplay::Inactive => "Camera Inactive",
    };
    let _ = writeln!(
        out,
        "Analysis: {}   Camera: {}   Ticks: {}",
        if snapshot.active { "RUNNING" } else { "STOPPED" },
        camera,
        snapshot.ticks
    );
    let _ = writeln!(out, "{}", render_meter(&snapshot.meter));
    for indicator in &snapshot.indicators {
        let _ = writeln!(
            out,
            "  {:<16} {:<10} [{}]",
            indicator.kind.title(),
            indicator.label,
            indicator.status
        );
    }
    out.trim_end().to_string()
}

fn render_meter(meter: &MeterReading) -> String {
    let filled = ((meter.display / 100.0) * GAUGE_WIDTH as f64).round() as usize;
    let filled = filled.min(GAUGE_WIDTH);
    format!(
        "Truth Confidence {:>3}% {}\n  LIE [{}{}] TRUTH\n  Deception {}%  Deviation {}%  Honesty {}%",
        meter.honesty,
        meter.band,
        "#".repeat(filled),
        ".".repeat(GAUGE_WIDTH - filled),
        meter.deception,
        meter.deviation,
        meter.honesty
    )
}

fn describe_filters(filters: &FilterState) -> String {
    let category = filters
        .category
        .as_deref()
        .and_then(category_label)
        .unwrap_or("All Categories");
    let condition = filters
        .condition
        .map(|c| c.label())
        .unwrap_or("All Conditions");
    let mut out = format!("{}, {}, {}", category, condition, filters.sort_by.label());
    if !filters.search.is_empty() {
        let _ = write!(out, ", search \"{}\"", filters.search);
    }
    out
}

fn render_products(
    filters: &FilterState,
    filter_panel: bool,
    selected: Option<&str>,
    products: &[Product],
) -> String {
    let mut out = String::new();
    if filter_panel {
        let _ = writeln!(out, "Filters: {}", describe_filters(filters));
    }
    let _ = writeln!(out, "{} products", products.len());
    if products.is_empty() {
        out.push_str("  no products match");
        return out;
    }
    for product in products {
        let marker = if selected == Some(product.id.as_str()) { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} [{}] {:<26} ${:>5}  {:<10} {:<9} {}",
            marker,
            product.id,
            product.title,
            product.price,
            product.category,
            product.condition.badge(),
            product.location
        );
    }
    out.trim_end().to_string()
}

fn render_detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", product.title, product.status);
    let _ = writeln!(out, "  {} - {}", product.brand, product.model);
    let _ = writeln!(out, "  ${}", product.price);
    let _ = writeln!(
        out,
        "  {} / {}",
        product.category,
        product.condition.badge()
    );
    let _ = writeln!(out, "  {}", product.description);
    let _ = writeln!(out, "  {}", product.location);
    let _ = writeln!(out, "  Listed {}", product.created_at.format("%Y-%m-%d"));
    let _ = write!(out, "  {}", product.image);
    out
}
