//! Human-readable rendering of an analysis outcome.

use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ads_core::{format_amount, format_count, format_rate};
use ads_model::{MetricRole, PerformanceRow};

use crate::pipeline::AnalyzeOutcome;

/// Prints the summary block, recommendations, resolved mapping, and
/// (optionally) the two performance tables.
pub fn print_analysis(outcome: &AnalyzeOutcome, show_tables: bool) {
    println!("{}", outcome.result.summary);
    println!("Recommendations:");
    for (idx, recommendation) in outcome.result.recommendations.iter().enumerate() {
        println!("{}. {recommendation}", idx + 1);
    }
    println!();
    println!("Column mapping:");
    for (role, column) in outcome.mapping.iter() {
        println!("- {role}: {column}");
    }
    if !show_tables {
        return;
    }
    println!();
    println!("Campaign Performance Details:");
    println!(
        "{}",
        performance_table("Campaign", &sort_by_conv_rate_desc(&outcome.result.campaigns))
    );
    if let Some(monthly) = &outcome.result.monthly {
        println!();
        println!("Monthly Performance Trends:");
        println!("{}", performance_table("Month", &sort_by_label(monthly)));
    }
}

/// Campaign display order: conversion rate descending, NaN rows last,
/// ties by table order.
pub fn sort_by_conv_rate_desc(rows: &[PerformanceRow]) -> Vec<&PerformanceRow> {
    let mut sorted: Vec<&PerformanceRow> = rows.iter().collect();
    sorted.sort_by(|a, b| match (a.conv_rate.is_nan(), b.conv_rate.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.conv_rate.total_cmp(&a.conv_rate),
    });
    sorted
}

/// Monthly display order: by period label (the normalizer never re-sorts
/// by calendar, so a canonical order is applied here).
pub fn sort_by_label(rows: &[PerformanceRow]) -> Vec<&PerformanceRow> {
    let mut sorted: Vec<&PerformanceRow> = rows.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));
    sorted
}

fn performance_table(key_header: &str, rows: &[&PerformanceRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(key_header),
        header_cell("Cost"),
        header_cell("Conversions"),
        header_cell("Clicks"),
        header_cell("Impressions"),
        header_cell("CTR"),
        header_cell("CPA"),
        header_cell("Conv Rate"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..8 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.key).fg(Color::Blue),
            Cell::new(format_amount(row.cost)),
            Cell::new(format_count(row.conversions)),
            Cell::new(format_count(row.clicks)),
            Cell::new(format_count(row.impressions)),
            rate_cell(row.ctr),
            amount_cell(row.cpa),
            rate_cell(row.conv_rate),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn rate_cell(value: f64) -> Cell {
    if value.is_finite() {
        Cell::new(format_rate(value))
    } else {
        dim_cell("N/A")
    }
}

fn amount_cell(value: f64) -> Cell {
    if value.is_finite() {
        Cell::new(format_amount(value))
    } else {
        dim_cell("N/A")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}


/// Table of dataset columns with their hints and suggested roles, for the
/// `columns` command.
pub fn columns_table(
    headers: &[String],
    hints: &std::collections::BTreeMap<String, ads_model::ColumnHint>,
    suggestions: &[ads_map::RoleSuggestion],
) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Numeric"),
        header_cell("Null %"),
        header_cell("Unique %"),
        header_cell("Suggested Role"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for header in headers {
        let hint = hints.get(header);
        let suggestion = suggestions.iter().find(|s| &s.column == header);
        let role: Option<MetricRole> = suggestion.map(|s| s.role);
        table.add_row(vec![
            Cell::new(header).fg(Color::Blue),
            match hint {
                Some(hint) if hint.is_numeric => Cell::new("✓")
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
                _ => dim_cell("-"),
            },
            hint.map_or_else(|| dim_cell("-"), |h| Cell::new(format_rate(h.null_ratio * 100.0))),
            hint.map_or_else(|| dim_cell("-"), |h| Cell::new(format_rate(h.unique_ratio * 100.0))),
            role.map_or_else(|| dim_cell("-"), |role| Cell::new(role.label()).fg(Color::Green)),
            suggestion.map_or_else(|| dim_cell("-"), |s| Cell::new(format!("{:.2}", s.confidence))),
        ]);
    }
    table
}
