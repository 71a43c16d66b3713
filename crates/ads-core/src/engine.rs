//! Metrics & recommendation engine.

use std::fmt::Write as _;

use tracing::debug;

use ads_model::{AggregateRow, AnalysisResult, PerformanceRow, TrendDelta};

use crate::error::AnalyzeError;
use crate::metrics::{derive_all, format_amount, format_rate, format_signed_pct};

/// CTR threshold (percent) below which a campaign triggers the
/// performance alert.
const LOW_CTR_THRESHOLD: f64 = 1.0;

/// Row with the maximum conversion rate, first occurrence winning ties.
///
/// NaN rows are skipped; if every row is NaN the selection is undefined
/// and fails instead of picking an arbitrary row.
pub fn best_by_conv_rate(rows: &[PerformanceRow]) -> Result<&PerformanceRow, AnalyzeError> {
    select(rows, |candidate, best| candidate.conv_rate > best.conv_rate)
}

/// Row with the minimum conversion rate, first occurrence winning ties.
pub fn worst_by_conv_rate(rows: &[PerformanceRow]) -> Result<&PerformanceRow, AnalyzeError> {
    select(rows, |candidate, best| candidate.conv_rate < best.conv_rate)
}

fn select(
    rows: &[PerformanceRow],
    beats: impl Fn(&PerformanceRow, &PerformanceRow) -> bool,
) -> Result<&PerformanceRow, AnalyzeError> {
    let mut selected: Option<&PerformanceRow> = None;
    for row in rows {
        if row.conv_rate.is_nan() {
            continue;
        }
        match selected {
            None => selected = Some(row),
            Some(best) if beats(row, best) => selected = Some(row),
            Some(_) => {}
        }
    }
    selected.ok_or(AnalyzeError::NoComparableRows {
        metric: "conversion rate",
    })
}

/// Percent change of clicks and cost between the last two rows of the
/// monthly table, in table order.
pub fn period_over_period(rows: &[PerformanceRow]) -> Result<TrendDelta, AnalyzeError> {
    if rows.len() < 2 {
        return Err(AnalyzeError::InsufficientData { rows: rows.len() });
    }
    let latest = &rows[rows.len() - 1];
    let previous = &rows[rows.len() - 2];
    Ok(TrendDelta {
        latest: latest.key.clone(),
        latest_clicks: latest.clicks,
        latest_cost: latest.cost,
        clicks_change_pct: pct_change(previous.clicks, latest.clicks),
        cost_change_pct: pct_change(previous.cost, latest.cost),
        latest_ctr: latest.ctr,
        latest_conv_rate: latest.conv_rate,
    })
}

fn pct_change(previous: f64, latest: f64) -> f64 {
    (latest - previous) / previous * 100.0
}

/// Runs the full analysis over normalized aggregates.
///
/// Fails up front with [`AnalyzeError::EmptyDataset`] when there are no
/// campaign rows; every later selection assumes a non-empty table.
pub fn analyze(
    campaigns: &[AggregateRow],
    monthly: Option<&[AggregateRow]>,
    currency: &str,
) -> Result<AnalysisResult, AnalyzeError> {
    if campaigns.is_empty() {
        return Err(AnalyzeError::EmptyDataset);
    }
    let campaign_rows = derive_all(campaigns);
    let monthly_rows = monthly.map(derive_all);

    let top = best_by_conv_rate(&campaign_rows)?;
    let months = match &monthly_rows {
        Some(rows) => Some((best_by_conv_rate(rows)?, worst_by_conv_rate(rows)?)),
        None => None,
    };
    // With a single monthly row there is simply no trend to report;
    // callers wanting the hard error use period_over_period directly.
    let trend = match &monthly_rows {
        Some(rows) if rows.len() >= 2 => Some(period_over_period(rows)?),
        _ => None,
    };

    let totals = totals(campaigns);
    let summary = render_summary(&totals, top, months, trend.as_ref(), currency);
    let recommendations = build_recommendations(&campaign_rows, top);
    debug!(
        campaigns = campaign_rows.len(),
        recommendations = recommendations.len(),
        "analysis complete"
    );

    Ok(AnalysisResult {
        summary,
        recommendations,
        campaigns: campaign_rows,
        monthly: monthly_rows,
        trend,
    })
}

struct Totals {
    cost: f64,
    conversions: f64,
    clicks: f64,
    impressions: f64,
}

fn totals(campaigns: &[AggregateRow]) -> Totals {
    let mut totals = Totals {
        cost: 0.0,
        conversions: 0.0,
        clicks: 0.0,
        impressions: 0.0,
    };
    for row in campaigns {
        totals.cost += row.cost;
        totals.conversions += row.conversions;
        totals.clicks += row.clicks;
        totals.impressions += row.impressions;
    }
    totals
}

fn render_summary(
    totals: &Totals,
    top: &PerformanceRow,
    months: Option<(&PerformanceRow, &PerformanceRow)>,
    trend: Option<&TrendDelta>,
    currency: &str,
) -> String {
    // Overall ratios come from the totals, not averages of per-row ratios.
    let overall_ctr = totals.clicks / totals.impressions * 100.0;
    let average_cpa = totals.cost / totals.conversions;
    let mut summary = String::new();
    let _ = writeln!(summary, "📊 Campaign Performance Deep Dive:");
    let _ = writeln!(summary);
    let _ = writeln!(summary, "💰 Overall Performance:");
    let _ = writeln!(
        summary,
        "- Total Spend: {currency} {}",
        format_amount(totals.cost)
    );
    let _ = writeln!(
        summary,
        "- Total Conversions: {}",
        totals.conversions.round() as i64
    );
    let _ = writeln!(summary, "- Overall CTR: {}", format_rate(overall_ctr));
    let _ = writeln!(
        summary,
        "- Average CPA: {currency} {}",
        format_amount(average_cpa)
    );
    let _ = writeln!(summary);
    let _ = writeln!(summary, "🏆 Top Performing Campaign:");
    let _ = writeln!(summary, "- {}", top.key);
    let _ = writeln!(summary, "- Conversion Rate: {}", format_rate(top.conv_rate));
    if let Some((best, worst)) = months {
        let _ = writeln!(summary);
        let _ = writeln!(summary, "📈 Monthly Trend:");
        let _ = writeln!(
            summary,
            "- Best Month: {} (Conv. Rate: {})",
            best.key,
            format_rate(best.conv_rate)
        );
        let _ = writeln!(
            summary,
            "- Worst Month: {} (Conv. Rate: {})",
            worst.key,
            format_rate(worst.conv_rate)
        );
    }
    if let Some(delta) = trend {
        let _ = writeln!(summary);
        let _ = writeln!(
            summary,
            "📈 Latest Trends (comparing {} to previous month):",
            delta.latest
        );
        let _ = writeln!(
            summary,
            "- Clicks: {:.0} ({} change)",
            delta.latest_clicks,
            format_signed_pct(delta.clicks_change_pct)
        );
        let _ = writeln!(
            summary,
            "- Cost: {currency} {} ({} change)",
            format_amount(delta.latest_cost),
            format_signed_pct(delta.cost_change_pct)
        );
        let _ = writeln!(summary, "- CTR: {}", format_rate(delta.latest_ctr));
        let _ = writeln!(
            summary,
            "- Conversion Rate: {}",
            format_rate(delta.latest_conv_rate)
        );
    }
    summary
}

fn build_recommendations(campaigns: &[PerformanceRow], top: &PerformanceRow) -> Vec<String> {
    let mut recommendations = Vec::new();
    recommendations.push(format!(
        "💰 Budget Optimization: Increase budget allocation to '{}' which shows \
         the highest conversion rate of {}",
        top.key,
        format_rate(top.conv_rate)
    ));
    let low_performing: Vec<&str> = campaigns
        .iter()
        .filter(|row| row.ctr < LOW_CTR_THRESHOLD)
        .map(|row| row.key.as_str())
        .collect();
    if !low_performing.is_empty() {
        recommendations.push(format!(
            "📉 Performance Alert: Campaigns {} have CTR below 1%. Review ad copy \
             and targeting.",
            low_performing.join(", ")
        ));
    }
    recommendations
}
