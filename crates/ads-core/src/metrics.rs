//! Derived ratio metrics and display formatting.

use ads_model::{AggregateRow, PerformanceRow};

/// Extends an aggregate row with CTR, CPA and conversion rate.
///
/// CTR and conversion rate are plain IEEE divisions, so a zero
/// denominator yields `+inf` (or NaN for `0/0`). CPA maps zero
/// conversions to `+inf` explicitly: "no conversions" has an unbounded
/// acquisition cost, it is not an error.
#[must_use]
pub fn derive(row: &AggregateRow) -> PerformanceRow {
    let cpa = if row.conversions == 0.0 {
        f64::INFINITY
    } else {
        row.cost / row.conversions
    };
    PerformanceRow {
        key: row.key.clone(),
        cost: row.cost,
        conversions: row.conversions,
        clicks: row.clicks,
        impressions: row.impressions,
        ctr: row.clicks / row.impressions * 100.0,
        cpa,
        conv_rate: row.conversions / row.clicks * 100.0,
    }
}

#[must_use]
pub fn derive_all(rows: &[AggregateRow]) -> Vec<PerformanceRow> {
    rows.iter().map(derive).collect()
}

/// Formats a rate as `12.34%`, or `N/A` when the value is not finite.
#[must_use]
pub fn format_rate(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}%")
    } else {
        "N/A".to_string()
    }
}

/// Formats a signed percent change as `+12.3%` / `-4.0%`, `N/A` when
/// undefined (previous period was zero).
#[must_use]
pub fn format_signed_pct(value: f64) -> String {
    if value.is_finite() {
        format!("{value:+.1}%")
    } else {
        "N/A".to_string()
    }
}

/// Formats a monetary amount with two decimals and thousands separators.
#[must_use]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Formats a summed count (clicks, impressions) with thousands
/// separators. Whole numbers render without decimals; fractional sums
/// (conversions can carry partial credit) keep two decimals.
#[must_use]
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    if value.fract() == 0.0 {
        let formatted = format!("{:.0}", value.abs());
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{}", group_thousands(&formatted))
    } else {
        format_amount(value)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::new();
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cost: f64, conversions: f64, clicks: f64, impressions: f64) -> AggregateRow {
        AggregateRow {
            key: "A".to_string(),
            cost,
            conversions,
            clicks,
            impressions,
        }
    }

    #[test]
    fn derives_example_rows() {
        let a = derive(&row(100.0, 10.0, 50.0, 1000.0));
        assert_eq!(a.ctr, 5.0);
        assert_eq!(a.cpa, 10.0);
        assert_eq!(a.conv_rate, 20.0);

        let b = derive(&row(50.0, 0.0, 5.0, 500.0));
        assert_eq!(b.ctr, 1.0);
        assert!(b.cpa.is_infinite() && b.cpa.is_sign_positive());
        assert_eq!(b.conv_rate, 0.0);
    }

    #[test]
    fn zero_denominators_yield_non_finite_ratios() {
        let zero_impressions = derive(&row(1.0, 1.0, 10.0, 0.0));
        assert!(zero_impressions.ctr.is_infinite());

        let zero_clicks = derive(&row(1.0, 2.0, 0.0, 100.0));
        assert!(zero_clicks.conv_rate.is_infinite());

        let all_zero = derive(&row(0.0, 0.0, 0.0, 0.0));
        assert!(all_zero.ctr.is_nan());
        assert!(all_zero.conv_rate.is_nan());
        assert!(all_zero.cpa.is_infinite());
    }

    #[test]
    fn cpa_is_exact_when_conversions_nonzero() {
        let row = derive(&row(7.5, 3.0, 10.0, 100.0));
        assert_eq!(row.cpa, 2.5);
    }

    #[test]
    fn rate_formatting_uses_na_sentinel() {
        assert_eq!(format_rate(12.345), "12.35%");
        assert_eq!(format_rate(f64::INFINITY), "N/A");
        assert_eq!(format_rate(f64::NAN), "N/A");
    }

    #[test]
    fn amount_formatting_groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-1234.5), "-1,234.50");
        assert_eq!(format_amount(f64::INFINITY), "N/A");
    }

    #[test]
    fn count_formatting_drops_decimals_for_whole_numbers() {
        assert_eq!(format_count(40.0), "40");
        assert_eq!(format_count(1234.0), "1,234");
        assert_eq!(format_count(1234567.0), "1,234,567");
        assert_eq!(format_count(2.5), "2.50");
        assert_eq!(format_count(f64::INFINITY), "N/A");
    }

    #[test]
    fn signed_pct_formatting() {
        assert_eq!(format_signed_pct(50.0), "+50.0%");
        assert_eq!(format_signed_pct(-12.34), "-12.3%");
        assert_eq!(format_signed_pct(f64::NAN), "N/A");
    }
}
