use std::collections::BTreeMap;

use ads_map::{DEFAULT_MIN_CONFIDENCE, MapError, MappingEngine, RoleOverrides};
use ads_model::{ColumnHint, MetricRole};

fn numeric_hint() -> ColumnHint {
    ColumnHint {
        is_numeric: true,
        unique_ratio: 1.0,
        null_ratio: 0.0,
    }
}

fn text_hint() -> ColumnHint {
    ColumnHint {
        is_numeric: false,
        unique_ratio: 0.5,
        null_ratio: 0.0,
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn suggests_google_ads_export_headers() {
    let mut hints = BTreeMap::new();
    for name in ["Cost", "All conv.", "Clicks", "Impr."] {
        hints.insert(name.to_string(), numeric_hint());
    }
    hints.insert("Campaign".to_string(), text_hint());
    let engine = MappingEngine::new(DEFAULT_MIN_CONFIDENCE, hints);
    let headers = headers(&["Campaign", "Cost", "All conv.", "Clicks", "Impr."]);

    let suggestions = engine.suggest(&headers);

    let find = |role: MetricRole| {
        suggestions
            .iter()
            .find(|s| s.role == role)
            .map(|s| s.column.as_str())
    };
    assert_eq!(find(MetricRole::Cost), Some("Cost"));
    assert_eq!(find(MetricRole::Conversions), Some("All conv."));
    assert_eq!(find(MetricRole::Clicks), Some("Clicks"));
    assert_eq!(find(MetricRole::Impressions), Some("Impr."));
}

#[test]
fn resolve_uses_overrides_before_suggestions() {
    let engine = MappingEngine::new(DEFAULT_MIN_CONFIDENCE, BTreeMap::new());
    let headers = headers(&["Campaign", "Spend", "Conversions", "Clicks", "Impressions"]);
    let overrides = RoleOverrides {
        cost: Some("Spend".to_string()),
        ..RoleOverrides::default()
    };

    let mapping = engine.resolve(&headers, &overrides).expect("resolve");

    assert_eq!(mapping.cost, "Spend");
    assert_eq!(mapping.conversions, "Conversions");
    assert_eq!(mapping.clicks, "Clicks");
    assert_eq!(mapping.impressions, "Impressions");
}

#[test]
fn override_must_name_existing_column() {
    let engine = MappingEngine::new(DEFAULT_MIN_CONFIDENCE, BTreeMap::new());
    let headers = headers(&["Campaign", "Cost", "Conversions", "Clicks", "Impressions"]);
    let overrides = RoleOverrides {
        clicks: Some("Klicks".to_string()),
        ..RoleOverrides::default()
    };

    let error = engine.resolve(&headers, &overrides).unwrap_err();

    assert_eq!(
        error,
        MapError::UnknownColumn {
            role: MetricRole::Clicks,
            column: "Klicks".to_string(),
        }
    );
}

#[test]
fn unresolved_role_is_an_error_not_a_fallback() {
    // No header resembles "impressions"; the engine must refuse rather
    // than silently pick the first column.
    let engine = MappingEngine::new(DEFAULT_MIN_CONFIDENCE, BTreeMap::new());
    let headers = headers(&["Campaign", "Cost", "Conversions", "Clicks"]);

    let error = engine
        .resolve(&headers, &RoleOverrides::default())
        .unwrap_err();

    assert_eq!(
        error,
        MapError::Unresolved {
            role: MetricRole::Impressions,
        }
    );
}

#[test]
fn duplicate_column_across_roles_is_permitted() {
    let engine = MappingEngine::new(DEFAULT_MIN_CONFIDENCE, BTreeMap::new());
    let headers = headers(&["Campaign", "Cost", "Conversions", "Clicks", "Impressions"]);
    let overrides = RoleOverrides {
        conversions: Some("Clicks".to_string()),
        ..RoleOverrides::default()
    };

    let mapping = engine.resolve(&headers, &overrides).expect("resolve");

    assert_eq!(mapping.conversions, "Clicks");
    assert_eq!(mapping.clicks, "Clicks");
    assert_eq!(mapping.duplicate_columns(), vec!["Clicks"]);
}
