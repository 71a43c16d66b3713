//! Mapping engine: scores dataset columns against the four metric roles.

use std::collections::BTreeMap;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use serde::Serialize;
use tracing::{debug, warn};

use ads_model::{ColumnHint, ColumnMapping, MetricRole};

use crate::error::MapError;

/// Minimum confidence a suggestion needs before it is used without an
/// explicit override.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.85;

/// Columns that score below this are not worth reporting at all.
const SUGGESTION_FLOOR: f64 = 0.5;

/// Penalty for candidate columns whose values are not numeric.
const NON_NUMERIC_PENALTY: f64 = 0.5;

/// Normalizes text for comparison by lowercasing and replacing separators
/// with spaces.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Known header spellings per role, normalized.
///
/// Seeded from the column names Google Ads exports actually use.
fn synonyms(role: MetricRole) -> &'static [&'static str] {
    match role {
        MetricRole::Cost => &["cost", "spend", "total cost", "total spend", "amount spent"],
        MetricRole::Conversions => &[
            "all conv",
            "conversions",
            "all conversions",
            "conv",
            "total conversions",
        ],
        MetricRole::Clicks => &["clicks", "link clicks", "total clicks"],
        MetricRole::Impressions => &["impressions", "impr", "total impressions"],
    }
}

/// A scored candidate column for one metric role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleSuggestion {
    pub role: MetricRole,
    pub column: String,
    /// 1.0 for an exact synonym match, otherwise Jaro-Winkler similarity.
    pub confidence: f64,
}

/// Explicit per-role column choices from the caller.
#[derive(Debug, Clone, Default)]
pub struct RoleOverrides {
    pub cost: Option<String>,
    pub conversions: Option<String>,
    pub clicks: Option<String>,
    pub impressions: Option<String>,
}

impl RoleOverrides {
    fn get(&self, role: MetricRole) -> Option<&str> {
        match role {
            MetricRole::Cost => self.cost.as_deref(),
            MetricRole::Conversions => self.conversions.as_deref(),
            MetricRole::Clicks => self.clicks.as_deref(),
            MetricRole::Impressions => self.impressions.as_deref(),
        }
    }
}

/// Scores dataset headers against metric roles and resolves a full
/// [`ColumnMapping`].
///
/// There is deliberately no fallback to "the first column": a role without
/// an override or a confident suggestion is a resolution error.
pub struct MappingEngine {
    min_confidence: f64,
    hints: BTreeMap<String, ColumnHint>,
}

impl MappingEngine {
    #[must_use]
    pub fn new(min_confidence: f64, hints: BTreeMap<String, ColumnHint>) -> Self {
        Self {
            min_confidence,
            hints,
        }
    }

    fn score(&self, role: MetricRole, column: &str) -> f64 {
        let normalized = normalize_text(column);
        let mut score: f64 = 0.0;
        for synonym in synonyms(role) {
            if normalized == *synonym {
                score = 1.0;
                break;
            }
            score = score.max(jaro_similarity(normalized.chars(), synonym.chars()));
        }
        // Metric columns hold numbers; text-valued candidates rank below
        // numeric ones of similar name.
        if let Some(hint) = self.hints.get(column)
            && !hint.is_numeric
            && hint.null_ratio < 1.0
        {
            score *= NON_NUMERIC_PENALTY;
        }
        score
    }

    /// Best candidate column per role, first occurrence winning ties.
    ///
    /// Roles whose best score is below the reporting floor are omitted.
    #[must_use]
    pub fn suggest(&self, headers: &[String]) -> Vec<RoleSuggestion> {
        let mut suggestions = Vec::new();
        for role in MetricRole::ALL {
            let mut best: Option<(usize, f64)> = None;
            for (idx, header) in headers.iter().enumerate() {
                let score = self.score(role, header);
                if best.is_none_or(|(_, current)| score > current) {
                    best = Some((idx, score));
                }
            }
            if let Some((idx, confidence)) = best
                && confidence >= SUGGESTION_FLOOR
            {
                debug!(
                    role = %role,
                    column = %headers[idx],
                    confidence,
                    "suggested column"
                );
                suggestions.push(RoleSuggestion {
                    role,
                    column: headers[idx].clone(),
                    confidence,
                });
            }
        }
        suggestions
    }

    /// Resolves a complete mapping from overrides plus suggestions.
    ///
    /// Overrides win and must name an existing header exactly; otherwise
    /// the best suggestion at or above the confidence threshold is taken.
    pub fn resolve(
        &self,
        headers: &[String],
        overrides: &RoleOverrides,
    ) -> Result<ColumnMapping, MapError> {
        let suggestions = self.suggest(headers);
        let mut resolved: BTreeMap<MetricRole, String> = BTreeMap::new();
        for role in MetricRole::ALL {
            let column = match overrides.get(role) {
                Some(column) => {
                    if !headers.iter().any(|header| header == column) {
                        return Err(MapError::UnknownColumn {
                            role,
                            column: column.to_string(),
                        });
                    }
                    column.to_string()
                }
                None => suggestions
                    .iter()
                    .find(|s| s.role == role && s.confidence >= self.min_confidence)
                    .map(|s| s.column.clone())
                    .ok_or(MapError::Unresolved { role })?,
            };
            resolved.insert(role, column);
        }
        let mapping = ColumnMapping::new(
            resolved.remove(&MetricRole::Cost).unwrap_or_default(),
            resolved.remove(&MetricRole::Conversions).unwrap_or_default(),
            resolved.remove(&MetricRole::Clicks).unwrap_or_default(),
            resolved.remove(&MetricRole::Impressions).unwrap_or_default(),
        );
        for column in mapping.duplicate_columns() {
            warn!(column, "column mapped to more than one metric role");
        }
        Ok(mapping)
    }
}
