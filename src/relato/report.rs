use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::dimension::Dimension;

pub const UNKNOWN_ARTIFACT: &str = "Unknown";
pub const UNKNOWN_PERIOD: &str = "Period ?";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub label: String,
    pub score: f64,
}

impl ScoredItem {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub artifact: String,
    pub period: String,
    pub overall_score: Option<f64>,
    pub dimension_scores: BTreeMap<Dimension, f64>,
    pub theme_scores: IndexMap<String, f64>,
    pub top_items: Vec<ScoredItem>,
    pub bottom_items: Vec<ScoredItem>,
    pub suggestions: Option<String>,
    pub source_id: String,
}

impl Report {
    pub fn period_number(&self) -> Option<u32> {
        period_number(&self.period)
    }
}

pub fn period_number(label: &str) -> Option<u32> {
    let digits = label
        .chars()
        .skip_while(|value| !value.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect::<String>();

    digits.parse::<u32>().ok()
}

/// Chronological ordering for period labels; labels without a number sort last.
pub fn compare_periods(left: &str, right: &str) -> std::cmp::Ordering {
    match (period_number(left), period_number(right)) {
        (Some(a), Some(b)) => a.cmp(&b).then_with(|| left.cmp(right)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => left.cmp(right),
    }
}

pub fn sort_periods(labels: &mut [String]) {
    labels.sort_by(|left, right| compare_periods(left, right));
}
