use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::relato::{
    ArtifactCategory, Dimension, Report, compare_periods, display_artifact, sort_periods,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub dimension: Dimension,
    pub period: String,
    pub score: f64,
    pub artifact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub mean_score: Option<f64>,
    pub top_dimension: Option<Dimension>,
    pub top_period: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionPeriodMean {
    pub dimension: Dimension,
    pub period: String,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactPoint {
    pub category: ArtifactCategory,
    pub dimension: Dimension,
    pub score: f64,
    pub source_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatestPeriodPoints {
    pub period: Option<String>,
    pub points: Vec<ArtifactPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactPeriodMean {
    pub artifact: String,
    pub period: String,
    pub mean: f64,
}

/// Empty sets mean "keep everything".
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    pub periods: BTreeSet<String>,
    pub dimensions: BTreeSet<Dimension>,
}

impl RowFilter {
    pub fn allows_period(&self, period: &str) -> bool {
        self.periods.is_empty() || self.periods.contains(period)
    }

    pub fn allows_dimension(&self, dimension: Dimension) -> bool {
        self.dimensions.is_empty() || self.dimensions.contains(&dimension)
    }

    pub fn apply(&self, rows: &[ScoreRow]) -> Vec<ScoreRow> {
        rows.iter()
            .filter(|row| self.allows_period(&row.period) && self.allows_dimension(row.dimension))
            .cloned()
            .collect()
    }
}

pub fn score_rows(reports: &[Report]) -> Vec<ScoreRow> {
    reports
        .iter()
        .flat_map(|report| {
            let artifact = display_artifact(&report.artifact);
            report
                .dimension_scores
                .iter()
                .map(move |(dimension, score)| ScoreRow {
                    dimension: *dimension,
                    period: report.period.clone(),
                    score: *score,
                    artifact: artifact.clone(),
                })
        })
        .collect()
}

pub fn without_activity(rows: Vec<ScoreRow>) -> Vec<ScoreRow> {
    rows.into_iter()
        .filter(|row| !row.dimension.is_activity())
        .collect()
}

pub fn kpis(rows: &[ScoreRow]) -> Kpis {
    let scores = rows.iter().map(|row| row.score).collect::<Vec<f64>>();

    let mut by_dimension = BTreeMap::<Dimension, Vec<f64>>::new();
    let mut by_period = BTreeMap::<String, Vec<f64>>::new();
    for row in rows {
        by_dimension.entry(row.dimension).or_default().push(row.score);
        by_period
            .entry(row.period.clone())
            .or_default()
            .push(row.score);
    }

    let top_dimension = highest_mean(by_dimension.into_iter().collect());

    let mut periods = by_period.into_iter().collect::<Vec<(String, Vec<f64>)>>();
    periods.sort_by(|(left, _), (right, _)| compare_periods(left, right));
    let top_period = highest_mean(periods);

    Kpis {
        mean_score: mean(&scores),
        top_dimension,
        top_period,
    }
}

pub fn dimension_period_means(rows: &[ScoreRow]) -> Vec<DimensionPeriodMean> {
    let mut groups = BTreeMap::<(Dimension, String), Vec<f64>>::new();
    for row in rows {
        groups
            .entry((row.dimension, row.period.clone()))
            .or_default()
            .push(row.score);
    }

    let mut means = groups
        .into_iter()
        .filter_map(|((dimension, period), scores)| {
            Some(DimensionPeriodMean {
                dimension,
                period,
                mean: mean(&scores)?,
                count: scores.len(),
            })
        })
        .collect::<Vec<DimensionPeriodMean>>();

    means.sort_by(|left, right| {
        left.dimension
            .cmp(&right.dimension)
            .then_with(|| compare_periods(&left.period, &right.period))
    });
    means
}

/// Latest period among `selected` (or among all report periods when nothing
/// selected matches).
pub fn latest_period(reports: &[Report], selected: &BTreeSet<String>) -> Option<String> {
    let mut all = reports
        .iter()
        .map(|report| report.period.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect::<Vec<String>>();
    sort_periods(&mut all);

    let pool = all
        .iter()
        .filter(|period| selected.is_empty() || selected.contains(*period))
        .cloned()
        .collect::<Vec<String>>();

    if pool.is_empty() {
        all.pop()
    } else {
        pool.last().cloned()
    }
}

pub fn latest_period_points(reports: &[Report], selected: &BTreeSet<String>) -> LatestPeriodPoints {
    let Some(period) = latest_period(reports, selected) else {
        return LatestPeriodPoints::default();
    };

    let mut points = Vec::new();
    for report in reports.iter().filter(|report| report.period == period) {
        let Some(category) = ArtifactCategory::classify(&display_artifact(&report.artifact)) else {
            continue;
        };

        for (dimension, score) in &report.dimension_scores {
            if dimension.is_activity() {
                continue;
            }
            points.push(ArtifactPoint {
                category,
                dimension: *dimension,
                score: *score,
                source_id: report.source_id.clone(),
            });
        }
    }

    points.sort_by(|left, right| {
        left.category
            .cmp(&right.category)
            .then(left.dimension.cmp(&right.dimension))
    });

    LatestPeriodPoints {
        period: Some(period),
        points,
    }
}

pub fn dimension_detail(rows: &[ScoreRow], dimension: Dimension) -> Vec<ArtifactPeriodMean> {
    let mut groups = BTreeMap::<(String, String), Vec<f64>>::new();
    for row in rows.iter().filter(|row| row.dimension == dimension) {
        groups
            .entry((row.artifact.clone(), row.period.clone()))
            .or_default()
            .push(row.score);
    }

    let mut detail = groups
        .into_iter()
        .filter_map(|((artifact, period), scores)| {
            Some(ArtifactPeriodMean {
                artifact,
                period,
                mean: mean(&scores)?,
            })
        })
        .collect::<Vec<ArtifactPeriodMean>>();

    detail.sort_by(|left, right| {
        compare_periods(&left.period, &right.period)
            .then_with(|| right.mean.total_cmp(&left.mean))
    });
    detail
}

pub fn reports_for_artifact<'a>(
    reports: &'a [Report],
    artifact: &str,
    filter: &RowFilter,
) -> Vec<&'a Report> {
    reports
        .iter()
        .filter(|report| display_artifact(&report.artifact) == artifact)
        .filter(|report| filter.allows_period(&report.period))
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn highest_mean<K>(groups: Vec<(K, Vec<f64>)>) -> Option<K> {
    let mut best: Option<(K, f64)> = None;
    for (key, scores) in groups {
        let Some(value) = mean(&scores) else {
            continue;
        };
        let improves = best
            .as_ref()
            .map(|(_, current)| value > *current)
            .unwrap_or(true);
        if improves {
            best = Some((key, value));
        }
    }
    best.map(|(key, _)| key)
}
