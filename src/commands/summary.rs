use std::collections::BTreeSet;
use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use crate::aggregate::{
    ArtifactPeriodMean, DimensionPeriodMean, Kpis, LatestPeriodPoints, RowFilter,
    dimension_detail, dimension_period_means, kpis, latest_period_points, reports_for_artifact,
    score_rows, without_activity,
};
use crate::cli::SummaryArgs;
use crate::loader::{DirectorySource, load_all};
use crate::relato::{Dimension, Report, ReportParser, display_artifact, sort_periods};
use crate::util::write_json_stdout;

#[derive(Debug, Serialize)]
struct SummaryResponse<'a> {
    source_directory: String,
    report_count: usize,
    unreadable_count: usize,
    periods: Vec<String>,
    dimensions: Vec<Dimension>,
    kpis: Kpis,
    dimension_period_means: Vec<DimensionPeriodMean>,
    latest_period: LatestPeriodPoints,
    detail_dimension: Option<Dimension>,
    detail: Vec<ArtifactPeriodMean>,
    artifact_reports: Vec<&'a Report>,
}

pub fn run(args: SummaryArgs) -> Result<()> {
    let source = DirectorySource::new(&args.relatos_dir);
    let parser = ReportParser::new()?;
    let outcome = load_all(&source, &parser)?;

    if outcome.reports.is_empty() {
        bail!("no reports found in {}", source.root().display());
    }

    let filter = RowFilter {
        periods: args.periods.iter().cloned().collect(),
        dimensions: resolve_dimensions(&args.dimensions)?,
    };
    let detail_dimension = args
        .detail_dimension
        .as_deref()
        .map(resolve_dimension)
        .transpose()?;

    let mut rows = score_rows(&outcome.reports);
    if !args.include_activity {
        rows = without_activity(rows);
    }
    let filtered = filter.apply(&rows);

    let mut periods = filtered
        .iter()
        .map(|row| row.period.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect::<Vec<String>>();
    sort_periods(&mut periods);
    let dimensions = filtered
        .iter()
        .map(|row| row.dimension)
        .collect::<BTreeSet<Dimension>>()
        .into_iter()
        .collect::<Vec<Dimension>>();

    let artifact_reports = match args.artifact.as_deref() {
        Some(artifact) => reports_for_artifact(&outcome.reports, &display_artifact(artifact), &filter),
        None => Vec::new(),
    };

    let response = SummaryResponse {
        source_directory: source.root().display().to_string(),
        report_count: outcome.reports.len(),
        unreadable_count: outcome.failures.len(),
        periods,
        dimensions,
        kpis: kpis(&filtered),
        dimension_period_means: dimension_period_means(&filtered),
        latest_period: latest_period_points(&outcome.reports, &filter.periods),
        detail_dimension,
        detail: detail_dimension
            .map(|dimension| dimension_detail(&filtered, dimension))
            .unwrap_or_default(),
        artifact_reports,
    };

    info!(
        reports = response.report_count,
        rows = filtered.len(),
        periods = response.periods.len(),
        "summary computed"
    );

    if args.json {
        write_json_stdout(&response)
    } else {
        write_text_summary(&response)
    }
}

fn resolve_dimension(name: &str) -> Result<Dimension> {
    Dimension::from_name(name).with_context(|| format!("unknown dimension: {name}"))
}

fn resolve_dimensions(names: &[String]) -> Result<BTreeSet<Dimension>> {
    names.iter().map(|name| resolve_dimension(name)).collect()
}

fn write_text_summary(response: &SummaryResponse<'_>) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(
        output,
        "Reports: {} (unreadable {}) from {}",
        response.report_count, response.unreadable_count, response.source_directory
    )?;
    writeln!(output, "Periods: {}", response.periods.join(", "))?;
    writeln!(
        output,
        "Mean score: {}\tTop dimension: {}\tTop period: {}",
        format_score(response.kpis.mean_score),
        response
            .kpis
            .top_dimension
            .map(|dimension| dimension.tagged_label().to_string())
            .unwrap_or_else(|| "—".to_string()),
        response.kpis.top_period.as_deref().unwrap_or("—"),
    )?;

    writeln!(output)?;
    writeln!(output, "Dimension means by period:")?;
    for cell in &response.dimension_period_means {
        writeln!(
            output,
            "\t{} {}\t{}\t{:.2}\t(n={})",
            cell.dimension.code(),
            cell.dimension,
            cell.period,
            cell.mean,
            cell.count
        )?;
    }

    writeln!(output)?;
    match &response.latest_period.period {
        Some(period) => writeln!(output, "Latest period: {period}")?,
        None => writeln!(output, "Latest period: —")?,
    }
    for point in &response.latest_period.points {
        writeln!(
            output,
            "\t{}\t{}\t{:.2}\t{}",
            point.category, point.dimension, point.score, point.source_id
        )?;
    }

    if let Some(dimension) = response.detail_dimension {
        writeln!(output)?;
        writeln!(output, "Detail for {}:", dimension.tagged_label())?;
        for cell in &response.detail {
            writeln!(output, "\t{}\t{}\t{:.2}", cell.period, cell.artifact, cell.mean)?;
        }
    }

    for report in &response.artifact_reports {
        writeln!(output)?;
        write_report_detail(&mut output, report)?;
    }

    output.flush()?;
    Ok(())
}

fn write_report_detail(output: &mut impl Write, report: &Report) -> Result<()> {
    writeln!(
        output,
        "{} — {} ({})",
        display_artifact(&report.artifact),
        report.period,
        report.source_id
    )?;
    if let Some(score) = report.overall_score {
        writeln!(output, "\tOverall: {score:.2}")?;
    }
    for (dimension, score) in &report.dimension_scores {
        writeln!(output, "\t{}\t{score:.2}", dimension.tagged_label())?;
    }
    for (theme, score) in &report.theme_scores {
        writeln!(output, "\tTheme {theme}\t{score:.2}")?;
    }
    for (rank, item) in report.top_items.iter().enumerate() {
        writeln!(output, "\tTop {}. {}\t{:.2}", rank + 1, item.label, item.score)?;
    }
    for (rank, item) in report.bottom_items.iter().enumerate() {
        writeln!(output, "\tBottom {}. {}\t{:.2}", rank + 1, item.label, item.score)?;
    }
    if let Some(suggestions) = &report.suggestions {
        writeln!(output, "\tSuggestions:")?;
        for line in suggestions.lines() {
            writeln!(output, "\t\t{line}")?;
        }
    }
    Ok(())
}

fn format_score(score: Option<f64>) -> String {
    score
        .map(|value| format!("{value:.2}"))
        .unwrap_or_else(|| "—".to_string())
}
