use std::path::Path;

use anyhow::{Result, bail};
use chrono::Utc;
use tracing::info;

use crate::aggregate::score_rows;
use crate::cli::LoadArgs;
use crate::loader::{DirectorySource, LoadOutcome, load_all};
use crate::model::{LoadCounts, LoadFailureEntry, LoadRunManifest};
use crate::relato::ReportParser;
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty};

pub fn run(args: LoadArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("load-{}", utc_compact_string(started_ts));

    let output_path = args.output_path.clone().unwrap_or_else(|| {
        args.manifest_dir
            .join(format!("load_run_{}.json", utc_compact_string(started_ts)))
    });

    let source = DirectorySource::new(&args.relatos_dir);
    info!(relatos_dir = %source.root().display(), run_id = %run_id, "starting load");

    let parser = ReportParser::new()?;
    let outcome = load_all(&source, &parser)?;
    let manifest = build_manifest(run_id, started_at, &args.relatos_dir, outcome)?;

    write_json_pretty(&output_path, &manifest)?;

    info!(path = %output_path.display(), "wrote load run manifest");
    info!(
        reports = manifest.counts.report_count,
        failures = manifest.counts.failure_count,
        score_rows = manifest.counts.score_row_count,
        "load completed"
    );

    Ok(())
}

fn build_manifest(
    run_id: String,
    started_at: String,
    relatos_dir: &Path,
    outcome: LoadOutcome,
) -> Result<LoadRunManifest> {
    let LoadOutcome { reports, failures } = outcome;

    if reports.is_empty() {
        bail!(
            "no reports found in {} ({} unreadable)",
            relatos_dir.display(),
            failures.len()
        );
    }

    let rows = score_rows(&reports);
    let untitled_report_count = reports
        .iter()
        .filter(|report| report.period_number().is_none())
        .count();

    let failures = failures
        .into_iter()
        .map(|failure| LoadFailureEntry {
            reason: failure.cause.to_string(),
            id: failure.id,
        })
        .collect::<Vec<LoadFailureEntry>>();

    Ok(LoadRunManifest {
        manifest_version: 1,
        run_id,
        started_at,
        updated_at: now_utc_string(),
        source_directory: relatos_dir.display().to_string(),
        counts: LoadCounts {
            document_count: reports.len() + failures.len(),
            report_count: reports.len(),
            failure_count: failures.len(),
            untitled_report_count,
            score_row_count: rows.len(),
        },
        failures,
        reports,
        score_rows: rows,
    })
}
