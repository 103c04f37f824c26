use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ParseArgs;
use crate::relato::ReportParser;
use crate::util::write_json_stdout;

pub fn run(args: ParseArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let id = match args.id {
        Some(id) => id,
        None => args
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 filename: {}", args.file.display()))?,
    };

    let parser = ReportParser::new()?;
    let report = parser.parse(&text, &id);

    info!(
        id = %report.source_id,
        period = %report.period,
        artifact = %report.artifact,
        dimensions = report.dimension_scores.len(),
        themes = report.theme_scores.len(),
        "parsed report"
    );

    write_json_stdout(&report)
}
