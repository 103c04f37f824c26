use std::path::Path;

use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cli::InventoryArgs;
use crate::loader::{DirectorySource, DocumentSource};
use crate::model::{DocumentEntry, DocumentInventoryManifest};
use crate::relato::{ReportParser, artifact_label};
use crate::util::{now_utc_string, sha256_hex, write_json_pretty};

pub fn run(args: InventoryArgs) -> Result<()> {
    let parser = ReportParser::new()?;
    let manifest = build_manifest(&args.relatos_dir, &parser)?;

    if args.dry_run {
        info!(
            document_count = manifest.document_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.manifest_dir.join("relatos_inventory.json"));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(document_count = manifest.document_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(relatos_dir: &Path, parser: &ReportParser) -> Result<DocumentInventoryManifest> {
    let source = DirectorySource::new(relatos_dir);
    let ids = source.list_ids()?;

    if ids.is_empty() {
        bail!("no reports found in {}", relatos_dir.display());
    }

    let mut documents = Vec::with_capacity(ids.len());
    let mut warnings = Vec::new();
    for id in ids {
        let text = match source.read(&id) {
            Ok(text) => text,
            Err(err) => {
                warn!(id = %id, error = %err, "skipping unreadable report");
                warnings.push(format!("{id}: {err}"));
                continue;
            }
        };

        let report = parser.parse(&text, &id);
        documents.push(DocumentEntry {
            sha256: sha256_hex(text.as_bytes()),
            byte_count: text.len(),
            category: artifact_label(&report.artifact),
            artifact: report.artifact,
            period: report.period,
            id,
        });
    }

    Ok(DocumentInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: relatos_dir.display().to_string(),
        document_count: documents.len(),
        documents,
        warnings,
    })
}
