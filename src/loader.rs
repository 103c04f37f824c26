use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, warn};

use crate::relato::{Report, ReportParser};

#[derive(Debug, Error)]
#[error("failed to read report {id}")]
pub struct ReadFailure {
    pub id: String,
    #[source]
    pub cause: io::Error,
}

pub type DocumentOutcome = std::result::Result<Report, ReadFailure>;

#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub reports: Vec<Report>,
    pub failures: Vec<ReadFailure>,
}

pub trait DocumentSource {
    fn list_ids(&self) -> Result<Vec<String>>;
    fn read(&self, id: &str) -> io::Result<String>;
}

#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }
}

impl DocumentSource for DirectorySource {
    fn list_ids(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            warn!(path = %self.root.display(), "report directory missing");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to read {}", self.root.display()))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("failed to read entry in {}", self.root.display()))?;
            let path = entry.path();

            let file_type = entry
                .file_type()
                .with_context(|| format!("failed to inspect file type: {}", path.display()))?;
            // Dangling links stay listed so the read surfaces as a failure.
            let is_file = if file_type.is_symlink() {
                fs::metadata(&path)
                    .map(|metadata| metadata.is_file())
                    .unwrap_or(true)
            } else {
                file_type.is_file()
            };
            if !is_file {
                continue;
            }

            let is_markdown = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("md"))
                .unwrap_or(false);
            if !is_markdown {
                continue;
            }

            match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => ids.push(name.to_string()),
                None => warn!(path = %path.display(), "skipping report with non UTF-8 filename"),
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn read(&self, id: &str) -> io::Result<String> {
        fs::read_to_string(self.path_for(id))
    }
}

pub fn load_documents(
    source: &dyn DocumentSource,
    parser: &ReportParser,
) -> Result<Vec<DocumentOutcome>> {
    let mut ids = source.list_ids()?;
    ids.sort();

    let outcomes = ids
        .into_iter()
        .map(|id| match source.read(&id) {
            Ok(text) => {
                let report = parser.parse(&text, &id);
                debug!(id = %id, period = %report.period, artifact = %report.artifact, "parsed report");
                Ok(report)
            }
            Err(cause) => Err(ReadFailure { id, cause }),
        })
        .collect();

    Ok(outcomes)
}

pub fn load_all(source: &dyn DocumentSource, parser: &ReportParser) -> Result<LoadOutcome> {
    let mut outcome = LoadOutcome::default();

    for document in load_documents(source, parser)? {
        match document {
            Ok(report) => outcome.reports.push(report),
            Err(failure) => {
                warn!(id = %failure.id, error = %failure.cause, "skipping unreadable report");
                outcome.failures.push(failure);
            }
        }
    }

    Ok(outcome)
}
