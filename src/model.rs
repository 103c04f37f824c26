use serde::{Deserialize, Serialize};

use crate::aggregate::ScoreRow;
use crate::relato::Report;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: String,
    pub sha256: String,
    pub byte_count: usize,
    pub artifact: String,
    pub category: String,
    pub period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub document_count: usize,
    pub documents: Vec<DocumentEntry>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadFailureEntry {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadCounts {
    pub document_count: usize,
    pub report_count: usize,
    pub failure_count: usize,
    pub untitled_report_count: usize,
    pub score_row_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub updated_at: String,
    pub source_directory: String,
    pub counts: LoadCounts,
    pub failures: Vec<LoadFailureEntry>,
    pub reports: Vec<Report>,
    pub score_rows: Vec<ScoreRow>,
}
