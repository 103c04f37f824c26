mod artifact;
mod dimension;
mod parser;
mod report;
#[cfg(test)]
mod tests;

pub use artifact::{ArtifactCategory, artifact_label, display_artifact};
pub use dimension::Dimension;
pub use parser::ReportParser;
pub use report::{Report, compare_periods, sort_periods};
