use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArtifactCategory {
    Planning,
    Daily,
    Retro,
    General,
}

impl ArtifactCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Daily => "Daily",
            Self::Retro => "Retro",
            Self::General => "General",
        }
    }

    pub fn classify(label: &str) -> Option<Self> {
        let normalized = collapse_separators(&label.to_lowercase());

        if normalized.contains("planning") {
            return Some(Self::Planning);
        }
        if normalized.contains("daily") {
            return Some(Self::Daily);
        }
        if normalized.contains("retro") {
            return Some(Self::Retro);
        }
        if ["survey", "alunos", "geral", "general"]
            .iter()
            .any(|keyword| normalized.contains(keyword))
        {
            return Some(Self::General);
        }

        None
    }
}

impl fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn artifact_label(label: &str) -> String {
    if label.trim().is_empty() {
        return "—".to_string();
    }

    match ArtifactCategory::classify(label) {
        Some(category) => category.as_str().to_string(),
        None => label.trim().to_string(),
    }
}

pub fn display_artifact(label: &str) -> String {
    let trimmed = label.trim_start();
    if trimmed.is_empty() {
        return "—".to_string();
    }

    let without_prefix = match trimmed.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("forms ") => trimmed[6..].trim_start(),
        _ => trimmed,
    };

    without_prefix.replace("  ", " ").trim().to_string()
}

fn collapse_separators(input: &str) -> String {
    input
        .split(|value: char| value.is_whitespace() || value == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}
