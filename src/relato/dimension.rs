use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "Performance")]
    Performance,
    #[serde(rename = "Communication & Collaboration")]
    Communication,
    #[serde(rename = "Efficiency & Flow")]
    Efficiency,
    #[serde(rename = "Satisfaction & Well-Being")]
    Wellbeing,
    #[serde(rename = "Activity")]
    Activity,
}

pub const ALL_DIMENSIONS: [Dimension; 5] = [
    Dimension::Performance,
    Dimension::Communication,
    Dimension::Efficiency,
    Dimension::Wellbeing,
    Dimension::Activity,
];

impl Dimension {
    /// Resolves a surface letter. `S` is an older spelling of `W`.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'P' => Some(Self::Performance),
            'C' => Some(Self::Communication),
            'E' => Some(Self::Efficiency),
            'W' | 'S' => Some(Self::Wellbeing),
            'A' => Some(Self::Activity),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Performance => 'P',
            Self::Communication => 'C',
            Self::Efficiency => 'E',
            Self::Wellbeing => 'W',
            Self::Activity => 'A',
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Communication => "Communication & Collaboration",
            Self::Efficiency => "Efficiency & Flow",
            Self::Wellbeing => "Satisfaction & Well-Being",
            Self::Activity => "Activity",
        }
    }

    pub fn tagged_label(self) -> &'static str {
        match self {
            Self::Performance => "SPACE-P (Performance)",
            Self::Communication => "SPACE-C (Communication & Collaboration)",
            Self::Efficiency => "SPACE-E (Efficiency & Flow)",
            Self::Wellbeing => "SPACE-W (Satisfaction & Well-Being)",
            Self::Activity => "SPACE-A (Activity)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        let mut chars = trimmed.chars();
        if let (Some(code), None) = (chars.next(), chars.next()) {
            return Self::from_code(code);
        }

        ALL_DIMENSIONS.into_iter().find(|dimension| {
            dimension.display_name().eq_ignore_ascii_case(trimmed)
                || dimension.tagged_label().eq_ignore_ascii_case(trimmed)
        })
    }

    pub fn is_activity(self) -> bool {
        self == Self::Activity
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
