use std::collections::BTreeMap;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::Regex;

use super::dimension::Dimension;
use super::report::{Report, ScoredItem, UNKNOWN_ARTIFACT, UNKNOWN_PERIOD};

const TITLE_WINDOW: usize = 5;
const OVERALL_SCORE_WINDOW: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    None,
    Themes,
    DimensionScores,
    Top,
    Bottom,
    Suggestions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Heading(Section),
    Body(&'a str),
}

impl Section {
    pub fn advance(self, line: LineKind<'_>) -> Self {
        match line {
            LineKind::Heading(next) => next,
            LineKind::Body(_) => self,
        }
    }
}

#[derive(Debug, Default)]
struct ReportDraft {
    dimension_scores: BTreeMap<Dimension, f64>,
    theme_scores: IndexMap<String, f64>,
    top_items: Vec<ScoredItem>,
    bottom_items: Vec<ScoredItem>,
    suggestion_lines: Vec<String>,
}

#[derive(Debug)]
pub struct ReportParser {
    title: Regex,
    overall_score: Regex,
    themes_heading: Regex,
    dimension_heading: Regex,
    top_heading: Regex,
    bottom_heading: Regex,
    suggestions_heading: Regex,
    scored_line: Regex,
    dimension_code: Regex,
}

impl ReportParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: Regex::new(
                r"(?i)^#*\s*(?:report|relato)\s*[-–—]\s*(?:period|sprint)\s*(?P<period>\d+)\s*[-–—]\s*(?P<artifact>.+?)\s*(?:\(.*)?$",
            )
            .context("failed to compile report title regex")?,
            overall_score: Regex::new(
                r"(?i)\b(?:score|nota)\**\s*(?:\([^)]*\))?\s*\**\s*:\s*[*_]*\s*(?P<score>\d+(?:[.,]\d+)?)",
            )
            .context("failed to compile overall score regex")?,
            themes_heading: Regex::new(r"(?i)^#{1,6}\s*(?:themes?|temas?)\b")
                .context("failed to compile themes heading regex")?,
            dimension_heading: Regex::new(
                r"(?i)^#{1,6}\s*(?:dimension(?:s|[\s\-]*scores?)?|space)\b",
            )
            .context("failed to compile dimension heading regex")?,
            top_heading: Regex::new(r"(?i)^#{1,6}\s*top[\s\-]*5\b")
                .context("failed to compile top heading regex")?,
            bottom_heading: Regex::new(r"(?i)^#{1,6}\s*bottom[\s\-]*5\b")
                .context("failed to compile bottom heading regex")?,
            suggestions_heading: Regex::new(r"(?i)^#{1,6}\s*(?:suggest|sugest)")
                .context("failed to compile suggestions heading regex")?,
            scored_line: Regex::new(
                r"^(?:[-*+•]|\d+[.)])\s+(?P<label>.+?)\s*:\s*[*_]*\s*(?P<value>\d+(?:[.,]\d+)?)\s*(?:/\s*10)?\s*[*_]*\s*$",
            )
            .context("failed to compile scored bullet regex")?,
            dimension_code: Regex::new(
                r"(?i:\b(?:space|dim(?:ension)?|code)[\s\-_](?P<code>[pcewsa])\b)|\bSPACE(?P<attached>[PCEWSA])\b",
            )
            .context("failed to compile dimension code regex")?,
        })
    }

    /// Parses one document. Missing or malformed structure degrades to
    /// placeholders and omitted fields, never to an error.
    pub fn parse(&self, text: &str, source_id: &str) -> Report {
        let lines = text
            .trim_start_matches('\u{feff}')
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();

        let (artifact, period) = self
            .extract_title(&lines[..lines.len().min(TITLE_WINDOW)])
            .unwrap_or_else(|| (UNKNOWN_ARTIFACT.to_string(), UNKNOWN_PERIOD.to_string()));
        let overall_score =
            self.extract_overall_score(&lines[..lines.len().min(OVERALL_SCORE_WINDOW)]);

        let mut draft = ReportDraft::default();
        let mut section = Section::None;
        for line in &lines {
            let kind = self.classify(line);
            section = section.advance(kind);
            if let LineKind::Body(body) = kind {
                self.interpret(section, body, &mut draft);
            }
        }

        let suggestions = if draft.suggestion_lines.is_empty() {
            None
        } else {
            Some(draft.suggestion_lines.join("\n"))
        };

        Report {
            artifact,
            period,
            overall_score,
            dimension_scores: draft.dimension_scores,
            theme_scores: draft.theme_scores,
            top_items: draft.top_items,
            bottom_items: draft.bottom_items,
            suggestions,
            source_id: source_id.to_string(),
        }
    }

    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let headings = [
            (&self.themes_heading, Section::Themes),
            (&self.dimension_heading, Section::DimensionScores),
            (&self.top_heading, Section::Top),
            (&self.bottom_heading, Section::Bottom),
            (&self.suggestions_heading, Section::Suggestions),
        ];

        headings
            .into_iter()
            .find(|(pattern, _)| pattern.is_match(line))
            .map(|(_, section)| LineKind::Heading(section))
            .unwrap_or(LineKind::Body(line))
    }

    fn extract_title(&self, lines: &[&str]) -> Option<(String, String)> {
        lines.iter().find_map(|line| {
            let captures = self.title.captures(line)?;
            let digits = captures.name("period")?.as_str().trim();
            let period = digits
                .parse::<u32>()
                .map(|number| number.to_string())
                .unwrap_or_else(|_| digits.to_string());
            let artifact = captures.name("artifact")?.as_str().trim();
            Some((artifact.to_string(), format!("Period {period}")))
        })
    }

    fn extract_overall_score(&self, lines: &[&str]) -> Option<f64> {
        let captures = lines
            .iter()
            .find_map(|line| self.overall_score.captures(line))?;
        parse_score(captures.name("score")?.as_str())
    }

    fn interpret(&self, section: Section, line: &str, draft: &mut ReportDraft) {
        match section {
            Section::None => {}
            Section::DimensionScores => {
                if let Some((label, score)) = self.scored_pair(line) {
                    if let Some(dimension) = self.dimension_in_label(&label) {
                        draft.dimension_scores.insert(dimension, score);
                    }
                }
            }
            Section::Themes => {
                if let Some((label, score)) = self.scored_pair(line) {
                    draft.theme_scores.insert(label, score);
                }
            }
            Section::Top => {
                if let Some((label, score)) = self.scored_pair(line) {
                    draft.top_items.push(ScoredItem::new(label, score));
                }
            }
            Section::Bottom => {
                if let Some((label, score)) = self.scored_pair(line) {
                    draft.bottom_items.push(ScoredItem::new(label, score));
                }
            }
            Section::Suggestions => {
                draft
                    .suggestion_lines
                    .push(strip_bullet_marker(line).to_string());
            }
        }
    }

    fn scored_pair(&self, line: &str) -> Option<(String, f64)> {
        let captures = self.scored_line.captures(line)?;
        let label = strip_emphasis(captures.name("label")?.as_str());
        if label.is_empty() {
            return None;
        }
        let score = parse_score(captures.name("value")?.as_str())?;
        Some((label.to_string(), score))
    }

    pub fn dimension_in_label(&self, label: &str) -> Option<Dimension> {
        let captures = self.dimension_code.captures(label)?;
        let code = captures
            .name("code")
            .or_else(|| captures.name("attached"))?
            .as_str()
            .chars()
            .next()?;
        Dimension::from_code(code)
    }
}

pub fn parse_score(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    let value = normalized.parse::<f64>().ok()?;

    if value.is_finite() && (0.0..=10.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

fn strip_emphasis(label: &str) -> &str {
    label.trim_matches(|value: char| value == '*' || value == '_' || value.is_whitespace())
}

fn strip_bullet_marker(line: &str) -> &str {
    for marker in ["- ", "* ", "+ ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim_start();
        }
    }
    line
}
