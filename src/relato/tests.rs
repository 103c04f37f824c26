use super::artifact::{ArtifactCategory, artifact_label, display_artifact};
use super::dimension::Dimension;
use super::parser::{LineKind, ReportParser, Section, parse_score};
use super::report::{ScoredItem, UNKNOWN_ARTIFACT, UNKNOWN_PERIOD, period_number, sort_periods};

fn parser() -> ReportParser {
    ReportParser::new().expect("report parser regexes should compile")
}

#[test]
fn parse_extracts_planning_report_end_to_end() {
    let text = "# Report – Period 2 – Planning\n\
                Score: 8,40\n\
                ## Dimension-Scores\n\
                - **Dim-P (Performance)**: 9.0\n\
                ## Top 5\n\
                - Clarity: 9.5\n";

    let report = parser().parse(text, "planning.md");

    assert_eq!(report.artifact, "Planning");
    assert_eq!(report.period, "Period 2");
    assert_eq!(report.overall_score, Some(8.40));
    assert_eq!(report.dimension_scores.len(), 1);
    assert_eq!(report.dimension_scores.get(&Dimension::Performance), Some(&9.0));
    assert_eq!(report.top_items, vec![ScoredItem::new("Clarity", 9.5)]);
    assert!(report.bottom_items.is_empty());
    assert!(report.theme_scores.is_empty());
    assert_eq!(report.suggestions, None);
    assert_eq!(report.source_id, "planning.md");
}

#[test]
fn parse_is_idempotent() {
    let text = "# Relato – Sprint 3 – Forms Daily 1 (respostas)\n\
                Nota (base): 9,17\n\
                ## Temas\n\
                - **Ritmo**: 8.5\n\
                ## SPACE\n\
                - **SPACE-C (Communication & Collaboration)**: 9.04\n\
                ## Sugestões\n\
                - Mais tempo para dúvidas\n";

    let parser = parser();
    let first = parser.parse(text, "daily.md");
    let second = parser.parse(text, "daily.md");

    assert_eq!(first, second);
    assert_eq!(first.artifact, "Forms Daily 1");
    assert_eq!(first.period, "Period 3");
    assert_eq!(first.overall_score, Some(9.17));
}

#[test]
fn parse_score_accepts_comma_and_dot_decimals() {
    assert_eq!(parse_score("7,85"), Some(7.85));
    assert_eq!(parse_score("7.85"), Some(7.85));
    assert_eq!(parse_score("  10 "), Some(10.0));
    assert_eq!(parse_score("0"), Some(0.0));
}

#[test]
fn parse_score_rejects_unconvertible_and_out_of_range_values() {
    assert_eq!(parse_score(""), None);
    assert_eq!(parse_score("n/a"), None);
    assert_eq!(parse_score("1.2.3"), None);
    assert_eq!(parse_score("10.5"), None);
    assert_eq!(parse_score("-1"), None);
}

#[test]
fn wellbeing_surface_letters_share_one_key_and_last_write_wins() {
    let text = "# Report - Period 1 - Retro\n\
                ## Dimension-Scores\n\
                - **Code-W (Satisfaction & Well-Being)**: 6.0\n\
                - **SPACE-S (Satisfaction)**: 7,5\n";

    let report = parser().parse(text, "retro.md");

    assert_eq!(report.dimension_scores.len(), 1);
    assert_eq!(report.dimension_scores.get(&Dimension::Wellbeing), Some(&7.5));
}

#[test]
fn either_wellbeing_letter_alone_maps_to_the_same_display_name() {
    let parser = parser();
    let with_w = parser.parse("## Dimension-Scores\n- **Code-W (x)**: 6.0\n", "w.md");
    let with_s = parser.parse("## Dimension-Scores\n- **Code-S (x)**: 6.0\n", "s.md");

    assert_eq!(with_w.dimension_scores, with_s.dimension_scores);
    let key = with_w.dimension_scores.keys().next().copied();
    assert_eq!(key.map(Dimension::display_name), Some("Satisfaction & Well-Being"));
}

#[test]
fn missing_title_falls_back_to_placeholders() {
    let text = "Some notes without a title\n## Top 5\n- Focus: 8\n";

    let report = parser().parse(text, "untitled.md");

    assert_eq!(report.artifact, UNKNOWN_ARTIFACT);
    assert_eq!(report.period, UNKNOWN_PERIOD);
    assert_eq!(report.top_items.len(), 1);
}

#[test]
fn empty_document_yields_placeholder_report() {
    let report = parser().parse("", "empty.md");

    assert_eq!(report.artifact, "Unknown");
    assert_eq!(report.period, "Period ?");
    assert_eq!(report.overall_score, None);
    assert!(report.dimension_scores.is_empty());
    assert_eq!(report.suggestions, None);
}

#[test]
fn title_outside_lookahead_window_is_ignored() {
    let text = "intro 1\nintro 2\nintro 3\nintro 4\nintro 5\n# Report – Period 4 – Daily\n";

    let report = parser().parse(text, "late-title.md");

    assert_eq!(report.artifact, UNKNOWN_ARTIFACT);
    assert_eq!(report.period, UNKNOWN_PERIOD);
}

#[test]
fn blank_lines_do_not_count_toward_lookahead_window() {
    let text = "\n\n\n\n\n\n# Report — Period 7 — Survey (alunos)\n\n\nScore (final): 6.5\n";

    let report = parser().parse(text, "survey.md");

    assert_eq!(report.artifact, "Survey");
    assert_eq!(report.period, "Period 7");
    assert_eq!(report.overall_score, Some(6.5));
}

#[test]
fn overall_score_beyond_window_is_absent() {
    let mut text = String::from("# Report - Period 1 - Daily\n");
    for index in 0..12 {
        text.push_str(&format!("line {index}\n"));
    }
    text.push_str("Score: 9.0\n");

    let report = parser().parse(&text, "daily.md");

    assert_eq!(report.overall_score, None);
}

#[test]
fn structural_markers_are_case_insensitive() {
    let text = "# REPORT – PERIOD 5 – retro\n\
                score: 7.0\n\
                ## dimension scores\n\
                - **space-e (efficiency)**: 8.0\n\
                ## TOP-5\n\
                - Flow: 8.1\n";

    let report = parser().parse(text, "upper.md");

    assert_eq!(report.artifact, "retro");
    assert_eq!(report.period, "Period 5");
    assert_eq!(report.overall_score, Some(7.0));
    assert_eq!(report.dimension_scores.get(&Dimension::Efficiency), Some(&8.0));
    assert_eq!(report.top_items, vec![ScoredItem::new("Flow", 8.1)]);
}

#[test]
fn unrecognized_dimension_label_is_dropped() {
    let text = "## Dimension-Scores\n\
                - **Team morale**: 7.0\n\
                - **Dimensions overall**: 5.0\n\
                - **Dim-A (Activity)**: 4.0\n";

    let report = parser().parse(text, "dims.md");

    assert_eq!(report.dimension_scores.len(), 1);
    assert_eq!(report.dimension_scores.get(&Dimension::Activity), Some(&4.0));
}

#[test]
fn top_and_bottom_lists_keep_source_order_without_cap() {
    let text = "## Top 5\n\
                - Zeta: 9.9\n\
                - Alpha: 9.1\n\
                - Mid: 9.5\n\
                - Fourth: 9.0\n\
                - Fifth: 8.9\n\
                - Sixth: 8.8\n\
                ## Bottom 5\n\
                1. Noise: 3,2\n\
                2. Meetings: 4.0\n";

    let report = parser().parse(text, "lists.md");

    let top_labels = report
        .top_items
        .iter()
        .map(|item| item.label.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(
        top_labels,
        vec!["Zeta", "Alpha", "Mid", "Fourth", "Fifth", "Sixth"]
    );
    assert_eq!(
        report.bottom_items,
        vec![ScoredItem::new("Noise", 3.2), ScoredItem::new("Meetings", 4.0)]
    );
}

#[test]
fn themes_strip_markup_and_keep_labels_verbatim() {
    let text = "## Themes\n\
                - **Onboarding & Docs**: 7,25\n\
                - *Pairing*: 8\n\
                - **Time: mornings:** 6.5\n\
                - Broken: n/a\n";

    let report = parser().parse(text, "themes.md");

    assert_eq!(report.theme_scores.len(), 3);
    assert_eq!(report.theme_scores.get("Onboarding & Docs"), Some(&7.25));
    assert_eq!(report.theme_scores.get("Pairing"), Some(&8.0));
    assert_eq!(report.theme_scores.get("Time: mornings"), Some(&6.5));
}

#[test]
fn themes_keep_document_order_and_last_value_wins() {
    let text = "## Themes\n- Zeta: 4\n- Alpha: 6\n- Zeta: 5\n";

    let report = parser().parse(text, "order.md");

    let themes = report
        .theme_scores
        .iter()
        .map(|(label, score)| (label.as_str(), *score))
        .collect::<Vec<(&str, f64)>>();
    assert_eq!(themes, vec![("Zeta", 5.0), ("Alpha", 6.0)]);
}

#[test]
fn leading_zeros_in_period_number_are_dropped() {
    let padded = parser().parse("# Report – Period 02 – Daily\n", "padded.md");
    let plain = parser().parse("# Report – Period 2 – Daily\n", "plain.md");

    assert_eq!(padded.period, "Period 2");
    assert_eq!(padded.period, plain.period);
}

#[test]
fn out_of_range_values_are_omitted() {
    let text = "Score: 42\n## Top 5\n- Overflow: 11\n- Fine: 10\n";

    let report = parser().parse(text, "range.md");

    assert_eq!(report.overall_score, None);
    assert_eq!(report.top_items, vec![ScoredItem::new("Fine", 10.0)]);
}

#[test]
fn lines_before_first_section_are_ignored() {
    let text = "# Report – Period 1 – Planning\n- Stray: 9.0\n## Top 5\n- Kept: 8.0\n";

    let report = parser().parse(text, "stray.md");

    assert_eq!(report.top_items, vec![ScoredItem::new("Kept", 8.0)]);
    assert!(report.theme_scores.is_empty());
}

#[test]
fn suggestions_join_lines_and_strip_single_bullet() {
    let text = "## Suggestions\n\
                - Shorter dailies\n\
                Rotate facilitator\n\
                \n\
                * - keep the inner dash\n";

    let report = parser().parse(text, "sug.md");

    assert_eq!(
        report.suggestions.as_deref(),
        Some("Shorter dailies\nRotate facilitator\n- keep the inner dash")
    );
}

#[test]
fn empty_suggestions_section_is_absent() {
    let report = parser().parse("## Suggestions\n\n\n", "sug.md");
    assert_eq!(report.suggestions, None);
}

#[test]
fn classify_recognizes_heading_variants() {
    let parser = parser();

    assert_eq!(parser.classify("## Temas / Subdimensões"), LineKind::Heading(Section::Themes));
    assert_eq!(
        parser.classify("### Dimension-Scores"),
        LineKind::Heading(Section::DimensionScores)
    );
    assert_eq!(parser.classify("## SPACE"), LineKind::Heading(Section::DimensionScores));
    assert_eq!(parser.classify("## Top 5 perguntas"), LineKind::Heading(Section::Top));
    assert_eq!(parser.classify("## Bottom-5"), LineKind::Heading(Section::Bottom));
    assert_eq!(parser.classify("## Sugestões"), LineKind::Heading(Section::Suggestions));
    assert_eq!(parser.classify("## Notes"), LineKind::Body("## Notes"));
}

#[test]
fn section_advance_only_changes_on_headings() {
    let section = Section::None.advance(LineKind::Body("text"));
    assert_eq!(section, Section::None);

    let section = section.advance(LineKind::Heading(Section::Top));
    assert_eq!(section, Section::Top);
    assert_eq!(section.advance(LineKind::Body("- a: 1")), Section::Top);
}

#[test]
fn dimension_in_label_handles_surface_variants() {
    let parser = parser();

    assert_eq!(parser.dimension_in_label("SPACE-P (Performance)"), Some(Dimension::Performance));
    assert_eq!(parser.dimension_in_label("SPACEC"), Some(Dimension::Communication));
    assert_eq!(parser.dimension_in_label("Dimension E"), Some(Dimension::Efficiency));
    assert_eq!(parser.dimension_in_label("Spaces"), None);
    assert_eq!(parser.dimension_in_label("Codes"), None);
    assert_eq!(parser.dimension_in_label("Performance"), None);
}

#[test]
fn report_serializes_dimensions_by_display_name() {
    let report = parser().parse("## SPACE\n- **SPACE-C (x)**: 9\n", "json.md");

    let value = serde_json::to_value(&report).expect("report should serialize");

    assert_eq!(
        value["dimension_scores"]["Communication & Collaboration"],
        serde_json::json!(9.0)
    );
    assert_eq!(value["overall_score"], serde_json::Value::Null);
}

#[test]
fn period_numbers_sort_chronologically_with_unknown_last() {
    let mut periods = vec![
        "Period ?".to_string(),
        "Period 10".to_string(),
        "Period 2".to_string(),
    ];

    sort_periods(&mut periods);

    assert_eq!(periods, vec!["Period 2", "Period 10", "Period ?"]);
    assert_eq!(period_number("Period 12"), Some(12));
    assert_eq!(period_number("Period ?"), None);
}

#[test]
fn artifact_labels_map_to_closed_categories() {
    assert_eq!(artifact_label("Forms  Planning_Sprint"), "Planning");
    assert_eq!(artifact_label("DAILY 1"), "Daily");
    assert_eq!(artifact_label("Retrospectiva"), "Retro");
    assert_eq!(artifact_label("Survey alunos"), "General");
    assert_eq!(artifact_label("  Kickoff  "), "Kickoff");
    assert_eq!(ArtifactCategory::classify("Kickoff"), None);
}

#[test]
fn display_artifact_drops_forms_prefix() {
    assert_eq!(display_artifact("Forms Daily 1"), "Daily 1");
    assert_eq!(display_artifact("forms  Retro"), "Retro");
    assert_eq!(display_artifact("Planning"), "Planning");
    assert_eq!(display_artifact(""), "—");
}

#[test]
fn dimension_names_resolve_from_any_spelling() {
    assert_eq!(Dimension::from_name("Performance"), Some(Dimension::Performance));
    assert_eq!(
        Dimension::from_name("SPACE-W (Satisfaction & Well-Being)"),
        Some(Dimension::Wellbeing)
    );
    assert_eq!(Dimension::from_name("s"), Some(Dimension::Wellbeing));
    assert_eq!(Dimension::from_name("Velocity"), None);
}
