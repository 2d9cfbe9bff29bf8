use tabled::{Table, Tabled, settings::Style};

use crate::backend::MappingSuggestion;
use crate::field::FieldRecord;

const DESCRIPTION_WIDTH: usize = 60;

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Object Type")]
    object_type: String,
    #[tabled(rename = "Field")]
    field_name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Type")]
    field_type: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Render a page of field records as a terminal table
pub fn field_table(records: &[FieldRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: Vec<FieldRow> = records
        .iter()
        .map(|r| FieldRow {
            object_type: r.object_type.clone(),
            field_name: r.field_name.clone(),
            label: r.label.clone(),
            field_type: r.field_type.clone(),
            description: truncate(&r.description, DESCRIPTION_WIDTH),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let rows: Vec<StatRow> = stats
        .iter()
        .map(|(metric, value)| StatRow {
            metric: metric.to_string(),
            value: value.to_string(),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct MappingRow {
    #[tabled(rename = "Source Field")]
    source: String,
    #[tabled(rename = "CDM Field")]
    target: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Reasoning")]
    reasoning: String,
}

/// Render mapping suggestions as a terminal table
pub fn mapping_table(suggestions: &[MappingSuggestion]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }

    let rows: Vec<MappingRow> = suggestions
        .iter()
        .map(|s| MappingRow {
            source: s.source_field.clone(),
            target: s.target_cdm_field.clone(),
            confidence: format!("{:.0}%", s.confidence * 100.0),
            reasoning: truncate(&s.reasoning, DESCRIPTION_WIDTH),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("short", 60), "short");
    }

    #[test]
    fn test_truncate_elides_long_text() {
        let long = "x".repeat(100);
        let out = truncate(&long, 60);
        assert_eq!(out.chars().count(), 60);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_empty_records_render_nothing() {
        assert_eq!(field_table(&[]), "");
    }
}
