//! Tabular import - delimited text to field records
//!
//! The store is agnostic to where replacement datasets come from; this
//! module is the one parser the CLI and HTTP import paths share. Columns are
//! located by header name, not position, so exports from different tools
//! line up as long as their headers contain a recognizable alias.

use crate::field::FieldRecord;
use crate::{Error, Result};

struct Columns {
    object: Option<usize>,
    field: usize,
    label: Option<usize>,
    kind: Option<usize>,
    description: Option<usize>,
}

/// Parse comma-delimited text into field records.
///
/// The first line is the header. Blank data lines are skipped; cells are
/// trimmed and stripped of surrounding double quotes. Missing cells fall
/// back to defaults ("Unknown" object type, a generated field name, "Text"
/// type) rather than failing the whole import.
pub fn parse_delimited(text: &str) -> Result<Vec<FieldRecord>> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| Error::Import("input is empty".to_string()))?;

    let columns = locate_columns(header)?;

    let mut fields = Vec::new();
    for (i, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split(',').map(clean_cell).collect();

        let field_cell = cell(&cells, Some(columns.field));
        let field_name = field_cell
            .map(str::to_string)
            .unwrap_or_else(|| format!("Field_{}", i + 1));

        fields.push(FieldRecord {
            object_type: cell(&cells, columns.object)
                .unwrap_or("Unknown")
                .to_string(),
            label: cell(&cells, columns.label)
                .or(field_cell)
                .unwrap_or("")
                .to_string(),
            field_type: cell(&cells, columns.kind).unwrap_or("Text").to_string(),
            description: cell(&cells, columns.description)
                .unwrap_or("")
                .to_string(),
            field_name,
        });
    }
    Ok(fields)
}

fn locate_columns(header: &str) -> Result<Columns> {
    let names: Vec<String> = header
        .split(',')
        .map(|h| clean_cell(h).to_lowercase())
        .collect();

    let find = |aliases: &[&str]| {
        names
            .iter()
            .position(|name| aliases.iter().any(|a| name.contains(a)))
    };

    let field = find(&["field", "name"]).ok_or_else(|| {
        Error::Import(format!(
            "no field-name column in header (looked for 'field' or 'name'): {header}"
        ))
    })?;

    Ok(Columns {
        object: find(&["object", "class"]),
        field,
        label: find(&["label", "display"]),
        kind: find(&["type", "datatype"]),
        description: find(&["description", "desc"]),
    })
}

fn cell<'a>(cells: &[&'a str], idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| cells.get(i).copied())
        .filter(|c| !c.is_empty())
}

fn clean_cell(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_header() {
        let text = "objectType,fieldName,label,type,description\n\
                    Account,AccountID,Account ID,Identifier,Unique identifier\n\
                    Claim,ClaimID,Claim ID,Identifier,Claim key";
        let fields = parse_delimited(text).unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].object_type, "Account");
        assert_eq!(fields[0].field_name, "AccountID");
        assert_eq!(fields[1].field_type, "Identifier");
        assert_eq!(fields[1].description, "Claim key");
    }

    #[test]
    fn test_header_aliases() {
        let text = "Class,Name,Display,DataType,Desc\n\
                    Asset,VIN,Vehicle ID,Text,Identifying code";
        let fields = parse_delimited(text).unwrap();

        assert_eq!(fields[0].object_type, "Asset");
        assert_eq!(fields[0].field_name, "VIN");
        assert_eq!(fields[0].label, "Vehicle ID");
        assert_eq!(fields[0].field_type, "Text");
    }

    #[test]
    fn test_quoted_cells_are_stripped() {
        let text = "object,field,label,type,description\n\
                    \"Account\",\"Currency\",\"Type of currency\",\"Picklist\",\"Holds currency ISO code\"";
        let fields = parse_delimited(text).unwrap();
        assert_eq!(fields[0].object_type, "Account");
        assert_eq!(fields[0].description, "Holds currency ISO code");
    }

    #[test]
    fn test_blank_lines_skipped_and_defaults_applied() {
        let text = "object,field\n\
                    \n\
                    ,\n\
                    Account,LegalName\n";
        let fields = parse_delimited(text).unwrap();

        assert_eq!(fields.len(), 2);
        // Row with empty cells gets defaults
        assert_eq!(fields[0].object_type, "Unknown");
        assert_eq!(fields[0].field_name, "Field_2");
        assert_eq!(fields[0].field_type, "Text");
        assert_eq!(fields[0].description, "");
        // Label falls back to the field name cell
        assert_eq!(fields[1].label, "LegalName");
    }

    #[test]
    fn test_missing_field_column_is_an_error() {
        let text = "object,label,type\nAccount,Account ID,Identifier";
        assert!(matches!(parse_delimited(text), Err(Error::Import(_))));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(parse_delimited(""), Err(Error::Import(_))));
    }
}
