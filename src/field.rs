//! Field definition types - the stored unit of the navigator
//!
//! A `FieldRecord` describes one field of a CDM object type. The store
//! derives a lowercase `search_key` from four of its attributes at write
//! time; that key is the only text the search engine ever matches against.

use serde::{Deserialize, Serialize};

/// A single CDM field definition.
///
/// Two records with identical values are distinct entities: identity comes
/// from the store's rowkey assigned at insertion, not from content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// The CDM object type this field belongs to (e.g. "Account", "Claim")
    pub object_type: String,
    /// Field identifier within the object type
    pub field_name: String,
    /// Human-readable display label
    pub label: String,
    /// Free-form data type category (e.g. "Identifier", "Picklist", "Decimal")
    #[serde(rename = "type")]
    pub field_type: String,
    /// Long-form description of the field's purpose
    pub description: String,
}

impl FieldRecord {
    pub fn new(
        object_type: impl Into<String>,
        field_name: impl Into<String>,
        label: impl Into<String>,
        field_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            object_type: object_type.into(),
            field_name: field_name.into(),
            label: label.into(),
            field_type: field_type.into(),
            description: description.into(),
        }
    }

    /// Derive the search key: lowercase concatenation of field name, object
    /// type, description and label.
    ///
    /// This is an index surrogate, not user data. The store recomputes it on
    /// every write; it is never read back into a `FieldRecord`.
    pub fn search_key(&self) -> String {
        format!(
            "{} {} {} {}",
            self.field_name, self.object_type, self.description, self.label
        )
        .to_lowercase()
    }
}

/// One page of search results, with the total match count and a has-more
/// flag computed from the same scan that produced the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub records: Vec<FieldRecord>,
    /// Number of records matching the query across the whole store
    pub total: usize,
    /// True iff matches exist beyond the returned page
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_key_derivation() {
        let field = FieldRecord::new(
            "Account",
            "AccountID",
            "Account ID",
            "Identifier",
            "Unique identifier for the account record.",
        );

        let key = field.search_key();
        assert_eq!(
            key,
            "accountid account unique identifier for the account record. account id"
        );
    }

    #[test]
    fn test_search_key_excludes_type() {
        let field = FieldRecord::new("Asset", "VIN", "Vehicle identification number", "Text", "");
        assert!(!field.search_key().contains("text"));
    }

    #[test]
    fn test_wire_json_uses_original_names() {
        let field = FieldRecord::new("Claim", "ClaimID", "Claim ID", "Identifier", "desc");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["objectType"], "Claim");
        assert_eq!(json["fieldName"], "ClaimID");
        assert_eq!(json["type"], "Identifier");
    }
}
