//! Built-in seed dataset
//!
//! The 14 field definitions the explorer ships with, loaded on first run
//! when the store is empty. Imports replace this set wholesale.

use crate::field::FieldRecord;

/// The initial CDM field definitions.
pub fn initial_fields() -> Vec<FieldRecord> {
    vec![
        FieldRecord::new(
            "Stub for supporting data classes",
            "Name",
            "Name",
            "Text",
            "Holds name while creating entities",
        ),
        FieldRecord::new(
            "Stub for supporting data classes",
            "Origin",
            "Origin of data",
            "Text",
            "Provides the system of record name that the record was sourced from to assist troubleshooting.",
        ),
        FieldRecord::new(
            "Person type",
            "ID",
            "Reference identifier",
            "Identifier",
            "Abstract class that serves as the parent for all reference data in our model",
        ),
        FieldRecord::new(
            "Person type",
            "IsActive",
            "Is active",
            "TrueFalse",
            "IsActive is used for setting a reference data record as Active or InActive.",
        ),
        FieldRecord::new(
            "Product type",
            "ID",
            "Reference identifier",
            "Identifier",
            "Abstract class that serves as the parent for all reference data in our model",
        ),
        FieldRecord::new(
            "Account",
            "AccountID",
            "Account ID",
            "Identifier",
            "Unique identifier for the account record which is often can be a composite when sourcing from legacy systems.",
        ),
        FieldRecord::new(
            "Account",
            "Currency",
            "Type of currency",
            "Picklist",
            "Holds currency ISO code",
        ),
        FieldRecord::new(
            "Account",
            "LegalName",
            "Legal name",
            "Text",
            "Full legal name of the entity associated with the account",
        ),
        FieldRecord::new(
            "Business account",
            "NetSalesAmount",
            "Net sales amount",
            "Decimal",
            "Net Sales Amount for the organization",
        ),
        FieldRecord::new(
            "Asset",
            "VIN",
            "Vehicle identification number",
            "Text",
            "The Vehicle Identification Number (VIN) is the identifying code for a specific automobile.",
        ),
        FieldRecord::new(
            "Claim",
            "ClaimID",
            "Claim ID",
            "Identifier",
            "Unique identifier for the claim record.",
        ),
        FieldRecord::new(
            "Transaction",
            "TransactionID",
            "Transaction ID",
            "Identifier",
            "Holds unique transaction ID for tracking.",
        ),
        FieldRecord::new(
            "Transaction module",
            "SwiftUETRIdentifier",
            "Swift uetr identifier",
            "Text",
            "The Unique End-to-End Transaction Reference (UETR) is a 36-character alphanumeric code.",
        ),
        FieldRecord::new(
            "Service account",
            "AvailableLoanAmount",
            "Available loan amount",
            "Decimal",
            "Cash value available after loan has been taken",
        ),
    ]
}
