//! Patient and Coverage models
//!
//! Used at the member-match boundary, where the operation resolves a coverage
//! to its beneficiary patient and propagates an identifier. Demographics and
//! plan details stay in the `extensions` map; the operation only reads
//! identifiers and the beneficiary reference.

use crate::primitives::{Identifier, Reference};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A person receiving care
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Resource type - always "Patient"
    #[serde(default = "patient_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Identifiers for this patient (e.g. member numbers)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn patient_resource_type() -> String {
    "Patient".to_string()
}

/// Insurance or payment coverage for a patient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    /// Resource type - always "Coverage"
    #[serde(default = "coverage_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Identifiers for this coverage (e.g. the number on the card)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    /// The patient benefitting from the coverage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<Reference>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn coverage_resource_type() -> String {
    "Coverage".to_string()
}
