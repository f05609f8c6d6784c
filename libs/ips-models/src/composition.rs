//! The composed summary document
//!
//! A [`Composition`] is the structured header of the patient summary: fixed
//! document typing, subject reference, generation metadata, and the ordered
//! list of populated sections. Section members are referenced, never owned;
//! the referenced records travel alongside the composition in the document
//! bundle.

use crate::primitives::{CodeableConcept, Narrative, Reference};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A structured clinical document header with sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// Resource type - always "Composition"
    #[serde(default = "composition_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub status: CompositionStatus,

    /// Kind of composition (LOINC document type)
    #[serde(rename = "type")]
    pub document_type: CodeableConcept,

    /// Who the composition is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// Composition editing time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Human readable name for the composition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// As defined by affinity domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidentiality: Option<Confidentiality>,

    /// Composition is broken into sections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section: Vec<CompositionSection>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn composition_resource_type() -> String {
    "Composition".to_string()
}

/// Workflow status of the composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositionStatus {
    Preliminary,
    Final,
    Amended,
    EnteredInError,
}

/// Document confidentiality codes (v3 Confidentiality)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidentiality {
    #[serde(rename = "U")]
    Unrestricted,
    #[serde(rename = "L")]
    Low,
    #[serde(rename = "M")]
    Moderate,
    #[serde(rename = "N")]
    Normal,
    #[serde(rename = "R")]
    Restricted,
    #[serde(rename = "V")]
    VeryRestricted,
}

/// One titled, coded section of the composition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSection {
    /// Label for the section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Classification of the section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    /// Text summary of the section, for human interpretation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    /// References to the records the section is about
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<Reference>,
}
