//! Shared FHIR datatypes
//!
//! The terminology and reference primitives used across resources,
//! compositions, and bundles.

use serde::{Deserialize, Serialize};

/// A reference to a code defined by a terminology system
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    /// Identity of the terminology system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Symbol in syntax defined by the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Representation defined by the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            display: None,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// A concept that may be defined by one or more codings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    /// Code defined by a terminology system
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    /// Plain text representation of the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    pub fn from_coding(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            text: None,
        }
    }

    /// True when any coding carries exactly this code, regardless of system.
    pub fn has_code(&self, code: &str) -> bool {
        self.coding.iter().any(|c| c.code.as_deref() == Some(code))
    }

    /// True when any coding's code is a member of `codes`.
    pub fn has_code_in(&self, codes: &[&str]) -> bool {
        self.coding
            .iter()
            .filter_map(|c| c.code.as_deref())
            .any(|code| codes.contains(&code))
    }
}

/// A reference from one resource to another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Literal reference: relative URL or urn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Text alternative for the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    pub fn literal(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            display: None,
        }
    }
}

/// An identifier intended for computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// The namespace for the identifier value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The value that is unique within the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Identifier {
    pub fn new(system: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            value: Some(value.into()),
        }
    }
}

/// Human-readable summary of a resource or section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub status: NarrativeStatus,

    /// Limited XHTML content
    pub div: String,
}

/// Status of a narrative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NarrativeStatus {
    Generated,
    Extensions,
    Additional,
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codeable_concept_code_queries() {
        let concept = CodeableConcept {
            coding: vec![
                Coding::new("http://loinc.org", "8867-4"),
                Coding::new("http://snomed.info/sct", "364075005"),
            ],
            text: None,
        };

        assert!(concept.has_code("8867-4"));
        assert!(concept.has_code("364075005"));
        assert!(!concept.has_code("8310-5"));
        assert!(concept.has_code_in(&["8310-5", "8867-4"]));
        assert!(!concept.has_code_in(&["8310-5", "9279-1"]));
    }

    #[test]
    fn test_empty_concept_matches_nothing() {
        let concept = CodeableConcept::default();
        assert!(!concept.has_code("anything"));
        assert!(!concept.has_code_in(&["anything"]));
    }

    #[test]
    fn test_coding_serializes_without_empty_fields() {
        let coding = Coding::new("http://loinc.org", "48765-2");
        let value = serde_json::to_value(&coding).unwrap();
        assert_eq!(
            value,
            json!({ "system": "http://loinc.org", "code": "48765-2" })
        );
    }

    #[test]
    fn test_narrative_status_wire_form() {
        let narrative = Narrative {
            status: NarrativeStatus::Generated,
            div: "<div>text</div>".to_string(),
        };
        let value = serde_json::to_value(&narrative).unwrap();
        assert_eq!(value["status"], "generated");
    }
}
