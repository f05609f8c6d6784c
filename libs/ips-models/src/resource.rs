//! The uniform clinical record model
//!
//! Every record handled by the composer is represented by [`Resource`]: a
//! type tag, an identity, a subject reference, category and primary codings,
//! and a status where the underlying resource has one. Fields the composition
//! rules never inspect are carried through the flattened `extensions` map so
//! the original content survives packaging untouched.

use crate::primitives::{CodeableConcept, Reference};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// The resource types the composer knows how to classify, plus Patient for
/// the subject record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    AllergyIntolerance,
    CarePlan,
    ClinicalImpression,
    Condition,
    Consent,
    DeviceUseStatement,
    DiagnosticReport,
    Immunization,
    MedicationRequest,
    MedicationStatement,
    Observation,
    Patient,
    Procedure,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::AllergyIntolerance => "AllergyIntolerance",
            ResourceType::CarePlan => "CarePlan",
            ResourceType::ClinicalImpression => "ClinicalImpression",
            ResourceType::Condition => "Condition",
            ResourceType::Consent => "Consent",
            ResourceType::DeviceUseStatement => "DeviceUseStatement",
            ResourceType::DiagnosticReport => "DiagnosticReport",
            ResourceType::Immunization => "Immunization",
            ResourceType::MedicationRequest => "MedicationRequest",
            ResourceType::MedicationStatement => "MedicationStatement",
            ResourceType::Observation => "Observation",
            ResourceType::Patient => "Patient",
            ResourceType::Procedure => "Procedure",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status values across the record types the composer handles, folded into a
/// single code space. Individual resources only ever use a subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    Active,
    Amended,
    Cancelled,
    Completed,
    Draft,
    EnteredInError,
    Final,
    InProgress,
    Intended,
    OnHold,
    Preliminary,
    Registered,
    Stopped,
    Unknown,
}

/// One clinical record belonging to a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub resource_type: ResourceType,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The subject the record belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// Classification codings (e.g. observation categories)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    /// Primary coding of the record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    /// Clinical status concept, where the resource models status as a coding
    /// (AllergyIntolerance, Condition)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_status: Option<CodeableConcept>,

    /// Status code, where the resource models status as an enumeration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,

    /// Additional content beyond the fields the composer inspects
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

impl Resource {
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            id: None,
            subject: None,
            category: Vec::new(),
            code: None,
            clinical_status: None,
            status: None,
            extensions: HashMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_subject(mut self, subject: Reference) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_category(mut self, category: CodeableConcept) -> Self {
        self.category.push(category);
        self
    }

    pub fn with_code(mut self, code: CodeableConcept) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_clinical_status(mut self, clinical_status: CodeableConcept) -> Self {
        self.clinical_status = Some(clinical_status);
        self
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True when any category coding carries `code`.
    pub fn has_category_code(&self, code: &str) -> bool {
        self.category.iter().any(|concept| concept.has_code(code))
    }

    /// True when any primary coding is a member of `codes`.
    pub fn has_code_in(&self, codes: &[&str]) -> bool {
        self.code
            .as_ref()
            .is_some_and(|concept| concept.has_code_in(codes))
    }

    /// The URL other resources use to reference this record: the id itself
    /// for urn-form ids, `Type/id` otherwise. None when the record carries
    /// no id.
    pub fn reference_url(&self) -> Option<String> {
        let id = self.id.as_deref()?;
        if id.starts_with("urn:") {
            Some(id.to_string())
        } else {
            Some(format!("{}/{}", self.resource_type, id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Coding;
    use serde_json::json;

    #[test]
    fn test_resource_deserializes_from_fhir_json() {
        let resource: Resource = serde_json::from_value(json!({
            "resourceType": "Observation",
            "id": "obs-1",
            "status": "preliminary",
            "category": [{ "coding": [{ "code": "social-history" }] }],
            "code": { "coding": [{ "system": "http://loinc.org", "code": "72166-2" }] },
            "valueCodeableConcept": { "text": "Former smoker" }
        }))
        .unwrap();

        assert_eq!(resource.resource_type, ResourceType::Observation);
        assert_eq!(resource.status, Some(RecordStatus::Preliminary));
        assert!(resource.has_category_code("social-history"));
        assert!(resource.has_code_in(&["72166-2"]));
        // Unmodelled fields survive in the extensions map
        assert!(resource.extensions.contains_key("valueCodeableConcept"));
    }

    #[test]
    fn test_resource_round_trips_extensions() {
        let original = json!({
            "resourceType": "Condition",
            "id": "cond-1",
            "onsetDateTime": "2019-04-02"
        });
        let resource: Resource = serde_json::from_value(original.clone()).unwrap();
        let back = serde_json::to_value(&resource).unwrap();
        assert_eq!(back["onsetDateTime"], original["onsetDateTime"]);
        assert_eq!(back["resourceType"], "Condition");
    }

    #[test]
    fn test_reference_url_forms() {
        let plain = Resource::new(ResourceType::Condition).with_id("cond-9");
        assert_eq!(plain.reference_url().unwrap(), "Condition/cond-9");

        let urn = Resource::new(ResourceType::Condition)
            .with_id("urn:uuid:0a8f1b2c-3d4e-5f60-7182-93a4b5c6d7e8");
        assert_eq!(
            urn.reference_url().unwrap(),
            "urn:uuid:0a8f1b2c-3d4e-5f60-7182-93a4b5c6d7e8"
        );

        let missing = Resource::new(ResourceType::Condition);
        assert!(missing.reference_url().is_none());
    }

    #[test]
    fn test_category_query_ignores_other_concepts() {
        let resource = Resource::new(ResourceType::Observation)
            .with_category(CodeableConcept::from_coding(Coding::new(
                "http://terminology.hl7.org/CodeSystem/observation-category",
                "laboratory",
            )))
            .with_category(CodeableConcept::from_coding(Coding::new(
                "http://terminology.hl7.org/CodeSystem/observation-category",
                "vital-signs",
            )));

        assert!(resource.has_category_code("vital-signs"));
        assert!(resource.has_category_code("laboratory"));
        assert!(!resource.has_category_code("imaging"));
    }
}
