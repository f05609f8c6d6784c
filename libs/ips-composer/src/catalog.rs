//! The section catalog
//!
//! The fixed, ordered registry of summary sections and their classification
//! rules. Everything here is configuration data: which record types a
//! section applies to, the inclusion rule evaluated during classification,
//! the secondary status filter (where the target profile requires one), and
//! the placeholder synthesized when a mandatory section would otherwise be
//! empty. Adding a section is a table change, not new branching code.

use summa_models::{Coding, RecordStatus, Resource, ResourceType};

pub const LOINC: &str = "http://loinc.org";

/// Code system asserting "no known information" for mandatory sections.
pub const ABSENT_UNKNOWN_SYSTEM: &str =
    "http://hl7.org/fhir/uv/ips/CodeSystem/absent-unknown-uv-ips";

const ALLERGY_CLINICAL_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/allergyintolerance-clinical";
const CONDITION_CLINICAL_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/condition-clinical";

/// Observation codes counted as pregnancy information.
pub const PREGNANCY_CODES: &[&str] = &[
    "82810-3", "11636-8", "11637-6", "11638-4", "11639-2", "11640-0", "11612-9", "11613-7",
    "11614-5", "33065-4",
];

/// Section identities, in the order sections appear in the composed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionId {
    AllergyIntolerance,
    MedicationSummary,
    ProblemList,
    Immunizations,
    Procedures,
    MedicalDevices,
    DiagnosticResults,
    VitalSigns,
    Pregnancy,
    SocialHistory,
    FunctionalStatus,
    PlanOfCare,
    AdvanceDirectives,
}

/// Inclusion rule evaluated during classification, after the record's type
/// has matched the section's type list.
#[derive(Debug, Clone, Copy)]
pub enum InclusionRule {
    /// Type match alone suffices.
    Always,
    /// The record must carry a category coding with this code.
    CategoryCode(&'static str),
    /// The record's primary coding must be one of these codes.
    CodeIn(&'static [&'static str]),
}

impl InclusionRule {
    /// Category and code gates only constrain Observation records; records
    /// of any other type-matched kind are accepted on type alone.
    pub fn accepts(&self, resource: &Resource) -> bool {
        if resource.resource_type != ResourceType::Observation {
            return true;
        }
        match self {
            InclusionRule::Always => true,
            InclusionRule::CategoryCode(code) => resource.has_category_code(code),
            InclusionRule::CodeIn(codes) => resource.has_code_in(codes),
        }
    }
}

/// Where the absent/unknown coding lands on a synthesized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderField {
    /// The record's primary `code` concept.
    Code,
    /// The record's `category` list. MedicationStatement models its
    /// substance in `medication[x]`, so the absent coding goes into
    /// category instead of code.
    Category,
}

/// Recipe for the "no known information" record synthesized when a
/// mandatory section has no classified member.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderSpec {
    pub resource_type: ResourceType,
    pub code: &'static str,
    pub display: &'static str,
    pub placement: PlaceholderField,
    /// System for a clinicalStatus "active" coding, for resources that model
    /// status as a concept.
    pub clinical_system: Option<&'static str>,
    /// Status code, for resources that model status as an enumeration.
    pub status: Option<RecordStatus>,
}

/// One entry of the section catalog
#[derive(Debug, Clone, Copy)]
pub struct SectionDefinition {
    pub id: SectionId,
    pub title: &'static str,
    /// LOINC section code
    pub code: &'static str,
    pub display: &'static str,
    /// Record types this section draws from
    pub resource_types: &'static [ResourceType],
    pub include: InclusionRule,
    /// Secondary filter: members must carry exactly this status to remain
    /// in the section after classification.
    pub entry_filter: Option<RecordStatus>,
    /// Present on mandatory sections, absent on optional ones.
    pub placeholder: Option<PlaceholderSpec>,
}

impl SectionDefinition {
    /// Classification predicate: type match plus the inclusion rule.
    pub fn applies_to(&self, resource: &Resource) -> bool {
        self.resource_types.contains(&resource.resource_type) && self.include.accepts(resource)
    }

    /// Secondary filter applied to already-classified members.
    pub fn retains(&self, resource: &Resource) -> bool {
        match self.entry_filter {
            None => true,
            Some(required) => resource.status == Some(required),
        }
    }

    pub fn is_mandatory(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn coding(&self) -> Coding {
        Coding::new(LOINC, self.code).with_display(self.display)
    }
}

const SECTIONS: &[SectionDefinition] = &[
    SectionDefinition {
        id: SectionId::AllergyIntolerance,
        title: "Allergies and Intolerances",
        code: "48765-2",
        display: "Allergies and Adverse Reactions",
        resource_types: &[ResourceType::AllergyIntolerance],
        include: InclusionRule::Always,
        entry_filter: None,
        placeholder: Some(PlaceholderSpec {
            resource_type: ResourceType::AllergyIntolerance,
            code: "no-allergy-info",
            display: "No information about allergies",
            placement: PlaceholderField::Code,
            clinical_system: Some(ALLERGY_CLINICAL_SYSTEM),
            status: None,
        }),
    },
    SectionDefinition {
        id: SectionId::MedicationSummary,
        title: "Medication List",
        code: "10160-0",
        display: "Medication List",
        resource_types: &[
            ResourceType::MedicationStatement,
            ResourceType::MedicationRequest,
        ],
        include: InclusionRule::Always,
        entry_filter: None,
        placeholder: Some(PlaceholderSpec {
            resource_type: ResourceType::MedicationStatement,
            code: "no-medication-info",
            display: "No information about medications",
            placement: PlaceholderField::Category,
            clinical_system: None,
            status: Some(RecordStatus::Unknown),
        }),
    },
    SectionDefinition {
        id: SectionId::ProblemList,
        title: "Problem List",
        code: "11450-4",
        display: "Problem List",
        resource_types: &[ResourceType::Condition],
        include: InclusionRule::Always,
        entry_filter: None,
        placeholder: Some(PlaceholderSpec {
            resource_type: ResourceType::Condition,
            code: "no-problem-info",
            display: "No information about problems",
            placement: PlaceholderField::Code,
            clinical_system: Some(CONDITION_CLINICAL_SYSTEM),
            status: None,
        }),
    },
    SectionDefinition {
        id: SectionId::Immunizations,
        title: "History of Immunizations",
        code: "11369-6",
        display: "History of Immunizations",
        resource_types: &[ResourceType::Immunization],
        include: InclusionRule::Always,
        entry_filter: None,
        placeholder: None,
    },
    SectionDefinition {
        id: SectionId::Procedures,
        title: "History of Procedures",
        code: "47519-4",
        display: "History of Procedures",
        resource_types: &[ResourceType::Procedure],
        include: InclusionRule::Always,
        entry_filter: None,
        placeholder: None,
    },
    SectionDefinition {
        id: SectionId::MedicalDevices,
        title: "Medical Devices",
        code: "46240-8",
        display: "Medical Devices",
        resource_types: &[ResourceType::DeviceUseStatement],
        include: InclusionRule::Always,
        entry_filter: None,
        placeholder: None,
    },
    SectionDefinition {
        id: SectionId::DiagnosticResults,
        title: "Diagnostic Results",
        code: "30954-2",
        display: "Diagnostic Results",
        resource_types: &[ResourceType::DiagnosticReport, ResourceType::Observation],
        include: InclusionRule::CategoryCode("laboratory"),
        entry_filter: None,
        placeholder: None,
    },
    SectionDefinition {
        id: SectionId::VitalSigns,
        title: "Vital Signs",
        code: "8716-3",
        display: "Vital Signs",
        resource_types: &[ResourceType::Observation],
        include: InclusionRule::CategoryCode("vital-signs"),
        entry_filter: None,
        placeholder: None,
    },
    SectionDefinition {
        id: SectionId::Pregnancy,
        title: "Pregnancy Information",
        code: "11362-0",
        display: "Pregnancy Information",
        resource_types: &[ResourceType::Observation],
        include: InclusionRule::CodeIn(PREGNANCY_CODES),
        entry_filter: Some(RecordStatus::Preliminary),
        placeholder: None,
    },
    SectionDefinition {
        id: SectionId::SocialHistory,
        title: "Social History",
        code: "29762-2",
        display: "Social History",
        resource_types: &[ResourceType::Observation],
        include: InclusionRule::CategoryCode("social-history"),
        entry_filter: Some(RecordStatus::Preliminary),
        placeholder: None,
    },
    SectionDefinition {
        id: SectionId::FunctionalStatus,
        title: "Functional Status",
        code: "47420-5",
        display: "Functional Status",
        resource_types: &[ResourceType::ClinicalImpression],
        include: InclusionRule::Always,
        entry_filter: None,
        placeholder: None,
    },
    SectionDefinition {
        id: SectionId::PlanOfCare,
        title: "Plan of Care",
        code: "18776-5",
        display: "Plan of Care",
        resource_types: &[ResourceType::CarePlan],
        include: InclusionRule::Always,
        entry_filter: None,
        placeholder: None,
    },
    SectionDefinition {
        id: SectionId::AdvanceDirectives,
        title: "Advance Directives",
        code: "42349-0",
        display: "Advance Directives",
        resource_types: &[ResourceType::Consent],
        include: InclusionRule::Always,
        entry_filter: None,
        placeholder: None,
    },
];

/// The full catalog, in document order. Stable and total: every
/// [`SectionId`] appears exactly once.
pub fn sections() -> &'static [SectionDefinition] {
    SECTIONS
}

/// Look up one definition. The catalog is total over `SectionId`.
pub fn section(id: SectionId) -> &'static SectionDefinition {
    SECTIONS
        .iter()
        .find(|definition| definition.id == id)
        .expect("section catalog is total")
}
