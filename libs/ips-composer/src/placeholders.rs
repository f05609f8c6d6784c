//! Placeholder synthesis for mandatory sections
//!
//! Mandatory sections must appear in every summary. When classification
//! leaves one empty, a single "no known information" record is synthesized
//! from the catalog's placeholder recipe, referencing the subject and
//! carrying a fresh urn-form identity. Synthesized records accumulate in a
//! separate buffer and are merged into the record list at one point, after
//! all caller-supplied records.

use crate::catalog::{sections, PlaceholderField, PlaceholderSpec, ABSENT_UNKNOWN_SYSTEM};
use crate::classifier::SectionMap;
use summa_models::{CodeableConcept, Coding, Reference, Resource};
use uuid::Uuid;

/// Guarantee that every mandatory section has at least one member.
///
/// Idempotent within a run: sections already present in `classified` are
/// left alone.
pub fn ensure_mandatory_sections(
    records: &mut Vec<Resource>,
    classified: &mut SectionMap,
    subject: &Reference,
) {
    let mut synthesized = Vec::new();

    for definition in sections() {
        let Some(spec) = definition.placeholder else {
            continue;
        };
        if classified.contains_key(&definition.id) {
            continue;
        }
        tracing::debug!(section = ?definition.id, code = spec.code, "synthesizing placeholder");
        synthesized.push((definition.id, absent_record(&spec, subject)));
    }

    for (id, resource) in synthesized {
        records.push(resource);
        classified.insert(id, vec![records.len() - 1]);
    }
}

fn absent_record(spec: &PlaceholderSpec, subject: &Reference) -> Resource {
    let concept = CodeableConcept::from_coding(
        Coding::new(ABSENT_UNKNOWN_SYSTEM, spec.code).with_display(spec.display),
    );
    let mut resource = Resource::new(spec.resource_type)
        .with_id(format!("urn:uuid:{}", Uuid::new_v4()))
        .with_subject(subject.clone());
    resource = match spec.placement {
        PlaceholderField::Code => resource.with_code(concept),
        PlaceholderField::Category => resource.with_category(concept),
    };
    if let Some(system) = spec.clinical_system {
        resource = resource
            .with_clinical_status(CodeableConcept::from_coding(Coding::new(system, "active")));
    }
    if let Some(status) = spec.status {
        resource = resource.with_status(status);
    }
    resource
}
