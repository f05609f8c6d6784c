//! Document assembly
//!
//! Builds the composition header and attaches the populated sections in
//! catalog order. Within a section, entries are grouped by record type:
//! groups appear in first-seen order, members keep input order inside their
//! group, and each member appears exactly once.

use crate::catalog::{sections, SectionDefinition, SectionId, LOINC};
use crate::classifier::SectionMap;
use crate::error::{Error, Result};
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use summa_models::{
    CodeableConcept, Coding, Composition, CompositionSection, CompositionStatus, Confidentiality,
    Narrative, Reference, Resource, ResourceType,
};
use uuid::Uuid;

const SUMMARY_DOCUMENT_CODE: &str = "60591-5";
const SUMMARY_DOCUMENT_DISPLAY: &str = "Patient Summary Document";

/// Build the composition for `subject` from the filtered section map.
///
/// Sections absent from the map are omitted; the emitted sequence is always
/// a subsequence of catalog order.
pub fn assemble(
    subject: &Reference,
    records: &[Resource],
    classified: &SectionMap,
    narratives: &BTreeMap<SectionId, Narrative>,
) -> Result<Composition> {
    let now = Utc::now();
    let mut composition = Composition {
        resource_type: "Composition".to_string(),
        id: Some(format!("urn:uuid:{}", Uuid::new_v4())),
        status: CompositionStatus::Final,
        document_type: CodeableConcept::from_coding(
            Coding::new(LOINC, SUMMARY_DOCUMENT_CODE).with_display(SUMMARY_DOCUMENT_DISPLAY),
        ),
        subject: Some(subject.clone()),
        date: Some(now.to_rfc3339()),
        title: Some(format!("Patient Summary as of {}", now.format("%m/%d/%Y"))),
        confidentiality: Some(Confidentiality::Normal),
        section: Vec::new(),
        extensions: Default::default(),
    };

    for definition in sections() {
        let Some(members) = classified.get(&definition.id) else {
            continue;
        };
        if members.is_empty() {
            continue;
        }
        let narrative = narratives.get(&definition.id).cloned();
        composition
            .section
            .push(build_section(definition, records, members, narrative)?);
    }

    Ok(composition)
}

fn build_section(
    definition: &SectionDefinition,
    records: &[Resource],
    members: &[usize],
    narrative: Option<Narrative>,
) -> Result<CompositionSection> {
    // Group member references by record type, first-seen type order.
    // Dedup by the full reference URL: bare ids are only unique per type,
    // and mixed-type sections may legitimately hold records of different
    // types sharing an id.
    let mut groups: Vec<(ResourceType, Vec<String>)> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for &position in members {
        let resource = &records[position];
        let reference = resource.reference_url().ok_or(Error::MissingId {
            resource_type: resource.resource_type,
            position,
        })?;
        if !seen.insert(reference.clone()) {
            continue;
        }
        match groups
            .iter_mut()
            .find(|(resource_type, _)| *resource_type == resource.resource_type)
        {
            Some((_, group)) => group.push(reference),
            None => groups.push((resource.resource_type, vec![reference])),
        }
    }

    let entry = groups
        .into_iter()
        .flat_map(|(_, group)| group)
        .map(Reference::literal)
        .collect();

    Ok(CompositionSection {
        title: Some(definition.title.to_string()),
        code: Some(CodeableConcept::from_coding(definition.coding())),
        text: narrative,
        entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::build_narratives;

    fn subject() -> Reference {
        Reference::literal("Patient/pat-1")
    }

    fn laboratory(id: &str) -> Resource {
        Resource::new(ResourceType::Observation)
            .with_id(id)
            .with_category(CodeableConcept::from_coding(Coding::new(
                "http://terminology.hl7.org/CodeSystem/observation-category",
                "laboratory",
            )))
    }

    #[test]
    fn test_header_fields() {
        let classified = SectionMap::new();
        let composition =
            assemble(&subject(), &[], &classified, &BTreeMap::new()).unwrap();

        assert_eq!(composition.status, CompositionStatus::Final);
        assert_eq!(
            composition.document_type.coding[0].code.as_deref(),
            Some(SUMMARY_DOCUMENT_CODE)
        );
        assert_eq!(composition.confidentiality, Some(Confidentiality::Normal));
        assert!(composition.id.as_deref().unwrap().starts_with("urn:uuid:"));
        assert_eq!(composition.subject.as_ref().unwrap(), &subject());

        let title = composition.title.unwrap();
        assert!(title.starts_with("Patient Summary as of "));
        // MM/DD/YYYY
        let date = title.trim_start_matches("Patient Summary as of ");
        assert_eq!(date.len(), 10);
        assert_eq!(&date[2..3], "/");
        assert_eq!(&date[5..6], "/");
    }

    #[test]
    fn test_sections_follow_catalog_order() {
        let records = vec![
            Resource::new(ResourceType::CarePlan).with_id("cp-1"),
            Resource::new(ResourceType::AllergyIntolerance).with_id("a1"),
            Resource::new(ResourceType::Condition).with_id("c1"),
        ];
        let mut classified = SectionMap::new();
        classified.insert(SectionId::PlanOfCare, vec![0]);
        classified.insert(SectionId::AllergyIntolerance, vec![1]);
        classified.insert(SectionId::ProblemList, vec![2]);

        let narratives = build_narratives(&classified);
        let composition = assemble(&subject(), &records, &classified, &narratives).unwrap();

        let titles: Vec<&str> = composition
            .section
            .iter()
            .map(|s| s.title.as_deref().unwrap())
            .collect();
        assert_eq!(
            titles,
            vec!["Allergies and Intolerances", "Problem List", "Plan of Care"]
        );
    }

    #[test]
    fn test_entries_group_by_type_in_first_seen_order() {
        // Interleaved reports and observations: the first record is an
        // observation, so the observation group comes first and holds both
        // observations in input order.
        let records = vec![
            laboratory("obs-1"),
            Resource::new(ResourceType::DiagnosticReport).with_id("dr-1"),
            laboratory("obs-2"),
        ];
        let mut classified = SectionMap::new();
        classified.insert(SectionId::DiagnosticResults, vec![0, 1, 2]);

        let composition =
            assemble(&subject(), &records, &classified, &BTreeMap::new()).unwrap();
        let refs: Vec<&str> = composition.section[0]
            .entry
            .iter()
            .map(|r| r.reference.as_deref().unwrap())
            .collect();
        assert_eq!(
            refs,
            vec![
                "Observation/obs-1",
                "Observation/obs-2",
                "DiagnosticReport/dr-1"
            ]
        );
    }

    #[test]
    fn test_same_id_across_types_yields_distinct_entries() {
        // Ids are only unique per type: a report and an observation may
        // legitimately share one, and both must survive deduplication.
        let records = vec![
            Resource::new(ResourceType::DiagnosticReport).with_id("shared"),
            laboratory("shared"),
        ];
        let mut classified = SectionMap::new();
        classified.insert(SectionId::DiagnosticResults, vec![0, 1]);

        let composition =
            assemble(&subject(), &records, &classified, &BTreeMap::new()).unwrap();
        let refs: Vec<&str> = composition.section[0]
            .entry
            .iter()
            .map(|r| r.reference.as_deref().unwrap())
            .collect();
        assert_eq!(refs, vec!["DiagnosticReport/shared", "Observation/shared"]);
    }

    #[test]
    fn test_duplicate_members_emitted_once() {
        let records = vec![Resource::new(ResourceType::Condition).with_id("c1")];
        let mut classified = SectionMap::new();
        classified.insert(SectionId::ProblemList, vec![0, 0]);

        let composition =
            assemble(&subject(), &records, &classified, &BTreeMap::new()).unwrap();
        assert_eq!(composition.section[0].entry.len(), 1);
    }

    #[test]
    fn test_section_narrative_is_attached() {
        let records = vec![Resource::new(ResourceType::Condition).with_id("c1")];
        let mut classified = SectionMap::new();
        classified.insert(SectionId::ProblemList, vec![0]);

        let narratives = build_narratives(&classified);
        let composition = assemble(&subject(), &records, &classified, &narratives).unwrap();
        let text = composition.section[0].text.as_ref().unwrap();
        assert!(text.div.contains("Problem List"));
    }
}
