//! Record classification
//!
//! Assigns every input record to the set of sections whose rules match it.
//! Classification is a pure function of the input list: no record is
//! mutated, insertion order within a section equals input order, and a
//! record may land in several sections when it satisfies several rules.

use crate::catalog::{sections, SectionId};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use summa_models::{Resource, ResourceType};

/// Per-section member lists, as indices into the record list.
///
/// Keyed by [`SectionId`] in an ordered map so iteration follows catalog
/// order deterministically. Sections with no members are absent, never
/// present with an empty list.
pub type SectionMap = BTreeMap<SectionId, Vec<usize>>;

/// Classify `records` into sections.
///
/// Fails fast when any record carries no id: entry references and bundle
/// URLs are derived from ids, and silently dropping an unidentifiable
/// record is not allowed. The subject Patient record is exempt from
/// classification but still id-checked.
pub fn classify(records: &[Resource]) -> Result<SectionMap> {
    let mut classified = SectionMap::new();

    for (position, resource) in records.iter().enumerate() {
        if resource.id.is_none() {
            return Err(Error::MissingId {
                resource_type: resource.resource_type,
                position,
            });
        }
        if resource.resource_type == ResourceType::Patient {
            continue;
        }
        for definition in sections() {
            if definition.applies_to(resource) {
                classified
                    .entry(definition.id)
                    .or_insert_with(Vec::new)
                    .push(position);
            }
        }
    }

    Ok(classified)
}
