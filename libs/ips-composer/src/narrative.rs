//! Narrative stubs
//!
//! Populated sections carry a minimal generated narrative naming the
//! section and its member count. Real prose rendering is a future
//! collaborator; it can replace this module without changing the document
//! shape.

use crate::catalog::{section, SectionId};
use crate::classifier::SectionMap;
use std::collections::BTreeMap;
use summa_models::{Narrative, NarrativeStatus};

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Placeholder narrative for one populated section.
pub fn narrative_for(id: SectionId, member_count: usize) -> Narrative {
    let definition = section(id);
    let title = html_escape::encode_text(definition.title);
    let noun = if member_count == 1 { "entry" } else { "entries" };
    Narrative {
        status: NarrativeStatus::Generated,
        div: format!(r#"<div xmlns="{XHTML_NS}">{title}: {member_count} {noun}</div>"#),
    }
}

/// Narratives for every populated section in the map.
pub fn build_narratives(classified: &SectionMap) -> BTreeMap<SectionId, Narrative> {
    classified
        .iter()
        .map(|(&id, members)| (id, narrative_for(id, members.len())))
        .collect()
}
