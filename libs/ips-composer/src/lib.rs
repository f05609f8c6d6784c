//! Patient summary composition engine
//!
//! Turns the unordered record set returned by a prior record search into a
//! structured, multi-section summary document packaged as a FHIR document
//! bundle. The engine is a single linear pass over in-memory collections:
//!
//! 1. [`classifier::classify`] assigns records to sections via the static
//!    [`catalog`] rules
//! 2. [`placeholders::ensure_mandatory_sections`] synthesizes "no known
//!    information" records for empty mandatory sections
//! 3. [`filter::filter_sections`] applies the secondary status filters
//! 4. [`narrative::build_narratives`] stubs a narrative per section
//! 5. [`assembler::assemble`] builds the composition in catalog order
//! 6. [`packager::package`] wraps everything into a document bundle
//!
//! Every invocation is independent; nothing is persisted or cached between
//! runs, and output ordering is a deterministic function of input order and
//! the catalog.
//!
//! # Example
//!
//! ```rust
//! use summa_composer::build_summary;
//! use summa_models::{Resource, ResourceType};
//!
//! let records = vec![
//!     Resource::new(ResourceType::Patient).with_id("pat-1"),
//!     Resource::new(ResourceType::AllergyIntolerance).with_id("a-1"),
//! ];
//! let bundle = build_summary(records).unwrap();
//! // Composition + subject + allergy + two synthesized placeholders
//! assert_eq!(bundle.entry.len(), 5);
//! ```

pub mod assembler;
pub mod catalog;
pub mod classifier;
pub mod error;
pub mod filter;
pub mod narrative;
pub mod packager;
pub mod placeholders;

pub use catalog::{InclusionRule, SectionDefinition, SectionId};
pub use classifier::SectionMap;
pub use error::{Error, Result};

use summa_models::{Bundle, Reference, Resource, ResourceType};

/// Compose a patient summary from a search result.
///
/// By convention the subject Patient record is the first element of
/// `records`; the remaining records are the subject's clinical data in
/// search order.
pub fn build_summary(mut records: Vec<Resource>) -> Result<Bundle> {
    let subject = records.first().ok_or(Error::EmptyInput)?;
    if subject.resource_type != ResourceType::Patient {
        return Err(Error::InvalidSubject(subject.resource_type));
    }
    let subject_ref = subject
        .reference_url()
        .map(Reference::literal)
        .ok_or(Error::SubjectMissingId)?;

    let mut classified = classifier::classify(&records)?;
    tracing::debug!(
        records = records.len(),
        sections = classified.len(),
        "classified records"
    );

    placeholders::ensure_mandatory_sections(&mut records, &mut classified, &subject_ref);
    let classified = filter::filter_sections(&records, classified);
    let narratives = narrative::build_narratives(&classified);
    let composition = assembler::assemble(&subject_ref, &records, &classified, &narratives)?;

    let pruned = packager::prune_records(&records, &composition);
    tracing::debug!(
        sections = composition.section.len(),
        packaged = pruned.len(),
        "assembled composition"
    );
    packager::package(&composition, &pruned)
}
