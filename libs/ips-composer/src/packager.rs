//! Bundle packaging
//!
//! Wraps the composition and the records it references into a document
//! bundle: composition first, then every pruned record in list order, each
//! under its resolvable URL. Packaging enforces the no-dangling-reference
//! invariant; it never drops a referenced record silently.

use crate::error::{Error, Result};
use chrono::Utc;
use std::collections::HashSet;
use summa_models::{Bundle, BundleType, Composition, Resource};
use uuid::Uuid;

/// Keep only records the composition actually references, plus the
/// subject's own record. Relative order is preserved.
pub fn prune_records(records: &[Resource], composition: &Composition) -> Vec<Resource> {
    let mut referenced: HashSet<&str> = composition
        .section
        .iter()
        .flat_map(|section| section.entry.iter())
        .filter_map(|entry| entry.reference.as_deref())
        .collect();
    if let Some(subject) = composition
        .subject
        .as_ref()
        .and_then(|subject| subject.reference.as_deref())
    {
        referenced.insert(subject);
    }

    records
        .iter()
        .filter(|resource| {
            resource
                .reference_url()
                .is_some_and(|url| referenced.contains(url.as_str()))
        })
        .cloned()
        .collect()
}

/// Package `composition` and `records` into a document bundle.
///
/// Every record is emitted exactly once (deduplicated by reference URL),
/// and every section entry must resolve to a packaged record.
pub fn package(composition: &Composition, records: &[Resource]) -> Result<Bundle> {
    let mut bundle = Bundle::new(BundleType::Document);
    bundle.id = Some(format!("urn:uuid:{}", Uuid::new_v4()));
    bundle.timestamp = Some(Utc::now().to_rfc3339());

    let composition_url = composition
        .id
        .clone()
        .unwrap_or_else(|| format!("urn:uuid:{}", Uuid::new_v4()));
    bundle.push_resource(composition_url, composition)?;

    let mut packaged: HashSet<String> = HashSet::new();
    for (position, resource) in records.iter().enumerate() {
        let url = resource.reference_url().ok_or(Error::MissingId {
            resource_type: resource.resource_type,
            position,
        })?;
        if !packaged.insert(url.clone()) {
            continue;
        }
        bundle.push_resource(url, resource)?;
    }

    for section in &composition.section {
        for entry in &section.entry {
            let reference = entry.reference.as_deref().unwrap_or_default();
            if !packaged.contains(reference) {
                return Err(Error::DanglingReference {
                    reference: reference.to_string(),
                });
            }
        }
    }

    Ok(bundle)
}
