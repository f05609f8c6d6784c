//! Secondary section filtering
//!
//! A second, independent pass over already-classified members. Sections
//! whose definition pins a required status drop members with any other
//! status; a section emptied by the filter disappears from the map.

use crate::catalog::section;
use crate::classifier::SectionMap;
use summa_models::Resource;

/// Apply each section's secondary status filter. Pure: the input map is
/// consumed and a filtered map returned.
pub fn filter_sections(records: &[Resource], classified: SectionMap) -> SectionMap {
    let mut filtered = SectionMap::new();

    for (id, members) in classified {
        let definition = section(id);
        let retained: Vec<usize> = members
            .into_iter()
            .filter(|&position| definition.retains(&records[position]))
            .collect();
        if !retained.is_empty() {
            filtered.insert(id, retained);
        }
    }

    filtered
}
