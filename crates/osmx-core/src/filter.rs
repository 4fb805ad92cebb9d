//! Result filtering for Overpass elements

use crate::models::GeoElement;

/// Keep elements that have a name and at least one requested tag
///
/// Retained elements are stamped with `area` under the locality key when an
/// area was searched. Input order is preserved.
pub fn filter_elements<S: AsRef<str>>(
    elements: Vec<GeoElement>,
    area: Option<&str>,
    tags: &[S],
) -> Vec<GeoElement> {
    tracing::debug!(count = elements.len(), "Filtering elements");

    elements
        .into_iter()
        .filter_map(|element| {
            let has_name = element.has_name();
            let has_tag = element.has_any_tag(tags);
            tracing::trace!(id = element.id, has_name, has_tag, "Element checked");

            if !(has_name && has_tag) {
                return None;
            }

            Some(match area {
                Some(area) => element.with_locality(area),
                None => element,
            })
        })
        .collect()
}
