//! Candidate filter: the listings still eligible to be judged.

use std::collections::BTreeSet;

use crate::image_filter::has_valid_image;
use crate::interaction::InteractionSet;
use crate::listing::{ListingId, ListingRecord};

/// Derive the candidate queue from the catalog.
///
/// Returns nothing until `ready` is set. A listing is dropped when it has been
/// judged, when a judgment on it is still in flight, or when none of its image
/// pieces is renderable. Catalog order is preserved.
#[must_use]
pub fn candidate_queue(
    catalog: &[ListingRecord],
    interactions: &InteractionSet,
    in_flight: &BTreeSet<ListingId>,
    ready: bool,
) -> Vec<ListingRecord> {
    if !ready {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|listing| !interactions.contains(&listing.id) && !in_flight.contains(&listing.id))
        .filter(|listing| has_valid_image(&listing.images))
        .cloned()
        .collect()
}
