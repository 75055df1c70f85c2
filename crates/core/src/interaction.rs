use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::listing::ListingId;

/// Listings the current user has already judged.
///
/// `liked` mirrors the remote authority, `disliked` mirrors the durable
/// device store. The interacted set is always their union, so it cannot drift
/// from its two inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSet {
    liked: BTreeSet<ListingId>,
    disliked: BTreeSet<ListingId>,
}

impl InteractionSet {
    #[must_use]
    pub fn new(
        liked: impl IntoIterator<Item = ListingId>,
        disliked: impl IntoIterator<Item = ListingId>,
    ) -> Self {
        Self { liked: liked.into_iter().collect(), disliked: disliked.into_iter().collect() }
    }

    #[must_use]
    pub const fn liked(&self) -> &BTreeSet<ListingId> {
        &self.liked
    }

    #[must_use]
    pub const fn disliked(&self) -> &BTreeSet<ListingId> {
        &self.disliked
    }

    #[must_use]
    pub fn interacted(&self) -> BTreeSet<ListingId> {
        self.liked.union(&self.disliked).cloned().collect()
    }

    #[must_use]
    pub fn contains(&self, id: &ListingId) -> bool {
        self.liked.contains(id) || self.disliked.contains(id)
    }

    #[must_use]
    pub fn is_liked(&self, id: &ListingId) -> bool {
        self.liked.contains(id)
    }

    #[must_use]
    pub fn is_disliked(&self, id: &ListingId) -> bool {
        self.disliked.contains(id)
    }

    /// Returns `true` if the id was not liked before.
    pub fn mark_liked(&mut self, id: ListingId) -> bool {
        self.liked.insert(id)
    }

    pub fn unmark_liked(&mut self, id: &ListingId) -> bool {
        self.liked.remove(id)
    }

    /// Returns `true` if the id was not disliked before.
    pub fn mark_disliked(&mut self, id: ListingId) -> bool {
        self.disliked.insert(id)
    }

    pub fn unmark_disliked(&mut self, id: &ListingId) -> bool {
        self.disliked.remove(id)
    }

    /// Ids present in both subsets. Empty whenever the set is at rest.
    #[must_use]
    pub fn overlap(&self) -> Vec<ListingId> {
        self.liked.intersection(&self.disliked).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.liked.clear();
        self.disliked.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.liked.len() + self.disliked.len() - self.liked.intersection(&self.disliked).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ListingId {
        ListingId::new(s).unwrap()
    }

    #[test]
    fn interacted_is_union_without_duplicates() {
        let set = InteractionSet::new([id("a"), id("b"), id("a")], [id("b"), id("c")]);
        let interacted: Vec<_> = set.interacted().into_iter().collect();
        assert_eq!(interacted, vec![id("a"), id("b"), id("c")]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.overlap(), vec![id("b")]);
    }

    #[test]
    fn mark_liked_is_idempotent() {
        let mut set = InteractionSet::default();
        assert!(set.mark_liked(id("a")));
        assert!(!set.mark_liked(id("a")));
        assert_eq!(set.liked().len(), 1);
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut set = InteractionSet::new([id("a")], [id("b")]);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(&id("a")));
    }
}
