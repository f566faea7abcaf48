use crate::annotation::IntervalTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// TierGroup
///
/// All loaded tiers of one (document, speaker) pair, keyed by level.
/// Built when annotations are loaded and dropped after use; the core
/// keeps no cross-document cache.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TierGroup {
    tiers: BTreeMap<String, IntervalTier>,
}

impl TierGroup {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tiers: BTreeMap::new(),
        }
    }

    /// Insert a tier under its own level id, replacing any previous
    /// tier for that level.
    pub fn insert(&mut self, tier: IntervalTier) {
        self.tiers.insert(tier.level_id().to_string(), tier);
    }

    #[must_use]
    pub fn tier(&self, level_id: &str) -> Option<&IntervalTier> {
        self.tiers.get(level_id)
    }

    pub fn remove(&mut self, level_id: &str) -> Option<IntervalTier> {
        self.tiers.remove(level_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn level_ids(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }

    pub fn tiers(&self) -> impl Iterator<Item = &IntervalTier> {
        self.tiers.values()
    }
}

impl FromIterator<IntervalTier> for TierGroup {
    fn from_iter<I: IntoIterator<Item = IntervalTier>>(iter: I) -> Self {
        let mut group = Self::new();
        for tier in iter {
            group.insert(tier);
        }
        group
    }
}
