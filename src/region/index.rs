//! Per-contig interval trees over chromosomal regions.
//!
//! Public methods take 1-based closed coordinates. The trees hold the same
//! regions as zero-based half-open ranges, so a region `[start, end]` is
//! stored as `start - 1..end`.

use std::collections::BTreeMap;
use std::fmt;

use bio::data_structures::interval_tree::ArrayBackedIntervalTree;
use log::warn;

use crate::variant::Variant;

use super::ChromosomalRegion;

/// Immutable after construction and safe to share between threads.
pub struct ChromosomalRegionIndex<T> {
    regions: Vec<T>,
    trees: BTreeMap<u8, ArrayBackedIntervalTree<u32, usize>>,
}

impl<T> ChromosomalRegionIndex<T> {
    /// An index with no regions. Every query returns nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            regions: Vec::new(),
            trees: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Contigs holding at least one region.
    pub fn contigs(&self) -> impl Iterator<Item = u8> + '_ {
        self.trees.keys().copied()
    }
}

impl<T: ChromosomalRegion> ChromosomalRegionIndex<T> {
    /// Build the index. Regions with a zero start or an end before their start
    /// are logged and skipped.
    pub fn new(regions: impl IntoIterator<Item = T>) -> Self {
        let mut kept = Vec::new();
        let mut trees: BTreeMap<u8, ArrayBackedIntervalTree<u32, usize>> = BTreeMap::new();

        for region in regions {
            if region.start() == 0 || region.end() < region.start() {
                warn!(
                    "skipping invalid region on contig {}: {}-{}",
                    region.contig(),
                    region.start(),
                    region.end()
                );
                continue;
            }
            trees
                .entry(region.contig())
                .or_insert_with(ArrayBackedIntervalTree::new)
                .insert(region.start() - 1..region.end(), kept.len());
            kept.push(region);
        }

        for tree in trees.values_mut() {
            tree.index();
        }

        Self {
            regions: kept,
            trees,
        }
    }

    /// Regions intersecting the closed interval `[start, end]`, sorted by
    /// region start then end. An interval ending before it starts matches nothing.
    pub fn regions_overlapping(&self, contig: u8, start: u32, end: u32) -> Vec<&T> {
        if end < start {
            return Vec::new();
        }
        let Some(tree) = self.trees.get(&contig) else {
            return Vec::new();
        };
        let mut ids: Vec<usize> = tree
            .find(start.saturating_sub(1)..end)
            .iter()
            .map(|entry| *entry.data())
            .collect();
        ids.sort_unstable_by_key(|&id| (self.regions[id].start(), self.regions[id].end(), id));
        ids.into_iter().map(|id| &self.regions[id]).collect()
    }

    pub fn regions_overlapping_variant(&self, variant: &Variant) -> Vec<&T> {
        self.regions_overlapping(variant.contig, variant.start, variant.end)
    }

    /// Regions covering the whole of the variant's `[start, end]`.
    #[must_use]
    pub fn regions_containing_variant(&self, variant: &Variant) -> Vec<&T> {
        self.regions_overlapping_variant(variant)
            .into_iter()
            .filter(|region| region.start() <= variant.start && variant.end <= region.end())
            .collect()
    }

    pub fn has_region_containing_variant(&self, variant: &Variant) -> bool {
        !self.regions_containing_variant(variant).is_empty()
    }

    pub fn regions_containing_position(&self, contig: u8, position: u32) -> Vec<&T> {
        self.regions_overlapping(contig, position, position)
    }
}

impl<T: ChromosomalRegion> FromIterator<T> for ChromosomalRegionIndex<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> Default for ChromosomalRegionIndex<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for ChromosomalRegionIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChromosomalRegionIndex")
            .field("regions", &self.regions.len())
            .field("contigs", &self.trees.keys().collect::<Vec<_>>())
            .finish()
    }
}
