//! Per-sub-mode population frequency ceilings.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Error;
use crate::variant::Variant;

use super::{ModeOfInheritance, SubModeOfInheritance};

/// Maximum tolerated population frequency (percent) for each sub-mode.
///
/// A sub-mode with no entry falls back to the `ANY` entry when one is
/// configured, and is otherwise unbounded. Unbounded sub-modes are still
/// analysed: options holding only `AUTOSOMAL_DOMINANT` gate that sub-mode
/// and leave every other transmission sub-mode without a ceiling. `ANY`
/// itself is analysed only when it has an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct InheritanceModeOptions {
    max_freqs: BTreeMap<SubModeOfInheritance, f32>,
}

impl Default for InheritanceModeOptions {
    fn default() -> Self {
        Self::defaults()
    }
}

impl InheritanceModeOptions {
    /// The standard ceilings: dominant 0.1%, recessive hom-alt 0.1%,
    /// recessive comp-het 2%, mitochondrial 0.2%, `ANY` 100% (unbounded).
    #[must_use]
    pub fn defaults() -> Self {
        use SubModeOfInheritance as S;
        let max_freqs = BTreeMap::from([
            (S::AutosomalDominant, 0.1),
            (S::AutosomalRecessiveHomAlt, 0.1),
            (S::AutosomalRecessiveCompHet, 2.0),
            (S::XDominant, 0.1),
            (S::XRecessiveHomAlt, 0.1),
            (S::XRecessiveCompHet, 2.0),
            (S::Mitochondrial, 0.2),
            (S::Any, 100.0),
        ]);
        Self { max_freqs }
    }

    /// No ceilings at all; every sub-mode is unbounded and `ANY` is not analysed.
    pub fn empty() -> Self {
        Self {
            max_freqs: BTreeMap::new(),
        }
    }

    /// Build from explicit ceilings. Values must lie in [0, 100].
    pub fn new(
        entries: impl IntoIterator<Item = (SubModeOfInheritance, f32)>,
    ) -> Result<Self, Error> {
        let mut max_freqs = BTreeMap::new();
        for (sub_mode, max_freq) in entries {
            if !(0.0..=100.0).contains(&max_freq) {
                return Err(Error::Validation(format!(
                    "maximum frequency for {sub_mode} must be in the range 0-100, got {max_freq}"
                )));
            }
            max_freqs.insert(sub_mode, max_freq);
        }
        Ok(Self { max_freqs })
    }

    pub fn is_empty(&self) -> bool {
        self.max_freqs.is_empty()
    }

    pub fn is_defined(&self, sub_mode: SubModeOfInheritance) -> bool {
        self.max_freqs.contains_key(&sub_mode)
    }

    /// The ceiling for `sub_mode`: its own entry, else the `ANY` entry, else unbounded.
    pub fn max_freq_for_sub_mode(&self, sub_mode: SubModeOfInheritance) -> f32 {
        self.max_freqs
            .get(&sub_mode)
            .or_else(|| self.max_freqs.get(&SubModeOfInheritance::Any))
            .copied()
            .unwrap_or(f32::MAX)
    }

    /// The most permissive ceiling among the sub-modes of `mode`.
    pub fn max_freq_for_mode(&self, mode: ModeOfInheritance) -> f32 {
        mode.sub_modes()
            .iter()
            .map(|&sub_mode| self.max_freq_for_sub_mode(sub_mode))
            .fold(f32::MIN, f32::max)
    }

    /// The largest configured ceiling, or unbounded if nothing is configured.
    pub fn max_freq(&self) -> f32 {
        if self.max_freqs.is_empty() {
            return f32::MAX;
        }
        self.max_freqs.values().copied().fold(f32::MIN, f32::max)
    }

    pub fn defined_sub_modes(&self) -> BTreeSet<SubModeOfInheritance> {
        self.max_freqs.keys().copied().collect()
    }

    pub fn defined_modes(&self) -> BTreeSet<ModeOfInheritance> {
        self.max_freqs.keys().map(|sub_mode| sub_mode.mode()).collect()
    }

    /// Frequency gate: whitelisted variants always pass, others must not
    /// exceed the sub-mode's ceiling.
    #[must_use]
    pub fn passes_frequency(&self, sub_mode: SubModeOfInheritance, variant: &Variant) -> bool {
        variant.whitelisted || variant.max_freq() <= self.max_freq_for_sub_mode(sub_mode)
    }
}
