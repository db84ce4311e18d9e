//! Per-gene inheritance-mode annotation.
//!
//! The annotator never mutates its input. Results come back as an
//! [`InheritanceModeAnnotation`] whose per-variant record is keyed by
//! [`VariantKey`].

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::pedigree::Pedigree;
use crate::variant::{Variant, VariantKey};

use super::comp_het::{CompHetAlleleCalculator, CompHetPair};
use super::options::InheritanceModeOptions;
use super::segregation::{self, Penetrance};
use super::{ModeOfInheritance, SubModeOfInheritance};

/// Everything the annotator found for one gene's variants.
#[derive(Debug, Clone, Default)]
pub struct InheritanceModeAnnotation<'v> {
    pub sub_modes: BTreeMap<SubModeOfInheritance, Vec<&'v Variant>>,
    pub modes: BTreeMap<ModeOfInheritance, Vec<&'v Variant>>,
    pub comp_het_pairs: BTreeMap<SubModeOfInheritance, Vec<CompHetPair<'v>>>,
    pub variant_modes: BTreeMap<VariantKey, BTreeSet<ModeOfInheritance>>,
}

impl InheritanceModeAnnotation<'_> {
    pub fn compatible_modes(&self) -> BTreeSet<ModeOfInheritance> {
        self.modes.keys().copied().collect()
    }

    pub fn is_compatible_with(&self, mode: ModeOfInheritance) -> bool {
        self.modes.contains_key(&mode)
    }

    /// Compatible modes recorded for `variant`; empty if it qualified for none.
    pub fn modes_for(&self, variant: &Variant) -> BTreeSet<ModeOfInheritance> {
        self.variant_modes
            .get(&variant.key())
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InheritanceModeAnnotator<'p> {
    pedigree: &'p Pedigree,
    options: &'p InheritanceModeOptions,
    penetrance: Penetrance,
}

impl<'p> InheritanceModeAnnotator<'p> {
    pub fn new(pedigree: &'p Pedigree, options: &'p InheritanceModeOptions) -> Self {
        Self {
            pedigree,
            options,
            penetrance: Penetrance::Complete,
        }
    }

    #[must_use]
    pub fn with_penetrance(mut self, penetrance: Penetrance) -> Self {
        self.penetrance = penetrance;
        self
    }

    pub fn pedigree(&self) -> &Pedigree {
        self.pedigree
    }

    pub fn options(&self) -> &InheritanceModeOptions {
        self.options
    }

    /// Sub-modes under analysis: every transmission sub-mode, plus `ANY`
    /// when the options configure it.
    fn analysed_sub_modes(&self) -> impl Iterator<Item = SubModeOfInheritance> + '_ {
        SubModeOfInheritance::ALL.into_iter().filter(|&sub_mode| {
            sub_mode != SubModeOfInheritance::Any || self.options.is_defined(sub_mode)
        })
    }

    /// Variants compatible with each sub-mode, in input order. Sub-modes with
    /// no compatible variant are absent. `variants` must come from one gene.
    #[must_use]
    pub fn compute_compatible_inheritance_sub_modes<'v>(
        &self,
        variants: &'v [Variant],
    ) -> BTreeMap<SubModeOfInheritance, Vec<&'v Variant>> {
        self.compute(variants).0
    }

    /// Variants compatible with each mode, i.e. with at least one of its
    /// sub-modes, in input order.
    #[must_use]
    pub fn compute_compatible_inheritance_modes<'v>(
        &self,
        variants: &'v [Variant],
    ) -> BTreeMap<ModeOfInheritance, Vec<&'v Variant>> {
        let (sub_modes, _) = self.compute(variants);
        collapse_to_modes(variants, &sub_modes)
    }

    /// Full annotation of one gene's variants.
    #[must_use]
    pub fn annotate<'v>(&self, variants: &'v [Variant]) -> InheritanceModeAnnotation<'v> {
        let (sub_modes, comp_het_pairs) = self.compute(variants);
        let modes = collapse_to_modes(variants, &sub_modes);

        let mut variant_modes: BTreeMap<VariantKey, BTreeSet<ModeOfInheritance>> = BTreeMap::new();
        for (&mode, compatible) in &modes {
            for variant in compatible {
                variant_modes.entry(variant.key()).or_default().insert(mode);
            }
        }

        InheritanceModeAnnotation {
            sub_modes,
            modes,
            comp_het_pairs,
            variant_modes,
        }
    }

    #[allow(clippy::type_complexity)]
    fn compute<'v>(
        &self,
        variants: &'v [Variant],
    ) -> (
        BTreeMap<SubModeOfInheritance, Vec<&'v Variant>>,
        BTreeMap<SubModeOfInheritance, Vec<CompHetPair<'v>>>,
    ) {
        let mut sub_modes = BTreeMap::new();
        let mut comp_het_pairs = BTreeMap::new();
        if variants.is_empty() || self.pedigree.is_empty() {
            return (sub_modes, comp_het_pairs);
        }

        let passing: Vec<&'v Variant> = variants.iter().filter(|v| v.passed_filters).collect();
        let calculator = CompHetAlleleCalculator::new(self.pedigree).with_penetrance(self.penetrance);
        let mut all_pairs: Option<Vec<CompHetPair<'v>>> = None;

        for sub_mode in self.analysed_sub_modes() {
            let compatible: Vec<&'v Variant> = if sub_mode.is_comp_het() {
                let pairs: Vec<CompHetPair<'v>> = all_pairs
                    .get_or_insert_with(|| calculator.find_pairs(&passing))
                    .iter()
                    .filter(|pair| {
                        pair.sub_mode() == Some(sub_mode)
                            && self.options.passes_frequency(sub_mode, pair.first)
                            && self.options.passes_frequency(sub_mode, pair.second)
                    })
                    .copied()
                    .collect();
                let members = passing
                    .iter()
                    .copied()
                    .filter(|variant| pairs.iter().any(|pair| pair.contains(variant)))
                    .collect();
                if !pairs.is_empty() {
                    comp_het_pairs.insert(sub_mode, pairs);
                }
                members
            } else {
                passing
                    .iter()
                    .copied()
                    .filter(|variant| {
                        segregation::segregates(self.pedigree, sub_mode, variant, self.penetrance)
                            && self.options.passes_frequency(sub_mode, variant)
                    })
                    .collect()
            };

            debug!(
                "{sub_mode}: {} of {} variants compatible",
                compatible.len(),
                variants.len()
            );
            if !compatible.is_empty() {
                sub_modes.insert(sub_mode, compatible);
            }
        }

        (sub_modes, comp_het_pairs)
    }
}

/// Merge sub-mode results into their parent modes, keeping input order.
fn collapse_to_modes<'v>(
    variants: &'v [Variant],
    sub_modes: &BTreeMap<SubModeOfInheritance, Vec<&'v Variant>>,
) -> BTreeMap<ModeOfInheritance, Vec<&'v Variant>> {
    let mut modes = BTreeMap::new();
    for mode in ModeOfInheritance::ALL {
        let members: Vec<&Vec<&'v Variant>> = mode
            .sub_modes()
            .iter()
            .filter_map(|sub_mode| sub_modes.get(sub_mode))
            .collect();
        if members.is_empty() {
            continue;
        }
        let compatible: Vec<&'v Variant> = variants
            .iter()
            .filter(|variant| {
                members
                    .iter()
                    .any(|list| list.iter().any(|v| std::ptr::eq(*v, *variant)))
            })
            .collect();
        modes.insert(mode, compatible);
    }
    modes
}
