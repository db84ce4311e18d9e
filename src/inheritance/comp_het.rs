//! Compound-heterozygous pairing: two heterozygous variants in one gene that
//! together form a recessive genotype.

use crate::genotype::{AlleleCall, SampleGenotype};
use crate::pedigree::{Pedigree, Sex, Status};
use crate::variant::{Variant, VariantKey};

use super::SubModeOfInheritance;
use super::segregation::{self, Penetrance, Zygosity};

/// Two variants that may jointly cause a recessive phenotype.
/// `first` is the genomically earlier of the two.
#[derive(Debug, Clone, Copy)]
pub struct CompHetPair<'a> {
    pub first: &'a Variant,
    pub second: &'a Variant,
}

impl<'a> CompHetPair<'a> {
    /// The comp-het sub-mode implied by the pair's chromosome.
    pub fn sub_mode(&self) -> Option<SubModeOfInheritance> {
        SubModeOfInheritance::comp_het_for(self.first.chromosome_type())
    }

    /// True if `variant` is one of the two members (by identity, not value).
    pub fn contains(&self, variant: &Variant) -> bool {
        std::ptr::eq(self.first, variant) || std::ptr::eq(self.second, variant)
    }

    pub fn keys(&self) -> (VariantKey, VariantKey) {
        (self.first.key(), self.second.key())
    }
}

impl PartialEq for CompHetPair<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.first == other.first && self.second == other.second
    }
}

/// Searches a gene's variants for compatible compound-heterozygous pairs.
#[derive(Debug, Clone, Copy)]
pub struct CompHetAlleleCalculator<'p> {
    pedigree: &'p Pedigree,
    penetrance: Penetrance,
}

impl<'p> CompHetAlleleCalculator<'p> {
    pub fn new(pedigree: &'p Pedigree) -> Self {
        Self {
            pedigree,
            penetrance: Penetrance::Complete,
        }
    }

    #[must_use]
    pub fn with_penetrance(mut self, penetrance: Penetrance) -> Self {
        self.penetrance = penetrance;
        self
    }

    /// All compatible pairs among `variants`, which must come from a single gene.
    ///
    /// Pairs are sorted by the first member's position, then the second's,
    /// with REF/ALT breaking ties, so the output does not depend on input order.
    #[must_use]
    pub fn find_compatible_comp_het_alleles<'v>(
        &self,
        variants: &'v [Variant],
    ) -> Vec<CompHetPair<'v>> {
        let variants: Vec<&'v Variant> = variants.iter().collect();
        self.find_pairs(&variants)
    }

    pub(crate) fn find_pairs<'v>(&self, variants: &[&'v Variant]) -> Vec<CompHetPair<'v>> {
        let candidates: Vec<(&'v Variant, SubModeOfInheritance)> = variants
            .iter()
            .copied()
            .filter(|variant| variant.passed_filters)
            .filter_map(|variant| {
                let sub_mode = SubModeOfInheritance::comp_het_for(variant.chromosome_type())?;
                segregation::segregates(self.pedigree, sub_mode, variant, self.penetrance)
                    .then_some((variant, sub_mode))
            })
            .collect();

        let mut pairs = Vec::new();
        for (i, &(a, sub_mode)) in candidates.iter().enumerate() {
            for &(b, _) in &candidates[i + 1..] {
                if a.contig != b.contig || a.genomic_cmp(b).is_eq() {
                    continue;
                }
                let (first, second) = if a.genomic_cmp(b).is_lt() {
                    (a, b)
                } else {
                    (b, a)
                };
                if self.pair_segregates(sub_mode, first, second) {
                    pairs.push(CompHetPair { first, second });
                }
            }
        }

        pairs.sort_by(|x, y| {
            x.first
                .genomic_cmp(y.first)
                .then_with(|| x.second.genomic_cmp(y.second))
        });
        pairs
    }

    /// Pair-level test. Affected individuals must be heterozygous for both
    /// variants and, when phased, carry them in trans; hemizygous males only
    /// need to carry one. Under complete penetrance no unaffected individual
    /// may carry the full compound genotype.
    fn pair_segregates(
        &self,
        sub_mode: SubModeOfInheritance,
        first: &Variant,
        second: &Variant,
    ) -> bool {
        let mut affected_genotyped = false;

        for individual in self.pedigree.individuals() {
            let (Some(gt_first), Some(gt_second)) = (
                first.genotype(individual.id()),
                second.genotype(individual.id()),
            ) else {
                continue;
            };
            let z_first = Zygosity::of(gt_first);
            let z_second = Zygosity::of(gt_second);
            let hemizygous =
                sub_mode == SubModeOfInheritance::XRecessiveCompHet && individual.sex() == Sex::Male;

            match individual.status() {
                Status::Affected => {
                    if hemizygous {
                        if !(z_first.carries() || z_second.carries()) {
                            return false;
                        }
                    } else if z_first != Zygosity::Het
                        || z_second != Zygosity::Het
                        || in_cis(gt_first, gt_second)
                    {
                        return false;
                    }
                    affected_genotyped = true;
                }
                Status::Unaffected if self.penetrance == Penetrance::Complete => {
                    if z_first == Zygosity::HomAlt || z_second == Zygosity::HomAlt {
                        return false;
                    }
                    if hemizygous {
                        if z_first.carries() || z_second.carries() {
                            return false;
                        }
                    } else if z_first == Zygosity::Het
                        && z_second == Zygosity::Het
                        && !in_cis(gt_first, gt_second)
                    {
                        return false;
                    }
                }
                _ => {}
            }
        }

        affected_genotyped
    }
}

/// Both genotypes phased and an ALT allele shared on the same haplotype.
fn in_cis(a: &SampleGenotype, b: &SampleGenotype) -> bool {
    a.is_phased()
        && b.is_phased()
        && a.num_calls() == b.num_calls()
        && a
            .calls()
            .iter()
            .zip(b.calls())
            .any(|(x, y)| *x == AlleleCall::Alt && *y == AlleleCall::Alt)
}
