//! The per-variant segregation test shared by every sub-mode and by both
//! penetrance models.

use crate::genotype::{AlleleCall, SampleGenotype};
use crate::pedigree::{Individual, Pedigree, Sex, Status};
use crate::variant::Variant;

use super::SubModeOfInheritance;

/// Whether unaffected carriers are allowed.
///
/// Under [`Penetrance::Incomplete`] unaffected individuals never disqualify a
/// variant and dominant sub-modes accept any ALT carrier among the affected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Penetrance {
    #[default]
    Complete,
    Incomplete,
}

/// Zygosity of one genotyped individual relative to the target ALT allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zygosity {
    /// Every call is ALT, including a haploid (hemizygous) ALT call.
    HomAlt,
    /// At least one ALT call and at least one other call.
    Het,
    /// No ALT and no missing calls.
    NonCarrier,
    /// No ALT call, but at least one call is missing.
    Unknown,
}

impl Zygosity {
    pub fn of(genotype: &SampleGenotype) -> Self {
        if genotype.is_hom_alt() {
            Self::HomAlt
        } else if genotype.has_alt() {
            Self::Het
        } else if genotype.calls().contains(&AlleleCall::NoCall) {
            Self::Unknown
        } else {
            Self::NonCarrier
        }
    }

    pub fn carries(self) -> bool {
        matches!(self, Self::HomAlt | Self::Het)
    }
}

/// Test whether `variant` segregates with the affection status in `pedigree`
/// under `sub_mode`.
///
/// Individuals without a genotype for the variant are skipped. At least one
/// affected individual must be genotyped, and every genotyped affected
/// individual must satisfy the sub-mode's zygosity rule. Under complete
/// penetrance every genotyped unaffected individual must also lack the
/// disease genotype. For the comp-het sub-modes this is the single-variant
/// precondition; pairing is done by the comp-het calculator.
#[must_use]
pub fn segregates(
    pedigree: &Pedigree,
    sub_mode: SubModeOfInheritance,
    variant: &Variant,
    penetrance: Penetrance,
) -> bool {
    if let Some(required) = sub_mode.chromosome_type()
        && variant.chromosome_type() != required
    {
        return false;
    }

    if sub_mode == SubModeOfInheritance::Any {
        return pedigree.individuals().iter().any(|individual| {
            variant
                .genotype(individual.id())
                .is_some_and(SampleGenotype::has_alt)
        });
    }

    let singleton = pedigree.is_singleton();
    let mut affected_genotyped = false;

    for individual in pedigree.individuals() {
        let Some(genotype) = variant.genotype(individual.id()) else {
            continue;
        };
        let zygosity = Zygosity::of(genotype);

        match individual.status() {
            Status::Affected => {
                // A lone, unphased heterozygote is unconstrained by relatives
                // and may equally be a recessive case. A second, different
                // ALT allele rules out a missed hom-alt call.
                let ambiguous_het = singleton
                    && !genotype.is_phased()
                    && !genotype.calls().contains(&AlleleCall::OtherAlt);
                if !affected_compatible(
                    sub_mode,
                    individual.sex(),
                    zygosity,
                    penetrance,
                    ambiguous_het,
                ) {
                    return false;
                }
                if sub_mode == SubModeOfInheritance::Mitochondrial
                    && !mother_may_carry(pedigree, individual, variant)
                {
                    return false;
                }
                affected_genotyped = true;
            }
            Status::Unaffected if penetrance == Penetrance::Complete => {
                if !unaffected_compatible(sub_mode, individual.sex(), zygosity) {
                    return false;
                }
            }
            _ => {}
        }
    }

    affected_genotyped
}

/// The zygosity rule for an affected individual.
///
/// Males are hemizygous on X, so any ALT call (including a diploid het call)
/// counts as the full disease genotype for X-linked sub-modes.
pub fn affected_compatible(
    sub_mode: SubModeOfInheritance,
    sex: Sex,
    zygosity: Zygosity,
    penetrance: Penetrance,
    ambiguous_het: bool,
) -> bool {
    use SubModeOfInheritance as S;

    let hemizygous = sex == Sex::Male;
    let relaxed = penetrance == Penetrance::Incomplete;

    match sub_mode {
        S::AutosomalDominant if relaxed => zygosity.carries(),
        S::AutosomalDominant => zygosity == Zygosity::Het,
        S::XDominant if hemizygous || relaxed => zygosity.carries(),
        S::XDominant => zygosity == Zygosity::Het,
        S::XRecessiveHomAlt | S::XRecessiveCompHet if hemizygous => zygosity.carries(),
        S::AutosomalRecessiveHomAlt | S::XRecessiveHomAlt => {
            zygosity == Zygosity::HomAlt || (ambiguous_het && zygosity == Zygosity::Het)
        }
        S::AutosomalRecessiveCompHet | S::XRecessiveCompHet => zygosity == Zygosity::Het,
        S::Mitochondrial | S::Any => zygosity.carries(),
    }
}

/// The zygosity rule for an unaffected individual under complete penetrance.
pub fn unaffected_compatible(sub_mode: SubModeOfInheritance, sex: Sex, zygosity: Zygosity) -> bool {
    use SubModeOfInheritance as S;

    match sub_mode {
        S::AutosomalDominant | S::XDominant => !zygosity.carries(),
        S::XRecessiveHomAlt | S::XRecessiveCompHet if sex == Sex::Male => !zygosity.carries(),
        S::Any => true,
        _ => zygosity != Zygosity::HomAlt,
    }
}

/// Maternal transmission: a genotyped mother must carry the ALT allele.
/// Missing calls cannot refute transmission.
fn mother_may_carry(pedigree: &Pedigree, individual: &Individual, variant: &Variant) -> bool {
    let Some(genotype) = pedigree
        .mother_of(individual)
        .and_then(|mother| variant.genotype(mother.id()))
    else {
        return true;
    };
    match Zygosity::of(genotype) {
        Zygosity::Unknown => true,
        zygosity => zygosity.carries(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contig;

    use SubModeOfInheritance as S;

    fn adam() -> Pedigree {
        Pedigree::just_proband("Adam", Sex::Male)
    }

    fn eve() -> Pedigree {
        Pedigree::just_proband("Eve", Sex::Female)
    }

    fn trio(child_status: Status) -> Pedigree {
        Pedigree::new([
            Individual::new("Adam", Sex::Male, Status::Unaffected),
            Individual::new("Eve", Sex::Female, Status::Unaffected),
            Individual::new("Cain", Sex::Male, child_status)
                .with_father("Adam")
                .with_mother("Eve"),
        ])
        .unwrap()
    }

    fn autosomal(genotypes: &[(&str, SampleGenotype)]) -> Variant {
        on_contig(1, genotypes)
    }

    fn on_contig(contig: u8, genotypes: &[(&str, SampleGenotype)]) -> Variant {
        genotypes
            .iter()
            .fold(Variant::new(contig, 12345, "A", "T"), |v, (id, gt)| {
                v.with_genotype(*id, gt.clone())
            })
    }

    fn compatible(pedigree: &Pedigree, variant: &Variant, penetrance: Penetrance) -> Vec<S> {
        S::ALL
            .into_iter()
            .filter(|&s| segregates(pedigree, s, variant, penetrance))
            .collect()
    }

    #[test]
    fn zygosity_classification() {
        assert_eq!(Zygosity::of(&SampleGenotype::HOM_ALT), Zygosity::HomAlt);
        assert_eq!(Zygosity::of(&SampleGenotype::HAPLOID_ALT), Zygosity::HomAlt);
        assert_eq!(Zygosity::of(&SampleGenotype::HET), Zygosity::Het);
        assert_eq!(Zygosity::of(&SampleGenotype::HET_OTHER_ALT), Zygosity::Het);
        assert_eq!(Zygosity::of(&SampleGenotype::HOM_REF), Zygosity::NonCarrier);
        assert_eq!(
            Zygosity::of(&SampleGenotype::HOM_OTHER_ALT),
            Zygosity::NonCarrier
        );
        assert_eq!(Zygosity::of(&SampleGenotype::NO_CALL), Zygosity::Unknown);
    }

    #[test]
    fn singleton_phased_het_is_not_hom_alt_recessive() {
        let variant = autosomal(&[("Adam", SampleGenotype::HET_PHASED_REF_ALT)]);
        assert_eq!(
            compatible(&adam(), &variant, Penetrance::Complete),
            vec![S::AutosomalDominant, S::AutosomalRecessiveCompHet, S::Any]
        );
    }

    #[test]
    fn singleton_unphased_het_is_dominant_and_recessive() {
        let variant = autosomal(&[("Adam", SampleGenotype::HET)]);
        let modes = compatible(&adam(), &variant, Penetrance::Complete);
        assert!(modes.contains(&S::AutosomalDominant));
        assert!(modes.contains(&S::AutosomalRecessiveHomAlt));
    }

    #[test]
    fn singleton_het_with_other_alt_is_not_hom_alt_recessive() {
        let variant = autosomal(&[("Adam", SampleGenotype::HET_OTHER_ALT)]);
        let modes = compatible(&adam(), &variant, Penetrance::Complete);
        assert!(modes.contains(&S::AutosomalDominant));
        assert!(!modes.contains(&S::AutosomalRecessiveHomAlt));

        let half_called = SampleGenotype::of(&[AlleleCall::NoCall, AlleleCall::Alt]);
        let variant = autosomal(&[("Adam", half_called)]);
        assert!(segregates(&adam(), S::AutosomalRecessiveHomAlt, &variant, Penetrance::Complete));
    }

    #[test]
    fn singleton_hom_alt_is_recessive_only() {
        let variant = autosomal(&[("Adam", SampleGenotype::HOM_ALT)]);
        assert_eq!(
            compatible(&adam(), &variant, Penetrance::Complete),
            vec![S::AutosomalRecessiveHomAlt, S::Any]
        );
    }

    #[test]
    fn hom_ref_is_never_compatible() {
        for gt in [SampleGenotype::HOM_REF, SampleGenotype::HOM_REF_PHASED] {
            for contig in [1, contig::X, contig::MT] {
                let variant = on_contig(contig, &[("Adam", gt.clone())]);
                assert!(compatible(&adam(), &variant, Penetrance::Complete).is_empty());
                assert!(compatible(&adam(), &variant, Penetrance::Incomplete).is_empty());
            }
        }
    }

    #[test]
    fn no_genotyped_individuals() {
        let variant = autosomal(&[("Stranger", SampleGenotype::HET)]);
        assert!(compatible(&adam(), &variant, Penetrance::Complete).is_empty());
        let variant = autosomal(&[("Adam", SampleGenotype::EMPTY)]);
        assert!(compatible(&adam(), &variant, Penetrance::Complete).is_empty());
    }

    #[test]
    fn affected_no_call_fails() {
        let variant = autosomal(&[("Adam", SampleGenotype::NO_CALL)]);
        assert!(compatible(&adam(), &variant, Penetrance::Complete).is_empty());
    }

    #[test]
    fn de_novo_dominant_in_trio() {
        let variant = autosomal(&[
            ("Adam", SampleGenotype::HOM_REF),
            ("Eve", SampleGenotype::HOM_REF),
            ("Cain", SampleGenotype::HET),
        ]);
        let pedigree = trio(Status::Affected);
        assert!(segregates(&pedigree, S::AutosomalDominant, &variant, Penetrance::Complete));
        assert!(!segregates(&pedigree, S::AutosomalRecessiveHomAlt, &variant, Penetrance::Complete));
    }

    #[test]
    fn unaffected_carrier_blocks_dominant_unless_incomplete() {
        let variant = autosomal(&[
            ("Adam", SampleGenotype::HET),
            ("Eve", SampleGenotype::HOM_REF),
            ("Cain", SampleGenotype::HET),
        ]);
        let pedigree = trio(Status::Affected);
        assert!(!segregates(&pedigree, S::AutosomalDominant, &variant, Penetrance::Complete));
        assert!(segregates(&pedigree, S::AutosomalDominant, &variant, Penetrance::Incomplete));
    }

    #[test]
    fn recessive_with_carrier_parents() {
        let variant = autosomal(&[
            ("Adam", SampleGenotype::HET),
            ("Eve", SampleGenotype::HET),
            ("Cain", SampleGenotype::HOM_ALT),
        ]);
        let pedigree = trio(Status::Affected);
        assert!(segregates(&pedigree, S::AutosomalRecessiveHomAlt, &variant, Penetrance::Complete));
        assert!(!segregates(&pedigree, S::AutosomalDominant, &variant, Penetrance::Complete));
    }

    #[test]
    fn unaffected_hom_alt_blocks_recessive() {
        let variant = autosomal(&[
            ("Adam", SampleGenotype::HOM_ALT),
            ("Eve", SampleGenotype::HET),
            ("Cain", SampleGenotype::HOM_ALT),
        ]);
        let pedigree = trio(Status::Affected);
        assert!(!segregates(&pedigree, S::AutosomalRecessiveHomAlt, &variant, Penetrance::Complete));
        assert!(segregates(&pedigree, S::AutosomalRecessiveHomAlt, &variant, Penetrance::Incomplete));
    }

    #[test]
    fn unaffected_no_call_does_not_refute() {
        let variant = autosomal(&[
            ("Adam", SampleGenotype::NO_CALL),
            ("Cain", SampleGenotype::HET),
        ]);
        assert!(segregates(
            &trio(Status::Affected),
            S::AutosomalDominant,
            &variant,
            Penetrance::Complete
        ));
    }

    #[test]
    fn singleton_x_het_male_is_dominant_and_recessive() {
        let variant = on_contig(contig::X, &[("Adam", SampleGenotype::HET)]);
        let modes = compatible(&adam(), &variant, Penetrance::Complete);
        assert!(modes.contains(&S::XDominant));
        assert!(modes.contains(&S::XRecessiveHomAlt));
        assert!(!modes.contains(&S::AutosomalDominant));
    }

    #[test]
    fn female_x_rules() {
        let het = on_contig(contig::X, &[("Eve", SampleGenotype::HET_PHASED_REF_ALT)]);
        assert!(segregates(&eve(), S::XDominant, &het, Penetrance::Complete));
        assert!(!segregates(&eve(), S::XRecessiveHomAlt, &het, Penetrance::Complete));

        let hom = on_contig(contig::X, &[("Eve", SampleGenotype::HOM_ALT)]);
        assert!(!segregates(&eve(), S::XDominant, &hom, Penetrance::Complete));
        assert!(segregates(&eve(), S::XDominant, &hom, Penetrance::Incomplete));
        assert!(segregates(&eve(), S::XRecessiveHomAlt, &hom, Penetrance::Complete));
    }

    #[test]
    fn x_dominant_unaffected_carrier_father_of_affected_daughter() {
        let pedigree = Pedigree::new([
            Individual::new("Adam", Sex::Male, Status::Unaffected),
            Individual::new("Eve", Sex::Female, Status::Unaffected),
            Individual::new("Dinah", Sex::Female, Status::Affected)
                .with_father("Adam")
                .with_mother("Eve"),
        ])
        .unwrap();
        let with_father = |father: SampleGenotype| {
            on_contig(
                contig::X,
                &[
                    ("Adam", father),
                    ("Eve", SampleGenotype::HOM_REF),
                    ("Dinah", SampleGenotype::HET),
                ],
            )
        };

        let carrier = with_father(SampleGenotype::HAPLOID_ALT);
        assert!(!segregates(&pedigree, S::XDominant, &carrier, Penetrance::Complete));
        assert!(segregates(&pedigree, S::XDominant, &carrier, Penetrance::Incomplete));

        let non_carrier = with_father(SampleGenotype::HAPLOID_REF);
        assert!(segregates(&pedigree, S::XDominant, &non_carrier, Penetrance::Complete));
    }

    #[test]
    fn x_recessive_unaffected_male_carrier_blocks() {
        let variant = on_contig(
            contig::X,
            &[
                ("Adam", SampleGenotype::HAPLOID_ALT),
                ("Eve", SampleGenotype::HET),
                ("Cain", SampleGenotype::HAPLOID_ALT),
            ],
        );
        let pedigree = trio(Status::Affected);
        assert!(!segregates(&pedigree, S::XRecessiveHomAlt, &variant, Penetrance::Complete));

        let variant = on_contig(
            contig::X,
            &[
                ("Adam", SampleGenotype::HAPLOID_REF),
                ("Eve", SampleGenotype::HET),
                ("Cain", SampleGenotype::HAPLOID_ALT),
            ],
        );
        assert!(segregates(&pedigree, S::XRecessiveHomAlt, &variant, Penetrance::Complete));
        assert!(!segregates(&pedigree, S::XDominant, &variant, Penetrance::Complete));
    }

    #[test]
    fn mitochondrial_requires_carrier_mother() {
        let pedigree = trio(Status::Affected);
        let maternal = on_contig(
            contig::MT,
            &[
                ("Adam", SampleGenotype::HOM_REF),
                ("Eve", SampleGenotype::HET),
                ("Cain", SampleGenotype::HOM_ALT),
            ],
        );
        assert!(segregates(&pedigree, S::Mitochondrial, &maternal, Penetrance::Complete));

        let paternal = on_contig(
            contig::MT,
            &[
                ("Adam", SampleGenotype::HET),
                ("Eve", SampleGenotype::HOM_REF),
                ("Cain", SampleGenotype::HOM_ALT),
            ],
        );
        assert!(!segregates(&pedigree, S::Mitochondrial, &paternal, Penetrance::Complete));
        assert!(!segregates(&pedigree, S::Mitochondrial, &paternal, Penetrance::Incomplete));

        let mother_missing = on_contig(contig::MT, &[("Cain", SampleGenotype::HOM_ALT)]);
        assert!(segregates(&pedigree, S::Mitochondrial, &mother_missing, Penetrance::Complete));
    }

    #[test]
    fn modes_restricted_to_chromosome_class() {
        let y = on_contig(contig::Y, &[("Adam", SampleGenotype::HAPLOID_ALT)]);
        assert_eq!(
            compatible(&adam(), &y, Penetrance::Complete),
            vec![S::Any]
        );
    }

    #[test]
    fn incomplete_penetrance_is_a_superset() {
        let pedigree = trio(Status::Affected);
        let genotypes = [
            SampleGenotype::HOM_REF,
            SampleGenotype::HET,
            SampleGenotype::HOM_ALT,
            SampleGenotype::NO_CALL,
            SampleGenotype::HET_OTHER_ALT,
        ];
        for adam_gt in &genotypes {
            for eve_gt in &genotypes {
                for cain_gt in &genotypes {
                    for contig in [1, contig::X, contig::MT] {
                        let variant = on_contig(
                            contig,
                            &[
                                ("Adam", adam_gt.clone()),
                                ("Eve", eve_gt.clone()),
                                ("Cain", cain_gt.clone()),
                            ],
                        );
                        for sub_mode in S::ALL {
                            if segregates(&pedigree, sub_mode, &variant, Penetrance::Complete) {
                                assert!(segregates(
                                    &pedigree,
                                    sub_mode,
                                    &variant,
                                    Penetrance::Incomplete
                                ));
                            }
                        }
                    }
                }
            }
        }
    }
}
