//! Variant filtering that tolerates non-penetrant unaffected carriers.

use crate::pedigree::Pedigree;
use crate::variant::Variant;

use super::SubModeOfInheritance;
use super::segregation::{self, Penetrance};

/// Keeps the variants every affected individual carries in the form the
/// sub-mode requires. Unaffected carriers never disqualify a variant.
#[derive(Debug, Clone, Copy)]
pub struct IncompletePenetranceAlleleCalculator<'p> {
    pedigree: &'p Pedigree,
    sub_mode: SubModeOfInheritance,
}

impl<'p> IncompletePenetranceAlleleCalculator<'p> {
    pub fn new(pedigree: &'p Pedigree, sub_mode: SubModeOfInheritance) -> Self {
        Self { pedigree, sub_mode }
    }

    pub fn sub_mode(&self) -> SubModeOfInheritance {
        self.sub_mode
    }

    /// The compatible sub-list of `variants`, in input order.
    #[must_use]
    pub fn find_compatible_variants<'v>(&self, variants: &'v [Variant]) -> Vec<&'v Variant> {
        variants
            .iter()
            .filter(|variant| {
                variant.passed_filters
                    && segregation::segregates(
                        self.pedigree,
                        self.sub_mode,
                        variant,
                        Penetrance::Incomplete,
                    )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genotype::SampleGenotype;
    use crate::pedigree::{Individual, Sex, Status};

    fn trio() -> Pedigree {
        Pedigree::new([
            Individual::new("Adam", Sex::Male, Status::Unaffected),
            Individual::new("Eve", Sex::Female, Status::Unaffected),
            Individual::new("Cain", Sex::Male, Status::Affected)
                .with_father("Adam")
                .with_mother("Eve"),
        ])
        .unwrap()
    }

    fn variant(start: u32, cain: SampleGenotype, adam: SampleGenotype) -> Variant {
        Variant::new(1, start, "A", "T")
            .with_genotype("Cain", cain)
            .with_genotype("Adam", adam)
            .with_genotype("Eve", SampleGenotype::HOM_REF)
    }

    #[test]
    fn unaffected_carrier_does_not_disqualify() {
        let pedigree = trio();
        let variants = vec![
            variant(100, SampleGenotype::HET, SampleGenotype::HET),
            variant(200, SampleGenotype::HOM_REF, SampleGenotype::HET),
            variant(300, SampleGenotype::HET, SampleGenotype::HOM_REF),
        ];
        let calculator =
            IncompletePenetranceAlleleCalculator::new(&pedigree, SubModeOfInheritance::AutosomalDominant);
        let starts: Vec<u32> = calculator
            .find_compatible_variants(&variants)
            .iter()
            .map(|v| v.start)
            .collect();
        assert_eq!(starts, vec![100, 300]);
    }

    #[test]
    fn affected_no_call_rejects() {
        let pedigree = trio();
        let variants = vec![variant(100, SampleGenotype::NO_CALL, SampleGenotype::HET)];
        let calculator =
            IncompletePenetranceAlleleCalculator::new(&pedigree, SubModeOfInheritance::AutosomalDominant);
        assert!(calculator.find_compatible_variants(&variants).is_empty());
    }

    #[test]
    fn singleton_accepts_any_carried_genotype() {
        let pedigree = Pedigree::just_proband("Adam", Sex::Male);
        let variants = vec![
            Variant::new(1, 100, "A", "T").with_genotype("Adam", SampleGenotype::HET),
            Variant::new(1, 200, "A", "T").with_genotype("Adam", SampleGenotype::HOM_ALT),
            Variant::new(1, 300, "A", "T").with_genotype("Adam", SampleGenotype::HOM_REF),
        ];
        let calculator =
            IncompletePenetranceAlleleCalculator::new(&pedigree, SubModeOfInheritance::AutosomalDominant);
        assert_eq!(calculator.find_compatible_variants(&variants).len(), 2);
    }

    #[test]
    fn superset_of_complete_penetrance() {
        let pedigree = trio();
        let calls = [
            SampleGenotype::HOM_REF,
            SampleGenotype::HET,
            SampleGenotype::HOM_ALT,
            SampleGenotype::NO_CALL,
        ];
        let mut variants = Vec::new();
        for (i, cain) in calls.iter().enumerate() {
            for (j, adam) in calls.iter().enumerate() {
                let start = u32::try_from(i * calls.len() + j + 1).unwrap();
                variants.push(variant(start, cain.clone(), adam.clone()));
            }
        }
        for sub_mode in [
            SubModeOfInheritance::AutosomalDominant,
            SubModeOfInheritance::AutosomalRecessiveHomAlt,
        ] {
            let relaxed = IncompletePenetranceAlleleCalculator::new(&pedigree, sub_mode)
                .find_compatible_variants(&variants);
            for variant in &variants {
                if segregation::segregates(&pedigree, sub_mode, variant, Penetrance::Complete) {
                    assert!(relaxed.iter().any(|v| std::ptr::eq(*v, variant)));
                }
            }
        }
    }
}
