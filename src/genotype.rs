//! Per-sample genotype calls relative to a single ALT allele.

use std::borrow::Cow;
use std::fmt;

use crate::error::Error;

use AlleleCall::{Alt, NoCall, OtherAlt, Ref};

/// Call of one haplotype at a variant site, relative to the target ALT allele.
///
/// Ordering is `NoCall < Ref < OtherAlt < Alt`, which is the canonical order
/// unphased genotypes store their calls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum AlleleCall {
    NoCall = 0,
    Ref = 1,
    /// A call to a different ALT allele at a multi-allelic site.
    OtherAlt = 2,
    Alt = 3,
}

impl AlleleCall {
    /// Parse a single VCF-style allele token: `.`, `0`, `-` or `1`.
    pub fn from_vcf(token: &str) -> Result<Self, Error> {
        match token {
            "." => Ok(Self::NoCall),
            "0" => Ok(Self::Ref),
            "-" => Ok(Self::OtherAlt),
            "1" => Ok(Self::Alt),
            _ => Err(Error::Parse(format!("invalid allele call: '{token}'"))),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::NoCall => ".",
            Self::Ref => "0",
            Self::OtherAlt => "-",
            Self::Alt => "1",
        }
    }
}

impl fmt::Display for AlleleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The calls of one sample at one variant.
///
/// Unphased calls are held in canonical (sorted) order so that derived
/// equality and hashing ignore call order; phased calls keep haplotype order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleGenotype {
    calls: Cow<'static, [AlleleCall]>,
    phased: bool,
}

const fn constant(calls: &'static [AlleleCall], phased: bool) -> SampleGenotype {
    SampleGenotype {
        calls: Cow::Borrowed(calls),
        phased,
    }
}

impl SampleGenotype {
    pub const EMPTY: Self = constant(&[], false);
    pub const NO_CALL: Self = constant(&[NoCall, NoCall], false);
    pub const HOM_REF: Self = constant(&[Ref, Ref], false);
    pub const HET: Self = constant(&[Ref, Alt], false);
    pub const HOM_ALT: Self = constant(&[Alt, Alt], false);
    pub const HET_OTHER_ALT: Self = constant(&[OtherAlt, Alt], false);
    pub const HOM_OTHER_ALT: Self = constant(&[OtherAlt, OtherAlt], false);
    pub const HET_REF_OTHER_ALT: Self = constant(&[Ref, OtherAlt], false);

    pub const HAPLOID_NO_CALL: Self = constant(&[NoCall], false);
    pub const HAPLOID_REF: Self = constant(&[Ref], false);
    pub const HAPLOID_ALT: Self = constant(&[Alt], false);

    pub const HOM_REF_PHASED: Self = constant(&[Ref, Ref], true);
    pub const HET_PHASED_REF_ALT: Self = constant(&[Ref, Alt], true);
    pub const HET_PHASED_ALT_REF: Self = constant(&[Alt, Ref], true);
    pub const HOM_ALT_PHASED: Self = constant(&[Alt, Alt], true);

    /// Build an unphased genotype. Common diploid and haploid patterns resolve
    /// to the canonical constants without allocating.
    #[must_use]
    pub fn of(calls: &[AlleleCall]) -> Self {
        if let Some(canonical) = canonical_unphased(calls) {
            return canonical;
        }
        let mut sorted = calls.to_vec();
        sorted.sort_unstable();
        Self {
            calls: Cow::Owned(sorted),
            phased: false,
        }
    }

    /// Build a phased genotype, preserving haplotype order.
    ///
    /// Fewer than two calls carry no phase and yield the unphased genotype.
    #[must_use]
    pub fn phased(calls: &[AlleleCall]) -> Self {
        if calls.len() < 2 {
            return Self::of(calls);
        }
        match calls {
            [Ref, Ref] => Self::HOM_REF_PHASED,
            [Ref, Alt] => Self::HET_PHASED_REF_ALT,
            [Alt, Ref] => Self::HET_PHASED_ALT_REF,
            [Alt, Alt] => Self::HOM_ALT_PHASED,
            _ => Self {
                calls: Cow::Owned(calls.to_vec()),
                phased: true,
            },
        }
    }

    pub fn calls(&self) -> &[AlleleCall] {
        &self.calls
    }

    pub fn num_calls(&self) -> usize {
        self.calls.len()
    }

    pub fn is_phased(&self) -> bool {
        self.phased
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn is_no_call(&self) -> bool {
        self.all(NoCall)
    }

    pub fn is_hom_ref(&self) -> bool {
        self.all(Ref)
    }

    pub fn is_hom_alt(&self) -> bool {
        self.all(Alt)
    }

    /// Two or more calls with at least one pairwise difference.
    pub fn is_het(&self) -> bool {
        match self.calls.split_first() {
            Some((first, rest)) => !rest.is_empty() && rest.iter().any(|call| call != first),
            None => false,
        }
    }

    /// True if any haplotype carries the target ALT allele.
    pub fn has_alt(&self) -> bool {
        self.calls.contains(&Alt)
    }

    fn all(&self, call: AlleleCall) -> bool {
        !self.calls.is_empty() && self.calls.iter().all(|c| *c == call)
    }
}

impl Default for SampleGenotype {
    fn default() -> Self {
        Self::EMPTY
    }
}

fn canonical_unphased(calls: &[AlleleCall]) -> Option<SampleGenotype> {
    let genotype = match calls {
        [] => SampleGenotype::EMPTY,
        [NoCall] => SampleGenotype::HAPLOID_NO_CALL,
        [Ref] => SampleGenotype::HAPLOID_REF,
        [Alt] => SampleGenotype::HAPLOID_ALT,
        [NoCall, NoCall] => SampleGenotype::NO_CALL,
        [Ref, Ref] => SampleGenotype::HOM_REF,
        [Ref, Alt] | [Alt, Ref] => SampleGenotype::HET,
        [Alt, Alt] => SampleGenotype::HOM_ALT,
        [OtherAlt, Alt] | [Alt, OtherAlt] => SampleGenotype::HET_OTHER_ALT,
        [OtherAlt, OtherAlt] => SampleGenotype::HOM_OTHER_ALT,
        [Ref, OtherAlt] | [OtherAlt, Ref] => SampleGenotype::HET_REF_OTHER_ALT,
        _ => return None,
    };
    Some(genotype)
}

impl fmt::Display for SampleGenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.calls.is_empty() {
            return f.write_str("NA");
        }
        let separator = if self.phased { "|" } else { "/" };
        for (i, call) in self.calls.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            f.write_str(call.symbol())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for SampleGenotype {
    type Err = Error;

    /// Parse VCF GT syntax (`0/1`, `1|0`, `./.`, `-/1`, `1`). `NA` or an
    /// empty string is the empty genotype.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "NA" {
            return Ok(Self::EMPTY);
        }
        let phased = s.contains('|');
        if phased && s.contains('/') {
            return Err(Error::Parse(format!(
                "genotype mixes phased and unphased separators: '{s}'"
            )));
        }
        let separator = if phased { '|' } else { '/' };
        let calls = s
            .split(separator)
            .map(AlleleCall::from_vcf)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::Parse(format!("{e} in genotype '{s}'")))?;
        Ok(if phased {
            Self::phased(&calls)
        } else {
            Self::of(&calls)
        })
    }
}
