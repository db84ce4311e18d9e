//! Annotated variant calls as consumed by the inheritance engine.

use std::collections::BTreeMap;
use std::fmt;

use crate::contig::{self, ChromosomeType};
use crate::frequency::FrequencyData;
use crate::genotype::SampleGenotype;

/// Identity of a variant: contig, start, REF and ALT.
///
/// Field order gives the genomic sort order used for deterministic output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariantKey {
    pub contig: u8,
    pub start: u32,
    pub ref_allele: String,
    pub alt_allele: String,
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            contig::name_of(self.contig),
            self.start,
            self.ref_allele,
            self.alt_allele
        )
    }
}

/// A variant with its per-sample genotypes and population frequencies.
///
/// Produced by an upstream annotator; the inheritance engine only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub contig: u8,
    /// 1-based start.
    pub start: u32,
    /// 1-based inclusive end.
    pub end: u32,
    pub ref_allele: String,
    pub alt_allele: String,
    pub gene_symbol: String,
    pub sample_genotypes: BTreeMap<String, SampleGenotype>,
    pub sample_copy_numbers: BTreeMap<String, u32>,
    pub frequency_data: FrequencyData,
    /// Whitelisted variants bypass frequency ceilings.
    pub whitelisted: bool,
    pub passed_filters: bool,
}

impl Variant {
    /// A variant whose end is derived from the REF length.
    pub fn new(
        contig: u8,
        start: u32,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> Self {
        let ref_allele = ref_allele.into();
        let ref_len = u32::try_from(ref_allele.len()).unwrap_or(u32::MAX);
        let end = start.saturating_add(ref_len.saturating_sub(1));
        Self {
            contig,
            start,
            end,
            ref_allele,
            alt_allele: alt_allele.into(),
            gene_symbol: String::new(),
            sample_genotypes: BTreeMap::new(),
            sample_copy_numbers: BTreeMap::new(),
            frequency_data: FrequencyData::empty(),
            whitelisted: false,
            passed_filters: true,
        }
    }

    /// Override the end, e.g. for symbolic structural variants.
    #[must_use]
    pub fn with_end(mut self, end: u32) -> Self {
        self.end = end.max(self.start);
        self
    }

    #[must_use]
    pub fn with_gene(mut self, gene_symbol: impl Into<String>) -> Self {
        self.gene_symbol = gene_symbol.into();
        self
    }

    #[must_use]
    pub fn with_genotype(mut self, sample: impl Into<String>, genotype: SampleGenotype) -> Self {
        self.sample_genotypes.insert(sample.into(), genotype);
        self
    }

    #[must_use]
    pub fn with_copy_number(mut self, sample: impl Into<String>, copy_number: u32) -> Self {
        self.sample_copy_numbers.insert(sample.into(), copy_number);
        self
    }

    #[must_use]
    pub fn with_frequency_data(mut self, frequency_data: FrequencyData) -> Self {
        self.frequency_data = frequency_data;
        self
    }

    #[must_use]
    pub fn with_whitelisted(mut self, whitelisted: bool) -> Self {
        self.whitelisted = whitelisted;
        self
    }

    #[must_use]
    pub fn with_passed_filters(mut self, passed_filters: bool) -> Self {
        self.passed_filters = passed_filters;
        self
    }

    pub fn key(&self) -> VariantKey {
        VariantKey {
            contig: self.contig,
            start: self.start,
            ref_allele: self.ref_allele.clone(),
            alt_allele: self.alt_allele.clone(),
        }
    }

    /// The genotype of `sample`, or `None` if the sample was not genotyped.
    /// An empty genotype is reported as not genotyped.
    pub fn genotype(&self, sample: &str) -> Option<&SampleGenotype> {
        self.sample_genotypes
            .get(sample)
            .filter(|genotype| !genotype.is_empty())
    }

    pub fn copy_number(&self, sample: &str) -> Option<u32> {
        self.sample_copy_numbers.get(sample).copied()
    }

    pub fn chromosome_type(&self) -> ChromosomeType {
        ChromosomeType::of(self.contig)
    }

    pub fn max_freq(&self) -> f32 {
        self.frequency_data.max_freq()
    }

    pub fn length(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Genomic comparison on (contig, start, ref, alt) without allocating keys.
    pub fn genomic_cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.contig, self.start, &self.ref_allele, &self.alt_allele).cmp(&(
            other.contig,
            other.start,
            &other.ref_allele,
            &other.alt_allele,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{Frequency, FrequencySource};

    #[test]
    fn end_from_ref_length() {
        assert_eq!(Variant::new(1, 100, "A", "T").end, 100);
        assert_eq!(Variant::new(1, 100, "ACG", "A").end, 102);
        assert_eq!(Variant::new(1, 100, "ACG", "A").length(), 3);
        assert_eq!(Variant::new(1, 100, "A", "<DEL>").with_end(500).end, 500);
        assert_eq!(Variant::new(1, 100, "A", "<DEL>").with_end(50).end, 100);
    }

    #[test]
    fn empty_genotype_is_not_genotyped() {
        let variant = Variant::new(1, 12345, "A", "T")
            .with_genotype("Adam", SampleGenotype::EMPTY)
            .with_genotype("Eve", SampleGenotype::NO_CALL);
        assert!(variant.genotype("Adam").is_none());
        assert_eq!(variant.genotype("Eve"), Some(&SampleGenotype::NO_CALL));
        assert!(variant.genotype("Cain").is_none());
    }

    #[test]
    fn key_and_ordering() {
        let a = Variant::new(1, 200, "A", "T");
        let b = Variant::new(1, 100, "G", "C");
        let c = Variant::new(1, 100, "G", "A");
        assert_eq!(a.genomic_cmp(&b), std::cmp::Ordering::Greater);
        assert_eq!(b.genomic_cmp(&c), std::cmp::Ordering::Greater);
        assert!(c.key() < b.key());
        assert_eq!(a.key().to_string(), "1-200-A-T");
    }

    #[test]
    fn frequencies_and_copy_numbers() {
        let variant = Variant::new(contig::X, 5, "A", "T")
            .with_copy_number("Adam", 1)
            .with_frequency_data(FrequencyData::new(vec![Frequency::new(
                FrequencySource::Local,
                0.5,
            )]));
        assert_eq!(variant.copy_number("Adam"), Some(1));
        assert_eq!(variant.max_freq(), 0.5);
        assert_eq!(variant.chromosome_type(), ChromosomeType::XLinked);
    }
}
