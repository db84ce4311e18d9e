//! Cohort files: pedigree, sample columns and annotated variants as JSON,
//! optionally gzip-compressed.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use serde::Deserialize;

use crate::contig;
use crate::frequency::{Frequency, FrequencyData, FrequencySource};
use crate::genotype::SampleGenotype;
use crate::pedigree::{Individual, Pedigree, Sex, Status};
use crate::region::index::ChromosomalRegionIndex;
use crate::region::{GeneticInterval, TopologicalDomain};
use crate::sample::{self, SampleIdentifier};
use crate::variant::Variant;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CohortRecord {
    proband: Option<String>,
    #[serde(default)]
    proband_sex: Sex,
    samples: Vec<String>,
    #[serde(default)]
    pedigree: Vec<IndividualRecord>,
    #[serde(default)]
    variants: Vec<VariantRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndividualRecord {
    #[serde(default)]
    family: String,
    id: String,
    father: Option<String>,
    mother: Option<String>,
    #[serde(default)]
    sex: Sex,
    #[serde(default)]
    status: Status,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantRecord {
    contig: String,
    start: u32,
    end: Option<u32>,
    #[serde(rename = "ref")]
    ref_allele: String,
    #[serde(rename = "alt")]
    alt_allele: String,
    #[serde(default)]
    gene: String,
    /// One entry per sample column, in column order.
    genotypes: Vec<String>,
    #[serde(default)]
    copy_numbers: Vec<Option<u32>>,
    /// Percentages keyed by source.
    #[serde(default)]
    frequencies: BTreeMap<FrequencySource, f32>,
    #[serde(default)]
    whitelisted: bool,
    #[serde(default = "default_passed_filters")]
    passed_filters: bool,
}

fn default_passed_filters() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct DomainRecord {
    contig: String,
    start: u32,
    end: u32,
    #[serde(default)]
    genes: BTreeMap<String, String>,
}

/// A validated cohort, ready for analysis.
#[derive(Debug)]
pub struct Cohort {
    pub proband: String,
    pub pedigree: Pedigree,
    pub samples: Vec<SampleIdentifier>,
    pub variants: Vec<Variant>,
}

/// Load a cohort file. Files ending in `.gz` are decompressed.
/// `proband` overrides the proband named in the file.
pub fn load_cohort(path: &Path, proband: Option<&str>) -> Result<Cohort> {
    let file = File::open(path)
        .with_context(|| format!("failed to open cohort file: {}", path.display()))?;
    let is_gz = path.extension().is_some_and(|ext| ext == "gz");

    let cohort = if is_gz {
        read_cohort(BufReader::new(GzDecoder::new(file)), proband)
    } else {
        read_cohort(BufReader::new(file), proband)
    };
    cohort.with_context(|| format!("invalid cohort file: {}", path.display()))
}

pub fn read_cohort<R: Read>(reader: R, proband: Option<&str>) -> Result<Cohort> {
    let record: CohortRecord =
        serde_json::from_reader(reader).context("failed to parse cohort JSON")?;

    let proband = match (proband, &record.proband, record.samples.as_slice()) {
        (Some(id), _, _) => id.to_string(),
        (None, Some(id), _) => id.clone(),
        (None, None, [only]) => only.clone(),
        (None, None, _) => bail!("no proband given and the cohort has more than one sample"),
    };

    let pedigree = Pedigree::new(record.pedigree.into_iter().map(IndividualRecord::into_individual))?;
    let samples = sample::bind_samples(&pedigree, &proband, &record.samples)?;
    let pedigree = if pedigree.is_empty() {
        Pedigree::just_proband(proband.clone(), record.proband_sex)
    } else {
        pedigree
    };

    let variants = record
        .variants
        .into_iter()
        .enumerate()
        .map(|(i, variant)| {
            variant
                .into_variant(&samples)
                .with_context(|| format!("variant record {}", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Cohort {
        proband,
        pedigree,
        samples,
        variants,
    })
}

/// Load topological domains from a JSON array (optionally gzipped) of
/// `{ "contig", "start", "end", "genes": { symbol: gene id } }` records.
pub fn load_topological_domains(path: &Path) -> Result<ChromosomalRegionIndex<TopologicalDomain>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open domain file: {}", path.display()))?;
    let records: Vec<DomainRecord> = if path.extension().is_some_and(|ext| ext == "gz") {
        serde_json::from_reader(BufReader::new(GzDecoder::new(file)))
    } else {
        serde_json::from_reader(BufReader::new(file))
    }
    .with_context(|| format!("failed to parse domain file: {}", path.display()))?;

    let domains = records
        .into_iter()
        .map(|record| -> Result<TopologicalDomain> {
            let contig = contig::id_from_name(&record.contig)?;
            let interval = GeneticInterval::new(contig, record.start, record.end)?;
            Ok(TopologicalDomain::new(interval, record.genes))
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid domain in {}", path.display()))?;

    Ok(ChromosomalRegionIndex::new(domains))
}

impl IndividualRecord {
    fn into_individual(self) -> Individual {
        let mut individual = Individual::new(self.id, self.sex, self.status).with_family(self.family);
        if let Some(father) = self.father {
            individual = individual.with_father(father);
        }
        if let Some(mother) = self.mother {
            individual = individual.with_mother(mother);
        }
        individual
    }
}

impl VariantRecord {
    fn into_variant(self, samples: &[SampleIdentifier]) -> Result<Variant> {
        if self.genotypes.len() != samples.len() {
            bail!(
                "{} genotypes for {} samples",
                self.genotypes.len(),
                samples.len()
            );
        }
        if !self.copy_numbers.is_empty() && self.copy_numbers.len() != samples.len() {
            bail!(
                "{} copy numbers for {} samples",
                self.copy_numbers.len(),
                samples.len()
            );
        }

        let contig = contig::id_from_name(&self.contig)?;
        let mut variant = Variant::new(contig, self.start, self.ref_allele, self.alt_allele)
            .with_gene(self.gene)
            .with_whitelisted(self.whitelisted)
            .with_passed_filters(self.passed_filters)
            .with_frequency_data(FrequencyData::new(
                self.frequencies
                    .into_iter()
                    .map(|(source, percent)| Frequency::new(source, percent))
                    .collect(),
            ));
        if let Some(end) = self.end {
            variant = variant.with_end(end);
        }

        for sample in samples {
            let text = &self.genotypes[sample.genotype_position];
            let genotype: SampleGenotype = text
                .parse()
                .with_context(|| format!("genotype of sample '{}'", sample.id))?;
            variant = variant.with_genotype(sample.id.clone(), genotype);

            if let Some(Some(copy_number)) = self.copy_numbers.get(sample.genotype_position) {
                variant = variant.with_copy_number(sample.id.clone(), *copy_number);
            }
        }

        Ok(variant)
    }
}
