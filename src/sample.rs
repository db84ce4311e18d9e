//! Binding genotype sample columns to pedigree members.

use std::collections::HashSet;

use crate::error::Error;
use crate::pedigree::Pedigree;

/// A genotyped sample and its zero-based column in the genotype data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleIdentifier {
    pub id: String,
    pub genotype_position: usize,
}

/// Check the declared sample columns against the pedigree and proband.
///
/// Runs before any compatibility computation so that mismatches surface as
/// errors rather than as silently empty results. An empty pedigree is only
/// accepted for single-sample data.
pub fn bind_samples<S: AsRef<str>>(
    pedigree: &Pedigree,
    proband_id: &str,
    sample_names: &[S],
) -> Result<Vec<SampleIdentifier>, Error> {
    if proband_id.trim().is_empty() {
        return Err(Error::Sample("proband id must not be blank".to_string()));
    }

    let mut seen = HashSet::with_capacity(sample_names.len());
    for name in sample_names {
        let name = name.as_ref();
        if !seen.insert(name) {
            return Err(Error::Sample(format!("duplicate sample name: '{name}'")));
        }
    }

    if !seen.contains(proband_id) {
        return Err(Error::Sample(format!(
            "proband '{proband_id}' not found among genotyped samples"
        )));
    }

    if pedigree.is_empty() {
        if sample_names.len() > 1 {
            return Err(Error::Sample(format!(
                "{} genotyped samples but no pedigree was supplied",
                sample_names.len()
            )));
        }
    } else {
        if !pedigree.contains(proband_id) {
            return Err(Error::Sample(format!(
                "proband '{proband_id}' not found in pedigree"
            )));
        }
        let missing: Vec<&str> = sample_names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !pedigree.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(Error::Sample(format!(
                "samples not found in pedigree: {}",
                missing.join(", ")
            )));
        }
    }

    Ok(sample_names
        .iter()
        .enumerate()
        .map(|(genotype_position, name)| SampleIdentifier {
            id: name.as_ref().to_string(),
            genotype_position,
        })
        .collect())
}
