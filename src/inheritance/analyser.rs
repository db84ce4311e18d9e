//! Gene-at-a-time analysis, run across genes in parallel.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use rayon::prelude::*;

use crate::variant::{Variant, VariantKey};

use super::ModeOfInheritance;
use super::annotator::{InheritanceModeAnnotation, InheritanceModeAnnotator};

#[derive(Debug, Clone, Default)]
struct GeneState {
    compatible_modes: BTreeSet<ModeOfInheritance>,
    variant_modes: BTreeMap<VariantKey, BTreeSet<ModeOfInheritance>>,
    comp_het_pairs: Vec<(VariantKey, VariantKey)>,
    mode_scores: BTreeMap<ModeOfInheritance, f64>,
}

/// One gene's variants plus the results computed for them.
///
/// Results may be recorded from several workers at once, so they sit
/// behind a mutex. The variants themselves are immutable.
#[derive(Debug)]
pub struct Gene {
    symbol: String,
    variants: Vec<Variant>,
    state: Mutex<GeneState>,
}

impl Gene {
    pub fn new(symbol: impl Into<String>, variants: Vec<Variant>) -> Self {
        Self {
            symbol: symbol.into(),
            variants,
            state: Mutex::new(GeneState::default()),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    fn state(&self) -> MutexGuard<'_, GeneState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store an annotation of this gene's variants, replacing any earlier one.
    pub fn record_annotation(&self, annotation: &InheritanceModeAnnotation<'_>) {
        let mut state = self.state();
        state.compatible_modes = annotation.compatible_modes();
        state.variant_modes = annotation.variant_modes.clone();
        state.comp_het_pairs = annotation
            .comp_het_pairs
            .values()
            .flatten()
            .map(|pair| pair.keys())
            .collect();
    }

    /// Record a score for `mode`. A later score for the same mode replaces
    /// the earlier one.
    pub fn add_mode_score(&self, mode: ModeOfInheritance, score: f64) {
        self.state().mode_scores.insert(mode, score);
    }

    pub fn mode_score(&self, mode: ModeOfInheritance) -> Option<f64> {
        self.state().mode_scores.get(&mode).copied()
    }

    /// The highest recorded score over all modes.
    pub fn best_mode_score(&self) -> Option<(ModeOfInheritance, f64)> {
        self.state()
            .mode_scores
            .iter()
            .map(|(&mode, &score)| (mode, score))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn compatible_modes(&self) -> BTreeSet<ModeOfInheritance> {
        self.state().compatible_modes.clone()
    }

    pub fn is_compatible_with(&self, mode: ModeOfInheritance) -> bool {
        self.state().compatible_modes.contains(&mode)
    }

    pub fn variant_modes(&self, variant: &Variant) -> BTreeSet<ModeOfInheritance> {
        self.state()
            .variant_modes
            .get(&variant.key())
            .cloned()
            .unwrap_or_default()
    }

    pub fn comp_het_pairs(&self) -> Vec<(VariantKey, VariantKey)> {
        self.state().comp_het_pairs.clone()
    }
}

/// Group variants by gene symbol. Genes come back in symbol order and each
/// keeps its variants in input order.
#[must_use]
pub fn group_by_gene(variants: impl IntoIterator<Item = Variant>) -> Vec<Gene> {
    let mut by_symbol: BTreeMap<String, Vec<Variant>> = BTreeMap::new();
    for variant in variants {
        by_symbol
            .entry(variant.gene_symbol.clone())
            .or_default()
            .push(variant);
    }
    by_symbol
        .into_iter()
        .map(|(symbol, variants)| Gene::new(symbol, variants))
        .collect()
}

/// Runs an [`InheritanceModeAnnotator`] over many genes.
#[derive(Debug, Clone, Copy)]
pub struct InheritanceModeAnalyser<'p> {
    annotator: InheritanceModeAnnotator<'p>,
}

impl<'p> InheritanceModeAnalyser<'p> {
    pub fn new(annotator: InheritanceModeAnnotator<'p>) -> Self {
        Self { annotator }
    }

    pub fn analyse_gene(&self, gene: &Gene) {
        let annotation = self.annotator.annotate(gene.variants());
        debug!(
            "{}: {} variants, compatible with {:?}",
            gene.symbol(),
            gene.variants().len(),
            annotation.compatible_modes()
        );
        gene.record_annotation(&annotation);
    }

    /// Annotate every gene in parallel. Returns the number of genes
    /// compatible with at least one mode.
    pub fn analyse_genes(&self, genes: &[Gene]) -> usize {
        genes.par_iter().for_each(|gene| self.analyse_gene(gene));

        let compatible = genes
            .iter()
            .filter(|gene| !gene.compatible_modes().is_empty())
            .count();
        info!(
            "{compatible} of {} genes compatible with at least one mode of inheritance",
            genes.len()
        );
        compatible
    }
}
