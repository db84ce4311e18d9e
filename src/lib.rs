//! Mendelian: inheritance-mode compatibility for variants observed in a pedigree.

pub mod error;

pub mod cli;
pub mod config;
pub mod contig;
pub mod frequency;
pub mod genotype;
pub mod inheritance;
pub mod input;
pub mod pedigree;
pub mod perf;
pub mod region;
pub mod sample;
pub mod variant;
