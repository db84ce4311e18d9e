//! Chromosomal regions used to reassign regulatory variants to genes.

pub mod index;

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::contig;
use crate::error::Error;

/// Anything with 1-based, fully closed coordinates on a contig.
pub trait ChromosomalRegion {
    fn contig(&self) -> u8;
    fn start(&self) -> u32;
    fn end(&self) -> u32;

    fn length(&self) -> u32 {
        self.end().saturating_sub(self.start()) + 1
    }

    fn contains_position(&self, contig: u8, position: u32) -> bool {
        self.contig() == contig && self.start() <= position && position <= self.end()
    }

    fn overlaps(&self, contig: u8, start: u32, end: u32) -> bool {
        self.contig() == contig && self.start() <= end && start <= self.end()
    }
}

/// A validated closed interval on a contig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeneticInterval {
    contig: u8,
    start: u32,
    end: u32,
}

impl GeneticInterval {
    pub fn new(contig: u8, start: u32, end: u32) -> Result<Self, Error> {
        if start == 0 {
            return Err(Error::Validation(format!(
                "interval on contig {} must start at 1 or later",
                contig::name_of(contig)
            )));
        }
        if end < start {
            return Err(Error::Validation(format!(
                "interval {}:{start}-{end} ends before it starts",
                contig::name_of(contig)
            )));
        }
        Ok(Self { contig, start, end })
    }

    /// Parse `chr1:100-200` style text.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let invalid = || Error::Parse(format!("invalid interval: '{text}'"));
        let (name, range) = text.trim().rsplit_once(':').ok_or_else(invalid)?;
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;
        let start = start.replace(',', "").parse().map_err(|_| invalid())?;
        let end = end.replace(',', "").parse().map_err(|_| invalid())?;
        Self::new(contig::id_from_name(name)?, start, end)
    }
}

impl ChromosomalRegion for GeneticInterval {
    fn contig(&self) -> u8 {
        self.contig
    }

    fn start(&self) -> u32 {
        self.start
    }

    fn end(&self) -> u32 {
        self.end
    }
}

impl fmt::Display for GeneticInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            contig::name_of(self.contig),
            self.start,
            self.end
        )
    }
}

/// A topologically associating domain and the genes that lie inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologicalDomain {
    interval: GeneticInterval,
    /// Gene symbol to gene id.
    genes: BTreeMap<String, String>,
}

impl TopologicalDomain {
    pub fn new(interval: GeneticInterval, genes: BTreeMap<String, String>) -> Self {
        Self { interval, genes }
    }

    pub fn interval(&self) -> GeneticInterval {
        self.interval
    }

    pub fn genes(&self) -> &BTreeMap<String, String> {
        &self.genes
    }

    pub fn contains_gene(&self, symbol: &str) -> bool {
        self.genes.contains_key(symbol)
    }
}

impl ChromosomalRegion for TopologicalDomain {
    fn contig(&self) -> u8 {
        self.interval.contig
    }

    fn start(&self) -> u32 {
        self.interval.start
    }

    fn end(&self) -> u32 {
        self.interval.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegulatoryFeatureType {
    Enhancer,
    FantomPermissive,
    Promoter,
    PromoterFlankingRegion,
    CtcfBindingSite,
    TfBindingSite,
    OpenChromatin,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for RegulatoryFeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enhancer => "enhancer",
            Self::FantomPermissive => "FANTOM permissive",
            Self::Promoter => "promoter",
            Self::PromoterFlankingRegion => "promoter flanking region",
            Self::CtcfBindingSite => "CTCF binding site",
            Self::TfBindingSite => "TF binding site",
            Self::OpenChromatin => "open chromatin",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegulatoryFeature {
    interval: GeneticInterval,
    feature_type: RegulatoryFeatureType,
}

impl RegulatoryFeature {
    pub fn new(interval: GeneticInterval, feature_type: RegulatoryFeatureType) -> Self {
        Self {
            interval,
            feature_type,
        }
    }

    pub fn feature_type(&self) -> RegulatoryFeatureType {
        self.feature_type
    }
}

impl ChromosomalRegion for RegulatoryFeature {
    fn contig(&self) -> u8 {
        self.interval.contig
    }

    fn start(&self) -> u32 {
        self.interval.start
    }

    fn end(&self) -> u32 {
        self.interval.end
    }
}
