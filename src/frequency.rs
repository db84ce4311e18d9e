//! Population allele frequencies attached to a variant.

use std::fmt;

use serde::Deserialize;

/// Population frequency databases and sub-populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencySource {
    ThousandGenomes,
    Topmed,
    Uk10k,
    EspAll,
    ExacAfr,
    ExacAmr,
    ExacEas,
    ExacFin,
    ExacNfe,
    ExacSas,
    GnomadEAfr,
    GnomadEAmr,
    GnomadEAsj,
    GnomadEEas,
    GnomadEFin,
    GnomadENfe,
    GnomadESas,
    GnomadGAfr,
    GnomadGAmr,
    GnomadGAsj,
    GnomadGEas,
    GnomadGFin,
    GnomadGNfe,
    GnomadGSas,
    Local,
}

impl fmt::Display for FrequencySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A frequency in percent (0-100) observed in one source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency {
    pub source: FrequencySource,
    pub percent: f32,
}

impl Frequency {
    pub fn new(source: FrequencySource, percent: f32) -> Self {
        Self { source, percent }
    }

    /// Build from an allele-frequency ratio (0-1).
    pub fn from_ratio(source: FrequencySource, ratio: f32) -> Self {
        Self {
            source,
            percent: ratio * 100.0,
        }
    }
}

/// All frequencies known for one variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyData {
    frequencies: Vec<Frequency>,
}

impl FrequencyData {
    pub fn new(frequencies: Vec<Frequency>) -> Self {
        Self { frequencies }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_data(&self) -> bool {
        !self.frequencies.is_empty()
    }

    pub fn frequencies(&self) -> &[Frequency] {
        &self.frequencies
    }

    pub fn get(&self, source: FrequencySource) -> Option<Frequency> {
        self.frequencies.iter().copied().find(|f| f.source == source)
    }

    /// Highest frequency over all sources, in percent. Zero when there is no data.
    #[must_use]
    pub fn max_freq(&self) -> f32 {
        self.frequencies
            .iter()
            .map(|f| f.percent)
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_freq_over_sources() {
        let data = FrequencyData::new(vec![
            Frequency::new(FrequencySource::ThousandGenomes, 0.02),
            Frequency::new(FrequencySource::GnomadENfe, 1.5),
            Frequency::from_ratio(FrequencySource::Topmed, 0.001),
        ]);
        assert!(data.has_data());
        assert_eq!(data.max_freq(), 1.5);
        assert_eq!(
            data.get(FrequencySource::GnomadENfe).map(|f| f.percent),
            Some(1.5)
        );
        assert!(data.get(FrequencySource::Local).is_none());
    }

    #[test]
    fn no_data_is_zero() {
        assert_eq!(FrequencyData::empty().max_freq(), 0.0);
        assert!(!FrequencyData::empty().has_data());
    }

    #[test]
    fn source_names_deserialize() {
        let source: FrequencySource = serde_json::from_str("\"GNOMAD_E_NFE\"").unwrap();
        assert_eq!(source, FrequencySource::GnomadENfe);
        let source: FrequencySource = serde_json::from_str("\"UK10K\"").unwrap();
        assert_eq!(source, FrequencySource::Uk10k);
    }
}
