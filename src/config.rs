use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::inheritance::SubModeOfInheritance;
use crate::inheritance::options::InheritanceModeOptions;
use crate::inheritance::segregation::Penetrance;

/// Analysis settings read from a JSON file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Overrides the proband named in the cohort file.
    pub proband: Option<String>,
    /// Frequency ceiling (percent) per sub-mode. Absent means the defaults.
    pub inheritance_modes: Option<BTreeMap<SubModeOfInheritance, f32>>,
    #[serde(default)]
    pub incomplete_penetrance: bool,
}

impl AnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(proband) = &self.proband
            && proband.trim().is_empty()
        {
            bail!("proband must not be blank");
        }

        self.inheritance_mode_options()
            .context("invalid inheritanceModes")?;

        Ok(())
    }

    pub fn inheritance_mode_options(&self) -> Result<InheritanceModeOptions> {
        match &self.inheritance_modes {
            None => Ok(InheritanceModeOptions::defaults()),
            Some(entries) => Ok(InheritanceModeOptions::new(
                entries.iter().map(|(&sub_mode, &max_freq)| (sub_mode, max_freq)),
            )?),
        }
    }

    pub fn penetrance(&self) -> Penetrance {
        if self.incomplete_penetrance {
            Penetrance::Incomplete
        } else {
            Penetrance::Complete
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn valid_config_all_fields() {
        let json = r#"{
            "proband": "Adam",
            "inheritanceModes": {
                "AUTOSOMAL_DOMINANT": 0.1,
                "AUTOSOMAL_RECESSIVE_COMP_HET": 2.0,
                "ANY": 5.0
            },
            "incompletePenetrance": true
        }"#;
        let f = write_config(json);
        let config = AnalysisConfig::from_file(f.path()).unwrap();
        assert_eq!(config.proband.as_deref(), Some("Adam"));
        assert_eq!(config.penetrance(), Penetrance::Incomplete);

        let options = config.inheritance_mode_options().unwrap();
        assert_eq!(options.defined_sub_modes().len(), 3);
        assert_eq!(
            options.max_freq_for_sub_mode(SubModeOfInheritance::XDominant),
            5.0
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let f = write_config("{}");
        let config = AnalysisConfig::from_file(f.path()).unwrap();
        assert!(config.proband.is_none());
        assert_eq!(config.penetrance(), Penetrance::Complete);
        assert_eq!(
            config.inheritance_mode_options().unwrap(),
            InheritanceModeOptions::defaults()
        );
    }

    #[test]
    fn out_of_range_frequency() {
        let f = write_config(r#"{ "inheritanceModes": { "X_DOMINANT": 101.0 } }"#);
        let err = AnalysisConfig::from_file(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("X_DOMINANT"));
    }

    #[test]
    fn unknown_sub_mode() {
        let f = write_config(r#"{ "inheritanceModes": { "Y_LINKED": 1.0 } }"#);
        let err = AnalysisConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn blank_proband() {
        let f = write_config(r#"{ "proband": "  " }"#);
        let err = AnalysisConfig::from_file(f.path()).unwrap_err();
        assert!(err.to_string().contains("proband"));
    }
}
