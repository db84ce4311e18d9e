//! Mendelian inheritance-mode compatibility for variants observed in a pedigree.

pub mod analyser;
pub mod annotator;
pub mod comp_het;
pub mod options;
pub mod penetrance;
pub mod segregation;

use std::fmt;

use serde::Deserialize;

use crate::contig::ChromosomeType;
use crate::error::Error;

/// A Mendelian transmission pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModeOfInheritance {
    AutosomalDominant,
    AutosomalRecessive,
    XDominant,
    XRecessive,
    Mitochondrial,
    /// No transmission constraint; only the frequency ceiling applies.
    Any,
}

impl ModeOfInheritance {
    pub const ALL: [Self; 6] = [
        Self::AutosomalDominant,
        Self::AutosomalRecessive,
        Self::XDominant,
        Self::XRecessive,
        Self::Mitochondrial,
        Self::Any,
    ];

    pub fn sub_modes(self) -> &'static [SubModeOfInheritance] {
        use SubModeOfInheritance as S;
        match self {
            Self::AutosomalDominant => &[S::AutosomalDominant],
            Self::AutosomalRecessive => {
                &[S::AutosomalRecessiveHomAlt, S::AutosomalRecessiveCompHet]
            }
            Self::XDominant => &[S::XDominant],
            Self::XRecessive => &[S::XRecessiveHomAlt, S::XRecessiveCompHet],
            Self::Mitochondrial => &[S::Mitochondrial],
            Self::Any => &[S::Any],
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::AutosomalDominant => "AD",
            Self::AutosomalRecessive => "AR",
            Self::XDominant => "XD",
            Self::XRecessive => "XR",
            Self::Mitochondrial => "MT",
            Self::Any => "ANY",
        }
    }

    pub fn is_dominant(self) -> bool {
        matches!(self, Self::AutosomalDominant | Self::XDominant)
    }

    pub fn is_recessive(self) -> bool {
        matches!(self, Self::AutosomalRecessive | Self::XRecessive)
    }
}

impl fmt::Display for ModeOfInheritance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AutosomalDominant => "AUTOSOMAL_DOMINANT",
            Self::AutosomalRecessive => "AUTOSOMAL_RECESSIVE",
            Self::XDominant => "X_DOMINANT",
            Self::XRecessive => "X_RECESSIVE",
            Self::Mitochondrial => "MITOCHONDRIAL",
            Self::Any => "ANY",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ModeOfInheritance {
    type Err = Error;

    /// Accepts the full name or the abbreviation, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.to_string() == wanted || mode.abbreviation() == wanted)
            .ok_or_else(|| Error::Parse(format!("unrecognised mode of inheritance: '{s}'")))
    }
}

/// A mode of inheritance refined by the genotype configuration that produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubModeOfInheritance {
    AutosomalDominant,
    AutosomalRecessiveHomAlt,
    AutosomalRecessiveCompHet,
    XDominant,
    XRecessiveHomAlt,
    XRecessiveCompHet,
    Mitochondrial,
    Any,
}

impl SubModeOfInheritance {
    pub const ALL: [Self; 8] = [
        Self::AutosomalDominant,
        Self::AutosomalRecessiveHomAlt,
        Self::AutosomalRecessiveCompHet,
        Self::XDominant,
        Self::XRecessiveHomAlt,
        Self::XRecessiveCompHet,
        Self::Mitochondrial,
        Self::Any,
    ];

    pub fn mode(self) -> ModeOfInheritance {
        match self {
            Self::AutosomalDominant => ModeOfInheritance::AutosomalDominant,
            Self::AutosomalRecessiveHomAlt | Self::AutosomalRecessiveCompHet => {
                ModeOfInheritance::AutosomalRecessive
            }
            Self::XDominant => ModeOfInheritance::XDominant,
            Self::XRecessiveHomAlt | Self::XRecessiveCompHet => ModeOfInheritance::XRecessive,
            Self::Mitochondrial => ModeOfInheritance::Mitochondrial,
            Self::Any => ModeOfInheritance::Any,
        }
    }

    pub fn is_comp_het(self) -> bool {
        matches!(
            self,
            Self::AutosomalRecessiveCompHet | Self::XRecessiveCompHet
        )
    }

    pub fn is_dominant(self) -> bool {
        self.mode().is_dominant()
    }

    /// The chromosome class a variant must lie on for this sub-mode to apply,
    /// or `None` for [`SubModeOfInheritance::Any`].
    pub fn chromosome_type(self) -> Option<ChromosomeType> {
        match self {
            Self::AutosomalDominant
            | Self::AutosomalRecessiveHomAlt
            | Self::AutosomalRecessiveCompHet => Some(ChromosomeType::Autosomal),
            Self::XDominant | Self::XRecessiveHomAlt | Self::XRecessiveCompHet => {
                Some(ChromosomeType::XLinked)
            }
            Self::Mitochondrial => Some(ChromosomeType::Mitochondrial),
            Self::Any => None,
        }
    }

    /// The compound-heterozygous sub-mode for a chromosome class, if one exists.
    pub fn comp_het_for(chromosome_type: ChromosomeType) -> Option<Self> {
        match chromosome_type {
            ChromosomeType::Autosomal => Some(Self::AutosomalRecessiveCompHet),
            ChromosomeType::XLinked => Some(Self::XRecessiveCompHet),
            _ => None,
        }
    }
}

impl fmt::Display for SubModeOfInheritance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AutosomalDominant => "AUTOSOMAL_DOMINANT",
            Self::AutosomalRecessiveHomAlt => "AUTOSOMAL_RECESSIVE_HOM_ALT",
            Self::AutosomalRecessiveCompHet => "AUTOSOMAL_RECESSIVE_COMP_HET",
            Self::XDominant => "X_DOMINANT",
            Self::XRecessiveHomAlt => "X_RECESSIVE_HOM_ALT",
            Self::XRecessiveCompHet => "X_RECESSIVE_COMP_HET",
            Self::Mitochondrial => "MITOCHONDRIAL",
            Self::Any => "ANY",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for SubModeOfInheritance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|sub_mode| sub_mode.to_string() == wanted)
            .ok_or_else(|| {
                Error::Parse(format!("unrecognised sub-mode of inheritance: '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sub_mode_belongs_to_its_mode() {
        for sub_mode in SubModeOfInheritance::ALL {
            assert!(sub_mode.mode().sub_modes().contains(&sub_mode));
        }
        let total: usize = ModeOfInheritance::ALL
            .iter()
            .map(|mode| mode.sub_modes().len())
            .sum();
        assert_eq!(total, SubModeOfInheritance::ALL.len());
    }

    #[test]
    fn parse_modes() {
        assert_eq!(
            "AD".parse::<ModeOfInheritance>().unwrap(),
            ModeOfInheritance::AutosomalDominant
        );
        assert_eq!(
            "x_recessive".parse::<ModeOfInheritance>().unwrap(),
            ModeOfInheritance::XRecessive
        );
        assert!("Y_LINKED".parse::<ModeOfInheritance>().is_err());
        assert_eq!(
            "AUTOSOMAL_RECESSIVE_COMP_HET"
                .parse::<SubModeOfInheritance>()
                .unwrap(),
            SubModeOfInheritance::AutosomalRecessiveCompHet
        );
    }

    #[test]
    fn display_matches_serde_names() {
        for sub_mode in SubModeOfInheritance::ALL {
            let json = format!("\"{sub_mode}\"");
            let parsed: SubModeOfInheritance = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, sub_mode);
        }
        for mode in ModeOfInheritance::ALL {
            let json = format!("\"{mode}\"");
            let parsed: ModeOfInheritance = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn comp_het_sub_modes() {
        assert!(SubModeOfInheritance::AutosomalRecessiveCompHet.is_comp_het());
        assert!(!SubModeOfInheritance::AutosomalRecessiveHomAlt.is_comp_het());
        assert_eq!(
            SubModeOfInheritance::comp_het_for(ChromosomeType::XLinked),
            Some(SubModeOfInheritance::XRecessiveCompHet)
        );
        assert_eq!(
            SubModeOfInheritance::comp_het_for(ChromosomeType::Mitochondrial),
            None
        );
    }
}
