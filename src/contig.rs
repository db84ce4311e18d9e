//! Integer contig ids and chromosome classification.
//!
//! Contigs are numbered 1-22 for the autosomes, 23 for X, 24 for Y and 25 for
//! the mitochondrial genome. Zero and anything above 25 are unplaced.

use std::fmt;

use crate::error::Error;

pub const X: u8 = 23;
pub const Y: u8 = 24;
pub const MT: u8 = 25;

/// The class of chromosome a contig belongs to, which decides which modes of
/// inheritance can apply to variants on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromosomeType {
    Autosomal,
    XLinked,
    YLinked,
    Mitochondrial,
    Unplaced,
}

impl ChromosomeType {
    pub fn of(contig: u8) -> Self {
        match contig {
            1..=22 => Self::Autosomal,
            X => Self::XLinked,
            Y => Self::YLinked,
            MT => Self::Mitochondrial,
            _ => Self::Unplaced,
        }
    }
}

impl fmt::Display for ChromosomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Autosomal => write!(f, "autosomal"),
            Self::XLinked => write!(f, "X-linked"),
            Self::YLinked => write!(f, "Y-linked"),
            Self::Mitochondrial => write!(f, "mitochondrial"),
            Self::Unplaced => write!(f, "unplaced"),
        }
    }
}

/// Resolve a contig name (`1`-`22`, `X`, `Y`, `M`, `MT`, optionally `chr`-prefixed,
/// or the numeric ids `23`-`25`) to its integer id.
pub fn id_from_name(name: &str) -> Result<u8, Error> {
    let trimmed = name.trim();
    let bare = trimmed
        .strip_prefix("chr")
        .or_else(|| trimmed.strip_prefix("CHR"))
        .unwrap_or(trimmed);

    match bare.to_ascii_uppercase().as_str() {
        "X" => return Ok(X),
        "Y" => return Ok(Y),
        "M" | "MT" => return Ok(MT),
        _ => {}
    }

    match bare.parse::<u8>() {
        Ok(id @ 1..=MT) => Ok(id),
        _ => Err(Error::Parse(format!("unrecognised contig: '{name}'"))),
    }
}

/// Canonical display name of a contig id, without a `chr` prefix.
pub fn name_of(contig: u8) -> String {
    match contig {
        X => "X".to_string(),
        Y => "Y".to_string(),
        MT => "MT".to_string(),
        other => other.to_string(),
    }
}
