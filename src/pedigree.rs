//! Family structure: individuals, parentage, sex and affection status.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sex {
    #[default]
    Unknown,
    Male,
    Female,
}

impl Sex {
    /// Decode a PED sex column: `1` male, `2` female, anything else unknown.
    pub fn from_ped_code(code: &str) -> Self {
        match code.trim() {
            "1" => Self::Male,
            "2" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "UNKNOWN"),
            Self::Male => write!(f, "MALE"),
            Self::Female => write!(f, "FEMALE"),
        }
    }
}

/// Affection status of an individual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Unknown,
    Unaffected,
    Affected,
}

impl Status {
    /// Decode a PED phenotype column: `1` unaffected, `2` affected, anything else unknown.
    pub fn from_ped_code(code: &str) -> Self {
        match code.trim() {
            "1" => Self::Unaffected,
            "2" => Self::Affected,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "UNKNOWN"),
            Self::Unaffected => write!(f, "UNAFFECTED"),
            Self::Affected => write!(f, "AFFECTED"),
        }
    }
}

/// A member of a pedigree. Parent ids of `None` mean unknown (founder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    id: String,
    family_id: String,
    father_id: Option<String>,
    mother_id: Option<String>,
    sex: Sex,
    status: Status,
}

impl Individual {
    pub fn new(id: impl Into<String>, sex: Sex, status: Status) -> Self {
        Self {
            id: id.into(),
            family_id: String::new(),
            father_id: None,
            mother_id: None,
            sex,
            status,
        }
    }

    #[must_use]
    pub fn with_family(mut self, family_id: impl Into<String>) -> Self {
        self.family_id = family_id.into();
        self
    }

    /// Set the father id. An empty id or the PED placeholder `0` clears it.
    #[must_use]
    pub fn with_father(mut self, father_id: impl Into<String>) -> Self {
        self.father_id = parent_id(father_id.into());
        self
    }

    /// Set the mother id. An empty id or the PED placeholder `0` clears it.
    #[must_use]
    pub fn with_mother(mut self, mother_id: impl Into<String>) -> Self {
        self.mother_id = parent_id(mother_id.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn family_id(&self) -> &str {
        &self.family_id
    }

    pub fn father_id(&self) -> Option<&str> {
        self.father_id.as_deref()
    }

    pub fn mother_id(&self) -> Option<&str> {
        self.mother_id.as_deref()
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_affected(&self) -> bool {
        self.status == Status::Affected
    }

    pub fn is_unaffected(&self) -> bool {
        self.status == Status::Unaffected
    }

    pub fn is_male(&self) -> bool {
        self.sex == Sex::Male
    }

    pub fn is_female(&self) -> bool {
        self.sex == Sex::Female
    }

    pub fn is_founder(&self) -> bool {
        self.father_id.is_none() && self.mother_id.is_none()
    }
}

fn parent_id(id: String) -> Option<String> {
    if id.is_empty() || id == "0" {
        None
    } else {
        Some(id)
    }
}

/// An immutable, validated set of individuals keyed by id.
///
/// Iteration follows the order individuals were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pedigree {
    individuals: Vec<Individual>,
    index: HashMap<String, usize>,
}

impl Pedigree {
    /// Validate and build a pedigree.
    ///
    /// Fails on empty or duplicate ids, self-parentage, parent ids that name
    /// no member of the pedigree, mothers that are not FEMALE and fathers
    /// that are not MALE.
    pub fn new(individuals: impl IntoIterator<Item = Individual>) -> Result<Self, Error> {
        let individuals: Vec<Individual> = individuals.into_iter().collect();
        let mut index = HashMap::with_capacity(individuals.len());

        for (i, individual) in individuals.iter().enumerate() {
            if individual.id.trim().is_empty() {
                return Err(Error::Pedigree(format!(
                    "individual at position {} has an empty id",
                    i + 1
                )));
            }
            if index.insert(individual.id.clone(), i).is_some() {
                return Err(Error::Pedigree(format!(
                    "duplicate individual id: '{}'",
                    individual.id
                )));
            }
        }

        for individual in &individuals {
            check_parent(&individuals, &index, individual, individual.mother_id(), Sex::Female)?;
            check_parent(&individuals, &index, individual, individual.father_id(), Sex::Male)?;
        }

        Ok(Self { individuals, index })
    }

    /// A pedigree with no members.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A pedigree holding a single affected proband, used when no PED file is supplied.
    #[must_use]
    pub fn just_proband(id: impl Into<String>, sex: Sex) -> Self {
        let proband = Individual::new(id, sex, Status::Affected);
        let index = HashMap::from([(proband.id.clone(), 0)]);
        Self {
            individuals: vec![proband],
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.individuals.len() == 1
    }

    pub fn get(&self, id: &str) -> Option<&Individual> {
        self.index.get(id).map(|&i| &self.individuals[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn affected(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter().filter(|i| i.is_affected())
    }

    pub fn unaffected(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter().filter(|i| i.is_unaffected())
    }

    pub fn mother_of(&self, individual: &Individual) -> Option<&Individual> {
        individual.mother_id().and_then(|id| self.get(id))
    }

    pub fn father_of(&self, individual: &Individual) -> Option<&Individual> {
        individual.father_id().and_then(|id| self.get(id))
    }

    /// Members naming `id` as mother or father, in pedigree order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Individual> + 'a {
        self.individuals
            .iter()
            .filter(move |i| i.mother_id() == Some(id) || i.father_id() == Some(id))
    }

    /// All known ancestors of `id`, nearest generation first (mother before
    /// father within a couple). Stops at founders and unknown parents, and
    /// visits each ancestor once.
    pub fn ancestors_of(&self, id: &str) -> Vec<&Individual> {
        let mut ancestors = Vec::new();
        let Some(start) = self.get(id) else {
            return ancestors;
        };

        let mut seen: HashSet<&str> = HashSet::from([start.id()]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for parent in [self.mother_of(current), self.father_of(current)]
                .into_iter()
                .flatten()
            {
                if seen.insert(parent.id()) {
                    ancestors.push(parent);
                    queue.push_back(parent);
                }
            }
        }

        ancestors
    }

    /// Distinct family ids, sorted.
    pub fn family_ids(&self) -> BTreeSet<&str> {
        self.individuals.iter().map(Individual::family_id).collect()
    }

    pub fn family_count(&self) -> usize {
        self.family_ids().len()
    }
}

fn check_parent(
    individuals: &[Individual],
    index: &HashMap<String, usize>,
    child: &Individual,
    parent_id: Option<&str>,
    expected: Sex,
) -> Result<(), Error> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    let role = if expected == Sex::Female {
        "mother"
    } else {
        "father"
    };

    if parent_id == child.id {
        return Err(Error::Pedigree(format!(
            "individual '{}' is listed as their own {role}",
            child.id
        )));
    }

    let parent = index.get(parent_id).map(|&i| &individuals[i]).ok_or_else(|| {
        Error::Pedigree(format!(
            "{role} '{parent_id}' of individual '{}' is not in the pedigree",
            child.id
        ))
    })?;

    if parent.sex != expected {
        return Err(Error::Pedigree(format!(
            "{role} '{parent_id}' of individual '{}' has sex {}, expected {expected}",
            child.id, parent.sex
        )));
    }

    Ok(())
}
