//! Genealogical records: individuals and the family units that connect them.
//!
//! Records are produced once at ingestion and never mutated afterwards; the
//! relationship graph owns them for the lifetime of a query session.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
pub(crate) mod fixtures;

/// Recorded sex of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "M", alias = "m", alias = "Male")]
    Male,
    #[serde(alias = "F", alias = "f", alias = "Female")]
    Female,
    #[default]
    #[serde(alias = "U", alias = "u", alias = "Unknown", alias = "")]
    Unknown,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A single person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    /// Unique identifier, e.g. `I0001`.
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub death_date: Option<String>,
    #[serde(default)]
    pub death_place: Option<String>,
}

impl Individual {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, sex: Sex) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            sex,
            birth_date: None,
            birth_place: None,
            death_date: None,
            death_place: None,
        }
    }

    #[must_use]
    pub fn with_birth(mut self, date: Option<&str>, place: Option<&str>) -> Self {
        self.birth_date = date.map(str::to_string);
        self.birth_place = place.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_death(mut self, date: Option<&str>, place: Option<&str>) -> Self {
        self.death_date = date.map(str::to_string);
        self.death_place = place.map(str::to_string);
        self
    }

    /// Last whitespace-separated token of the full name, if any.
    pub fn surname(&self) -> Option<&str> {
        self.full_name.split_whitespace().last()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.id)
    }
}

/// One partnership and its biological children.
///
/// Step relationships are never stored here; they are derived from spouse
/// and parent edges at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyUnit {
    pub id: String,
    #[serde(default)]
    pub husband_id: Option<String>,
    #[serde(default)]
    pub wife_id: Option<String>,
    #[serde(default)]
    pub marriage_date: Option<String>,
    /// Child ids in record order.
    #[serde(default)]
    pub children: Vec<String>,
}

impl FamilyUnit {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            husband_id: None,
            wife_id: None,
            marriage_date: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_husband(mut self, id: impl Into<String>) -> Self {
        self.husband_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_wife(mut self, id: impl Into<String>) -> Self {
        self.wife_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_marriage_date(mut self, date: impl Into<String>) -> Self {
        self.marriage_date = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, id: impl Into<String>) -> Self {
        self.children.push(id.into());
        self
    }

    /// Present parents, husband first.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.husband_id
            .as_deref()
            .into_iter()
            .chain(self.wife_id.as_deref())
    }

    /// Every individual id this unit references: parents, then children.
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.parents().chain(self.children.iter().map(String::as_str))
    }
}

/// The records handed over by an ingestion collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub individuals: Vec<Individual>,
    #[serde(default)]
    pub families: Vec<FamilyUnit>,
}

impl Dataset {
    pub fn new(individuals: Vec<Individual>, families: Vec<FamilyUnit>) -> Self {
        Self {
            individuals,
            families,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_deserializes_gedcom_codes() {
        let sexes: Vec<Sex> = serde_json::from_str(r#"["M", "female", "U"]"#).unwrap();
        assert_eq!(sexes, vec![Sex::Male, Sex::Female, Sex::Unknown]);
    }

    #[test]
    fn test_individual_display_and_surname() {
        let ind = Individual::new("I1", "William Shakespeare", Sex::Male);
        assert_eq!(ind.to_string(), "William Shakespeare (I1)");
        assert_eq!(ind.surname(), Some("Shakespeare"));
        assert_eq!(Individual::new("I2", "", Sex::Unknown).surname(), None);
    }

    #[test]
    fn test_family_member_ids_skip_absent_parents() {
        let fam = FamilyUnit::new("F1").with_wife("I2").with_child("I3").with_child("I4");
        let ids: Vec<&str> = fam.member_ids().collect();
        assert_eq!(ids, vec!["I2", "I3", "I4"]);
        assert_eq!(fam.parents().count(), 1);
    }

    #[test]
    fn test_individual_defaults_when_deserialized() {
        let ind: Individual =
            serde_json::from_str(r#"{"id": "I9", "full_name": "Joan Hart"}"#).unwrap();
        assert_eq!(ind.sex, Sex::Unknown);
        assert!(ind.birth_date.is_none());
    }
}
