//! Summary statistics over a loaded graph.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::graph::{RelationKind, RelationshipGraph};
use crate::model::{Individual, Sex};

const DATE_QUALIFIERS: [&str; 9] = [
    "ABT", "ABOUT", "EST", "CAL", "BEF", "AFT", "BET", "FROM", "TO",
];

/// Parse a genealogical record date.
///
/// Accepts `14 MAR 1920`, `MAR 1920`, `1920` and ISO `1920-03-14`, optionally
/// preceded by a GEDCOM qualifier (`ABT 1980`, `BET 1900 AND 1910` takes the
/// first bound). Partial dates resolve to the first day of the period.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let mut text = raw.trim();
    if let Some((first, rest)) = text.split_once(char::is_whitespace) {
        if DATE_QUALIFIERS.contains(&first.to_ascii_uppercase().as_str()) {
            text = rest.trim();
        }
    }
    if let Some((lower, _)) = text.split_once(" AND ") {
        text = lower.trim();
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%d %b %Y") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {}", text), "%d %b %Y") {
        return Some(date);
    }
    if text.len() == 4 {
        if let Ok(year) = text.parse::<i32>() {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }
    None
}

/// Individual with a parsed birth date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedIndividual {
    pub id: String,
    pub full_name: String,
    pub birth: NaiveDate,
}

/// Dataset summary used by the `stats` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub individuals: usize,
    pub families: usize,
    pub males: usize,
    pub females: usize,
    pub unknown_sex: usize,
    pub parent_edges: usize,
    pub spouse_edges: usize,
    pub sibling_edges: usize,
    /// Individual with the most primary edges; ties go to the smallest id.
    pub most_connected: Option<(String, usize)>,
    pub unique_surnames: usize,
    pub oldest: Option<DatedIndividual>,
    pub youngest: Option<DatedIndividual>,
}

impl DatasetStats {
    pub fn compute(graph: &RelationshipGraph) -> Self {
        let count_sex = |sex: Sex| graph.individuals().filter(|i| i.sex == sex).count();

        let most_connected = graph
            .individuals()
            .map(|i| (i.id.as_str(), graph.degree(&i.id)))
            .filter(|(_, degree)| *degree > 0)
            .max_by(|(id_x, dx), (id_y, dy)| dx.cmp(dy).then_with(|| id_y.cmp(id_x)))
            .map(|(id, degree)| (id.to_string(), degree));

        let surnames: BTreeSet<&str> = graph
            .individuals()
            .filter_map(Individual::surname)
            .collect();

        let mut dated: Vec<DatedIndividual> = graph
            .individuals()
            .filter_map(|i| {
                let birth = parse_record_date(i.birth_date.as_deref()?)?;
                Some(DatedIndividual {
                    id: i.id.clone(),
                    full_name: i.full_name.clone(),
                    birth,
                })
            })
            .collect();
        dated.sort_by(|x, y| x.birth.cmp(&y.birth).then_with(|| x.id.cmp(&y.id)));

        let unparsed = graph
            .individuals()
            .filter(|i| i.birth_date.is_some())
            .count()
            - dated.len();
        if unparsed > 0 {
            log::debug!("{} birth date(s) could not be parsed", unparsed);
        }

        Self {
            individuals: graph.len(),
            families: graph.families().count(),
            males: count_sex(Sex::Male),
            females: count_sex(Sex::Female),
            unknown_sex: count_sex(Sex::Unknown),
            parent_edges: graph.edge_count(RelationKind::Parent),
            spouse_edges: graph.edge_count(RelationKind::Spouse) / 2,
            sibling_edges: graph.edge_count(RelationKind::Sibling) / 2,
            most_connected,
            unique_surnames: surnames.len(),
            oldest: dated.first().cloned(),
            youngest: dated.last().cloned(),
        }
    }
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Individuals:      {}", self.individuals)?;
        writeln!(
            f,
            "  male/female/unknown: {}/{}/{}",
            self.males, self.females, self.unknown_sex
        )?;
        writeln!(f, "Families:         {}", self.families)?;
        writeln!(f, "Parent links:     {}", self.parent_edges)?;
        writeln!(f, "Marriages:        {}", self.spouse_edges)?;
        writeln!(f, "Sibling pairs:    {}", self.sibling_edges)?;
        writeln!(f, "Unique surnames:  {}", self.unique_surnames)?;
        if let Some((id, degree)) = &self.most_connected {
            writeln!(f, "Most connected:   {} ({} links)", id, degree)?;
        }
        if let Some(oldest) = &self.oldest {
            writeln!(
                f,
                "Oldest:           {} ({}), born {}",
                oldest.full_name,
                oldest.id,
                oldest.birth.year()
            )?;
        }
        if let Some(youngest) = &self.youngest {
            writeln!(
                f,
                "Youngest:         {} ({}), born {}",
                youngest.full_name,
                youngest.id,
                youngest.birth.year()
            )?;
        }
        Ok(())
    }
}
