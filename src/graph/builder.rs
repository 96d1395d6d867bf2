//! Builds the primary edge set from individuals and family units.

use std::collections::BTreeSet;

use super::{AncestryWalker, RelationKind, RelationshipGraph};
use crate::model::{Dataset, FamilyUnit, Individual};
use crate::{KinshipError, Result};

impl RelationshipGraph {
    /// Build a graph from scratch.
    ///
    /// Every id referenced by a family unit must be among `individuals`;
    /// otherwise the build aborts with `ReferentialIntegrity` and no graph is
    /// returned. A cycle in the parent edges aborts with `DataIntegrity`.
    pub fn build(individuals: Vec<Individual>, families: Vec<FamilyUnit>) -> Result<Self> {
        let graph = RelationshipGraph::default().extend(individuals, families)?;
        log::info!(
            "Relationship graph built: {} individuals, {} families, {} edges",
            graph.len(),
            graph.families.len(),
            graph.edges().count()
        );
        Ok(graph)
    }

    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        Self::build(dataset.individuals, dataset.families)
    }

    /// Return a new graph holding this graph's records plus the given ones.
    ///
    /// `self` is left untouched, so readers holding the previous graph keep a
    /// consistent view. New family units may reference both existing and newly
    /// added individuals.
    pub fn extend(&self, individuals: Vec<Individual>, families: Vec<FamilyUnit>) -> Result<Self> {
        let next = self.extend_unchecked(individuals, families)?;
        // a parent cycle anywhere leaves individuals without a generation
        AncestryWalker::new(&next).generation_levels()?;
        Ok(next)
    }

    fn extend_unchecked(
        &self,
        individuals: Vec<Individual>,
        families: Vec<FamilyUnit>,
    ) -> Result<Self> {
        let mut next = self.clone();
        for individual in individuals {
            next.insert_individual(individual)?;
        }
        for family in families {
            next.insert_family(family)?;
        }
        Ok(next)
    }

    /// Build without the parent-cycle check, for exercising the walker's own
    /// guards against corrupt graphs.
    #[cfg(test)]
    pub(crate) fn build_allowing_cycles(
        individuals: Vec<Individual>,
        families: Vec<FamilyUnit>,
    ) -> Result<Self> {
        RelationshipGraph::default().extend_unchecked(individuals, families)
    }

    fn insert_individual(&mut self, individual: Individual) -> Result<()> {
        if individual.id.is_empty() {
            return Err(KinshipError::InvalidFamily(
                "individual with empty id".to_string(),
            ));
        }
        if self.individuals.contains_key(&individual.id) {
            return Err(KinshipError::InvalidFamily(format!(
                "duplicate individual id {}",
                individual.id
            )));
        }
        self.adjacency.entry(individual.id.clone()).or_default();
        self.individuals.insert(individual.id.clone(), individual);
        Ok(())
    }

    fn validate_family(&self, family: &FamilyUnit) -> Result<()> {
        if self.families.contains_key(&family.id) {
            return Err(KinshipError::InvalidFamily(format!(
                "duplicate family id {}",
                family.id
            )));
        }

        for id in family.member_ids() {
            if !self.individuals.contains_key(id) {
                return Err(KinshipError::ReferentialIntegrity {
                    family_id: family.id.clone(),
                    individual_id: id.to_string(),
                });
            }
        }

        if let (Some(husband), Some(wife)) = (&family.husband_id, &family.wife_id) {
            if husband == wife {
                return Err(KinshipError::InvalidFamily(format!(
                    "family {} lists {} as both husband and wife",
                    family.id, husband
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for child in &family.children {
            if !seen.insert(child.as_str()) {
                return Err(KinshipError::InvalidFamily(format!(
                    "family {} lists child {} twice",
                    family.id, child
                )));
            }
            if family.parents().any(|p| p == child) {
                return Err(KinshipError::InvalidFamily(format!(
                    "family {} lists {} as both parent and child",
                    family.id, child
                )));
            }
            if let Some(existing) = self.birth_family.get(child) {
                return Err(KinshipError::InvalidFamily(format!(
                    "child {} appears in families {} and {}",
                    child, existing, family.id
                )));
            }
        }

        Ok(())
    }

    fn insert_family(&mut self, family: FamilyUnit) -> Result<()> {
        self.validate_family(&family)?;

        let parents: Vec<String> = family.parents().map(str::to_string).collect();
        if parents.is_empty() {
            log::warn!("Family {} has no recorded parents", family.id);
        }

        if let [husband, wife] = parents.as_slice() {
            self.link(husband, RelationKind::Spouse, wife);
            self.link(wife, RelationKind::Spouse, husband);
        }

        for child in &family.children {
            self.birth_family.insert(child.clone(), family.id.clone());
            for parent in &parents {
                self.link(child, RelationKind::Parent, parent);
                self.link(parent, RelationKind::Child, child);
            }
        }

        for (i, first) in family.children.iter().enumerate() {
            for second in &family.children[i + 1..] {
                self.link(first, RelationKind::Sibling, second);
                self.link(second, RelationKind::Sibling, first);
            }
        }

        log::debug!(
            "Linked family {}: {} parent(s), {} child(ren)",
            family.id,
            parents.len(),
            family.children.len()
        );
        self.families.insert(family.id.clone(), family);
        Ok(())
    }

    fn link(&mut self, source: &str, kind: RelationKind, target: &str) {
        self.adjacency
            .entry(source.to_string())
            .or_default()
            .entry(kind)
            .or_default()
            .insert(target.to_string());
    }
}
