//! Fixed-priority relation classifier.
//!
//! Rules are tried in order and the first match wins:
//! spouse, parent/child, full sibling, grandparent/grandchild, step-parent,
//! half-sibling, step-sibling, direct line beyond two generations, then
//! cousinship through the closest common ancestor.

use std::collections::BTreeSet;

use super::RelationTag;
use crate::graph::{closest_common_ancestor, AncestryWalker, RelationKind, RelationshipGraph};
use crate::{KinshipError, Result};

/// Classifies ordered pairs against one graph snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RelationClassifier<'g> {
    graph: &'g RelationshipGraph,
    walker: AncestryWalker<'g>,
}

impl<'g> RelationClassifier<'g> {
    pub fn new(graph: &'g RelationshipGraph) -> Self {
        Self {
            graph,
            walker: AncestryWalker::new(graph),
        }
    }

    #[must_use]
    pub fn with_walker(mut self, walker: AncestryWalker<'g>) -> Self {
        self.walker = walker;
        self
    }

    /// What `a` is to `b`.
    pub fn classify(&self, a: &str, b: &str) -> Result<RelationTag> {
        if a == b {
            return Err(KinshipError::InvalidArgument(format!(
                "cannot relate {} to itself",
                a
            )));
        }
        self.graph.require(a)?;
        self.graph.require(b)?;

        let tag = self.apply_rules(a, b)?;
        log::debug!("classify({}, {}) = {}", a, b, tag);
        Ok(tag)
    }

    fn apply_rules(&self, a: &str, b: &str) -> Result<RelationTag> {
        let g = self.graph;

        if g.has_edge(a, RelationKind::Spouse, b) {
            return Ok(RelationTag::Spouse);
        }
        if g.has_edge(b, RelationKind::Parent, a) {
            return Ok(RelationTag::Parent);
        }
        if g.has_edge(b, RelationKind::Child, a) {
            return Ok(RelationTag::Child);
        }
        if g.has_edge(a, RelationKind::Sibling, b) {
            return Ok(RelationTag::Sibling);
        }

        let ancestors_a = self.walker.ancestor_distances(a)?;
        let ancestors_b = self.walker.ancestor_distances(b)?;

        if ancestors_b.get(a) == Some(&2) {
            return Ok(RelationTag::Grandparent);
        }
        if ancestors_a.get(b) == Some(&2) {
            return Ok(RelationTag::Grandchild);
        }

        if self.is_step_parent(a, b) {
            return Ok(RelationTag::StepParent);
        }
        if self.is_step_parent(b, a) {
            return Ok(RelationTag::StepChild);
        }

        let shared: BTreeSet<&String> = g.parents(a).intersection(g.parents(b)).collect();
        if shared.len() == 1 && g.birth_family(a) != g.birth_family(b) {
            return Ok(RelationTag::HalfSibling);
        }
        if shared.is_empty() && self.parents_married(a, b) {
            return Ok(RelationTag::StepSibling);
        }

        if let Some(&generations) = ancestors_b.get(a) {
            return Ok(RelationTag::Ancestor { generations });
        }
        if let Some(&generations) = ancestors_a.get(b) {
            return Ok(RelationTag::Descendant { generations });
        }

        Ok(match closest_common_ancestor(&ancestors_a, &ancestors_b) {
            Some(common) => {
                log::debug!(
                    "closest common ancestor of {} and {} is {} ({}, {})",
                    a,
                    b,
                    common.id,
                    common.distance_a,
                    common.distance_b
                );
                RelationTag::from_common_ancestor(common.distance_a, common.distance_b)
            }
            None => RelationTag::NoRelation,
        })
    }

    /// `x` is married to a biological parent of `y` without being one.
    fn is_step_parent(&self, x: &str, y: &str) -> bool {
        let g = self.graph;
        !g.has_edge(y, RelationKind::Parent, x)
            && g.parents(y)
                .iter()
                .any(|parent| g.has_edge(parent, RelationKind::Spouse, x))
    }

    /// Some parent of `a` is married to some parent of `b`.
    fn parents_married(&self, a: &str, b: &str) -> bool {
        let g = self.graph;
        g.parents(a).iter().any(|pa| {
            g.parents(b)
                .iter()
                .any(|pb| g.has_edge(pa, RelationKind::Spouse, pb))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::reference_dataset;
    use crate::model::{FamilyUnit, Individual, Sex};

    fn graph() -> RelationshipGraph {
        RelationshipGraph::from_dataset(reference_dataset()).unwrap()
    }

    fn classify(g: &RelationshipGraph, a: &str, b: &str) -> RelationTag {
        RelationClassifier::new(g).classify(a, b).unwrap()
    }

    fn person(id: &str) -> Individual {
        Individual::new(id, id, Sex::Unknown)
    }

    #[test]
    fn test_self_query_is_invalid_argument() {
        let g = graph();
        let classifier = RelationClassifier::new(&g);
        for individual in g.individuals() {
            let err = classifier.classify(&individual.id, &individual.id).unwrap_err();
            assert!(matches!(err, KinshipError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let g = graph();
        let classifier = RelationClassifier::new(&g);
        assert!(matches!(
            classifier.classify("I1", "I404"),
            Err(KinshipError::NotFound(_))
        ));
        assert!(matches!(
            classifier.classify("I404", "I1"),
            Err(KinshipError::NotFound(_))
        ));
    }

    #[test]
    fn test_parent_and_child_are_inverse_for_every_family() {
        let g = graph();
        for family in g.families() {
            for parent in family.parents() {
                for child in &family.children {
                    assert_eq!(classify(&g, parent, child), RelationTag::Parent);
                    assert_eq!(classify(&g, child, parent), RelationTag::Child);
                }
            }
        }
    }

    #[test]
    fn test_spouse_is_symmetric() {
        let g = graph();
        assert_eq!(classify(&g, "I1", "I2"), RelationTag::Spouse);
        assert_eq!(classify(&g, "I2", "I1"), RelationTag::Spouse);
        assert_eq!(classify(&g, "I5", "I13"), RelationTag::Spouse);
    }

    #[test]
    fn test_full_siblings() {
        let g = graph();
        assert_eq!(classify(&g, "I3", "I4"), RelationTag::Sibling);
        assert_eq!(classify(&g, "I4", "I3"), RelationTag::Sibling);
    }

    #[test]
    fn test_half_siblings() {
        let g = graph();
        assert_eq!(classify(&g, "I3", "I7"), RelationTag::HalfSibling);
        assert_eq!(classify(&g, "I7", "I3"), RelationTag::HalfSibling);
        // shared mother I5 across F2 and F5
        assert_eq!(classify(&g, "I7", "I12"), RelationTag::HalfSibling);
    }

    #[test]
    fn test_grandparent_and_grandchild() {
        let g = graph();
        assert_eq!(classify(&g, "I1", "I6"), RelationTag::Grandparent);
        assert_eq!(classify(&g, "I6", "I1"), RelationTag::Grandchild);
        assert_eq!(classify(&g, "I2", "I997"), RelationTag::Grandparent);
    }

    #[test]
    fn test_step_parent_and_step_child() {
        let g = graph();
        // I5 married I1, father of I3
        assert_eq!(classify(&g, "I5", "I3"), RelationTag::StepParent);
        assert_eq!(classify(&g, "I3", "I5"), RelationTag::StepChild);
        // I13 married I5, mother of I7
        assert_eq!(classify(&g, "I13", "I7"), RelationTag::StepParent);
    }

    #[test]
    fn test_step_siblings() {
        let g = graph();
        // I3's father I1 is married to I12's mother I5; no shared parent
        assert_eq!(classify(&g, "I3", "I12"), RelationTag::StepSibling);
        assert_eq!(classify(&g, "I12", "I3"), RelationTag::StepSibling);
    }

    #[test]
    fn test_first_cousins() {
        let g = graph();
        let tag = classify(&g, "I6", "I997");
        assert_eq!(tag, RelationTag::Cousin { degree: 1, removal: 0 });
        assert_eq!(tag.to_string(), "1st cousin");
        assert_eq!(classify(&g, "I997", "I6"), tag);
    }

    #[test]
    fn test_cousin_removal_is_symmetric() {
        let g = graph();
        // I14 is one generation below I997's generation
        let forward = classify(&g, "I14", "I997");
        let backward = classify(&g, "I997", "I14");
        assert_eq!(forward, RelationTag::Cousin { degree: 1, removal: 1 });
        assert_eq!(forward.cousinship(), backward.cousinship());
    }

    #[test]
    fn test_aunt_and_niece() {
        let g = graph();
        assert_eq!(classify(&g, "I4", "I6"), RelationTag::AuntOrUncle { removal: 1 });
        assert_eq!(classify(&g, "I6", "I4"), RelationTag::NieceOrNephew { removal: 1 });
        assert_eq!(classify(&g, "I4", "I14"), RelationTag::AuntOrUncle { removal: 2 });
    }

    #[test]
    fn test_great_grandparent() {
        let g = graph();
        assert_eq!(classify(&g, "I1", "I14"), RelationTag::Ancestor { generations: 3 });
        assert_eq!(classify(&g, "I14", "I2"), RelationTag::Descendant { generations: 3 });
    }

    #[test]
    fn test_no_relationship_found() {
        let g = graph();
        assert_eq!(classify(&g, "I6", "I998"), RelationTag::NoRelation);
        assert_eq!(classify(&g, "I2", "I13"), RelationTag::NoRelation);
    }

    #[test]
    fn test_step_sibling_outranks_cousin() {
        // A and B are first cousins through G, and A's mother is married to B's father
        let individuals = ["G", "PA", "PB", "MA", "DB", "A", "B"]
            .into_iter()
            .map(person)
            .collect();
        let families = vec![
            FamilyUnit::new("F0").with_husband("G").with_child("PA").with_child("PB"),
            FamilyUnit::new("FA").with_husband("PA").with_wife("MA").with_child("A"),
            FamilyUnit::new("FB").with_husband("DB").with_wife("PB").with_child("B"),
            FamilyUnit::new("FM").with_husband("DB").with_wife("MA"),
        ];
        let g = RelationshipGraph::build(individuals, families).unwrap();
        assert_eq!(classify(&g, "A", "B"), RelationTag::StepSibling);
    }

    #[test]
    fn test_same_couple_in_two_family_records() {
        // Two family units for the same couple: children share both parents
        // but no sibling edge exists between them
        let individuals = ["P1", "P2", "C1", "C2"].into_iter().map(person).collect();
        let families = vec![
            FamilyUnit::new("F1").with_husband("P1").with_wife("P2").with_child("C1"),
            FamilyUnit::new("F2").with_husband("P1").with_wife("P2").with_child("C2"),
        ];
        let g = RelationshipGraph::build(individuals, families).unwrap();
        assert_eq!(classify(&g, "C1", "C2"), RelationTag::Sibling);
    }

    fn cyclic_records() -> (Vec<Individual>, Vec<FamilyUnit>) {
        // X and Y are each other's parent; Z is X's child; W is unrelated
        let individuals = ["X", "Y", "Z", "W"].into_iter().map(person).collect();
        let families = vec![
            FamilyUnit::new("F1").with_husband("X").with_child("Y"),
            FamilyUnit::new("F2").with_husband("Y").with_child("X"),
            FamilyUnit::new("F3").with_wife("X").with_child("Z"),
        ];
        (individuals, families)
    }

    #[test]
    fn test_cycle_above_query_is_never_classified() {
        let (individuals, families) = cyclic_records();
        let err = RelationshipGraph::build(individuals, families).unwrap_err();
        assert!(matches!(err, KinshipError::DataIntegrity(_)));
    }

    #[test]
    fn test_parent_cycle_surfaces_as_error() {
        let (individuals, families) = cyclic_records();
        let g = RelationshipGraph::build_allowing_cycles(individuals, families).unwrap();
        let err = RelationClassifier::new(&g).classify("X", "W").unwrap_err();
        assert!(matches!(err, KinshipError::DataIntegrity(_)));
    }

    #[test]
    fn test_depth_cap_from_walker() {
        let g = graph();
        let classifier =
            RelationClassifier::new(&g).with_walker(AncestryWalker::new(&g).with_max_depth(1));
        let err = classifier.classify("I14", "I998").unwrap_err();
        assert!(matches!(err, KinshipError::DataIntegrity(_)));
    }

    #[test]
    fn test_parent_reached_twice_stays_parent() {
        // I3 is both parent and grandparent of I1 (pedigree collapse)
        let individuals = ["I1", "I2", "I3"].into_iter().map(person).collect();
        let families = vec![
            FamilyUnit::new("F1").with_husband("I2").with_wife("I3").with_child("I1"),
            FamilyUnit::new("F2").with_husband("I3").with_child("I2"),
        ];
        let g = RelationshipGraph::build(individuals, families).unwrap();
        assert_eq!(classify(&g, "I3", "I1"), RelationTag::Parent);
        assert_eq!(classify(&g, "I1", "I3"), RelationTag::Child);
    }

    #[test]
    fn test_reverse_query_is_inverse_for_every_pair() {
        let g = graph();
        let ids: Vec<String> = g.individuals().map(|i| i.id.clone()).collect();
        for a in &ids {
            for b in &ids {
                if a == b {
                    continue;
                }
                let forward = classify(&g, a, b);
                assert_eq!(classify(&g, b, a), forward.inverse(), "{} -> {}: {}", a, b, forward);
            }
        }
    }

    #[test]
    fn test_classification_is_stable_across_rebuilds() {
        let first = graph();
        let second = graph();
        let ids: Vec<String> = first.individuals().map(|i| i.id.clone()).collect();
        for a in &ids {
            for b in &ids {
                if a == b {
                    continue;
                }
                assert_eq!(classify(&first, a, b), classify(&second, a, b));
            }
        }
    }
}
