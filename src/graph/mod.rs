//! Relationship graph: primary kinship edges derived from family units, and
//! breadth-first ancestry traversal over them.
//!
//! Only the primary kinds (parent, child, spouse, sibling) are stored. Half,
//! step, grand and cousin relations are computed on demand by the classifier.

mod builder;
mod traversal;

pub use traversal::{closest_common_ancestor, AncestryWalker, CommonAncestor, DEFAULT_MAX_DEPTH};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::model::{FamilyUnit, Individual};
use crate::{KinshipError, Result};

/// Kind of a stored edge. An edge `source --kind--> target` reads
/// "target is source's <kind>": `I3 --parent--> I1` means I1 is I3's parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Parent,
    Child,
    Spouse,
    Sibling,
}

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Parent,
        RelationKind::Child,
        RelationKind::Spouse,
        RelationKind::Sibling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Parent => "parent",
            RelationKind::Child => "child",
            RelationKind::Spouse => "spouse",
            RelationKind::Sibling => "sibling",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stored edge, borrowed from the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge<'g> {
    pub source: &'g str,
    pub kind: RelationKind,
    pub target: &'g str,
}

type Adjacency = BTreeMap<RelationKind, BTreeSet<String>>;

static NO_NEIGHBORS: BTreeSet<String> = BTreeSet::new();

/// Read-only snapshot of individuals, family units and their primary edges.
///
/// Built once (see `RelationshipGraph::build`) and never mutated in place;
/// incremental updates produce a new graph.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    individuals: BTreeMap<String, Individual>,
    families: BTreeMap<String, FamilyUnit>,
    adjacency: BTreeMap<String, Adjacency>,
    /// child id -> id of the one family unit listing it as a child
    birth_family: BTreeMap<String, String>,
}

impl RelationshipGraph {
    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.individuals.contains_key(id)
    }

    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals.get(id)
    }

    /// Look up an individual, failing with `NotFound` for unknown ids.
    pub fn require(&self, id: &str) -> Result<&Individual> {
        self.individuals
            .get(id)
            .ok_or_else(|| KinshipError::NotFound(id.to_string()))
    }

    /// All individuals ordered by id.
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values()
    }

    pub fn family(&self, id: &str) -> Option<&FamilyUnit> {
        self.families.get(id)
    }

    /// All family units ordered by id.
    pub fn families(&self) -> impl Iterator<Item = &FamilyUnit> {
        self.families.values()
    }

    /// Id of the family unit that lists `id` as a child.
    pub fn birth_family(&self, id: &str) -> Option<&str> {
        self.birth_family.get(id).map(String::as_str)
    }

    /// Ids related to `id` by `kind`; empty for unknown ids.
    pub fn neighbors(&self, id: &str, kind: RelationKind) -> &BTreeSet<String> {
        self.adjacency
            .get(id)
            .and_then(|adj| adj.get(&kind))
            .unwrap_or(&NO_NEIGHBORS)
    }

    pub fn parents(&self, id: &str) -> &BTreeSet<String> {
        self.neighbors(id, RelationKind::Parent)
    }

    pub fn children(&self, id: &str) -> &BTreeSet<String> {
        self.neighbors(id, RelationKind::Child)
    }

    pub fn spouses(&self, id: &str) -> &BTreeSet<String> {
        self.neighbors(id, RelationKind::Spouse)
    }

    pub fn siblings(&self, id: &str) -> &BTreeSet<String> {
        self.neighbors(id, RelationKind::Sibling)
    }

    /// True if `target` is `source`'s `kind`.
    pub fn has_edge(&self, source: &str, kind: RelationKind, target: &str) -> bool {
        self.neighbors(source, kind).contains(target)
    }

    /// Total number of edges touching `id`, all kinds.
    pub fn degree(&self, id: &str) -> usize {
        self.adjacency
            .get(id)
            .map(|adj| adj.values().map(BTreeSet::len).sum())
            .unwrap_or(0)
    }

    /// Every stored directed edge, ordered by source id, kind, then target id.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.adjacency.iter().flat_map(|(source, adj)| {
            adj.iter().flat_map(move |(kind, targets)| {
                targets.iter().map(move |target| Edge {
                    source: source.as_str(),
                    kind: *kind,
                    target: target.as_str(),
                })
            })
        })
    }

    /// Number of directed edges of one kind.
    pub fn edge_count(&self, kind: RelationKind) -> usize {
        self.adjacency
            .values()
            .filter_map(|adj| adj.get(&kind))
            .map(BTreeSet::len)
            .sum()
    }

    /// SHA256 over the sorted primary edges and the individual ids.
    /// Identical input always produces an identical fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for id in self.individuals.keys() {
            hasher.update(id.as_bytes());
            hasher.update(b"\n");
        }
        for edge in self.edges() {
            hasher.update(edge.source.as_bytes());
            hasher.update(b"\t");
            hasher.update(edge.kind.as_str().as_bytes());
            hasher.update(b"\t");
            hasher.update(edge.target.as_bytes());
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}
