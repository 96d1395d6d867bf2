//! BFS ancestry traversal over parent/child edges.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use super::RelationshipGraph;
use crate::{KinshipError, Result};

/// Generations walked before an ancestor search is treated as corrupt data.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Breadth-first walker over one graph snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AncestryWalker<'g> {
    graph: &'g RelationshipGraph,
    max_depth: usize,
}

/// Closest ancestor shared by two individuals and its distance from each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonAncestor {
    pub id: String,
    pub distance_a: usize,
    pub distance_b: usize,
}

impl<'g> AncestryWalker<'g> {
    pub fn new(graph: &'g RelationshipGraph) -> Self {
        Self {
            graph,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Every ancestor of `id` mapped to its minimum distance in generations.
    /// `id` itself is excluded.
    ///
    /// Fails with `DataIntegrity` if the walk leads back to `id` or runs past
    /// the depth cap, both of which indicate a cycle in the parent graph.
    pub fn ancestor_distances(&self, id: &str) -> Result<HashMap<String, usize>> {
        self.graph.require(id)?;

        let mut distances = HashMap::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(id.to_string());
        queue.push_back((id.to_string(), 0usize));

        while let Some((current, depth)) = queue.pop_front() {
            for parent in self.graph.parents(&current) {
                if parent == id {
                    return Err(KinshipError::DataIntegrity(format!(
                        "{} is recorded as its own ancestor",
                        id
                    )));
                }
                if !visited.insert(parent.clone()) {
                    continue;
                }
                let next = depth + 1;
                if next > self.max_depth {
                    return Err(KinshipError::DataIntegrity(format!(
                        "ancestry of {} exceeds {} generations",
                        id, self.max_depth
                    )));
                }
                distances.insert(parent.clone(), next);
                queue.push_back((parent.clone(), next));
            }
        }

        log::debug!("{} has {} known ancestor(s)", id, distances.len());
        Ok(distances)
    }

    /// Descendants of `id` within `depth` generations, excluding `id`.
    pub fn descendants(&self, id: &str, depth: usize) -> Result<BTreeSet<String>> {
        self.graph.require(id)?;

        let mut visited = HashSet::new();
        let mut result = BTreeSet::new();
        let mut queue = VecDeque::new();

        visited.insert(id.to_string());
        queue.push_back((id.to_string(), 0usize));

        while let Some((current, level)) = queue.pop_front() {
            if level >= depth {
                continue;
            }
            for child in self.graph.children(&current) {
                if visited.insert(child.clone()) {
                    result.insert(child.clone());
                    queue.push_back((child.clone(), level + 1));
                }
            }
        }

        Ok(result)
    }

    /// Generation number for every individual: 0 for those without recorded
    /// parents, otherwise one more than their deepest parent.
    ///
    /// Iterative topological pass; a parent cycle leaves individuals
    /// unprocessed and fails with `DataIntegrity`.
    pub fn generation_levels(&self) -> Result<BTreeMap<String, usize>> {
        let mut pending: HashMap<&str, usize> = HashMap::new();
        let mut levels: BTreeMap<String, usize> = BTreeMap::new();
        let mut queue = VecDeque::new();

        for individual in self.graph.individuals() {
            let id = individual.id.as_str();
            let parent_count = self.graph.parents(id).len();
            if parent_count == 0 {
                levels.insert(id.to_string(), 0);
                queue.push_back(id);
            } else {
                pending.insert(id, parent_count);
            }
        }

        while let Some(current) = queue.pop_front() {
            let level = levels.get(current).copied().unwrap_or(0);
            for child in self.graph.children(current) {
                let entry = levels.entry(child.clone()).or_insert(0);
                *entry = (*entry).max(level + 1);
                if let Some(remaining) = pending.get_mut(child.as_str()) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        pending.remove(child.as_str());
                        queue.push_back(child.as_str());
                    }
                }
            }
        }

        if !pending.is_empty() {
            let mut stuck: Vec<&str> = pending.keys().copied().collect();
            stuck.sort_unstable();
            return Err(KinshipError::DataIntegrity(format!(
                "parent cycle involving {} individual(s), starting at {}",
                stuck.len(),
                stuck[0]
            )));
        }

        Ok(levels)
    }
}

/// Pick the ancestor present in both maps that minimises `dist_a + dist_b`.
///
/// Ties go to the smaller `max(dist_a, dist_b)`, then to the lexicographically
/// smallest id. Returns `None` when the maps share no ancestor.
pub fn closest_common_ancestor(
    ancestors_a: &HashMap<String, usize>,
    ancestors_b: &HashMap<String, usize>,
) -> Option<CommonAncestor> {
    ancestors_a
        .iter()
        .filter_map(|(id, &da)| ancestors_b.get(id).map(|&db| (id, da, db)))
        .min_by(|(id_x, ax, bx), (id_y, ay, by)| {
            (ax + bx, (*ax).max(*bx), id_x.as_str()).cmp(&(ay + by, (*ay).max(*by), id_y.as_str()))
        })
        .map(|(id, distance_a, distance_b)| CommonAncestor {
            id: id.clone(),
            distance_a,
            distance_b,
        })
}
