//! Query session over an immutable graph snapshot.
//!
//! Readers take an `Arc<Snapshot>` and query it without holding any lock.
//! Updates build a new graph from the current one and swap it in under the
//! write lock; readers holding the previous snapshot keep a consistent view.

use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, RwLock, RwLockWriteGuard};

use lru::LruCache;

use crate::config::QueryConfig;
use crate::graph::{AncestryWalker, RelationshipGraph, DEFAULT_MAX_DEPTH};
use crate::model::{Dataset, FamilyUnit, Individual};
use crate::relation::{humanize, RelationClassifier, RelationTag};
use crate::{KinshipError, Result};

/// Per-session query limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_ancestor_depth: usize,
    /// 0 disables the classification cache.
    pub cache_capacity: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_ancestor_depth: DEFAULT_MAX_DEPTH,
            cache_capacity: 1024,
        }
    }
}

impl From<&QueryConfig> for QueryLimits {
    fn from(config: &QueryConfig) -> Self {
        Self {
            max_ancestor_depth: config.max_ancestor_depth,
            cache_capacity: config.cache_capacity,
        }
    }
}

type ClassificationCache = Mutex<LruCache<(String, String), RelationTag>>;

/// One fully built graph plus the answers cached against it.
#[derive(Debug)]
pub struct Snapshot {
    graph: RelationshipGraph,
    cache: Option<ClassificationCache>,
    limits: QueryLimits,
}

impl Snapshot {
    fn new(graph: RelationshipGraph, limits: QueryLimits) -> Self {
        let cache =
            NonZeroUsize::new(limits.cache_capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Self {
            graph,
            cache,
            limits,
        }
    }

    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    pub fn walker(&self) -> AncestryWalker<'_> {
        AncestryWalker::new(&self.graph).with_max_depth(self.limits.max_ancestor_depth)
    }

    pub fn classifier(&self) -> RelationClassifier<'_> {
        RelationClassifier::new(&self.graph).with_walker(self.walker())
    }

    /// Classify through the snapshot's cache. Errors are never cached.
    pub fn classify(&self, a: &str, b: &str) -> Result<RelationTag> {
        let Some(cache) = &self.cache else {
            return self.classifier().classify(a, b);
        };

        let key = (a.to_string(), b.to_string());
        if let Some(tag) = lock_cache(cache)?.get(&key) {
            log::debug!("classification cache hit for ({}, {})", a, b);
            return Ok(*tag);
        }

        let tag = self.classifier().classify(a, b)?;
        lock_cache(cache)?.put(key, tag);
        Ok(tag)
    }

    /// Number of cached classifications.
    pub fn cached(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|cache| cache.lock().ok().map(|c| c.len()))
            .unwrap_or(0)
    }
}

fn lock_cache(
    cache: &ClassificationCache,
) -> Result<std::sync::MutexGuard<'_, LruCache<(String, String), RelationTag>>> {
    cache
        .lock()
        .map_err(|_| KinshipError::DataIntegrity("classification cache lock poisoned".to_string()))
}

/// Thread-safe handle to the current snapshot.
#[derive(Debug)]
pub struct KinshipStore {
    current: RwLock<Arc<Snapshot>>,
    limits: QueryLimits,
}

impl KinshipStore {
    /// Validate and build the initial graph. Fails without a store if any
    /// family references an unknown individual.
    pub fn load(
        individuals: Vec<Individual>,
        families: Vec<FamilyUnit>,
        limits: QueryLimits,
    ) -> Result<Self> {
        let graph = RelationshipGraph::build(individuals, families)?;
        log::info!("Loaded kinship graph {}", graph.fingerprint());
        Ok(Self {
            current: RwLock::new(Arc::new(Snapshot::new(graph, limits))),
            limits,
        })
    }

    pub fn from_dataset(dataset: Dataset, limits: QueryLimits) -> Result<Self> {
        Self::load(dataset.individuals, dataset.families, limits)
    }

    pub fn limits(&self) -> QueryLimits {
        self.limits
    }

    /// The current snapshot. Later updates do not affect it.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.current
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| KinshipError::DataIntegrity("snapshot lock poisoned".to_string()))
    }

    /// What `a` is to `b`.
    pub fn classify(&self, a: &str, b: &str) -> Result<RelationTag> {
        self.snapshot()?.classify(a, b)
    }

    /// Classify and render the tag for `a`'s recorded sex.
    pub fn describe(&self, a: &str, b: &str) -> Result<String> {
        let snapshot = self.snapshot()?;
        let tag = snapshot.classify(a, b)?;
        let sex = snapshot.graph().require(a)?.sex;
        Ok(humanize(&tag, sex))
    }

    pub fn ancestor_distances(&self, id: &str) -> Result<HashMap<String, usize>> {
        self.snapshot()?.walker().ancestor_distances(id)
    }

    pub fn descendants(&self, id: &str, depth: usize) -> Result<BTreeSet<String>> {
        self.snapshot()?.walker().descendants(id, depth)
    }

    pub fn add_individual(&self, individual: Individual) -> Result<()> {
        self.extend(vec![individual], Vec::new())
    }

    pub fn add_family(&self, family: FamilyUnit) -> Result<()> {
        self.extend(Vec::new(), vec![family])
    }

    /// Append records to the current graph and publish the result.
    ///
    /// The extended graph is built without holding the write lock. If another
    /// update was published meanwhile, the build is redone on top of it.
    /// On error the current snapshot stays in place unchanged.
    pub fn extend(&self, individuals: Vec<Individual>, families: Vec<FamilyUnit>) -> Result<()> {
        loop {
            let base = self.snapshot()?;
            let next = base.graph.extend(individuals.clone(), families.clone())?;

            let mut current = self.write_lock()?;
            if !Arc::ptr_eq(&current, &base) {
                log::debug!("Snapshot replaced during extend, rebuilding");
                continue;
            }
            log::info!(
                "Extended graph with {} individual(s), {} family unit(s): {}",
                individuals.len(),
                families.len(),
                next.fingerprint()
            );
            *current = Arc::new(Snapshot::new(next, self.limits));
            return Ok(());
        }
    }

    /// Replace the whole graph with a fresh build from `dataset`.
    pub fn reload(&self, dataset: Dataset) -> Result<()> {
        let graph = RelationshipGraph::from_dataset(dataset)?;
        let mut current = self.write_lock()?;
        log::info!("Reloaded kinship graph {}", graph.fingerprint());
        *current = Arc::new(Snapshot::new(graph, self.limits));
        Ok(())
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, Arc<Snapshot>>> {
        self.current
            .write()
            .map_err(|_| KinshipError::DataIntegrity("snapshot lock poisoned".to_string()))
    }
}
