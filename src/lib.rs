pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod model;
pub mod relation;
pub mod stats;
pub mod store;

pub use config::Config;
pub use error::{KinshipError, Result};
pub use graph::{AncestryWalker, RelationKind, RelationshipGraph};
pub use model::{Dataset, FamilyUnit, Individual, Sex};
pub use relation::{humanize, RelationClassifier, RelationTag};
pub use store::{KinshipStore, QueryLimits};
