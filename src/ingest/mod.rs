//! Dataset loading: the boundary where raw record files become a `Dataset`.
//!
//! Record ids are normalized here (GEDCOM xrefs like `@I1@` become `I1`) and
//! placeholder parents (`""`, `"Unknown"`) become absent. Nothing past this
//! boundary ever sees a sentinel id.

pub mod parsers;

pub use parsers::{DatasetParser, FormatRegistry};

use std::path::Path;

use crate::error::{KinshipError, Result};
use crate::model::{Dataset, FamilyUnit};

/// Read, parse and normalize a dataset file, choosing the format by extension.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    load_dataset_with(&FormatRegistry::new(), path)
}

pub fn load_dataset_with(registry: &FormatRegistry, path: &Path) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            KinshipError::Parse(format!("Dataset file has no extension: {}", path.display()))
        })?;

    let content = std::fs::read_to_string(path)?;
    let raw = registry.parse(&content, &path.display().to_string(), extension)?;
    let dataset = normalize_dataset(raw);

    log::info!(
        "Loaded {} individuals and {} families from {}",
        dataset.individuals.len(),
        dataset.families.len(),
        path.display()
    );
    Ok(dataset)
}

/// Strip GEDCOM xref markers and surrounding whitespace from an id.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().replace('@', "")
}

/// Normalize an optional reference; placeholders become `None`.
fn normalize_ref(raw: Option<String>) -> Option<String> {
    raw.map(|id| normalize_id(&id))
        .filter(|id| !id.is_empty() && !id.eq_ignore_ascii_case("unknown"))
}

/// Apply id normalization to every record.
pub fn normalize_dataset(mut dataset: Dataset) -> Dataset {
    for individual in &mut dataset.individuals {
        individual.id = normalize_id(&individual.id);
    }
    dataset.families = dataset.families.into_iter().map(normalize_family).collect();
    dataset
}

fn normalize_family(family: FamilyUnit) -> FamilyUnit {
    let children = family
        .children
        .into_iter()
        .filter_map(|child| normalize_ref(Some(child)))
        .collect();
    FamilyUnit {
        id: normalize_id(&family.id),
        husband_id: normalize_ref(family.husband_id),
        wife_id: normalize_ref(family.wife_id),
        children,
        ..family
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RelationshipGraph;
    use crate::relation::{RelationClassifier, RelationTag};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("@I1@"), "I1");
        assert_eq!(normalize_id(" F23 "), "F23");
        assert_eq!(normalize_id("I7"), "I7");
    }

    #[test]
    fn test_placeholder_parents_become_absent() {
        let family = FamilyUnit {
            id: "@F1@".to_string(),
            husband_id: Some("Unknown".to_string()),
            wife_id: Some("@I2@".to_string()),
            marriage_date: None,
            children: vec!["@I3@".to_string(), "".to_string()],
        };
        let normalized = normalize_family(family);
        assert_eq!(normalized.id, "F1");
        assert!(normalized.husband_id.is_none());
        assert_eq!(normalized.wife_id.as_deref(), Some("I2"));
        assert_eq!(normalized.children, vec!["I3".to_string()]);
    }

    #[test]
    fn test_load_json_dataset_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("family.json");
        fs::write(
            &path,
            r#"{
                "individuals": [
                    {"id": "@I1@", "full_name": "John Smith", "sex": "M"},
                    {"id": "@I2@", "full_name": "Mary Jones", "sex": "F"},
                    {"id": "@I3@", "full_name": "Thomas Smith", "sex": "M"}
                ],
                "families": [
                    {"id": "@F1@", "husband_id": "@I1@", "wife_id": "@I2@", "children": ["@I3@"]}
                ]
            }"#,
        )
        .unwrap();

        let dataset = load_dataset(&path).unwrap();
        let graph = RelationshipGraph::from_dataset(dataset).unwrap();
        let tag = RelationClassifier::new(&graph).classify("I1", "I3").unwrap();
        assert_eq!(tag, RelationTag::Parent);
    }

    #[test]
    fn test_unknown_parent_creates_no_edge() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("family.yaml");
        fs::write(
            &path,
            r#"
individuals:
  - {id: I1, full_name: Ann Hart, sex: F}
  - {id: I2, full_name: Ben Hart, sex: M}
families:
  - {id: F1, husband_id: Unknown, wife_id: I1, children: [I2]}
"#,
        )
        .unwrap();

        let graph = RelationshipGraph::from_dataset(load_dataset(&path).unwrap()).unwrap();
        assert_eq!(graph.parents("I2").len(), 1);
        assert!(!graph.contains("Unknown"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_dataset(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, KinshipError::Io(_)));
    }

    #[test]
    fn test_extensionless_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("family");
        fs::write(&path, "{}").unwrap();
        assert!(matches!(load_dataset(&path), Err(KinshipError::Parse(_))));
    }

    #[test]
    fn test_sample_dataset_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/family.json");
        let dataset = load_dataset(&path).unwrap();
        let graph = RelationshipGraph::from_dataset(dataset).unwrap();
        assert!(!graph.is_empty());
    }
}
