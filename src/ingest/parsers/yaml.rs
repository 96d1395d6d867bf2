use super::DatasetParser;
use crate::error::{KinshipError, Result};
use crate::model::Dataset;

/// YAML dataset with `individuals` and `families` sequences
pub struct YamlParser;

impl DatasetParser for YamlParser {
    fn can_parse(&self, extension: &str) -> bool {
        matches!(extension, "yaml" | "yml")
    }

    fn parse(&self, content: &str, path: &str) -> Result<Dataset> {
        serde_yaml_ng::from_str(content)
            .map_err(|e| KinshipError::Parse(format!("YAML parse error in {}: {}", path, e)))
    }
}
