use super::DatasetParser;
use crate::error::{KinshipError, Result};
use crate::model::Dataset;

/// JSON dataset: `{"individuals": [...], "families": [...]}`
pub struct JsonParser;

impl DatasetParser for JsonParser {
    fn can_parse(&self, extension: &str) -> bool {
        extension == "json"
    }

    fn parse(&self, content: &str, path: &str) -> Result<Dataset> {
        serde_json::from_str(content)
            .map_err(|e| KinshipError::Parse(format!("JSON parse error in {}: {}", path, e)))
    }
}
