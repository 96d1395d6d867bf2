use super::DatasetParser;
use crate::error::{KinshipError, Result};
use crate::model::Dataset;

/// TOML dataset written as `[[individuals]]` and `[[families]]` tables
pub struct TomlParser;

impl DatasetParser for TomlParser {
    fn can_parse(&self, extension: &str) -> bool {
        extension == "toml"
    }

    fn parse(&self, content: &str, path: &str) -> Result<Dataset> {
        ::toml::from_str(content)
            .map_err(|e| KinshipError::Parse(format!("TOML parse error in {}: {}", path, e)))
    }
}
