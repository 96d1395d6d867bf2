pub mod json;
pub mod toml;
pub mod yaml;

use crate::error::{KinshipError, Result};
use crate::model::Dataset;

/// Trait for dataset file parsers
pub trait DatasetParser {
    /// Check if this parser can handle the given file extension
    fn can_parse(&self, extension: &str) -> bool;

    /// Parse file content into raw, not yet normalized records
    fn parse(&self, content: &str, path: &str) -> Result<Dataset>;
}

/// Parser registry that selects the appropriate parser by extension
pub struct FormatRegistry {
    parsers: Vec<Box<dyn DatasetParser>>,
}

impl FormatRegistry {
    /// Create a new registry with all built-in formats
    pub fn new() -> Self {
        let mut registry = Self {
            parsers: Vec::new(),
        };

        registry.register(Box::new(json::JsonParser));
        registry.register(Box::new(yaml::YamlParser));
        registry.register(Box::new(toml::TomlParser));

        registry
    }

    pub fn register(&mut self, parser: Box<dyn DatasetParser>) {
        self.parsers.push(parser);
    }

    /// Find a parser that can handle the given extension (case-insensitive)
    pub fn find_parser(&self, extension: &str) -> Option<&dyn DatasetParser> {
        let extension = extension.to_ascii_lowercase();
        self.parsers
            .iter()
            .find(|p| p.can_parse(&extension))
            .map(|p| p.as_ref())
    }

    pub fn parse(&self, content: &str, path: &str, extension: &str) -> Result<Dataset> {
        let parser = self.find_parser(extension).ok_or_else(|| {
            KinshipError::Parse(format!(
                "No dataset parser for extension '{}' ({})",
                extension, path
            ))
        })?;
        parser.parse(content, path)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
