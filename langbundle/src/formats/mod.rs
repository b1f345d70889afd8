//! Translation source formats understood by langbundle.
//!
//! This module re-exports the parser for each format and provides the
//! [`SourceFormat`] enum used by the directory walker to pick one.

pub mod json;
pub mod php;
pub mod yaml;

use std::{
    fmt::{Display, Formatter},
    path::Path,
};

pub use json::Format as JsonFormat;
pub use php::Format as PhpFormat;
pub use yaml::Format as YamlFormat;

use crate::{error::Error, traits::Parser, types::LocaleTree};

/// Every source format, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `<locale>.json` documents at the root of the language directory.
    Json,
    /// `return [...];` array files inside locale directories.
    Php,
    /// YAML mappings inside locale directories.
    Yaml,
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Php => write!(f, "php"),
            SourceFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl SourceFormat {
    /// Infers the format from a path's extension (case-sensitive, like the
    /// file systems these trees usually live on).
    ///
    /// ```rust
    /// use langbundle::formats::SourceFormat;
    /// assert_eq!(SourceFormat::from_path("en/auth.php"), Some(SourceFormat::Php));
    /// assert_eq!(SourceFormat::from_path("fr.json"), Some(SourceFormat::Json));
    /// assert_eq!(SourceFormat::from_path("en/.auth.php.swp"), None);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some("json") => Some(SourceFormat::Json),
            Some("php") => Some(SourceFormat::Php),
            Some("yaml") | Some("yml") => Some(SourceFormat::Yaml),
            _ => None,
        }
    }

    /// Whether files of this format may appear inside a locale directory.
    pub fn is_nested_data(&self) -> bool {
        matches!(self, SourceFormat::Php | SourceFormat::Yaml)
    }

    /// Reads and decodes one file of this format.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<LocaleTree, Error> {
        match self {
            SourceFormat::Json => JsonFormat::read_from(path),
            SourceFormat::Php => PhpFormat::read_from(path),
            SourceFormat::Yaml => YamlFormat::read_from(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(SourceFormat::from_path("a/b.yml"), Some(SourceFormat::Yaml));
        assert_eq!(SourceFormat::from_path("a/b.yaml"), Some(SourceFormat::Yaml));
        assert_eq!(SourceFormat::from_path("a/b.PHP"), None);
        assert_eq!(SourceFormat::from_path("a/.gitignore"), None);
        assert_eq!(SourceFormat::from_path("a/README"), None);
    }

    #[test]
    fn test_nested_data_formats() {
        assert!(SourceFormat::Php.is_nested_data());
        assert!(SourceFormat::Yaml.is_nested_data());
        assert!(!SourceFormat::Json.is_nested_data());
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceFormat::Json.to_string(), "json");
        assert_eq!(SourceFormat::Php.to_string(), "php");
        assert_eq!(SourceFormat::Yaml.to_string(), "yaml");
    }
}
