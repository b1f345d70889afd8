//! YAML translation files inside locale directories.

use std::path::Path;

use crate::{error::Error, traits::Parser, types::LocaleTree};

/// A YAML document whose top level must be a mapping.
#[derive(Debug, Clone, Copy)]
pub struct Format;

impl Parser for Format {
    fn parse_str(text: &str, path: &Path) -> Result<LocaleTree, Error> {
        serde_yaml::from_str(text).map_err(|e| Error::data_format(path, e.to_string()))
    }
}
