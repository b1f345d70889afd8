//! Root-level `<locale>.json` translation documents.

use std::path::Path;

use crate::{error::Error, traits::Parser, types::LocaleTree};

/// A JSON document whose top level must be an object.
#[derive(Debug, Clone, Copy)]
pub struct Format;

impl Parser for Format {
    fn parse_str(text: &str, path: &Path) -> Result<LocaleTree, Error> {
        serde_json::from_str(text).map_err(|e| Error::data_format(path, e.to_string()))
    }
}
