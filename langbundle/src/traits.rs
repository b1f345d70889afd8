//! Traits for format-agnostic loading of translation files in langbundle.

use std::{fs::File, io::Read, path::Path};

use crate::{error::Error, types::LocaleTree};

/// A trait for decoding one translation source file into a [`LocaleTree`].
///
/// # Example
///
/// ```rust,no_run
/// use langbundle::traits::Parser;
/// use langbundle::formats::PhpFormat;
/// let tree = PhpFormat::read_from("lang/en/auth.php")?;
/// println!("{} keys", tree.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse already decoded text. `path` is only used in error messages.
    fn parse_str(text: &str, path: &Path) -> Result<LocaleTree, Error>;

    /// Parse from file path, detecting a UTF-8 or UTF-16 byte order mark.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<LocaleTree, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::path_io(path, e))?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder
            .read_to_string(&mut decoded)
            .map_err(|e| Error::data_format(path, format!("cannot decode file: {e}")))?;

        let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);
        Self::parse_str(text, path)
    }
}
