#![forbid(unsafe_code)]
//! Translation bundler for client-side i18n libraries.
//!
//! Walks a Laravel-style language directory (`lang/en/*.php`, `lang/fr.json`,
//! `lang/vendor/...`), merges every file into one tree per locale, rewrites
//! `:name` placeholders to `{name}`, back-fills missing keys from the
//! fallback locale and emits the result as JSON, an ES module or a UMD
//! module ready for `vue-i18n` or `vuex-i18n`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langbundle::{Config, GenerateOptions, Generator, OutputFormat};
//!
//! let generator = Generator::new(Config::default())?;
//! let module = generator.generate_from_path(
//!     "resources/lang",
//!     &GenerateOptions::new("es6".parse::<OutputFormat>()?),
//! )?;
//! println!("{module}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Source formats
//!
//! - **`<locale>.json`** at the root of the language directory
//! - **`.php`** files returning an array literal, inside locale directories
//!   (parsed statically, never executed)
//! - **`.yaml` / `.yml`** mappings inside locale directories

pub mod config;
pub mod error;
pub mod fallback;
pub mod formats;
pub mod generator;
pub mod loader;
pub mod output;
pub mod rewrite;
pub mod traits;
pub mod types;
pub mod vendor;

// Re-export most used types for easy consumption
pub use crate::{
    config::{Config, I18nLib, OutputFormat, SplitMode},
    error::Error,
    fallback::{apply_fallback, merge_fallback},
    generator::{
        GenerateOptions, Generator, OutputDocument, write_documents, write_file, written_list,
    },
    loader::{LoadOptions, Loaded, Loader},
    output::encode,
    rewrite::Rewriter,
    types::{LocaleCollection, LocaleTree, OrderedMap, TreeValue},
    vendor::relocate_vendor,
};
