//! The aggregation pipeline: load, relocate vendor translations, back-fill
//! from the fallback locale and render documents.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{Config, OutputFormat, SplitMode},
    error::Error,
    fallback::{apply_fallback, merge_fallback},
    loader::{LoadOptions, Loader},
    output::encode,
    types::LocaleCollection,
    vendor::relocate_vendor,
};

/// Options of a single-document run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerateOptions {
    pub format: OutputFormat,
    /// Also load `lang/vendor` and relocate it into each locale.
    pub with_vendor: bool,
    /// Only load translation files with these names (overrides the config).
    pub lang_files: Vec<String>,
}

impl GenerateOptions {
    pub fn new(format: OutputFormat) -> Self {
        GenerateOptions {
            format,
            ..Self::default()
        }
    }

    pub fn with_vendor(mut self, with_vendor: bool) -> Self {
        self.with_vendor = with_vendor;
        self
    }

    pub fn with_lang_files(mut self, lang_files: Vec<String>) -> Self {
        self.lang_files = lang_files;
        self
    }
}

/// One rendered file of a split run, written as `<name>.js`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub name: String,
    pub contents: String,
}

impl OutputDocument {
    pub fn file_name(&self) -> String {
        format!("{}.js", self.name)
    }
}

/// Builds translation bundles from a language directory.
///
/// ```rust,no_run
/// use langbundle::{Config, GenerateOptions, Generator, OutputFormat};
///
/// let generator = Generator::new(Config::default())?;
/// let options = GenerateOptions::new(OutputFormat::Es6);
/// let js = generator.generate_from_path("resources/lang", &options)?;
/// std::fs::write("resources/js/vue-i18n-locales.generated.js", js)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Generator { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads, post-processes and returns the merged collection.
    pub fn collect<P: AsRef<Path>>(
        &self,
        path: P,
        options: &GenerateOptions,
    ) -> Result<LocaleCollection, Error> {
        let path = ensure_dir(path.as_ref())?;
        let load_options = LoadOptions::new()
            .with_vendor(options.with_vendor)
            .with_lang_files(options.lang_files.clone());

        let mut locales = Loader::new(&self.config, load_options)?.load(path)?.locales;
        relocate_vendor(&mut locales);
        apply_fallback(&mut locales, &self.config.fallback_locale);

        tracing::info!(locales = locales.len(), "collected translations");
        Ok(locales)
    }

    /// Renders every locale under `path` into one document.
    pub fn generate_from_path<P: AsRef<Path>>(
        &self,
        path: P,
        options: &GenerateOptions,
    ) -> Result<String, Error> {
        let locales = self.collect(path, options)?;
        encode(&locales, options.format)
    }

    /// Renders one document per translation file or per locale.
    ///
    /// Vendor translations and root-level JSON files are not part of split
    /// output. Documents come back in discovery order.
    pub fn generate_multiple<P: AsRef<Path>>(
        &self,
        path: P,
        format: OutputFormat,
        split: SplitMode,
    ) -> Result<Vec<OutputDocument>, Error> {
        let path = ensure_dir(path.as_ref())?;
        let load_options = LoadOptions::new().with_split(Some(split));
        let files = Loader::new(&self.config, load_options)?.load(path)?.files;
        let fallback_locale = self.config.fallback_locale.as_str();

        let fallback = match split {
            SplitMode::ByLocale => files
                .get(fallback_locale)
                .and_then(|document| document.get(fallback_locale))
                .cloned(),
            SplitMode::ByNamespace => None,
        };

        let mut documents = Vec::with_capacity(files.len());
        for (name, mut document) in files {
            match (split, &fallback) {
                (SplitMode::ByLocale, Some(fallback)) if name != fallback_locale => {
                    if let Some(tree) = document.get_mut(&name) {
                        let current = std::mem::take(tree);
                        *tree = merge_fallback(current, fallback);
                    }
                }
                (SplitMode::ByNamespace, _) => apply_fallback(&mut document, fallback_locale),
                _ => {}
            }

            tracing::debug!(%name, "rendering document");
            documents.push(OutputDocument {
                contents: encode(&document, format)?,
                name,
            });
        }

        tracing::info!(documents = documents.len(), "rendered split documents");
        Ok(documents)
    }
}

fn ensure_dir(path: &Path) -> Result<&Path, Error> {
    if path.is_dir() {
        Ok(path)
    } else {
        Err(Error::configuration(format!(
            "Directory not found: {}",
            path.display()
        )))
    }
}

/// Writes documents to `<dir>/<name>.js`, creating directories as needed and
/// overwriting existing files. Returns the written paths in order.
///
/// A failure part-way leaves the files written so far in place.
pub fn write_documents<P: AsRef<Path>>(
    dir: P,
    documents: &[OutputDocument],
) -> Result<Vec<PathBuf>, Error> {
    let dir = dir.as_ref();
    let mut written = Vec::with_capacity(documents.len());

    for document in documents {
        let path = dir.join(document.file_name());
        write_file(&path, &document.contents)?;
        written.push(path);
    }

    Ok(written)
}

/// Writes one file, creating its parent directories first.
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::path_io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::path_io(path, e))
}

/// The newline-terminated list of written paths, as reported to users.
pub fn written_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("{}\n", p.display()))
        .collect()
}
