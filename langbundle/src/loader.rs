//! Walks a language directory and loads every translation file into a
//! [`LocaleCollection`].
//!
//! Root layout:
//!
//! ```text
//! lang/
//! ├── en/            nested data files (`auth.php`, `admin/users.yaml`, ...)
//! ├── en.json        flat JSON translations for the same locale
//! ├── fr/
//! └── vendor/        package translations, only with `with_vendor`
//! ```
//!
//! Entries are visited in ascending name order so repeated runs produce the
//! same documents. Dot entries and files with unknown extensions are skipped.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{Config, SplitMode},
    error::Error,
    formats::SourceFormat,
    rewrite::Rewriter,
    types::{LocaleCollection, LocaleTree, OrderedMap, TreeValue},
};

/// Name of the reserved package-translations directory.
pub const VENDOR: &str = "vendor";

/// Per-run loading behavior.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Load the `vendor` directory as well.
    pub with_vendor: bool,
    /// Allow-list of translation file names; takes priority over the
    /// configured `langFiles` and `excludes` when non-empty.
    pub lang_files: Vec<String>,
    /// Also index every loaded file for split output.
    pub split: Option<SplitMode>,
}

impl LoadOptions {
    /// Creates default load options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vendor(mut self, with_vendor: bool) -> Self {
        self.with_vendor = with_vendor;
        self
    }

    pub fn with_lang_files(mut self, lang_files: Vec<String>) -> Self {
        self.lang_files = lang_files;
        self
    }

    pub fn with_split(mut self, split: Option<SplitMode>) -> Self {
        self.split = split;
        self
    }
}

/// Everything one walk produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    /// Locale code → merged translations.
    pub locales: LocaleCollection,
    /// Output name → document, filled only when splitting.
    pub files: OrderedMap<LocaleCollection>,
}

struct DirEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Where a nested file sits: its locale and that locale's directory.
#[derive(Clone, Copy)]
struct Scope<'s> {
    locale: &'s str,
    root: &'s Path,
}

/// Loads translation trees from disk, rewriting every string on the way in.
#[derive(Debug)]
pub struct Loader<'c> {
    config: &'c Config,
    rewriter: Rewriter,
    options: LoadOptions,
}

impl<'c> Loader<'c> {
    pub fn new(config: &'c Config, options: LoadOptions) -> Result<Self, Error> {
        Ok(Loader {
            config,
            rewriter: Rewriter::from_config(config)?,
            options,
        })
    }

    /// Loads every locale under `root`.
    pub fn load<P: AsRef<Path>>(&self, root: P) -> Result<Loaded, Error> {
        let root = root.as_ref();
        let mut loaded = Loaded::default();

        for entry in sorted_entries(root)? {
            if self.is_excluded_at_root(&entry.name) {
                tracing::debug!(name = %entry.name, "skipping excluded entry");
                continue;
            }

            let locale = remove_extension(&entry.name).to_string();
            if locale.is_empty() {
                continue;
            }

            let tree = if entry.is_dir {
                let scope = Scope {
                    locale: &locale,
                    root: &entry.path,
                };
                let indexed = (locale != VENDOR).then_some(scope);
                self.load_directory(&entry.path, indexed, &mut loaded.files)?
            } else {
                if SourceFormat::from_path(&entry.path) != Some(SourceFormat::Json) {
                    tracing::debug!(path = %entry.path.display(), "skipping non-JSON file");
                    continue;
                }
                tracing::debug!(path = %entry.path.display(), %locale, "loading JSON translations");
                self.load_file(SourceFormat::Json, &entry.path)?
            };

            match loaded.locales.get_mut(&locale) {
                Some(existing) => existing.merge_replacing(tree),
                None => {
                    loaded.locales.insert(locale, tree);
                }
            }
        }

        Ok(loaded)
    }

    fn is_excluded_at_root(&self, name: &str) -> bool {
        (!self.options.with_vendor && name == VENDOR)
            || self.config.excludes.iter().any(|e| e == name)
    }

    /// Whether a nested translation file named `stem` is left out.
    pub fn should_ignore_lang_file(&self, stem: &str) -> bool {
        if !self.options.lang_files.is_empty() {
            return !self.options.lang_files.iter().any(|f| f == stem);
        }

        (!self.config.lang_files.is_empty() && !self.config.lang_files.iter().any(|f| f == stem))
            || self.config.excludes.iter().any(|e| e == stem)
    }

    fn load_file(&self, format: SourceFormat, path: &Path) -> Result<LocaleTree, Error> {
        let tree = format.read(path)?;
        Ok(self.rewriter.rewrite_tree(tree))
    }

    fn load_directory(
        &self,
        dir: &Path,
        scope: Option<Scope<'_>>,
        files: &mut OrderedMap<LocaleCollection>,
    ) -> Result<LocaleTree, Error> {
        let mut tree = LocaleTree::new();

        for entry in sorted_entries(dir)? {
            if entry.is_dir {
                let nested = self.load_directory(&entry.path, scope, files)?;
                tree.insert(entry.name, TreeValue::Node(nested));
                continue;
            }

            let Some(format) =
                SourceFormat::from_path(&entry.path).filter(SourceFormat::is_nested_data)
            else {
                tracing::debug!(path = %entry.path.display(), "skipping unsupported file");
                continue;
            };

            let stem = remove_extension(&entry.name);
            if self.should_ignore_lang_file(stem) {
                tracing::debug!(path = %entry.path.display(), "skipping filtered translation file");
                continue;
            }

            tracing::debug!(path = %entry.path.display(), %format, "loading translations");
            let content = self.load_file(format, &entry.path)?;

            if let (Some(split), Some(scope)) = (self.options.split, scope) {
                let name = namespace_name(scope.root, &entry.path);
                record(files, split, scope.locale, name, &content);
            }

            tree.insert(stem, TreeValue::Node(content));
        }

        Ok(tree)
    }
}

fn record(
    files: &mut OrderedMap<LocaleCollection>,
    split: SplitMode,
    locale: &str,
    name: String,
    content: &LocaleTree,
) {
    match split {
        SplitMode::ByNamespace => {
            files
                .get_or_insert_with(&name, LocaleCollection::new)
                .insert(locale, content.clone());
        }
        SplitMode::ByLocale => {
            files
                .get_or_insert_with(locale, LocaleCollection::new)
                .get_or_insert_with(locale, LocaleTree::new)
                .insert(name, TreeValue::Node(content.clone()));
        }
    }
}

/// `admin/users.php` under `lang/en` becomes `admin_users`.
fn namespace_name(locale_root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(locale_root).unwrap_or(file);
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("_");
    remove_extension(&joined).to_string()
}

/// Returns `name` without its last extension.
pub fn remove_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(position) => &name[..position],
        None => name,
    }
}

/// Lists `dir` by ascending name, without dot entries.
fn sorted_entries(dir: &Path) -> Result<Vec<DirEntry>, Error> {
    let reader = fs::read_dir(dir).map_err(|e| Error::path_io(dir, e))?;
    let mut entries = Vec::new();

    for entry in reader {
        let entry = entry.map_err(|e| Error::path_io(dir, e))?;
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "skipping entry with a non UTF-8 name");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        entries.push(DirEntry {
            is_dir: path.is_dir(),
            name,
            path,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn leaf<'t>(tree: &'t LocaleTree, path: &[&str]) -> Option<&'t str> {
        let (last, parents) = path.split_last()?;
        let mut current = tree;
        for key in parents {
            current = current.get(key)?.as_node()?;
        }
        current.get(last)?.as_leaf()
    }

    #[test]
    fn test_remove_extension() {
        assert_eq!(remove_extension("en.json"), "en");
        assert_eq!(remove_extension("auth.php"), "auth");
        assert_eq!(remove_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(remove_extension("fr"), "fr");
    }

    #[test]
    fn test_namespace_name_flattens_separators() {
        let root = Path::new("/lang/en");
        assert_eq!(namespace_name(root, &root.join("auth.php")), "auth");
        assert_eq!(
            namespace_name(root, &root.join("admin").join("users.php")),
            "admin_users"
        );
    }

    #[test]
    fn test_should_ignore_lang_file_priority() {
        let config = Config::new()
            .with_lang_files(["auth", "validation"])
            .with_excludes(["validation"]);

        let loader = Loader::new(&config, LoadOptions::new()).unwrap();
        assert!(!loader.should_ignore_lang_file("auth"));
        assert!(loader.should_ignore_lang_file("validation"));
        assert!(loader.should_ignore_lang_file("pagination"));

        let options = LoadOptions::new().with_lang_files(vec!["validation".to_string()]);
        let loader = Loader::new(&config, options).unwrap();
        assert!(!loader.should_ignore_lang_file("validation"));
        assert!(loader.should_ignore_lang_file("auth"));
    }

    #[test]
    fn test_load_mixed_layout() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "en/auth.php", "<?php return ['failed' => 'Bad :user'];");
        write(root, "en/admin/users.yaml", "title: Users\n");
        write(root, "en/.auth.php.swp", "garbage");
        write(root, "fr.json", r#"{"Welcome": "Bienvenue :name"}"#);
        write(root, ".gitignore", "*");
        write(root, "README.md", "# docs");

        let config = Config::new();
        let loaded = Loader::new(&config, LoadOptions::new())
            .unwrap()
            .load(root)
            .unwrap();

        assert_eq!(loaded.locales.keys().collect::<Vec<_>>(), vec!["en", "fr"]);
        let en = loaded.locales.get("en").unwrap();
        assert_eq!(leaf(en, &["auth", "failed"]), Some("Bad {user}"));
        assert_eq!(leaf(en, &["admin", "users", "title"]), Some("Users"));
        let fr = loaded.locales.get("fr").unwrap();
        assert_eq!(leaf(fr, &["Welcome"]), Some("Bienvenue {name}"));
        assert!(loaded.files.is_empty());
    }

    #[test]
    fn test_vendor_and_excludes_at_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "en/messages.php", "<?php return ['a' => 'b'];");
        write(root, "de/messages.php", "<?php return ['a' => 'c'];");
        write(root, "vendor/pkg/en/messages.php", "<?php return ['x' => 'y'];");

        let config = Config::new().with_excludes(["de"]);
        let loaded = Loader::new(&config, LoadOptions::new())
            .unwrap()
            .load(root)
            .unwrap();
        assert_eq!(loaded.locales.keys().collect::<Vec<_>>(), vec!["en"]);

        let loaded = Loader::new(&config, LoadOptions::new().with_vendor(true))
            .unwrap()
            .load(root)
            .unwrap();
        assert_eq!(loaded.locales.keys().collect::<Vec<_>>(), vec!["en", "vendor"]);
        let vendor = loaded.locales.get("vendor").unwrap();
        assert_eq!(leaf(vendor, &["pkg", "en", "messages", "x"]), Some("y"));
    }

    #[test]
    fn test_split_index_by_namespace_and_locale() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "en/auth.php", "<?php return ['a' => 'A'];");
        write(root, "en/admin/users.php", "<?php return ['u' => 'U'];");
        write(root, "fr/auth.php", "<?php return ['a' => 'Á'];");
        write(root, "fr.json", r#"{"ignored": "in split index"}"#);

        let config = Config::new();
        let by_name = Loader::new(
            &config,
            LoadOptions::new().with_split(Some(SplitMode::ByNamespace)),
        )
        .unwrap()
        .load(root)
        .unwrap();
        assert_eq!(by_name.files.keys().collect::<Vec<_>>(), vec!["admin_users", "auth"]);
        let auth = by_name.files.get("auth").unwrap();
        assert_eq!(auth.keys().collect::<Vec<_>>(), vec!["en", "fr"]);
        assert_eq!(leaf(auth.get("fr").unwrap(), &["a"]), Some("Á"));

        let by_locale = Loader::new(
            &config,
            LoadOptions::new().with_split(Some(SplitMode::ByLocale)),
        )
        .unwrap()
        .load(root)
        .unwrap();
        assert_eq!(by_locale.files.keys().collect::<Vec<_>>(), vec!["en", "fr"]);
        let en = by_locale.files.get("en").unwrap().get("en").unwrap();
        assert_eq!(leaf(en, &["admin_users", "u"]), Some("U"));
        assert_eq!(leaf(en, &["auth", "a"]), Some("A"));
    }

    #[test]
    fn test_locale_code_drops_last_extension() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "pt.BR/messages.php", "<?php return ['a' => 'Olá'];");
        write(root, "zh_CN/messages.php", "<?php return ['a' => '你好'];");

        let config = Config::new();
        let loaded = Loader::new(&config, LoadOptions::new())
            .unwrap()
            .load(root)
            .unwrap();
        assert_eq!(loaded.locales.keys().collect::<Vec<_>>(), vec!["pt", "zh_CN"]);
    }

    #[test]
    fn test_invalid_json_fails_with_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "es.json", "[1, 2]");
        let config = Config::new();
        let err = Loader::new(&config, LoadOptions::new())
            .unwrap()
            .load(dir.path())
            .unwrap_err();
        assert!(matches!(err, Error::DataFormat { ref path, .. } if path.ends_with("es.json")));
    }
}
