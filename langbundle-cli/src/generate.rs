//! The `langbundle` run: resolve paths against the base path, generate and
//! write the output files.

use std::path::PathBuf;

use langbundle::{
    Config, Error, GenerateOptions, Generator, OutputFormat, SplitMode, write_documents,
    write_file,
};

use crate::settings::resolve;

/// Everything the command line decided for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCommand {
    /// Project root that configured paths are appended to.
    pub base_path: PathBuf,
    pub format: OutputFormat,
    /// `None` writes a single document.
    pub split: Option<SplitMode>,
    pub with_vendor: bool,
    /// Output file relative to the base path, replacing `jsFile`.
    pub file_name: Option<String>,
    pub lang_files: Vec<String>,
}

/// Picks the output format; `--umd` wins over `--format`.
///
/// Runs before any file is touched so a bad format never produces partial
/// output.
pub fn resolve_format(format: &str, umd: bool) -> Result<OutputFormat, Error> {
    if umd {
        return Ok(OutputFormat::Umd);
    }
    format.parse()
}

/// `--multi-locales` wins over `--multi`.
pub fn split_mode(multi: bool, multi_locales: bool) -> Option<SplitMode> {
    if multi_locales {
        Some(SplitMode::ByLocale)
    } else if multi {
        Some(SplitMode::ByNamespace)
    } else {
        None
    }
}

/// Splits a comma separated `--lang-files` value, dropping empty names.
pub fn parse_lang_files(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Generates and writes the output, returning the written paths.
pub fn run_generate(command: &GenerateCommand, config: Config) -> Result<Vec<PathBuf>, Error> {
    let root = resolve(&command.base_path, &config.lang_path);
    let generator = Generator::new(config)?;
    let config = generator.config();
    tracing::info!(root = %root.display(), format = %command.format, "generating translations");

    match command.split {
        Some(split) => {
            let documents = generator.generate_multiple(&root, command.format, split)?;
            let out_dir = resolve(&command.base_path, &config.js_path);
            write_documents(out_dir, &documents)
        }
        None => {
            let options = GenerateOptions::new(command.format)
                .with_vendor(command.with_vendor)
                .with_lang_files(command.lang_files.clone());
            let data = generator.generate_from_path(&root, &options)?;

            let target = resolve(
                &command.base_path,
                command.file_name.as_deref().unwrap_or(&config.js_file),
            );
            write_file(&target, &data)?;
            Ok(vec![target])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let lang = dir.path().join("resources").join("lang");
        fs::create_dir_all(lang.join("en")).unwrap();
        fs::create_dir_all(lang.join("fr")).unwrap();
        fs::write(
            lang.join("en").join("auth.php"),
            "<?php return ['failed' => 'Failed :user', 'ok' => 'OK'];",
        )
        .unwrap();
        fs::write(
            lang.join("fr").join("auth.php"),
            "<?php return ['failed' => 'Échec :user'];",
        )
        .unwrap();
        dir
    }

    fn command(base_path: PathBuf) -> GenerateCommand {
        GenerateCommand {
            base_path,
            format: OutputFormat::Json,
            split: None,
            with_vendor: false,
            file_name: None,
            lang_files: Vec::new(),
        }
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format("es6", false).unwrap(), OutputFormat::Es6);
        assert_eq!(resolve_format("JSON", false).unwrap(), OutputFormat::Json);
        assert_eq!(resolve_format("json", true).unwrap(), OutputFormat::Umd);
        assert!(resolve_format("xml", false).is_err());
    }

    #[test]
    fn test_split_mode_priority() {
        assert_eq!(split_mode(false, false), None);
        assert_eq!(split_mode(true, false), Some(SplitMode::ByNamespace));
        assert_eq!(split_mode(true, true), Some(SplitMode::ByLocale));
    }

    #[test]
    fn test_parse_lang_files() {
        assert_eq!(parse_lang_files("auth, validation,,"), vec!["auth", "validation"]);
        assert!(parse_lang_files("").is_empty());
    }

    #[test]
    fn test_single_mode_writes_js_file() {
        let dir = project();
        let written = run_generate(&command(dir.path().to_path_buf()), Config::default()).unwrap();

        let expected = dir
            .path()
            .join("resources/js/vue-i18n-locales.generated.js");
        assert_eq!(written, vec![expected.clone()]);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(expected).unwrap()).unwrap();
        assert_eq!(json["en"]["auth"]["failed"], "Failed {user}");
        assert_eq!(json["fr"]["auth"]["failed"], "Échec {user}");
        assert_eq!(json["fr"]["auth"]["ok"], "OK");
    }

    #[test]
    fn test_file_name_overrides_js_file() {
        let dir = project();
        let mut command = command(dir.path().to_path_buf());
        command.file_name = Some("/public/i18n.js".to_string());
        let written = run_generate(&command, Config::default()).unwrap();
        assert_eq!(written, vec![dir.path().join("public").join("i18n.js")]);
        assert!(written[0].is_file());
    }

    #[test]
    fn test_multi_mode_writes_into_js_path() {
        let dir = project();
        let mut command = command(dir.path().to_path_buf());
        command.split = Some(SplitMode::ByLocale);
        let written = run_generate(&command, Config::default()).unwrap();

        let langs = dir.path().join("resources").join("js").join("langs");
        assert_eq!(written, vec![langs.join("en.js"), langs.join("fr.js")]);
    }

    #[test]
    fn test_missing_lang_path_is_error() {
        let dir = TempDir::new().unwrap();
        let err = run_generate(&command(dir.path().to_path_buf()), Config::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
