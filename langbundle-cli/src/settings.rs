//! Locating and reading the `langbundle.toml` configuration file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use langbundle::{Config, Error};

/// Config file looked up under the base path when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "langbundle.toml";

/// Loads the run configuration.
///
/// An explicit `config` path must exist. Without one, `<base_path>/langbundle.toml`
/// is used when present and the built-in defaults otherwise.
pub fn load_config(base_path: &Path, config: Option<&Path>) -> Result<Config, Error> {
    let (path, required) = match config {
        Some(path) => (path.to_path_buf(), true),
        None => (base_path.join(DEFAULT_CONFIG_FILE), false),
    };

    if !path.is_file() {
        if required {
            return Err(Error::configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let text = fs::read_to_string(&path).map_err(|e| Error::path_io(&path, e))?;
    let config = parse_config(&text).map_err(|e| match e {
        Error::Configuration(message) => {
            Error::configuration(format!("{}: {message}", path.display()))
        }
        other => other,
    })?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Parses and validates the TOML text of a config file.
pub fn parse_config(text: &str) -> Result<Config, Error> {
    let config: Config =
        toml::from_str(text).map_err(|e| Error::configuration(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Appends a configured project path (`/resources/lang`) to the base path.
///
/// Configured paths are always relative to the project, so a leading
/// separator is not treated as the filesystem root.
pub fn resolve(base_path: &Path, configured: &str) -> PathBuf {
    base_path.join(configured.trim_start_matches(['/', '\\']))
}
