//! Options resolved before a run starts.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Client library the generated placeholders target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum I18nLib {
    /// `vue-i18n`: `{name}` placeholders, pipes kept as-is.
    #[default]
    #[serde(rename = "vue-i18n")]
    VueI18n,
    /// `vuex-i18n`: `{name}` placeholders, plural pipes become ` ::: `.
    #[serde(rename = "vuex-i18n")]
    VuexI18n,
}

impl Display for I18nLib {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            I18nLib::VueI18n => write!(f, "vue-i18n"),
            I18nLib::VuexI18n => write!(f, "vuex-i18n"),
        }
    }
}

impl FromStr for I18nLib {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vue-i18n" => Ok(I18nLib::VueI18n),
            "vuex-i18n" => Ok(I18nLib::VuexI18n),
            other => Err(Error::configuration(format!(
                "Unknown i18n library: {other}. Supported: vue-i18n, vuex-i18n"
            ))),
        }
    }
}

/// Shape of each generated document.
///
/// Accepts the case-insensitive strings `"es6"`, `"umd"` and `"json"`; any
/// other value is a [`Error::Configuration`].
///
/// ```rust
/// use langbundle::OutputFormat;
/// assert_eq!("umd".parse::<OutputFormat>().unwrap(), OutputFormat::Umd);
/// assert!("xml".parse::<OutputFormat>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `const translations = …; export default translations;`
    #[default]
    Es6,
    /// Universal module definition (CommonJS, AMD and a browser global).
    Umd,
    /// The bare JSON document.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Es6 => write!(f, "es6"),
            OutputFormat::Umd => write!(f, "umd"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es6" => Ok(OutputFormat::Es6),
            "umd" => Ok(OutputFormat::Umd),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::configuration(format!("Invalid format passed: {s}"))),
        }
    }
}

/// How `Generator::generate_multiple` splits its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// One document per translation file, holding every locale.
    ByNamespace,
    /// One document per locale, holding every translation file.
    ByLocale,
}

/// Generator settings, usually read from `langbundle.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub i18n_lib: I18nLib,
    /// File and directory names that are never loaded.
    pub excludes: Vec<String>,
    #[serde(alias = "escape_char")]
    pub escape_char: String,
    /// Locale whose keys back-fill every other locale.
    #[serde(alias = "fallback_locale")]
    pub fallback_locale: String,
    /// When non-empty, only translation files with these names are loaded.
    pub lang_files: Vec<String>,
    pub lang_path: String,
    pub js_file: String,
    pub js_path: String,
    pub show_output_messages: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            i18n_lib: I18nLib::default(),
            excludes: Vec::new(),
            escape_char: "!".to_string(),
            fallback_locale: "en".to_string(),
            lang_files: Vec::new(),
            lang_path: "/resources/lang".to_string(),
            js_file: "/resources/js/vue-i18n-locales.generated.js".to_string(),
            js_path: "/resources/js/langs/".to_string(),
            show_output_messages: false,
        }
    }
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_i18n_lib(mut self, i18n_lib: I18nLib) -> Self {
        self.i18n_lib = i18n_lib;
        self
    }

    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_escape_char(mut self, escape_char: impl Into<String>) -> Self {
        self.escape_char = escape_char.into();
        self
    }

    pub fn with_fallback_locale(mut self, fallback_locale: impl Into<String>) -> Self {
        self.fallback_locale = fallback_locale.into();
        self
    }

    pub fn with_lang_files<I, S>(mut self, lang_files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lang_files = lang_files.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the options the transform depends on.
    pub fn validate(&self) -> Result<(), Error> {
        if self.escape_char.is_empty() {
            return Err(Error::configuration("escapeChar must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("es6".parse::<OutputFormat>().unwrap(), OutputFormat::Es6);
        assert_eq!("UMD".parse::<OutputFormat>().unwrap(), OutputFormat::Umd);
        assert_eq!(" json ".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_output_format_rejects_unknown() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("Invalid format passed: xml"));
    }

    #[test]
    fn test_output_format_display_roundtrip() {
        for format in [OutputFormat::Es6, OutputFormat::Umd, OutputFormat::Json] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_i18n_lib_from_str() {
        assert_eq!("vuex-i18n".parse::<I18nLib>().unwrap(), I18nLib::VuexI18n);
        assert_eq!("vue-i18n".parse::<I18nLib>().unwrap(), I18nLib::VueI18n);
        assert!("i18next".parse::<I18nLib>().is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.i18n_lib, I18nLib::VueI18n);
        assert_eq!(config.escape_char, "!");
        assert_eq!(config.fallback_locale, "en");
        assert!(config.excludes.is_empty());
        assert!(config.lang_files.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: Config = serde_json::from_str(
            r#"{"i18nLib": "vuex-i18n", "excludes": ["validation"], "escape_char": "^"}"#,
        )
        .unwrap();
        assert_eq!(config.i18n_lib, I18nLib::VuexI18n);
        assert_eq!(config.excludes, vec!["validation"]);
        assert_eq!(config.escape_char, "^");
        assert_eq!(config.fallback_locale, "en");
    }

    #[test]
    fn test_config_validate_empty_escape() {
        let config = Config::new().with_escape_char("");
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }
}
