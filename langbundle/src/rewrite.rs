//! Placeholder rewriting between the Laravel-style `:name` syntax and the
//! syntax expected by the client library.
//!
//! Three passes run over every key and every translation string, always in
//! this order:
//!
//! 1. for `vuex-i18n` only, pipes separating plural forms become ` ::: `;
//! 2. `:name` becomes `{name}` unless it directly follows `mailto`, `tel`
//!    or the escape character;
//! 3. the escape character in front of a surviving `:name` is dropped.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::{Config, I18nLib};
use crate::error::Error;
use crate::types::{LocaleTree, TreeValue};

lazy_static! {
    static ref PIPE_REGEX: Regex = Regex::new(r"(?-u:\s)*\|(?-u:\s)*").unwrap();
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r":[A-Za-z0-9_]+").unwrap();
}

/// Separator `vuex-i18n` uses between plural forms.
const THREE_COLONS: &str = " ::: ";

/// Prefixes that keep a following `:word` verbatim (URI schemes).
const SCHEME_PREFIXES: [&str; 2] = ["mailto", "tel"];

/// Applies the string passes configured for one run.
#[derive(Debug, Clone)]
pub struct Rewriter {
    lib: I18nLib,
    escape_char: String,
    escaped_regex: Regex,
}

impl Rewriter {
    pub fn new(lib: I18nLib, escape_char: impl Into<String>) -> Result<Self, Error> {
        let escape_char = escape_char.into();
        if escape_char.is_empty() {
            return Err(Error::configuration("escape character must not be empty"));
        }
        let pattern = format!("{}(:[A-Za-z0-9_]+)", regex::escape(&escape_char));
        let escaped_regex = Regex::new(&pattern).map_err(|e| {
            Error::configuration(format!("invalid escape character `{escape_char}`: {e}"))
        })?;

        Ok(Rewriter {
            lib,
            escape_char,
            escaped_regex,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(config.i18n_lib, config.escape_char.clone())
    }

    /// Runs all passes over one string.
    pub fn rewrite(&self, input: &str) -> String {
        let adjusted = self.adjust_string(input);
        self.remove_escape_character(&adjusted)
    }

    /// Dialect conversion followed by placeholder conversion.
    pub fn adjust_string(&self, input: &str) -> String {
        let converted;
        let input = if self.lib == I18nLib::VuexI18n {
            converted = PIPE_REGEX.replace_all(input, THREE_COLONS);
            &*converted
        } else {
            input
        };

        let mut out = String::with_capacity(input.len() + 8);
        let mut last = 0;
        for found in PLACEHOLDER_REGEX.find_iter(input) {
            let before = &input[..found.start()];
            if SCHEME_PREFIXES.iter().any(|p| before.ends_with(p))
                || before.ends_with(self.escape_char.as_str())
            {
                continue;
            }
            out.push_str(&input[last..found.start()]);
            out.push('{');
            out.push_str(&found.as_str()[1..]);
            out.push('}');
            last = found.end();
        }
        out.push_str(&input[last..]);
        out
    }

    /// Strips the escape character from escaped `:name` sequences.
    pub fn remove_escape_character(&self, input: &str) -> String {
        self.escaped_regex.replace_all(input, "$1").into_owned()
    }

    /// Rewrites every key and leaf of a tree, preserving order.
    pub fn rewrite_tree(&self, tree: LocaleTree) -> LocaleTree {
        tree.into_iter()
            .map(|(key, value)| {
                let value = match value {
                    TreeValue::Leaf(s) => TreeValue::Leaf(self.rewrite(&s)),
                    TreeValue::Node(nested) => TreeValue::Node(self.rewrite_tree(nested)),
                };
                (self.rewrite(&key), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vue() -> Rewriter {
        Rewriter::new(I18nLib::VueI18n, "!").unwrap()
    }

    fn vuex() -> Rewriter {
        Rewriter::new(I18nLib::VuexI18n, "!").unwrap()
    }

    #[test]
    fn test_placeholder_conversion() {
        assert_eq!(vue().rewrite("Hello :name"), "Hello {name}");
        assert_eq!(vuex().rewrite("Hello :name"), "Hello {name}");
        assert_eq!(
            vue().rewrite(":count items in :place_1"),
            "{count} items in {place_1}"
        );
    }

    #[test]
    fn test_adjacent_placeholders_convert_independently() {
        assert_eq!(vue().rewrite(":a:b"), "{a}{b}");
        assert_eq!(vue().rewrite("::x"), ":{x}");
    }

    #[test]
    fn test_uri_schemes_untouched() {
        assert_eq!(vue().rewrite("mailto:support"), "mailto:support");
        assert_eq!(vue().rewrite("Call tel:5551234"), "Call tel:5551234");
        assert_eq!(
            vue().rewrite("Mail mailto:x or :name"),
            "Mail mailto:x or {name}"
        );
    }

    #[test]
    fn test_escaped_placeholder_kept_literal() {
        assert_eq!(vue().rewrite("Don't !:break this"), "Don't :break this");
        assert_eq!(vuex().rewrite("!:a and :b"), ":a and {b}");
    }

    #[test]
    fn test_custom_escape_character() {
        let rewriter = Rewriter::new(I18nLib::VueI18n, "\\").unwrap();
        assert_eq!(rewriter.rewrite(r"Time \:10 at :time"), "Time :10 at {time}");

        let multi = Rewriter::new(I18nLib::VueI18n, "^^").unwrap();
        assert_eq!(multi.rewrite("^^:raw :cooked"), ":raw {cooked}");
    }

    #[test]
    fn test_escape_without_placeholder_kept() {
        assert_eq!(vue().rewrite("Hi! :name"), "Hi! {name}");
        assert_eq!(vue().rewrite("Wow!"), "Wow!");
    }

    #[test]
    fn test_pipes_only_for_vuex() {
        assert_eq!(
            vuex().rewrite("one apple | :count apples"),
            "one apple ::: {count} apples"
        );
        assert_eq!(vuex().rewrite("a|b"), "a ::: b");
        assert_eq!(
            vue().rewrite("one apple | :count apples"),
            "one apple | {count} apples"
        );
    }

    #[test]
    fn test_word_characters_are_ascii() {
        assert_eq!(vue().rewrite(":é"), ":é");
        assert_eq!(vue().rewrite(":nameé"), "{name}é");
    }

    #[test]
    fn test_rewrite_tree_keys_and_values() {
        let tree: LocaleTree =
            serde_json::from_str(r#"{"greet :who": "Hi :who", "nested": {"k": "mailto:me"}}"#)
                .unwrap();
        let out = vue().rewrite_tree(tree);
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["greet {who}", "nested"]);
        assert_eq!(
            out.get("greet {who}").and_then(TreeValue::as_leaf),
            Some("Hi {who}")
        );
        let nested = out.get("nested").and_then(TreeValue::as_node).unwrap();
        assert_eq!(nested.get("k").and_then(TreeValue::as_leaf), Some("mailto:me"));
    }

    #[test]
    fn test_empty_escape_character_rejected() {
        assert!(matches!(
            Rewriter::new(I18nLib::VueI18n, ""),
            Err(Error::Configuration(_))
        ));
    }
}
