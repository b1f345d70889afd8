//! JSON encoding and JS module wrapping of generated documents.

use indoc::formatdoc;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{config::OutputFormat, error::Error};

/// Encodes `data` as pretty JSON (four-space indent, slashes and non-ASCII
/// kept verbatim) followed by a newline, then wraps it for `format`.
pub fn encode<T: Serialize + ?Sized>(data: &T, format: OutputFormat) -> Result<String, Error> {
    let json = to_pretty_json(data)?;
    Ok(match format {
        OutputFormat::Es6 => es6_module(&json),
        OutputFormat::Umd => umd_module(&json),
        OutputFormat::Json => json,
    })
}

fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> Result<String, Error> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    data.serialize(&mut serializer).map_err(Error::Encoding)?;

    let mut json = String::from_utf8(buffer).map_err(|e| {
        let message = format!("invalid UTF-8 in output: {e}");
        Error::Encoding(<serde_json::Error as serde::ser::Error>::custom(message))
    })?;
    json.push('\n');
    Ok(json)
}

/// Wraps a JSON document as an ES module with a default export.
///
/// The body keeps its trailing newline, so a blank line follows it.
pub fn es6_module(body: &str) -> String {
    formatdoc! {"
        const translations = {body}
        window.translations = translations;

        export default translations;",
        body = body,
    }
}

/// Wraps a JSON document in a universal module definition that also merges
/// into an existing `vuei18nLocales` global.
pub fn umd_module(body: &str) -> String {
    formatdoc! {"
        (function (global, factory) {{
            typeof exports === 'object' && typeof module !== 'undefined' ? module.exports = factory() :
                typeof define === 'function' && define.amd ? define(factory) :
                    typeof global.vuei18nLocales === 'undefined' ? global.vuei18nLocales = factory() : Object.keys(factory()).forEach(function (key) {{global.vuei18nLocales[key] = factory()[key]}});
        }}(this, (function () {{ 'use strict';
            return {body}
        }})));",
        body = body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocaleCollection;

    fn sample() -> LocaleCollection {
        serde_json::from_str(r#"{"en": {"url": "https://example.com/a", "hi": "Héllo {name}"}}"#)
            .unwrap()
    }

    #[test]
    fn test_json_layout() {
        let out = encode(&sample(), OutputFormat::Json).unwrap();
        assert_eq!(
            out,
            concat!(
                "{\n",
                "    \"en\": {\n",
                "        \"url\": \"https://example.com/a\",\n",
                "        \"hi\": \"Héllo {name}\"\n",
                "    }\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_empty_collection() {
        let out = encode(&LocaleCollection::new(), OutputFormat::Json).unwrap();
        assert_eq!(out, "{}\n");
    }

    #[test]
    fn test_es6_module() {
        let out = encode(&sample(), OutputFormat::Es6).unwrap();
        assert!(out.starts_with("const translations = {\n    \"en\": {"));
        assert!(out.ends_with(
            "    }\n}\n\nwindow.translations = translations;\n\nexport default translations;"
        ));
    }

    #[test]
    fn test_umd_module() {
        let out = encode(&sample(), OutputFormat::Umd).unwrap();
        assert!(out.starts_with("(function (global, factory) {\n"));
        assert!(out.contains("module.exports = factory()"));
        assert!(out.contains("define.amd ? define(factory)"));
        assert!(out.contains("Object.keys(factory()).forEach(function (key) {"));
        assert!(out.contains("{global.vuei18nLocales[key] = factory()[key]});"));
        assert!(out.contains("    return {\n    \"en\": {"));
        assert!(out.ends_with("    }\n}\n\n})));"));
    }
}
