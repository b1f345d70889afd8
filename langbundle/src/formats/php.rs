//! Laravel-style PHP translation files (`return [ 'key' => 'value' ];`).
//!
//! The file is never executed. It is parsed as a declarative literal: an
//! optional preamble (`declare`, `namespace`, `use`), then a single
//! `return` of an array whose leaves are string or number literals,
//! booleans, or `.` concatenations of those. Anything else (variables,
//! constants, function calls, `null`) is rejected with the line and column
//! where it appears.

use std::path::Path;

use crate::{
    error::Error,
    traits::Parser,
    types::{LocaleTree, TreeValue},
};

/// A PHP file returning a (possibly nested) translation array.
#[derive(Debug, Clone, Copy)]
pub struct Format;

impl Parser for Format {
    fn parse_str(text: &str, path: &Path) -> Result<LocaleTree, Error> {
        let mut cursor = Cursor::new(text, path);
        cursor.parse_file()
    }
}

enum Literal {
    Scalar(String),
    Array(LocaleTree),
}

impl Literal {
    fn into_tree_value(self) -> TreeValue {
        match self {
            Literal::Scalar(s) => TreeValue::Leaf(s),
            Literal::Array(tree) => TreeValue::Node(tree),
        }
    }
}

/// Deepest array or parenthesis nesting accepted before giving up.
const MAX_DEPTH: usize = 128;

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    path: &'a Path,
    depth: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str, path: &'a Path) -> Self {
        Cursor {
            src,
            pos: 0,
            path,
            depth: 0,
        }
    }

    fn error(&self, message: impl AsRef<str>) -> Error {
        let before = &self.src[..self.pos];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rfind('\n')
            .map_or(before, |i| &before[i + 1..])
            .chars()
            .count()
            + 1;
        Error::data_format(
            self.path,
            format!("{} at line {line}, column {column}", message.as_ref()),
        )
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") || trimmed.starts_with('#') {
                let end = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += end;
            } else if trimmed.starts_with("/*") {
                let end = trimmed[2..].find("*/").map_or(trimmed.len(), |i| i + 4);
                self.pos += end;
            } else {
                return;
            }
        }
    }

    /// Consumes `token` after any trivia.
    fn eat(&mut self, token: &str) -> bool {
        self.skip_trivia();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), Error> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{token}`")))
        }
    }

    /// Consumes a case-insensitive keyword that is not the prefix of a longer name.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.skip_trivia();
        let rest = self.rest();
        let matches = rest.len() >= keyword.len()
            && rest.is_char_boundary(keyword.len())
            && rest[..keyword.len()].eq_ignore_ascii_case(keyword)
            && !rest[keyword.len()..]
                .chars()
                .next()
                .is_some_and(is_ident_char);
        if matches {
            self.pos += keyword.len();
        }
        matches
    }

    fn skip_statement(&mut self) -> Result<(), Error> {
        let mut depth = 0usize;
        loop {
            self.skip_trivia();
            match self.bump() {
                Some('(') => depth += 1,
                Some(')') => depth = depth.saturating_sub(1),
                Some(';') if depth == 0 => return Ok(()),
                Some(quote @ ('\'' | '"')) => {
                    self.pos -= 1;
                    if quote == '\'' {
                        self.single_quoted()?;
                    } else {
                        self.double_quoted()?;
                    }
                }
                Some(_) => {}
                None => return Err(self.error("unterminated statement")),
            }
        }
    }

    fn parse_file(&mut self) -> Result<LocaleTree, Error> {
        if !self.eat("<?php") {
            return Err(self.error("missing `<?php` open tag"));
        }

        loop {
            if self.eat_keyword("declare")
                || self.eat_keyword("namespace")
                || self.eat_keyword("use")
            {
                self.skip_statement()?;
            } else if self.eat_keyword("return") {
                break;
            } else {
                return Err(self.error("expected a `return` statement"));
            }
        }

        let value = self.parse_expr()?;
        if !self.eat(";") && !self.eat("?>") {
            self.skip_trivia();
            if self.peek().is_some() {
                return Err(self.error("expected `;` after the returned array"));
            }
        }

        match value {
            Literal::Array(tree) => Ok(tree),
            Literal::Scalar(_) => Err(Error::data_format(
                self.path,
                "the file must return an array",
            )),
        }
    }

    fn parse_expr(&mut self) -> Result<Literal, Error> {
        let first = self.parse_term()?;
        self.skip_trivia();
        if !self.at_concat() {
            return Ok(first);
        }

        let mut joined = self.scalar(first)?;
        while self.at_concat() {
            self.pos += 1;
            let next = self.parse_term()?;
            joined.push_str(&self.scalar(next)?);
            self.skip_trivia();
        }
        Ok(Literal::Scalar(joined))
    }

    /// A `.` that is concatenation rather than `.=` or a float like `.5`.
    fn at_concat(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('.')
            && !chars
                .next()
                .is_some_and(|c| c == '=' || c.is_ascii_digit())
    }

    fn scalar(&self, literal: Literal) -> Result<String, Error> {
        match literal {
            Literal::Scalar(s) => Ok(s),
            Literal::Array(_) => Err(self.error("cannot concatenate an array")),
        }
    }

    fn parse_term(&mut self) -> Result<Literal, Error> {
        self.skip_trivia();
        match self.peek() {
            Some('[') => {
                self.pos += 1;
                self.nested(|cursor| cursor.parse_array("]"))
            }
            Some('\'') => self.single_quoted().map(Literal::Scalar),
            Some('"') => self.double_quoted().map(Literal::Scalar),
            Some('(') => {
                self.pos += 1;
                self.nested(|cursor| {
                    let inner = cursor.parse_expr()?;
                    cursor.expect(")")?;
                    Ok(inner)
                })
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.number().map(Literal::Scalar)
            }
            Some(_) => {
                if self.eat_keyword("array") {
                    self.expect("(")?;
                    return self.nested(|cursor| cursor.parse_array(")"));
                }
                if self.eat_keyword("true") {
                    return Ok(Literal::Scalar("1".to_string()));
                }
                if self.eat_keyword("false") {
                    return Ok(Literal::Scalar(String::new()));
                }
                if self.eat_keyword("null") {
                    return Err(self.error("null is not a translation value"));
                }
                Err(self.error("unsupported expression"))
            }
            None => Err(self.error("unexpected end of file")),
        }
    }

    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(format!("nesting deeper than {MAX_DEPTH} levels")));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_array(&mut self, close: &str) -> Result<Literal, Error> {
        let mut tree = LocaleTree::new();
        // `None` once the largest integer key has been used.
        let mut next_index: Option<i64> = Some(0);

        loop {
            if self.eat(close) {
                return Ok(Literal::Array(tree));
            }

            let first = self.parse_expr()?;
            let (key, value) = if self.eat("=>") {
                let key = self.scalar(first)?;
                (key, self.parse_expr()?)
            } else {
                let index = next_index.ok_or_else(|| {
                    self.error("cannot add element, next array index is already occupied")
                })?;
                (index.to_string(), first)
            };

            if let Ok(index) = key.parse::<i64>() {
                if index.to_string() == key && next_index.is_some_and(|next| index >= next) {
                    next_index = index.checked_add(1);
                }
            }
            tree.insert(key, value.into_tree_value());

            if !self.eat(",") {
                self.expect(close)?;
                return Ok(Literal::Array(tree));
            }
        }
    }

    fn single_quoted(&mut self) -> Result<String, Error> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(out),
                Some('\\') => match self.peek() {
                    Some(c @ ('\'' | '\\')) => {
                        self.bump();
                        out.push(c);
                    }
                    _ => out.push('\\'),
                },
                Some(c) => out.push(c),
                None => {
                    self.pos = start;
                    return Err(self.error("unterminated string"));
                }
            }
        }
    }

    fn double_quoted(&mut self) -> Result<String, Error> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => self.escape_sequence(&mut out)?,
                Some('$') if self.peek().is_some_and(|c| c == '{' || is_ident_start(c)) => {
                    self.pos -= 1;
                    return Err(self.error("variable interpolation is not supported"));
                }
                Some(c) => out.push(c),
                None => {
                    self.pos = start;
                    return Err(self.error("unterminated string"));
                }
            }
        }
    }

    fn escape_sequence(&mut self, out: &mut String) -> Result<(), Error> {
        let Some(c) = self.bump() else {
            return Err(self.error("unterminated string"));
        };
        match c {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'v' => out.push('\u{0B}'),
            'f' => out.push('\u{0C}'),
            'e' => out.push('\u{1B}'),
            '\\' | '$' | '"' => out.push(c),
            '0'..='7' => {
                let mut digits = String::from(c);
                while digits.len() < 3 && self.peek().is_some_and(|d| ('0'..='7').contains(&d)) {
                    digits.extend(self.bump());
                }
                let code = u32::from_str_radix(&digits, 8).unwrap_or(0) & 0xFF;
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            'x' if self.peek().is_some_and(|d| d.is_ascii_hexdigit()) => {
                let mut digits = String::new();
                while digits.len() < 2 && self.peek().is_some_and(|d| d.is_ascii_hexdigit()) {
                    digits.extend(self.bump());
                }
                let code = u32::from_str_radix(&digits, 16).unwrap_or(0);
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            'u' if self.rest().starts_with('{') => {
                let end = self
                    .rest()
                    .find('}')
                    .ok_or_else(|| self.error("unterminated unicode escape"))?;
                let hex = &self.rest()[1..end];
                let ch = u32::from_str_radix(hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.error(format!("invalid unicode escape `{hex}`")))?;
                out.push(ch);
                self.pos += end + 1;
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn number(&mut self) -> Result<String, Error> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.pos += 1;
                true
            }
            Some('+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        let body_start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            self.pos += 1;
        }
        // exponent sign, e.g. 1e-3
        if self.src[body_start..self.pos].ends_with(['e', 'E'])
            && self.peek().is_some_and(|c| c == '-' || c == '+')
        {
            self.pos += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }

        let raw = self.src[body_start..self.pos].replace('_', "");
        let lower = raw.to_ascii_lowercase();
        let integer = if let Some(hex) = lower.strip_prefix("0x") {
            i64::from_str_radix(hex, 16).ok()
        } else if let Some(bin) = lower.strip_prefix("0b") {
            i64::from_str_radix(bin, 2).ok()
        } else if let Some(oct) = lower.strip_prefix("0o") {
            i64::from_str_radix(oct, 8).ok()
        } else if lower.len() > 1
            && lower.starts_with('0')
            && lower.bytes().all(|b| b.is_ascii_digit())
        {
            i64::from_str_radix(&lower[1..], 8).ok()
        } else {
            lower.parse::<i64>().ok()
        };

        let text = match integer {
            Some(value) => value.to_string(),
            None => match lower.parse::<f64>() {
                Ok(value) if value.is_finite() => value.to_string(),
                _ => {
                    self.pos = start;
                    return Err(self.error("unsupported expression"));
                }
            },
        };

        Ok(if negative && text != "0" {
            format!("-{text}")
        } else {
            text
        })
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
