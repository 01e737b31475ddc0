//! Relaxed dict/list literal parser.
//!
//! Ground-truth reply payloads are Python-style literals, not strict JSON:
//! keys and strings are usually single-quoted and booleans are spelled
//! `True`/`False`. This module parses the permissive grammar
//! dict | list | string | number | bool | none, accepting both Python and
//! JSON spellings plus trailing commas.
//!
//! Any syntax error is reported as [`Error::Literal`]; callers are expected
//! to degrade on failure rather than propagate.

use crate::{Error, Result};
use std::collections::HashMap;

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Bool(bool),
    None,
    List(Vec<Value>),
    Dict(HashMap<String, Value>),
}

impl Value {
    /// Look up a key if this value is a dict.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Dict(map) => map.get(key),
            _ => None,
        }
    }

    /// View as a string slice if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// View as a float if this value is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// View as a slice of values if this value is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Parse a complete literal from `input`.
///
/// The whole input must be consumed (trailing whitespace aside); leftover
/// tokens after the top-level value are an error, matching strict
/// literal-evaluation semantics.
pub fn parse(input: &str) -> Result<Value> {
    let chars: Vec<char> = input.chars().collect();
    let mut parser = Parser { chars, pos: 0 };
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos < parser.chars.len() {
        return Err(parser.error("trailing characters after literal"));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn error(&self, msg: &str) -> Error {
        Error::Literal(format!("{} at offset {}", msg, self.pos))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            _ => Err(self.error(&format!("expected '{}'", expected))),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => self.parse_dict(),
            Some('[') => self.parse_list(),
            Some('\'') | Some('"') => Ok(Value::Str(self.parse_string()?)),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.parse_number()
            }
            Some(c) if c.is_alphabetic() => self.parse_word(),
            _ => Err(self.error("expected a value")),
        }
    }

    fn parse_dict(&mut self) -> Result<Value> {
        self.expect('{')?;
        let mut map = HashMap::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                Some('\'') | Some('"') => {
                    let key = self.parse_string()?;
                    self.skip_whitespace();
                    self.expect(':')?;
                    let value = self.parse_value()?;
                    // last occurrence of a duplicate key wins
                    map.insert(key, value);
                    self.skip_whitespace();
                    match self.peek() {
                        Some(',') => {
                            self.pos += 1;
                        }
                        Some('}') => {}
                        _ => return Err(self.error("expected ',' or '}' in dict")),
                    }
                }
                _ => return Err(self.error("expected string key or '}' in dict")),
            }
        }
        Ok(Value::Dict(map))
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    items.push(self.parse_value()?);
                    self.skip_whitespace();
                    match self.peek() {
                        Some(',') => {
                            self.pos += 1;
                        }
                        Some(']') => {}
                        _ => return Err(self.error("expected ',' or ']' in list")),
                    }
                }
                None => return Err(self.error("unterminated list")),
            }
        }
        Ok(Value::List(items))
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = self
            .bump()
            .filter(|&c| c == '\'' || c == '"')
            .ok_or_else(|| self.error("expected string"))?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(c) => out.push(c),
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
        ) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map(Value::Num)
            .map_err(|_| Error::Literal(format!("invalid number '{}' at offset {}", text, start)))
    }

    fn parse_word(&mut self) -> Result<Value> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::None),
            _ => Err(Error::Literal(format!(
                "unexpected word '{}' at offset {}",
                word, start
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_single_quoted_dict() {
        let value = parse("{'class': 'cat', 'score': 0.9}").unwrap();
        assert_eq!(value.get("class").and_then(Value::as_str), Some("cat"));
        assert_relative_eq!(value.get("score").and_then(Value::as_f64).unwrap(), 0.9);
    }

    #[test]
    fn test_parse_nested_detections_payload() {
        let payload =
            "{'detections': [{'class': 'dog', 'bbox': {'center_x': 1, 'center_y': 2, \
             'size_x': 3, 'size_y': 4}}]}";
        let value = parse(payload).unwrap();
        let dets = value.get("detections").and_then(Value::as_list).unwrap();
        assert_eq!(dets.len(), 1);
        let bbox = dets[0].get("bbox").unwrap();
        assert_relative_eq!(bbox.get("size_y").and_then(Value::as_f64).unwrap(), 4.0);
    }

    #[test]
    fn test_parse_mixed_quotes_and_words() {
        let value = parse(r#"{"ok": True, 'missing': None, "flag": false}"#).unwrap();
        assert_eq!(value.get("ok"), Some(&Value::Bool(true)));
        assert_eq!(value.get("missing"), Some(&Value::None));
        assert_eq!(value.get("flag"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_parse_trailing_comma() {
        let value = parse("[1, 2, 3,]").unwrap();
        assert_eq!(value.as_list().unwrap().len(), 3);
        let value = parse("{'a': 1,}").unwrap();
        assert_relative_eq!(value.get("a").and_then(Value::as_f64).unwrap(), 1.0);
    }

    #[test]
    fn test_parse_signed_and_exponent_numbers() {
        assert_eq!(parse("-2.5").unwrap(), Value::Num(-2.5));
        assert_eq!(parse("1e3").unwrap(), Value::Num(1000.0));
        assert_eq!(parse("+0.25").unwrap(), Value::Num(0.25));
    }

    #[test]
    fn test_parse_string_escapes() {
        let value = parse(r"'it\'s'").unwrap();
        assert_eq!(value.as_str(), Some("it's"));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse("{'class': ").is_err());
        assert!(parse("{'class' 'cat'}").is_err());
        assert!(parse("[1, 2").is_err());
        assert!(parse("not_a_literal").is_err());
        assert!(parse("{} trailing").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let value = parse("{'a': 1, 'a': 2}").unwrap();
        assert_relative_eq!(value.get("a").and_then(Value::as_f64).unwrap(), 2.0);
    }
}
