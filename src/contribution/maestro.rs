use serde_json::{Number, Value};
use thiserror::Error;

use crate::contribution::raw::{RawDocument, RawMapping};

// ============================================================================
// Maestro elements script parser
// ============================================================================
//
// Flow repositories keep their element tables as small scripts that populate
// the `output` object Maestro exposes to flows:
//
//     // Login Page Elements
//     output.login = {
//       loginContinueButton: 'login_continue_button',
//       "otpTitle": "otp_title",
//     };
//
// Only this assignment form is understood. Duplicate keys are kept in literal
// order so later resolution can apply last-write-wins.

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// Parse an elements script into its `output.<namespace>` assignments.
pub fn parse_elements_script(text: &str) -> Result<RawDocument, ScriptError> {
    let mut parser = Parser::new(text);
    let mut assignments = Vec::new();

    loop {
        parser.skip_trivia()?;
        if parser.peek().is_none() {
            break;
        }
        assignments.push(parser.assignment()?);
    }

    Ok(RawDocument(assignments))
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            // a leading BOM is common in files saved by Windows editors
            chars: text.trim_start_matches('\u{feff}').chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T, ScriptError> {
        Err(ScriptError {
            line: self.line,
            message: message.into(),
        })
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn expect(&mut self, expected: char) -> Result<(), ScriptError> {
        self.skip_trivia()?;
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => self.error(format!("expected '{}', found '{}'", expected, c)),
            None => self.error(format!("expected '{}', found end of input", expected)),
        }
    }

    /// Skip whitespace plus line and block comments.
    fn skip_trivia(&mut self) -> Result<(), ScriptError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.line;
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => {
                                return Err(ScriptError {
                                    line: start,
                                    message: "unterminated block comment".into(),
                                });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// `output.<name> = { ... };` or `output['<name>'] = { ... };`
    fn assignment(&mut self) -> Result<(String, RawMapping), ScriptError> {
        let target = self.identifier()?;
        if target != "output" {
            return self.error(format!(
                "expected an `output.<namespace> = {{...}}` assignment, found '{}'",
                target
            ));
        }

        self.skip_trivia()?;
        let namespace = match self.peek() {
            Some('.') => {
                self.bump();
                self.skip_trivia()?;
                self.identifier()?
            }
            Some('[') => {
                self.bump();
                self.skip_trivia()?;
                let name = self.string_literal()?;
                self.expect(']')?;
                name
            }
            _ => return self.error("expected '.' or '[' after `output`"),
        };

        self.expect('=')?;
        let mapping = self.object(&namespace)?;

        self.skip_trivia()?;
        if self.peek() == Some(';') {
            self.bump();
        }

        Ok((namespace, mapping))
    }

    fn object(&mut self, namespace: &str) -> Result<RawMapping, ScriptError> {
        self.expect('{')?;
        let mut entries = Vec::new();

        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                None => return self.error(format!("unterminated object for namespace '{}'", namespace)),
                _ => {}
            }

            let key = match self.peek() {
                Some('\'') | Some('"') => self.string_literal()?,
                _ => self.identifier()?,
            };
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.value(&key)?;
            entries.push((key, value));

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                Some(c) => return self.error(format!("expected ',' or '}}', found '{}'", c)),
                None => return self.error(format!("unterminated object for namespace '{}'", namespace)),
            }
        }

        Ok(RawMapping(entries))
    }

    fn value(&mut self, key: &str) -> Result<Value, ScriptError> {
        match self.peek() {
            Some('\'') | Some('"') => self.string_literal().map(Value::String),
            Some('{') | Some('[') => {
                self.error(format!("nested objects and arrays are not supported (symbol '{}')", key))
            }
            Some(c) if c.is_ascii_digit() || c == '-' => self.number(),
            Some(_) => {
                let word = self.identifier()?;
                match word.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "undefined" => Ok(Value::Null),
                    other => self.error(format!(
                        "symbol '{}' refers to '{}', only string literals are allowed",
                        key, other
                    )),
                }
            }
            None => self.error("unexpected end of input"),
        }
    }

    fn number(&mut self) -> Result<Value, ScriptError> {
        let mut literal = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                literal.push(c);
                self.bump();
            } else {
                break;
            }
        }
        literal
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .map_or_else(|| self.error(format!("invalid number '{}'", literal)), Ok)
    }

    fn identifier(&mut self) -> Result<String, ScriptError> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            let allowed = c == '_' || c == '$' || c.is_alphabetic() || (!ident.is_empty() && c.is_numeric());
            if !allowed {
                break;
            }
            ident.push(c);
            self.bump();
        }
        if ident.is_empty() {
            return match self.peek() {
                Some(c) => self.error(format!("expected identifier, found '{}'", c)),
                None => self.error("expected identifier, found end of input"),
            };
        }
        Ok(ident)
    }

    fn string_literal(&mut self) -> Result<String, ScriptError> {
        let start = self.line;
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            _ => return self.error("expected string literal"),
        };

        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\n') | None => {
                    return Err(ScriptError {
                        line: start,
                        message: "unterminated string literal".into(),
                    });
                }
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('0') => out.push('\0'),
                    Some('u') => out.push(self.unicode_escape()?),
                    Some(other) => out.push(other),
                    None => return self.error("unterminated escape sequence"),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char, ScriptError> {
        let mut hex = String::with_capacity(4);
        for _ in 0..4 {
            match self.bump() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                _ => return self.error("invalid \\u escape"),
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| self.error(format!("invalid \\u{} escape", hex)), Ok)
    }
}
