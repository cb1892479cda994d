// ACLStat - Animation compression benchmark statistics
//
// Copyright (c) 2025 the aclstat contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SJSON ("simplified JSON") parser.
//!
//! The stats dump commandlet writes its per-clip results as SJSON: the top
//! level is an implicit object, entries are `key = value`, keys are bare
//! identifiers (quoted keys are also accepted), commas between array elements
//! and object entries are optional, and `//` line comments and `/* */` block
//! comments are treated as whitespace.
//!
//! Parsing is a single forward pass over the input bytes; errors carry the
//! 1-based line where the offending byte was found.

use crate::error::{StatError, StatResult};
use crate::value::Value;
use std::collections::BTreeMap;

/// Parse an SJSON document into a [`Value::Object`].
pub fn parse(input: &str) -> StatResult<Value> {
    let mut parser = Parser::new(input);
    let map = parser.parse_object_body(None)?;
    Ok(Value::Object(map))
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
        }
        Some(byte)
    }

    fn error(&self, message: impl Into<String>) -> StatError {
        StatError::syntax(message, self.line)
    }

    /// Skip whitespace, commas, and comments.
    ///
    /// SJSON treats commas as optional separators, so they are consumed here
    /// alongside whitespace rather than demanded by the grammar.
    fn skip_trivia(&mut self) -> StatResult<()> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n' | b',') => {
                    self.bump();
                }
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        while let Some(byte) = self.bump() {
                            if byte == b'\n' {
                                break;
                            }
                        }
                    }
                    Some(b'*') => {
                        let open_line = self.line;
                        self.bump();
                        self.bump();
                        loop {
                            match self.bump() {
                                Some(b'*') if self.peek() == Some(b'/') => {
                                    self.bump();
                                    break;
                                }
                                Some(_) => {}
                                None => {
                                    return Err(StatError::syntax(
                                        "unterminated block comment",
                                        open_line,
                                    ))
                                }
                            }
                        }
                    }
                    _ => return Err(self.error("unexpected '/'")),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Parse `key = value` entries until `terminator` (or end of input for
    /// the implicit top-level object).
    fn parse_object_body(&mut self, terminator: Option<u8>) -> StatResult<BTreeMap<String, Value>> {
        let mut map = BTreeMap::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => {
                    return match terminator {
                        None => Ok(map),
                        Some(_) => Err(self.error("unterminated object")),
                    }
                }
                Some(byte) if Some(byte) == terminator => {
                    self.bump();
                    return Ok(map);
                }
                Some(_) => {
                    let key = self.parse_key()?;
                    self.skip_trivia()?;
                    match self.bump() {
                        Some(b'=') => {}
                        _ => return Err(self.error(format!("expected '=' after key '{}'", key))),
                    }
                    self.skip_trivia()?;
                    let value = self.parse_value()?;
                    map.insert(key, value);
                }
            }
        }
    }

    fn parse_key(&mut self) -> StatResult<String> {
        if self.peek() == Some(b'"') {
            return self.parse_string();
        }
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte.is_ascii_alphanumeric() || byte == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected a key"));
        }
        // Identifier bytes are ASCII, checked above.
        Ok(String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned())
    }

    fn parse_value(&mut self) -> StatResult<Value> {
        match self.peek() {
            Some(b'"') => Ok(Value::String(self.parse_string()?)),
            Some(b'{') => {
                self.bump();
                Ok(Value::Object(self.parse_object_body(Some(b'}'))?))
            }
            Some(b'[') => {
                self.bump();
                self.parse_array()
            }
            Some(byte) if byte == b'-' || byte.is_ascii_digit() => self.parse_number(),
            Some(byte) if byte.is_ascii_alphabetic() => self.parse_literal(),
            Some(byte) => Err(self.error(format!("unexpected byte '{}'", byte as char))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_array(&mut self) -> StatResult<Value> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(_) => items.push(self.parse_value()?),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_string(&mut self) -> StatResult<String> {
        let open_line = self.line;
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(b'"') => return Ok(out),
                Some(b'\\') => match self.bump() {
                    Some(b'"') => out.push('"'),
                    Some(b'\\') => out.push('\\'),
                    Some(b'n') => out.push('\n'),
                    Some(b't') => out.push('\t'),
                    Some(byte) => {
                        return Err(self.error(format!("unknown escape '\\{}'", byte as char)))
                    }
                    None => return Err(StatError::syntax("unterminated string", open_line)),
                },
                Some(byte) if byte < 0x80 => out.push(byte as char),
                Some(byte) => {
                    // Re-assemble a multi-byte UTF-8 sequence.
                    let start = self.pos - 1;
                    let len = utf8_len(byte);
                    for _ in 1..len {
                        self.bump();
                    }
                    match std::str::from_utf8(&self.bytes[start..self.pos]) {
                        Ok(s) => out.push_str(s),
                        Err(_) => return Err(self.error("invalid UTF-8 in string")),
                    }
                }
                None => return Err(StatError::syntax("unterminated string", open_line)),
            }
        }
    }

    fn parse_number(&mut self) -> StatResult<Value> {
        let start = self.pos;
        let mut is_float = false;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        while let Some(byte) = self.peek() {
            match byte {
                b'0'..=b'9' => self.pos += 1,
                b'.' | b'e' | b'E' | b'+' | b'-' => {
                    is_float = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| self.error("invalid number"))?;
        if is_float {
            text.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| self.error(format!("invalid number '{}'", text)))
        } else {
            text.parse::<i64>()
                .map(Value::Int)
                .map_err(|_| self.error(format!("invalid number '{}'", text)))
        }
    }

    fn parse_literal(&mut self) -> StatResult<Value> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte.is_ascii_alphabetic() {
                self.pos += 1;
            } else {
                break;
            }
        }
        match &self.bytes[start..self.pos] {
            b"true" => Ok(Value::Bool(true)),
            b"false" => Ok(Value::Bool(false)),
            b"null" => Ok(Value::Null),
            other => Err(self.error(format!(
                "unknown literal '{}'",
                String::from_utf8_lossy(other)
            ))),
        }
    }
}

/// Byte length of a UTF-8 sequence from its leading byte.
fn utf8_len(leading: u8) -> usize {
    match leading {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}
