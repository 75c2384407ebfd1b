// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line-based statement scanner for the STEP `DATA;` section
//!
//! Joins physical lines into `;`-terminated statements. Semicolons inside
//! quoted string parameters are not recognized as such.

use memchr::memchr2;

/// Iterator over trimmed lines
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub(crate) struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(content: &'a str) -> Self {
        Self { rest: content }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let bytes = self.rest.as_bytes();
        let line = match memchr2(b'\n', b'\r', bytes) {
            Some(pos) => {
                let line = &self.rest[..pos];
                let crlf = bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n');
                self.rest = &self.rest[pos + if crlf { 2 } else { 1 }..];
                line
            }
            None => std::mem::take(&mut self.rest),
        };
        Some(line.trim())
    }
}

/// Statement scanner over STEP text
///
/// Yields one string per complete entity statement found between `DATA;` and
/// `ENDSEC;`. Lines before `DATA;` are ignored and scanning stops for good at
/// the first `ENDSEC;` after it.
pub struct StatementScanner<'a> {
    lines: Lines<'a>,
    in_data: bool,
    finished: bool,
    buffer: String,
}

impl<'a> StatementScanner<'a> {
    /// Create a new scanner for the given content
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: Lines::new(content),
            in_data: false,
            finished: false,
            buffer: String::new(),
        }
    }

    /// Scan to the next complete statement
    pub fn next_statement(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            if line.eq_ignore_ascii_case("DATA;") {
                self.in_data = true;
                continue;
            }
            if !self.in_data {
                continue;
            }
            if line.eq_ignore_ascii_case("ENDSEC;") {
                break;
            }

            self.buffer.push_str(line);
            if self.buffer.ends_with(';') {
                return Some(std::mem::take(&mut self.buffer));
            }
        }

        // Unterminated trailing text is dropped
        self.finished = true;
        self.buffer.clear();
        None
    }
}

impl Iterator for StatementScanner<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_statement()
    }
}

/// Split STEP text into entity statements
pub fn tokenize(content: &str) -> Vec<String> {
    StatementScanner::new(content).collect()
}
