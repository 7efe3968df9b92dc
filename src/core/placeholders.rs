//! ICU message argument extraction.
//!
//! Only argument names are collected; formats and styles are skipped.
//! Plural and select branches are parsed recursively so that arguments used
//! inside a branch (`{count, plural, other {{count} of {total}}}`) count too.

use std::collections::BTreeSet;

/// Collect the argument names referenced by an ICU message.
pub fn placeholders(message: &str) -> BTreeSet<String> {
    let chars: Vec<char> = message.chars().collect();
    let mut parser = Parser {
        chars: &chars,
        pos: 0,
        names: BTreeSet::new(),
    };
    parser.message(false);
    parser.names
}

struct Parser<'a> {
    chars: &'a [char],
    pos: usize,
    names: BTreeSet<String>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn message(&mut self, nested: bool) {
        while let Some(c) = self.peek() {
            match c {
                '\'' => self.quoted(),
                '{' => {
                    self.pos += 1;
                    self.argument();
                }
                '}' => {
                    self.pos += 1;
                    if nested {
                        return;
                    }
                }
                _ => self.pos += 1,
            }
        }
    }

    /// `''` is a literal apostrophe; `'{...}'` quotes syntax characters.
    fn quoted(&mut self) {
        self.pos += 1;
        match self.peek() {
            Some('\'') => self.pos += 1,
            Some('{') | Some('}') | Some('#') => {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == '\'' {
                        if self.peek() == Some('\'') {
                            self.pos += 1;
                        } else {
                            break;
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn token(&mut self) -> (String, Option<char>) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == ',' || c == '}' {
                let token: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return (token.trim().to_string(), Some(c));
            }
            self.pos += 1;
        }
        let token: String = self.chars[start..].iter().collect();
        (token.trim().to_string(), None)
    }

    fn argument(&mut self) {
        let (name, end) = self.token();
        if !name.is_empty() {
            self.names.insert(name);
        }
        if end != Some(',') {
            return;
        }

        let (kind, end) = self.token();
        if end != Some(',') {
            return;
        }

        match kind.as_str() {
            "plural" | "select" | "selectordinal" => self.branches(),
            _ => self.skip_style(),
        }
    }

    fn branches(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.pos += 1;
            }
            match self.peek() {
                None => return,
                Some('}') => {
                    self.pos += 1;
                    return;
                }
                Some('{') => {
                    self.pos += 1;
                    self.message(true);
                }
                Some(_) => {
                    // Selector such as `one`, `=0` or `offset:1`.
                    while self
                        .peek()
                        .is_some_and(|c| !c.is_whitespace() && c != '{' && c != '}')
                    {
                        self.pos += 1;
                    }
                }
            }
        }
    }

    fn skip_style(&mut self) {
        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }
}
