//! Line lexer shared by the linter.
//!
//! Offsets are character indices into the line, not byte offsets.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value: value.into(),
            start,
            end,
        }
    }

    pub fn upper(&self) -> String {
        self.value.to_uppercase()
    }
}

/// Split one line into whitespace-separated tokens.
///
/// Stops at a `#` that begins a token. Quoted tokens keep their quotes and run
/// to the matching quote not preceded by a backslash, or to end of line.
pub fn lex(line: &str) -> Vec<Token> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        if pos >= chars.len() || chars[pos] == '#' {
            break;
        }

        let start = pos;
        if chars[pos] == '"' || chars[pos] == '\'' {
            let quote = chars[pos];
            pos += 1;
            // Only the single preceding char is checked, so `\\"` still escapes
            while pos < chars.len() && (chars[pos] != quote || chars[pos - 1] == '\\') {
                pos += 1;
            }
            pos = (pos + 1).min(chars.len());
        } else {
            while pos < chars.len() && !chars[pos].is_whitespace() {
                pos += 1;
            }
        }

        let value: String = chars[start..pos].iter().collect();
        tokens.push(Token::new(value, start, pos));
    }

    tokens
}
