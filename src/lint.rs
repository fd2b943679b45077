//! Rule-based payload linter.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Catalog;
use crate::lexer::{lex, Token};
use crate::vocab;

static DELAY_ARG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*=").unwrap());

pub const MISSING_ARGUMENT: &str = "Missing argument";
pub const UNKNOWN_MODE: &str = "Unknown mode";
pub const UNKNOWN_ARG: &str = "Unknown arg";
pub const INVALID_DELAY: &str = "Invalid delay";
pub const UNKNOWN_COMMAND: &str = "Unknown command";

/// Half-open `[start, end)` character interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && end > self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
    pub line_span: Span,
    pub absolute_span: Span,
}

/// Output of one lint pass. Built in a single pass and never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
    pub by_line: Vec<Vec<Diagnostic>>,
    pub line_start_offsets: Vec<usize>,
}

impl LintResult {
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics_on(&self, line: usize) -> &[Diagnostic] {
        self.by_line.get(line).map_or(&[], Vec::as_slice)
    }

    pub fn line_has_errors(&self, line: usize) -> bool {
        !self.diagnostics_on(line).is_empty()
    }

    /// Diagnostic under a (line, column) position, as used for hover.
    ///
    /// The end of the absolute span is inclusive so the cell right after a
    /// flagged token still reports it.
    pub fn diagnostic_at(&self, line: usize, column: usize) -> Option<&Diagnostic> {
        let offset = self.line_start_offsets.get(line).copied().unwrap_or(0) + column;
        self.diagnostics
            .iter()
            .find(|d| d.absolute_span.start <= offset && offset <= d.absolute_span.end)
    }
}

/// A buffer is linted as a shell script when its name ends in `.sh`.
pub fn is_shell_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".sh"))
        .unwrap_or(false)
}

struct Collector {
    starts: Vec<usize>,
    by_line: Vec<Vec<Diagnostic>>,
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    fn flag(&mut self, line: usize, token: &Token, message: &str) {
        let base = self.starts[line];
        let diagnostic = Diagnostic {
            line,
            message: message.to_string(),
            line_span: Span::new(token.start, token.end),
            absolute_span: Span::new(base + token.start, base + token.end),
        };
        self.by_line[line].push(diagnostic.clone());
        self.diagnostics.push(diagnostic);
    }

    fn finish(self) -> LintResult {
        LintResult {
            diagnostics: self.diagnostics,
            by_line: self.by_line,
            line_start_offsets: self.starts,
        }
    }
}

/// Lint a whole buffer.
///
/// `catalog` is `None` until the command catalog has loaded; the
/// unknown-command rule is skipped in that case.
pub fn lint(text: &str, is_shell_file: bool, catalog: Option<&Catalog>) -> LintResult {
    let lines: Vec<&str> = text.split('\n').collect();

    let mut starts = Vec::with_capacity(lines.len());
    let mut acc = 0;
    for line in &lines {
        starts.push(acc);
        acc += line.chars().count() + 1;
    }

    let mut out = Collector {
        starts,
        by_line: vec![Vec::new(); lines.len()],
        diagnostics: Vec::new(),
    };

    for (index, raw) in lines.iter().enumerate() {
        if raw.trim().is_empty() || (index == 0 && raw.starts_with("#!")) {
            continue;
        }
        let tokens = lex(raw);
        let Some(first) = tokens.first() else {
            continue;
        };

        let v0 = first.upper();
        match v0.as_str() {
            "ATTACKMODE" => {
                if tokens.len() < 2 {
                    out.flag(index, first, MISSING_ARGUMENT);
                } else {
                    for token in &tokens[1..] {
                        if !vocab::is_attack_mode(&token.upper()) {
                            out.flag(index, token, UNKNOWN_MODE);
                        }
                    }
                }
            }
            "LED" | "QUACK" | "Q" => {
                if tokens.len() < 2 {
                    out.flag(index, first, MISSING_ARGUMENT);
                } else {
                    let arg = tokens[1].upper();
                    let known = if v0 == "LED" {
                        vocab::is_led_color(&arg)
                    } else {
                        vocab::is_quack_word(&arg)
                    };
                    // The directive guard can never hold inside this arm, so
                    // unknown arguments are accepted as-is.
                    if !known && !matches!(v0.as_str(), "LED" | "QUACK" | "Q") {
                        out.flag(index, &tokens[1], UNKNOWN_ARG);
                    }
                }
            }
            "DELAY" => {
                if tokens.len() < 2 || !DELAY_ARG.is_match(&tokens[1].value) {
                    out.flag(index, first, INVALID_DELAY);
                }
            }
            _ => {
                if is_shell_file {
                    continue;
                }
                if let Some(catalog) = catalog {
                    if !is_known_command(first, &v0, catalog) {
                        out.flag(index, first, UNKNOWN_COMMAND);
                    }
                }
            }
        }
    }

    let result = out.finish();
    tracing::trace!(issues = result.len(), is_shell_file, "lint pass");
    result
}

fn is_known_command(token: &Token, upper: &str, catalog: &Catalog) -> bool {
    let value = token.value.as_str();
    let lower = value.to_lowercase();

    catalog.get_upper(upper).is_some()
        || vocab::is_directive(upper)
        || vocab::is_shell_command(&lower)
        || ASSIGNMENT.is_match(value)
        || value.starts_with('$')
        || value.starts_with("./")
        || value.starts_with('/')
        || lower == "export"
        || vocab::is_shell_keyword(&lower)
}
