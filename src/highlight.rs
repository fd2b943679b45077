//! Character-level highlighter producing render spans per line.

use crate::catalog::{Catalog, Category};
use crate::lint::{Diagnostic, LintResult};
use crate::vocab;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    Generic,
    Variable,
    Number,
    DirectiveArgument,
    Directive,
    Function,
    Argument,
    ShellKeyword,
    ControlFlow,
    Word,
    Operator,
    String,
    Comment,
}

impl StyleClass {
    pub fn from_category(category: Category) -> Self {
        match category {
            Category::Function => StyleClass::Function,
            Category::Argument => StyleClass::Argument,
            Category::Bash => StyleClass::ShellKeyword,
            Category::Condition | Category::Loop => StyleClass::ControlFlow,
            Category::Word => StyleClass::Word,
            Category::Other => StyleClass::Generic,
        }
    }

    /// Stable class name for hosts that paint by name
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleClass::Generic => "t-txt",
            StyleClass::Variable => "t-var",
            StyleClass::Number => "t-num",
            StyleClass::DirectiveArgument => "t-word",
            StyleClass::Directive => "t-bbfn",
            StyleClass::Function => "t-bbfn",
            StyleClass::Argument => "t-bbarg",
            StyleClass::ShellKeyword => "t-bashkw",
            StyleClass::ControlFlow => "t-flow",
            StyleClass::Word => "t-word",
            StyleClass::Operator => "t-op",
            StyleClass::String => "t-str",
            StyleClass::Comment => "t-com",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSpan {
    pub text: String,
    pub style_class: StyleClass,
    pub is_error: bool,
}

impl RenderSpan {
    pub fn new(text: impl Into<String>, style_class: StyleClass) -> Self {
        Self {
            text: text.into(),
            style_class,
            is_error: false,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Classify one word. `prev` is the previous word on the same line.
pub fn classify_word(word: &str, prev: &str, catalog: Option<&Catalog>) -> StyleClass {
    if word.is_empty() {
        return StyleClass::Generic;
    }
    if word.starts_with('$') {
        return StyleClass::Variable;
    }
    if word.chars().all(|c| c.is_ascii_digit()) {
        return StyleClass::Number;
    }

    let upper = word.to_uppercase();
    if vocab::is_attack_mode(&upper) || prev.to_uppercase() == "ATTACKMODE" {
        return StyleClass::DirectiveArgument;
    }
    if let Some(entry) = catalog.and_then(|c| c.get_upper(&upper)) {
        return StyleClass::from_category(entry.category);
    }
    if vocab::is_directive(&upper) {
        return StyleClass::Directive;
    }
    StyleClass::Generic
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Highlight a whole buffer, one span list per `\n`-separated line.
///
/// Pass `lint = None` to disable error marking.
pub fn highlight(
    text: &str,
    lint: Option<&LintResult>,
    catalog: Option<&Catalog>,
) -> Vec<Vec<RenderSpan>> {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let diagnostics = lint.map(|l| l.diagnostics_on(i));
            highlight_line(line, diagnostics, catalog)
        })
        .collect()
}

struct LineSpans<'a> {
    spans: Vec<RenderSpan>,
    diagnostics: Option<&'a [Diagnostic]>,
}

impl LineSpans<'_> {
    fn push(&mut self, chars: &[char], start: usize, end: usize, style_class: StyleClass) {
        let is_error = self
            .diagnostics
            .is_some_and(|ds| ds.iter().any(|d| d.line_span.overlaps(start, end)));
        self.spans.push(RenderSpan {
            text: chars[start..end].iter().collect(),
            style_class,
            is_error,
        });
    }
}

/// Highlight one line against the diagnostics reported for it.
pub fn highlight_line(
    line: &str,
    diagnostics: Option<&[Diagnostic]>,
    catalog: Option<&Catalog>,
) -> Vec<RenderSpan> {
    let chars: Vec<char> = line.chars().collect();
    let mut out = LineSpans {
        spans: Vec::new(),
        diagnostics,
    };
    let mut word_start = 0;
    let mut word = String::new();
    let mut prev = String::new();
    let mut pos = 0;

    let mut flush = |out: &mut LineSpans, word: &mut String, word_start: usize, end: usize| {
        if word.is_empty() {
            return;
        }
        let class = classify_word(word, &prev, catalog);
        out.push(&chars, word_start, end, class);
        prev = std::mem::take(word);
    };

    while pos < chars.len() {
        let c = chars[pos];

        if c == '#' && (pos == 0 || chars[pos - 1] != '\\') {
            flush(&mut out, &mut word, word_start, pos);
            out.push(&chars, pos, chars.len(), StyleClass::Comment);
            pos = chars.len();
            break;
        }

        if c == '"' || c == '\'' {
            flush(&mut out, &mut word, word_start, pos);
            let start = pos;
            pos += 1;
            while pos < chars.len() {
                let closes = chars[pos] == c && chars[pos - 1] != '\\';
                pos += 1;
                if closes {
                    break;
                }
            }
            out.push(&chars, start, pos, StyleClass::String);
            continue;
        }

        if is_word_char(c) {
            if word.is_empty() {
                word_start = pos;
            }
            word.push(c);
        } else {
            flush(&mut out, &mut word, word_start, pos);
            out.push(&chars, pos, pos + 1, StyleClass::Operator);
        }
        pos += 1;
    }
    flush(&mut out, &mut word, word_start, pos);

    out.spans
}
