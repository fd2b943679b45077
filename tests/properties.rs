//! Property-based tests with proptest.
//!
//! Random payload lines are fed to the lexer and the highlighter; both must
//! account for every character of the input. Random selections over
//! multi-line text check the outline of the selection shape.

use bunnyide::{
    highlight, lex, lint, selection_shape_with_inset, Catalog, Category, CommandEntry,
    EditorMetrics, Point, Scroll,
};
use proptest::prelude::*;
use proptest::sample::Index;

/// Printable payload text including the characters the lexer treats
/// specially: quotes, backslashes, `#` and `$`.
fn payload_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _$#\"'\\\\=./|-]{0,60}"
}

/// Multi-line buffer, including blank lines and non-ASCII text
fn payload_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => payload_line(),
            1 => Just(String::new()),
            1 => "[äöü€ a-z]{0,12}",
        ],
        0..8,
    )
    .prop_map(|lines| lines.join("\n"))
}

/// Short lines so selections regularly start or end on line edges
fn short_lines() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z ]{0,8}", 1..5).prop_map(|lines| lines.join("\n"))
}

/// `(line, col)` of a char offset, splitting on `\n` only
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before: Vec<char> = text.chars().take(offset).collect();
    let line = before.iter().filter(|&&c| c == '\n').count();
    let col = before.iter().rev().take_while(|&&c| c != '\n').count();
    (line, col)
}

fn catalog() -> Catalog {
    Catalog::from_entries(vec![
        CommandEntry::new("RUN", Category::Function),
        CommandEntry::new("HID", Category::Argument),
        CommandEntry::new("SWITCH_POSITION", Category::Word),
        CommandEntry::new("while", Category::Loop),
    ])
}

proptest! {
    #[test]
    fn lexer_spans_are_ordered_and_exact(line in payload_line()) {
        let chars: Vec<char> = line.chars().collect();
        let tokens = lex(&line);

        let mut last_end = 0;
        for token in &tokens {
            prop_assert!(token.start < token.end);
            prop_assert!(token.start >= last_end);
            prop_assert!(token.end <= chars.len());
            let slice: String = chars[token.start..token.end].iter().collect();
            prop_assert_eq!(&token.value, &slice);
            last_end = token.end;
        }
    }

    #[test]
    fn lexer_tokens_never_start_with_comment(line in payload_line()) {
        for token in lex(&line) {
            prop_assert!(!token.value.starts_with('#'));
            prop_assert!(!token.value.chars().next().is_some_and(char::is_whitespace));
        }
    }

    #[test]
    fn highlight_reconstructs_every_line(text in payload_text()) {
        let cat = catalog();
        let result = lint(&text, false, Some(&cat));
        let lines = highlight(&text, Some(&result), Some(&cat));

        let expected: Vec<&str> = text.split('\n').collect();
        prop_assert_eq!(lines.len(), expected.len());
        for (spans, line) in lines.iter().zip(expected) {
            let joined: String = spans.iter().map(|s| s.text.as_str()).collect();
            prop_assert_eq!(joined, line);
            prop_assert!(spans.iter().all(|s| !s.text.is_empty()));
        }
    }

    #[test]
    fn highlight_without_catalog_or_lint_marks_no_errors(text in payload_text()) {
        let lines = highlight(&text, None, None);
        prop_assert!(lines.iter().flatten().all(|s| !s.is_error));
    }

    #[test]
    fn diagnostics_point_inside_their_line(text in payload_text()) {
        let cat = catalog();
        let result = lint(&text, false, Some(&cat));
        let lines: Vec<&str> = text.split('\n').collect();
        for diag in &result.diagnostics {
            let len = lines[diag.line].chars().count();
            prop_assert!(diag.line_span.start < diag.line_span.end);
            prop_assert!(diag.line_span.end <= len);
            let base = result.line_start_offsets[diag.line];
            prop_assert_eq!(diag.absolute_span.start, base + diag.line_span.start);
        }
    }

    #[test]
    fn shell_files_never_report_unknown_commands(text in payload_text()) {
        let cat = catalog();
        let result = lint(&text, true, Some(&cat));
        prop_assert!(result
            .diagnostics
            .iter()
            .all(|d| d.message != bunnyide::lint::UNKNOWN_COMMAND));
    }

    #[test]
    fn selection_outline_is_well_formed(
        text in short_lines(),
        a in any::<Index>(),
        b in any::<Index>(),
    ) {
        let len = text.chars().count();
        let (a, b) = (a.index(len + 1), b.index(len + 1));
        let (start, end) = (a.min(b), a.max(b));
        let shape = selection_shape_with_inset(
            &text,
            a,
            b,
            Scroll::default(),
            &EditorMetrics::cells(),
            0.0,
        );
        let points = shape.points();

        prop_assert_eq!(shape.is_empty(), start == end);
        if start == end {
            return Ok(());
        }

        let (start_line, _) = line_col(&text, start);
        let (end_line, end_col) = line_col(&text, end);
        if start_line == end_line || (end_line == start_line + 1 && end_col == 0) {
            prop_assert_eq!(points.len(), 4);
        }

        // Closed path without repeated vertices
        for pair in points.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
        prop_assert_ne!(points.first(), points.last());

        // Every vertex sits on a line boundary
        prop_assert!(points.iter().all(|p| p.y.fract() == 0.0));

        // Each covered row is crossed by exactly one left and one right edge
        let top = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let bottom = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        prop_assert_eq!(top, start_line as f32);
        let rows = (bottom - top) as usize;
        for row in 0..rows {
            let y = top + row as f32 + 0.5;
            let crossings = (0..points.len())
                .filter(|&i| {
                    let (p, q) = (points[i], points[(i + 1) % points.len()]);
                    (p.y > y) != (q.y > y)
                })
                .count();
            prop_assert_eq!(crossings, 2, "row {}", row);
        }

        // Selected chars are inside, chars around the ends are outside
        for (offset, c) in text.chars().enumerate() {
            if c == '\n' {
                continue;
            }
            let (line, col) = line_col(&text, offset);
            let center = Point::new(col as f32 + 0.5, line as f32 + 0.5);
            if (start..end).contains(&offset) {
                prop_assert!(shape.contains(center), "offset {} not inside", offset);
            } else if line == start_line || line == end_line {
                prop_assert!(!shape.contains(center), "offset {} inside", offset);
            }
        }
    }
}
