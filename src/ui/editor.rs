use ratatui::{
    prelude::*,
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;
use crate::theme::Theme;
use bunnyide::{selection_shape_with_inset, Point, RenderSpan, Scroll, SelectionShape};

/// Render the editor pane. Returns the caret's screen cell when it is in view.
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) -> Option<(u16, u16)> {
    let metrics = app.metrics();
    let theme = app.theme().clone();

    let line_count = app.doc.len_lines();
    // Error marker, digits, one space
    let gutter_width = line_count.to_string().len().max(3) + 3;

    let title = if app.doc.modified {
        format!(" {} ● ", app.doc.filename())
    } else {
        format!(" {} ", app.doc.filename())
    };
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.ui.foreground.to_color())
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.ui.border_focused.to_color()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text_width = (inner.width as usize).saturating_sub(gutter_width);
    app.update_viewport(inner.height as usize, text_width);

    let doc = &app.doc;
    let scroll = Scroll {
        left: doc.scroll_col as f32 * metrics.char_width,
        top: doc.scroll_offset as f32 * metrics.line_height,
    };
    let shape = match doc.selection() {
        Some((start, end)) => {
            selection_shape_with_inset(&doc.content(), start, end, scroll, &metrics, 0.0)
        }
        None => SelectionShape::default(),
    };

    let lint_enabled = app.lint_enabled();
    let (caret_line, _) = doc.caret_line_col();

    let lines: Vec<Line> = (doc.scroll_offset..line_count)
        .take(inner.height as usize)
        .map(|idx| {
            let has_errors = lint_enabled && app.lint.line_has_errors(idx);
            let mut spans = gutter(idx, gutter_width, has_errors, &theme);

            let row = (idx - doc.scroll_offset) as f32;
            let cells = line_cells(app.spans.get(idx).map(Vec::as_slice), &theme);
            spans.extend(paint_row(
                &cells,
                doc.scroll_col,
                text_width,
                row,
                &shape,
                &theme,
            ));

            let mut line = Line::from(spans);
            if idx == caret_line && shape.is_empty() {
                line = line.style(Style::default().bg(theme.ui.cursor_line.to_color()));
            }
            line
        })
        .collect();

    let paragraph =
        Paragraph::new(lines).style(Style::default().bg(theme.ui.background.to_color()));
    frame.render_widget(paragraph, inner);

    let caret = bunnyide::caret_pixel_position(&doc.content(), doc.caret, &metrics);
    let x = ((caret.x - scroll.left) / metrics.char_width) as i64;
    let y = ((caret.y - scroll.top) / metrics.line_height) as i64;
    if x < 0 || y < 0 || x as usize >= text_width || y >= inner.height as i64 {
        return None;
    }
    let pos = (
        inner.x + gutter_width as u16 + x as u16,
        inner.y + y as u16,
    );
    frame.set_cursor_position(pos);
    Some(pos)
}

fn gutter(idx: usize, width: usize, has_errors: bool, theme: &Theme) -> Vec<Span<'static>> {
    let number = format!("{:>w$} ", idx + 1, w = width - 3);
    if has_errors {
        let style = Style::default().fg(theme.ui.diagnostic_error.to_color());
        vec![
            Span::styled("● ", style),
            Span::styled(number, style.add_modifier(Modifier::BOLD)),
        ]
    } else {
        vec![
            Span::raw("  "),
            Span::styled(number, Style::default().fg(theme.ui.line_numbers.to_color())),
        ]
    }
}

/// Flatten highlight spans into one styled cell per char
fn line_cells(spans: Option<&[RenderSpan]>, theme: &Theme) -> Vec<(char, Style)> {
    let Some(spans) = spans else {
        return Vec::new();
    };
    let mut cells = Vec::new();
    for span in spans {
        let mut style = Style::default().fg(theme.syntax.color_for(span.style_class).to_color());
        if span.is_error {
            style = style
                .fg(theme.ui.diagnostic_error.to_color())
                .add_modifier(Modifier::UNDERLINED);
        }
        cells.extend(span.text.chars().map(|c| (c, style)));
    }
    cells
}

/// Apply horizontal scroll and selection, merging runs of equal style.
///
/// Cells past the end of the line are still tested so empty lines inside a
/// selection stay visible.
fn paint_row(
    cells: &[(char, Style)],
    scroll_col: usize,
    width: usize,
    row: f32,
    shape: &SelectionShape,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let selected = Style::default()
        .bg(theme.ui.selection.to_color())
        .fg(theme.ui.selection_fg.to_color());

    let mut out: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    for screen_col in 0..width {
        let cell = cells.get(scroll_col + screen_col).copied();
        let center = Point::new(screen_col as f32 + 0.5, row + 0.5);
        let in_selection = !shape.is_empty() && shape.contains(center);

        let (c, style) = match cell {
            Some((c, style)) if in_selection => (c, style.patch(selected)),
            Some(cell) => cell,
            None if in_selection => (' ', selected),
            None => break,
        };

        if run_style != Some(style) && !run.is_empty() {
            out.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
        }
        run_style = Some(style);
        run.push(c);
    }
    if !run.is_empty() {
        out.push(Span::styled(run, run_style.unwrap_or_default()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bunnyide::EditorMetrics;

    fn text_of(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_row_applies_scroll_and_width() {
        let theme = Theme::dark();
        let cells: Vec<(char, Style)> = "ATTACKMODE HID"
            .chars()
            .map(|c| (c, Style::default()))
            .collect();
        let spans = paint_row(&cells, 11, 10, 0.0, &SelectionShape::default(), &theme);
        assert_eq!(text_of(&spans), "HID");
    }

    #[test]
    fn test_selection_paints_selected_cells() {
        let theme = Theme::dark();
        let text = "LED G\nLED R";
        let shape = selection_shape_with_inset(
            text,
            4,
            8,
            Scroll::default(),
            &EditorMetrics::cells(),
            0.0,
        );
        let cells: Vec<(char, Style)> = "LED G"
            .chars()
            .map(|c| (c, Style::default()))
            .collect();
        let spans = paint_row(&cells, 0, 20, 0.0, &shape, &theme);
        assert_eq!(text_of(&spans), "LED G");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].content, "G");
        assert_eq!(spans[1].style.bg, Some(theme.ui.selection.to_color()));
    }

    #[test]
    fn test_error_cells_are_underlined() {
        let theme = Theme::dark();
        let mut span = RenderSpan::new("FOO", bunnyide::StyleClass::Generic);
        span.is_error = true;
        let cells = line_cells(Some(&[span]), &theme);
        assert_eq!(cells.len(), 3);
        assert!(cells[0].1.add_modifier.contains(Modifier::UNDERLINED));
    }
}
