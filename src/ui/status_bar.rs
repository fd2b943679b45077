use crate::app::App;
use ratatui::{prelude::*, text::Span, widgets::Paragraph};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();

    let (mode_str, mode_bg) = if app.doc.is_shell() {
        (" SHELL ", theme.ui.mode_shell_bg.to_color())
    } else {
        (" PAYLOAD ", theme.ui.mode_payload_bg.to_color())
    };
    let mode_span = Span::styled(
        mode_str,
        Style::default()
            .bg(mode_bg)
            .fg(theme.ui.mode_fg.to_color())
            .add_modifier(Modifier::BOLD),
    );

    let modified = if app.doc.modified { " ●" } else { "" };
    let file_info = format!(" {}{} ", app.doc.filename(), modified);

    let (line, col) = app.doc.caret_line_col();
    let cursor_pos = format!(" Ln {}, Col {} ", line + 1, col + 1);

    let issue_count = app.lint.len();
    let diag_indicator = if app.lint_enabled() && issue_count > 0 {
        format!(" ✗ {issue_count} ")
    } else {
        String::new()
    };

    // Diagnostic under the caret wins over the status message
    let cursor_diagnostic = app.diagnostic_at_caret();
    let status_msg = match cursor_diagnostic {
        Some(diag) => format!(" Error: {} ", diag.message),
        None => format!(" {} ", app.status_message),
    };
    let msg_color = if cursor_diagnostic.is_some() {
        theme.ui.diagnostic_error.to_color()
    } else {
        theme.ui.status_bar_fg.to_color()
    };

    let left_len = mode_str.chars().count()
        + file_info.chars().count()
        + diag_indicator.chars().count()
        + status_msg.chars().count();
    let right_len = cursor_pos.chars().count();
    let padding = (area.width as usize)
        .checked_sub(left_len + right_len)
        .unwrap_or(1);

    let line = Line::from(vec![
        mode_span,
        Span::styled(
            file_info,
            Style::default()
                .fg(theme.ui.foreground.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            diag_indicator,
            Style::default()
                .bg(theme.ui.diagnostic_error.to_color())
                .fg(theme.ui.background.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_msg, Style::default().fg(msg_color)),
        Span::raw(" ".repeat(padding)),
        Span::styled(cursor_pos, Style::default().fg(theme.ui.foreground.to_color())),
    ]);
    let paragraph =
        Paragraph::new(line).style(Style::default().bg(theme.ui.status_bar_bg.to_color()));

    frame.render_widget(paragraph, area);
}
