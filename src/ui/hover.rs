//! Diagnostic tooltip shown while the caret sits on a flagged token

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::Theme;
use bunnyide::Diagnostic;

pub fn render(frame: &mut Frame, diag: &Diagnostic, cursor_screen_pos: (u16, u16), theme: &Theme) {
    let area = frame.area();
    let text = format!(" {} ", diag.message);
    let popup_width = (text.chars().count() as u16 + 2).min(area.width);
    let popup_height = 3;

    let (cursor_x, cursor_y) = cursor_screen_pos;
    let popup_x = cursor_x.min(area.width.saturating_sub(popup_width));
    // Above the caret line, like an editor tooltip; below when at the top
    let popup_y = if cursor_y >= popup_height {
        cursor_y - popup_height
    } else {
        cursor_y + 1
    };
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height).intersection(area);

    frame.render_widget(Clear, popup_area);

    let error = theme.ui.diagnostic_error.to_color();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(error))
        .style(Style::default().bg(theme.ui.background.to_color()));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(error).add_modifier(Modifier::BOLD),
    )))
    .block(block);

    frame.render_widget(paragraph, popup_area);
}
