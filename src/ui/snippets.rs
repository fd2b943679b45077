//! Snippet picker popup

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::snippets::{SnippetPicker, SNIPPETS};
use crate::theme::Theme;

pub fn render(frame: &mut Frame, picker: &SnippetPicker, theme: &Theme) {
    let area = frame.area();
    let popup_width = 36.min(area.width);
    let popup_height = (SNIPPETS.len() as u16 + 2).min(area.height);
    let popup_area = Rect::new(
        area.width.saturating_sub(popup_width) / 2,
        area.height.saturating_sub(popup_height) / 2,
        popup_width,
        popup_height,
    );

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = SNIPPETS
        .iter()
        .enumerate()
        .map(|(i, snippet)| {
            let style = if i == picker.selected {
                Style::default()
                    .bg(theme.ui.selection.to_color())
                    .fg(theme.ui.selection_fg.to_color())
            } else {
                Style::default().fg(theme.ui.foreground.to_color())
            };
            Line::from(Span::styled(format!(" {} ", snippet.name), style))
        })
        .collect();

    let block = Block::default()
        .title(" Snippets ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.ui.border_focused.to_color()))
        .style(Style::default().bg(theme.ui.background.to_color()));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
