//! Autocomplete popup rendering

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::Theme;
use bunnyide::{AutocompleteState, Category, CommandEntry, StyleClass};

/// Popup width a row needs, borders included
fn row_width(entry: &CommandEntry) -> usize {
    let description = match entry.description.chars().count() {
        0 => 0,
        n => n + 1,
    };
    entry.name.chars().count() + description + entry.category.label().len() + 5
}

fn icon(category: Category) -> char {
    match category {
        Category::Function => 'f',
        Category::Argument => 'a',
        Category::Word => 'w',
        Category::Bash => 'b',
        Category::Condition => 'c',
        Category::Loop => 'l',
        Category::Other => 'o',
    }
}

/// Cut `text` to at most `room` chars, ending in `…` when shortened
fn fit(text: &str, room: usize) -> String {
    if text.chars().count() <= room {
        return text.to_string();
    }
    if room == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(room - 1).collect();
    out.push('…');
    out
}

/// Render the autocomplete popup
pub fn render(
    frame: &mut Frame,
    autocomplete: &AutocompleteState,
    cursor_screen_pos: (u16, u16),
    theme: &Theme,
) {
    if autocomplete.is_empty() {
        return;
    }

    let max_text_width = autocomplete
        .matches
        .iter()
        .map(row_width)
        .max()
        .unwrap_or(20) as u16;

    let popup_width = max_text_width.clamp(15, 60);
    let popup_height = autocomplete.matches.len() as u16 + 2;

    // Below the caret, or above when there is no room
    let (cursor_x, cursor_y) = cursor_screen_pos;
    let area = frame.area();
    let popup_x = cursor_x.min(area.width.saturating_sub(popup_width));
    let popup_y = if cursor_y + popup_height + 1 < area.height {
        cursor_y + 1
    } else {
        cursor_y.saturating_sub(popup_height)
    };
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height).intersection(area);

    frame.render_widget(Clear, popup_area);

    let inner_width = popup_width.saturating_sub(2) as usize;
    let lines: Vec<Line> = autocomplete
        .matches
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == autocomplete.selected_index;
            let base_style = if is_selected {
                Style::default()
                    .bg(theme.ui.selection.to_color())
                    .fg(theme.ui.selection_fg.to_color())
            } else {
                Style::default().fg(theme.ui.foreground.to_color())
            };
            let kind_style = if is_selected {
                base_style
            } else {
                let class = StyleClass::from_category(entry.category);
                Style::default().fg(theme.syntax.color_for(class).to_color())
            };

            let label = entry.category.label();
            let fixed = entry.name.chars().count() + label.len() + 3;
            let description = match fit(&entry.description, inner_width.saturating_sub(fixed + 1)) {
                d if d.is_empty() => d,
                d => format!(" {d}"),
            };
            let used = fixed + description.chars().count();
            let padding = " ".repeat(inner_width.saturating_sub(used));

            Line::from(vec![
                Span::styled(format!("{} ", icon(entry.category)), kind_style),
                Span::styled(entry.name.clone(), base_style),
                Span::styled(description, base_style.add_modifier(Modifier::DIM)),
                Span::styled(format!("{padding} "), base_style),
                Span::styled(
                    label,
                    base_style.fg(theme.ui.line_numbers.to_color()),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.ui.border.to_color()))
        .style(Style::default().bg(theme.ui.background.to_color()));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
