use crate::search::{SearchField, SearchState};
use crate::theme::Theme;
use ratatui::{prelude::*, widgets::Paragraph};

const FIND_LABEL: &str = " Find: ";
const REPLACE_LABEL: &str = "  Replace: ";
const HINT: &str = "  Enter next/replace | Tab switch | Ctrl+R all | Esc close";

pub fn render(frame: &mut Frame, area: Rect, search: &SearchState, theme: &Theme) {
    let base = Style::default()
        .fg(theme.ui.foreground.to_color())
        .bg(theme.ui.status_bar_bg.to_color());
    let field_style = |field: SearchField| {
        if search.field == field {
            base.add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
        } else {
            base
        }
    };

    let line = Line::from(vec![
        Span::styled(FIND_LABEL, base),
        Span::styled(search.query.as_str(), field_style(SearchField::Find)),
        Span::styled(REPLACE_LABEL, base),
        Span::styled(search.replacement.as_str(), field_style(SearchField::Replace)),
        Span::styled(HINT, base.fg(theme.ui.line_numbers.to_color())),
    ]);
    frame.render_widget(Paragraph::new(line).style(base), area);

    // Cursor at the end of the active field
    let offset = match search.field {
        SearchField::Find => FIND_LABEL.len() + search.query.chars().count(),
        SearchField::Replace => {
            FIND_LABEL.len()
                + search.query.chars().count()
                + REPLACE_LABEL.len()
                + search.replacement.chars().count()
        }
    };
    let x = (area.x + offset as u16).min(area.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, area.y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_cursor_follows_active_field() {
        let theme = Theme::dark();
        let mut search = SearchState::default();
        search.open();
        search.query = String::from("LED");
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, &search, &theme);
            })
            .unwrap();
        let pos = terminal.get_cursor_position().unwrap();
        assert_eq!(pos, Position::new(10, 0));

        search.toggle_field();
        search.replacement = String::from("LIGHT");
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, &search, &theme);
            })
            .unwrap();
        let pos = terminal.get_cursor_position().unwrap();
        assert_eq!(pos, Position::new(26, 0));
    }
}
