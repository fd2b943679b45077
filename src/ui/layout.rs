use crate::app::App;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, app: &mut App) {
    let search_rows = u16::from(app.search.visible);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(search_rows),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let caret = super::editor::render(frame, chunks[0], app);
    super::status_bar::render(frame, chunks[2], app);

    let theme = app.theme().clone();
    if app.search.visible {
        super::search_bar::render(frame, chunks[1], &app.search, &theme);
    }
    if app.snippets.visible {
        super::snippets::render(frame, &app.snippets, &theme);
        return;
    }

    let Some(caret) = caret else {
        return;
    };
    if !app.autocomplete.is_empty() {
        super::autocomplete::render(frame, &app.autocomplete, caret, &theme);
    } else if let Some(diag) = app.diagnostic_at_caret() {
        super::hover::render(frame, diag, caret, &theme);
    }
}
