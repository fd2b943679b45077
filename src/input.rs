use crate::app::App;
use crate::search::SearchField;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Save,
}

pub fn handle_event(app: &mut App, timeout: Duration) -> Result<Action> {
    if !event::poll(timeout)? {
        return Ok(Action::None);
    }

    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            Ok(handle_key(app, key, Instant::now()))
        }
        Event::Resize(_, _) => {
            app.on_resize();
            Ok(Action::None)
        }
        Event::Paste(text) => {
            app.insert_text(&text, Instant::now());
            Ok(Action::None)
        }
        _ => Ok(Action::None),
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> Action {
    // Snippet picker takes priority
    if app.snippets.visible {
        match key.code {
            KeyCode::Up => app.snippets.select_prev(),
            KeyCode::Down => app.snippets.select_next(),
            KeyCode::Enter => app.insert_snippet(now),
            KeyCode::Esc | KeyCode::F(2) => app.snippets.close(),
            _ => {}
        }
        return Action::None;
    }

    if !app.autocomplete.is_empty() {
        match key.code {
            KeyCode::Up => {
                app.autocomplete.select_prev();
                return Action::None;
            }
            KeyCode::Down => {
                app.autocomplete.select_next();
                return Action::None;
            }
            KeyCode::Tab => {
                app.accept_completion(now);
                return Action::None;
            }
            KeyCode::Esc => {
                app.close_autocomplete();
                return Action::None;
            }
            // Any other key closes the popup, then acts normally
            _ => app.close_autocomplete(),
        }
    }

    if app.search.visible && handle_search_key(app, key, now) {
        return Action::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl {
        match key.code {
            KeyCode::Char('s') => return Action::Save,
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('l') => app.lint_and_report(),
            KeyCode::Char('f') => app.open_search(),
            KeyCode::Char('a') => app.doc.select_all(),
            KeyCode::Char('c') => app.copy_selection(),
            KeyCode::Char('x') => app.cut_selection(now),
            KeyCode::Char('v') => app.paste(now),
            _ => {}
        }
        return Action::None;
    }

    let page = app.visible_height.max(1) as isize;
    match key.code {
        KeyCode::F(2) => app.snippets.open(),
        KeyCode::Char(c) => {
            app.insert_text(c.encode_utf8(&mut [0; 4]), now);
            app.update_autocomplete();
        }
        KeyCode::Enter => app.insert_text("\n", now),
        KeyCode::Tab => {
            let indent = " ".repeat(app.config.editor.tab_size);
            app.insert_text(&indent, now);
        }
        KeyCode::Backspace => {
            app.doc.backspace();
            app.on_edit(now);
            app.update_autocomplete();
        }
        KeyCode::Delete => {
            app.doc.delete_forward();
            app.on_edit(now);
        }
        KeyCode::Left => app.doc.move_left(shift),
        KeyCode::Right => app.doc.move_right(shift),
        KeyCode::Up => app.doc.move_lines(-1, shift),
        KeyCode::Down => app.doc.move_lines(1, shift),
        KeyCode::PageUp => app.doc.move_lines(-page, shift),
        KeyCode::PageDown => app.doc.move_lines(page, shift),
        KeyCode::Home => app.doc.move_home(shift),
        KeyCode::End => app.doc.move_end(shift),
        KeyCode::Esc => app.doc.clear_selection(),
        _ => {}
    }

    Action::None
}

/// Keys for the find / replace bar. Returns false for keys it leaves to
/// the editor, so motion and the other Ctrl bindings keep working.
fn handle_search_key(app: &mut App, key: KeyEvent, now: Instant) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.search.close(),
        KeyCode::Tab => app.search.toggle_field(),
        KeyCode::Enter => match app.search.field {
            SearchField::Find => app.find_next(),
            SearchField::Replace => app.replace_current(now),
        },
        KeyCode::Char('r') if ctrl => app.replace_all(),
        KeyCode::Char(c) if !ctrl => {
            app.search.input_mut().push(c);
            if app.search.field == SearchField::Find {
                app.search_incremental();
            }
        }
        KeyCode::Backspace => {
            app.search.input_mut().pop();
            if app.search.field == SearchField::Find {
                app.search_incremental();
            }
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::document::Document;
    use bunnyide::{Catalog, Category, CommandEntry};
    use std::path::PathBuf;

    fn app(text: &str) -> App {
        let mut config = Config::default();
        config.catalog.path = Some(PathBuf::from("/nonexistent/commands.txt"));
        let mut app = App::with_config(config, None, None).unwrap();
        app.doc = Document::from_text(text);
        app.doc.caret = app.doc.len_chars();
        app.catalog = Some(Catalog::from_entries(vec![
            CommandEntry::new("RUN", Category::Function),
            CommandEntry::new("RESET", Category::Function),
            CommandEntry::new("R2", Category::Word),
        ]));
        app
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), Instant::now())
    }

    fn ctrl(app: &mut App, c: char) -> Action {
        handle_key(
            app,
            KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL),
            Instant::now(),
        )
    }

    #[test]
    fn test_typing_opens_and_tab_commits() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.autocomplete.matches.len(), 3);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.autocomplete.selected_index, 1);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.doc.content(), "RESET ");
        assert!(app.autocomplete.is_empty());
    }

    #[test]
    fn test_other_key_closes_popup() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.autocomplete.is_empty());
        press(&mut app, KeyCode::Left);
        assert!(app.autocomplete.is_empty());
        assert_eq!(app.doc.caret, 0);
    }

    #[test]
    fn test_escape_closes_popup_without_editing() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Esc);
        assert!(app.autocomplete.is_empty());
        assert_eq!(app.doc.content(), "r");
    }

    #[test]
    fn test_shift_motion_selects() {
        let mut app = app("LED G");
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Home, KeyModifiers::SHIFT),
            Instant::now(),
        );
        assert_eq!(app.doc.selection(), Some((0, 5)));
        press(&mut app, KeyCode::Right);
        assert!(app.doc.selection().is_none());
    }

    #[test]
    fn test_ctrl_bindings() {
        let mut app = app("DELAY x");
        assert_eq!(ctrl(&mut app, 's'), Action::Save);
        assert_eq!(ctrl(&mut app, 'q'), Action::Quit);
        ctrl(&mut app, 'l');
        assert_eq!(app.status_message, "1 issues found");
        ctrl(&mut app, 'a');
        assert_eq!(app.doc.selection(), Some((0, 7)));
    }

    #[test]
    fn test_search_bar_find_and_replace() {
        let mut app = app("LED G\nLED R\nLED B");
        app.doc.caret = 0;
        ctrl(&mut app, 'f');
        assert!(app.search.visible);

        for c in "LED".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.search.query, "LED");
        assert_eq!(app.doc.content(), "LED G\nLED R\nLED B");
        assert_eq!(app.doc.selection(), Some((0, 3)));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.doc.selection(), Some((6, 9)));

        press(&mut app, KeyCode::Tab);
        for c in "LIGHT".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.doc.content(), "LED G\nLIGHT R\nLED B");

        ctrl(&mut app, 'r');
        assert_eq!(app.doc.content(), "LIGHT G\nLIGHT R\nLIGHT B");

        press(&mut app, KeyCode::Esc);
        assert!(!app.search.visible);
        assert_eq!(ctrl(&mut app, 's'), Action::Save);
    }

    #[test]
    fn test_search_bar_leaves_ctrl_bindings() {
        let mut app = app("LED G");
        ctrl(&mut app, 'f');
        assert_eq!(ctrl(&mut app, 'q'), Action::Quit);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.doc.content(), "LED G");
    }

    #[test]
    fn test_tab_at_end_of_inner_line_commits_with_space() {
        let mut app = app("r\nLED G");
        app.doc.caret = 1;
        app.update_autocomplete();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.doc.content(), "RESET \nLED G");
        assert_eq!(app.doc.caret_line_col(), (0, 6));
    }

    #[test]
    fn test_tab_inserts_spaces() {
        let mut app = app("");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.doc.content(), "  ");
    }

    #[test]
    fn test_snippet_picker_keys() {
        let mut app = app("");
        press(&mut app, KeyCode::F(2));
        assert!(app.snippets.visible);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.doc.content(), "ATTACKMODE STORAGE\nLED B");
        assert!(!app.snippets.visible);
    }
}
