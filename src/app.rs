use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::document::Document;
use crate::search::{self, SearchState};
use crate::snippets::SnippetPicker;
use crate::theme::Theme;
use anyhow::Result;
use bunnyide::{
    commit, complete, highlight, lint, AutocompleteState, Catalog, Debouncer, Diagnostic,
    EditorMetrics, FontKey, LintResult, MetricsCache, RenderSpan,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Upper bound on how long the event loop blocks waiting for input
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    pub doc: Document,
    pub config: Config,
    /// `None` until a catalog loads; catalog-backed features stay off meanwhile
    pub catalog: Option<Catalog>,
    /// Latest full lint pass, replaced wholesale
    pub lint: LintResult,
    /// Highlighted lines for the current text
    pub spans: Vec<Vec<RenderSpan>>,
    pub lint_timer: Debouncer,
    pub autocomplete: AutocompleteState,
    pub snippets: SnippetPicker,
    pub search: SearchState,
    pub clipboard: Clipboard,
    pub metrics: MetricsCache,
    pub status_message: String,
    pub visible_height: usize,
}

impl App {
    pub fn new(path: Option<PathBuf>, catalog_override: Option<PathBuf>) -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config, path, catalog_override)
    }

    pub fn with_config(
        config: Config,
        path: Option<PathBuf>,
        catalog_override: Option<PathBuf>,
    ) -> Result<Self> {
        let mut status_message =
            String::from("F2 snippets | Ctrl+F find | Ctrl+L lint | Ctrl+S save | Ctrl+Q quit");

        let catalog_path = match catalog_override {
            Some(p) => p,
            None => config.catalog_path()?,
        };
        let catalog = match load_catalog(&catalog_path) {
            Some(c) => Some(c),
            None => {
                status_message = format!(
                    "Command catalog not loaded ({}); completion disabled",
                    catalog_path.display()
                );
                None
            }
        };

        let doc = match path {
            Some(path) => {
                let doc = Document::open(&path)?;
                tracing::info!(path = %path.display(), lines = doc.len_lines(), "file opened");
                doc
            }
            None => Document::new(),
        };

        let lint_timer = Debouncer::new(config.editor.lint_debounce());
        let mut app = Self {
            doc,
            config,
            catalog,
            lint: LintResult::default(),
            spans: Vec::new(),
            lint_timer,
            autocomplete: AutocompleteState::default(),
            snippets: SnippetPicker::default(),
            search: SearchState::default(),
            clipboard: Clipboard::new(),
            metrics: MetricsCache::new(),
            status_message,
            visible_height: 0,
        };
        app.lint_now();
        Ok(app)
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub fn lint_enabled(&self) -> bool {
        self.config.editor.lint_enabled
    }

    /// Cell metrics for the terminal; re-measured after a resize
    pub fn metrics(&mut self) -> EditorMetrics {
        let font = FontKey {
            family: String::from("terminal"),
            size: 1.0,
            weight: 400,
        };
        self.metrics.get_or_measure(&font, EditorMetrics::cells)
    }

    pub fn on_resize(&mut self) {
        self.metrics.invalidate();
    }

    // ========== Lint / highlight cycle ==========

    /// Run a full lint pass now and cancel any pending one
    pub fn lint_now(&mut self) {
        self.lint_timer.cancel();
        if self.lint_enabled() {
            let started = Instant::now();
            self.lint = lint(
                &self.doc.content(),
                self.doc.is_shell(),
                self.catalog.as_ref(),
            );
            tracing::debug!(
                issues = self.lint.len(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "lint pass"
            );
        } else {
            self.lint = LintResult::default();
        }
        self.refresh_highlight();
    }

    /// Re-highlight with whatever lint result is current
    pub fn refresh_highlight(&mut self) {
        let lint = self.lint_enabled().then_some(&self.lint);
        self.spans = highlight(&self.doc.content(), lint, self.catalog.as_ref());
    }

    /// Called after every text change
    pub fn on_edit(&mut self, now: Instant) {
        self.lint_timer.schedule(now);
        self.refresh_highlight();
    }

    /// Fire the debounced lint if it is due
    pub fn tick(&mut self, now: Instant) {
        if self.lint_timer.fire_if_due(now) {
            self.lint_now();
        }
    }

    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.lint_timer
            .time_until_due(now)
            .map_or(POLL_INTERVAL, |due| due.min(POLL_INTERVAL))
    }

    pub fn lint_and_report(&mut self) {
        self.lint_now();
        self.status_message = format!("{} issues found", self.lint.len());
    }

    pub fn diagnostic_at_caret(&self) -> Option<&Diagnostic> {
        if !self.lint_enabled() {
            return None;
        }
        let (line, col) = self.doc.caret_line_col();
        self.lint.diagnostic_at(line, col)
    }

    // ========== Autocomplete ==========

    pub fn update_autocomplete(&mut self) {
        self.autocomplete = if self.config.editor.autocomplete_enabled {
            complete(&self.doc.content(), self.doc.caret, self.catalog.as_ref())
        } else {
            AutocompleteState::default()
        };
    }

    pub fn close_autocomplete(&mut self) {
        self.autocomplete = AutocompleteState::default();
    }

    pub fn accept_completion(&mut self, now: Instant) {
        let Some(entry) = self.autocomplete.selected().cloned() else {
            return;
        };
        let done = commit(&self.doc.content(), self.doc.caret, &entry);
        self.doc.replace_content(&done.text, done.caret);
        self.close_autocomplete();
        self.on_edit(now);
    }

    // ========== Search ==========

    pub fn open_search(&mut self) {
        self.close_autocomplete();
        self.search.open();
    }

    /// Select the first match from the selection start, wrapping to the top
    pub fn search_incremental(&mut self) {
        let text = self.doc.content();
        let from = self.doc.selection().map_or(self.doc.caret, |(start, _)| start);
        let query = &self.search.query;
        let found = search::find_from(&text, query, from)
            .or_else(|| search::find_from(&text, query, 0));
        if let Some(at) = found {
            self.select_match(at);
        }
    }

    /// Select the next match after the current selection
    pub fn find_next(&mut self) {
        if self.search.query.is_empty() {
            return;
        }
        let text = self.doc.content();
        let from = self.doc.selection().map_or(self.doc.caret, |(_, end)| end);
        match search::find_from(&text, &self.search.query, from) {
            Some(at) => self.select_match(at),
            None => self.status_message = String::from("EOF reached"),
        }
    }

    fn select_match(&mut self, at: usize) {
        self.doc.select(at, at + self.search.query_len());
    }

    /// Replace the selection if it is a match, otherwise move to the next one
    pub fn replace_current(&mut self, now: Instant) {
        if self.search.query.is_empty() {
            return;
        }
        if self.doc.selected_text().as_deref() == Some(self.search.query.as_str()) {
            let replacement = self.search.replacement.clone();
            self.insert_text(&replacement, now);
        } else {
            self.find_next();
        }
    }

    pub fn replace_all(&mut self) {
        let (text, count) = search::replace_all(
            &self.doc.content(),
            &self.search.query,
            &self.search.replacement,
        );
        if count == 0 {
            self.status_message = String::from("No matches");
            return;
        }
        let caret = self.doc.caret.min(text.chars().count());
        self.doc.replace_content(&text, caret);
        tracing::debug!(count, "replaced all matches");
        self.lint_now();
        self.status_message = format!("Replaced {count} occurrences");
    }

    // ========== Editing ==========

    pub fn insert_text(&mut self, text: &str, now: Instant) {
        self.doc.insert_str(text);
        self.on_edit(now);
    }

    pub fn insert_snippet(&mut self, now: Instant) {
        let snippet = self.snippets.current();
        self.doc.insert_str(snippet.body);
        self.snippets.close();
        self.refresh_highlight();
        self.lint_timer
            .schedule_after(now, self.config.editor.snippet_lint_delay());
        self.status_message = format!("Inserted snippet: {}", snippet.name);
    }

    pub fn copy_selection(&mut self) {
        if let Some(text) = self.doc.selected_text() {
            self.clipboard.copy(&text);
            self.status_message = String::from("Copied");
        }
    }

    pub fn cut_selection(&mut self, now: Instant) {
        if let Some(text) = self.doc.cut() {
            self.clipboard.copy(&text);
            self.on_edit(now);
        }
    }

    pub fn paste(&mut self, now: Instant) {
        if let Some(text) = self.clipboard.paste() {
            self.insert_text(&text, now);
        }
    }

    pub fn save(&mut self) {
        match self.doc.save() {
            Ok(path) => {
                tracing::info!(path = %path.display(), "file saved");
                self.status_message = format!("Saved: {}", path.display());
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.status_message = format!("Save failed: {e}");
            }
        }
    }

    pub fn update_viewport(&mut self, height: usize, width: usize) {
        self.visible_height = height;
        self.doc.ensure_visible(height, width);
    }
}

/// Load the command catalog, logging instead of failing
pub fn load_catalog(path: &Path) -> Option<Catalog> {
    match Catalog::load(path) {
        Ok(catalog) => {
            tracing::info!(path = %path.display(), entries = catalog.len(), "catalog loaded");
            Some(catalog)
        }
        Err(e) => {
            tracing::warn!(error = %e, "catalog unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bunnyide::{CommandEntry, Category};

    fn app(text: &str) -> App {
        let mut config = Config::default();
        config.catalog.path = Some(PathBuf::from("/nonexistent/commands.txt"));
        let mut app = App::with_config(config, None, None).unwrap();
        app.doc = Document::from_text(text);
        app.catalog = Some(Catalog::from_entries(vec![
            CommandEntry::new("RUN", Category::Function),
            CommandEntry::new("RESET", Category::Function),
        ]));
        app.lint_now();
        app
    }

    #[test]
    fn test_missing_catalog_is_not_fatal() {
        let mut config = Config::default();
        config.catalog.path = Some(PathBuf::from("/nonexistent/commands.txt"));
        let app = App::with_config(config, None, None).unwrap();
        assert!(app.catalog.is_none());
        assert!(app.status_message.contains("not loaded"));
    }

    #[test]
    fn test_edit_defers_lint_until_debounce() {
        let mut app = app("LED G");
        assert!(app.lint.is_empty());

        let now = Instant::now();
        app.doc.caret = 5;
        app.insert_text("\nDELAY x", now);
        // Highlight refreshed, lint still the old one
        assert_eq!(app.spans.len(), 2);
        assert!(app.lint.is_empty());

        app.tick(now + Duration::from_millis(100));
        assert!(app.lint.is_empty());
        app.tick(now + app.config.editor.lint_debounce());
        assert_eq!(app.lint.len(), 1);
        assert!(app.spans[1][0].is_error);
    }

    #[test]
    fn test_poll_timeout_tracks_pending_lint() {
        let mut app = app("");
        let now = Instant::now();
        assert_eq!(app.poll_timeout(now), POLL_INTERVAL);
        app.lint_timer.schedule_after(now, Duration::from_millis(30));
        assert_eq!(app.poll_timeout(now), Duration::from_millis(30));
    }

    #[test]
    fn test_accept_completion() {
        let mut app = app("re");
        app.doc.caret = 2;
        app.update_autocomplete();
        assert_eq!(app.autocomplete.matches.len(), 1);
        app.accept_completion(Instant::now());
        assert_eq!(app.doc.content(), "RESET ");
        assert_eq!(app.doc.caret, 6);
        assert!(app.autocomplete.is_empty());
        assert!(app.lint_timer.is_pending());
    }

    #[test]
    fn test_accept_completion_before_line_break() {
        let mut app = app("re\nLED G");
        app.doc.caret = 2;
        app.update_autocomplete();
        app.accept_completion(Instant::now());
        assert_eq!(app.doc.content(), "RESET \nLED G");
        assert_eq!(app.doc.caret, 6);
        assert_eq!(app.doc.caret_line_col(), (0, 6));
    }

    #[test]
    fn test_incremental_search_wraps_to_top() {
        let mut app = app("LED G\nDELAY 5\nLED R");
        app.doc.caret = 10;
        app.search.query = String::from("LED");
        app.search_incremental();
        assert_eq!(app.doc.selection(), Some((14, 17)));

        app.doc.caret = 16;
        app.doc.clear_selection();
        app.search_incremental();
        assert_eq!(app.doc.selection(), Some((0, 3)));
    }

    #[test]
    fn test_find_next_stops_at_end() {
        let mut app = app("LED G\nLED R");
        app.doc.caret = 0;
        app.search.query = String::from("LED");
        app.find_next();
        assert_eq!(app.doc.selection(), Some((0, 3)));
        app.find_next();
        assert_eq!(app.doc.selection(), Some((6, 9)));
        app.find_next();
        assert_eq!(app.doc.selection(), Some((6, 9)));
        assert_eq!(app.status_message, "EOF reached");
    }

    #[test]
    fn test_replace_current_needs_selected_match() {
        let mut app = app("LED G\nLED R");
        let now = Instant::now();
        app.doc.caret = 0;
        app.search.query = String::from("LED");
        app.search.replacement = String::from("LIGHT");

        app.replace_current(now);
        assert_eq!(app.doc.content(), "LED G\nLED R");
        assert_eq!(app.doc.selection(), Some((0, 3)));

        app.replace_current(now);
        assert_eq!(app.doc.content(), "LIGHT G\nLED R");
        assert!(app.lint_timer.is_pending());
    }

    #[test]
    fn test_replace_all_lints_immediately() {
        let mut app = app("DELAY 5\nDELAY 7");
        app.search.query = String::from("5");
        app.search.replacement = String::from("x");
        app.replace_all();
        assert_eq!(app.doc.content(), "DELAY x\nDELAY 7");
        assert_eq!(app.lint.len(), 1);
        assert_eq!(app.status_message, "Replaced 1 occurrences");

        app.search.query = String::from("QUACK");
        app.replace_all();
        assert_eq!(app.status_message, "No matches");
    }

    #[test]
    fn test_diagnostic_at_caret_respects_setting() {
        let mut app = app("DELAY x");
        assert!(app.diagnostic_at_caret().is_some());
        app.config.editor.lint_enabled = false;
        app.lint_now();
        assert!(app.diagnostic_at_caret().is_none());
        assert!(app.spans.iter().flatten().all(|s| !s.is_error));
    }

    #[test]
    fn test_snippet_schedules_short_lint() {
        let mut app = app("");
        let now = Instant::now();
        app.snippets.open();
        app.insert_snippet(now);
        assert!(app.doc.content().starts_with("ATTACKMODE HID"));
        assert!(!app.snippets.visible);
        assert!(app.lint_timer.fire_if_due(now + app.config.editor.snippet_lint_delay()));
    }
}
