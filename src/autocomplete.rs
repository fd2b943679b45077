//! Catalog-backed autocomplete anchored at the caret

use crate::catalog::{Catalog, CommandEntry};

pub const MAX_MATCHES: usize = 10;

/// State for the autocomplete popup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteState {
    pub matches: Vec<CommandEntry>,
    pub selected_index: usize,
}

impl AutocompleteState {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        if !self.matches.is_empty() {
            if self.selected_index == 0 {
                self.selected_index = self.matches.len() - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if !self.matches.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.matches.len();
        }
    }

    /// Get the currently selected entry
    pub fn selected(&self) -> Option<&CommandEntry> {
        self.matches.get(self.selected_index)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Word ending at `caret`, returned with its start offset.
pub fn word_before(text: &str, caret: usize) -> (usize, String) {
    let chars: Vec<char> = text.chars().collect();
    let caret = caret.min(chars.len());
    let mut start = caret;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    (start, chars[start..caret].iter().collect())
}

/// Recompute matches for the word under the caret.
///
/// Returns an empty state when there is no word or no catalog.
pub fn complete(text: &str, caret: usize, catalog: Option<&Catalog>) -> AutocompleteState {
    let Some(catalog) = catalog else {
        return AutocompleteState::default();
    };
    let (_, word) = word_before(text, caret);
    if word.is_empty() {
        return AutocompleteState::default();
    }

    let prefix = word.to_uppercase();
    let matches = catalog
        .entries()
        .iter()
        .filter(|entry| entry.name.to_uppercase().starts_with(&prefix))
        .take(MAX_MATCHES)
        .cloned()
        .collect();

    AutocompleteState {
        matches,
        selected_index: 0,
    }
}

/// Buffer text and caret after accepting a completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub text: String,
    pub caret: usize,
}

/// Replace the word before the caret with `entry.name` and a trailing space.
///
/// A space already at the caret serves as the trailing space. Any other char,
/// a line break included, gets a space inserted before it.
pub fn commit(text: &str, caret: usize, entry: &CommandEntry) -> Commit {
    let chars: Vec<char> = text.chars().collect();
    let caret = caret.min(chars.len());
    let (start, _) = word_before(text, caret);

    let before: String = chars[..start].iter().collect();
    let after: String = chars[caret..].iter().collect();
    let separator = if after.starts_with(' ') { "" } else { " " };

    Commit {
        text: format!("{before}{}{separator}{after}", entry.name),
        caret: start + entry.name.chars().count() + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            CommandEntry::new("RUN", Category::Function),
            CommandEntry::new("RESET", Category::Function),
            CommandEntry::new("R2", Category::Other),
            CommandEntry::new("LED", Category::Function),
        ])
    }

    fn names(state: &AutocompleteState) -> Vec<&str> {
        state.matches.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_prefix_keeps_catalog_order() {
        let cat = catalog();
        let state = complete("r", 1, Some(&cat));
        assert_eq!(names(&state), vec!["RUN", "RESET", "R2"]);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_word_is_anchored_at_caret() {
        let cat = catalog();
        assert_eq!(names(&complete("LED G\nle", 8, Some(&cat))), vec!["LED"]);
        // Caret in the middle of a word only uses the part before it
        assert_eq!(names(&complete("RESET", 2, Some(&cat))), vec!["RESET"]);
        assert!(complete("LED ", 4, Some(&cat)).is_empty());
        assert!(complete("x.", 2, Some(&cat)).is_empty());
    }

    #[test]
    fn test_no_catalog_no_matches() {
        assert!(complete("R", 1, None).is_empty());
        assert!(complete("ZZZ", 3, Some(&catalog())).is_empty());
    }

    #[test]
    fn test_caps_at_ten() {
        let entries = (0..15)
            .map(|i| CommandEntry::new(format!("CMD{i}"), Category::Other))
            .collect();
        let cat = Catalog::from_entries(entries);
        let state = complete("cmd", 3, Some(&cat));
        assert_eq!(state.matches.len(), MAX_MATCHES);
        assert_eq!(state.matches[9].name, "CMD9");
    }

    #[test]
    fn test_selection_cycles() {
        let cat = catalog();
        let mut state = complete("R", 1, Some(&cat));
        state.select_prev();
        assert_eq!(state.selected().unwrap().name, "R2");
        state.select_next();
        assert_eq!(state.selected().unwrap().name, "RUN");
        state.select_next();
        assert_eq!(state.selected().unwrap().name, "RESET");
    }

    #[test]
    fn test_commit_replaces_word() {
        let reset = CommandEntry::new("RESET", Category::Function);
        let done = commit("R status", 1, &reset);
        assert_eq!(done.text, "RESET status");
        assert_eq!(done.caret, 6);

        let done = commit("LED G\nre", 8, &reset);
        assert_eq!(done.text, "LED G\nRESET ");
        assert_eq!(done.caret, 12);
    }

    #[test]
    fn test_commit_at_line_end_inserts_space() {
        let reset = CommandEntry::new("RESET", Category::Function);
        let done = commit("R\nLED G", 1, &reset);
        assert_eq!(done.text, "RESET \nLED G");
        assert_eq!(done.caret, 6);

        let done = commit("R\tx", 1, &reset);
        assert_eq!(done.text, "RESET \tx");
        assert_eq!(done.caret, 6);
    }

    #[test]
    fn test_word_before() {
        assert_eq!(word_before("echo $HOME_DIR", 14), (6, "HOME_DIR".to_string()));
        assert_eq!(word_before("abc", 99), (0, "abc".to_string()));
        assert_eq!(word_before("", 0), (0, String::new()));
    }
}
