//! Find / replace bar state and the text lookups behind it.
//!
//! Matching is case-sensitive and offsets are char indices, like the
//! rest of the document code.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    Find,
    Replace,
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub visible: bool,
    pub query: String,
    pub replacement: String,
    pub field: SearchField,
}

impl SearchState {
    pub fn open(&mut self) {
        self.visible = true;
        self.field = SearchField::Find;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            SearchField::Find => SearchField::Replace,
            SearchField::Replace => SearchField::Find,
        };
    }

    /// The text box keystrokes go to
    pub fn input_mut(&mut self) -> &mut String {
        match self.field {
            SearchField::Find => &mut self.query,
            SearchField::Replace => &mut self.replacement,
        }
    }

    pub fn query_len(&self) -> usize {
        self.query.chars().count()
    }
}

/// Char offset of the first `query` match starting at or after `from`
pub fn find_from(text: &str, query: &str, from: usize) -> Option<usize> {
    if query.is_empty() {
        return None;
    }
    let byte_from = text
        .char_indices()
        .nth(from)
        .map_or(text.len(), |(byte, _)| byte);
    let byte = byte_from + text[byte_from..].find(query)?;
    Some(text[..byte].chars().count())
}

/// Replace every `query` match, returning the new text and the match count
pub fn replace_all(text: &str, query: &str, replacement: &str) -> (String, usize) {
    if query.is_empty() {
        return (text.to_string(), 0);
    }
    let count = text.matches(query).count();
    (text.replace(query, replacement), count)
}
