//! Command catalog loaded from a `commands.txt` style file.
//!
//! Each line is `NAME|category|description` (or comma separated). Blank lines
//! and lines starting with `#` are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Kind of catalog entry, used to pick a highlight class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Function,
    Argument,
    Word,
    Bash,
    Condition,
    Loop,
    Other,
}

impl Category {
    /// Parse a category field. Unknown words fall back to `Other`.
    pub fn from_field(field: &str) -> Self {
        match field.trim().to_lowercase().as_str() {
            "function" => Category::Function,
            "arg" | "argument" => Category::Argument,
            "word" => Category::Word,
            "bash" => Category::Bash,
            "condition" => Category::Condition,
            "loop" => Category::Loop,
            _ => Category::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Function => "function",
            Category::Argument => "argument",
            Category::Word => "word",
            Category::Bash => "bash",
            Category::Condition => "condition",
            Category::Loop => "loop",
            Category::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: String,
    pub category: Category,
    pub description: String,
}

impl CommandEntry {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read command catalog {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable command dictionary.
///
/// `entries` keeps load order for completion ranking; `by_name` maps the
/// uppercase name to the index of the last entry with that name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CommandEntry>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CommandEntry>) -> Self {
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name.to_uppercase(), i))
            .collect();
        Self { entries, by_name }
    }

    pub fn parse(text: &str) -> Self {
        let entries = text.lines().filter_map(parse_line).collect();
        Self::from_entries(entries)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.get_upper(&name.to_uppercase())
    }

    /// Lookup with a name that is already uppercase
    pub fn get_upper(&self, upper: &str) -> Option<&CommandEntry> {
        self.by_name.get(upper).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Option<CommandEntry> {
    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }

    let sep = if line.contains('|') { '|' } else { ',' };
    let mut fields = line.split(sep);

    let name = fields.next().unwrap_or_default().trim();
    if name.is_empty() {
        return None;
    }
    let category = fields.next().map_or(Category::Other, Category::from_field);
    let description = fields.collect::<Vec<_>>().join(" ");

    Some(CommandEntry::new(name, category).with_description(description))
}
