use anyhow::{Context, Result};
use bunnyide::is_shell_path;
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};

/// The open payload file.
///
/// Positions are char offsets into the rope, which is what the analysis
/// engine expects.
#[derive(Debug, Clone)]
pub struct Document {
    text: Rope,
    pub caret: usize,
    /// Other end of the selection, if one is active
    pub anchor: Option<usize>,
    pub scroll_offset: usize,
    pub scroll_col: usize,
    pub file_path: Option<PathBuf>,
    pub modified: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            caret: 0,
            anchor: None,
            scroll_offset: 0,
            scroll_col: 0,
            file_path: None,
            modified: false,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            ..Self::new()
        }
    }

    /// Open a file. A path that does not exist yet gives an empty document
    /// that is created on the first save.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                file_path: Some(path.to_path_buf()),
                ..Self::new()
            });
        }

        let metadata = fs::metadata(path)?;
        if metadata.len() > 10 * 1024 * 1024 {
            return Err(anyhow::anyhow!("File too large to open (max 10MB)"));
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                // If it's an encoding error, it's likely binary
                if e.kind() == std::io::ErrorKind::InvalidData {
                    return Err(anyhow::anyhow!("Cannot open binary file"));
                }
                return Err(e.into());
            }
        };
        if content.contains('\0') {
            return Err(anyhow::anyhow!("Cannot open binary file"));
        }

        Ok(Self {
            file_path: Some(path.to_path_buf()),
            ..Self::from_text(&content)
        })
    }

    pub fn save(&mut self) -> Result<&Path> {
        let path = self
            .file_path
            .as_deref()
            .context("Buffer has no file name")?;
        fs::write(path, self.text.to_string())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.modified = false;
        Ok(path)
    }

    pub fn content(&self) -> String {
        self.text.to_string()
    }

    pub fn filename(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| String::from("[untitled]"))
    }

    /// Shell files skip the unknown-command rule
    pub fn is_shell(&self) -> bool {
        self.file_path.as_deref().is_some_and(is_shell_path)
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    pub fn len_lines(&self) -> usize {
        self.text.len_lines()
    }

    /// Line length in chars, without the newline
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.text.len_lines() {
            return 0;
        }
        let slice = self.text.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len_chars());
        let line = self.text.char_to_line(offset);
        (line, offset - self.text.line_to_char(line))
    }

    pub fn caret_line_col(&self) -> (usize, usize) {
        self.line_col(self.caret)
    }

    fn offset_of(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.text.len_lines().saturating_sub(1));
        self.text.line_to_char(line) + col.min(self.line_len(line))
    }

    // ========== Selection ==========

    /// Normalized `(start, end)` of a non-empty selection
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection()?;
        Some(self.text.slice(start..end).to_string())
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.caret = self.len_chars();
    }

    /// Select `start..end`, leaving the caret at `end`
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.len_chars();
        self.anchor = Some(start.min(len));
        self.caret = end.min(len);
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    fn delete_selection(&mut self) -> bool {
        match self.selection() {
            Some((start, end)) => {
                self.text.remove(start..end);
                self.caret = start;
                self.anchor = None;
                self.modified = true;
                true
            }
            None => {
                self.anchor = None;
                false
            }
        }
    }

    // ========== Editing ==========

    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        self.text.insert(self.caret, s);
        self.caret += s.chars().count();
        self.modified = true;
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() || self.caret == 0 {
            return;
        }
        self.text.remove(self.caret - 1..self.caret);
        self.caret -= 1;
        self.modified = true;
    }

    pub fn delete_forward(&mut self) {
        if self.delete_selection() || self.caret >= self.text.len_chars() {
            return;
        }
        self.text.remove(self.caret..self.caret + 1);
        self.modified = true;
    }

    pub fn cut(&mut self) -> Option<String> {
        let text = self.selected_text()?;
        self.delete_selection();
        Some(text)
    }

    /// Swap in new content, e.g. after accepting a completion
    pub fn replace_content(&mut self, text: &str, caret: usize) {
        self.text = Rope::from_str(text);
        self.caret = caret.min(self.text.len_chars());
        self.anchor = None;
        self.modified = true;
    }

    // ========== Motion ==========

    fn begin_motion(&mut self, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.caret);
        } else {
            self.anchor = None;
        }
    }

    pub fn move_left(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self, extend: bool) {
        self.begin_motion(extend);
        self.caret = (self.caret + 1).min(self.text.len_chars());
    }

    pub fn move_lines(&mut self, delta: isize, extend: bool) {
        self.begin_motion(extend);
        let (line, col) = self.caret_line_col();
        let last = self.text.len_lines().saturating_sub(1);
        let target = line.saturating_add_signed(delta).min(last);
        self.caret = self.offset_of(target, col);
    }

    pub fn move_home(&mut self, extend: bool) {
        self.begin_motion(extend);
        let (line, _) = self.caret_line_col();
        self.caret = self.offset_of(line, 0);
    }

    pub fn move_end(&mut self, extend: bool) {
        self.begin_motion(extend);
        let (line, _) = self.caret_line_col();
        self.caret = self.offset_of(line, usize::MAX);
    }

    /// Keep the caret inside a `height` x `width` viewport
    pub fn ensure_visible(&mut self, height: usize, width: usize) {
        let (line, col) = self.caret_line_col();
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if height > 0 && line >= self.scroll_offset + height {
            self.scroll_offset = line + 1 - height;
        }
        if col < self.scroll_col {
            self.scroll_col = col;
        } else if width > 0 && col >= self.scroll_col + width {
            self.scroll_col = col + 1 - width;
        }
    }
}
