//! Built-in payload snippets

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub name: &'static str,
    pub body: &'static str,
}

pub const SNIPPETS: &[Snippet] = &[
    Snippet {
        name: "Hello World (HID)",
        body: "ATTACKMODE HID\nLED G\nQUACK STRING Hello World\nQUACK ENTER",
    },
    Snippet {
        name: "Mass Storage",
        body: "ATTACKMODE STORAGE\nLED B",
    },
    Snippet {
        name: "Exfiltrate",
        body: "ATTACKMODE STORAGE\nLED M\ncp /root/secret.txt /root/udisk/loot/\nLED G",
    },
];

/// Picker state for the snippet popup
#[derive(Debug, Clone, Default)]
pub struct SnippetPicker {
    pub visible: bool,
    pub selected: usize,
}

impl SnippetPicker {
    pub fn open(&mut self) {
        self.visible = true;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + SNIPPETS.len() - 1) % SNIPPETS.len();
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SNIPPETS.len();
    }

    pub fn current(&self) -> &'static Snippet {
        &SNIPPETS[self.selected % SNIPPETS.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bunnyide::{lint, Catalog};

    #[test]
    fn test_snippets_lint_clean() {
        let catalog = Catalog::default();
        for snippet in SNIPPETS {
            let result = lint(snippet.body, false, Some(&catalog));
            assert!(result.is_empty(), "{}: {:?}", snippet.name, result.diagnostics);
        }
    }

    #[test]
    fn test_picker_wraps() {
        let mut picker = SnippetPicker::default();
        picker.open();
        picker.select_prev();
        assert_eq!(picker.current().name, "Exfiltrate");
        picker.select_next();
        assert_eq!(picker.current().name, "Hello World (HID)");
    }
}
