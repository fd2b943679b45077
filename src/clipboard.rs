/// System clipboard with an in-process fallback.
///
/// The internal register always holds the last copy, so copy/paste keeps
/// working on headless terminals where `arboard` cannot connect.
pub struct Clipboard {
    system: Option<arboard::Clipboard>,
    register: String,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard {
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(cb) => Some(cb),
            Err(e) => {
                tracing::debug!(error = %e, "system clipboard unavailable");
                None
            }
        };
        Self {
            system,
            register: String::new(),
        }
    }

    pub fn copy(&mut self, text: &str) {
        self.register = text.to_string();
        if let Some(cb) = self.system.as_mut() {
            if let Err(e) = cb.set_text(text.to_string()) {
                tracing::warn!(error = %e, "failed to set system clipboard");
            }
        }
    }

    pub fn paste(&mut self) -> Option<String> {
        let system_text = self.system.as_mut().and_then(|cb| cb.get_text().ok());
        match system_text {
            Some(text) if !text.is_empty() => Some(text),
            _ if !self.register.is_empty() => Some(self.register.clone()),
            _ => None,
        }
    }
}
