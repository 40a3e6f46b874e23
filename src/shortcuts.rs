//! Global keyboard shortcuts

use serde::{Deserialize, Serialize};

/// Legacy key code reported for Escape
pub const ESCAPE_KEY_CODE: u32 = 27;

/// The parts of a keyboard event the shortcuts look at
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: String,
    #[serde(default)]
    pub key_code: u32,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Default::default()
        }
    }

    pub fn escape() -> Self {
        Self {
            key: "Escape".to_string(),
            key_code: ESCAPE_KEY_CODE,
            ..Default::default()
        }
    }

    /// `key` pressed with Ctrl (or Cmd on macOS)
    pub fn command(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape" || self.key == "Esc" || self.key_code == ESCAPE_KEY_CODE
    }

    fn is_command(&self, letter: &str) -> bool {
        (self.ctrl || self.meta) && self.key.eq_ignore_ascii_case(letter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shortcut {
    /// Escape: close the sidebar and any open modal
    Dismiss,
    /// Ctrl/Cmd+K
    FocusSearch,
    /// Ctrl/Cmd+N
    CreateNew,
}

impl Shortcut {
    pub fn classify(input: &KeyInput) -> Option<Shortcut> {
        if input.is_escape() {
            Some(Shortcut::Dismiss)
        } else if input.is_command("k") {
            Some(Shortcut::FocusSearch)
        } else if input.is_command("n") {
            Some(Shortcut::CreateNew)
        } else {
            None
        }
    }

    /// Whether the browser's own binding for the chord must be suppressed
    pub fn overrides_browser(self) -> bool {
        matches!(self, Shortcut::FocusSearch | Shortcut::CreateNew)
    }
}
