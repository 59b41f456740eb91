//! Search field - owns the filter text typed by the user

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Action, Module};

pub const PLACEHOLDER: &str = "Search listings...";

/// Text is stored verbatim; nothing is trimmed.
#[derive(Debug, Default, Clone)]
pub struct SearchField {
    text: String,
}

impl SearchField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }
}

impl Module for SearchField {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::BlurSearch,
            KeyCode::Backspace => {
                self.pop();
                Action::None
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Action::None;
                }
                self.push(ch);
                Action::None
            }
            _ => Action::None,
        }
    }
}
