//! Key bindings while the search field is not focused

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Section;
use crate::core::Action;

pub fn normal_mode_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('q'), _) => Action::Quit,
        (KeyCode::Char('?'), _) => Action::ToggleHelp,
        (KeyCode::Char('m'), _) => Action::ToggleOverlay,
        (KeyCode::Char('/'), _) => Action::FocusSearch,
        (KeyCode::Char('k') | KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('j') | KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('['), _) => Action::PrevSection,
        (KeyCode::Char(']'), _) => Action::NextSection,
        (KeyCode::Char(ch), _) => Section::ALL
            .iter()
            .find(|section| section.shortcut() == ch)
            .map(|section| Action::Navigate(*section))
            .unwrap_or(Action::None),
        _ => Action::None,
    }
}
