//! Trait for components that consume key input

use crossterm::event::KeyEvent;

use super::Action;

/// Trait for UI components that can handle input
pub trait Module {
    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
