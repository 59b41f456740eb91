//! Actions that input handlers return to the app

use crate::app::Section;

/// State changes requested by input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Switch to a specific section
    Navigate(Section),

    /// Cycle to the next section
    NextSection,

    /// Cycle to the previous section
    PrevSection,

    /// Activate the overlay toggle control
    ToggleOverlay,

    /// Scroll the listing cards up one card
    ScrollUp,

    /// Scroll the listing cards down one card
    ScrollDown,

    /// Give keyboard focus to the search field
    FocusSearch,

    /// Return keyboard focus from the search field
    BlurSearch,

    /// Show or hide the key binding popup
    ToggleHelp,

    /// Request quit
    Quit,
}
