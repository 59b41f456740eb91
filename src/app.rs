use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::core::{
    Action, Module, Overlay, PointerBus, PointerEvent, Presentation, Viewport,
    DEFAULT_NARROW_BREAKPOINT,
};
use crate::domain::{filter_listings, ListingRecord};
use crate::modules::{keymap, SearchField};
use crate::ui::layout::{self, HitTarget};

pub const DEFAULT_LISTING_LIMIT: usize = 3;

const STATUS_TTL: Duration = Duration::from_secs(3);

/// Sections of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Home,
    Listings,
    Profile,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Home, Section::Listings, Section::Profile];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Listings => "Listings",
            Section::Profile => "Profile",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Section::Home => '1',
            Section::Listings => '2',
            Section::Profile => '3',
        }
    }

    /// Whether the section shows the search field and listings
    pub fn shows_listings(&self) -> bool {
        matches!(self, Section::Home | Section::Listings)
    }

    fn cycle(&self, forward: bool) -> Section {
        let idx = Section::ALL
            .iter()
            .position(|section| section == self)
            .unwrap_or(0);
        let len = Section::ALL.len();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Section::ALL[next]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub presentation: Presentation,
    pub listing_limit: usize,
    /// Logical width at or below which the viewport counts as narrow
    pub narrow_breakpoint: u32,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            presentation: Presentation::default(),
            listing_limit: DEFAULT_LISTING_LIMIT,
            narrow_breakpoint: DEFAULT_NARROW_BREAKPOINT,
        }
    }
}

/// Dashboard controller. Owns every piece of interactive state.
#[derive(Debug)]
pub struct App {
    pub active_section: Section,
    /// Full listing set, replaced wholesale when the fetch completes
    pub listings: Vec<ListingRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: SearchField,
    /// Index of the first listing card shown
    pub listing_scroll: usize,
    pub overlay: Overlay,
    pub input_mode: InputMode,
    pub status: Option<StatusMessage>,
    pub help_open: bool,
    pub should_quit: bool,
    pointer_bus: PointerBus,
    narrow_breakpoint: u32,
    pending_fetch_request: Option<usize>,
}

impl App {
    /// Starts in the loading state with one fetch request queued
    pub fn new(options: AppOptions, pointer_bus: PointerBus) -> Self {
        Self {
            active_section: Section::Home,
            listings: Vec::new(),
            loading: true,
            error: None,
            search: SearchField::new(),
            listing_scroll: 0,
            overlay: Overlay::new(options.presentation, pointer_bus.clone()),
            input_mode: InputMode::Normal,
            status: None,
            help_open: false,
            should_quit: false,
            pointer_bus,
            narrow_breakpoint: options.narrow_breakpoint,
            pending_fetch_request: Some(options.listing_limit),
        }
    }

    pub fn narrow_breakpoint(&self) -> u32 {
        self.narrow_breakpoint
    }

    /// The queued fetch, handed out once
    pub fn take_fetch_request(&mut self) -> Option<usize> {
        self.pending_fetch_request.take()
    }

    pub fn apply_listings(&mut self, listings: Vec<ListingRecord>) {
        if !self.loading {
            debug!("ignoring listings after fetch completed");
            return;
        }
        info!(count = listings.len(), "listings applied");
        self.listings = listings;
        self.loading = false;
        self.set_status(
            format!("Loaded {} listings", self.listings.len()),
            StatusLevel::Info,
        );
    }

    pub fn apply_fetch_failure(&mut self, message: impl Into<String>) {
        if !self.loading {
            debug!("ignoring fetch failure after fetch completed");
            return;
        }
        self.error = Some(message.into());
        self.loading = false;
    }

    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search.set_text(text);
        self.listing_scroll = 0;
    }

    /// Listings whose title matches the search text, in original order
    pub fn filtered_listings(&self) -> Vec<&ListingRecord> {
        filter_listings(&self.listings, self.search.text())
    }

    /// Move the card window by `delta` cards, staying on a listing
    pub fn scroll_listings(&mut self, delta: isize) {
        let last = self.filtered_listings().len().saturating_sub(1);
        self.listing_scroll = self.listing_scroll.saturating_add_signed(delta).min(last);
    }

    /// Keep the window full once `visible` cards fit on screen
    pub fn clamp_listing_scroll(&mut self, visible: usize) {
        let max = self.filtered_listings().len().saturating_sub(visible);
        self.listing_scroll = self.listing_scroll.min(max);
    }

    /// Switch section. On a narrow viewport this also closes the overlay.
    pub fn select_section(&mut self, section: Section, viewport: Viewport) {
        if self.active_section != section {
            debug!(section = section.title(), "section selected");
            self.listing_scroll = 0;
        }
        self.active_section = section;
        if viewport.is_narrow(self.narrow_breakpoint) {
            self.overlay.close();
        }
        if !section.shows_listings() && self.input_mode == InputMode::Search {
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn cycle_section(&mut self, forward: bool, viewport: Viewport) {
        let next = self.active_section.cycle(forward);
        self.select_section(next, viewport);
    }

    /// Toggle control activation
    pub fn toggle_overlay(&mut self) -> bool {
        self.overlay.toggle()
    }

    /// Offer a pointer press to every current subscriber on the global stream
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let mut changed = false;
        for id in self.pointer_bus.listeners() {
            if self.overlay.subscription_id() == Some(id) {
                changed |= self.overlay.on_global_pointer(event);
            }
        }
        changed
    }

    /// A mouse press at a cell of a screen of `size`.
    ///
    /// Hit-testing uses the layout as it was before the press, so a listener
    /// closing the overlay cannot move the target under the pointer.
    pub fn handle_mouse_press(&mut self, event: PointerEvent, size: Rect) {
        let viewport = Viewport::new(size.width);
        let areas = layout::areas(size, self);
        self.overlay.set_bounds(areas.overlay_bounds());

        self.handle_pointer(event);

        if self.help_open {
            return;
        }

        match layout::target_at(&areas, event.column, event.row) {
            Some(HitTarget::Toggle) => {
                self.toggle_overlay();
            }
            Some(HitTarget::NavItem(section)) => self.select_section(section, viewport),
            Some(HitTarget::SearchField) => self.focus_search(),
            None => {
                if self.input_mode == InputMode::Search {
                    self.input_mode = InputMode::Normal;
                }
            }
        }
    }

    /// The field only exists once listings are showing
    pub fn focus_search(&mut self) {
        if self.active_section.shows_listings() && !self.loading && self.error.is_none() {
            self.input_mode = InputMode::Search;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, viewport: Viewport) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let action = match self.input_mode {
            InputMode::Search => {
                let before = self.search.text().len();
                let action = self.search.handle_key(key);
                if self.search.text().len() != before {
                    self.listing_scroll = 0;
                }
                action
            }
            InputMode::Normal if self.help_open => match key.code {
                KeyCode::Esc => Action::ToggleHelp,
                _ => match keymap::normal_mode_action(key) {
                    action @ (Action::ToggleHelp | Action::Quit) => action,
                    _ => Action::None,
                },
            },
            InputMode::Normal => keymap::normal_mode_action(key),
        };
        self.apply_action(action, viewport);
    }

    pub fn apply_action(&mut self, action: Action, viewport: Viewport) {
        match action {
            Action::None => {}
            Action::Navigate(section) => self.select_section(section, viewport),
            Action::NextSection => self.cycle_section(true, viewport),
            Action::PrevSection => self.cycle_section(false, viewport),
            Action::ToggleOverlay => {
                self.toggle_overlay();
            }
            Action::ScrollUp => self.scroll_listings(-1),
            Action::ScrollDown => self.scroll_listings(1),
            Action::FocusSearch => self.focus_search(),
            Action::BlurSearch => self.input_mode = InputMode::Normal,
            Action::ToggleHelp => self.help_open = !self.help_open,
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }
}
