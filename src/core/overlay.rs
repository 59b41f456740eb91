//! Collapsible navigation surface
//!
//! The overlay is OPEN exactly while it holds a subscription on the pointer
//! bus. Opening subscribes, closing drops the subscription, and dropping the
//! overlay drops it too.

use ratatui::layout::Rect;
use serde::Deserialize;
use tracing::debug;

use super::input::{PointerBus, PointerEvent, PointerSubscription, SubscriptionId};

/// How the navigation surface is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Menu dropping down from the header, closed at startup
    #[default]
    Dropdown,
    /// Column on the left of the content, open at startup
    Sidebar,
}

impl Presentation {
    pub fn initially_open(&self) -> bool {
        matches!(self, Presentation::Sidebar)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Presentation::Dropdown => "dropdown",
            Presentation::Sidebar => "sidebar",
        }
    }
}

#[derive(Debug)]
pub struct Overlay {
    presentation: Presentation,
    bus: PointerBus,
    subscription: Option<PointerSubscription>,
    /// Toggle control and panel as last drawn
    bounds: Vec<Rect>,
}

impl Overlay {
    pub fn new(presentation: Presentation, bus: PointerBus) -> Self {
        let mut overlay = Self {
            presentation,
            bus,
            subscription: None,
            bounds: Vec::new(),
        };
        if presentation.initially_open() {
            overlay.open();
        }
        overlay
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn is_open(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.subscription.as_ref().map(PointerSubscription::id)
    }

    /// Returns true if the overlay changed state
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.subscription = Some(self.bus.subscribe());
        debug!(presentation = self.presentation.title(), "overlay opened");
        true
    }

    /// Returns true if the overlay changed state
    pub fn close(&mut self) -> bool {
        if self.subscription.take().is_none() {
            return false;
        }
        debug!(presentation = self.presentation.title(), "overlay closed");
        true
    }

    /// Flip the open flag, returning the new state
    pub fn toggle(&mut self) -> bool {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.is_open()
    }

    pub fn set_bounds(&mut self, bounds: Vec<Rect>) {
        self.bounds = bounds;
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.bounds
            .iter()
            .any(|rect| rect_contains(*rect, column, row))
    }

    /// Handler for presses on the global pointer stream.
    /// Closes the overlay when the press lands outside its bounds.
    pub fn on_global_pointer(&mut self, event: PointerEvent) -> bool {
        if !self.is_open() || self.contains(event.column, event.row) {
            return false;
        }
        debug!(column = event.column, row = event.row, "outside press");
        self.close()
    }
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
