use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{App, Section};
use crate::core::{rect_contains, Presentation};
use crate::ui::widgets::CARD_HEIGHT;

pub const TOGGLE_WIDTH: u16 = 10;
pub const SIDEBAR_WIDTH: u16 = 20;
pub const DROPDOWN_WIDTH: u16 = 18;
const NAV_PANEL_HEIGHT: u16 = Section::ALL.len() as u16 + 2;

/// Rows inside the content box for the active section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionAreas {
    pub heading: Rect,
    pub text: Option<Rect>,
    pub search: Option<Rect>,
    pub listings: Option<Rect>,
}

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub title: Rect,
    pub toggle: Rect,
    pub body: Rect,
    /// Navigation panel, present only while the overlay is open
    pub nav: Option<Rect>,
    pub content: Rect,
    /// None while loading or after a failed fetch
    pub section: Option<SectionAreas>,
    pub footer: Rect,
}

impl UiAreas {
    /// Everything that counts as inside the overlay
    pub fn overlay_bounds(&self) -> Vec<Rect> {
        let mut bounds = vec![self.toggle];
        bounds.extend(self.nav);
        bounds
    }
}

/// Clickable elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Toggle,
    NavItem(Section),
    SearchField,
}

pub fn areas(size: Rect, app: &App) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(TOGGLE_WIDTH)])
        .split(vertical[0]);

    let body = vertical[1];
    let toggle = header_chunks[1];
    let open = app.overlay.is_open();

    let (nav, content) = match app.overlay.presentation() {
        Presentation::Sidebar if open => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(body);
            (Some(chunks[0]), chunks[1])
        }
        Presentation::Dropdown if open => {
            let width = DROPDOWN_WIDTH.min(size.width);
            let right = toggle.x.saturating_add(toggle.width);
            let panel = Rect {
                x: right.saturating_sub(width).max(size.x),
                y: body.y,
                width,
                height: NAV_PANEL_HEIGHT.min(body.height),
            };
            (Some(panel), body)
        }
        _ => (None, body),
    };

    let section = if app.loading || app.error.is_some() {
        None
    } else {
        Some(section_areas(rect_inner(content), app.active_section))
    };

    UiAreas {
        size,
        title: header_chunks[0],
        toggle,
        body,
        nav,
        content,
        section,
        footer: vertical[2],
    }
}

fn section_areas(inner: Rect, section: Section) -> SectionAreas {
    match section {
        Section::Home => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Min(0),
                ])
                .split(inner);
            SectionAreas {
                heading: rows[0],
                text: Some(rows[1]),
                search: Some(rows[2]),
                listings: Some(rows[3]),
            }
        }
        Section::Listings => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Min(0),
                ])
                .split(inner);
            SectionAreas {
                heading: rows[0],
                text: None,
                search: Some(rows[1]),
                listings: Some(rows[2]),
            }
        }
        Section::Profile => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .split(inner);
            SectionAreas {
                heading: rows[0],
                text: Some(rows[1]),
                search: None,
                listings: None,
            }
        }
    }
}

/// What sits under a cell, topmost first
pub fn target_at(areas: &UiAreas, col: u16, row: u16) -> Option<HitTarget> {
    if let Some(nav) = areas.nav {
        if rect_contains(nav, col, row) {
            let inner = rect_inner(nav);
            if !rect_contains(inner, col, row) {
                return None;
            }
            let idx = (row - inner.y) as usize;
            return Section::ALL.get(idx).copied().map(HitTarget::NavItem);
        }
    }
    if rect_contains(areas.toggle, col, row) {
        return Some(HitTarget::Toggle);
    }
    let search = areas.section.and_then(|section| section.search)?;
    rect_contains(search, col, row).then_some(HitTarget::SearchField)
}

/// Cards that fit in `height` rows. When `total` cards do not all fit, one
/// row is kept back for the overflow line.
pub fn card_slots(height: u16, total: usize) -> usize {
    let full = usize::from(height / CARD_HEIGHT);
    if total <= full {
        full
    } else {
        usize::from(height.saturating_sub(1) / CARD_HEIGHT)
    }
}

pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}
