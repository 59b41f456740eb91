use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod widgets;

use crate::app::{App, InputMode, Section, StatusLevel};
use crate::core::Presentation;
use crate::modules::search::PLACEHOLDER;
use layout::{SectionAreas, UiAreas};
use widgets::{ListingCard, CARD_HEIGHT};

pub const HEADER_TITLE: &str = "Marketplace Dashboard";
pub const LOADING_TEXT: &str = "Loading...";

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size(), app);
    app.overlay.set_bounds(areas.overlay_bounds());
    if let Some(rows) = areas.section.and_then(|section| section.listings) {
        let visible = layout::card_slots(rows.height, app.filtered_listings().len());
        app.clamp_listing_scroll(visible);
    }

    draw_header(f, &areas, app);
    draw_content(f, &areas, app);
    draw_footer(f, areas.footer, app);

    if let Some(nav) = areas.nav {
        if app.overlay.presentation() == Presentation::Dropdown {
            f.render_widget(Clear, nav);
        }
        draw_nav(f, nav, app);
    }

    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
}

fn draw_header(f: &mut Frame, areas: &UiAreas, app: &App) {
    let title = Paragraph::new(Line::from(Span::styled(
        HEADER_TITLE,
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Left);
    f.render_widget(title, areas.title);

    let toggle_style = if app.overlay.is_open() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let toggle = Paragraph::new("Menu")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(toggle_style),
        )
        .alignment(Alignment::Center);
    f.render_widget(toggle, areas.toggle);
}

fn draw_nav(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|section| {
            let is_active = *section == app.active_section;
            let style = if is_active {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", section.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(section.title()),
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Navigate")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(
        Section::ALL
            .iter()
            .position(|section| *section == app.active_section),
    );
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_content(f: &mut Frame, areas: &UiAreas, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.active_section.title());

    let Some(section) = areas.section else {
        let message = if app.loading {
            Line::from(Span::styled(
                LOADING_TEXT,
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(Span::styled(
                app.error.clone().unwrap_or_default(),
                Style::default().fg(Color::Red),
            ))
        };
        f.render_widget(Paragraph::new(message).block(block), areas.content);
        return;
    };

    f.render_widget(block, areas.content);
    draw_section(f, section, app);
}

fn draw_section(f: &mut Frame, section: SectionAreas, app: &App) {
    let (heading, text) = match app.active_section {
        Section::Home => (
            "Welcome to Your Marketplace",
            Some("Explore listings and manage your items here."),
        ),
        Section::Listings => ("All Listings", None),
        Section::Profile => (
            "Your Profile",
            Some("Manage your account and listings here."),
        ),
    };

    f.render_widget(
        Paragraph::new(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        section.heading,
    );
    if let (Some(area), Some(text)) = (section.text, text) {
        f.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::Gray))),
            area,
        );
    }
    if let Some(area) = section.search {
        draw_search_field(f, area, app);
    }
    if let Some(area) = section.listings {
        draw_listings(f, area, app);
    }
}

fn draw_search_field(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.input_mode == InputMode::Search;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let line = if app.search.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.search_text())
    };
    let field = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(border_style),
    );
    f.render_widget(field, area);

    if focused {
        let typed = u16::try_from(app.search_text().chars().count()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(typed)
            .min(area.x.saturating_add(area.width.saturating_sub(2)));
        f.set_cursor(x, area.y.saturating_add(1));
    }
}

fn draw_listings(f: &mut Frame, area: Rect, app: &App) {
    let listings = app.filtered_listings();
    let total = listings.len();
    let slots = layout::card_slots(area.height, total);
    if slots == 0 {
        return;
    }
    let start = app.listing_scroll.min(total.saturating_sub(slots));

    let mut y = area.y;
    for record in listings.iter().skip(start).take(slots) {
        let row = Rect {
            x: area.x,
            y,
            width: area.width,
            height: CARD_HEIGHT,
        };
        f.render_widget(ListingCard::from_record(record), row);
        y = y.saturating_add(CARD_HEIGHT);
    }

    if total > slots {
        let below = total - start - slots;
        let line = Line::from(Span::styled(
            format!("{start} above, {below} more below  (j/k to scroll)"),
            Style::default().fg(Color::DarkGray),
        ));
        let row = Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        };
        f.render_widget(Paragraph::new(line), row);
    }
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.status_text() {
        Some((text, level)) => {
            let color = match level {
                StatusLevel::Info => Color::Green,
                StatusLevel::Warn => Color::Yellow,
                StatusLevel::Error => Color::Red,
            };
            Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
        }
        None => {
            let hints = match app.input_mode {
                InputMode::Search => "Type to filter  Esc/Enter done",
                InputMode::Normal => "m menu  1-3 section  / search  j/k scroll  ? help  q quit",
            };
            Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
        }
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(60, 60, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  m          Toggle menu"),
        Line::from("  1 / 2 / 3  Home / Listings / Profile"),
        Line::from("  [ / ]      Prev/Next section"),
        Line::from("  j / k      Scroll listings (also arrows, wheel)"),
        Line::from("  Mouse      Click menu, sections, search"),
        Line::from(""),
        Line::from("Search"),
        Line::from("  /          Focus search field"),
        Line::from("  Esc/Enter  Leave search field"),
        Line::from(""),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from(format!(
            "Menu: {} ({})",
            app.overlay.presentation().title(),
            if app.overlay.is_open() { "open" } else { "closed" }
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use crate::core::PointerBus;
    use crate::domain::{ListingRecord, Location};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &mut App) -> String {
        render_at(app, 100, 30)
    }

    fn render_at(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        App::new(AppOptions::default(), PointerBus::new())
    }

    fn listing(id: u64, title: &str) -> ListingRecord {
        ListingRecord {
            id,
            title: title.to_string(),
            price: 199,
            location: Location::Abuja,
        }
    }

    #[test]
    fn loading_shows_only_indicator() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains(HEADER_TITLE));
        assert!(screen.contains(LOADING_TEXT));
        assert!(!screen.contains("Welcome to Your Marketplace"));
    }

    #[test]
    fn error_replaces_content() {
        let mut app = app();
        app.apply_fetch_failure("Failed to fetch listings");
        let screen = render(&mut app);
        assert!(screen.contains("Failed to fetch listings"));
        assert!(!screen.contains(LOADING_TEXT));
        assert!(!screen.contains(PLACEHOLDER));
    }

    #[test]
    fn home_renders_filtered_listings() {
        let mut app = app();
        app.apply_listings(vec![listing(1, "Red sofa"), listing(2, "Blue lamp")]);
        app.set_search_text("lamp");
        let screen = render(&mut app);
        assert!(screen.contains("Welcome to Your Marketplace"));
        assert!(screen.contains("Blue lamp"));
        assert!(!screen.contains("Red sofa"));
        assert!(screen.contains("Price: $199"));
        assert!(screen.contains("Location: Abuja"));
    }

    #[test]
    fn every_listing_reachable_on_small_terminal() {
        for section in [Section::Home, Section::Listings] {
            let mut app = app();
            app.apply_listings(vec![
                listing(1, "Red sofa"),
                listing(2, "Blue lamp"),
                listing(3, "Oak table"),
            ]);
            app.active_section = section;

            let screen = render_at(&mut app, 80, 24);
            assert!(screen.contains("Red sofa"));
            assert!(screen.contains("Blue lamp"));
            assert!(!screen.contains("Oak table"));
            assert!(screen.contains("0 above, 1 more below"));

            app.apply_action(crate::core::Action::ScrollDown, crate::core::Viewport::new(80));
            let screen = render_at(&mut app, 80, 24);
            assert!(!screen.contains("Red sofa"));
            assert!(screen.contains("Blue lamp"));
            assert!(screen.contains("Oak table"));
            assert!(screen.contains("1 above, 0 more below"));
        }
    }

    #[test]
    fn scroll_clamps_to_a_full_window() {
        let mut app = app();
        app.apply_listings(vec![
            listing(1, "Red sofa"),
            listing(2, "Blue lamp"),
            listing(3, "Oak table"),
        ]);
        app.listing_scroll = 2;
        let screen = render_at(&mut app, 80, 24);
        assert_eq!(app.listing_scroll, 1);
        assert!(screen.contains("Blue lamp"));
        assert!(screen.contains("Oak table"));
    }

    #[test]
    fn no_overflow_line_when_everything_fits() {
        let mut app = app();
        app.apply_listings(vec![listing(1, "Red sofa"), listing(2, "Blue lamp")]);
        let screen = render_at(&mut app, 80, 24);
        assert!(!screen.contains("more below"));
    }

    #[test]
    fn cursor_position_survives_long_search_text() {
        let mut app = app();
        app.apply_listings(Vec::new());
        app.focus_search();
        app.set_search_text("x".repeat(70_000));
        let screen = render(&mut app);
        assert!(screen.contains("Search"));
    }

    #[test]
    fn profile_has_no_listings() {
        let mut app = app();
        app.apply_listings(vec![listing(1, "Red sofa")]);
        app.active_section = Section::Profile;
        let screen = render(&mut app);
        assert!(screen.contains("Your Profile"));
        assert!(screen.contains("Manage your account and listings here."));
        assert!(!screen.contains("Red sofa"));
    }

    #[test]
    fn drawing_records_overlay_bounds() {
        let mut app = app();
        app.toggle_overlay();
        render(&mut app);
        // toggle control sits in the top right corner
        assert!(app.overlay.contains(95, 1));
        // dropdown panel hangs below it
        assert!(app.overlay.contains(90, 5));
        assert!(!app.overlay.contains(10, 10));
    }

    #[test]
    fn open_dropdown_lists_sections() {
        let mut app = app();
        app.apply_listings(Vec::new());
        app.toggle_overlay();
        let screen = render(&mut app);
        assert!(screen.contains("Navigate"));
        assert!(screen.contains("Listings"));
        assert!(screen.contains("Profile"));
    }
}
