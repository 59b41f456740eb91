//! Listing card - one title/price/location triple

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::ListingRecord;

/// Rows a card occupies, borders included
pub const CARD_HEIGHT: u16 = 5;

/// Stateless; values are shown exactly as given.
pub struct ListingCard<'a> {
    title: &'a str,
    price: u32,
    location: &'a str,
}

impl<'a> ListingCard<'a> {
    pub fn new(title: &'a str, price: u32, location: &'a str) -> Self {
        Self {
            title,
            price,
            location,
        }
    }

    pub fn from_record(record: &'a ListingRecord) -> Self {
        Self::new(&record.title, record.price, record.location.name())
    }
}

impl<'a> Widget for ListingCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let label = Style::default().fg(Color::DarkGray);
        let lines = vec![
            Line::from(Span::styled(
                self.title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Price: ", label),
                Span::raw(format!("${}", self.price)),
            ]),
            Line::from(vec![
                Span::styled("Location: ", label),
                Span::raw(self.location),
            ]),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol())
            .collect::<String>()
    }

    #[test]
    fn renders_title_price_and_location() {
        let area = Rect::new(0, 0, 32, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        ListingCard::new("Sunny flat", 420, "Port Harcourt").render(area, &mut buf);

        assert!(row(&buf, 1).contains("Sunny flat"));
        assert!(row(&buf, 2).contains("Price: $420"));
        assert!(row(&buf, 3).contains("Location: Port Harcourt"));
        assert!(buf.get(1, 1).style().add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn shows_unvalidated_input_as_is() {
        let area = Rect::new(0, 0, 20, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        ListingCard::new("", 0, "??").render(area, &mut buf);

        assert!(row(&buf, 2).contains("Price: $0"));
        assert!(row(&buf, 3).contains("Location: ??"));
    }

    #[test]
    fn zero_area_is_ignored() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 2));
        ListingCard::new("x", 1, "y").render(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(row(&buf, 0).trim(), "");
    }
}
