//! Viewport width in logical units

/// Logical units covered by one terminal cell
pub const CELL_WIDTH: u32 = 8;

/// Widths at or below this many logical units count as narrow
pub const DEFAULT_NARROW_BREAKPOINT: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub columns: u16,
}

impl Viewport {
    pub fn new(columns: u16) -> Self {
        Self { columns }
    }

    /// Current terminal size, read at call time
    pub fn current() -> Option<Self> {
        let (columns, _) = crossterm::terminal::size().ok()?;
        Some(Self { columns })
    }

    pub fn logical_width(&self) -> u32 {
        u32::from(self.columns) * CELL_WIDTH
    }

    pub fn is_narrow(&self, breakpoint: u32) -> bool {
        self.logical_width() <= breakpoint
    }
}
