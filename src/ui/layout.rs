//! Responsive Layout System
//!
//! `LayoutContext` wraps the terminal dimensions and answers the sizing
//! questions the pages ask (dialog widths, whether to drop columns).

use ratatui::layout::Rect;

// ============================================================================
// Screen Size Breakpoints
// ============================================================================

/// Terminal width breakpoints for responsive layouts
pub mod breakpoints {
    /// Extra small terminal (< 60 columns)
    pub const XS_WIDTH: u16 = 60;
    /// Small terminal (< 80 columns)
    pub const SM_WIDTH: u16 = 80;

    /// Extra small terminal height (< 16 rows)
    pub const XS_HEIGHT: u16 = 16;
    /// Small terminal height (< 24 rows)
    pub const SM_HEIGHT: u16 = 24;
}

// ============================================================================
// Layout Context
// ============================================================================

/// Terminal dimensions for responsive calculations.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.width, rect.height)
    }

    /// Calculate a width as a percentage of terminal width, minimum 1.
    pub fn percent_width(&self, percentage: u16) -> u16 {
        ((self.width as u32 * percentage.min(100) as u32) / 100).max(1) as u16
    }

    /// Percentage width clamped to `min..=max`.
    pub fn bounded_width(&self, percentage: u16, min: u16, max: u16) -> u16 {
        self.percent_width(percentage).clamp(min, max)
    }

    /// Check if the terminal is in a "narrow" state (less than 80 columns).
    pub fn is_narrow(&self) -> bool {
        self.width < breakpoints::SM_WIDTH
    }

    /// Check if the terminal is in a "short" state (less than 24 rows).
    pub fn is_short(&self) -> bool {
        self.height < breakpoints::SM_HEIGHT
    }

    /// Narrow or short: condense labels and drop secondary columns.
    pub fn is_compact(&self) -> bool {
        self.is_narrow() || self.is_short()
    }

    pub fn is_extra_small(&self) -> bool {
        self.width < breakpoints::XS_WIDTH || self.height < breakpoints::XS_HEIGHT
    }

    /// Width of the reading column on the post page.
    pub fn reading_width(&self) -> u16 {
        if self.is_narrow() {
            self.width
        } else {
            self.bounded_width(80, breakpoints::SM_WIDTH - 4, 100)
        }
    }
}

/// `area` shrunk to `width` columns, centered horizontally.
pub fn center_horizontally(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
