//! Color theme constants
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Secondary text (meta lines, excerpts)
pub const COLOR_MUTED: Color = Color::Gray;

/// Success and "visible" state - bright green
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Pending and "hidden" state
pub const COLOR_PENDING: Color = Color::Yellow;

/// Errors and destructive prompts
pub const COLOR_ERROR: Color = Color::Red;

/// Background of the selected row
pub const COLOR_SELECTED_BG: Color = Color::Rgb(30, 34, 52);

// ============================================================================
// Post Type Colors
// ============================================================================

/// Article badge
pub const COLOR_ARTICLE: Color = Color::Rgb(0, 122, 204);

/// News badge
pub const COLOR_NEWS: Color = Color::Rgb(214, 120, 40);

// ============================================================================
// Dialog Colors
// ============================================================================

/// Background color for dialog boxes
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);
