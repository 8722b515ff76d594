//! Status Indicator Component
//!
//! One-line loading, success, error and info messages used by forms and
//! lists.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::helpers::spinner;
use crate::ui::theme::{COLOR_ACTIVE, COLOR_DIM, COLOR_ERROR, COLOR_PENDING};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusIndicator {
    /// Spinner with a message, animated by the app tick
    Loading { message: String, tick: u64 },
    Success(String),
    Error(String),
    Info(String),
}

impl StatusIndicator {
    pub fn loading(message: impl Into<String>, tick: u64) -> Self {
        Self::Loading {
            message: message.into(),
            tick,
        }
    }

    /// Error if present, else success, else nothing.
    pub fn from_messages(error: Option<&str>, success: Option<&str>) -> Option<Self> {
        error
            .map(|e| Self::Error(e.to_string()))
            .or_else(|| success.map(|s| Self::Success(s.to_string())))
    }

    pub fn to_line(&self) -> Line<'static> {
        match self {
            StatusIndicator::Loading { message, tick } => Line::from(vec![
                Span::styled(format!("{} ", spinner(*tick)), Style::default().fg(COLOR_PENDING)),
                Span::styled(message.clone(), Style::default().fg(COLOR_PENDING)),
            ]),
            StatusIndicator::Success(message) => Line::from(vec![
                Span::styled("● ", Style::default().fg(COLOR_ACTIVE)),
                Span::styled(
                    message.clone(),
                    Style::default()
                        .fg(COLOR_ACTIVE)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            StatusIndicator::Error(message) => Line::from(vec![
                Span::styled("✗ ", Style::default().fg(COLOR_ERROR)),
                Span::styled(message.clone(), Style::default().fg(COLOR_ERROR)),
            ]),
            StatusIndicator::Info(message) => {
                Line::from(Span::styled(message.clone(), Style::default().fg(COLOR_DIM)))
            }
        }
    }
}
