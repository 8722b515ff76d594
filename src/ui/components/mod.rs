//! Reusable UI Components
//!
//! Pieces shared by the pages and overlays.
//!
//! - `DialogFrame` - Centered overlay with rounded borders
//! - `TabSelector` - Horizontal tab selector with a `▶` marker
//! - `StatusIndicator` - One-line loading, success and error messages

mod dialog_frame;
mod status_indicator;
mod tab_selector;

pub use dialog_frame::{render_dialog_frame, DialogFrameConfig};
pub use status_indicator::StatusIndicator;
pub use tab_selector::{render_tab_selector, TabItem};
