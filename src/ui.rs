//! iced integration
//!
//! - `seek_bar`: canvas adapter that draws a [`crate::seekbar::SeekBar`] and reports input
//! - `theme`: palette and styles shared by the demo window

pub mod seek_bar;
pub mod theme;

pub use seek_bar::{SeekBarInput, default_assets};
