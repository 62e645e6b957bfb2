//! XSeekBar - an orientation-aware seek bar with a floating value indicator
//!
//! The `seekbar` module is the toolkit-independent widget; `ui` renders it with iced.

pub mod seekbar;
pub mod ui;
