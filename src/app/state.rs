//! Application state definitions

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread::JoinHandle;

use xseekbar::seekbar::{SeekBar, SeekEventReceiver};

/// Number of seek events kept for display
pub const EVENT_LOG_LEN: usize = 8;

/// Main application state
pub struct App {
    pub horizontal: SeekBar,
    pub vertical: SeekBar,
    /// Measured cross-axis extents used for the canvas sizes
    pub horizontal_height: f32,
    pub vertical_width: f32,
    /// Notifications from both bars' listeners
    pub events: SeekEventReceiver,
    pub event_log: VecDeque<String>,
    pub download: Option<Download>,
    pub dark_mode: bool,
    pub main_window: Option<iced::window::Id>,
}

/// Background producer pushing progress through a `SeekBarHandle`
pub struct Download {
    pub stop: Arc<AtomicBool>,
    pub thread: JoinHandle<()>,
}

impl App {
    pub fn push_log(&mut self, line: String) {
        if self.event_log.len() == EVENT_LOG_LEN {
            self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}
