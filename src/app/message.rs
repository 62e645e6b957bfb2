//! Application messages

use xseekbar::ui::SeekBarInput;

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    /// Window frame; drains queued progress updates
    Frame,
    /// The main window was closed
    WindowClosed(iced::window::Id),

    // ============ Seek bars ============
    /// Input from the horizontal bar's canvas
    Horizontal(SeekBarInput),
    /// Input from the vertical bar's canvas
    Vertical(SeekBarInput),
    /// Nudge both bars by a relative amount
    Step(i32),

    // ============ Download simulation ============
    StartDownload,
    StopDownload,

    // ============ Toggles ============
    ToggleIndicator,
    ToggleEnabled,
    /// Detach/attach the horizontal bar from the frame drain
    ToggleAttached,
    ToggleTheme,
}
