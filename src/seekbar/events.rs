//! Consumer-facing contracts
//!
//! - [`SeekBarListener`]: progress and touch-tracking notifications
//! - [`IndicatorContentProvider`]: optional text drawn over the indicator
//! - [`SeekEvent`] + [`seek_event_channel`]: a listener that forwards notifications to
//!   another part of the application, the same way the audio thread reports back to the UI

use std::sync::atomic::{AtomicU64, Ordering};

use iced::Color;
use tokio::sync::mpsc;

/// Counter for generating unique seek bar ids
static SEEK_BAR_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies the seek bar a notification came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeekBarId(u64);

impl SeekBarId {
    pub fn next() -> Self {
        Self(SEEK_BAR_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Receives progress and touch-tracking notifications
///
/// Called on the UI thread only.
pub trait SeekBarListener {
    fn on_progress_changed(&mut self, _bar: SeekBarId, _progress: i32, _from_user: bool) {}

    fn on_start_tracking_touch(&mut self, _bar: SeekBarId) {}

    fn on_stop_tracking_touch(&mut self, _bar: SeekBarId) {}
}

/// Overlay text for the indicator
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorText {
    pub text: String,
    pub text_color: Color,
    pub text_size: f32,
    pub bold: bool,
    /// Offset of the text's top-left corner from the indicator's top-left corner
    pub offset_x: f32,
    pub offset_y: f32,
}

impl IndicatorText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_color: Color::BLACK,
            text_size: 18.0,
            bold: false,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.text_size = size;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }
}

/// Supplies the indicator overlay; `None` suppresses the text
pub trait IndicatorContentProvider {
    fn indicator_content(
        &self,
        progress: i32,
        indicator_width: i32,
        indicator_height: i32,
    ) -> Option<IndicatorText>;
}

impl<F> IndicatorContentProvider for F
where
    F: Fn(i32, i32, i32) -> Option<IndicatorText>,
{
    fn indicator_content(
        &self,
        progress: i32,
        indicator_width: i32,
        indicator_height: i32,
    ) -> Option<IndicatorText> {
        self(progress, indicator_width, indicator_height)
    }
}

/// Notification forwarded by [`ChannelListener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekEvent {
    ProgressChanged {
        bar: SeekBarId,
        progress: i32,
        from_user: bool,
    },
    StartTrackingTouch {
        bar: SeekBarId,
    },
    StopTrackingTouch {
        bar: SeekBarId,
    },
}

/// Sender for seek events (held by the listener inside the seek bar)
pub type SeekEventSender = mpsc::UnboundedSender<SeekEvent>;

/// Receiver for seek events (held by the application)
pub type SeekEventReceiver = mpsc::UnboundedReceiver<SeekEvent>;

/// Create a new seek event channel
pub fn seek_event_channel() -> (SeekEventSender, SeekEventReceiver) {
    mpsc::unbounded_channel()
}

/// Listener that forwards every notification into a [`SeekEventSender`]
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: SeekEventSender,
}

impl ChannelListener {
    pub fn new(tx: SeekEventSender) -> Self {
        Self { tx }
    }

    fn send(&self, event: SeekEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Seek event receiver dropped, discarding {:?}", event);
        }
    }
}

impl SeekBarListener for ChannelListener {
    fn on_progress_changed(&mut self, bar: SeekBarId, progress: i32, from_user: bool) {
        self.send(SeekEvent::ProgressChanged {
            bar,
            progress,
            from_user,
        });
    }

    fn on_start_tracking_touch(&mut self, bar: SeekBarId) {
        self.send(SeekEvent::StartTrackingTouch { bar });
    }

    fn on_stop_tracking_touch(&mut self, bar: SeekBarId) {
        self.send(SeekEvent::StopTrackingTouch { bar });
    }
}
