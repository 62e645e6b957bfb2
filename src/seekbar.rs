//! Headless seek bar core
//!
//! - `geometry`: pure layout of track, thumb and indicator, plus the measure pass
//! - `progress`: clamped `(min, max, progress)` model and level mapping
//! - `update_queue`: cross-thread progress updates drained once per UI tick
//! - `drag`: pointer state machine with slop handling
//! - `asset` / `shapes`: the visual asset capability and the built-in assets
//! - `widget`: [`SeekBar`], the composition root tying the above together
//!
//! Nothing here depends on a windowing toolkit; `crate::ui::seek_bar` adapts it to iced.

pub mod asset;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod geometry;
pub mod progress;
pub mod shapes;
pub mod update_queue;
mod widget;

pub use asset::{
    LayerRole, LayoutDirection, StateSet, Surface, TextRun, Tint, TintList, TintMode,
    VisualAsset,
};
pub use config::SeekBarConfig;
pub use drag::PointerEvent;
pub use error::SeekBarError;
pub use events::{
    ChannelListener, IndicatorContentProvider, IndicatorText, SeekBarId, SeekBarListener,
    SeekEvent, SeekEventReceiver, SeekEventSender, seek_event_channel,
};
pub use geometry::{IndicatorPlacement, MeasureSpec, Orientation, Padding, Rect, Size};
pub use progress::{MAX_LEVEL, ProgressModel};
pub use shapes::{ClipAsset, LayeredTrack, ShapeAsset};
pub use update_queue::{PendingUpdate, SeekBarHandle};
pub use widget::{BoxedAsset, SeekBar, SeekBarAssets};
