//! Demo application

mod helpers;
mod message;
mod state;
mod update;
mod view;

use iced::{Task, Theme};

use xseekbar::seekbar::{MeasureSpec, Orientation, SeekBar, seek_event_channel};
use xseekbar::ui::default_assets;

pub use message::Message;
pub use state::App;

impl App {
    /// Create new application instance
    pub fn new() -> (Self, Task<Message>) {
        // 1. Load the seek bar configuration (falls back to the demo defaults)
        let config = helpers::load_config();
        let (events_tx, events) = seek_event_channel();

        // 2. Build both bars; an invalid file config degrades to defaults
        let mut horizontal = helpers::build_bar(&config).unwrap_or_else(|e| {
            tracing::warn!("Invalid seek bar configuration, using defaults: {:#}", e);
            SeekBar::with_defaults(
                Orientation::Horizontal,
                default_assets(Orientation::Horizontal),
            )
        });
        let mut vertical = helpers::build_bar(&helpers::vertical_config(&config))
            .unwrap_or_else(|e| {
                tracing::warn!("Invalid vertical seek bar configuration: {:#}", e);
                SeekBar::with_defaults(Orientation::Vertical, default_assets(Orientation::Vertical))
            });
        // A hundred steps are too dense for tick marks
        horizontal.set_tick_mark(None);
        helpers::wire_bar(&mut horizontal, events_tx.clone());
        helpers::wire_bar(&mut vertical, events_tx);

        // 3. Cross-axis extents come from the measure pass
        let horizontal_height = horizontal
            .measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified)
            .height as f32;
        let vertical_width = vertical
            .measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified)
            .width as f32;

        // 4. Open main window
        let (window_id, open_window) = iced::window::open(iced::window::Settings {
            size: iced::Size::new(760.0, 560.0),
            ..Default::default()
        });
        tracing::info!("Opening main window with id: {:?}", window_id);

        let app = Self {
            horizontal,
            vertical,
            horizontal_height,
            vertical_width,
            events,
            event_log: Default::default(),
            download: None,
            dark_mode: true,
            main_window: Some(window_id),
        };

        (app, open_window.discard())
    }

    pub fn theme(&self, _window_id: iced::window::Id) -> Theme {
        self.current_theme()
    }

    pub fn current_theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn title(&self, _window_id: iced::window::Id) -> String {
        if self.download.is_some() {
            format!("XSeekBar - downloading {}%", self.horizontal.progress())
        } else {
            "XSeekBar".to_string()
        }
    }

    pub fn subscription(&self) -> iced::Subscription<Message> {
        // Queued updates are drained once per frame
        let frame_sub = iced::window::frames().map(|_| Message::Frame);
        let close_event_sub = iced::window::close_events().map(Message::WindowClosed);

        iced::Subscription::batch([frame_sub, close_event_sub])
    }
}
