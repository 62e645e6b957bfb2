//! Application update logic

use std::sync::atomic::Ordering;

use iced::Task;

use xseekbar::seekbar::{SeekBarId, SeekEvent, Tint, TintList, TintMode};
use xseekbar::ui::{seek_bar, theme};

use super::App;
use super::helpers;
use super::message::Message;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Frame => {
                self.on_frame();
                Task::none()
            }

            Message::WindowClosed(id) => {
                if self.main_window == Some(id) {
                    self.stop_download();
                    return iced::exit();
                }
                Task::none()
            }

            Message::Horizontal(input) => {
                seek_bar::apply(&mut self.horizontal, input);
                Task::none()
            }

            Message::Vertical(input) => {
                seek_bar::apply(&mut self.vertical, input);
                Task::none()
            }

            Message::Step(delta) => {
                self.horizontal.set_progress_by(delta);
                self.vertical.set_progress_by(delta.signum());
                Task::none()
            }

            Message::StartDownload => {
                if self.download.is_none() {
                    match helpers::spawn_download(self.horizontal.handle(), self.horizontal.max()) {
                        Ok(download) => self.download = Some(download),
                        Err(e) => tracing::warn!("Failed to start download thread: {}", e),
                    }
                }
                Task::none()
            }

            Message::StopDownload => {
                self.stop_download();
                Task::none()
            }

            Message::ToggleIndicator => {
                for bar in [&mut self.horizontal, &mut self.vertical] {
                    if bar.is_indicator_shown() {
                        bar.hide_indicator();
                    } else {
                        bar.show_indicator();
                    }
                }
                Task::none()
            }

            Message::ToggleEnabled => {
                let enabled = !self.horizontal.is_enabled();
                self.horizontal.set_enabled(enabled);
                self.vertical.set_enabled(enabled);
                Task::none()
            }

            Message::ToggleAttached => {
                let attached = !self.horizontal.is_attached();
                self.horizontal.set_attached(attached);
                self.push_log(format!(
                    "horizontal {}",
                    if attached { "attached" } else { "detached" }
                ));
                Task::none()
            }

            Message::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                let groove = Tint {
                    list: Some(TintList::solid(theme::groove(&self.current_theme()))),
                    mode: Some(TintMode::SrcIn),
                };
                self.horizontal.set_track_background_tint(groove);
                self.vertical.set_track_background_tint(groove);
                Task::none()
            }
        }
    }

    /// Drain queued updates, collect listener events and reap a finished download
    fn on_frame(&mut self) {
        self.horizontal.tick();
        self.vertical.tick();

        while let Ok(event) = self.events.try_recv() {
            let line = self.describe(event);
            self.push_log(line);
        }

        if self
            .download
            .as_ref()
            .is_some_and(|download| download.thread.is_finished())
        {
            self.download = None;
        }
    }

    fn describe(&self, event: SeekEvent) -> String {
        let label = |id: SeekBarId| {
            if id == self.horizontal.id() {
                "horizontal"
            } else {
                "vertical"
            }
        };

        match event {
            SeekEvent::ProgressChanged {
                bar,
                progress,
                from_user,
            } => format!(
                "{}: progress {} ({})",
                label(bar),
                progress,
                if from_user { "user" } else { "code" }
            ),
            SeekEvent::StartTrackingTouch { bar } => format!("{}: start tracking", label(bar)),
            SeekEvent::StopTrackingTouch { bar } => format!("{}: stop tracking", label(bar)),
        }
    }

    fn stop_download(&mut self) {
        if let Some(download) = self.download.take() {
            download.stop.store(true, Ordering::Relaxed);
            if download.thread.join().is_err() {
                tracing::warn!("Download thread panicked");
            }
        }
    }
}
