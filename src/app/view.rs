//! Application view rendering

use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Element, Fill};

use xseekbar::ui::{seek_bar, theme};

use super::App;
use super::message::Message;

/// Height of the vertical bar's canvas
const VERTICAL_BAR_HEIGHT: f32 = 320.0;

impl App {
    /// Build the view for a specific window
    pub fn view(&self, _window_id: iced::window::Id) -> Element<'_, Message> {
        let horizontal_panel = container(
            column![
                text("Horizontal").size(14),
                seek_bar::view(
                    &self.horizontal,
                    Message::Horizontal,
                    Fill,
                    self.horizontal_height,
                ),
                text(format!(
                    "{} / {}",
                    self.horizontal.progress(),
                    self.horizontal.max()
                ))
                .size(12),
            ]
            .spacing(8),
        )
        .padding(16)
        .width(Fill)
        .style(theme::panel);

        let vertical_panel = container(
            column![
                text("Vertical").size(14),
                seek_bar::view(
                    &self.vertical,
                    Message::Vertical,
                    self.vertical_width,
                    VERTICAL_BAR_HEIGHT,
                ),
            ]
            .spacing(8)
            .align_x(Alignment::Center),
        )
        .padding(16)
        .style(theme::panel);

        let controls = self.view_controls();

        let event_log = column(
            self.event_log
                .iter()
                .map(|line| text(line.as_str()).size(12).into()),
        )
        .spacing(4);

        let content = column![
            horizontal_panel,
            controls,
            row![
                vertical_panel,
                container(event_log).padding(16).width(Fill),
            ]
            .spacing(16),
        ]
        .spacing(16)
        .padding(24);

        container(content)
            .width(Fill)
            .height(Fill)
            .style(theme::main_content)
            .into()
    }

    fn view_controls(&self) -> Element<'_, Message> {
        let download = if self.download.is_some() {
            button(text("Stop download"))
                .style(theme::secondary_button)
                .on_press(Message::StopDownload)
        } else {
            button(text("Start download"))
                .style(theme::primary_button)
                .on_press(Message::StartDownload)
        };

        let attach_label = if self.horizontal.is_attached() {
            "Detach"
        } else {
            "Attach"
        };
        let indicator_label = if self.horizontal.is_indicator_shown() {
            "Hide indicator"
        } else {
            "Show indicator"
        };
        let enabled_label = if self.horizontal.is_enabled() {
            "Disable"
        } else {
            "Enable"
        };

        row![
            download,
            button(text("-5"))
                .style(theme::secondary_button)
                .on_press(Message::Step(-5)),
            button(text("+5"))
                .style(theme::secondary_button)
                .on_press(Message::Step(5)),
            Space::new().width(16),
            button(text(attach_label))
                .style(theme::secondary_button)
                .on_press(Message::ToggleAttached),
            button(text(indicator_label))
                .style(theme::secondary_button)
                .on_press(Message::ToggleIndicator),
            button(text(enabled_label))
                .style(theme::secondary_button)
                .on_press(Message::ToggleEnabled),
            button(text(if self.dark_mode { "Light" } else { "Dark" }))
                .style(theme::secondary_button)
                .on_press(Message::ToggleTheme),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    }
}
