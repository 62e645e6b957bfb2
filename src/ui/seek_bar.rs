//! iced adapter for [`SeekBar`]
//!
//! A `canvas::Program` that borrows the seek bar for one frame: pointer input is
//! translated into widget-local [`PointerEvent`]s and published as messages, and
//! drawing goes through a [`Surface`] backed by the canvas `Frame`.
//!
//! The seek bar lives in application state, so the adapter never mutates it; the
//! application feeds [`SeekBarInput`] back with [`apply`].

use iced::widget::Canvas;
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Text};
use iced::{Color, Element, Font, Length, Point, Rectangle, Renderer, Theme, Vector, mouse, touch};

use crate::seekbar::{
    LayeredTrack, Orientation, PointerEvent, Rect, SeekBar, SeekBarAssets, ShapeAsset, Size,
    Surface, TextRun,
};
use crate::ui::theme;

/// Input published by the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekBarInput {
    Pointer(PointerEvent),
    /// The canvas bounds no longer match the seek bar's size
    Resized { width: i32, height: i32 },
}

/// Feed published input into the seek bar; returns whether it was handled
pub fn apply(bar: &mut SeekBar, input: SeekBarInput) -> bool {
    match input {
        SeekBarInput::Pointer(event) => bar.on_pointer(event),
        SeekBarInput::Resized { width, height } => {
            bar.set_size(width, height);
            true
        }
    }
}

/// Canvas-local interaction state
#[derive(Debug, Clone, Copy, Default)]
pub struct Interaction {
    pressed: bool,
}

pub struct SeekBarCanvas<'a, Message, F>
where
    F: Fn(SeekBarInput) -> Message,
{
    bar: &'a SeekBar,
    on_input: F,
}

impl<'a, Message, F> SeekBarCanvas<'a, Message, F>
where
    F: Fn(SeekBarInput) -> Message,
{
    pub fn new(bar: &'a SeekBar, on_input: F) -> Self {
        Self { bar, on_input }
    }

    fn accepts_input(&self) -> bool {
        self.bar.is_enabled() && self.bar.is_user_seekable()
    }
}

impl<'a, Message, F> Program<Message> for SeekBarCanvas<'a, Message, F>
where
    F: Fn(SeekBarInput) -> Message,
{
    type State = Interaction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let size = pixel_size(bounds);
        let is_pointer = matches!(event, Event::Mouse(_) | Event::Touch(_));
        if !is_pointer && size != self.bar.size() {
            return Some(canvas::Action::publish((self.on_input)(
                SeekBarInput::Resized {
                    width: size.width,
                    height: size.height,
                },
            )));
        }

        if !self.accepts_input() {
            interaction.pressed = false;
            return None;
        }

        let pointer = translate_event(event, bounds, cursor, interaction)?;
        Some(canvas::Action::publish((self.on_input)(SeekBarInput::Pointer(pointer))).and_capture())
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        {
            let mut surface = FrameSurface::new(&mut frame);
            self.bar.draw(&mut surface);
        }
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.pressed {
            mouse::Interaction::Grabbing
        } else if self.accepts_input() && cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

fn pixel_size(bounds: Rectangle) -> Size {
    Size::new(bounds.width.round() as i32, bounds.height.round() as i32)
}

fn local(position: Point, bounds: Rectangle) -> (f32, f32) {
    (position.x - bounds.x, position.y - bounds.y)
}

/// Map an iced event onto a widget-local pointer event
///
/// Presses must land inside the bounds; once pressed, moves and the release are
/// followed anywhere so a drag past the ends still clamps to them.
pub fn translate_event(
    event: &Event,
    bounds: Rectangle,
    cursor: mouse::Cursor,
    interaction: &mut Interaction,
) -> Option<PointerEvent> {
    match event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            let position = cursor.position_in(bounds)?;
            interaction.pressed = true;
            Some(PointerEvent::Down {
                x: position.x,
                y: position.y,
            })
        }
        Event::Mouse(mouse::Event::CursorMoved { position }) if interaction.pressed => {
            let (x, y) = local(*position, bounds);
            Some(PointerEvent::Move { x, y })
        }
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if interaction.pressed => {
            interaction.pressed = false;
            let (x, y) = cursor
                .position()
                .map(|position| local(position, bounds))
                .unwrap_or_default();
            Some(PointerEvent::Up { x, y })
        }
        Event::Touch(touch::Event::FingerPressed { position, .. }) => {
            if !bounds.contains(*position) {
                return None;
            }
            interaction.pressed = true;
            let (x, y) = local(*position, bounds);
            Some(PointerEvent::Down { x, y })
        }
        Event::Touch(touch::Event::FingerMoved { position, .. }) if interaction.pressed => {
            let (x, y) = local(*position, bounds);
            Some(PointerEvent::Move { x, y })
        }
        Event::Touch(touch::Event::FingerLifted { position, .. }) if interaction.pressed => {
            interaction.pressed = false;
            let (x, y) = local(*position, bounds);
            Some(PointerEvent::Up { x, y })
        }
        Event::Touch(touch::Event::FingerLost { .. }) if interaction.pressed => {
            interaction.pressed = false;
            Some(PointerEvent::Cancel)
        }
        _ => None,
    }
}

/// [`Surface`] over a canvas frame with a translation stack
struct FrameSurface<'f> {
    frame: &'f mut Frame,
    offset: Vector,
    saved: Vec<Vector>,
}

impl<'f> FrameSurface<'f> {
    fn new(frame: &'f mut Frame) -> Self {
        Self {
            frame,
            offset: Vector::new(0.0, 0.0),
            saved: Vec::new(),
        }
    }
}

impl Surface for FrameSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color, corner_radius: f32) {
        let top_left = Point::new(
            rect.left as f32 + self.offset.x,
            rect.top as f32 + self.offset.y,
        );
        let size = iced::Size::new(rect.width() as f32, rect.height() as f32);
        let path = if corner_radius > 0.0 {
            Path::rounded_rectangle(top_left, size, corner_radius.into())
        } else {
            Path::rectangle(top_left, size)
        };
        self.frame.fill(&path, color);
    }

    fn draw_text(&mut self, text: &TextRun) {
        let font = if text.bold {
            Font {
                weight: iced::font::Weight::Bold,
                ..Font::DEFAULT
            }
        } else {
            Font::DEFAULT
        };

        // `TextRun::y` is the baseline; canvas text is positioned by its top edge
        self.frame.fill_text(Text {
            content: text.content.clone(),
            position: Point::new(
                text.x + self.offset.x,
                text.y - text.size + self.offset.y,
            ),
            color: text.color,
            size: iced::Pixels(text.size),
            font,
            align_x: iced::alignment::Horizontal::Left.into(),
            align_y: iced::alignment::Vertical::Top,
            ..Text::default()
        });
    }

    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.offset = self.offset + Vector::new(dx, dy);
    }
}

/// Pink-on-groove assets used by the demo
pub fn default_assets(orientation: Orientation) -> SeekBarAssets {
    let (track_w, track_h) = match orientation {
        Orientation::Horizontal => (-1, 4),
        Orientation::Vertical => (4, -1),
    };
    let groove = theme::groove(&Theme::Dark);

    SeekBarAssets {
        track: Some(Box::new(LayeredTrack::new(
            ShapeAsset::new(track_w, track_h, groove).rounded(2.0),
            ShapeAsset::new(track_w, track_h, theme::ACCENT_PINK).rounded(2.0),
            orientation,
        ))),
        thumb: Some(Box::new(ShapeAsset::new(20, 20, Color::WHITE).pill())),
        tick_mark: Some(Box::new(ShapeAsset::new(4, 4, theme::TICK).pill())),
        indicator: Some(Box::new(
            ShapeAsset::new(44, 28, theme::ACCENT_PINK).rounded(8.0),
        )),
    }
}

/// Canvas element for a seek bar
pub fn view<'a, Message: 'a>(
    bar: &'a SeekBar,
    on_input: impl Fn(SeekBarInput) -> Message + 'a,
    width: impl Into<Length>,
    height: impl Into<Length>,
) -> Element<'a, Message> {
    Canvas::new(SeekBarCanvas::new(bar, on_input))
        .width(width)
        .height(height)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(50.0, 20.0), iced::Size::new(200.0, 40.0))
    }

    fn press() -> Event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    fn release() -> Event {
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut interaction = Interaction::default();
        let cursor = mouse::Cursor::Available(Point::new(10.0, 10.0));
        assert_eq!(translate_event(&press(), bounds(), cursor, &mut interaction), None);
        assert!(!interaction.pressed);
    }

    #[test]
    fn test_drag_follows_outside_bounds() {
        let mut interaction = Interaction::default();
        let inside = mouse::Cursor::Available(Point::new(150.0, 40.0));
        assert_eq!(
            translate_event(&press(), bounds(), inside, &mut interaction),
            Some(PointerEvent::Down { x: 100.0, y: 20.0 })
        );

        let moved = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(400.0, 40.0),
        });
        assert_eq!(
            translate_event(&moved, bounds(), inside, &mut interaction),
            Some(PointerEvent::Move { x: 350.0, y: 20.0 })
        );

        let outside = mouse::Cursor::Available(Point::new(400.0, 40.0));
        assert_eq!(
            translate_event(&release(), bounds(), outside, &mut interaction),
            Some(PointerEvent::Up { x: 350.0, y: 20.0 })
        );
        assert!(!interaction.pressed);
    }

    #[test]
    fn test_moves_without_press_are_ignored() {
        let mut interaction = Interaction::default();
        let moved = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(100.0, 30.0),
        });
        let cursor = mouse::Cursor::Available(Point::new(100.0, 30.0));
        assert_eq!(translate_event(&moved, bounds(), cursor, &mut interaction), None);
        assert_eq!(translate_event(&release(), bounds(), cursor, &mut interaction), None);
    }

    #[test]
    fn test_lost_finger_cancels() {
        let mut interaction = Interaction::default();
        let finger = touch::Finger(1);
        let pressed = Event::Touch(touch::Event::FingerPressed {
            id: finger,
            position: Point::new(60.0, 30.0),
        });
        assert_eq!(
            translate_event(&pressed, bounds(), mouse::Cursor::Unavailable, &mut interaction),
            Some(PointerEvent::Down { x: 10.0, y: 10.0 })
        );

        let lost = Event::Touch(touch::Event::FingerLost {
            id: finger,
            position: Point::new(60.0, 30.0),
        });
        assert_eq!(
            translate_event(&lost, bounds(), mouse::Cursor::Unavailable, &mut interaction),
            Some(PointerEvent::Cancel)
        );
    }

    #[test]
    fn test_apply_resizes_and_routes_pointer() {
        let config = crate::seekbar::SeekBarConfig::default();
        let mut bar = SeekBar::new(&config, default_assets(Orientation::Horizontal)).unwrap();

        apply(
            &mut bar,
            SeekBarInput::Resized {
                width: 200,
                height: 40,
            },
        );
        assert_eq!(bar.size(), Size::new(200, 40));

        assert!(apply(
            &mut bar,
            SeekBarInput::Pointer(PointerEvent::Down { x: 150.0, y: 20.0 })
        ));
        assert_eq!(bar.progress(), 75);
    }
}
