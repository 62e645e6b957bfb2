//! Built-in assets
//!
//! - [`ShapeAsset`]: solid rounded rectangle (thumb, tick mark, indicator bubble)
//! - [`ClipAsset`]: shape that only paints the part selected by its level
//! - [`LayeredTrack`]: groove + leveled fill addressable by [`LayerRole`]

use iced::Color;

use super::asset::{
    LayerRole, LayoutDirection, StateSet, Surface, TintList, TintMode, VisualAsset,
};
use super::geometry::{Orientation, Rect, round_px};
use super::progress::MAX_LEVEL;

/// Solid rounded rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeAsset {
    width: i32,
    height: i32,
    color: Color,
    corner_radius: f32,
    bounds: Rect,
    tint: Option<TintList>,
    tint_mode: Option<TintMode>,
    state: StateSet,
    direction: LayoutDirection,
}

impl ShapeAsset {
    /// `width`/`height` below zero leave that dimension without an intrinsic size
    pub fn new(width: i32, height: i32, color: Color) -> Self {
        Self {
            width,
            height,
            color,
            corner_radius: 0.0,
            bounds: Rect::default(),
            tint: None,
            tint_mode: None,
            state: StateSet::default(),
            direction: LayoutDirection::default(),
        }
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Fully rounded ends
    pub fn pill(self) -> Self {
        let radius = self.width.min(self.height).max(0) as f32 / 2.0;
        self.rounded(radius)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Color after the tint has been applied for the current state
    pub fn effective_color(&self) -> Color {
        match self.tint {
            Some(list) => self
                .tint_mode
                .unwrap_or_default()
                .blend(list.color_for(self.state), self.color),
            None => self.color,
        }
    }

    fn paint(&self, surface: &mut dyn Surface, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let radius = self
            .corner_radius
            .min(rect.width().min(rect.height()) as f32 / 2.0);
        surface.fill_rect(rect, self.effective_color(), radius);
    }
}

impl VisualAsset for ShapeAsset {
    fn intrinsic_width(&self) -> i32 {
        self.width
    }

    fn intrinsic_height(&self) -> i32 {
        self.height
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn set_tint(&mut self, tint: Option<TintList>, mode: Option<TintMode>) {
        self.tint = tint;
        self.tint_mode = mode;
    }

    fn is_stateful(&self) -> bool {
        self.tint.is_some_and(|list| list.is_stateful())
    }

    fn set_state(&mut self, state: StateSet) -> bool {
        let before = self.effective_color();
        self.state = state;
        self.effective_color() != before
    }

    fn set_layout_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.paint(surface, self.bounds);
    }
}

/// Shape clipped to its level along the direction of travel
///
/// Horizontal fills grow from the left edge, vertical fills from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipAsset {
    shape: ShapeAsset,
    orientation: Orientation,
    level: i32,
}

impl ClipAsset {
    pub fn new(shape: ShapeAsset, orientation: Orientation) -> Self {
        Self {
            shape,
            orientation,
            level: 0,
        }
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// The part of the bounds currently painted
    pub fn clipped_bounds(&self) -> Rect {
        let bounds = self.shape.bounds;
        let fraction = self.level as f32 / MAX_LEVEL as f32;
        match self.orientation {
            Orientation::Horizontal => Rect {
                right: bounds.left + round_px(bounds.width() as f32 * fraction),
                ..bounds
            },
            Orientation::Vertical => Rect {
                bottom: bounds.top + round_px(bounds.height() as f32 * fraction),
                ..bounds
            },
        }
    }
}

impl VisualAsset for ClipAsset {
    fn intrinsic_width(&self) -> i32 {
        self.shape.width
    }

    fn intrinsic_height(&self) -> i32 {
        self.shape.height
    }

    fn bounds(&self) -> Rect {
        self.shape.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.shape.set_bounds(bounds);
    }

    fn set_level(&mut self, level: i32) -> bool {
        let level = level.clamp(0, MAX_LEVEL);
        if level == self.level {
            return false;
        }
        self.level = level;
        true
    }

    fn set_tint(&mut self, tint: Option<TintList>, mode: Option<TintMode>) {
        self.shape.set_tint(tint, mode);
    }

    fn is_stateful(&self) -> bool {
        self.shape.is_stateful()
    }

    fn set_state(&mut self, state: StateSet) -> bool {
        self.shape.set_state(state)
    }

    fn set_layout_direction(&mut self, direction: LayoutDirection) {
        self.shape.set_layout_direction(direction);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.shape.paint(surface, self.clipped_bounds());
    }
}

/// Track made of a background groove and a leveled fill
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredTrack {
    background: ShapeAsset,
    fill: ClipAsset,
}

impl LayeredTrack {
    pub fn new(background: ShapeAsset, fill: ShapeAsset, orientation: Orientation) -> Self {
        Self {
            background,
            fill: ClipAsset::new(fill, orientation),
        }
    }

    pub fn fill(&self) -> &ClipAsset {
        &self.fill
    }

    pub fn background(&self) -> &ShapeAsset {
        &self.background
    }
}

impl VisualAsset for LayeredTrack {
    fn intrinsic_width(&self) -> i32 {
        self.background.width.max(self.fill.intrinsic_width())
    }

    fn intrinsic_height(&self) -> i32 {
        self.background.height.max(self.fill.intrinsic_height())
    }

    fn bounds(&self) -> Rect {
        self.background.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.background.set_bounds(bounds);
        self.fill.set_bounds(bounds);
    }

    fn set_level(&mut self, level: i32) -> bool {
        self.fill.set_level(level)
    }

    fn set_tint(&mut self, tint: Option<TintList>, mode: Option<TintMode>) {
        self.background.set_tint(tint, mode);
        self.fill.set_tint(tint, mode);
    }

    fn is_stateful(&self) -> bool {
        self.background.is_stateful() || self.fill.is_stateful()
    }

    fn set_state(&mut self, state: StateSet) -> bool {
        let background = self.background.set_state(state);
        let fill = self.fill.set_state(state);
        background || fill
    }

    fn set_layout_direction(&mut self, direction: LayoutDirection) {
        self.background.set_layout_direction(direction);
        self.fill.set_layout_direction(direction);
    }

    fn layer_mut(&mut self, role: LayerRole) -> Option<&mut dyn VisualAsset> {
        match role {
            LayerRole::TrackFill => Some(&mut self.fill),
            LayerRole::TrackBackground => Some(&mut self.background),
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.background.draw(surface);
        self.fill.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        rects: Vec<(Rect, Color)>,
    }

    impl Surface for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color, _corner_radius: f32) {
            self.rects.push((rect, color));
        }
        fn draw_text(&mut self, _text: &super::super::asset::TextRun) {}
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn translate(&mut self, _dx: f32, _dy: f32) {}
    }

    #[test]
    fn test_clip_follows_level() {
        let mut clip = ClipAsset::new(ShapeAsset::new(-1, 4, Color::WHITE), Orientation::Horizontal);
        clip.set_bounds(Rect::new(10, 0, 210, 4));

        assert!(clip.set_level(5_000));
        assert!(!clip.set_level(5_000));
        assert_eq!(clip.clipped_bounds(), Rect::new(10, 0, 110, 4));

        clip.set_level(20_000);
        assert_eq!(clip.level(), MAX_LEVEL);
    }

    #[test]
    fn test_vertical_clip_grows_from_top() {
        let mut clip = ClipAsset::new(ShapeAsset::new(4, -1, Color::WHITE), Orientation::Vertical);
        clip.set_bounds(Rect::new(0, 0, 4, 100));
        clip.set_level(2_500);
        assert_eq!(clip.clipped_bounds(), Rect::new(0, 0, 4, 25));
    }

    #[test]
    fn test_empty_level_paints_nothing() {
        let mut clip = ClipAsset::new(ShapeAsset::new(-1, 4, Color::WHITE), Orientation::Horizontal);
        clip.set_bounds(Rect::new(0, 0, 100, 4));

        let mut recorder = Recorder::default();
        clip.draw(&mut recorder);
        assert!(recorder.rects.is_empty());
    }

    #[test]
    fn test_layered_track_roles() {
        let background = ShapeAsset::new(-1, 4, Color::BLACK);
        let fill = ShapeAsset::new(-1, 4, Color::WHITE);
        let mut track = LayeredTrack::new(background, fill, Orientation::Horizontal);
        track.set_bounds(Rect::new(0, 0, 100, 4));
        track.set_level(MAX_LEVEL);

        let red = Color::from_rgb(1.0, 0.0, 0.0);
        if let Some(layer) = track.layer_mut(LayerRole::TrackFill) {
            layer.set_tint(Some(TintList::solid(red)), Some(TintMode::SrcIn));
        }

        let mut recorder = Recorder::default();
        track.draw(&mut recorder);
        assert_eq!(recorder.rects.len(), 2);
        assert_eq!(recorder.rects[0].1, Color::BLACK);
        assert_eq!(recorder.rects[1].1, red);
    }

    #[test]
    fn test_state_change_reports_visual_change() {
        let mut thumb = ShapeAsset::new(20, 20, Color::WHITE);
        assert!(!thumb.set_state(StateSet {
            enabled: true,
            pressed: true,
        }));

        thumb.set_tint(
            Some(TintList {
                default: Color::WHITE,
                pressed: Some(Color::BLACK),
                disabled: None,
            }),
            None,
        );
        assert!(thumb.is_stateful());
        assert!(thumb.set_state(StateSet::default()));
        assert_eq!(thumb.effective_color(), Color::WHITE);
    }
}
