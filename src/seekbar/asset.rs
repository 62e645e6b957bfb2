//! Visual asset capability
//!
//! The seek bar never draws shapes itself: it positions assets and asks them to paint
//! onto a [`Surface`]. Anything with an intrinsic size, mutable bounds and an optional
//! tint/state can fill one of the four slots (track, thumb, tick mark, indicator).

use iced::Color;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Widget state forwarded to stateful assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSet {
    pub enabled: bool,
    pub pressed: bool,
}

impl Default for StateSet {
    fn default() -> Self {
        Self {
            enabled: true,
            pressed: false,
        }
    }
}

/// Layout direction flag, passed through to assets untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Sub-assets of a layered track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Portion driven by the progress level
    TrackFill,
    /// Groove painted behind the fill
    TrackBackground,
}

/// Porter-Duff mode used to combine a tint (source) with the asset's own color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TintMode {
    SrcOver,
    #[default]
    SrcIn,
    SrcAtop,
    Multiply,
    Screen,
    Add,
}

impl TintMode {
    /// Decode the integer form used by style attributes; unknown values mean "no mode"
    pub fn from_attr(value: i32) -> Option<Self> {
        match value {
            3 => Some(TintMode::SrcOver),
            5 => Some(TintMode::SrcIn),
            9 => Some(TintMode::SrcAtop),
            14 => Some(TintMode::Multiply),
            15 => Some(TintMode::Screen),
            16 => Some(TintMode::Add),
            _ => None,
        }
    }

    /// Combine `tint` over `base`
    pub fn blend(self, tint: Color, base: Color) -> Color {
        let (s, d) = (tint, base);
        match self {
            TintMode::SrcOver => {
                let a = s.a + d.a * (1.0 - s.a);
                if a <= 0.0 {
                    return Color::TRANSPARENT;
                }
                let channel = |sc: f32, dc: f32| (sc * s.a + dc * d.a * (1.0 - s.a)) / a;
                Color::from_rgba(channel(s.r, d.r), channel(s.g, d.g), channel(s.b, d.b), a)
            }
            TintMode::SrcIn => Color::from_rgba(s.r, s.g, s.b, s.a * d.a),
            TintMode::SrcAtop => {
                let channel = |sc: f32, dc: f32| sc * s.a + dc * (1.0 - s.a);
                Color::from_rgba(channel(s.r, d.r), channel(s.g, d.g), channel(s.b, d.b), d.a)
            }
            TintMode::Multiply => Color::from_rgba(s.r * d.r, s.g * d.g, s.b * d.b, s.a * d.a),
            TintMode::Screen => {
                let channel = |sc: f32, dc: f32| sc + dc - sc * dc;
                Color::from_rgba(
                    channel(s.r, d.r),
                    channel(s.g, d.g),
                    channel(s.b, d.b),
                    channel(s.a, d.a),
                )
            }
            TintMode::Add => Color::from_rgba(
                (s.r + d.r).min(1.0),
                (s.g + d.g).min(1.0),
                (s.b + d.b).min(1.0),
                (s.a + d.a).min(1.0),
            ),
        }
    }
}

/// Tint color that depends on the widget state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TintList {
    pub default: Color,
    pub pressed: Option<Color>,
    pub disabled: Option<Color>,
}

impl TintList {
    pub fn solid(color: Color) -> Self {
        Self {
            default: color,
            pressed: None,
            disabled: None,
        }
    }

    pub fn is_stateful(&self) -> bool {
        self.pressed.is_some() || self.disabled.is_some()
    }

    pub fn color_for(&self, state: StateSet) -> Color {
        if !state.enabled {
            if let Some(color) = self.disabled {
                return color;
            }
        }
        if state.pressed {
            if let Some(color) = self.pressed {
                return color;
            }
        }
        self.default
    }
}

/// Tint configuration for one asset slot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tint {
    pub list: Option<TintList>,
    pub mode: Option<TintMode>,
}

impl Tint {
    pub fn is_set(&self) -> bool {
        self.list.is_some() || self.mode.is_some()
    }
}

/// Text painted over the indicator
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub content: String,
    pub x: f32,
    /// Baseline of the text
    pub y: f32,
    pub size: f32,
    pub color: Color,
    pub bold: bool,
}

/// Paint target, implemented by the rendering backend
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color, corner_radius: f32);

    fn draw_text(&mut self, text: &TextRun);

    /// Save the current translation
    fn save(&mut self);

    /// Restore the last saved translation
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);
}

/// A renderable item owned by the seek bar
///
/// Intrinsic sizes below zero mean "no intrinsic size"; the layout then falls back to the
/// configured minimum.
pub trait VisualAsset {
    fn intrinsic_width(&self) -> i32;

    fn intrinsic_height(&self) -> i32;

    /// Smallest size the asset can be drawn at
    fn minimum_size(&self) -> (i32, i32) {
        (self.intrinsic_width().max(0), self.intrinsic_height().max(0))
    }

    fn bounds(&self) -> Rect;

    fn set_bounds(&mut self, bounds: Rect);

    /// Partial fill in `[0, MAX_LEVEL]`; returns whether the asset changed
    fn set_level(&mut self, _level: i32) -> bool {
        false
    }

    fn set_tint(&mut self, _tint: Option<TintList>, _mode: Option<TintMode>) {}

    fn is_stateful(&self) -> bool {
        false
    }

    /// Returns whether the asset's appearance changed
    fn set_state(&mut self, _state: StateSet) -> bool {
        false
    }

    fn set_layout_direction(&mut self, _direction: LayoutDirection) {}

    /// Sub-asset for a semantic role, if this asset is layered
    fn layer_mut(&mut self, _role: LayerRole) -> Option<&mut dyn VisualAsset> {
        None
    }

    fn draw(&self, surface: &mut dyn Surface);
}

impl std::fmt::Debug for dyn VisualAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualAsset")
            .field("intrinsic_width", &self.intrinsic_width())
            .field("intrinsic_height", &self.intrinsic_height())
            .field("bounds", &self.bounds())
            .finish_non_exhaustive()
    }
}
