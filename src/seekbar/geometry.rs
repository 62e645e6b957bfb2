//! Layout engine for the seek bar
//!
//! Pure functions that map widget size, padding, orientation, indicator placement and
//! the normalized progress onto pixel rectangles for the track, thumb and indicator.
//!
//! All rectangles are in widget-local paint coordinates (origin at the widget's top-left
//! corner, padding included). The float to pixel conversion happens once, at the end,
//! with round-half-away-from-zero so layout and touch mapping agree on the edges.
//!
//! ```text
//!  Horizontal, indicator on top          Vertical, indicator on the left
//!
//!     [ind]                               [ind]|
//!  ---( o )-----------                         |=
//!                                              o
//!                                              |=
//! ```

use serde::{Deserialize, Serialize};

/// Direction the progress travels in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// Side of the track the floating indicator sits on
///
/// Horizontal bars accept only `Top`/`Bottom`, vertical bars only `Left`/`Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorPlacement {
    Top,
    Bottom,
    Left,
    Right,
}

impl IndicatorPlacement {
    /// Placement used when none is configured
    pub fn default_for(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => IndicatorPlacement::Top,
            Orientation::Vertical => IndicatorPlacement::Left,
        }
    }

    pub fn is_allowed(self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => {
                matches!(self, IndicatorPlacement::Top | IndicatorPlacement::Bottom)
            }
            Orientation::Vertical => {
                matches!(self, IndicatorPlacement::Left | IndicatorPlacement::Right)
            }
        }
    }

    /// Top/Left placements sit before the track on the cross axis
    pub fn is_leading(self) -> bool {
        matches!(self, IndicatorPlacement::Top | IndicatorPlacement::Left)
    }
}

impl std::fmt::Display for IndicatorPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorPlacement::Top => write!(f, "top"),
            IndicatorPlacement::Bottom => write!(f, "bottom"),
            IndicatorPlacement::Left => write!(f, "left"),
            IndicatorPlacement::Right => write!(f, "right"),
        }
    }
}

/// Integer pixel size. Negative components mean "no intrinsic size".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along the direction of travel
    pub fn primary(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Extent perpendicular to the direction of travel
    pub fn cross(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.height,
            Orientation::Vertical => self.width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const ZERO: Self = Self::all(0);

    pub const fn all(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub fn start(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }

    pub fn end(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.right,
            Orientation::Vertical => self.bottom,
        }
    }

    pub fn cross_start(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.top,
            Orientation::Vertical => self.left,
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Pixel rectangle, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rectangle from primary/cross axis coordinates
    pub fn from_axes(
        orientation: Orientation,
        primary_start: i32,
        cross_start: i32,
        primary_len: i32,
        cross_len: i32,
    ) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(
                primary_start,
                cross_start,
                primary_start + primary_len,
                cross_start + cross_len,
            ),
            Orientation::Vertical => Self::new(
                cross_start,
                primary_start,
                cross_start + cross_len,
                primary_start + primary_len,
            ),
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) as f32 / 2.0,
            (self.top + self.bottom) as f32 / 2.0,
        )
    }

    /// A `width` x `height` rectangle centred on the origin
    pub fn centered(width: i32, height: i32) -> Self {
        let left = -(width / 2);
        let top = -(height / 2);
        Self::new(left, top, left + width, top + height)
    }
}

/// Final float to pixel conversion (round half away from zero)
pub fn round_px(value: f32) -> i32 {
    value.round() as i32
}

/// How the host constrains one axis during measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    Exactly(i32),
    AtMost(i32),
    Unspecified,
}

impl MeasureSpec {
    pub fn resolve(self, desired: i32) -> i32 {
        match self {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(size) => desired.min(size),
            MeasureSpec::Unspecified => desired,
        }
    }
}

/// Everything the layout depends on
///
/// `track`, `thumb` and `indicator` are the intrinsic sizes of the assets present in
/// those slots; `None` means the slot is empty and its layout step is skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub orientation: Orientation,
    pub placement: IndicatorPlacement,
    pub size: Size,
    pub padding: Padding,
    /// Fallback track size when the track asset has no intrinsic size
    pub min_size: Size,
    /// Upper bound for the measured content size
    pub max_size: Size,
    pub thumb_offset: i32,
    pub indicator_offset: i32,
    pub track: Option<Size>,
    pub thumb: Option<Size>,
    pub indicator: Option<Size>,
}

impl Geometry {
    pub fn new(orientation: Orientation, placement: IndicatorPlacement) -> Self {
        Self {
            orientation,
            placement,
            size: Size::default(),
            padding: Padding::ZERO,
            min_size: Size::new(6, 6),
            max_size: Size::new(100, 100),
            thumb_offset: 0,
            indicator_offset: 0,
            track: None,
            thumb: None,
            indicator: None,
        }
    }

    /// Length of the content box along the direction of travel
    pub fn available(&self) -> i32 {
        let o = self.orientation;
        (self.size.primary(o) - self.padding.start(o) - self.padding.end(o)).max(0)
    }

    fn track_cross(&self) -> i32 {
        let o = self.orientation;
        self.track
            .map(|size| size.cross(o))
            .filter(|cross| *cross > 0)
            .unwrap_or_else(|| self.min_size.cross(o))
    }

    fn thumb_cross(&self) -> i32 {
        self.thumb
            .map(|size| size.cross(self.orientation).max(0))
            .unwrap_or(0)
    }

    /// Space inserted before the track by a leading (Top/Left) indicator
    fn leading_gap(&self) -> i32 {
        match self.indicator {
            Some(size) if self.placement.is_leading() => {
                size.cross(self.orientation).max(0) + self.indicator_offset
            }
            _ => 0,
        }
    }

    /// Cross-axis extent shared by the track and the thumb
    fn band_cross(&self) -> i32 {
        self.track_cross().max(self.thumb_cross())
    }

    /// Primary-axis position reached at `scale`, before any centring
    pub fn travel(&self, scale: f32) -> i32 {
        let scale = scale.clamp(0.0, 1.0);
        round_px(self.thumb_offset as f32 + scale * self.available() as f32)
    }

    pub fn layout_track(&self) -> Rect {
        let o = self.orientation;
        let track_cross = self.track_cross();
        let centring = ((self.thumb_cross() - track_cross) / 2).max(0);

        Rect::from_axes(
            o,
            self.padding.start(o),
            self.padding.cross_start(o) + self.leading_gap() + centring,
            self.available(),
            track_cross,
        )
    }

    pub fn layout_thumb(&self, scale: f32) -> Option<Rect> {
        let thumb = self.thumb?;
        let o = self.orientation;
        let primary = thumb.primary(o).max(0);
        let cross = thumb.cross(o).max(0);
        let half = primary / 2;

        // Bounds start at `travel - half`; painting shifts them by `padding - half`,
        // so the default offset of `half` puts the centre on the track ends.
        let start = self.padding.start(o) - half + self.travel(scale) - half;
        let centring = ((self.track_cross() - cross) / 2).max(0);

        Some(Rect::from_axes(
            o,
            start,
            self.padding.cross_start(o) + self.leading_gap() + centring,
            primary,
            cross,
        ))
    }

    /// The indicator follows the travel point itself, without the thumb's padding shift
    pub fn layout_indicator(&self, scale: f32) -> Option<Rect> {
        let indicator = self.indicator?;
        let o = self.orientation;
        let primary = indicator.primary(o).max(0);
        let cross = indicator.cross(o).max(0);

        let cross_origin = if self.placement.is_leading() {
            0
        } else {
            self.band_cross() + self.indicator_offset
        };

        Some(Rect::from_axes(
            o,
            self.travel(scale) - primary / 2,
            self.padding.cross_start(o) + cross_origin,
            primary,
            cross,
        ))
    }

    /// Map a pointer coordinate on the primary axis to a scale in `[0, 1]`
    ///
    /// Coordinates outside the padded content box clamp instead of extrapolating.
    pub fn scale_at(&self, pointer: f32) -> f32 {
        let o = self.orientation;
        let position = round_px(pointer);
        let start = self.padding.start(o);
        let end = self.size.primary(o) - self.padding.end(o);
        let available = self.available();

        if position < start {
            0.0
        } else if position > end {
            1.0
        } else if available <= 0 {
            0.0
        } else {
            ((position - start) as f32 / available as f32).clamp(0.0, 1.0)
        }
    }

    /// Centres of `count + 1` evenly spaced tick marks along the track
    pub fn tick_centers(&self, count: i32) -> Vec<(i32, i32)> {
        if count <= 1 {
            return Vec::new();
        }

        let o = self.orientation;
        let track = self.layout_track();
        let (primary_start, primary_len, cross_mid) = match o {
            Orientation::Horizontal => (track.left, track.width(), (track.top + track.bottom) / 2),
            Orientation::Vertical => (track.top, track.height(), (track.left + track.right) / 2),
        };
        let spacing = primary_len as f32 / count as f32;

        (0..=count)
            .map(|i| {
                let primary = primary_start + round_px(i as f32 * spacing);
                match o {
                    Orientation::Horizontal => (primary, cross_mid),
                    Orientation::Vertical => (cross_mid, primary),
                }
            })
            .collect()
    }

    /// Desired widget size under the given constraints
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let track = self.track.unwrap_or_default();
        let thumb = self.thumb.unwrap_or_default();
        let max_drawable = Size::new(
            track.width.max(thumb.width).max(0),
            track.height.max(thumb.height).max(0),
        );

        let (indicator_extra_w, indicator_extra_h) = match self.indicator {
            Some(size) => (
                size.width.max(0) + self.indicator_offset,
                size.height.max(0) + self.indicator_offset,
            ),
            None => (0, 0),
        };

        let clamp_w = |w: i32| self.min_size.width.max(self.max_size.width.min(w));
        let clamp_h = |h: i32| self.min_size.height.max(self.max_size.height.min(h));

        let (dw, dh) = match self.orientation {
            Orientation::Horizontal => (
                clamp_w(max_drawable.width),
                clamp_h(max_drawable.height + indicator_extra_h),
            ),
            Orientation::Vertical => (
                clamp_w(max_drawable.width + indicator_extra_w),
                clamp_h(max_drawable.height),
            ),
        };

        Size::new(
            width.resolve(dw + self.padding.horizontal()),
            height.resolve(dh + self.padding.vertical()),
        )
    }
}
