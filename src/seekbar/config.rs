//! Seek bar configuration
//!
//! Serde document carrying every recognised option. Unknown keys are ignored and
//! missing keys take the defaults below, so a partial JSON file is valid.

use iced::Color;
use serde::{Deserialize, Serialize};

use super::asset::{Tint, TintList, TintMode};
use super::drag::DEFAULT_TOUCH_SLOP;
use super::error::{Result, SeekBarError};
use super::geometry::{IndicatorPlacement, Orientation, Padding, Size};
use super::update_queue::DEFAULT_MAX_PENDING_UPDATES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekBarConfig {
    pub orientation: Orientation,
    /// Defaults to `Top` for horizontal bars and `Left` for vertical ones
    pub indicator_placement: Option<IndicatorPlacement>,
    pub min: i32,
    pub max: i32,
    pub progress: i32,
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
    /// Defaults to half the thumb's intrinsic width
    pub thumb_offset: Option<i32>,
    pub indicator_offset: i32,
    pub user_seekable: bool,
    pub show_indicator: bool,
    pub padding: Padding,
    pub touch_slop: f32,
    pub max_pending_updates: usize,
    pub track: SlotTint,
    pub track_background: SlotTint,
    pub thumb: SlotTint,
    pub tick_mark: SlotTint,
    pub indicator: SlotTint,
}

impl Default for SeekBarConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            indicator_placement: None,
            min: 0,
            max: 100,
            progress: 0,
            min_width: 6,
            max_width: 100,
            min_height: 6,
            max_height: 100,
            thumb_offset: None,
            indicator_offset: 0,
            user_seekable: true,
            show_indicator: true,
            padding: Padding::ZERO,
            touch_slop: DEFAULT_TOUCH_SLOP,
            max_pending_updates: DEFAULT_MAX_PENDING_UPDATES,
            track: SlotTint::default(),
            track_background: SlotTint::default(),
            thumb: SlotTint::default(),
            tick_mark: SlotTint::default(),
            indicator: SlotTint::default(),
        }
    }
}

impl SeekBarConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Effective placement, or an error if it does not fit the orientation
    pub fn placement(&self) -> Result<IndicatorPlacement> {
        let placement = self
            .indicator_placement
            .unwrap_or_else(|| IndicatorPlacement::default_for(self.orientation));

        if placement.is_allowed(self.orientation) {
            Ok(placement)
        } else {
            Err(SeekBarError::PlacementMismatch {
                orientation: self.orientation,
                placement,
            })
        }
    }

    /// Check everything that can fail before a seek bar is built
    pub fn validate(&self) -> Result<()> {
        self.placement()?;
        for slot in [
            &self.track,
            &self.track_background,
            &self.thumb,
            &self.tick_mark,
            &self.indicator,
        ] {
            slot.resolve()?;
        }
        Ok(())
    }

    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.max_height)
    }
}

/// Tint options for one asset slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotTint {
    pub tint: Option<TintListConfig>,
    pub mode: Option<TintModeConfig>,
}

impl SlotTint {
    pub fn resolve(&self) -> Result<Tint> {
        Ok(Tint {
            list: self.tint.as_ref().map(TintListConfig::resolve).transpose()?,
            mode: self.mode.and_then(TintModeConfig::resolve),
        })
    }
}

/// Either a single color or per-state colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TintListConfig {
    Solid(String),
    States {
        default: String,
        #[serde(default)]
        pressed: Option<String>,
        #[serde(default)]
        disabled: Option<String>,
    },
}

impl TintListConfig {
    pub fn resolve(&self) -> Result<TintList> {
        match self {
            TintListConfig::Solid(color) => Ok(TintList::solid(parse_color(color)?)),
            TintListConfig::States {
                default,
                pressed,
                disabled,
            } => Ok(TintList {
                default: parse_color(default)?,
                pressed: pressed.as_deref().map(parse_color).transpose()?,
                disabled: disabled.as_deref().map(parse_color).transpose()?,
            }),
        }
    }
}

/// Blend mode by name (`"src_in"`) or by style attribute integer (`5`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TintModeConfig {
    Named(TintMode),
    Attr(i32),
}

impl TintModeConfig {
    /// Unknown attribute integers mean "no mode"
    pub fn resolve(self) -> Option<TintMode> {
        match self {
            TintModeConfig::Named(mode) => Some(mode),
            TintModeConfig::Attr(value) => TintMode::from_attr(value),
        }
    }
}

/// Parse `#RRGGBB` or `#AARRGGBB`
pub fn parse_color(value: &str) -> Result<Color> {
    let invalid = || SeekBarError::InvalidColor(value.to_string());

    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

    match hex.len() {
        6 => Ok(Color::from_rgb8(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(Color::from_rgba8(
            byte(2)?,
            byte(4)?,
            byte(6)?,
            byte(0)? as f32 / 255.0,
        )),
        _ => Err(invalid()),
    }
}
