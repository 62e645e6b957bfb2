use thiserror::Error;

use super::geometry::{IndicatorPlacement, Orientation};

#[derive(Debug, Error)]
pub enum SeekBarError {
    /// Caller bug: the indicator can only sit beside the track, never at its ends
    #[error("indicator placement `{placement}` is not valid for a {orientation} seek bar")]
    PlacementMismatch {
        orientation: Orientation,
        placement: IndicatorPlacement,
    },

    #[error("invalid color {0:?}, expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),

    #[error("invalid seek bar config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SeekBarError>;
