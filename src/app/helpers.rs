//! Helper functions for application setup and the download simulation

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use iced::Color;

use xseekbar::seekbar::{
    ChannelListener, IndicatorPlacement, IndicatorText, Orientation, Padding, SeekBar,
    SeekBarConfig, SeekBarHandle, SeekEventSender,
};
use xseekbar::ui::default_assets;

use super::state::Download;

/// Delay between two simulated download chunks
const CHUNK_INTERVAL: Duration = Duration::from_millis(60);

/// `<config_dir>/xseekbar/seekbar.json`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("xseekbar").join("seekbar.json"))
}

/// Configuration used when no file is present
pub fn demo_config() -> SeekBarConfig {
    SeekBarConfig {
        padding: Padding {
            left: 12,
            top: 4,
            right: 12,
            bottom: 4,
        },
        indicator_offset: 6,
        ..Default::default()
    }
}

/// Load the config file, or the demo defaults when it is missing or malformed
pub fn load_config() -> SeekBarConfig {
    match read_config() {
        Ok(Some(config)) => {
            tracing::info!("Loaded seek bar config");
            config
        }
        Ok(None) => demo_config(),
        Err(e) => {
            tracing::warn!("Failed to load seek bar config: {:#}", e);
            demo_config()
        }
    }
}

fn read_config() -> anyhow::Result<Option<SeekBarConfig>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }

    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = SeekBarConfig::from_json(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(config))
}

/// The horizontal config turned on its side
pub fn vertical_config(config: &SeekBarConfig) -> SeekBarConfig {
    let padding = config.padding;
    SeekBarConfig {
        orientation: Orientation::Vertical,
        indicator_placement: Some(IndicatorPlacement::Right),
        padding: Padding {
            left: padding.top,
            top: padding.left,
            right: padding.bottom,
            bottom: padding.right,
        },
        max: 10,
        ..config.clone()
    }
}

pub fn build_bar(config: &SeekBarConfig) -> anyhow::Result<SeekBar> {
    let assets = default_assets(config.orientation);
    SeekBar::new(config, assets)
        .with_context(|| format!("Failed to build {} seek bar", config.orientation))
}

/// Attach the listener and the indicator label
pub fn wire_bar(bar: &mut SeekBar, events: SeekEventSender) {
    bar.set_listener(ChannelListener::new(events));
    bar.set_indicator_content(indicator_label);
}

/// Progress value centred in the indicator bubble
fn indicator_label(progress: i32, width: i32, _height: i32) -> Option<IndicatorText> {
    const SIZE: f32 = 14.0;
    let text = progress.to_string();
    // Rough advance of a digit at this size
    let text_width = text.len() as f32 * SIZE * 0.6;

    Some(
        IndicatorText::new(text)
            .color(Color::WHITE)
            .size(SIZE)
            .bold(true)
            .offset((width as f32 - text_width) / 2.0, 6.0),
    )
}

/// Start a thread that fills the bar from its current progress to `max`
pub fn spawn_download(handle: SeekBarHandle, max: i32) -> std::io::Result<Download> {
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = Arc::clone(&stop);

    let thread = std::thread::Builder::new()
        .name("download-sim".to_string())
        .spawn(move || {
            let start = handle.progress();
            tracing::info!("Download started at {}", start);
            for progress in start..=max {
                if thread_stop.load(Ordering::Relaxed) {
                    tracing::info!("Download cancelled at {}", progress);
                    return;
                }
                handle.set_progress(progress);
                std::thread::sleep(CHUNK_INTERVAL);
            }
            tracing::info!("Download finished");
        })?;

    Ok(Download { stop, thread })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_config_is_valid() {
        let config = vertical_config(&demo_config());
        assert!(config.validate().is_ok());
        assert_eq!(config.padding.top, 12);
        assert_eq!(config.padding.left, 4);
    }

    #[test]
    fn test_indicator_label_centres_text() {
        let label = indicator_label(42, 44, 28).unwrap();
        assert_eq!(label.text, "42");
        assert!(label.offset_x > 0.0);
        assert!(label.bold);
    }

    #[test]
    fn test_download_reaches_max() {
        let mut bar = build_bar(&demo_config()).unwrap();
        bar.set_range(0, 3);
        let download = spawn_download(bar.handle(), bar.max()).unwrap();
        download.thread.join().unwrap();

        bar.tick();
        assert_eq!(bar.progress(), 3);
    }
}
