//! Progress value and range bookkeeping
//!
//! Every write clamps; nothing here ever fails. The `bool`/`RangeChange` return values
//! are the only gate that keeps the widget from re-laying out for no-op writes.

/// Leveled assets express partial fill in `[0, MAX_LEVEL]`
pub const MAX_LEVEL: i32 = 10_000;

/// Outcome of a bounds change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeChange {
    /// `min` or `max` actually moved, so the visual scale changed
    pub range_changed: bool,
    /// Progress was pulled back inside the new bounds
    pub progress_clamped: bool,
}

impl RangeChange {
    pub fn any(&self) -> bool {
        self.range_changed || self.progress_clamped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressModel {
    min: i32,
    max: i32,
    progress: i32,
}

impl Default for ProgressModel {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            progress: 0,
        }
    }
}

impl ProgressModel {
    pub fn new(min: i32, max: i32, progress: i32) -> Self {
        let mut model = Self::default();
        model.set_range(min, max);
        model.set_progress(progress);
        model
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Store `value` clamped to the range; `false` when nothing changed
    pub fn set_progress(&mut self, value: i32) -> bool {
        let value = self.clamp(value);
        if value == self.progress {
            return false;
        }
        self.progress = value;
        true
    }

    /// Set both bounds; an inverted pair collapses `max` onto `min`
    pub fn set_range(&mut self, min: i32, max: i32) -> RangeChange {
        let max = max.max(min);
        let range_changed = min != self.min || max != self.max;
        self.min = min;
        self.max = max;
        RangeChange {
            range_changed,
            progress_clamped: self.reclamp(),
        }
    }

    /// Lower bound only; a value above `max` is pulled down to `max`
    pub fn set_min(&mut self, min: i32) -> RangeChange {
        let min = min.min(self.max);
        if min == self.min {
            return RangeChange::default();
        }
        self.min = min;
        RangeChange {
            range_changed: true,
            progress_clamped: self.reclamp(),
        }
    }

    /// Upper bound only; a value below `min` is pulled up to `min`
    pub fn set_max(&mut self, max: i32) -> RangeChange {
        let max = max.max(self.min);
        if max == self.max {
            return RangeChange::default();
        }
        self.max = max;
        RangeChange {
            range_changed: true,
            progress_clamped: self.reclamp(),
        }
    }

    fn reclamp(&mut self) -> bool {
        let clamped = self.clamp(self.progress);
        let moved = clamped != self.progress;
        self.progress = clamped;
        moved
    }

    /// Normalized position of `progress` in `[0, 1]`, `0` for an empty range
    pub fn to_visual(&self, progress: i32) -> f32 {
        let range = self.max as i64 - self.min as i64;
        if range > 0 {
            ((progress as i64 - self.min as i64) as f64 / range as f64) as f32
        } else {
            0.0
        }
    }

    pub fn visual(&self) -> f32 {
        self.to_visual(self.progress)
    }

    /// Progress value nearest to a normalized `scale`
    pub fn from_scale(&self, scale: f32) -> i32 {
        let range = (self.max as i64 - self.min as i64) as f64;
        let value = self.min as f64 + scale.clamp(0.0, 1.0) as f64 * range;
        self.clamp(value.round() as i32)
    }
}

/// Drive value for a leveled asset
pub fn to_level(visual: f32) -> i32 {
    (visual.clamp(0.0, 1.0) * MAX_LEVEL as f32).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_progress_clamps() {
        let mut model = ProgressModel::new(-10, 10, 0);
        for value in [-100, -11, -10, -3, 0, 7, 10, 11, i32::MAX, i32::MIN] {
            model.set_progress(value);
            assert_eq!(model.progress(), value.clamp(-10, 10));
        }
    }

    #[test]
    fn test_set_progress_same_value_is_noop() {
        let mut model = ProgressModel::default();
        assert!(model.set_progress(40));
        assert!(!model.set_progress(40));
        // Clamps onto the current value
        assert!(model.set_progress(500));
        assert!(!model.set_progress(101));
    }

    #[test]
    fn test_inverted_range_collapses() {
        let mut model = ProgressModel::default();
        let change = model.set_range(50, 20);
        assert_eq!((model.min(), model.max()), (50, 50));
        assert!(change.range_changed);
        assert!(change.progress_clamped);
        assert_eq!(model.progress(), 50);
    }

    #[test]
    fn test_set_min_and_max_clamp_each_other() {
        let mut model = ProgressModel::new(0, 100, 30);

        let change = model.set_min(200);
        assert_eq!(model.min(), 100);
        assert!(change.progress_clamped);
        assert_eq!(model.progress(), 100);

        let change = model.set_max(-5);
        assert_eq!(model.max(), 100);
        assert!(!change.any());
    }

    #[test]
    fn test_range_change_without_clamp() {
        let mut model = ProgressModel::new(0, 100, 30);
        let change = model.set_max(60);
        assert!(change.range_changed);
        assert!(!change.progress_clamped);
        assert_eq!(model.progress(), 30);
    }

    #[test]
    fn test_visual_is_monotonic() {
        let model = ProgressModel::new(-20, 80, 0);
        let mut last = -1.0;
        for p in -20..=80 {
            let visual = model.to_visual(p);
            assert!(visual > last);
            last = visual;
        }
        assert_eq!(model.to_visual(-20), 0.0);
        assert_eq!(model.to_visual(80), 1.0);
    }

    #[test]
    fn test_visual_of_empty_range() {
        let model = ProgressModel::new(5, 5, 5);
        assert_eq!(model.to_visual(5), 0.0);
        assert_eq!(model.from_scale(0.7), 5);
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(to_level(0.0), 0);
        assert_eq!(to_level(0.5), 5_000);
        assert_eq!(to_level(1.0), MAX_LEVEL);
        assert_eq!(to_level(0.25), 2_500);
        assert_eq!(to_level(1.7), MAX_LEVEL);
    }

    #[test]
    fn test_from_scale_rounds() {
        let model = ProgressModel::new(0, 100, 0);
        assert_eq!(model.from_scale(0.5), 50);
        assert_eq!(model.from_scale(0.004), 0);
        assert_eq!(model.from_scale(0.006), 1);
        assert_eq!(model.from_scale(1.0), 100);

        let model = ProgressModel::new(10, 20, 10);
        assert_eq!(model.from_scale(0.5), 15);
    }
}
