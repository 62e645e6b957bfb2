//! The seek bar itself
//!
//! [`SeekBar`] owns the four asset slots, the progress model, the drag controller and
//! the UI end of the update queue. It is a headless widget: the host feeds it a size,
//! pointer events and a per-frame [`SeekBar::tick`], and asks it to paint onto a
//! [`Surface`]. Instead of invalidation callbacks it raises two flags the host polls:
//! [`SeekBar::take_redraw`] and [`SeekBar::take_layout_request`].

use std::sync::Arc;

use super::asset::{
    LayerRole, LayoutDirection, StateSet, Surface, TextRun, Tint, VisualAsset,
};
use super::config::SeekBarConfig;
use super::drag::{DragAction, DragController, PointerEvent};
use super::error::Result;
use super::events::{IndicatorContentProvider, SeekBarId, SeekBarListener};
use super::geometry::{
    Geometry, IndicatorPlacement, MeasureSpec, Orientation, Padding, Rect, Size,
};
use super::progress::{ProgressModel, RangeChange, to_level};
use super::update_queue::{DrainReceiver, PendingUpdate, Push, SeekBarHandle, UpdateQueue};

pub type BoxedAsset = Box<dyn VisualAsset>;

/// Assets installed at construction
#[derive(Debug, Default)]
pub struct SeekBarAssets {
    pub track: Option<BoxedAsset>,
    pub thumb: Option<BoxedAsset>,
    pub tick_mark: Option<BoxedAsset>,
    pub indicator: Option<BoxedAsset>,
}

/// Tint per slot; the track slot has separate fill and background tints
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SlotTints {
    track: Tint,
    track_background: Tint,
    thumb: Tint,
    tick_mark: Tint,
    indicator: Tint,
}

pub struct SeekBar {
    id: SeekBarId,
    geometry: Geometry,
    model: ProgressModel,
    drag: DragController,
    queue: Arc<UpdateQueue>,
    drain_rx: DrainReceiver,

    track: Option<BoxedAsset>,
    thumb: Option<BoxedAsset>,
    tick_mark: Option<BoxedAsset>,
    indicator: Option<BoxedAsset>,
    tints: SlotTints,

    listener: Option<Box<dyn SeekBarListener>>,
    indicator_content: Option<Box<dyn IndicatorContentProvider>>,

    enabled: bool,
    user_seekable: bool,
    indicator_shown: bool,
    pressed: bool,
    direction: LayoutDirection,

    needs_redraw: bool,
    needs_layout: bool,
}

impl std::fmt::Debug for SeekBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeekBar")
            .field("id", &self.id)
            .field("orientation", &self.geometry.orientation)
            .field("placement", &self.geometry.placement)
            .field("size", &self.geometry.size)
            .field("model", &self.model)
            .field("enabled", &self.enabled)
            .field("user_seekable", &self.user_seekable)
            .finish_non_exhaustive()
    }
}

impl SeekBar {
    /// Build a seek bar on the calling (UI) thread
    ///
    /// Fails when the indicator placement does not fit the orientation or a configured
    /// tint color cannot be parsed.
    pub fn new(config: &SeekBarConfig, assets: SeekBarAssets) -> Result<Self> {
        let placement = config.placement()?;
        let tints = SlotTints {
            track: config.track.resolve()?,
            track_background: config.track_background.resolve()?,
            thumb: config.thumb.resolve()?,
            tick_mark: config.tick_mark.resolve()?,
            indicator: config.indicator.resolve()?,
        };
        Ok(Self::build(config, placement, tints, assets))
    }

    /// Default configuration for `orientation`; cannot fail
    pub fn with_defaults(orientation: Orientation, assets: SeekBarAssets) -> Self {
        let config = SeekBarConfig {
            orientation,
            ..Default::default()
        };
        let placement = IndicatorPlacement::default_for(orientation);
        Self::build(&config, placement, SlotTints::default(), assets)
    }

    fn build(
        config: &SeekBarConfig,
        placement: IndicatorPlacement,
        tints: SlotTints,
        assets: SeekBarAssets,
    ) -> Self {
        let mut geometry = Geometry::new(config.orientation, placement);
        geometry.padding = config.padding;
        geometry.min_size = config.min_size();
        geometry.max_size = config.max_size();
        geometry.indicator_offset = config.indicator_offset;

        let model = ProgressModel::new(config.min, config.max, config.progress);
        let (queue, drain_rx) = UpdateQueue::new(model.progress(), config.max_pending_updates);

        let mut bar = Self {
            id: SeekBarId::next(),
            geometry,
            model,
            drag: DragController::new(config.touch_slop),
            queue,
            drain_rx,
            track: None,
            thumb: None,
            tick_mark: None,
            indicator: None,
            tints,
            listener: None,
            indicator_content: None,
            enabled: true,
            user_seekable: config.user_seekable,
            indicator_shown: config.show_indicator,
            pressed: false,
            direction: LayoutDirection::default(),
            needs_redraw: true,
            needs_layout: true,
        };

        bar.set_track(assets.track);
        bar.set_thumb(assets.thumb);
        bar.set_tick_mark(assets.tick_mark);
        bar.set_indicator(assets.indicator);
        if let Some(offset) = config.thumb_offset {
            bar.set_thumb_offset(offset);
        }

        tracing::debug!(
            "Created seek bar {:?} ({}, indicator {})",
            bar.id,
            bar.geometry.orientation,
            bar.geometry.placement
        );
        bar
    }

    pub fn id(&self) -> SeekBarId {
        self.id
    }

    /// Cross-thread handle for progress producers
    pub fn handle(&self) -> SeekBarHandle {
        SeekBarHandle::new(self.id, Arc::clone(&self.queue))
    }

    pub fn orientation(&self) -> Orientation {
        self.geometry.orientation
    }

    pub fn placement(&self) -> IndicatorPlacement {
        self.geometry.placement
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn size(&self) -> Size {
        self.geometry.size
    }

    pub fn set_listener(&mut self, listener: impl SeekBarListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn set_indicator_content(&mut self, provider: impl IndicatorContentProvider + 'static) {
        self.indicator_content = Some(Box::new(provider));
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Progress
    // ------------------------------------------------------------------

    pub fn progress(&self) -> i32 {
        self.model.progress()
    }

    pub fn min(&self) -> i32 {
        self.model.min()
    }

    pub fn max(&self) -> i32 {
        self.model.max()
    }

    /// Normalized position in `[0, 1]`
    pub fn visual_progress(&self) -> f32 {
        self.model.visual()
    }

    /// Set the progress from code; returns whether the value changed
    pub fn set_progress(&mut self, progress: i32) -> bool {
        self.push(PendingUpdate::new(progress))
    }

    pub fn set_progress_by(&mut self, delta: i32) -> bool {
        self.set_progress(self.model.progress().saturating_add(delta))
    }

    fn push(&mut self, update: PendingUpdate) -> bool {
        match self.queue.push(update) {
            Push::Bypass(update) => self.apply_update(update),
            Push::Queued { .. } => false,
        }
    }

    fn apply_update(&mut self, update: PendingUpdate) -> bool {
        self.apply_progress(update.progress, update.from_user)
    }

    /// Single-threaded apply path shared by direct sets, drains and drags
    fn apply_progress(&mut self, progress: i32, from_user: bool) -> bool {
        if !self.model.set_progress(progress) {
            return false;
        }
        self.queue.store_applied(self.model.progress());
        self.refresh_visuals();
        self.notify_progress(from_user);
        true
    }

    fn notify_progress(&mut self, from_user: bool) {
        let progress = self.model.progress();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_progress_changed(self.id, progress, from_user);
        }
    }

    pub fn set_range(&mut self, min: i32, max: i32) {
        let change = self.model.set_range(min, max);
        self.on_range_change(change);
    }

    pub fn set_min(&mut self, min: i32) {
        let change = self.model.set_min(min);
        self.on_range_change(change);
    }

    pub fn set_max(&mut self, max: i32) {
        let change = self.model.set_max(max);
        self.on_range_change(change);
    }

    fn on_range_change(&mut self, change: RangeChange) {
        if !change.any() {
            return;
        }
        self.queue.store_applied(self.model.progress());
        self.refresh_visuals();
        if change.progress_clamped {
            self.notify_progress(false);
        }
    }

    /// Push the current progress into the track level and the moving bounds
    fn refresh_visuals(&mut self) {
        let visual = self.model.visual();
        if let Some(track) = self.track.as_mut() {
            track.set_level(to_level(visual));
        }
        self.layout_moving(visual);
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Update queue
    // ------------------------------------------------------------------

    /// Per-frame hook: drain queued updates if a drain was scheduled
    ///
    /// Returns the number of updates applied.
    pub fn tick(&mut self) -> usize {
        let mut scheduled = false;
        while self.drain_rx.try_recv().is_ok() {
            scheduled = true;
        }
        if !scheduled {
            return 0;
        }
        self.drain()
    }

    /// Apply every pending update in push order
    pub fn drain(&mut self) -> usize {
        let batch = self.queue.take_batch();
        let count = batch.len();
        for update in batch {
            self.apply_update(update);
        }
        if count > 0 {
            tracing::debug!("Drained {} progress updates for {:?}", count, self.id);
        }
        count
    }

    /// Host attach/detach notification
    pub fn set_attached(&mut self, attached: bool) {
        self.queue.set_attached(attached);
        if !attached {
            self.cancel_gesture();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.queue.is_attached()
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Feed a pointer event in widget-local coordinates
    ///
    /// Returns `false` (unhandled) only when the widget is disabled or not user seekable.
    pub fn on_pointer(&mut self, event: PointerEvent) -> bool {
        if !self.enabled || !self.user_seekable {
            return false;
        }

        let actions = self.drag.handle(event, self.geometry.orientation);
        self.run_actions(actions);
        true
    }

    /// End a gesture the host interrupted, as a pointer cancel would
    fn cancel_gesture(&mut self) {
        let actions = self.drag.cancel();
        self.run_actions(actions);
    }

    fn run_actions(&mut self, actions: Vec<DragAction>) {
        if actions.is_empty() {
            return;
        }
        for action in actions {
            match action {
                DragAction::SetPressed(pressed) => self.set_pressed(pressed),
                DragAction::StartTracking => {
                    if let Some(listener) = self.listener.as_mut() {
                        listener.on_start_tracking_touch(self.id);
                    }
                }
                DragAction::Track(position) => {
                    let scale = self.geometry.scale_at(position);
                    let progress = self.model.from_scale(scale);
                    self.apply_progress(progress, true);
                }
                DragAction::StopTracking => {
                    if let Some(listener) = self.listener.as_mut() {
                        listener.on_stop_tracking_touch(self.id);
                    }
                }
            }
        }
        self.needs_redraw = true;
    }

    /// Whether the seek bar currently owns the pointer stream
    pub fn has_claimed_input(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_tracking(&self) -> bool {
        self.drag.is_dragging() || self.drag.is_armed()
    }

    pub fn set_in_scrollable_container(&mut self, in_scroller: bool) {
        self.drag.set_in_scrollable_container(in_scroller);
    }

    pub fn is_user_seekable(&self) -> bool {
        self.user_seekable
    }

    pub fn set_user_seekable(&mut self, seekable: bool) {
        if !seekable {
            self.cancel_gesture();
        }
        self.user_seekable = seekable;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        if !enabled {
            self.cancel_gesture();
            self.pressed = false;
        }
        self.enabled = enabled;
        self.refresh_state();
        self.needs_redraw = true;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.refresh_state();
        }
    }

    fn state(&self) -> StateSet {
        StateSet {
            enabled: self.enabled,
            pressed: self.pressed,
        }
    }

    /// Forward the widget state to every stateful asset
    fn refresh_state(&mut self) {
        let state = self.state();
        let mut changed = false;
        for asset in self.assets_mut() {
            if asset.is_stateful() {
                changed |= asset.set_state(state);
            }
        }
        if changed {
            self.needs_redraw = true;
        }
    }

    fn assets_mut(&mut self) -> impl Iterator<Item = &mut BoxedAsset> {
        [
            self.track.as_mut(),
            self.thumb.as_mut(),
            self.tick_mark.as_mut(),
            self.indicator.as_mut(),
        ]
        .into_iter()
        .flatten()
    }

    // ------------------------------------------------------------------
    // Assets
    // ------------------------------------------------------------------

    /// Prepare a freshly assigned asset: direction, state and tint
    fn adopt(&self, asset: &mut dyn VisualAsset, tint: Tint) {
        asset.set_layout_direction(self.direction);
        apply_tint(asset, tint, self.state());
        if asset.is_stateful() {
            asset.set_state(self.state());
        }
    }

    pub fn set_track(&mut self, track: Option<BoxedAsset>) {
        self.track = track;
        if let Some(mut track) = self.track.take() {
            track.set_layout_direction(self.direction);
            self.apply_track_tints(track.as_mut());
            if track.is_stateful() {
                track.set_state(self.state());
            }
            track.set_level(to_level(self.model.visual()));

            // A track that cannot be drawn inside the current bounds widens them
            let (min_w, min_h) = track.minimum_size();
            let max = &mut self.geometry.max_size;
            if max.width < min_w || max.height < min_h {
                max.width = max.width.max(min_w);
                max.height = max.height.max(min_h);
                tracing::debug!("Track raised the max size to {:?}", *max);
            }
            self.track = Some(track);
        }
        self.request_layout();
    }

    fn apply_track_tints(&self, track: &mut dyn VisualAsset) {
        let state = self.state();
        if self.tints.track.is_set() {
            match track.layer_mut(LayerRole::TrackFill) {
                Some(fill) => apply_tint(fill, self.tints.track, state),
                None => apply_tint(track, self.tints.track, state),
            };
        }
        // The background has no whole-asset fallback
        if self.tints.track_background.is_set() {
            if let Some(background) = track.layer_mut(LayerRole::TrackBackground) {
                apply_tint(background, self.tints.track_background, state);
            }
        }
    }

    /// Replace the thumb and reset the thumb offset to half its width
    pub fn set_thumb(&mut self, thumb: Option<BoxedAsset>) {
        let size_changed = match (&self.thumb, &thumb) {
            (Some(old), Some(new)) => {
                old.intrinsic_width() != new.intrinsic_width()
                    || old.intrinsic_height() != new.intrinsic_height()
            }
            (None, None) => false,
            _ => true,
        };

        self.thumb = thumb;
        if let Some(mut thumb) = self.thumb.take() {
            self.adopt(thumb.as_mut(), self.tints.thumb);
            self.geometry.thumb_offset = thumb.intrinsic_width().max(0) / 2;
            self.thumb = Some(thumb);
        }

        if size_changed {
            tracing::debug!("Thumb size changed, requesting layout");
            self.request_layout();
        } else {
            self.layout();
        }
    }

    pub fn set_tick_mark(&mut self, tick_mark: Option<BoxedAsset>) {
        self.tick_mark = tick_mark;
        if let Some(mut tick) = self.tick_mark.take() {
            self.adopt(tick.as_mut(), self.tints.tick_mark);
            self.tick_mark = Some(tick);
        }
        self.layout();
    }

    pub fn set_indicator(&mut self, indicator: Option<BoxedAsset>) {
        self.indicator = indicator;
        if let Some(mut indicator) = self.indicator.take() {
            self.adopt(indicator.as_mut(), self.tints.indicator);
            self.indicator = Some(indicator);
        }
        self.request_layout();
    }

    pub fn track(&self) -> Option<&dyn VisualAsset> {
        self.track.as_deref()
    }

    pub fn thumb(&self) -> Option<&dyn VisualAsset> {
        self.thumb.as_deref()
    }

    pub fn tick_mark(&self) -> Option<&dyn VisualAsset> {
        self.tick_mark.as_deref()
    }

    pub fn indicator(&self) -> Option<&dyn VisualAsset> {
        self.indicator.as_deref()
    }

    // ------------------------------------------------------------------
    // Tints
    // ------------------------------------------------------------------

    /// Tint for the track's fill layer (or the whole track when it has no layers)
    pub fn set_track_tint(&mut self, tint: Tint) {
        self.tints.track = tint;
        self.reapply_track_tints();
    }

    pub fn set_track_background_tint(&mut self, tint: Tint) {
        self.tints.track_background = tint;
        self.reapply_track_tints();
    }

    fn reapply_track_tints(&mut self) {
        if let Some(mut track) = self.track.take() {
            self.apply_track_tints(track.as_mut());
            self.track = Some(track);
            self.needs_redraw = true;
        }
    }

    pub fn set_thumb_tint(&mut self, tint: Tint) {
        self.tints.thumb = tint;
        let state = self.state();
        if let Some(thumb) = self.thumb.as_mut() {
            self.needs_redraw |= apply_tint(thumb.as_mut(), tint, state);
        }
    }

    pub fn set_tick_mark_tint(&mut self, tint: Tint) {
        self.tints.tick_mark = tint;
        let state = self.state();
        if let Some(tick) = self.tick_mark.as_mut() {
            self.needs_redraw |= apply_tint(tick.as_mut(), tint, state);
        }
    }

    pub fn set_indicator_tint(&mut self, tint: Tint) {
        self.tints.indicator = tint;
        let state = self.state();
        if let Some(indicator) = self.indicator.as_mut() {
            self.needs_redraw |= apply_tint(indicator.as_mut(), tint, state);
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    pub fn thumb_offset(&self) -> i32 {
        self.geometry.thumb_offset
    }

    pub fn set_thumb_offset(&mut self, offset: i32) {
        if self.geometry.thumb_offset != offset {
            self.geometry.thumb_offset = offset;
            self.layout();
        }
    }

    pub fn indicator_offset(&self) -> i32 {
        self.geometry.indicator_offset
    }

    pub fn set_indicator_offset(&mut self, offset: i32) {
        if self.geometry.indicator_offset != offset {
            self.geometry.indicator_offset = offset;
            self.request_layout();
        }
    }

    pub fn padding(&self) -> Padding {
        self.geometry.padding
    }

    pub fn set_padding(&mut self, padding: Padding) {
        if self.geometry.padding != padding {
            self.geometry.padding = padding;
            self.request_layout();
        }
    }

    pub fn is_indicator_shown(&self) -> bool {
        self.indicator_shown
    }

    /// The indicator keeps its layout space while hidden
    pub fn show_indicator(&mut self) {
        self.indicator_shown = true;
        self.needs_redraw = true;
    }

    pub fn hide_indicator(&mut self) {
        self.indicator_shown = false;
        self.needs_redraw = true;
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        if self.direction == direction {
            return;
        }
        self.direction = direction;
        for asset in self.assets_mut() {
            asset.set_layout_direction(direction);
        }
        self.needs_redraw = true;
    }

    /// Host-assigned size (padding included)
    pub fn set_size(&mut self, width: i32, height: i32) {
        let size = Size::new(width, height);
        if self.geometry.size != size {
            self.geometry.size = size;
            self.layout();
        }
    }

    /// Desired size under the host's constraints
    pub fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        self.sync_intrinsic_sizes();
        self.geometry.measure(width, height)
    }

    fn sync_intrinsic_sizes(&mut self) {
        let intrinsic =
            |asset: &BoxedAsset| Size::new(asset.intrinsic_width(), asset.intrinsic_height());
        self.geometry.track = self.track.as_ref().map(intrinsic);
        self.geometry.thumb = self.thumb.as_ref().map(intrinsic);
        self.geometry.indicator = self.indicator.as_ref().map(intrinsic);
    }

    fn request_layout(&mut self) {
        self.needs_layout = true;
        self.layout();
    }

    /// Recompute every asset's bounds for the current size and progress
    pub fn layout(&mut self) {
        self.sync_intrinsic_sizes();

        let track_bounds = self.geometry.layout_track();
        if let Some(track) = self.track.as_mut() {
            track.set_bounds(track_bounds);
        }

        if let Some(tick) = self.tick_mark.as_mut() {
            // Ticks without an intrinsic size get a 2 px dot
            let width = Some(tick.intrinsic_width()).filter(|w| *w > 0).unwrap_or(2);
            let height = Some(tick.intrinsic_height()).filter(|h| *h > 0).unwrap_or(2);
            tick.set_bounds(Rect::centered(width, height));
        }

        self.layout_moving(self.model.visual());
        self.needs_redraw = true;
    }

    /// Bounds that follow the progress: thumb and indicator
    fn layout_moving(&mut self, visual: f32) {
        if let (Some(thumb), Some(bounds)) =
            (self.thumb.as_mut(), self.geometry.layout_thumb(visual))
        {
            thumb.set_bounds(bounds);
        }
        if let (Some(indicator), Some(bounds)) = (
            self.indicator.as_mut(),
            self.geometry.layout_indicator(visual),
        ) {
            indicator.set_bounds(bounds);
        }
    }

    // ------------------------------------------------------------------
    // Signals
    // ------------------------------------------------------------------

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_layout)
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Number of tick intervals, or `None` when ticks are not drawn
    fn tick_count(&self) -> Option<i32> {
        self.tick_mark.as_ref()?;
        let count = self.model.max().saturating_sub(self.model.min());
        (count > 1).then_some(count)
    }

    /// Paint in order: track, ticks, thumb, indicator and its text
    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(track) = self.track.as_ref() {
            track.draw(surface);
        }

        if let (Some(tick), Some(count)) = (self.tick_mark.as_ref(), self.tick_count()) {
            for (x, y) in self.geometry.tick_centers(count) {
                surface.save();
                surface.translate(x as f32, y as f32);
                tick.draw(surface);
                surface.restore();
            }
        }

        if let Some(thumb) = self.thumb.as_ref() {
            thumb.draw(surface);
        }

        if !self.indicator_shown {
            return;
        }
        if let Some(indicator) = self.indicator.as_ref() {
            indicator.draw(surface);
            self.draw_indicator_text(indicator.bounds(), surface);
        }
    }

    fn draw_indicator_text(&self, bounds: Rect, surface: &mut dyn Surface) {
        let Some(provider) = self.indicator_content.as_ref() else {
            return;
        };
        let Some(text) =
            provider.indicator_content(self.model.progress(), bounds.width(), bounds.height())
        else {
            return;
        };
        if text.text.is_empty() {
            return;
        }

        surface.draw_text(&TextRun {
            x: bounds.left as f32 + text.offset_x,
            y: bounds.top as f32 + text.offset_y + text.text_size,
            size: text.text_size,
            color: text.text_color,
            bold: text.bold,
            content: text.text,
        });
    }
}

/// Apply a slot tint; returns whether anything was applied
fn apply_tint(asset: &mut dyn VisualAsset, tint: Tint, state: StateSet) -> bool {
    if !tint.is_set() {
        return false;
    }
    asset.set_tint(tint.list, tint.mode);
    if asset.is_stateful() {
        asset.set_state(state);
    }
    true
}

#[cfg(test)]
mod tests {
    use std::thread;

    use iced::Color;

    use super::*;
    use crate::seekbar::asset::{TintList, TintMode};
    use crate::seekbar::error::SeekBarError;
    use crate::seekbar::events::{
        ChannelListener, IndicatorText, SeekEvent, SeekEventReceiver, seek_event_channel,
    };
    use crate::seekbar::shapes::{LayeredTrack, ShapeAsset};

    const TRACK_BG: Color = Color::from_rgb(0.2, 0.2, 0.2);
    const TRACK_FILL: Color = Color::from_rgb(0.0, 0.0, 1.0);
    const TICK: Color = Color::from_rgb(0.5, 0.5, 0.5);
    const THUMB: Color = Color::from_rgb(1.0, 1.0, 1.0);
    const INDICATOR: Color = Color::from_rgb(1.0, 0.0, 0.0);

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect(Rect, Color),
        Text(String),
        Save,
        Restore,
        Translate(f32, f32),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn colors(&self) -> Vec<Color> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Rect(_, color) => Some(*color),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color, _corner_radius: f32) {
            self.ops.push(Op::Rect(rect, color));
        }
        fn draw_text(&mut self, text: &TextRun) {
            self.ops.push(Op::Text(text.content.clone()));
        }
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }
        fn translate(&mut self, dx: f32, dy: f32) {
            self.ops.push(Op::Translate(dx, dy));
        }
    }

    fn layered_track(orientation: Orientation) -> BoxedAsset {
        Box::new(LayeredTrack::new(
            ShapeAsset::new(-1, 4, TRACK_BG),
            ShapeAsset::new(-1, 4, TRACK_FILL),
            orientation,
        ))
    }

    fn basic_assets() -> SeekBarAssets {
        SeekBarAssets {
            track: Some(layered_track(Orientation::Horizontal)),
            thumb: Some(Box::new(ShapeAsset::new(20, 20, THUMB))),
            ..Default::default()
        }
    }

    fn listen(bar: &mut SeekBar) -> SeekEventReceiver {
        let (tx, rx) = seek_event_channel();
        bar.set_listener(ChannelListener::new(tx));
        rx
    }

    fn drain_events(rx: &mut SeekEventReceiver) -> Vec<SeekEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn progress_events(events: &[SeekEvent]) -> Vec<(i32, bool)> {
        events
            .iter()
            .filter_map(|event| match event {
                SeekEvent::ProgressChanged {
                    progress,
                    from_user,
                    ..
                } => Some((*progress, *from_user)),
                _ => None,
            })
            .collect()
    }

    /// `(start, stop)` tracking notifications for `id`
    fn tracking_counts(events: &[SeekEvent], id: SeekBarId) -> (usize, usize) {
        let starts = events
            .iter()
            .filter(|e| **e == SeekEvent::StartTrackingTouch { bar: id })
            .count();
        let stops = events
            .iter()
            .filter(|e| **e == SeekEvent::StopTrackingTouch { bar: id })
            .count();
        (starts, stops)
    }

    #[test]
    fn test_press_in_the_middle() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        let mut rx = listen(&mut bar);
        bar.set_size(200, 20);
        assert_eq!(bar.thumb_offset(), 10);

        assert!(bar.on_pointer(PointerEvent::Down { x: 100.0, y: 10.0 }));
        assert_eq!(bar.progress(), 50);

        let events = drain_events(&mut rx);
        assert_eq!(progress_events(&events), vec![(50, true)]);
        assert_eq!(events[0], SeekEvent::StartTrackingTouch { bar: bar.id() });
        assert!(bar.has_claimed_input());
    }

    #[test]
    fn test_placement_mismatch_fails() {
        let config = SeekBarConfig {
            orientation: Orientation::Vertical,
            indicator_placement: Some(IndicatorPlacement::Top),
            ..Default::default()
        };
        assert!(matches!(
            SeekBar::new(&config, SeekBarAssets::default()),
            Err(SeekBarError::PlacementMismatch { .. })
        ));

        let config = SeekBarConfig {
            orientation: Orientation::Horizontal,
            indicator_placement: Some(IndicatorPlacement::Bottom),
            ..Default::default()
        };
        assert!(SeekBar::new(&config, SeekBarAssets::default()).is_ok());

        let bar = SeekBar::with_defaults(Orientation::Vertical, SeekBarAssets::default());
        assert_eq!(bar.placement(), IndicatorPlacement::Left);
    }

    #[test]
    fn test_set_progress_noop_and_clamp() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        let mut rx = listen(&mut bar);

        assert!(bar.set_progress(30));
        assert!(!bar.set_progress(30));
        assert!(bar.set_progress(1_000));
        assert_eq!(bar.progress(), 100);
        assert!(bar.set_progress_by(-25));
        assert_eq!(bar.progress(), 75);

        assert_eq!(
            progress_events(&drain_events(&mut rx)),
            vec![(30, false), (100, false), (75, false)]
        );
        assert_eq!(bar.handle().progress(), 75);
    }

    #[test]
    fn test_range_change_notifies_only_on_clamp() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_progress(80);
        let mut rx = listen(&mut bar);

        bar.set_max(60);
        assert_eq!(bar.progress(), 60);
        bar.set_max(90);
        bar.set_min(10);
        assert_eq!((bar.min(), bar.max(), bar.progress()), (10, 90, 60));

        assert_eq!(progress_events(&drain_events(&mut rx)), vec![(60, false)]);
    }

    #[test]
    fn test_drag_lifecycle_in_scroller() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_size(200, 20);
        bar.set_in_scrollable_container(true);
        let mut rx = listen(&mut bar);

        assert!(bar.on_pointer(PointerEvent::Down { x: 20.0, y: 10.0 }));
        assert!(bar.is_tracking());
        assert!(!bar.has_claimed_input());
        assert!(bar.on_pointer(PointerEvent::Move { x: 24.0, y: 10.0 }));
        assert_eq!(bar.progress(), 0);
        assert!(bar.on_pointer(PointerEvent::Move { x: 60.0, y: 10.0 }));
        assert!(bar.on_pointer(PointerEvent::Up { x: 100.0, y: 10.0 }));

        let events = drain_events(&mut rx);
        let id = bar.id();
        let starts = events
            .iter()
            .filter(|e| **e == SeekEvent::StartTrackingTouch { bar: id })
            .count();
        let stops = events
            .iter()
            .filter(|e| **e == SeekEvent::StopTrackingTouch { bar: id })
            .count();
        assert_eq!((starts, stops), (1, 1));
        assert_eq!(progress_events(&events), vec![(30, true), (50, true)]);
        assert_eq!(
            events.last(),
            Some(&SeekEvent::StopTrackingTouch { bar: id })
        );
    }

    #[test]
    fn test_disabled_ignores_pointer() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_size(200, 20);
        let mut rx = listen(&mut bar);

        bar.set_enabled(false);
        assert!(!bar.on_pointer(PointerEvent::Down { x: 100.0, y: 10.0 }));

        bar.set_enabled(true);
        bar.set_user_seekable(false);
        assert!(!bar.on_pointer(PointerEvent::Down { x: 100.0, y: 10.0 }));

        assert_eq!(bar.progress(), 0);
        assert!(drain_events(&mut rx).is_empty());
    }

    #[test]
    fn test_pointer_cancel_ends_drag() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_size(200, 20);
        let mut rx = listen(&mut bar);

        assert!(bar.on_pointer(PointerEvent::Down { x: 50.0, y: 10.0 }));
        assert!(bar.is_pressed());
        assert!(bar.on_pointer(PointerEvent::Cancel));

        assert!(!bar.is_pressed());
        assert!(!bar.has_claimed_input());
        assert_eq!(bar.progress(), 25);

        let events = drain_events(&mut rx);
        assert_eq!(tracking_counts(&events, bar.id()), (1, 1));
        assert_eq!(progress_events(&events), vec![(25, true)]);
        assert_eq!(
            events.last(),
            Some(&SeekEvent::StopTrackingTouch { bar: bar.id() })
        );
    }

    #[test]
    fn test_tap_inside_scroller_reports_one_gesture() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_size(200, 20);
        bar.set_in_scrollable_container(true);
        let mut rx = listen(&mut bar);

        assert!(bar.on_pointer(PointerEvent::Down { x: 100.0, y: 10.0 }));
        assert!(!bar.is_pressed());
        assert!(bar.on_pointer(PointerEvent::Up { x: 102.0, y: 10.0 }));

        assert!(!bar.is_pressed());
        assert!(!bar.is_tracking());
        assert_eq!(bar.progress(), 51);

        let events = drain_events(&mut rx);
        assert_eq!(tracking_counts(&events, bar.id()), (1, 1));
        assert_eq!(progress_events(&events), vec![(51, true)]);
    }

    #[test]
    fn test_interrupted_drag_ends_gesture() {
        let interrupts: [fn(&mut SeekBar); 3] = [
            |bar| bar.set_user_seekable(false),
            |bar| bar.set_enabled(false),
            |bar| bar.set_attached(false),
        ];

        for interrupt in interrupts {
            let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
            bar.set_size(200, 20);
            let mut rx = listen(&mut bar);

            assert!(bar.on_pointer(PointerEvent::Down { x: 50.0, y: 10.0 }));
            assert!(bar.is_pressed());
            interrupt(&mut bar);

            assert!(!bar.is_pressed());
            assert!(!bar.has_claimed_input());
            let events = drain_events(&mut rx);
            assert_eq!(tracking_counts(&events, bar.id()), (1, 1));
            assert_eq!(
                events.last(),
                Some(&SeekEvent::StopTrackingTouch { bar: bar.id() })
            );
        }
    }

    #[test]
    fn test_interrupt_without_drag_is_silent() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_size(200, 20);
        bar.set_in_scrollable_container(true);
        let mut rx = listen(&mut bar);

        bar.set_attached(false);
        assert!(bar.on_pointer(PointerEvent::Down { x: 50.0, y: 10.0 }));
        bar.set_user_seekable(false);

        assert!(!bar.is_tracking());
        assert!(drain_events(&mut rx).is_empty());
    }

    #[test]
    fn test_stray_events_are_handled() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_size(200, 20);
        let mut rx = listen(&mut bar);

        assert!(bar.on_pointer(PointerEvent::Move { x: 40.0, y: 10.0 }));
        assert!(bar.on_pointer(PointerEvent::Up { x: 40.0, y: 10.0 }));
        assert!(bar.on_pointer(PointerEvent::Cancel));

        assert_eq!(bar.progress(), 0);
        assert!(drain_events(&mut rx).is_empty());
    }

    #[test]
    fn test_background_updates_drain_on_tick() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        let mut rx = listen(&mut bar);
        let handle = bar.handle();

        thread::spawn(move || {
            for progress in [10, 20, 30] {
                handle.set_progress(progress);
            }
        })
        .join()
        .unwrap();

        assert_eq!(bar.progress(), 0);
        assert_eq!(bar.tick(), 3);
        assert_eq!(bar.progress(), 30);
        assert_eq!(bar.tick(), 0);

        assert_eq!(
            progress_events(&drain_events(&mut rx)),
            vec![(10, false), (20, false), (30, false)]
        );
        assert_eq!(bar.handle().progress(), 30);
    }

    #[test]
    fn test_detached_updates_apply_after_reattach() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_attached(false);
        let handle = bar.handle();

        thread::spawn(move || handle.set_progress(40)).join().unwrap();
        assert_eq!(bar.tick(), 0);
        assert_eq!(bar.progress(), 0);

        bar.set_attached(true);
        assert_eq!(bar.tick(), 1);
        assert_eq!(bar.progress(), 40);
    }

    #[test]
    fn test_paint_order() {
        let config = SeekBarConfig {
            max: 4,
            ..Default::default()
        };
        let assets = SeekBarAssets {
            track: Some(layered_track(Orientation::Horizontal)),
            thumb: Some(Box::new(ShapeAsset::new(20, 20, THUMB))),
            tick_mark: Some(Box::new(ShapeAsset::new(2, 2, TICK))),
            indicator: Some(Box::new(ShapeAsset::new(30, 20, INDICATOR))),
        };
        let mut bar = SeekBar::new(&config, assets).unwrap();
        bar.set_indicator_content(|progress: i32, _w: i32, _h: i32| {
            Some(IndicatorText::new(progress.to_string()))
        });
        bar.set_size(200, 60);
        bar.set_progress(2);

        let mut recorder = Recorder::default();
        bar.draw(&mut recorder);

        let mut expected = vec![TRACK_BG, TRACK_FILL];
        expected.extend([TICK; 5]);
        expected.extend([THUMB, INDICATOR]);
        assert_eq!(recorder.colors(), expected);
        assert_eq!(recorder.ops.last(), Some(&Op::Text("2".to_string())));
        assert_eq!(recorder.ops.iter().filter(|op| **op == Op::Save).count(), 5);
        assert_eq!(
            recorder.ops.iter().filter(|op| **op == Op::Restore).count(),
            5
        );
    }

    #[test]
    fn test_empty_indicator_text_is_skipped() {
        let assets = SeekBarAssets {
            indicator: Some(Box::new(ShapeAsset::new(30, 20, INDICATOR))),
            ..basic_assets()
        };
        let mut bar = SeekBar::new(&SeekBarConfig::default(), assets).unwrap();
        bar.set_indicator_content(|_progress: i32, _w: i32, _h: i32| {
            Some(IndicatorText::new(""))
        });
        bar.set_size(200, 60);

        let mut recorder = Recorder::default();
        bar.draw(&mut recorder);

        assert!(recorder.colors().contains(&INDICATOR));
        assert!(!recorder.ops.iter().any(|op| matches!(op, Op::Text(_))));
    }

    #[test]
    fn test_hidden_indicator_keeps_space() {
        let assets = SeekBarAssets {
            track: Some(layered_track(Orientation::Horizontal)),
            indicator: Some(Box::new(ShapeAsset::new(30, 20, INDICATOR))),
            ..Default::default()
        };
        let mut bar = SeekBar::new(&SeekBarConfig::default(), assets).unwrap();
        bar.set_size(200, 60);
        let track_top = bar.track().unwrap().bounds().top;
        assert_eq!(track_top, 20);

        bar.hide_indicator();
        bar.layout();
        assert_eq!(bar.track().unwrap().bounds().top, track_top);

        let mut recorder = Recorder::default();
        bar.draw(&mut recorder);
        assert!(!recorder.colors().contains(&INDICATOR));
    }

    #[test]
    fn test_missing_assets_are_skipped() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), SeekBarAssets::default()).unwrap();
        bar.set_size(200, 20);
        bar.set_progress(50);

        let mut recorder = Recorder::default();
        bar.draw(&mut recorder);
        assert!(recorder.ops.is_empty());
    }

    #[test]
    fn test_set_thumb_resets_offset() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_thumb_offset(3);
        bar.take_layout_request();

        bar.set_thumb(Some(Box::new(ShapeAsset::new(20, 20, THUMB))));
        assert_eq!(bar.thumb_offset(), 10);
        assert!(!bar.take_layout_request());

        bar.set_thumb(Some(Box::new(ShapeAsset::new(32, 32, THUMB))));
        assert_eq!(bar.thumb_offset(), 16);
        assert!(bar.take_layout_request());
    }

    #[test]
    fn test_configured_thumb_offset_wins() {
        let config = SeekBarConfig {
            thumb_offset: Some(0),
            ..Default::default()
        };
        let bar = SeekBar::new(&config, basic_assets()).unwrap();
        assert_eq!(bar.thumb_offset(), 0);
    }

    #[test]
    fn test_pressed_state_reaches_thumb() {
        let pressed = Color::from_rgb(0.0, 1.0, 0.0);
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        bar.set_thumb_tint(Tint {
            list: Some(TintList {
                default: THUMB,
                pressed: Some(pressed),
                disabled: None,
            }),
            mode: Some(TintMode::SrcIn),
        });
        bar.set_size(200, 20);

        let thumb_color = |bar: &SeekBar| {
            let mut recorder = Recorder::default();
            bar.thumb().unwrap().draw(&mut recorder);
            recorder.colors()[0]
        };

        assert_eq!(thumb_color(&bar), THUMB);
        bar.on_pointer(PointerEvent::Down { x: 50.0, y: 10.0 });
        assert!(bar.is_pressed());
        assert_eq!(thumb_color(&bar), pressed);
        bar.on_pointer(PointerEvent::Up { x: 50.0, y: 10.0 });
        assert_eq!(thumb_color(&bar), THUMB);
    }

    #[test]
    fn test_track_tint_goes_to_fill_layer() {
        let config = SeekBarConfig::from_json(
            r##"{ "track": { "tint": "#00ff00" }, "track_background": { "tint": "#000000" } }"##,
        )
        .unwrap();
        let mut bar = SeekBar::new(&config, basic_assets()).unwrap();
        bar.set_size(200, 20);
        bar.set_progress(100);

        let mut recorder = Recorder::default();
        bar.draw(&mut recorder);
        let colors = recorder.colors();
        assert_eq!(colors[0], Color::from_rgb8(0, 0, 0));
        assert_eq!(colors[1], Color::from_rgb8(0, 255, 0));
    }

    #[test]
    fn test_redraw_flags() {
        let mut bar = SeekBar::new(&SeekBarConfig::default(), basic_assets()).unwrap();
        assert!(bar.take_redraw());
        assert!(!bar.take_redraw());

        bar.set_progress(5);
        assert!(bar.take_redraw());

        bar.set_progress(5);
        assert!(!bar.needs_redraw());
    }

    #[test]
    fn test_measure_adds_indicator_band() {
        let assets = SeekBarAssets {
            track: Some(layered_track(Orientation::Horizontal)),
            thumb: Some(Box::new(ShapeAsset::new(20, 20, THUMB))),
            indicator: Some(Box::new(ShapeAsset::new(30, 24, INDICATOR))),
            ..Default::default()
        };
        let mut bar = SeekBar::new(&SeekBarConfig::default(), assets).unwrap();
        let size = bar.measure(MeasureSpec::Exactly(300), MeasureSpec::Unspecified);
        assert_eq!(size, Size::new(300, 44));
    }
}
