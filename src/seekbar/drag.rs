//! Pointer state machine
//!
//! ```text
//!            down (in scroller)            move > slop
//!   Idle ─────────────────────> Armed ─────────────────> Dragging
//!    │                            │ up (tap)                 │ up / cancel
//!    │ down                       v                          v
//!    └──────────────────────> Dragging ─────────────────> Idle
//! ```
//!
//! The controller only decides *what* happens; the widget turns [`DragAction`]s into
//! progress changes and listener calls.

use super::geometry::Orientation;

/// Default slop in pixels before a press inside a scroller turns into a drag
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Pointer input in widget-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    Cancel,
}

impl PointerEvent {
    /// Coordinate along the direction of travel
    pub fn primary(&self, orientation: Orientation) -> Option<f32> {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                Some(match orientation {
                    Orientation::Horizontal => x,
                    Orientation::Vertical => y,
                })
            }
            PointerEvent::Cancel => None,
        }
    }
}

/// Side effect requested by the controller, in the order it must happen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAction {
    SetPressed(bool),
    StartTracking,
    /// Map this primary-axis coordinate to progress
    Track(f32),
    StopTracking,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    /// Pressed inside a scroller; waiting to see whether this is a drag or a scroll
    Armed { down: f32 },
    Dragging,
}

#[derive(Debug, Clone)]
pub struct DragController {
    phase: Phase,
    touch_slop: f32,
    in_scroller: bool,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_TOUCH_SLOP)
    }
}

impl DragController {
    pub fn new(touch_slop: f32) -> Self {
        Self {
            phase: Phase::Idle,
            touch_slop: touch_slop.max(0.0),
            in_scroller: false,
        }
    }

    /// Whether presses should wait for the slop before claiming input
    pub fn set_in_scrollable_container(&mut self, in_scroller: bool) {
        self.in_scroller = in_scroller;
    }

    pub fn is_in_scrollable_container(&self) -> bool {
        self.in_scroller
    }

    /// True while the controller owns the pointer stream
    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.phase, Phase::Armed { .. })
    }

    pub fn handle(&mut self, event: PointerEvent, orientation: Orientation) -> Vec<DragAction> {
        let position = event.primary(orientation);

        match (event, self.phase) {
            (PointerEvent::Down { .. }, _) => {
                let Some(down) = position else {
                    return Vec::new();
                };
                if self.in_scroller {
                    self.phase = Phase::Armed { down };
                    Vec::new()
                } else {
                    self.start_drag(down)
                }
            }
            (PointerEvent::Move { .. }, Phase::Dragging) => {
                position.map(DragAction::Track).into_iter().collect()
            }
            (PointerEvent::Move { .. }, Phase::Armed { down }) => match position {
                Some(current) if (current - down).abs() > self.touch_slop => {
                    self.start_drag(current)
                }
                _ => Vec::new(),
            },
            (PointerEvent::Up { .. }, Phase::Dragging) => {
                self.phase = Phase::Idle;
                let mut actions: Vec<DragAction> =
                    position.map(DragAction::Track).into_iter().collect();
                actions.push(DragAction::StopTracking);
                actions.push(DragAction::SetPressed(false));
                actions
            }
            (PointerEvent::Up { .. }, Phase::Armed { .. }) => {
                // Tap: never crossed the slop, so report a one-shot gesture
                self.phase = Phase::Idle;
                let mut actions = vec![DragAction::SetPressed(true), DragAction::StartTracking];
                actions.extend(position.map(DragAction::Track));
                actions.push(DragAction::StopTracking);
                actions.push(DragAction::SetPressed(false));
                actions
            }
            (PointerEvent::Cancel, _) => self.cancel(),
            (PointerEvent::Move { .. } | PointerEvent::Up { .. }, Phase::Idle) => Vec::new(),
        }
    }

    /// End any gesture in progress without a final position
    ///
    /// A drag reports its end; an armed press never started one and is dropped silently.
    pub fn cancel(&mut self) -> Vec<DragAction> {
        let was_dragging = self.is_dragging();
        self.phase = Phase::Idle;
        if was_dragging {
            vec![DragAction::StopTracking, DragAction::SetPressed(false)]
        } else {
            Vec::new()
        }
    }

    fn start_drag(&mut self, position: f32) -> Vec<DragAction> {
        self.phase = Phase::Dragging;
        vec![
            DragAction::SetPressed(true),
            DragAction::StartTracking,
            DragAction::Track(position),
        ]
    }
}
