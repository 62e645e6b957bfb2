//! Cross-thread progress updates
//!
//! Producers on any thread push [`PendingUpdate`]s; the UI thread drains them in FIFO
//! order. The queue is `Idle` until the first push after a drain, which moves it to
//! `Scheduled` and sends a single [`DrainTicket`] to the UI thread. Further pushes only
//! append until the drain runs, so a burst of N pushes costs one drain.
//!
//! ```text
//!  producer ──push──> [pending] ──(Idle→Scheduled)──> ticket ──> UI tick ──> drain
//! ```
//!
//! The lock only covers the pending list. A drain takes the whole batch under the lock,
//! flips back to `Idle`, then applies the updates with the lock released.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::thread::{self, ThreadId};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::events::SeekBarId;

/// Default bound for updates retained while detached
pub const DEFAULT_MAX_PENDING_UPDATES: usize = 256;

/// A progress change waiting to be applied on the UI thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingUpdate {
    pub progress: i32,
    pub from_user: bool,
    /// Carried for API parity; transitions are applied without interpolation
    pub animate: bool,
}

impl PendingUpdate {
    pub fn new(progress: i32) -> Self {
        Self {
            progress,
            from_user: false,
            animate: false,
        }
    }
}

/// Wake-up sent to the UI thread when a drain becomes necessary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainTicket;

/// UI-side end of the drain channel
pub type DrainReceiver = mpsc::Receiver<DrainTicket>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrainState {
    Idle,
    Scheduled,
}

#[derive(Debug)]
struct Pending {
    updates: VecDeque<PendingUpdate>,
    state: DrainState,
    attached: bool,
}

/// Result of [`UpdateQueue::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    /// Caller is on the UI thread and must apply the update right away
    Bypass(PendingUpdate),
    /// Appended to the pending list; `scheduled` is true when this push sent the ticket
    Queued { scheduled: bool },
}

#[derive(Debug)]
pub struct UpdateQueue {
    pending: Mutex<Pending>,
    ui_thread: ThreadId,
    drain_tx: mpsc::Sender<DrainTicket>,
    /// Last progress applied on the UI thread
    applied: AtomicI32,
    max_pending: usize,
}

impl UpdateQueue {
    /// Create a queue owned by the calling thread
    pub fn new(initial_progress: i32, max_pending: usize) -> (Arc<Self>, DrainReceiver) {
        Self::with_ui_thread(thread::current().id(), initial_progress, max_pending)
    }

    pub fn with_ui_thread(
        ui_thread: ThreadId,
        initial_progress: i32,
        max_pending: usize,
    ) -> (Arc<Self>, DrainReceiver) {
        // At most one ticket is ever outstanding
        let (drain_tx, drain_rx) = mpsc::channel(1);
        let queue = Self {
            pending: Mutex::new(Pending {
                updates: VecDeque::new(),
                state: DrainState::Idle,
                attached: true,
            }),
            ui_thread,
            drain_tx,
            applied: AtomicI32::new(initial_progress),
            max_pending: max_pending.max(1),
        };
        (Arc::new(queue), drain_rx)
    }

    pub fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.ui_thread
    }

    /// Route an update: bypass on the UI thread, enqueue everywhere else
    pub fn push(&self, update: PendingUpdate) -> Push {
        if self.is_ui_thread() {
            return Push::Bypass(update);
        }
        Push::Queued {
            scheduled: self.enqueue(update),
        }
    }

    /// Append unconditionally; returns whether this call scheduled a drain
    pub fn enqueue(&self, update: PendingUpdate) -> bool {
        let mut pending = self.pending.lock();
        if pending.updates.len() >= self.max_pending {
            if let Some(dropped) = pending.updates.pop_front() {
                tracing::warn!(
                    "Pending progress buffer full ({}), dropping oldest update {}",
                    self.max_pending,
                    dropped.progress
                );
            }
        }
        pending.updates.push_back(update);

        if !pending.attached {
            tracing::debug!(
                "Seek bar detached, retaining update {} ({} pending)",
                update.progress,
                pending.updates.len()
            );
            return false;
        }
        self.schedule(&mut pending)
    }

    fn schedule(&self, pending: &mut Pending) -> bool {
        if pending.state == DrainState::Scheduled {
            return false;
        }
        pending.state = DrainState::Scheduled;

        match self.drain_tx.try_send(DrainTicket) {
            Ok(()) => {
                tracing::debug!("Drain scheduled ({} pending)", pending.updates.len());
                true
            }
            // A ticket from a drain that ran without consuming it is still queued
            Err(mpsc::error::TrySendError::Full(_)) => true,
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("Drain receiver dropped, updates will not be applied");
                false
            }
        }
    }

    /// Attach or detach the drain channel
    ///
    /// Returns whether re-attaching scheduled a drain for retained updates.
    pub fn set_attached(&self, attached: bool) -> bool {
        let mut pending = self.pending.lock();
        if pending.attached == attached {
            return false;
        }
        pending.attached = attached;

        if attached && !pending.updates.is_empty() {
            tracing::debug!(
                "Seek bar re-attached with {} retained updates",
                pending.updates.len()
            );
            return self.schedule(&mut pending);
        }
        false
    }

    pub fn is_attached(&self) -> bool {
        self.pending.lock().attached
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.lock().state == DrainState::Scheduled
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().updates.len()
    }

    /// Take every pending update in push order and return to `Idle`
    pub fn take_batch(&self) -> Vec<PendingUpdate> {
        let mut pending = self.pending.lock();
        pending.state = DrainState::Idle;
        pending.updates.drain(..).collect()
    }

    pub fn store_applied(&self, progress: i32) {
        self.applied.store(progress, Ordering::Release);
    }

    pub fn applied(&self) -> i32 {
        self.applied.load(Ordering::Acquire)
    }
}

/// Cloneable, `Send` handle that lets any thread drive a seek bar's progress
#[derive(Debug, Clone)]
pub struct SeekBarHandle {
    id: SeekBarId,
    queue: Arc<UpdateQueue>,
}

impl SeekBarHandle {
    pub(crate) fn new(id: SeekBarId, queue: Arc<UpdateQueue>) -> Self {
        Self { id, queue }
    }

    pub fn id(&self) -> SeekBarId {
        self.id
    }

    pub fn set_progress(&self, progress: i32) {
        self.push(PendingUpdate::new(progress));
    }

    /// Queue an update for the next drain
    ///
    /// The handle has no access to the widget, so even a push from the UI thread is
    /// deferred to the next tick.
    pub fn push(&self, update: PendingUpdate) {
        if let Push::Bypass(update) = self.queue.push(update) {
            tracing::debug!(
                "Handle push on the UI thread, deferring {} to the next tick",
                update.progress
            );
            self.queue.enqueue(update);
        }
    }

    /// Last progress value applied on the UI thread
    pub fn progress(&self) -> i32 {
        self.queue.applied()
    }
}
