//! Frame-coalesced layout scheduling.
//!
//! The scheduler turns a burst of invalidation signals into at most one
//! layout pass per rendering frame. Scheduling is a boolean, not a queue:
//! the Nth signal before the frame fires is a no-op.
//!
//! # State machine
//!
//! `Idle → Scheduled → Running → Idle`. A signal in `Idle` requests one
//! frame callback; the callback runs the pass only if the state is still
//! `Scheduled` (a forced pass in between leaves it a no-op).
//!
//! # Resize debounce
//!
//! Window resizes debounce at a fixed quiet interval before scheduling.
//! Once a pass has completed (`layouted`), the debounce window also
//! suppresses all scheduling until it elapses (`forced_debounce`),
//! preventing thrash during continuous resize. When the timer fires the
//! flag is cleared unconditionally; a stuck-true flag would suppress
//! layout forever.

use mosaic_core::{Effect, InvalidationReason};
use std::time::Duration;

/// Quiet interval after the last resize before a pass is scheduled.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Scheduling state of the next layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassState {
    #[default]
    Idle,
    /// A frame callback has been requested.
    Scheduled,
    /// The pass is executing.
    Running,
}

/// What a resize signal asks of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeResponse {
    /// No pass has ever completed: run one immediately instead of
    /// scheduling.
    RunNow,
    /// Service the effect (restart the debounce timer) and wait for
    /// [`debounce_elapsed`](LayoutScheduler::debounce_elapsed).
    Debounce(Effect),
}

/// Coalesces invalidation signals into single layout passes.
#[derive(Debug, Default)]
pub struct LayoutScheduler {
    state: PassState,
    forced_debounce: bool,
    layouted: bool,
}

impl LayoutScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> PassState {
        self.state
    }

    /// Whether at least one pass has completed successfully.
    #[must_use]
    pub fn is_layouted(&self) -> bool {
        self.layouted
    }

    /// Whether the resize-debounce window is currently suppressing
    /// scheduling.
    #[must_use]
    pub fn forced_debounce(&self) -> bool {
        self.forced_debounce
    }

    /// Register an invalidation signal.
    ///
    /// Returns `Some(Effect::RequestFrame)` exactly when this signal
    /// transitions `Idle → Scheduled`; repeat signals coalesce to `None`.
    pub fn invalidate(&mut self, reason: InvalidationReason) -> Option<Effect> {
        if self.forced_debounce {
            tracing::debug!(?reason, "invalidation suppressed by resize debounce");
            return None;
        }
        match self.state {
            PassState::Idle => {
                self.state = PassState::Scheduled;
                Some(Effect::RequestFrame)
            }
            PassState::Scheduled | PassState::Running => None,
        }
    }

    /// Register a window-resize signal.
    pub fn notify_resized(&mut self) -> ResizeResponse {
        if !self.layouted {
            return ResizeResponse::RunNow;
        }
        self.forced_debounce = true;
        ResizeResponse::Debounce(Effect::StartDebounce(RESIZE_DEBOUNCE))
    }

    /// The debounce timer fired: re-enable scheduling and request a pass.
    pub fn debounce_elapsed(&mut self) -> Option<Effect> {
        // Unconditional: the flag must never survive the timer.
        self.forced_debounce = false;
        self.invalidate(InvalidationReason::Resize)
    }

    /// The frame callback fired. Returns whether the pass should run;
    /// `false` means a forced pass superseded this frame.
    pub fn begin_frame(&mut self) -> bool {
        if self.state == PassState::Scheduled {
            self.state = PassState::Running;
            true
        } else {
            false
        }
    }

    /// Begin a forced pass (visibility transition), bypassing scheduling.
    ///
    /// Any pending frame callback becomes a no-op. Returns `false` if a
    /// pass is already running.
    pub fn force(&mut self) -> bool {
        if self.state == PassState::Running {
            return false;
        }
        self.state = PassState::Running;
        true
    }

    /// A pass finished. `success` marks whether geometry was produced;
    /// a skipped pass (hidden or unsized container) keeps `layouted`
    /// false so the next resize still runs immediately.
    pub fn finish_pass(&mut self, success: bool) {
        self.state = PassState::Idle;
        if success {
            self.layouted = true;
        }
    }
}
