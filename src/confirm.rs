//! Confirmation timer: wraps a risky transition in a time-boxed
//! confirm/cancel dialog.
//!
//! At most one request is ever live. The machine itself never mutates
//! the stream; it hands the pending action back to the dispatcher on
//! resolution, and the dispatcher decides commit or discard. A window
//! that elapses unanswered cancels - never commits - regardless of the
//! pending action.

use crate::config::CONFIRM_WINDOW_MS;
use crate::error::Error;
use crate::event::{Event, EventQueue};
use crate::keymap::Action;

/// Confirmation dialog state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Confirm {
    Idle,
    Awaiting {
        /// The action that commits on confirm.
        action: Action,
        /// Millisecond timestamp the window closes at.
        deadline: u64,
        /// Whether the timeout event has already been enqueued, so the
        /// deadline fires exactly once.
        notified: bool,
    },
}

impl Confirm {
    pub const fn new() -> Self {
        Confirm::Idle
    }

    /// Open a dialog for `action`. Rejected while another request is
    /// live; the first one stays.
    pub fn request(&mut self, action: Action, now: u64) -> Result<(), Error> {
        match self {
            Confirm::Idle => {
                *self = Confirm::Awaiting {
                    action,
                    deadline: now + CONFIRM_WINDOW_MS,
                    notified: false,
                };
                Ok(())
            }
            Confirm::Awaiting { .. } => Err(Error::ConfirmPending),
        }
    }

    /// Deadline check, run every scheduler cycle while awaiting.
    /// Enqueues a single `ConfirmTimedOut` once the window closes; the
    /// dispatcher performs the actual (cancel-by-default) resolution.
    pub fn tick(&mut self, now: u64, queue: &mut EventQueue) {
        if let Confirm::Awaiting {
            deadline, notified, ..
        } = self
        {
            if now >= *deadline && !*notified {
                *notified = true;
                let _ = queue.push(Event::ConfirmTimedOut);
            }
        }
    }

    /// Close the dialog and hand back the pending action, if any.
    /// Idempotent: a second resolution (e.g. timeout racing a late
    /// confirm edge) finds the machine idle and returns `None`.
    pub fn resolve(&mut self) -> Option<Action> {
        match *self {
            Confirm::Awaiting { action, .. } => {
                *self = Confirm::Idle;
                Some(action)
            }
            Confirm::Idle => None,
        }
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, Confirm::Awaiting { .. })
    }

    /// Action awaiting an answer, if any.
    pub fn pending(&self) -> Option<Action> {
        match *self {
            Confirm::Awaiting { action, .. } => Some(action),
            Confirm::Idle => None,
        }
    }

    /// Elapsed fraction of the window in permille, clamped to 0..=1000.
    /// Drives the progress bar.
    pub fn progress_permille(&self, now: u64) -> Option<u16> {
        match *self {
            Confirm::Awaiting { deadline, .. } => {
                let remaining = deadline.saturating_sub(now);
                let elapsed = CONFIRM_WINDOW_MS.saturating_sub(remaining);
                Some(((elapsed * 1000) / CONFIRM_WINDOW_MS) as u16)
            }
            Confirm::Idle => None,
        }
    }
}

impl Default for Confirm {
    fn default() -> Self {
        Self::new()
    }
}
