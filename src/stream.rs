//! Device state model: the stream's running/muted/paused flags and the
//! operations that mutate them.
//!
//! Every operation is atomic - it fully applies its flag change and
//! sends its keystroke before returning. Operations assume
//! pre-validated calls; the dispatcher owns the guards. A violated
//! guard is rejected with `InvalidTransition` and leaves the state
//! untouched rather than corrupting it.

use crate::error::Error;
use crate::io::KeySender;
use crate::keymap::Action;

/// Process-lifetime stream status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamState {
    pub running: bool,
    pub muted: bool,
    pub paused: bool,
    /// Millisecond timestamp of `begin_run`, while running.
    pub started_at: Option<u64>,
}

impl StreamState {
    pub const fn new() -> Self {
        Self {
            running: false,
            muted: false,
            paused: false,
            started_at: None,
        }
    }

    /// Flip the mute flag and send the keystroke matching the *new*
    /// state. Never needs confirmation.
    pub fn toggle_mute<K: KeySender>(&mut self, tx: &mut K) {
        self.muted = !self.muted;
        tx.send(if self.muted {
            Action::Mute
        } else {
            Action::Unmute
        });
    }

    /// Start the stream. Only reachable through a committed
    /// confirmation.
    pub fn begin_run<K: KeySender>(&mut self, tx: &mut K, now: u64) -> Result<(), Error> {
        if self.running {
            return Err(Error::InvalidTransition);
        }
        self.running = true;
        self.started_at = Some(now);
        tx.send(Action::Start);
        Ok(())
    }

    /// End the stream. Only reachable through a committed confirmation.
    /// Also clears a pending pause so "paused while not running" stays
    /// unreachable.
    pub fn end_run<K: KeySender>(&mut self, tx: &mut K) -> Result<(), Error> {
        if !self.running {
            return Err(Error::InvalidTransition);
        }
        self.running = false;
        self.paused = false;
        self.started_at = None;
        tx.send(Action::End);
        Ok(())
    }

    /// Enter the be-right-back pause. Immediate - entering pause is
    /// cheap, leaving it is not.
    pub fn pause<K: KeySender>(&mut self, tx: &mut K) -> Result<(), Error> {
        if !self.running || self.paused {
            return Err(Error::InvalidTransition);
        }
        self.paused = true;
        tx.send(Action::Pause);
        Ok(())
    }

    /// Leave the pause. Only reachable through a committed
    /// confirmation.
    pub fn resume<K: KeySender>(&mut self, tx: &mut K) -> Result<(), Error> {
        if !self.paused {
            return Err(Error::InvalidTransition);
        }
        self.paused = false;
        tx.send(Action::Resume);
        Ok(())
    }

    /// Milliseconds on air, while running.
    pub fn elapsed(&self, now: u64) -> Option<u64> {
        self.started_at.map(|start| now.saturating_sub(start))
    }
}

impl Default for StreamState {
    fn default() -> Self {
        Self::new()
    }
}
