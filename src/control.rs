//! The controller: event dispatch plus the cooperative tick scheduler.
//!
//! One `Controller` value owns every piece of shared state - queue,
//! stream flags, confirmation machine, screen state - so there are no
//! ambient globals. `tick` runs the periodic activities to completion
//! in a fixed priority order (sample, confirmation deadline, dispatch,
//! blink, redraw); the only suspension point is between whole ticks,
//! which is the entire concurrency contract.

use crate::config::{BLINK_INTERVAL_MS, REDRAW_INTERVAL_MS, SAMPLE_INTERVAL_MS};
use crate::confirm::Confirm;
use crate::error::Error;
use crate::event::{Event, EventQueue};
use crate::input::{KeyId, Sampler};
use crate::io::{KeySender, Led, Leds, PinReader, Surface};
use crate::keymap::Action;
use crate::screen::ScreenState;
use crate::stream::StreamState;

pub struct Controller {
    queue: EventQueue,
    sampler: Sampler,
    pub stream: StreamState,
    pub confirm: Confirm,
    pub screen: ScreenState,
    blink_phase: bool,
    next_sample: u64,
    next_blink: u64,
    next_redraw: u64,
    faults: u32,
}

impl Controller {
    pub const fn new() -> Self {
        Self {
            queue: EventQueue::new(),
            sampler: Sampler::new(),
            stream: StreamState::new(),
            confirm: Confirm::new(),
            screen: ScreenState::new(),
            blink_phase: false,
            next_sample: 0,
            next_blink: 0,
            next_redraw: 0,
            faults: 0,
        }
    }

    /// Requests rejected so far. Most come from ordinary key mashing,
    /// such as asking for a confirmation while a dialog is already
    /// open; the count is a diagnostic, not an alarm. The embedded
    /// loop logs each increase.
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Global blink phase, shared by LEDs and flashing screen elements.
    pub fn blink_phase(&self) -> bool {
        self.blink_phase
    }

    /// Run every due activity once. Call on the scheduler cadence with
    /// a monotonic millisecond clock.
    pub fn tick<P, K, L, S>(
        &mut self,
        now: u64,
        pins: &P,
        tx: &mut K,
        leds: &mut L,
        surface: &mut S,
    ) where
        P: PinReader,
        K: KeySender,
        L: Leds,
        S: Surface,
    {
        // 1. Sample keys on the debounce cadence.
        if now >= self.next_sample {
            self.sampler.sample(pins, &mut self.queue);
            self.next_sample = now + SAMPLE_INTERVAL_MS;
        }

        // 2. Confirmation deadline check.
        self.confirm.tick(now, &mut self.queue);

        // 3. Drain exactly the events queued so far; anything a handler
        //    enqueues waits for the next pass.
        let pending = self.queue.len();
        for _ in 0..pending {
            match self.queue.pop() {
                Some(event) => self.dispatch(event, tx, now),
                None => break,
            }
        }

        // The page is a function of the state we just mutated.
        self.screen.sync(&self.stream, &self.confirm);

        // 4. Blink: toggle the phase and apply it to LEDs and any
        //    flashing screen element within the same tick.
        if now >= self.next_blink {
            self.blink_phase = !self.blink_phase;
            leds.set(Led::Pause, self.stream.paused && self.blink_phase);
            leds.set(Led::Mute, self.stream.muted && self.blink_phase);
            self.screen.paint_blink(self.blink_phase, surface);
            self.next_blink = now + BLINK_INTERVAL_MS;
        }

        // 5. Redraw. The progress bar advances with the clock, so a
        //    pending confirmation repaints every cycle.
        if self.confirm.is_awaiting() {
            self.screen.needs_redraw = true;
        }
        if now >= self.next_redraw {
            if self.screen.needs_redraw {
                self.screen
                    .render(&self.stream, &self.confirm, now, self.blink_phase, surface);
            }
            self.next_redraw = now + REDRAW_INTERVAL_MS;
        }
    }

    /// Execute one event. Guards live here; the state-model operations
    /// themselves assume validated calls.
    fn dispatch<K: KeySender>(&mut self, event: Event, tx: &mut K, now: u64) {
        let outcome = match event {
            // Mute is always immediate, no confirmation.
            Event::KeyPressed(KeyId::Mute) => {
                self.stream.toggle_mute(tx);
                Ok(())
            }

            // Entering pause is cheap; leaving it needs a confirmation.
            Event::KeyPressed(KeyId::Brb) => {
                if self.stream.paused {
                    self.confirm.request(Action::Resume, now)
                } else if self.stream.running {
                    self.stream.pause(tx)
                } else {
                    // No pause outside a running stream.
                    Ok(())
                }
            }

            Event::KeyPressed(KeyId::StartStop) => {
                let action = if self.stream.running {
                    Action::End
                } else {
                    Action::Start
                };
                self.confirm.request(action, now)
            }

            // Left cancels, right confirms - only meaningful while a
            // dialog is open. The answer is queued so it resolves in
            // enqueue order against a racing timeout.
            Event::KeyPressed(KeyId::UiLeft) => {
                if self.confirm.is_awaiting() {
                    let _ = self.queue.push(Event::ConfirmCancelled);
                }
                Ok(())
            }
            Event::KeyPressed(KeyId::UiRight) => {
                if self.confirm.is_awaiting() {
                    let _ = self.queue.push(Event::ConfirmAccepted);
                }
                Ok(())
            }

            Event::ConfirmAccepted => match self.confirm.resolve() {
                Some(action) => {
                    let _ = self.queue.push(Event::RedrawRequested);
                    self.commit(action, tx, now)
                }
                None => Ok(()),
            },

            // Cancel and timeout share the default outcome: discard the
            // pending action, send nothing.
            Event::ConfirmCancelled | Event::ConfirmTimedOut => {
                if self.confirm.resolve().is_some() {
                    let _ = self.queue.push(Event::RedrawRequested);
                }
                Ok(())
            }

            Event::RedrawRequested => {
                self.screen.needs_redraw = true;
                Ok(())
            }
        };

        if outcome.is_err() {
            // Reject-and-continue; partial recovery is worse than a
            // dropped request.
            self.faults = self.faults.saturating_add(1);
        }
    }

    /// Apply a committed confirmation outcome to the stream.
    fn commit<K: KeySender>(&mut self, action: Action, tx: &mut K, now: u64) -> Result<(), Error> {
        match action {
            Action::Start => self.stream.begin_run(tx, now),
            Action::End => self.stream.end_run(tx),
            Action::Resume => self.stream.resume(tx),
            // Mute and pause never pass through a confirmation.
            Action::Pause | Action::Mute | Action::Unmute => Err(Error::InvalidTransition),
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Page;

    struct NoPins;
    impl PinReader for NoPins {
        fn is_pressed(&self, _key: KeyId) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct Recorder {
        sent: heapless::Vec<Action, 8>,
    }
    impl KeySender for Recorder {
        fn send(&mut self, action: Action) {
            self.sent.push(action).unwrap();
        }
    }

    #[derive(Default)]
    struct NullLeds;
    impl Leds for NullLeds {
        fn set(&mut self, _led: Led, _on: bool) {}
    }

    #[derive(Default)]
    struct NullSurface;
    impl Surface for NullSurface {
        fn fill_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32, _on: bool) {}
        fn blit(&mut self, _art: crate::io::Art, _x: i32, _y: i32) {}
        fn text(&mut self, _t: &str, _x: i32, _y: i32, _on: bool) {}
        fn flush(&mut self) {}
    }

    fn run_tick(ctl: &mut Controller, now: u64, tx: &mut Recorder) {
        ctl.tick(now, &NoPins, tx, &mut NullLeds, &mut NullSurface);
    }

    #[test]
    fn mute_key_is_immediate() {
        let mut ctl = Controller::new();
        let mut tx = Recorder::default();

        ctl.queue.push(Event::KeyPressed(KeyId::Mute)).unwrap();
        run_tick(&mut ctl, 0, &mut tx);
        assert!(ctl.stream.muted);
        assert!(!ctl.confirm.is_awaiting());
        assert_eq!(tx.sent.as_slice(), [Action::Mute]);
    }

    #[test]
    fn brb_ignored_while_idle() {
        let mut ctl = Controller::new();
        let mut tx = Recorder::default();

        ctl.queue.push(Event::KeyPressed(KeyId::Brb)).unwrap();
        run_tick(&mut ctl, 0, &mut tx);
        assert!(!ctl.stream.paused);
        assert!(!ctl.confirm.is_awaiting());
        assert_eq!(ctl.faults(), 0);
        assert!(tx.sent.is_empty());
    }

    #[test]
    fn ui_keys_are_inert_without_dialog() {
        let mut ctl = Controller::new();
        let mut tx = Recorder::default();

        ctl.queue.push(Event::KeyPressed(KeyId::UiLeft)).unwrap();
        ctl.queue.push(Event::KeyPressed(KeyId::UiRight)).unwrap();
        run_tick(&mut ctl, 0, &mut tx);
        run_tick(&mut ctl, 10, &mut tx);
        assert!(tx.sent.is_empty());
        assert_eq!(ctl.screen.active_page, Page::Idle);
    }

    #[test]
    fn accepted_answer_beats_racing_timeout() {
        let mut ctl = Controller::new();
        let mut tx = Recorder::default();

        ctl.queue.push(Event::KeyPressed(KeyId::StartStop)).unwrap();
        run_tick(&mut ctl, 0, &mut tx);
        assert!(ctl.confirm.is_awaiting());

        // Both an answer and a timeout end up queued; FIFO order makes
        // the earlier answer win and the timeout resolve to a no-op.
        ctl.queue.push(Event::ConfirmAccepted).unwrap();
        ctl.queue.push(Event::ConfirmTimedOut).unwrap();
        run_tick(&mut ctl, 10, &mut tx);

        assert!(ctl.stream.running);
        assert_eq!(tx.sent.as_slice(), [Action::Start]);
        assert_eq!(ctl.faults(), 0);
    }

    #[test]
    fn stacked_confirmation_counts_one_rejection() {
        let mut ctl = Controller::new();
        let mut tx = Recorder::default();

        // Two presses in one drain pass: the first opens the dialog,
        // the second is rejected and counted, the first stays live.
        ctl.queue.push(Event::KeyPressed(KeyId::StartStop)).unwrap();
        ctl.queue.push(Event::KeyPressed(KeyId::StartStop)).unwrap();
        run_tick(&mut ctl, 0, &mut tx);

        assert_eq!(ctl.faults(), 1);
        assert_eq!(ctl.confirm.pending(), Some(Action::Start));
        assert!(tx.sent.is_empty());
    }

    #[test]
    fn redraw_event_flags_screen() {
        let mut ctl = Controller::new();
        let mut tx = Recorder::default();
        // Flush the boot redraw first.
        run_tick(&mut ctl, 0, &mut tx);
        assert!(!ctl.screen.needs_redraw);

        ctl.queue.push(Event::RedrawRequested).unwrap();
        // Redraw interval not yet due at t=10, so the flag survives
        // the tick for the next repaint.
        run_tick(&mut ctl, 10, &mut tx);
        assert!(ctl.screen.needs_redraw);
    }
}
