//! Event variants and the FIFO queue feeding the dispatcher.

use crate::config::EVENT_QUEUE_DEPTH;
use crate::error::Error;
use crate::input::KeyId;
use heapless::Deque;

/// Everything the dispatcher can be asked to do.
///
/// Events are created by the sampler or the state machines and consumed
/// exactly once, oldest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A debounced released→pressed edge on one key.
    KeyPressed(KeyId),
    /// The confirm key was pressed while a confirmation was awaiting.
    ConfirmAccepted,
    /// The cancel key was pressed while a confirmation was awaiting.
    ConfirmCancelled,
    /// A confirmation window elapsed with no answer.
    ConfirmTimedOut,
    /// Something wants the screen repainted.
    RedrawRequested,
}

/// Bounded FIFO of pending events.
///
/// Handlers may enqueue while a drain pass runs; those events are kept
/// for the next pass (the dispatcher snapshots the length before
/// draining), so dispatch never recurses.
pub struct EventQueue {
    events: Deque<Event, EVENT_QUEUE_DEPTH>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Append an event. The depth is generous for five keys, so a full
    /// queue means something upstream stopped draining.
    pub fn push(&mut self, event: Event) -> Result<(), Error> {
        self.events.push_back(event).map_err(|_| Error::QueueFull)
    }

    /// Remove and return the oldest event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_oldest_first() {
        let mut queue = EventQueue::new();
        queue.push(Event::KeyPressed(KeyId::Mute)).unwrap();
        queue.push(Event::ConfirmAccepted).unwrap();
        queue.push(Event::RedrawRequested).unwrap();

        assert_eq!(queue.pop(), Some(Event::KeyPressed(KeyId::Mute)));
        assert_eq!(queue.pop(), Some(Event::ConfirmAccepted));
        assert_eq!(queue.pop(), Some(Event::RedrawRequested));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn push_fails_when_full() {
        let mut queue = EventQueue::new();
        for _ in 0..EVENT_QUEUE_DEPTH {
            queue.push(Event::RedrawRequested).unwrap();
        }
        assert_eq!(
            queue.push(Event::RedrawRequested),
            Err(Error::QueueFull)
        );
        assert_eq!(queue.len(), EVENT_QUEUE_DEPTH);
    }

    #[test]
    fn snapshot_drain_leaves_new_events_for_next_pass() {
        let mut queue = EventQueue::new();
        queue.push(Event::KeyPressed(KeyId::StartStop)).unwrap();

        // A handler enqueues mid-pass; the pass only consumes what was
        // there at its start.
        let pending = queue.len();
        for _ in 0..pending {
            let event = queue.pop().unwrap();
            if event == Event::KeyPressed(KeyId::StartStop) {
                queue.push(Event::RedrawRequested).unwrap();
            }
        }
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some(Event::RedrawRequested));
    }
}
