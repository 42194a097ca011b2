//! Unified error type for streampad.
//!
//! We avoid `alloc` - all variants are fixed-size. Implements
//! `defmt::Format` for efficient on-target logging when the `defmt`
//! feature is enabled.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A device-state operation was called with its guard unsatisfied
    /// (e.g. `resume` while not paused). The state is left untouched.
    InvalidTransition,

    /// A confirmation was requested while another is still awaiting an
    /// answer. The first request stays live.
    ConfirmPending,

    /// The event queue is full; the event was dropped.
    QueueFull,
}
