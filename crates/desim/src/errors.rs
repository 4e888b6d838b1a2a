//! # desim::errors
//!
//! The engine's error taxonomy: a single `thiserror`-derived enum, every
//! variant carrying the context needed to explain *why*, never a bare
//! opaque string. All variants here are
//! recoverable from the caller's perspective — the accompanying
//! `SimulationState` is always well-formed — except `ArithmeticOverflow`,
//! which is also reported through this channel even though its root cause
//! (exhausting the `nextEventId` counter) is a programming error.

use crate::run_state::RunState;
use thiserror::Error;

/// Failures produced by the scheduler and run loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `scheduler::at` was called while `run_state.can_schedule()` is false.
    #[error("cannot schedule an event while run-state is {0}")]
    EventScheduleState(RunState),

    /// `iterate` was called while `run_state.can_iterate()` is false. This
    /// should be unreachable from `run`; it exists defensively for direct
    /// callers of `iterate`.
    #[error("cannot iterate while run-state is {0}")]
    EventIterationState(RunState),

    /// The event queue was empty when `iterate` tried to select the next
    /// event. The accompanying state has `run_state` set to `Terminated`.
    #[error("event queue exhausted before the simulation completed")]
    OutOfEvents,

    /// The monotonic `nextEventId` counter would have wrapped past
    /// `u64::MAX`. Fatal: exhausting the id space during a single run is a
    /// programming error, but it is still surfaced through the `Result`
    /// channel rather than a panic so the caller's state remains inspectable.
    #[error("next_event_id counter overflowed")]
    ArithmeticOverflow,
}
