//! # desim::state
//!
//! `SimulationState<M>` aggregates everything the run loop threads through:
//! the user's opaque model state, the next-event-id counter, the event
//! currently being dispatched, the pending-event queue, and the run-state
//! phase. It is immutable — every "modification" returns a new instance
//! that shares unchanged substructure with the previous one (structural
//! sharing comes for free from the heap's `Rc`-backed trees).

use desim_types::Time;

use crate::event::Event;
use crate::heap::BinomialHeap;
use crate::run_state::RunState;

/// The full state of one simulation run at a point in time.
pub struct SimulationState<M> {
    /// The user-defined, opaque model state.
    pub model_state: M,
    /// The id to assign to the next scheduled event.
    pub next_event_id: u64,
    /// The event currently being dispatched, or `None` before the first
    /// dispatch.
    pub current: Option<Event<M>>,
    /// Pending scheduled events.
    pub events: BinomialHeap<Event<M>>,
    /// The engine-lifecycle phase.
    pub run_state: RunState,
}

impl<M> SimulationState<M> {
    /// Builds the initial state for a run: empty queue, no current event,
    /// `run_state` set to `Initializing`.
    pub fn new(model_state: M) -> Self {
        SimulationState {
            model_state,
            next_event_id: 0,
            current: None,
            events: BinomialHeap::empty(),
            run_state: RunState::Initializing,
        }
    }

    /// The current simulation clock: the `due_at` of the event being
    /// dispatched, or `Time::zero()` before the first dispatch.
    pub fn sim_time(&self) -> Time {
        self.current
            .as_ref()
            .map(|e| e.due_at)
            .unwrap_or_else(Time::zero)
    }
}
