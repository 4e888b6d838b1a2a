//! # desim::scheduler
//!
//! Free functions exposed to actions: `at` enqueues a future event, `time`
//! and `model_state` read the current state without touching it,
//! `update_model_state` replaces the model state unconditionally. These are
//! plain functions rather than methods on a handle type — actions compose
//! them as ordinary `StateTransition` values via `.flat_map(...)`, with no
//! implicit scheduler object threaded through.

use std::rc::Rc;

use desim_types::Time;

use crate::action::{Action, SimulationAction};
use crate::errors::EngineError;
use crate::event::Event;
use crate::state::SimulationState;
use crate::transition::StateTransition;

/// Schedules `action` to fire at `state.sim_time() + delay`, tagged with
/// `priority` (lower fires first among events due at the same time).
///
/// If `!state.run_state.can_schedule()`, returns
/// `Err(EngineError::EventScheduleState(state.run_state))` and leaves the
/// state bitwise unchanged. If incrementing `next_event_id` would overflow
/// `u64`, returns `Err(EngineError::ArithmeticOverflow)`, also leaving state
/// unchanged. Otherwise inserts the new event and increments
/// `next_event_id` by exactly one.
pub fn at<M: 'static>(delay: Time, priority: i32, action: Rc<dyn Action<M>>) -> SimulationAction<M> {
    StateTransition::new(move |state: SimulationState<M>| {
        if !state.run_state.can_schedule() {
            let run_state = state.run_state;
            return (state, Err(EngineError::EventScheduleState(run_state)));
        }

        let next_event_id = match state.next_event_id.checked_add(1) {
            Some(n) => n,
            None => return (state, Err(EngineError::ArithmeticOverflow)),
        };

        let due_at = state.sim_time() + delay;
        let event = Event::new(state.next_event_id, due_at, priority, Rc::clone(&action));

        let SimulationState {
            model_state,
            current,
            events,
            run_state,
            ..
        } = state;
        let events = events.insert(event);

        let new_state = SimulationState {
            model_state,
            next_event_id,
            current,
            events,
            run_state,
        };
        (new_state, Ok(()))
    })
}

/// Reads the current simulation clock without modifying state.
pub fn time<M: 'static>() -> StateTransition<SimulationState<M>, Time> {
    StateTransition::inspect(|state: &SimulationState<M>| state.sim_time())
}

/// Reads the current model state without modifying it. Requires `M: Clone`
/// since `inspect` produces an owned value from a `&SimulationState<M>`.
pub fn model_state<M: Clone + 'static>() -> StateTransition<SimulationState<M>, M> {
    StateTransition::inspect(|state: &SimulationState<M>| state.model_state.clone())
}

/// Replaces the model state unconditionally; always succeeds.
pub fn update_model_state<M: Clone + 'static>(m: M) -> SimulationAction<M> {
    StateTransition::new(move |state: SimulationState<M>| {
        let SimulationState {
            next_event_id,
            current,
            events,
            run_state,
            ..
        } = state;
        let new_state = SimulationState {
            model_state: m.clone(),
            next_event_id,
            current,
            events,
            run_state,
        };
        (new_state, Ok(()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::AnonymousAction;
    use crate::run_state::RunState;

    fn noop_action<M: 'static>() -> Rc<dyn Action<M>> {
        Rc::new(AnonymousAction::new(
            "noop",
            "does nothing",
            StateTransition::pure(Ok(())),
        ))
    }

    fn executing_state() -> SimulationState<i32> {
        let mut state = SimulationState::new(0);
        state.run_state = RunState::Executing;
        state
    }

    #[test]
    fn at_inserts_event_and_increments_next_event_id() {
        let state = executing_state();
        let (state, result) = at(Time::from_secs(5), 0, noop_action()).run(state);
        assert_eq!(result, Ok(()));
        assert_eq!(state.next_event_id, 1);
        assert_eq!(state.events.minimum().unwrap().due_at, Time::from_secs(5));
        assert_eq!(state.events.minimum().unwrap().id, 0);
    }

    #[test]
    fn at_fails_and_leaves_state_unchanged_when_not_schedulable() {
        let mut state = executing_state();
        state.run_state = RunState::Completed;
        let before_next_id = state.next_event_id;
        let (state, result) = at(Time::from_secs(1), 0, noop_action()).run(state);
        assert_eq!(result, Err(EngineError::EventScheduleState(RunState::Completed)));
        assert_eq!(state.next_event_id, before_next_id);
        assert!(state.events.is_empty());
    }

    #[test]
    fn at_fails_on_next_event_id_overflow() {
        let mut state = executing_state();
        state.next_event_id = u64::MAX;
        let (state, result) = at(Time::from_secs(1), 0, noop_action()).run(state);
        assert_eq!(result, Err(EngineError::ArithmeticOverflow));
        assert_eq!(state.next_event_id, u64::MAX);
        assert!(state.events.is_empty());
    }

    #[test]
    fn time_reads_sim_time_without_changing_state() {
        let mut state = executing_state();
        state.current = Some(Event::new(0, Time::from_secs(3), 0, noop_action()));
        let (state, t) = time().run(state);
        assert_eq!(t, Time::from_secs(3));
        assert_eq!(state.sim_time(), Time::from_secs(3));
    }

    #[test]
    fn model_state_reads_without_changing_it() {
        let state = executing_state();
        let (state, m) = model_state().run(state);
        assert_eq!(m, 0);
        assert_eq!(state.model_state, 0);
    }

    #[test]
    fn update_model_state_replaces_model_state_and_succeeds() {
        let state = executing_state();
        let (state, result) = update_model_state(42).run(state);
        assert_eq!(result, Ok(()));
        assert_eq!(state.model_state, 42);
    }
}
