//! # desim::run
//!
//! The run loop: `initialize` schedules the warm-up boundary and runs the
//! caller's initialization action; `remaining_events` pops and dispatches
//! events until the run-state is no longer iterable or a dispatch fails;
//! `run` sequences the two and is the crate's public entry point.

use std::rc::Rc;

use desim_types::Time;

use crate::action::{Action, SimulationAction};
use crate::errors::EngineError;
use crate::internal_actions::EndWarmUpAction;
use crate::run_state::RunState;
use crate::scheduler;
use crate::state::SimulationState;
use crate::transition::{take_until_failure, StateTransition};

/// `Initializing`-only: schedules the run's single `EndWarmUpAction`, runs
/// `initialization`, then transitions `run_state` to `Executing`. The three
/// steps are sequenced with [`take_until_failure`]; the first failure
/// short-circuits the rest and is returned directly.
fn initialize<M: 'static>(
    initialization: Rc<dyn Action<M>>,
    warm_up_period: Time,
    snap_length: Time,
    num_snaps: u32,
) -> SimulationAction<M> {
    let warm_up_action: Rc<dyn Action<M>> = Rc::new(EndWarmUpAction::new(snap_length, num_snaps));
    let schedule_warm_up = scheduler::at(warm_up_period, i32::MAX, warm_up_action);

    let run_initialization = StateTransition::new(move |state: SimulationState<M>| initialization.dispatch().run(state));

    let enter_executing = StateTransition::new(|state: SimulationState<M>| {
        let from = state.run_state;
        tracing::info!(
            target: "desim::sim",
            from = %from,
            to = %RunState::Executing,
            "run-state transition"
        );
        let SimulationState {
            model_state,
            next_event_id,
            current,
            events,
            ..
        } = state;
        let new_state = SimulationState {
            model_state,
            next_event_id,
            current,
            events,
            run_state: RunState::Executing,
        };
        (new_state, Ok(()))
    });

    take_until_failure(&[schedule_warm_up, run_initialization, enter_executing])
}

/// Selects the next event to dispatch. Fails with
/// `EngineError::EventIterationState` if `!run_state.can_iterate()`
/// (defensive — unreachable from [`run`]). If the queue is empty,
/// transitions `run_state` to `Terminated` and fails with
/// `EngineError::OutOfEvents`. Otherwise removes the minimum event and sets
/// it as `current`.
fn update_current<M: 'static>() -> SimulationAction<M> {
    StateTransition::new(|state: SimulationState<M>| {
        if !state.run_state.can_iterate() {
            let run_state = state.run_state;
            return (state, Err(EngineError::EventIterationState(run_state)));
        }

        let (minimum, remaining) = state.events.minimum_remove();
        match minimum {
            None => {
                tracing::warn!(target: "desim::sim", "queue exhausted");
                let from = state.run_state;
                tracing::info!(
                    target: "desim::sim",
                    from = %from,
                    to = %RunState::Terminated,
                    "run-state transition"
                );
                let SimulationState {
                    model_state,
                    next_event_id,
                    current,
                    ..
                } = state;
                let new_state = SimulationState {
                    model_state,
                    next_event_id,
                    current,
                    events: remaining,
                    run_state: RunState::Terminated,
                };
                (new_state, Err(EngineError::OutOfEvents))
            }
            Some(event) => {
                let SimulationState {
                    model_state,
                    next_event_id,
                    run_state,
                    ..
                } = state;
                let new_state = SimulationState {
                    model_state,
                    next_event_id,
                    current: Some(event),
                    events: remaining,
                    run_state,
                };
                (new_state, Ok(()))
            }
        }
    })
}

/// Precondition: `run_state.can_iterate()`. Dispatches `current`'s action
/// against the state.
fn dispatch_current<M: 'static>() -> SimulationAction<M> {
    StateTransition::new(|state: SimulationState<M>| {
        debug_assert!(
            state.run_state.can_iterate(),
            "dispatch_current requires an iterable run-state"
        );
        let current = state
            .current
            .clone()
            .expect("dispatch_current requires update_current to have run first");
        tracing::debug!(
            target: "desim::sim",
            event_id = current.id,
            due_at = %current.due_at,
            priority = current.priority,
            "dispatching event"
        );
        current.action.dispatch().run(state)
    })
}

/// One cycle of select-next-event-then-dispatch.
fn iterate<M: 'static>() -> SimulationAction<M> {
    let update = update_current::<M>();
    let dispatch = dispatch_current::<M>();
    update.flat_map(move |result| match result {
        Err(e) => StateTransition::pure(Err(e)),
        Ok(()) => dispatch.clone(),
    })
}

/// Repeats [`iterate`] until either a dispatch fails or `run_state` is no
/// longer iterable. Built as a single `StateTransition` wrapping an explicit
/// `while` loop, so stack usage does not grow with the number of events
/// processed, however many there are.
fn remaining_events<M: 'static>() -> SimulationAction<M> {
    let iterate_once = iterate::<M>();
    StateTransition::new(move |mut state: SimulationState<M>| loop {
        if !state.run_state.can_iterate() {
            return (state, Ok(()));
        }
        let (next_state, result) = iterate_once.run(state);
        state = next_state;
        if result.is_err() {
            return (state, result);
        }
    })
}

/// Runs a simulation to completion.
///
/// `num_snaps` must be at least 1 (debug assertion — violating it is a
/// programming error, not a recoverable condition).
///
/// When the event queue empties before the final snap completes, the
/// returned state has `run_state == Terminated` and the result is
/// `Err(EngineError::OutOfEvents)` even though "ran out of events" is often
/// a perfectly ordinary way for a simulation to end. This mirrors the
/// source engine's behavior verbatim rather than reclassifying it as
/// success; callers that want to treat queue exhaustion as a normal
/// terminal state should match on `Err(EngineError::OutOfEvents)`
/// explicitly rather than treating every `Err` the same way.
pub fn run<M: 'static>(
    initial_model_state: M,
    warm_up_period: Time,
    snap_length: Time,
    num_snaps: u32,
    initialization: Rc<dyn Action<M>>,
) -> (SimulationState<M>, Result<(), EngineError>) {
    debug_assert!(num_snaps >= 1, "num_snaps must be at least 1");

    let state = SimulationState::new(initial_model_state);
    let init = initialize(initialization, warm_up_period, snap_length, num_snaps);
    let remaining = remaining_events::<M>();
    take_until_failure(&[init, remaining]).run(state)
}
