//! # desim::internal_actions
//!
//! The two engine-internal actions that drive warm-up and snap scheduling.
//! Neither touches model state; both are generic over any `M` so the run
//! loop can use them regardless of what the host model looks like.

use std::marker::PhantomData;
use std::rc::Rc;

use desim_types::Time;

use crate::action::{Action, SimulationAction};
use crate::scheduler;
use crate::transition::StateTransition;

/// Fires once, at `currentTime + warm_up_period` (scheduled by
/// `run::initialize`). Schedules the first [`EndSnapAction`], then
/// succeeds. Carries priority `i32::MAX` so it sorts after every ordinary
/// event scheduled at the same instant — if a host model also schedules an
/// event with priority `i32::MAX` at exactly this time, the tie then falls
/// to `id` (the warm-up event was scheduled first, at `initialize` time, so
/// it will generally have a low id and fire first among same-time,
/// same-priority events).
pub struct EndWarmUpAction<M> {
    snap_length: Time,
    num_snaps: u32,
    _model: PhantomData<fn() -> M>,
}

impl<M> EndWarmUpAction<M> {
    pub fn new(snap_length: Time, num_snaps: u32) -> Self {
        EndWarmUpAction {
            snap_length,
            num_snaps,
            _model: PhantomData,
        }
    }
}

impl<M: 'static> Action<M> for EndWarmUpAction<M> {
    fn dispatch(&self) -> SimulationAction<M> {
        let snap_length = self.snap_length;
        let num_snaps = self.num_snaps;
        StateTransition::new(move |state| {
            debug_assert!(num_snaps >= 1, "num_snaps must be at least 1");
            tracing::info!(
                target: "desim::sim",
                snap_length = %snap_length,
                num_snaps,
                "warm-up period complete"
            );
            let first_snap: Rc<dyn Action<M>> =
                Rc::new(EndSnapAction::new(snap_length, num_snaps - 1));
            scheduler::at(snap_length, i32::MAX, first_snap).run(state)
        })
    }

    fn name(&self) -> &str {
        "end-warm-up"
    }

    fn description(&self) -> &str {
        "marks the end of the warm-up period and schedules the first snap boundary"
    }
}

/// Fires at the end of each snap window. If `snaps_remaining == 0`, this was
/// the last snap: sets `run_state` to `Completed`. Otherwise schedules
/// another `EndSnapAction` one `snap_length` later with `snaps_remaining -
/// 1`. Exactly `num_snaps` of these fire over a run, counting this one as
/// the first. Carries priority `i32::MAX` for the same reason as
/// `EndWarmUpAction`.
pub struct EndSnapAction<M> {
    snap_length: Time,
    snaps_remaining: u32,
    _model: PhantomData<fn() -> M>,
}

impl<M> EndSnapAction<M> {
    pub fn new(snap_length: Time, snaps_remaining: u32) -> Self {
        EndSnapAction {
            snap_length,
            snaps_remaining,
            _model: PhantomData,
        }
    }
}

impl<M: 'static> Action<M> for EndSnapAction<M> {
    fn dispatch(&self) -> SimulationAction<M> {
        let snap_length = self.snap_length;
        let snaps_remaining = self.snaps_remaining;
        StateTransition::new(move |state: crate::state::SimulationState<M>| {
            if snaps_remaining == 0 {
                let from = state.run_state;
                tracing::info!(
                    target: "desim::sim",
                    from = %from,
                    to = %crate::run_state::RunState::Completed,
                    "run-state transition"
                );
                let crate::state::SimulationState {
                    model_state,
                    next_event_id,
                    current,
                    events,
                    ..
                } = state;
                let new_state = crate::state::SimulationState {
                    model_state,
                    next_event_id,
                    current,
                    events,
                    run_state: crate::run_state::RunState::Completed,
                };
                (new_state, Ok(()))
            } else {
                tracing::debug!(target: "desim::sim", snaps_remaining, "snap complete, scheduling next");
                let next: Rc<dyn Action<M>> =
                    Rc::new(EndSnapAction::new(snap_length, snaps_remaining - 1));
                scheduler::at(snap_length, i32::MAX, next).run(state)
            }
        })
    }

    fn name(&self) -> &str {
        "end-snap"
    }

    fn description(&self) -> &str {
        "marks the end of a reporting snap window"
    }
}
