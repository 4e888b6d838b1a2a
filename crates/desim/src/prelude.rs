//! # desim::prelude
//!
//! Re-exports the types and functions a host model needs: the combinator
//! and action abstractions, the error taxonomy, and the scheduler's free
//! functions, alongside the run-loop entry point.

pub use crate::{
    action::{Action, AnonymousAction, SimulationAction},
    errors::EngineError,
    event::Event,
    heap::BinomialHeap,
    internal_actions::{EndSnapAction, EndWarmUpAction},
    run::run,
    run_state::RunState,
    scheduler::{at, model_state, time, update_model_state},
    state::SimulationState,
    transition::{take_until, take_until_failure, StateTransition},
};

pub use desim_types::Time;
