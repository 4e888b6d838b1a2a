//! # desim::action
//!
//! `Action<M>` is a named, described unit of work that, when dispatched,
//! produces a [`SimulationAction`] over simulation state. Represented as a
//! `dyn Action<M>` trait object rather than a closed tagged enum: the
//! user-authored `UserAction` payload is generic over arbitrary model types
//! `M` that cannot be enumerated in a single sum type without erasing that
//! type, so a trait object is the idiomatic Rust equivalent of "polymorphism
//! over the capability set `{dispatch, name, description}}`".

use crate::errors::EngineError;
use crate::state::SimulationState;
use crate::transition::StateTransition;

/// A `StateTransition` over `SimulationState<M>` that produces a recoverable
/// success/failure result — the payload every `Action<M>` dispatches to.
pub type SimulationAction<M> = StateTransition<SimulationState<M>, Result<(), EngineError>>;

/// A named, described unit of work dispatchable by the scheduler.
///
/// No inheritance is implied; concrete actions include [`AnonymousAction`]
/// (holds only a wrapped transition) and the engine-internal
/// [`crate::internal_actions::EndWarmUpAction`] /
/// [`crate::internal_actions::EndSnapAction`].
pub trait Action<M> {
    /// Produces the state-transition the scheduler runs when this action's
    /// event fires.
    fn dispatch(&self) -> SimulationAction<M>;

    /// A short, stable identifier for logging and diagnostics.
    fn name(&self) -> &str;

    /// A human-readable description of what this action does.
    fn description(&self) -> &str;
}

/// The simplest `Action<M>`: wraps a `SimulationAction<M>` directly,
/// `dispatch` returns it unchanged.
pub struct AnonymousAction<M> {
    name: String,
    description: String,
    transition: SimulationAction<M>,
}

impl<M> AnonymousAction<M> {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        transition: SimulationAction<M>,
    ) -> Self {
        AnonymousAction {
            name: name.into(),
            description: description.into(),
            transition,
        }
    }
}

impl<M> Action<M> for AnonymousAction<M> {
    fn dispatch(&self) -> SimulationAction<M> {
        self.transition.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl<M: 'static> From<SimulationAction<M>> for AnonymousAction<M> {
    /// Anonymous actions may be synthesized implicitly from a
    /// `SimulationAction<M>` value, per the scheduler contract.
    fn from(transition: SimulationAction<M>) -> Self {
        AnonymousAction::new("anonymous", "an unnamed state transition", transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_action_dispatches_its_wrapped_transition() {
        let transition: SimulationAction<i32> =
            StateTransition::new(|mut s: SimulationState<i32>| {
                s.model_state += 1;
                (s, Ok(()))
            });
        let action = AnonymousAction::new("bump", "increments model state", transition);
        let state = SimulationState::new(0);
        let (state, result) = action.dispatch().run(state);
        assert_eq!(result, Ok(()));
        assert_eq!(state.model_state, 1);
    }

    #[test]
    fn from_simulation_action_gives_anonymous_defaults() {
        let transition: SimulationAction<()> = StateTransition::pure(Ok(()));
        let action: AnonymousAction<()> = transition.into();
        assert_eq!(action.name(), "anonymous");
    }
}
