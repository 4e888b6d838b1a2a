//! # desim::run_state
//!
//! The engine's lifecycle phases. Transitions form a DAG:
//! `Initializing -> Executing -> {Completed, Terminated}`; there are no
//! return transitions, and no variant is ever revisited.

use std::fmt;

/// The engine-lifecycle phase of a [`crate::state::SimulationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Before `initialize` has run. Scheduling is allowed (the
    /// initialization action may schedule events); iteration is not.
    Initializing,
    /// The run loop is actively popping and dispatching events.
    Executing,
    /// The event queue was exhausted before the final snap completed.
    /// Terminal: no further scheduling or iteration.
    Terminated,
    /// The final snap completed successfully. Terminal: no further
    /// scheduling or iteration.
    Completed,
}

impl RunState {
    /// Whether the run loop may pop and dispatch another event from this
    /// state.
    pub fn can_iterate(self) -> bool {
        matches!(self, RunState::Executing)
    }

    /// Whether `scheduler::at` may enqueue a new event from this state.
    pub fn can_schedule(self) -> bool {
        matches!(self, RunState::Initializing | RunState::Executing)
    }

    /// Whether this is one of the two states from which the run loop never
    /// resumes (`Terminated` or `Completed`).
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Terminated | RunState::Completed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Initializing => "Initializing",
            RunState::Executing => "Executing",
            RunState::Terminated => "Terminated",
            RunState::Completed => "Completed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(RunState::Initializing, false, true; "initializing")]
    #[test_case(RunState::Executing, true, true; "executing")]
    #[test_case(RunState::Terminated, false, false; "terminated")]
    #[test_case(RunState::Completed, false, false; "completed")]
    fn flags_match_table(state: RunState, can_iterate: bool, can_schedule: bool) {
        assert_eq!(state.can_iterate(), can_iterate);
        assert_eq!(state.can_schedule(), can_schedule);
    }

    #[test]
    fn terminal_states_are_terminated_and_completed_only() {
        assert!(!RunState::Initializing.is_terminal());
        assert!(!RunState::Executing.is_terminal());
        assert!(RunState::Terminated.is_terminal());
        assert!(RunState::Completed.is_terminal());
    }
}
