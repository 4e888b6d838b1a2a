//! # desim::transition
//!
//! `StateTransition<S, A>` is a pure function `S -> (S, A)`, implemented as
//! an explicit combinator type wrapping `Rc<dyn Fn(S) -> (S, A)>`. This is
//! the language-neutral "small combinator type with `and_then`-style
//! operations" strategy: the scheduler API (`at`, `time`,
//! `update_model_state`) reads naturally as values of this type that
//! callers compose with `.flat_map(...)`.
//!
//! Sequencing and short-circuiting (`take_until`, `take_until_failure`) are
//! implemented with plain `for`/`while` loops rather than recursion, so
//! neither they nor the run loop built on top of them consume stack
//! proportional to the number of events processed.

use std::rc::Rc;

/// A pure function from a state to a pair (new state, produced value).
pub struct StateTransition<S, A> {
    run: Rc<dyn Fn(S) -> (S, A)>,
}

impl<S, A> Clone for StateTransition<S, A> {
    fn clone(&self) -> Self {
        StateTransition {
            run: Rc::clone(&self.run),
        }
    }
}

impl<S, A> StateTransition<S, A> {
    /// Wraps a plain function as a `StateTransition`.
    pub fn new(f: impl Fn(S) -> (S, A) + 'static) -> Self {
        StateTransition { run: Rc::new(f) }
    }

    /// Runs the transition against `state`, producing the updated state and
    /// the value it computed.
    pub fn run(&self, state: S) -> (S, A) {
        (self.run)(state)
    }

    /// Transforms the produced value, leaving the state computation as-is.
    pub fn map<B>(&self, f: impl Fn(A) -> B + 'static) -> StateTransition<S, B>
    where
        S: 'static,
        A: 'static,
    {
        let this = self.clone();
        StateTransition::new(move |s| {
            let (s2, a) = this.run(s);
            (s2, f(a))
        })
    }

    /// Sequences: runs `self`, then runs `k(result)` against the updated
    /// state.
    pub fn flat_map<B>(&self, k: impl Fn(A) -> StateTransition<S, B> + 'static) -> StateTransition<S, B>
    where
        S: 'static,
        A: 'static,
    {
        let this = self.clone();
        StateTransition::new(move |s| {
            let (s2, a) = this.run(s);
            k(a).run(s2)
        })
    }
}

impl<S: 'static, A: Clone + 'static> StateTransition<S, A> {
    /// Produces `a` with no state change.
    pub fn pure(a: A) -> Self {
        StateTransition::new(move |s| (s, a.clone()))
    }
}

impl<S: 'static, A> StateTransition<S, A> {
    /// A read-only projection: `inspect(f)` is `s -> (s, f(&s))`.
    pub fn inspect(f: impl Fn(&S) -> A + 'static) -> Self {
        StateTransition::new(move |s| {
            let a = f(&s);
            (s, a)
        })
    }
}

/// Runs `transitions` in order against `state`, stopping after the first
/// whose `(state, result)` pair satisfies `predicate` and returning that
/// result. If every transition runs without satisfying `predicate`, returns
/// `termination` against the final state.
///
/// Iterates the transition list with a plain `for` loop — never recursion —
/// so stack usage is independent of how many transitions are processed by
/// any transition in the list (in particular, a transition built around its
/// own internal `while` loop, as the run loop's "remaining events" phase is).
pub fn take_until<S, A>(
    transitions: &[StateTransition<S, A>],
    termination: A,
    predicate: impl Fn(&S, &A) -> bool + 'static,
) -> StateTransition<S, A>
where
    S: 'static,
    A: Clone + 'static,
{
    let transitions = transitions.to_vec();
    StateTransition::new(move |mut state: S| {
        for t in &transitions {
            let (next_state, result) = t.run(state);
            state = next_state;
            if predicate(&state, &result) {
                return (state, result);
            }
        }
        let result = termination.clone();
        (state, result)
    })
}

/// Specialization of [`take_until`] for `Result<(), E>`-producing
/// transitions: stop at (and propagate) the first failure.
pub fn take_until_failure<S, E>(transitions: &[StateTransition<S, Result<(), E>>]) -> StateTransition<S, Result<(), E>>
where
    S: 'static,
    E: Clone + 'static,
{
    take_until(transitions, Ok(()), |_state, result| result.is_err())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_leaves_state_unchanged() {
        let t: StateTransition<i32, &'static str> = StateTransition::pure("value");
        let (s, a) = t.run(7);
        assert_eq!(s, 7);
        assert_eq!(a, "value");
    }

    #[test]
    fn inspect_is_read_only() {
        let t: StateTransition<i32, i32> = StateTransition::inspect(|s| *s * 2);
        let (s, a) = t.run(5);
        assert_eq!(s, 5);
        assert_eq!(a, 10);
    }

    #[test]
    fn map_transforms_result_not_state() {
        let t: StateTransition<i32, i32> = StateTransition::new(|s| (s + 1, s));
        let mapped = t.map(|a| a * 10);
        let (s, a) = mapped.run(1);
        assert_eq!(s, 2);
        assert_eq!(a, 10);
    }

    #[test]
    fn flat_map_sequences_against_updated_state() {
        let t: StateTransition<i32, i32> = StateTransition::new(|s| (s + 1, s));
        let chained = t.flat_map(|first| StateTransition::new(move |s: i32| (s + 1, (first, s))));
        let (s, (first, second)) = chained.run(0);
        assert_eq!(s, 2);
        assert_eq!(first, 0);
        assert_eq!(second, 1);
    }

    #[test]
    fn take_until_failure_short_circuits_on_first_error() {
        let ts: Vec<StateTransition<i32, Result<(), &'static str>>> = vec![
            StateTransition::new(|s| (s + 1, Ok(()))),
            StateTransition::new(|s| (s + 1, Err("boom"))),
            StateTransition::new(|s| (s + 100, Ok(()))),
        ];
        let combined = take_until_failure(&ts);
        let (s, result) = combined.run(0);
        assert_eq!(s, 2, "the third transition must not run");
        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn take_until_failure_runs_to_completion_when_all_succeed() {
        let ts: Vec<StateTransition<i32, Result<(), &'static str>>> = vec![
            StateTransition::new(|s| (s + 1, Ok(()))),
            StateTransition::new(|s| (s + 1, Ok(()))),
        ];
        let combined = take_until_failure(&ts);
        let (s, result) = combined.run(0);
        assert_eq!(s, 2);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn take_until_returns_termination_when_predicate_never_satisfied() {
        let ts: Vec<StateTransition<i32, i32>> = vec![
            StateTransition::new(|s| (s + 1, 0)),
            StateTransition::new(|s| (s + 1, 0)),
        ];
        let combined = take_until(&ts, -1, |_s, a| *a > 0);
        let (s, result) = combined.run(0);
        assert_eq!(s, 2);
        assert_eq!(result, -1);
    }

    #[test]
    fn take_until_is_stack_safe_over_many_transitions_in_a_single_inner_loop() {
        // Models the run loop's "remaining events" shape: one
        // StateTransition built around an internal while loop, so the list
        // passed to take_until always has a small fixed size regardless of
        // how much work the inner loop does.
        let big_loop: StateTransition<i64, Result<(), &'static str>> = StateTransition::new(|mut s| {
            for _ in 0..1_000_000 {
                s += 1;
            }
            (s, Ok(()))
        });
        let combined = take_until_failure(std::slice::from_ref(&big_loop));
        let (s, result) = combined.run(0);
        assert_eq!(s, 1_000_000);
        assert_eq!(result, Ok(()));
    }
}
