//! # desim::event
//!
//! The scheduler's heap element: a due-time, a priority, a monotonic
//! creation-order id, and the action payload that fires when the event is
//! dispatched.

use std::cmp::Ordering;
use std::rc::Rc;

use desim_types::Time;

use crate::action::Action;

/// A scheduled `(due_at, priority, id, action)` tuple.
///
/// Ordering (used as the heap key) compares `due_at` ascending, then
/// `priority` ascending (lower fires first), then `id` ascending. The `id`
/// is unique for the lifetime of one simulation run, so no two distinct
/// events ever compare equal.
pub struct Event<M> {
    /// Unique, monotonically increasing creation-order identifier.
    pub id: u64,
    /// Absolute simulation time at which the action runs.
    pub due_at: Time,
    /// Smaller fires first at a given `due_at`.
    pub priority: i32,
    /// The payload dispatched when this event fires.
    pub action: Rc<dyn Action<M>>,
}

impl<M> Event<M> {
    pub fn new(id: u64, due_at: Time, priority: i32, action: Rc<dyn Action<M>>) -> Self {
        Event {
            id,
            due_at,
            priority,
            action,
        }
    }
}

impl<M> Clone for Event<M> {
    fn clone(&self) -> Self {
        Event {
            id: self.id,
            due_at: self.due_at,
            priority: self.priority,
            action: Rc::clone(&self.action),
        }
    }
}

impl<M> std::fmt::Debug for Event<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.id)
            .field("due_at", &self.due_at)
            .field("priority", &self.priority)
            .field("action", &self.action.name())
            .finish()
    }
}

impl<M> PartialEq for Event<M> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<M> Eq for Event<M> {}

impl<M> PartialOrd for Event<M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<M> Ord for Event<M> {
    fn cmp(&self, other: &Self) -> Ordering {
        let ordering = self
            .due_at
            .cmp(&other.due_at)
            .then_with(|| self.priority.cmp(&other.priority))
            .then_with(|| self.id.cmp(&other.id));

        debug_assert!(
            ordering != Ordering::Equal || self.id == other.id,
            "two distinct events must never compare equal"
        );
        ordering
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::AnonymousAction;
    use crate::transition::StateTransition;

    fn noop_action<M: 'static>() -> Rc<dyn Action<M>> {
        Rc::new(AnonymousAction::new(
            "noop",
            "does nothing",
            StateTransition::pure(Ok(())),
        ))
    }

    fn event(id: u64, due_at: u64, priority: i32) -> Event<()> {
        Event::new(
            id,
            Time::from_nanos(due_at as u128),
            priority,
            noop_action(),
        )
    }

    #[test]
    fn orders_by_due_at_first() {
        let earlier = event(5, 10, 0);
        let later = event(1, 20, 0);
        assert!(earlier < later);
    }

    #[test]
    fn ties_on_due_at_broken_by_priority() {
        let high_priority = event(1, 10, -1);
        let low_priority = event(2, 10, 10);
        assert!(high_priority < low_priority);
    }

    #[test]
    fn ties_on_due_at_and_priority_broken_by_id() {
        let first = event(1, 10, 0);
        let second = event(2, 10, 0);
        assert!(first < second);
    }

    #[test]
    fn an_event_compares_equal_only_to_itself() {
        let e = event(1, 10, 0);
        assert_eq!(e.cmp(&e), Ordering::Equal);
    }
}
