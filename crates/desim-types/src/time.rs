//! # desim-types::time
//!
//! The engine's only external quantity dependency: a `Time` value with total
//! order, addition, subtraction, and a zero origin. Simulation time is
//! discrete and represented in nanoseconds, matching the unsigned
//! fixed-point time base convention used across the corpus this crate was
//! vendored from (an unsigned tick count rather than a floating-point
//! clock). This is a minimal stand-in for the full typed physical-quantity
//! system (`Length`, `Velocity`, unit converters, ...); that system lives
//! outside this workspace.

use std::fmt;
use std::ops::{Add, Sub};

/// A point (or duration) in simulation time, in nanoseconds.
///
/// `Time` doubles as both an absolute instant (`Event::due_at`) and a
/// duration (`delay`, `warm_up_period`, `snap_length`) — the engine never
/// needs to distinguish the two, since both support the same total order,
/// addition, and subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(u128);

impl Time {
    /// The start of simulation time. Also the additive identity.
    pub const ZERO: Time = Time(0);

    /// Returns the zero origin of simulation time.
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Constructs a `Time` from a raw nanosecond count.
    pub fn from_nanos(nanos: u128) -> Self {
        Time(nanos)
    }

    /// Constructs a `Time` from a microsecond count.
    pub fn from_micros(us: u64) -> Self {
        Time(us as u128 * 1_000)
    }

    /// Constructs a `Time` from a millisecond count.
    pub fn from_millis(ms: u64) -> Self {
        Time(ms as u128 * 1_000_000)
    }

    /// Constructs a `Time` from a whole-second count.
    pub fn from_secs(s: u64) -> Self {
        Time(s as u128 * 1_000_000_000)
    }

    /// The raw nanosecond count backing this value.
    pub fn as_nanos(self) -> u128 {
        self.0
    }

    /// Adds two `Time` values, returning `None` on overflow instead of
    /// panicking. Used at the one call site (`Event::due_at` computation)
    /// where the engine prefers to surface overflow as a typed error rather
    /// than a panic.
    pub fn checked_add(self, rhs: Time) -> Option<Time> {
        self.0.checked_add(rhs.0).map(Time)
    }

    /// Subtracts two `Time` values, returning `None` if the result would be
    /// negative (simulation time must not run backwards).
    pub fn checked_sub(self, rhs: Time) -> Option<Time> {
        self.0.checked_sub(rhs.0).map(Time)
    }
}

impl Add for Time {
    type Output = Time;

    /// Panics on overflow: exhausting a `u128` nanosecond counter is a
    /// programming error, not a recoverable simulation condition.
    fn add(self, rhs: Time) -> Time {
        self.checked_add(rhs)
            .expect("Time addition overflowed u128 nanoseconds")
    }
}

impl Sub for Time {
    type Output = Time;

    /// Panics if the subtraction would produce a negative duration; the
    /// engine never subtracts an earlier `Time` from a later one in a way
    /// that should underflow, by the invariant that simulation time is
    /// monotonically non-decreasing.
    fn sub(self, rhs: Time) -> Time {
        self.checked_sub(rhs)
            .expect("Time subtraction underflowed: simulation time must not run backwards")
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}
