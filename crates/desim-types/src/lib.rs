//! # desim-types
//!
//! Foundational types shared by the `desim` engine and its host models.
//! This crate deliberately vendors only the sliver of the typed
//! physical-quantity system the engine core actually consumes: a `Time`
//! value with total order, addition, subtraction, and a zero origin. It is
//! not the full unit-converting quantity system (`Length`, `Velocity`, ...)
//! that a complete simulation stack would carry; that system is external to
//! this workspace.

#![forbid(unsafe_code)]

pub mod time;

pub use time::Time;
