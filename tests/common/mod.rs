//! Integration test common infrastructure.
//!
//! Builds a watchdog over an in-memory world with a recording gateway so
//! tests can assert on the alerts it would have posted.

pub mod harness;

#[allow(unused_imports)]
pub use harness::{Harness, Recorded, players};
