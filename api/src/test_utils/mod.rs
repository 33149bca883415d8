//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory provider behaves like the contract for the operations the
//! services use (likes move the counter, follows edit the follower set, new
//! records get the next id) so service tests can assert on state, not calls.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
