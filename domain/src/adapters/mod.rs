//! Repository adapters that live inside the domain crate.
//!
//! The fixture adapter is the only data source the service has; a real
//! backing store would live in its own crate.

pub mod fixture_repo;
