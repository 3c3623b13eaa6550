//! Concrete adapters for the player client ports.

pub mod infrastructure;
