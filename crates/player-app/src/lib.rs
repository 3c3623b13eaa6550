//! Quirkverse Player App - client-side application layer.
//!
//! Everything here talks to the outside world through the traits in
//! `quirkverse-player-ports`; adapters are injected by the composition root.

pub mod application;
