//! Small persisted client-side stores

pub mod personality_progress;

pub use personality_progress::{PersonalityProgress, PersonalityProgressStore};
