//! UUID Matcher - swipe through randomly generated UUID profiles
//!
//! This library provides the profile generator, the swipe session state
//! machine with its timer-driven controller, share-link encoding, and the
//! HTTP surface that exposes them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ProfileGenerator, RandomSource, SessionController, SessionRules, Sharer, SwipeTiming};
pub use crate::models::{Direction, Profile, SessionView};
