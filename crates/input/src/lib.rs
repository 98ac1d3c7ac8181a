//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Soft drop is
//! a held key: a press starts it and a release stops it. Terminals that never
//! report releases are handled by the runner with a timeout.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, handle_key_release, is_soft_drop_key, should_quit};
