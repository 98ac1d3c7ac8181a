//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of a single-player falling-block game: the
//! board, the seven piece kinds and their rotations, the bag randomizer,
//! scoring and the session state machine. It has no dependencies on terminal,
//! input or any other I/O:
//!
//! - **Deterministic**: the same seed (or the same injected random source)
//!   produces the same sequence of pieces
//! - **Testable**: the session is driven only by elapsed milliseconds and
//!   discrete commands
//! - **Portable**: any front-end can render a [`GameSnapshot`]
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and row clearing
//! - [`pieces`]: shape table, rotation and the kick search
//! - [`rng`]: 7-bag piece supply over an injectable random source
//! - [`scoring`]: line and drop points, levels and fall speed
//! - [`game_state`]: the per-game session tying everything together
//! - [`snapshot`]: a copyable view for rendering
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](game_state::GameSession::tick) with the
//! milliseconds elapsed since the previous call. A piece falls one row each
//! time the accumulated time reaches the fall interval (700ms at level 1,
//! 50ms while soft dropping).

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowList};
pub use game_state::{ActivePiece, GameSession};
pub use pieces::{get_shape, try_rotate, PieceShape, Tetromino};
pub use rng::{PieceSupply, RandomSource, SimpleRng};
pub use scoring::{
    calculate_drop_score, calculate_level, fall_interval_ms, line_clear_points, ScoreTracker,
};
pub use snapshot::{ActiveSnapshot, GameSnapshot, GridSnapshot};
