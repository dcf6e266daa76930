//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation
//! logic. It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: the orchestrator owns a single seeded RNG, so the same
//!   seed reproduces the piece sequence and every Hard-mode roll
//! - **Testable**: unit tests for all game rules live next to the code
//! - **Portable**: can run in any environment (terminal, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision queries, locking, and line clearing
//! - [`piece`]: 4x4 piece matrices, pure translate/rotate transforms, wall kicks
//! - [`rng`]: seeded LCG used for piece draws and mode event rolls
//! - [`scoring`]: classic line-clear points and the level/drop-speed curve
//! - [`effects`]: the stackable speed-up and slow-down drop-interval modifiers
//! - [`modes`]: the Normal/Fun/Hard/Mixed strategy hooks
//! - [`game`]: the logical-tick orchestrator tying everything together
//!
//! # Example
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_types::{InputKey, ModeKind};
//!
//! let mut game = Game::new(12345, ModeKind::Normal);
//! game.step(Some(InputKey::Right));
//! game.step(Some(InputKey::HardDrop));
//! // The dropped piece is committed at the bottom of the board.
//! assert!(game.board().cells().iter().any(|c| c.is_solid()));
//! ```

pub mod board;
pub mod effects;
pub mod game;
pub mod modes;
pub mod piece;
pub mod rng;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use effects::{EffectScheduler, SpeedEffect};
pub use game::Game;
pub use modes::{Mode, ModeCtx};
pub use piece::{try_rotate_cw, Piece};
pub use rng::SimpleRng;
pub use scoring::ScoreState;
