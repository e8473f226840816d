//! Core rules of a 4x4 sliding-tile merge game.
//!
//! The crate is split in two layers:
//! - A pure transition engine ([`move_left`], [`Board::shift`], ...) that maps a
//!   board and a [`Direction`] to a [`MoveResult`].
//! - A [`Session`] that owns the mutable game state (score, best score, undo/redo
//!   history, win/over flags) and applies random spawns after every successful move.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use twenty48::{Direction, MoveOutcome, Session};
//!
//! let mut session = Session::new(StdRng::seed_from_u64(7));
//! assert_eq!(session.board().count_empty(), 14);
//! match session.make_move(Direction::Left) {
//!     MoveOutcome::Moved { .. } => assert!(session.can_undo()),
//!     _ => assert!(!session.can_undo()),
//! }
//! ```
pub use board::*;
pub use errors::*;
pub use session::*;
pub use snapshot::*;
pub use transition::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod session;
mod snapshot;
mod transition;
mod visualization;
