//! Game rules on top of the core data structures.
//!
//! - [`GameState`] - immutable game state; every player action yields a new state
//! - [`Command`] - the player actions a front end can send
//! - [`Sequencer`] - where the next shape comes from ([`BagSequencer`], [`FixedSequencer`])
//! - [`Lfsr16`] / [`EntropySource`] - injectable randomness for the bag
//! - [`GameConfig`] - serde-friendly description of a new game
//!
//! # Game Flow
//!
//! 1. Build a [`GameState`] from a sequencer (or a [`GameConfig`])
//! 2. Apply [`Command`]s; rejected commands leave the state unchanged
//! 3. A hard drop, or a soft drop on a resting piece, locks the piece,
//!    clears completed rows and spawns the next shape
//! 4. Locking a piece that still sticks out above the board ends the game
//!
//! # Example
//!
//! ```
//! use quadris_engine::{Command, GameState};
//!
//! let mut state = GameState::default();
//! while !state.is_game_over() {
//!     state = state.apply(Command::HardDrop);
//! }
//! assert!(state.locked_pieces() > 0);
//! assert_eq!(state.apply(Command::MoveLeft), state);
//! ```

pub use self::{config::*, entropy::*, game_state::*, sequencer::*};

mod config;
mod entropy;
mod game_state;
mod sequencer;
