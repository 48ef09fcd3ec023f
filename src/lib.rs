//! poker-dojo: a single-player Texas Hold'em game engine
//!
//! Goals:
//! - A small, deterministic betting state machine (blinds, actions, streets,
//!   showdown) for one human seat against heuristic AI opponents
//! - Deterministic hand evaluation with a totally ordered rank value
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use poker_dojo::cards::{Card, Rank, Suit};
//! use poker_dojo::evaluator::{evaluate_holdem, Category};
//! use poker_dojo::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! ```
//!
//! ## TUI
//! Run the interactive table with:
//! ```sh
//! cargo run --bin poker-dojo
//! ```

pub mod agents;
pub mod cards;
pub mod deck;
pub mod effects;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
