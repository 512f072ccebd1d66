//! # Rust Chess Rules Library
//! This is a chess move legality library, written in rust.
//!
//! A `Position` is a plain 8x8 grid of cells.  Every proposed `Move` is run through the validator
//! pipeline of the moving piece (see `Rules`), and a legal move is applied to a copy of the
//! position, so nothing the caller holds is ever modified.
//!
//! ## Examples
//!
//! ```
//! use chess_rules::{Game, MoveGen, Position, Rules, Side, Square};
//!
//! let rules = Rules::standard();
//! let position = Position::standard();
//!
//! let e2e4 = position.make_move(Square::new(4, 1), Square::new(4, 3), None).unwrap();
//! assert!(rules.is_valid_move(&position, &e2e4));
//!
//! let after = position.apply(&e2e4);
//! assert_eq!(MoveGen::legal_moves(&rules, &after, Side::Black).len(), 20);
//!
//! let mut game = Game::new();
//! assert_eq!(game.try_move(Square::new(4, 1), Square::new(4, 3), None), Ok(true));
//! assert_eq!(game.current_position(), &after);
//! ```

mod color;
pub use crate::color::*;

mod piece;
pub use crate::piece::*;

mod square;
pub use crate::square::*;

mod cell;
pub use crate::cell::*;

mod chess_move;
pub use crate::chess_move::*;

mod position;
pub use crate::position::*;

mod position_builder;
pub use crate::position_builder::*;

pub mod attacks;

mod validate;
pub use crate::validate::*;

mod movegen;
pub use crate::movegen::*;

mod game;
pub use crate::game::*;

mod error;
pub use crate::error::*;
