use failure::Fail;

/// Sometimes, bad stuff happens.
///
/// An illegal chess move is *not* an error.  Validators and `Rules::is_valid_move` answer with a
/// `bool`, and `Game::try_move` reports a rejected move as `Ok(false)`.  These variants describe
/// caller bugs and bad input.
#[derive(Clone, Debug, Fail, PartialEq, Eq)]
pub enum Error {
    /// A coordinate outside the board was dereferenced
    #[fail(display = "Square ({}, {}) is outside of the board", col, row)]
    OutOfRange { col: i8, row: i8 },

    /// The square text could not be parsed
    #[fail(display = "Invalid square: {}", square)]
    InvalidSquare { square: String },

    /// The piece letter could not be parsed
    #[fail(display = "Invalid piece: {}", piece)]
    InvalidPiece { piece: String },
}
