use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// How many squares are along one edge of the board?
pub const BOARD_SIZE: i8 = 8;

/// How many squares are there?
pub const NUM_SQUARES: usize = 64;

/// Represent a square on the chess board as a (column, row) pair.
///
/// Column 0 is the a-file and row 0 is White's back rank.  A `Square` may hold coordinates that
/// lie off the board; anything that dereferences it (`Position::get`) checks the range, and the
/// bounds validator rejects moves that leave the board.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct Square {
    col: i8,
    row: i8,
}

impl Square {
    /// Make a square given a column and a row.
    ///
    /// ```
    /// use chess_rules::Square;
    ///
    /// let e4 = Square::new(4, 3);
    /// assert_eq!(e4.to_string(), "e4");
    /// assert!(e4.is_on_board());
    /// assert!(!Square::new(8, 0).is_on_board());
    /// ```
    #[inline]
    pub const fn new(col: i8, row: i8) -> Square {
        Square { col, row }
    }

    /// Return the column (file) of this square.
    #[inline]
    pub fn col(&self) -> i8 {
        self.col
    }

    /// Return the row (rank) of this square.
    #[inline]
    pub fn row(&self) -> i8 {
        self.row
    }

    /// Are both coordinates within [0, 8)?
    #[inline]
    pub fn is_on_board(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.col) && (0..BOARD_SIZE).contains(&self.row)
    }

    /// Shift this square by the given deltas.  Returns `None` if the result leaves the board.
    #[inline]
    pub fn offset(&self, dcol: i8, drow: i8) -> Option<Square> {
        let sq = Square::new(self.col.checked_add(dcol)?, self.row.checked_add(drow)?);
        if sq.is_on_board() {
            Some(sq)
        } else {
            None
        }
    }

    /// Convert this square to an index in `[0, 64)`, or fail if it is off the board.
    #[inline]
    pub fn to_index(&self) -> Result<usize, Error> {
        if self.is_on_board() {
            Ok((self.row * BOARD_SIZE + self.col) as usize)
        } else {
            Err(Error::OutOfRange {
                col: self.col,
                row: self.row,
            })
        }
    }

    /// Iterate every square of the board, a1 first, h8 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(col, row)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_on_board() {
            write!(
                f,
                "{}{}",
                (b'a' + self.col as u8) as char,
                (b'1' + self.row as u8) as char
            )
        } else {
            write!(f, "({}, {})", self.col, self.row)
        }
    }
}

impl FromStr for Square {
    type Err = Error;

    /// Parse algebraic notation such as `"e4"`.
    ///
    /// ```
    /// use chess_rules::Square;
    ///
    /// assert_eq!("a1".parse::<Square>().unwrap(), Square::new(0, 0));
    /// assert_eq!("h8".parse::<Square>().unwrap(), Square::new(7, 7));
    /// assert!("i1".parse::<Square>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSquare {
            square: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        match (bytes[0], bytes[1]) {
            (file @ b'a'..=b'h', rank @ b'1'..=b'8') => {
                Ok(Square::new((file - b'a') as i8, (rank - b'1') as i8))
            }
            _ => Err(invalid()),
        }
    }
}
