use std::fmt;
use std::ops::Not;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// One of the two competing sides.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(PartialOrd, Ord, PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Side {
    White,
    Black,
}

/// How many sides are there?
pub const NUM_SIDES: usize = 2;
/// List all sides
pub const ALL_SIDES: [Side; NUM_SIDES] = [Side::White, Side::Black];

impl Side {
    /// Convert the `Side` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// The row holding this side's back-rank pieces at the start of the game.
    ///
    /// ```
    /// use chess_rules::Side;
    ///
    /// assert_eq!(Side::White.home_row(), 0);
    /// assert_eq!(Side::Black.home_row(), 7);
    /// ```
    #[inline]
    pub fn home_row(&self) -> i8 {
        match *self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// The row holding this side's pawns at the start of the game.
    #[inline]
    pub fn pawn_row(&self) -> i8 {
        match *self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// The row a pawn of this side promotes on.
    #[inline]
    pub fn promotion_row(&self) -> i8 {
        (!*self).home_row()
    }

    /// Row delta of a single pawn step: +1 for White, -1 for Black.
    #[inline]
    pub fn forward(&self) -> i8 {
        match *self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

impl Not for Side {
    type Output = Side;

    /// Get the other side.
    #[inline]
    fn not(self) -> Side {
        if self == Side::White {
            Side::Black
        } else {
            Side::White
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}
