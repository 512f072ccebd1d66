use crate::color::Side;
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Represent a chess piece type as a very simple enum
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub enum PieceType {
    King,
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
}

/// How many piece types are there?
pub const NUM_PIECE_TYPES: usize = 6;

/// An array representing each piece type.
pub const ALL_PIECE_TYPES: [PieceType; NUM_PIECE_TYPES] = [
    PieceType::King,
    PieceType::Pawn,
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
];

/// How many ways can I promote?
pub const NUM_PROMOTION_TYPES: usize = 4;

/// What piece types can a pawn be promoted to?
pub const PROMOTION_TYPES: [PieceType; NUM_PROMOTION_TYPES] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

impl PieceType {
    /// Convert the `PieceType` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Can a pawn be promoted to this type?
    #[inline]
    pub fn is_promotion_target(&self) -> bool {
        PROMOTION_TYPES.contains(self)
    }

    /// Lowercase letter for this piece type.
    pub fn to_char(&self) -> char {
        match *self {
            PieceType::King => 'k',
            PieceType::Pawn => 'p',
            PieceType::Rook => 'r',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Queen => 'q',
        }
    }

    /// Letter for this piece type in the case of the given side: uppercase for White.
    pub fn to_side_char(&self, side: Side) -> char {
        match side {
            Side::White => self.to_char().to_ascii_uppercase(),
            Side::Black => self.to_char(),
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for PieceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPiece {
            piece: s.to_string(),
        };
        let mut chars = s.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(invalid()),
        };
        match c.to_ascii_lowercase() {
            'k' => Ok(PieceType::King),
            'p' => Ok(PieceType::Pawn),
            'r' => Ok(PieceType::Rook),
            'n' => Ok(PieceType::Knight),
            'b' => Ok(PieceType::Bishop),
            'q' => Ok(PieceType::Queen),
            _ => Err(invalid()),
        }
    }
}

/// A piece standing on the board.
///
/// `moved` is real state, not derived: it gates the pawn double step and castling, and once set
/// it is never cleared.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub struct Piece {
    kind: PieceType,
    side: Side,
    moved: bool,
}

impl Piece {
    /// A piece that has not moved yet.
    #[inline]
    pub fn new(kind: PieceType, side: Side) -> Piece {
        Piece {
            kind,
            side,
            moved: false,
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceType {
        self.kind
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Has this piece ever left its square?
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// The same piece, flagged as having moved.
    #[inline]
    pub fn into_moved(self) -> Piece {
        Piece {
            moved: true,
            ..self
        }
    }

    #[inline]
    pub fn is(&self, kind: PieceType, side: Side) -> bool {
        self.kind == kind && self.side == side
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.to_side_char(self.side))
    }
}
