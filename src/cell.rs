use crate::piece::Piece;
use crate::square::Square;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A single square of a `Position` together with whatever stands on it.
///
/// Occupancy is derived from the piece slot, so a cell can never claim to be occupied while
/// holding no piece (or the reverse).
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub struct Cell {
    square: Square,
    piece: Option<Piece>,
}

impl Cell {
    #[inline]
    pub fn new(square: Square, piece: Option<Piece>) -> Cell {
        Cell { square, piece }
    }

    /// An unoccupied cell.
    #[inline]
    pub fn empty(square: Square) -> Cell {
        Cell::new(square, None)
    }

    /// A cell holding `piece`.
    #[inline]
    pub fn occupied_by(square: Square, piece: Piece) -> Cell {
        Cell::new(square, Some(piece))
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.piece.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Side;
    use crate::piece::PieceType;

    #[test]
    fn occupancy_follows_piece() {
        let sq = Square::new(3, 3);
        assert!(!Cell::empty(sq).is_occupied());
        let cell = Cell::occupied_by(sq, Piece::new(PieceType::Queen, Side::White));
        assert!(cell.is_occupied());
        assert_eq!(cell.square(), sq);
        assert_eq!(cell.piece().map(|p| p.kind()), Some(PieceType::Queen));
    }
}
