use crate::cell::Cell;
use crate::piece::{Piece, PieceType};
use crate::square::Square;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Column the king lands on when castling long.
pub const QUEENSIDE_KING_COL: i8 = 2;
/// Column the king lands on when castling short.
pub const KINGSIDE_KING_COL: i8 = 6;

/// What sort of transition a `Move` describes.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum MoveKind {
    /// Any move that is neither a castle nor a promotion, captures and en-passant included.
    Plain,
    /// A king moving two columns, with the companion rook squares.
    Castle { rook_from: Square, rook_to: Square },
    /// A pawn landing on its last row.  `None` means the caller did not pick a piece.
    Promotion { promote_to: Option<PieceType> },
}

/// A proposed move.
///
/// Both cells are snapshots taken when the move is built, so a `Move` never looks at the board
/// again.  The `MoveKind` is inferred from the departure piece and the geometry; callers never
/// choose it.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub struct Move {
    departure: Cell,
    destination: Cell,
    kind: MoveKind,
}

impl Move {
    /// Create a new move from the departure and destination cells, and an optional promotion
    /// choice.  The promotion choice is ignored unless a pawn lands on its last row.
    ///
    /// ```
    /// use chess_rules::{Cell, Move, MoveKind, Piece, PieceType, Side, Square};
    ///
    /// let king = Cell::occupied_by(Square::new(4, 0), Piece::new(PieceType::King, Side::White));
    /// let mv = Move::new(king, Cell::empty(Square::new(6, 0)), None);
    ///
    /// assert_eq!(
    ///     mv.kind(),
    ///     MoveKind::Castle { rook_from: Square::new(7, 0), rook_to: Square::new(5, 0) }
    /// );
    /// ```
    pub fn new(departure: Cell, destination: Cell, promotion: Option<PieceType>) -> Move {
        let kind = match departure.piece() {
            Some(piece) if Move::is_castle_geometry(piece, &departure, &destination) => {
                let row = piece.side().home_row();
                if destination.square().col() == QUEENSIDE_KING_COL {
                    MoveKind::Castle {
                        rook_from: Square::new(0, row),
                        rook_to: Square::new(3, row),
                    }
                } else {
                    MoveKind::Castle {
                        rook_from: Square::new(7, row),
                        rook_to: Square::new(5, row),
                    }
                }
            }
            Some(piece)
                if piece.kind() == PieceType::Pawn
                    && destination.square().row() == piece.side().promotion_row() =>
            {
                MoveKind::Promotion {
                    promote_to: promotion,
                }
            }
            _ => MoveKind::Plain,
        };

        Move {
            departure,
            destination,
            kind,
        }
    }

    fn is_castle_geometry(piece: Piece, departure: &Cell, destination: &Cell) -> bool {
        let from = departure.square();
        let to = destination.square();
        let cols = i16::from(to.col()) - i16::from(from.col());
        piece.kind() == PieceType::King && cols.abs() == 2 && to.row() == from.row()
    }

    #[inline]
    pub fn departure(&self) -> &Cell {
        &self.departure
    }

    #[inline]
    pub fn destination(&self) -> &Cell {
        &self.destination
    }

    #[inline]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn from(&self) -> Square {
        self.departure.square()
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn to(&self) -> Square {
        self.destination.square()
    }

    /// The piece being moved, as it stood when the move was built.
    #[inline]
    pub fn piece(&self) -> Option<Piece> {
        self.departure.piece()
    }

    /// Get the promotion choice (maybe).
    #[inline]
    pub fn promotion(&self) -> Option<PieceType> {
        match self.kind {
            MoveKind::Promotion { promote_to } => promote_to,
            _ => None,
        }
    }

    /// Column delta, destination minus departure.  Widened so that squares anywhere in the `i8`
    /// range cannot overflow.
    #[inline]
    pub fn col_delta(&self) -> i16 {
        i16::from(self.to().col()) - i16::from(self.from().col())
    }

    /// Row delta, destination minus departure.
    #[inline]
    pub fn row_delta(&self) -> i16 {
        i16::from(self.to().row()) - i16::from(self.from().row())
    }

    /// Did a pawn advance two rows with this move?
    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece().map(|p| p.kind()) == Some(PieceType::Pawn)
            && self.col_delta() == 0
            && self.row_delta().abs() == 2
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.promotion() {
            None => write!(f, "{}{}", self.from(), self.to()),
            Some(x) => write!(f, "{}{}{}", self.from(), self.to(), x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Side;

    fn cell(col: i8, row: i8, piece: Option<(PieceType, Side)>) -> Cell {
        Cell::new(
            Square::new(col, row),
            piece.map(|(kind, side)| Piece::new(kind, side)),
        )
    }

    #[test]
    fn queenside_castle_rook_squares() {
        let mv = Move::new(
            cell(4, 7, Some((PieceType::King, Side::Black))),
            cell(2, 7, None),
            None,
        );
        assert_eq!(
            mv.kind(),
            MoveKind::Castle {
                rook_from: Square::new(0, 7),
                rook_to: Square::new(3, 7)
            }
        );
    }

    #[test]
    fn single_king_step_is_plain() {
        let mv = Move::new(
            cell(4, 0, Some((PieceType::King, Side::White))),
            cell(5, 0, None),
            None,
        );
        assert_eq!(mv.kind(), MoveKind::Plain);
    }

    #[test]
    fn pawn_on_last_row_is_promotion() {
        let mv = Move::new(
            cell(0, 1, Some((PieceType::Pawn, Side::Black))),
            cell(0, 0, None),
            Some(PieceType::Knight),
        );
        assert_eq!(
            mv.kind(),
            MoveKind::Promotion {
                promote_to: Some(PieceType::Knight)
            }
        );
        assert_eq!(mv.to_string(), "a2a1n");
    }

    #[test]
    fn promotion_choice_ignored_elsewhere() {
        let mv = Move::new(
            cell(0, 1, Some((PieceType::Pawn, Side::White))),
            cell(0, 3, None),
            Some(PieceType::Queen),
        );
        assert_eq!(mv.kind(), MoveKind::Plain);
        assert_eq!(mv.promotion(), None);
        assert!(mv.is_double_pawn_push());
        assert_eq!(mv.to_string(), "a2a4");
    }

    #[test]
    fn cells_are_snapshots() {
        let departure = cell(1, 0, Some((PieceType::Knight, Side::White)));
        let mv = Move::new(departure, cell(2, 2, None), None);
        assert_eq!(*mv.departure(), departure);
        assert_eq!(mv.col_delta(), 1);
        assert_eq!(mv.row_delta(), 2);
        assert!(!mv.is_double_pawn_push());
    }

    #[test]
    fn deltas_at_the_ends_of_the_range() {
        let mv = Move::new(
            cell(i8::MIN, i8::MAX, Some((PieceType::King, Side::White))),
            cell(i8::MAX, i8::MIN, None),
            None,
        );
        assert_eq!(mv.col_delta(), 255);
        assert_eq!(mv.row_delta(), -255);
        assert_eq!(mv.kind(), MoveKind::Plain);
    }
}
