use crate::chess_move::Move;
use crate::color::Side;
use crate::piece::{Piece, PieceType};
use crate::position::Position;
use crate::square::{Square, NUM_SQUARES};

/// Builds a `Position` with pieces placed anywhere.
///
/// This structure is useful in the following cases:
/// * You are trying to build a chess position manually in code.
/// * You want a partial board (no kings, a lone pawn) for testing a single rule.
/// * You want pieces that count as already moved, or a position that remembers a prior move.
///
/// Nothing placed here is checked for legality.  Squares off the board are ignored.
///
/// ```
/// use chess_rules::{PieceType, PositionBuilder, Side, Square};
///
/// let position = PositionBuilder::new()
///     .piece(Square::new(4, 0), PieceType::King, Side::White)
///     .moved_piece(Square::new(0, 0), PieceType::Rook, Side::White)
///     .build();
///
/// assert!(!position.piece_on(Square::new(4, 0)).unwrap().has_moved());
/// assert!(position.piece_on(Square::new(0, 0)).unwrap().has_moved());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct PositionBuilder {
    pieces: [Option<Piece>; NUM_SQUARES],
    last_move: Option<Move>,
}

impl PositionBuilder {
    /// Construct a new, empty, PositionBuilder.
    pub fn new() -> PositionBuilder {
        PositionBuilder {
            pieces: [None; NUM_SQUARES],
            last_move: None,
        }
    }

    /// Set up a builder with every listed piece, all unmoved.
    ///
    /// ```
    /// use chess_rules::{PieceType, PositionBuilder, Side, Square};
    ///
    /// let position = PositionBuilder::setup(&[
    ///     (Square::new(4, 0), PieceType::King, Side::White),
    ///     (Square::new(4, 7), PieceType::King, Side::Black),
    /// ])
    /// .build();
    ///
    /// assert_eq!(position.king_square(Side::Black), Some(Square::new(4, 7)));
    /// ```
    pub fn setup<'a>(
        pieces: impl IntoIterator<Item = &'a (Square, PieceType, Side)>,
    ) -> PositionBuilder {
        let mut result = PositionBuilder::new();
        for (square, kind, side) in pieces.into_iter() {
            result.piece(*square, *kind, *side);
        }
        result
    }

    /// Get the piece placed on `square`, if any.
    pub fn get(&self, square: Square) -> Option<Piece> {
        square.to_index().ok().and_then(|i| self.pieces[i])
    }

    /// Place an unmoved piece on a square, replacing whatever was there.
    pub fn piece<'a>(&'a mut self, square: Square, kind: PieceType, side: Side) -> &'a mut Self {
        self.place(square, Some(Piece::new(kind, side)))
    }

    /// Place a piece that counts as having moved already.
    pub fn moved_piece<'a>(
        &'a mut self,
        square: Square,
        kind: PieceType,
        side: Side,
    ) -> &'a mut Self {
        self.place(square, Some(Piece::new(kind, side).into_moved()))
    }

    /// Clear a square on the board.
    pub fn clear_square<'a>(&'a mut self, square: Square) -> &'a mut Self {
        self.place(square, None)
    }

    /// Remember `mv` as the move that led to this position.  En-passant depends on it.
    pub fn last_move<'a>(&'a mut self, mv: Move) -> &'a mut Self {
        self.last_move = Some(mv);
        self
    }

    /// Produce the `Position`.
    pub fn build(&self) -> Position {
        let mut position = Position::new();
        for square in Square::all() {
            position.put(square, self.get(square));
        }
        position.set_last_move(self.last_move);
        position
    }

    fn place<'a>(&'a mut self, square: Square, piece: Option<Piece>) -> &'a mut Self {
        if let Ok(i) = square.to_index() {
            self.pieces[i] = piece;
        }
        self
    }
}

impl Default for PositionBuilder {
    fn default() -> PositionBuilder {
        PositionBuilder::new()
    }
}

impl From<&PositionBuilder> for Position {
    fn from(builder: &PositionBuilder) -> Position {
        builder.build()
    }
}

impl From<PositionBuilder> for Position {
    fn from(builder: PositionBuilder) -> Position {
        builder.build()
    }
}

impl From<&Position> for PositionBuilder {
    fn from(position: &Position) -> PositionBuilder {
        let mut result = PositionBuilder::new();
        for square in Square::all() {
            result.place(square, position.piece_on(square));
        }
        result.last_move = position.last_move().copied();
        result
    }
}

impl From<Position> for PositionBuilder {
    fn from(position: Position) -> PositionBuilder {
        (&position).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_standard() {
        let position = Position::standard();
        let builder: PositionBuilder = position.into();
        assert_eq!(builder.build(), position);
    }

    #[test]
    fn clear_and_replace() {
        let mut builder: PositionBuilder = Position::standard().into();
        builder
            .clear_square(Square::new(0, 0))
            .piece(Square::new(1, 0), PieceType::Queen, Side::Black);
        let position: Position = builder.into();
        assert!(!position.is_occupied(Square::new(0, 0)));
        assert!(position
            .piece_on(Square::new(1, 0))
            .unwrap()
            .is(PieceType::Queen, Side::Black));
    }

    #[test]
    fn off_board_squares_are_ignored() {
        let position = PositionBuilder::new()
            .piece(Square::new(8, 8), PieceType::Rook, Side::White)
            .build();
        assert_eq!(position, Position::new());
    }

    #[test]
    fn last_move_is_kept() {
        let standard = Position::standard();
        let mv = standard
            .make_move(Square::new(1, 6), Square::new(1, 4), None)
            .unwrap();
        let position = PositionBuilder::new().last_move(mv).build();
        assert_eq!(position.last_move(), Some(&mv));
    }
}
