use crate::attacks;
use crate::cell::Cell;
use crate::chess_move::{Move, MoveKind};
use crate::color::Side;
use crate::error::Error;
use crate::piece::{Piece, PieceType};
use crate::square::{Square, BOARD_SIZE};
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

const SIZE: usize = BOARD_SIZE as usize;

/// Back-rank piece order, column 0 first.
const BACK_RANK: [PieceType; SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// A representation of a chess position: an 8x8 grid of `Cell`s plus the move that produced it.
///
/// Positions are copy-on-make.  `apply` returns a new `Position` and leaves `self` alone, which is
/// what lets the validators simulate a move and throw the result away.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Position {
    cells: [[Cell; SIZE]; SIZE],
    last_move: Option<Move>,
}

impl Position {
    /// Construct a new `Position` that is completely empty.
    /// Note: This does NOT give you the initial position.  Just a blank slate.
    ///
    /// ```
    /// use chess_rules::{Position, Square};
    ///
    /// let position = Position::new();
    /// assert!(Square::all().all(|sq| !position.get(sq).unwrap().is_occupied()));
    /// ```
    pub fn new() -> Position {
        let mut cells = [[Cell::empty(Square::new(0, 0)); SIZE]; SIZE];
        for (row, cols) in cells.iter_mut().enumerate() {
            for (col, cell) in cols.iter_mut().enumerate() {
                *cell = Cell::empty(Square::new(col as i8, row as i8));
            }
        }
        Position {
            cells,
            last_move: None,
        }
    }

    /// The standard starting position.  No piece has moved.
    ///
    /// ```
    /// use chess_rules::{PieceType, Position, Side, Square};
    ///
    /// let position = Position::standard();
    /// let king = position.piece_on(Square::new(4, 0)).unwrap();
    /// assert!(king.is(PieceType::King, Side::White));
    /// assert!(!king.has_moved());
    /// ```
    pub fn standard() -> Position {
        let mut position = Position::new();
        for side in [Side::White, Side::Black].iter() {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                let col = col as i8;
                position.put(Square::new(col, side.home_row()), Some(Piece::new(*kind, *side)));
                position.put(
                    Square::new(col, side.pawn_row()),
                    Some(Piece::new(PieceType::Pawn, *side)),
                );
            }
        }
        position
    }

    /// Get the cell at `square`.
    ///
    /// Fails with `Error::OutOfRange` if either coordinate lies outside the board.
    pub fn get(&self, square: Square) -> Result<Cell, Error> {
        self.cell(square).copied().ok_or(Error::OutOfRange {
            col: square.col(),
            row: square.row(),
        })
    }

    /// Overwrite the cell at `cell.square()`.
    ///
    /// Nothing about the position is validated here; callers keep it coherent.
    pub fn set(&mut self, cell: Cell) -> Result<(), Error> {
        let square = cell.square();
        match self.cell_mut(square) {
            Some(slot) => {
                *slot = cell;
                Ok(())
            }
            None => Err(Error::OutOfRange {
                col: square.col(),
                row: square.row(),
            }),
        }
    }

    /// A deep copy of this position.  Equivalent to `clone()`, spelled out for readers of the
    /// validation code.
    #[inline]
    pub fn copy(&self) -> Position {
        *self
    }

    /// What piece is on a particular `Square`?  Is there even one?  Off-board squares hold
    /// nothing.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.cell(square).and_then(|cell| cell.piece())
    }

    /// Is anything standing on `square`?
    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_on(square).is_some()
    }

    /// The move that produced this position, if it was produced by `apply`.
    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    pub(crate) fn set_last_move(&mut self, last_move: Option<Move>) {
        self.last_move = last_move;
    }

    /// Iterate the occupied cells that belong to `side`.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = &Cell> + '_ {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(move |cell| cell.piece().map(|p| p.side()) == Some(side))
    }

    /// Where is the king of `side`?  Partial boards may not have one.
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces(side)
            .find(|cell| cell.piece().map(|p| p.kind()) == Some(PieceType::King))
            .map(|cell| cell.square())
    }

    /// Is `square` attacked by the side opposite to `side`?  See `attacks::is_attacked`.
    #[inline]
    pub fn is_attacked(&self, square: Square, side: Side) -> bool {
        attacks::is_attacked(self, square, side)
    }

    /// Is the king of `side` attacked?  False when that king is not on the board.
    pub fn is_in_check(&self, side: Side) -> bool {
        self.king_square(side)
            .map_or(false, |king| self.is_attacked(king, side))
    }

    /// Snapshot the two cells and build the `Move` between them.
    ///
    /// ```
    /// use chess_rules::{MoveKind, PieceType, Position, Square};
    ///
    /// let position = Position::standard();
    /// let mv = position.make_move(Square::new(4, 1), Square::new(4, 3), None).unwrap();
    /// assert_eq!(mv.kind(), MoveKind::Plain);
    /// assert!(position.make_move(Square::new(4, 1), Square::new(4, 8), None).is_err());
    /// ```
    pub fn make_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<Move, Error> {
        Ok(Move::new(self.get(from)?, self.get(to)?, promotion))
    }

    /// Make a move on a copy of this position and return the copy.
    ///
    /// Nothing is validated; run the move through `Rules::is_valid_move` first.  The moving piece
    /// (and the rook, when castling) is flagged as moved, a promoted pawn is replaced by the chosen
    /// piece, an en-passant capture removes the passed pawn, and the move is recorded as the new
    /// position's last move.
    ///
    /// ```
    /// use chess_rules::{Position, Square};
    ///
    /// let position = Position::standard();
    /// let mv = position.make_move(Square::new(6, 0), Square::new(5, 2), None).unwrap();
    /// let after = position.apply(&mv);
    ///
    /// assert!(after.piece_on(Square::new(5, 2)).unwrap().has_moved());
    /// assert!(after.piece_on(Square::new(6, 0)).is_none());
    /// assert!(position.piece_on(Square::new(6, 0)).is_some());
    /// ```
    pub fn apply(&self, mv: &Move) -> Position {
        let mut result = *self;
        let piece = match mv.piece() {
            Some(piece) => piece,
            None => return result,
        };
        let (from, to) = (mv.from(), mv.to());

        // e.p. capture: the pawn changes column but the destination is empty
        if piece.kind() == PieceType::Pawn && from.col() != to.col() && !self.is_occupied(to) {
            let passed = Square::new(to.col(), from.row());
            if self
                .piece_on(passed)
                .map_or(false, |p| p.is(PieceType::Pawn, !piece.side()))
            {
                result.put(passed, None);
            }
        }

        let landed = match mv.kind() {
            MoveKind::Promotion {
                promote_to: Some(kind),
            } => Piece::new(kind, piece.side()).into_moved(),
            _ => piece.into_moved(),
        };
        result.put(from, None);
        result.put(to, Some(landed));

        if let MoveKind::Castle { rook_from, rook_to } = mv.kind() {
            if let Some(rook) = self.piece_on(rook_from) {
                result.put(rook_from, None);
                result.put(rook_to, Some(rook.into_moved()));
            }
        }

        result.last_move = Some(*mv);
        result
    }

    fn cell(&self, square: Square) -> Option<&Cell> {
        if square.is_on_board() {
            Some(&self.cells[square.row() as usize][square.col() as usize])
        } else {
            None
        }
    }

    fn cell_mut(&mut self, square: Square) -> Option<&mut Cell> {
        if square.is_on_board() {
            Some(&mut self.cells[square.row() as usize][square.col() as usize])
        } else {
            None
        }
    }

    pub(crate) fn put(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(cell) = self.cell_mut(square) {
            *cell = Cell::new(square, piece);
        }
    }
}

impl Default for Position {
    /// The starting position.
    #[inline]
    fn default() -> Position {
        Position::standard()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..BOARD_SIZE {
                match self.piece_on(Square::new(col, row)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   A  B  C  D  E  F  G  H")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position_builder::PositionBuilder;

    fn sq(col: i8, row: i8) -> Square {
        Square::new(col, row)
    }

    #[test]
    fn empty_board_cells_know_their_squares() {
        let position = Position::new();
        for square in Square::all() {
            let cell = position.get(square).expect("on board");
            assert_eq!(cell.square(), square);
            assert!(!cell.is_occupied());
        }
        assert!(position.last_move().is_none());
    }

    #[test]
    fn standard_setup() {
        let position = Position::standard();
        assert_eq!(position.pieces(Side::White).count(), 16);
        assert_eq!(position.pieces(Side::Black).count(), 16);
        assert_eq!(position.king_square(Side::White), Some(sq(4, 0)));
        assert_eq!(position.king_square(Side::Black), Some(sq(4, 7)));
        assert!(position
            .piece_on(sq(3, 7))
            .unwrap()
            .is(PieceType::Queen, Side::Black));
        assert!(position
            .piece_on(sq(5, 6))
            .unwrap()
            .is(PieceType::Pawn, Side::Black));
        assert!(position
            .pieces(Side::White)
            .all(|cell| !cell.piece().unwrap().has_moved()));
        assert_eq!(Position::default(), position);
    }

    #[test]
    fn get_out_of_range() {
        let position = Position::new();
        assert_eq!(
            position.get(sq(8, 0)),
            Err(Error::OutOfRange { col: 8, row: 0 })
        );
        assert_eq!(
            position.get(sq(0, -1)),
            Err(Error::OutOfRange { col: 0, row: -1 })
        );
    }

    #[test]
    fn set_then_get() {
        let mut position = Position::new();
        let cell = Cell::occupied_by(sq(2, 5), Piece::new(PieceType::Bishop, Side::Black));
        position.set(cell).expect("on board");
        assert_eq!(position.get(sq(2, 5)), Ok(cell));
        assert_eq!(position.get(sq(2, 5)), position.get(sq(2, 5)));
        assert!(position.set(Cell::empty(sq(2, 8))).is_err());
    }

    #[test]
    fn copy_is_independent() {
        let original = Position::standard();
        let mut copy = original.copy();
        copy.put(sq(0, 1), None);
        assert!(original.is_occupied(sq(0, 1)));
        assert!(!copy.is_occupied(sq(0, 1)));
    }

    #[test]
    fn apply_leaves_original_untouched() {
        let position = Position::standard();
        let before = position.copy();
        let mv = position.make_move(sq(4, 1), sq(4, 3), None).unwrap();
        let after = position.apply(&mv);
        assert_eq!(position, before);
        assert_ne!(after, before);
        assert_eq!(after.last_move(), Some(&mv));
    }

    #[test]
    fn apply_capture() {
        let position = PositionBuilder::new()
            .piece(sq(0, 0), PieceType::Rook, Side::White)
            .piece(sq(0, 5), PieceType::Knight, Side::Black)
            .build();
        let mv = position.make_move(sq(0, 0), sq(0, 5), None).unwrap();
        let after = position.apply(&mv);
        let rook = after.piece_on(sq(0, 5)).unwrap();
        assert!(rook.is(PieceType::Rook, Side::White));
        assert!(rook.has_moved());
        assert_eq!(after.pieces(Side::Black).count(), 0);
    }

    #[test]
    fn apply_castle_moves_rook() {
        let position = PositionBuilder::new()
            .piece(sq(4, 7), PieceType::King, Side::Black)
            .piece(sq(7, 7), PieceType::Rook, Side::Black)
            .build();
        let mv = position.make_move(sq(4, 7), sq(6, 7), None).unwrap();
        let after = position.apply(&mv);
        assert!(after.piece_on(sq(6, 7)).unwrap().is(PieceType::King, Side::Black));
        let rook = after.piece_on(sq(5, 7)).unwrap();
        assert!(rook.is(PieceType::Rook, Side::Black));
        assert!(rook.has_moved());
        assert!(!after.is_occupied(sq(7, 7)));
        assert!(!after.is_occupied(sq(4, 7)));
    }

    #[test]
    fn apply_promotion_replaces_pawn() {
        let position = PositionBuilder::new()
            .piece(sq(3, 6), PieceType::Pawn, Side::White)
            .build();
        let mv = position
            .make_move(sq(3, 6), sq(3, 7), Some(PieceType::Knight))
            .unwrap();
        let knight = position.apply(&mv).piece_on(sq(3, 7)).unwrap();
        assert!(knight.is(PieceType::Knight, Side::White));
        assert!(knight.has_moved());
    }

    #[test]
    fn apply_en_passant_removes_passed_pawn() {
        let position = PositionBuilder::new()
            .piece(sq(4, 3), PieceType::Pawn, Side::Black)
            .piece(sq(3, 1), PieceType::Pawn, Side::White)
            .build();
        let push = position.make_move(sq(3, 1), sq(3, 3), None).unwrap();
        let position = position.apply(&push);
        let capture = position.make_move(sq(4, 3), sq(3, 2), None).unwrap();
        let after = position.apply(&capture);
        assert!(after.piece_on(sq(3, 2)).unwrap().is(PieceType::Pawn, Side::Black));
        assert!(!after.is_occupied(sq(3, 3)));
        assert_eq!(after.pieces(Side::White).count(), 0);
    }

    #[test]
    fn display_diagram() {
        let diagram = Position::standard().to_string();
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[0], "8  r  n  b  q  k  b  n  r ");
        assert_eq!(lines[7], "1  R  N  B  Q  K  B  N  R ");
        assert_eq!(lines[4], "4  .  .  .  .  .  .  .  . ");
        assert_eq!(lines[8], "   A  B  C  D  E  F  G  H");
    }
}
