use crate::attacks::{DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
use crate::chess_move::Move;
use crate::color::Side;
use crate::piece::{PieceType, PROMOTION_TYPES};
use crate::position::Position;
use crate::square::Square;
use crate::validate::Rules;
use arrayvec::ArrayVec;
use std::iter::ExactSizeIterator;

/// Enough room for every legal move of a single piece.  A queen in the middle of an empty board
/// reaches 27 squares, and a pawn promoting on three squares yields 12 moves.
pub const MAX_PIECE_MOVES: usize = 32;

/// The legal moves of one piece.
pub type MoveList = ArrayVec<Move, MAX_PIECE_MOVES>;

/// What is the status of a side to move?
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Eq, Hash)]
pub enum BoardStatus {
    Ongoing,
    Stalemate,
    Checkmate,
}

/// An incremental legal move generator.
///
/// Candidate destinations come from the geometry of each piece, and every candidate is run
/// through the `Rules` pipeline.  Only moves the pipeline accepts are produced.
///
/// ```
/// use chess_rules::{MoveGen, Position, Rules, Side};
///
/// let rules = Rules::standard();
/// let position = Position::standard();
///
/// let iterable = MoveGen::new_legal(&rules, &position, Side::White);
/// assert_eq!(iterable.len(), 20);
///
/// let mut count = 0;
/// for mv in iterable {
///     assert_eq!(mv.piece().unwrap().side(), Side::White);
///     count += 1;
/// }
/// assert_eq!(count, 20);
/// ```
#[derive(Clone, Debug)]
pub struct MoveGen {
    moves: Vec<Move>,
    index: usize,
}

impl MoveGen {
    /// Create a new `MoveGen` over every legal move of `side`.
    pub fn new_legal(rules: &Rules, position: &Position, side: Side) -> MoveGen {
        let mut moves = vec![];
        for cell in position.pieces(side) {
            moves.extend(MoveGen::legal_moves_from(rules, position, cell.square()));
        }
        MoveGen { moves, index: 0 }
    }

    /// Every legal move of the piece on `square`.  A pawn reaching its last row yields one move
    /// per promotion choice.  An empty or off-board square has no moves.
    ///
    /// ```
    /// use chess_rules::{MoveGen, Position, Rules, Square};
    ///
    /// let rules = Rules::standard();
    /// let moves = MoveGen::legal_moves_from(&rules, &Position::standard(), Square::new(1, 0));
    /// let targets: Vec<String> = moves.iter().map(|mv| mv.to().to_string()).collect();
    /// assert_eq!(targets, vec!["c3", "a3"]);
    /// ```
    pub fn legal_moves_from(rules: &Rules, position: &Position, square: Square) -> MoveList {
        let mut result = MoveList::new();
        let piece = match position.piece_on(square) {
            Some(piece) => piece,
            None => return result,
        };

        for dest in MoveGen::candidates(piece.kind(), piece.side(), square) {
            if piece.kind() == PieceType::Pawn && dest.row() == piece.side().promotion_row() {
                for promotion in PROMOTION_TYPES.iter() {
                    let promotion = Some(*promotion);
                    MoveGen::push_if_legal(rules, position, square, dest, promotion, &mut result);
                }
            } else {
                MoveGen::push_if_legal(rules, position, square, dest, None, &mut result);
            }
        }
        result
    }

    /// Can the piece on `square` move at all?
    pub fn has_available_moves(rules: &Rules, position: &Position, square: Square) -> bool {
        !MoveGen::legal_moves_from(rules, position, square).is_empty()
    }

    /// Every legal move of `side`.
    pub fn legal_moves(rules: &Rules, position: &Position, side: Side) -> Vec<Move> {
        MoveGen::new_legal(rules, position, side).collect()
    }

    /// Is `side` mated, stalemated, or still playing?
    ///
    /// ```
    /// use chess_rules::{BoardStatus, MoveGen, PieceType, PositionBuilder, Rules, Side, Square};
    ///
    /// let position = PositionBuilder::new()
    ///     .piece(Square::new(7, 7), PieceType::King, Side::Black)
    ///     .moved_piece(Square::new(6, 6), PieceType::Queen, Side::White)
    ///     .moved_piece(Square::new(5, 5), PieceType::King, Side::White)
    ///     .build();
    ///
    /// let rules = Rules::standard();
    /// assert_eq!(MoveGen::status(&rules, &position, Side::Black), BoardStatus::Checkmate);
    /// assert_eq!(MoveGen::status(&rules, &position, Side::White), BoardStatus::Ongoing);
    /// ```
    pub fn status(rules: &Rules, position: &Position, side: Side) -> BoardStatus {
        let can_move = position
            .pieces(side)
            .any(|cell| MoveGen::has_available_moves(rules, position, cell.square()));
        if can_move {
            BoardStatus::Ongoing
        } else if position.is_in_check(side) {
            BoardStatus::Checkmate
        } else {
            BoardStatus::Stalemate
        }
    }

    fn push_if_legal(
        rules: &Rules,
        position: &Position,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
        result: &mut MoveList,
    ) {
        if let Ok(mv) = position.make_move(from, to, promotion) {
            if rules.is_valid_move(position, &mv) {
                result.push(mv);
            }
        }
    }

    /// Every on-board square a piece of this kind could reach from `from` on an empty board.
    fn candidates(kind: PieceType, side: Side, from: Square) -> Vec<Square> {
        let steps = |offsets: &[(i8, i8)]| -> Vec<Square> {
            offsets
                .iter()
                .filter_map(|&(dcol, drow)| from.offset(dcol, drow))
                .collect()
        };
        let rays = |directions: &[(i8, i8)]| -> Vec<Square> {
            let mut result = vec![];
            for &(dcol, drow) in directions {
                let mut current = from.offset(dcol, drow);
                while let Some(sq) = current {
                    result.push(sq);
                    current = sq.offset(dcol, drow);
                }
            }
            result
        };

        match kind {
            PieceType::King => {
                let mut result = steps(&KING_OFFSETS);
                result.extend(steps(&[(2, 0), (-2, 0)]));
                result
            }
            PieceType::Knight => steps(&KNIGHT_OFFSETS),
            PieceType::Pawn => {
                let forward = side.forward();
                steps(&[(0, forward), (0, 2 * forward), (-1, forward), (1, forward)])
            }
            PieceType::Rook => rays(&ORTHOGONALS),
            PieceType::Bishop => rays(&DIAGONALS),
            PieceType::Queen => {
                let mut result = rays(&ORTHOGONALS);
                result.extend(rays(&DIAGONALS));
                result
            }
        }
    }
}

impl ExactSizeIterator for MoveGen {
    /// Give the exact length of this iterator
    fn len(&self) -> usize {
        self.moves.len() - self.index
    }
}

impl Iterator for MoveGen {
    type Item = Move;

    /// Give a size_hint to some functions that need it
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    /// Find the next chess move.
    fn next(&mut self) -> Option<Move> {
        let result = self.moves.get(self.index).copied();
        if result.is_some() {
            self.index += 1;
        }
        result
    }
}
