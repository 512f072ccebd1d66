use crate::chess_move::{Move, MoveKind, KINGSIDE_KING_COL, QUEENSIDE_KING_COL};
use crate::piece::{PieceType, ALL_PIECE_TYPES, NUM_PIECE_TYPES};
use crate::position::Position;
use crate::square::Square;
use log::trace;
use std::fmt;

/// A single legality predicate.
///
/// Validators hold no state of their own.  The position they consult for occupancy, paths and
/// attacks is handed in on every call and is never modified.
pub trait Validator: Sync {
    /// Name used when reporting which validator rejected a move.
    fn name(&self) -> &'static str;

    /// Does `mv` pass this check on `position`?
    fn validate(&self, position: &Position, mv: &Move) -> bool;
}

/// The destination lies on the board.
pub struct BordersBreach;
/// A piece cannot stay where it is.
pub struct DepartureEqualsDestination;
/// The destination is empty or holds an opposing piece.
pub struct NotAllyOccupied;
/// Squares strictly between departure and destination on a shared row or column are empty.
pub struct LinePath;
/// Squares strictly between departure and destination on a shared diagonal are empty.
pub struct DiagonalPath;
pub struct RookShape;
pub struct BishopShape;
pub struct QueenShape;
pub struct KnightShape;
/// One step in any direction, or two columns sideways for castling.
pub struct KingShape;
/// Pawn pushes, double pushes, captures and en-passant.
pub struct PawnMove;
/// All castling preconditions.  Passes any move that is not a castle.
pub struct Castling;
/// A promoting pawn must become a queen, rook, bishop or knight.
pub struct PromotionType;
/// The mover's king is not attacked once the move is made.
pub struct KingSafety;

/// Walk from `from` to `to` (both exclusive) and report whether every square is empty.
///
/// `from` and `to` must share a row, column or diagonal.
fn path_is_clear(position: &Position, from: Square, to: Square) -> bool {
    let step_col = (to.col() - from.col()).signum();
    let step_row = (to.row() - from.row()).signum();
    let mut current = Square::new(from.col() + step_col, from.row() + step_row);
    while current != to {
        if position.is_occupied(current) {
            return false;
        }
        current = Square::new(current.col() + step_col, current.row() + step_row);
    }
    true
}

impl Validator for BordersBreach {
    fn name(&self) -> &'static str {
        "BordersBreach"
    }

    fn validate(&self, _: &Position, mv: &Move) -> bool {
        mv.to().is_on_board()
    }
}

impl Validator for DepartureEqualsDestination {
    fn name(&self) -> &'static str {
        "DepartureEqualsDestination"
    }

    fn validate(&self, _: &Position, mv: &Move) -> bool {
        mv.from() != mv.to()
    }
}

impl Validator for NotAllyOccupied {
    fn name(&self) -> &'static str {
        "NotAllyOccupied"
    }

    fn validate(&self, _: &Position, mv: &Move) -> bool {
        match (mv.piece(), mv.destination().piece()) {
            (Some(mover), Some(target)) => mover.side() != target.side(),
            _ => true,
        }
    }
}

impl Validator for LinePath {
    fn name(&self) -> &'static str {
        "LinePath"
    }

    fn validate(&self, position: &Position, mv: &Move) -> bool {
        if mv.col_delta() != 0 && mv.row_delta() != 0 {
            return true;
        }
        mv.from() == mv.to() || path_is_clear(position, mv.from(), mv.to())
    }
}

impl Validator for DiagonalPath {
    fn name(&self) -> &'static str {
        "DiagonalPath"
    }

    fn validate(&self, position: &Position, mv: &Move) -> bool {
        if mv.col_delta() == 0 || mv.col_delta().abs() != mv.row_delta().abs() {
            return true;
        }
        path_is_clear(position, mv.from(), mv.to())
    }
}

impl Validator for RookShape {
    fn name(&self) -> &'static str {
        "RookShape"
    }

    fn validate(&self, _: &Position, mv: &Move) -> bool {
        mv.col_delta() == 0 || mv.row_delta() == 0
    }
}

impl Validator for BishopShape {
    fn name(&self) -> &'static str {
        "BishopShape"
    }

    fn validate(&self, _: &Position, mv: &Move) -> bool {
        mv.col_delta().abs() == mv.row_delta().abs()
    }
}

impl Validator for QueenShape {
    fn name(&self) -> &'static str {
        "QueenShape"
    }

    fn validate(&self, position: &Position, mv: &Move) -> bool {
        RookShape.validate(position, mv) || BishopShape.validate(position, mv)
    }
}

impl Validator for KnightShape {
    fn name(&self) -> &'static str {
        "KnightShape"
    }

    fn validate(&self, _: &Position, mv: &Move) -> bool {
        match (mv.col_delta().abs(), mv.row_delta().abs()) {
            (1, 2) | (2, 1) => true,
            _ => false,
        }
    }
}

impl Validator for KingShape {
    fn name(&self) -> &'static str {
        "KingShape"
    }

    fn validate(&self, _: &Position, mv: &Move) -> bool {
        let (cols, rows) = (mv.col_delta().abs(), mv.row_delta().abs());
        (cols <= 1 && rows <= 1) || (cols == 2 && rows == 0)
    }
}

impl PawnMove {
    /// Did the previous move push an opposing pawn two rows to land beside the mover, on the
    /// column the mover is heading to?
    fn is_en_passant(position: &Position, mv: &Move) -> bool {
        let side = match mv.piece() {
            Some(piece) => piece.side(),
            None => return false,
        };
        let passed = Square::new(mv.to().col(), mv.from().row());
        match position.last_move() {
            Some(last) => {
                last.is_double_pawn_push()
                    && last.piece().map(|p| p.side()) == Some(!side)
                    && last.to() == passed
                    && position
                        .piece_on(passed)
                        .map_or(false, |p| p.is(PieceType::Pawn, !side))
            }
            None => false,
        }
    }
}

impl Validator for PawnMove {
    fn name(&self) -> &'static str {
        "PawnMove"
    }

    fn validate(&self, position: &Position, mv: &Move) -> bool {
        let pawn = match mv.piece() {
            Some(piece) => piece,
            None => return false,
        };
        let distance = mv.row_delta() * i16::from(pawn.side().forward());
        let target = mv.destination().piece();

        match mv.col_delta().abs() {
            0 => target.is_none() && (distance == 1 || (distance == 2 && !pawn.has_moved())),
            1 if distance == 1 => match target {
                Some(victim) => victim.side() != pawn.side(),
                None => PawnMove::is_en_passant(position, mv),
            },
            _ => false,
        }
    }
}

impl Validator for Castling {
    fn name(&self) -> &'static str {
        "Castling"
    }

    fn validate(&self, position: &Position, mv: &Move) -> bool {
        let rook_from = match mv.kind() {
            MoveKind::Castle { rook_from, .. } => rook_from,
            _ => return true,
        };
        let king = match mv.piece() {
            Some(piece) => piece,
            None => return false,
        };
        if king.has_moved() {
            return false;
        }

        let row = king.side().home_row();
        let (from, to) = (mv.from(), mv.to());
        if from.row() != row || !(to.col() == QUEENSIDE_KING_COL || to.col() == KINGSIDE_KING_COL) {
            return false;
        }

        match position.piece_on(rook_from) {
            Some(rook) if rook.is(PieceType::Rook, king.side()) && !rook.has_moved() => {}
            _ => return false,
        }

        if !path_is_clear(position, from, rook_from) {
            return false;
        }

        // the king may not castle out of, through, or into check
        let (low, high) = (from.col().min(to.col()), from.col().max(to.col()));
        (low..=high).all(|col| !position.is_attacked(Square::new(col, row), king.side()))
    }
}

impl Validator for PromotionType {
    fn name(&self) -> &'static str {
        "PromotionType"
    }

    fn validate(&self, _: &Position, mv: &Move) -> bool {
        match mv.kind() {
            MoveKind::Promotion { promote_to } => {
                promote_to.map_or(false, |kind| kind.is_promotion_target())
            }
            _ => true,
        }
    }
}

impl Validator for KingSafety {
    fn name(&self) -> &'static str {
        "KingSafety"
    }

    fn validate(&self, position: &Position, mv: &Move) -> bool {
        let side = match mv.piece() {
            Some(piece) => piece.side(),
            None => return false,
        };
        let after = position.apply(mv);
        after
            .king_square(side)
            .map_or(true, |king| !after.is_attacked(king, side))
    }
}

/// The validator pipeline for every piece type.
///
/// Each piece type owns an ordered list of validators.  A move is legal when every validator in
/// the list of the moving piece accepts it; evaluation stops at the first rejection.  Cheap
/// geometric checks come first and `KingSafety`, which simulates the move, comes last.
///
/// ```
/// use chess_rules::{Position, Rules, Square};
///
/// let rules = Rules::standard();
/// let position = Position::standard();
///
/// let e4 = position.make_move(Square::new(4, 1), Square::new(4, 3), None).unwrap();
/// let e5 = position.make_move(Square::new(4, 1), Square::new(4, 4), None).unwrap();
/// assert!(rules.is_valid_move(&position, &e4));
/// assert!(!rules.is_valid_move(&position, &e5));
/// ```
#[derive(Clone)]
pub struct Rules {
    validators: [Vec<&'static dyn Validator>; NUM_PIECE_TYPES],
}

impl Rules {
    /// The rules of chess.
    pub fn standard() -> Rules {
        let mut rules = Rules {
            validators: Default::default(),
        };
        for kind in ALL_PIECE_TYPES.iter() {
            let mut list: Vec<&'static dyn Validator> = vec![
                &BordersBreach as &dyn Validator,
                &DepartureEqualsDestination,
                &NotAllyOccupied,
            ];
            match kind {
                PieceType::King => {
                    list.extend_from_slice(&[&KingShape as &dyn Validator, &Castling]);
                }
                PieceType::Pawn => {
                    list.extend_from_slice(&[
                        &LinePath as &dyn Validator,
                        &PawnMove,
                        &PromotionType,
                    ]);
                }
                PieceType::Rook => {
                    list.extend_from_slice(&[&RookShape as &dyn Validator, &LinePath]);
                }
                PieceType::Knight => {
                    list.push(&KnightShape);
                }
                PieceType::Bishop => {
                    list.extend_from_slice(&[&BishopShape as &dyn Validator, &DiagonalPath]);
                }
                PieceType::Queen => {
                    list.extend_from_slice(&[
                        &QueenShape as &dyn Validator,
                        &LinePath,
                        &DiagonalPath,
                    ]);
                }
            }
            list.push(&KingSafety);
            rules.validators[kind.to_index()] = list;
        }
        rules
    }

    /// Replace the validator list of one piece type.
    pub fn with_validators(
        mut self,
        kind: PieceType,
        validators: Vec<&'static dyn Validator>,
    ) -> Rules {
        self.validators[kind.to_index()] = validators;
        self
    }

    /// The validators run for `kind`, in order.
    pub fn validators(&self, kind: PieceType) -> &[&'static dyn Validator] {
        &self.validators[kind.to_index()]
    }

    /// Run the pipeline of the moving piece.  A move from an empty cell is never valid.
    pub fn is_valid_move(&self, position: &Position, mv: &Move) -> bool {
        let piece = match mv.piece() {
            Some(piece) => piece,
            None => {
                trace!("{} rejected: no piece on the departure square", mv);
                return false;
            }
        };
        for validator in self.validators(piece.kind()) {
            if !validator.validate(position, mv) {
                trace!("{} rejected by {}", mv, validator.name());
                return false;
            }
        }
        true
    }
}

impl Default for Rules {
    fn default() -> Rules {
        Rules::standard()
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in ALL_PIECE_TYPES.iter() {
            let names: Vec<&str> = self.validators(*kind).iter().map(|v| v.name()).collect();
            map.entry(kind, &names);
        }
        map.finish()
    }
}
