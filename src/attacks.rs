use crate::color::Side;
use crate::piece::PieceType;
use crate::position::Position;
use crate::square::Square;

/// The four diagonal directions, as (column, row) steps.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The four orthogonal directions, as (column, row) steps.
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Every square a knight reaches from the origin.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Every square a king reaches from the origin, castling aside.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

/// Is `square` attacked by the side opposite to `side`?
///
/// A square is attacked when some opposing piece could capture on it in one step.  Whose turn it
/// is does not matter, and neither does whether the attacker would expose its own king.  Off-board
/// squares along the way are skipped.
///
/// ```
/// use chess_rules::{attacks, PieceType, Position, PositionBuilder, Side, Square};
///
/// let position = PositionBuilder::new()
///     .piece(Square::new(0, 0), PieceType::Bishop, Side::White)
///     .build();
///
/// assert!(attacks::is_attacked(&position, Square::new(7, 7), Side::Black));
/// assert!(!attacks::is_attacked(&position, Square::new(7, 7), Side::White));
/// assert!(!attacks::is_attacked(&Position::new(), Square::new(3, 3), Side::White));
/// ```
pub fn is_attacked(position: &Position, square: Square, side: Side) -> bool {
    let attacker = !side;

    let slider = |directions: &[(i8, i8)], kinds: &[PieceType]| {
        directions.iter().any(|&(dcol, drow)| {
            first_piece_along(position, square, dcol, drow).map_or(false, |kind_side| {
                kind_side.1 == attacker && kinds.contains(&kind_side.0)
            })
        })
    };
    if slider(&DIAGONALS, &[PieceType::Queen, PieceType::Bishop]) {
        return true;
    }
    if slider(&ORTHOGONALS, &[PieceType::Queen, PieceType::Rook]) {
        return true;
    }

    let stands_on = |offsets: &[(i8, i8)], kind: PieceType| {
        offsets.iter().any(|&(dcol, drow)| {
            square
                .offset(dcol, drow)
                .and_then(|sq| position.piece_on(sq))
                .map_or(false, |p| p.is(kind, attacker))
        })
    };
    if stands_on(&KNIGHT_OFFSETS, PieceType::Knight) {
        return true;
    }

    // opposing pawns capture towards `side`, so they sit one row "forward" of the square
    let forward = side.forward();
    if stands_on(&[(-1, forward), (1, forward)], PieceType::Pawn) {
        return true;
    }

    stands_on(&KING_OFFSETS, PieceType::King)
}

/// The first piece met walking from `square` (exclusive) in steps of (`dcol`, `drow`).
fn first_piece_along(
    position: &Position,
    square: Square,
    dcol: i8,
    drow: i8,
) -> Option<(PieceType, Side)> {
    let mut current = square.offset(dcol, drow);
    while let Some(sq) = current {
        if let Some(piece) = position.piece_on(sq) {
            return Some((piece.kind(), piece.side()));
        }
        current = sq.offset(dcol, drow);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position_builder::PositionBuilder;
    use test_case::test_case;

    fn sq(col: i8, row: i8) -> Square {
        Square::new(col, row)
    }

    fn lone(square: Square, kind: PieceType, side: Side) -> Position {
        PositionBuilder::new().piece(square, kind, side).build()
    }

    #[test]
    fn empty_board_is_never_attacked() {
        let position = Position::new();
        for square in Square::all() {
            assert!(!is_attacked(&position, square, Side::White));
            assert!(!is_attacked(&position, square, Side::Black));
        }
    }

    #[test_case(sq(0, 0), sq(7, 7), true; "main diagonal")]
    #[test_case(sq(0, 7), sq(7, 0), true; "side diagonal")]
    #[test_case(sq(1, 0), sq(7, 7), false; "another diagonal")]
    fn bishop(bishop: Square, target: Square, attacked: bool) {
        let position = lone(bishop, PieceType::Bishop, Side::White);
        assert_eq!(is_attacked(&position, target, Side::Black), attacked);
    }

    #[test]
    fn rook_along_row_and_column() {
        let position = lone(sq(0, 0), PieceType::Rook, Side::White);
        assert!(is_attacked(&position, sq(7, 0), Side::Black));
        assert!(is_attacked(&position, sq(0, 7), Side::Black));
        assert!(!is_attacked(&position, sq(1, 1), Side::Black));
    }

    #[test]
    fn queen_covers_both_ray_sets() {
        let position = lone(sq(3, 3), PieceType::Queen, Side::Black);
        assert!(is_attacked(&position, sq(3, 7), Side::White));
        assert!(is_attacked(&position, sq(6, 6), Side::White));
        assert!(is_attacked(&position, sq(0, 0), Side::White));
        assert!(!is_attacked(&position, sq(4, 5), Side::White));
    }

    #[test]
    fn own_piece_blocks_ray() {
        let position = PositionBuilder::new()
            .piece(sq(0, 0), PieceType::Rook, Side::Black)
            .piece(sq(2, 0), PieceType::Knight, Side::White)
            .build();
        assert!(is_attacked(&position, sq(1, 0), Side::White));
        assert!(!is_attacked(&position, sq(4, 0), Side::White));
    }

    #[test]
    fn wrong_attacker_type_blocks_ray() {
        // a bishop does not attack along a row, and it shields the square behind it
        let position = PositionBuilder::new()
            .piece(sq(0, 0), PieceType::Rook, Side::Black)
            .piece(sq(2, 0), PieceType::Bishop, Side::Black)
            .build();
        assert!(!is_attacked(&position, sq(4, 0), Side::White));
    }

    #[test]
    fn knight() {
        let position = lone(sq(3, 3), PieceType::Knight, Side::Black);
        for &(dcol, drow) in KNIGHT_OFFSETS.iter() {
            assert!(is_attacked(&position, sq(3 + dcol, 3 + drow), Side::White));
        }
        assert!(!is_attacked(&position, sq(4, 4), Side::White));
        assert!(!is_attacked(&position, sq(3, 5), Side::White));
    }

    #[test]
    fn white_pawn_attacks_forward_diagonals() {
        let position = lone(sq(1, 1), PieceType::Pawn, Side::White);
        assert!(is_attacked(&position, sq(0, 2), Side::Black));
        assert!(is_attacked(&position, sq(2, 2), Side::Black));
        assert!(!is_attacked(&position, sq(1, 2), Side::Black));
        assert!(!is_attacked(&position, sq(0, 0), Side::Black));
    }

    #[test]
    fn black_pawn_attacks_downwards() {
        let position = lone(sq(4, 6), PieceType::Pawn, Side::Black);
        assert!(is_attacked(&position, sq(3, 5), Side::White));
        assert!(is_attacked(&position, sq(5, 5), Side::White));
        assert!(!is_attacked(&position, sq(3, 7), Side::White));
    }

    #[test]
    fn king_surroundings() {
        let position = lone(sq(1, 1), PieceType::King, Side::White);
        for &(dcol, drow) in KING_OFFSETS.iter() {
            assert!(is_attacked(&position, sq(1 + dcol, 1 + drow), Side::Black));
        }
        assert!(!is_attacked(&position, sq(3, 1), Side::Black));
    }

    #[test]
    fn squares_at_the_ends_of_the_range() {
        let position = Position::standard();
        for &(col, row) in [(i8::MAX, 0), (i8::MIN, 0), (0, i8::MAX), (i8::MAX, i8::MIN)].iter() {
            assert!(!is_attacked(&position, sq(col, row), Side::White));
            assert!(!is_attacked(&position, sq(col, row), Side::Black));
        }
    }

    #[test]
    fn attacks_ignore_own_side() {
        let position = Position::standard();
        assert!(!is_attacked(&position, sq(4, 0), Side::White));
        assert!(is_attacked(&position, sq(5, 2), Side::Black));
        assert!(is_attacked(&position, sq(5, 5), Side::White));
        assert!(!is_attacked(&position, sq(4, 4), Side::White));
    }
}
