// Piece-square tables for positional evaluation
// All values in centipawns (100 = 1 pawn)
// Laid out from White's side: index 0 is a1, index 63 is h8.
// Black squares are mirrored with `sq ^ 56` before lookup.

use crate::game_repr::{Color, Type};

// Pawn position values - encourage advancement and central control
pub const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,  // Rank 1 (pawns shouldn't be here)
     5, 10, 10,-20,-20, 10, 10,  5,  // Rank 2
     5, -5,-10,  0,  0,-10, -5,  5,  // Rank 3
     0,  0,  0, 20, 20,  0,  0,  0,  // Rank 4
     5,  5, 10, 25, 25, 10,  5,  5,  // Rank 5
    10, 10, 20, 30, 30, 20, 10, 10,  // Rank 6
    50, 50, 50, 50, 50, 50, 50, 50,  // Rank 7 (near promotion)
     0,  0,  0,  0,  0,  0,  0,  0,  // Rank 8 (pawns shouldn't be here)
];

// Knight position values - prefer center squares
pub const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,  // Rank 1
    -40,-20,  0,  5,  5,  0,-20,-40,  // Rank 2
    -30,  5, 10, 15, 15, 10,  5,-30,  // Rank 3
    -30,  0, 15, 20, 20, 15,  0,-30,  // Rank 4
    -30,  5, 15, 20, 20, 15,  5,-30,  // Rank 5
    -30,  0, 10, 15, 15, 10,  0,-30,  // Rank 6
    -40,-20,  0,  0,  0,  0,-20,-40,  // Rank 7
    -50,-40,-30,-30,-30,-30,-40,-50,  // Rank 8
];

// Bishop position values - prefer center and long diagonals
pub const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,  // Rank 1
    -10,  5,  0,  0,  0,  0,  5,-10,  // Rank 2
    -10, 10, 10, 10, 10, 10, 10,-10,  // Rank 3
    -10,  0, 10, 10, 10, 10,  0,-10,  // Rank 4
    -10,  5,  5, 10, 10,  5,  5,-10,  // Rank 5
    -10,  0,  5, 10, 10,  5,  0,-10,  // Rank 6
    -10,  0,  0,  0,  0,  0,  0,-10,  // Rank 7
    -20,-10,-10,-10,-10,-10,-10,-20,  // Rank 8
];

// Rook position values - prefer 7th rank and center files
pub const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,  // Rank 1
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 2
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 3
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 4
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 5
    -5,  0,  0,  0,  0,  0,  0, -5,  // Rank 6
     5, 10, 10, 10, 10, 10, 10,  5,  // Rank 7 (7th rank bonus)
     0,  0,  0,  0,  0,  0,  0,  0,  // Rank 8
];

// Queen position values - slight central preference
pub const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,  // Rank 1
    -10,  0,  5,  0,  0,  0,  0,-10,  // Rank 2
    -10,  5,  5,  5,  5,  5,  0,-10,  // Rank 3
      0,  0,  5,  5,  5,  5,  0, -5,  // Rank 4
     -5,  0,  5,  5,  5,  5,  0, -5,  // Rank 5
    -10,  0,  5,  5,  5,  5,  0,-10,  // Rank 6
    -10,  0,  0,  0,  0,  0,  0,-10,  // Rank 7
    -20,-10,-10, -5, -5,-10,-10,-20,  // Rank 8
];

// King middlegame position values - prefer safety on back rank
pub const KING_MIDDLEGAME_TABLE: [i32; 64] = [
     20, 30, 10,  0,  0, 10, 30, 20,  // Rank 1 (castled position)
     20, 20,  0,  0,  0,  0, 20, 20,  // Rank 2
    -10,-20,-20,-20,-20,-20,-20,-10,  // Rank 3
    -20,-30,-30,-40,-40,-30,-30,-20,  // Rank 4
    -30,-40,-40,-50,-50,-40,-40,-30,  // Rank 5
    -30,-40,-40,-50,-50,-40,-40,-30,  // Rank 6
    -30,-40,-40,-50,-50,-40,-40,-30,  // Rank 7
    -30,-40,-40,-50,-50,-40,-40,-30,  // Rank 8
];

// King endgame position values - prefer center activity
pub const KING_ENDGAME_TABLE: [i32; 64] = [
    -50,-30,-30,-30,-30,-30,-30,-50,  // Rank 1
    -30,-30,  0,  0,  0,  0,-30,-30,  // Rank 2
    -30,-10, 20, 30, 30, 20,-10,-30,  // Rank 3
    -30,-10, 30, 40, 40, 30,-10,-30,  // Rank 4
    -30,-10, 30, 40, 40, 30,-10,-30,  // Rank 5
    -30,-10, 20, 30, 30, 20,-10,-30,  // Rank 6
    -30,-20,-10,  0,  0,-10,-20,-30,  // Rank 7
    -50,-40,-30,-20,-20,-30,-40,-50,  // Rank 8
];

/// Positional bonus for a piece of `color` and kind `piece_type` on `square`
///
/// The king switches to its endgame table once `endgame` is set.
#[inline]
pub fn pst_value(piece_type: Type, square: usize, color: Color, endgame: bool) -> i32 {
    let idx = match color {
        Color::White => square,
        Color::Black => square ^ 56,
    };

    match piece_type {
        Type::Pawn => PAWN_TABLE[idx],
        Type::Knight => KNIGHT_TABLE[idx],
        Type::Bishop => BISHOP_TABLE[idx],
        Type::Rook => ROOK_TABLE[idx],
        Type::Queen => QUEEN_TABLE[idx],
        Type::King if endgame => KING_ENDGAME_TABLE[idx],
        Type::King => KING_MIDDLEGAME_TABLE[idx],
    }
}
