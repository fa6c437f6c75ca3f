// Position evaluation function
// Returns score in centipawns (positive = good for side to move)
//
// Each side is scored independently and the opponent's total is subtracted,
// so evaluate_for(pos, White) == -evaluate_for(pos, Black) always holds.

use crate::game_repr::bitboards::{
    bishop_attacks, pop_lsb, popcount, queen_attacks, rook_attacks, ADJACENT_FILE_MASKS,
    FILE_MASKS, KING_ATTACKS, KNIGHT_ATTACKS,
};
use crate::game_repr::{Color, Position, Type};
use super::piece_square_tables::pst_value;

/// Below this much non-king material on the board the king tables switch
/// and king safety is no longer scored
pub const ENDGAME_MATERIAL: i32 = 1500;

const BISHOP_PAIR_BONUS: i32 = 30;

// Pawn structure
const DOUBLED_PAWN_PENALTY: i32 = 20;
const ISOLATED_PAWN_PENALTY: i32 = 15;
/// Indexed by rank counted from the pawn's own side (0 = back rank)
const PASSED_PAWN_BONUS: [i32; 8] = [0, 10, 20, 30, 40, 60, 80, 0];

// King safety
const PAWN_SHIELD_BONUS: i32 = 10;
const OPEN_FILE_PENALTY: i32 = 15;
const KING_ATTACKER_WEIGHT: i32 = 8;

/// Static evaluation from the side to move's point of view
pub fn evaluate(pos: &Position) -> i32 {
    evaluate_for(pos, pos.side_to_move())
}

/// Static evaluation from `perspective`'s point of view
pub fn evaluate_for(pos: &Position, perspective: Color) -> i32 {
    let endgame = is_endgame(pos);
    side_score(pos, perspective, endgame) - side_score(pos, perspective.opposite(), endgame)
}

pub fn is_endgame(pos: &Position) -> bool {
    pos.non_king_material() < ENDGAME_MATERIAL
}

fn side_score(pos: &Position, color: Color, endgame: bool) -> i32 {
    let mut score = material_and_position(pos, color, endgame);
    score += bishop_pair(pos, color);
    score += pawn_structure(pos, color);
    if !endgame {
        score += king_safety(pos, color);
    }
    score
}

fn material_and_position(pos: &Position, color: Color, endgame: bool) -> i32 {
    let bb = pos.bitboards();
    let mut score = 0;

    for piece_type in Type::ALL {
        let mut pieces = bb.pieces_of_type(color, piece_type);
        if piece_type != Type::King {
            score += popcount(pieces) as i32 * piece_type.value();
        }
        while pieces != 0 {
            let sq = pop_lsb(&mut pieces);
            score += pst_value(piece_type, sq, color, endgame);
        }
    }

    score
}

fn bishop_pair(pos: &Position, color: Color) -> i32 {
    if popcount(pos.bitboards().pieces_of_type(color, Type::Bishop)) >= 2 {
        BISHOP_PAIR_BONUS
    } else {
        0
    }
}

/// Squares strictly in front of `square` from `color`'s point of view
#[inline]
fn ranks_ahead(square: usize, color: Color) -> u64 {
    let rank = square / 8;
    match color {
        Color::White if rank == 7 => 0,
        Color::White => !0u64 << ((rank + 1) * 8),
        Color::Black => (1u64 << (rank * 8)) - 1,
    }
}

/// Doubled and isolated penalties per file, passed bonus per pawn
fn pawn_structure(pos: &Position, color: Color) -> i32 {
    let bb = pos.bitboards();
    let own_pawns = bb.pieces_of_type(color, Type::Pawn);
    let enemy_pawns = bb.pieces_of_type(color.opposite(), Type::Pawn);
    let mut score = 0;

    for file in 0..8 {
        let on_file = popcount(own_pawns & FILE_MASKS[file]) as i32;
        if on_file == 0 {
            continue;
        }
        if on_file > 1 {
            score -= DOUBLED_PAWN_PENALTY * (on_file - 1);
        }
        if own_pawns & ADJACENT_FILE_MASKS[file] == 0 {
            score -= ISOLATED_PAWN_PENALTY * on_file;
        }
    }

    let mut pawns = own_pawns;
    while pawns != 0 {
        let sq = pop_lsb(&mut pawns);
        let file = sq % 8;
        let front_span = (FILE_MASKS[file] | ADJACENT_FILE_MASKS[file]) & ranks_ahead(sq, color);
        if enemy_pawns & front_span == 0 {
            let relative_rank = match color {
                Color::White => sq / 8,
                Color::Black => 7 - sq / 8,
            };
            score += PASSED_PAWN_BONUS[relative_rank];
        }
    }

    score
}

/// Pawn shield, open files next to the king and pressure on the king zone
fn king_safety(pos: &Position, color: Color) -> i32 {
    let Some(king_sq) = pos.king_square(color) else {
        return 0;
    };
    let bb = pos.bitboards();
    let own_pawns = bb.pieces_of_type(color, Type::Pawn);
    let king_file = king_sq % 8;
    let mut score = 0;

    // Shield: own pawns on the king's and neighbouring files, one or two ranks ahead
    let files = FILE_MASKS[king_file] | ADJACENT_FILE_MASKS[king_file];
    let king_rank = king_sq / 8;
    let shield_ranks = match color {
        Color::White => (0xFFFFu64 << ((king_rank + 1).min(7) * 8)) & ranks_ahead(king_sq, color),
        Color::Black if king_rank >= 2 => (0xFFFFu64 << ((king_rank - 2) * 8)) & ranks_ahead(king_sq, color),
        Color::Black => ranks_ahead(king_sq, color),
    };
    score += popcount(own_pawns & files & shield_ranks) as i32 * PAWN_SHIELD_BONUS;

    for file in king_file.saturating_sub(1)..=(king_file + 1).min(7) {
        if own_pawns & FILE_MASKS[file] == 0 {
            score -= OPEN_FILE_PENALTY;
        }
    }

    // Enemy minor and major pieces whose attacks reach the king or its neighbours
    let zone = KING_ATTACKS[king_sq] | (1u64 << king_sq);
    let enemy = color.opposite();
    let occupied = bb.all_occupied();
    let mut attackers = 0;
    for piece_type in [Type::Knight, Type::Bishop, Type::Rook, Type::Queen] {
        let mut pieces = bb.pieces_of_type(enemy, piece_type);
        while pieces != 0 {
            let sq = pop_lsb(&mut pieces);
            let attacks = match piece_type {
                Type::Knight => KNIGHT_ATTACKS[sq],
                Type::Bishop => bishop_attacks(sq, occupied),
                Type::Rook => rook_attacks(sq, occupied),
                _ => queen_attacks(sq, occupied),
            };
            if attacks & zone != 0 {
                attackers += 1;
            }
        }
    }
    score -= attackers * attackers * KING_ATTACKER_WEIGHT;

    score
}
