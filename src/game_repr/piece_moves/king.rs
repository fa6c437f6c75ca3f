use crate::game_repr::bitboards::{pop_lsb, tables::KING_ATTACKS};
use crate::game_repr::position::{
    CASTLE_BLACK_KING, CASTLE_BLACK_QUEEN, CASTLE_WHITE_KING, CASTLE_WHITE_QUEEN,
};
use crate::game_repr::{Color, Move, MoveList, Type};

use super::super::position::Position;

/// One castling option: right bit, king start/target, rook start,
/// squares that must be empty, squares the king must not cross while attacked
struct CastleRule {
    right: u8,
    king_from: usize,
    king_to: usize,
    rook_from: usize,
    empty: u64,
    safe: [usize; 3],
}

const WHITE_CASTLES: [CastleRule; 2] = [
    CastleRule {
        right: CASTLE_WHITE_KING,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        empty: (1 << 5) | (1 << 6),
        safe: [4, 5, 6],
    },
    CastleRule {
        right: CASTLE_WHITE_QUEEN,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        empty: (1 << 1) | (1 << 2) | (1 << 3),
        safe: [4, 3, 2],
    },
];

const BLACK_CASTLES: [CastleRule; 2] = [
    CastleRule {
        right: CASTLE_BLACK_KING,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        empty: (1 << 61) | (1 << 62),
        safe: [60, 61, 62],
    },
    CastleRule {
        right: CASTLE_BLACK_QUEEN,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        empty: (1 << 57) | (1 << 58) | (1 << 59),
        safe: [60, 59, 58],
    },
];

impl Position {
    /// Single-step king moves onto any square in `targets`
    pub(crate) fn king_moves_into(&self, color: Color, targets: u64, moves: &mut MoveList) {
        let mut kings = self.bitboards.pieces_of_type(color, Type::King);
        while kings != 0 {
            let from = pop_lsb(&mut kings);
            let mut attacks = KING_ATTACKS[from] & targets;
            while attacks != 0 {
                let to = pop_lsb(&mut attacks);
                moves.push(Move::new(from as u8, to as u8));
            }
        }
    }

    /// Castling: right held, rook home, path empty, king not in check and
    /// neither the passing nor the destination square attacked
    pub(crate) fn castling_moves_into(&self, color: Color, moves: &mut MoveList) {
        let rules = match color {
            Color::White => &WHITE_CASTLES,
            Color::Black => &BLACK_CASTLES,
        };
        let occupied = self.bitboards.all_occupied();
        let kings = self.bitboards.pieces_of_type(color, Type::King);
        let rooks = self.bitboards.pieces_of_type(color, Type::Rook);
        let enemy = color.opposite();

        for rule in rules {
            if self.castling_rights() & rule.right == 0
                || kings & (1u64 << rule.king_from) == 0
                || rooks & (1u64 << rule.rook_from) == 0
                || occupied & rule.empty != 0
            {
                continue;
            }
            if rule.safe.iter().any(|&sq| self.is_square_attacked(sq, enemy)) {
                continue;
            }
            moves.push(Move::new(rule.king_from as u8, rule.king_to as u8));
        }
    }
}
