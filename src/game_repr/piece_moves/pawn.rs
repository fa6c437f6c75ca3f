use crate::game_repr::bitboards::{north, pop_lsb, south, tables::PAWN_ATTACKS, RANK_1, RANK_4, RANK_5, RANK_8};
use crate::game_repr::{Color, Move, MoveList, Type};

use super::super::position::Position;

/// Push a pawn move, expanding it into the four promotions on the last rank
#[inline]
fn push_pawn_move(from: usize, to: usize, promotion_rank: u64, moves: &mut MoveList) {
    if promotion_rank & (1u64 << to) != 0 {
        for promo in Type::PROMOTIONS {
            moves.push(Move::with_promotion(from as u8, to as u8, promo));
        }
    } else {
        moves.push(Move::new(from as u8, to as u8));
    }
}

impl Position {
    /// Generate pawn pushes, captures, en passant and promotions
    pub(crate) fn pawn_moves_into(&self, color: Color, captures_only: bool, moves: &mut MoveList) {
        let pawns = self.bitboards.pieces_of_type(color, Type::Pawn);
        let enemies = self.bitboards.occupied_by_color(color.opposite());
        let empty = !self.bitboards.all_occupied();

        let (promotion_rank, double_rank, forward): (u64, u64, fn(u64) -> u64) = match color {
            Color::White => (RANK_8, RANK_4, north),
            Color::Black => (RANK_1, RANK_5, south),
        };
        let step: i32 = match color {
            Color::White => 8,
            Color::Black => -8,
        };

        if !captures_only {
            let single = forward(pawns) & empty;
            let double = forward(single) & empty & double_rank;

            let mut bb = single;
            while bb != 0 {
                let to = pop_lsb(&mut bb);
                push_pawn_move((to as i32 - step) as usize, to, promotion_rank, moves);
            }

            let mut bb = double;
            while bb != 0 {
                let to = pop_lsb(&mut bb);
                moves.push(Move::new((to as i32 - 2 * step) as u8, to as u8));
            }
        }

        let ep_bit = self.en_passant().map_or(0, |sq| 1u64 << sq);
        let mut bb = pawns;
        while bb != 0 {
            let from = pop_lsb(&mut bb);
            let attacks = PAWN_ATTACKS[color.index()][from];

            let mut captures = attacks & enemies;
            while captures != 0 {
                let to = pop_lsb(&mut captures);
                push_pawn_move(from, to, promotion_rank, moves);
            }

            if attacks & ep_bit != 0 {
                moves.push(Move::new(from as u8, ep_bit.trailing_zeros() as u8));
            }
        }
    }
}
