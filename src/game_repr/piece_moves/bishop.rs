use crate::game_repr::bitboards::{pop_lsb, tables::bishop_attacks};
use crate::game_repr::{Color, Move, MoveList, Type};

use super::super::position::Position;

impl Position {
    /// Diagonal slides; each ray stops at the first blocker, which is
    /// kept only when `targets` includes it (an enemy piece)
    pub(crate) fn bishop_moves_into(&self, color: Color, targets: u64, moves: &mut MoveList) {
        let occupied = self.bitboards.all_occupied();
        let mut bishops = self.bitboards.pieces_of_type(color, Type::Bishop);
        while bishops != 0 {
            let from = pop_lsb(&mut bishops);
            let mut attacks = bishop_attacks(from, occupied) & targets;
            while attacks != 0 {
                let to = pop_lsb(&mut attacks);
                moves.push(Move::new(from as u8, to as u8));
            }
        }
    }
}
