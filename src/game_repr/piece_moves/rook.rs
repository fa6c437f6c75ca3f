use crate::game_repr::bitboards::{pop_lsb, tables::rook_attacks};
use crate::game_repr::{Color, Move, MoveList, Type};

use super::super::position::Position;

impl Position {
    /// Rank and file slides, blocked the same way as the bishop
    pub(crate) fn rook_moves_into(&self, color: Color, targets: u64, moves: &mut MoveList) {
        let occupied = self.bitboards.all_occupied();
        let mut rooks = self.bitboards.pieces_of_type(color, Type::Rook);
        while rooks != 0 {
            let from = pop_lsb(&mut rooks);
            let mut attacks = rook_attacks(from, occupied) & targets;
            while attacks != 0 {
                let to = pop_lsb(&mut attacks);
                moves.push(Move::new(from as u8, to as u8));
            }
        }
    }
}
