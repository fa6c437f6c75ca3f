use crate::game_repr::bitboards::{pop_lsb, tables::queen_attacks};
use crate::game_repr::{Color, Move, MoveList, Type};

use super::super::position::Position;

impl Position {
    pub(crate) fn queen_moves_into(&self, color: Color, targets: u64, moves: &mut MoveList) {
        let occupied = self.bitboards.all_occupied();
        let mut queens = self.bitboards.pieces_of_type(color, Type::Queen);
        while queens != 0 {
            let from = pop_lsb(&mut queens);
            let mut attacks = queen_attacks(from, occupied) & targets;
            while attacks != 0 {
                let to = pop_lsb(&mut attacks);
                moves.push(Move::new(from as u8, to as u8));
            }
        }
    }
}
