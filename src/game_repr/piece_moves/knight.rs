use crate::game_repr::bitboards::{pop_lsb, tables::KNIGHT_ATTACKS};
use crate::game_repr::{Color, Move, MoveList, Type};

use super::super::position::Position;

impl Position {
    /// Knight jumps onto any square in `targets`
    pub(crate) fn knight_moves_into(&self, color: Color, targets: u64, moves: &mut MoveList) {
        let mut knights = self.bitboards.pieces_of_type(color, Type::Knight);
        while knights != 0 {
            let from = pop_lsb(&mut knights);
            let mut attacks = KNIGHT_ATTACKS[from] & targets;
            while attacks != 0 {
                let to = pop_lsb(&mut attacks);
                moves.push(Move::new(from as u8, to as u8));
            }
        }
    }
}
