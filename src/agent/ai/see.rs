// Static Exchange Evaluation
//
// A one-step approximation: the capturing side wins the victim (plus any
// promotion gain) and, if the destination is defended once the mover has
// left its square, loses the piece that landed there. Used to order
// captures and to prune losing ones in quiescence.

use crate::game_repr::{Move, Position, Type};

pub fn see(pos: &Position, mv: Move) -> i32 {
    let Some(mover) = pos.moving_type(mv) else {
        return 0;
    };
    let us = pos.side_to_move();
    let from = mv.from();
    let to = mv.to();

    let mut gain = pos.captured_type(mv).map_or(0, |victim| victim.value());
    let landed = match mv.promotion() {
        Some(promo) => {
            gain += promo.value() - Type::Pawn.value();
            promo
        }
        None => mover,
    };

    // Vacate the origin so sliders behind the mover count as defenders
    let mut occupied = pos.bitboards().all_occupied() & !(1u64 << from);
    if mover == Type::Pawn && Some(to as u8) == pos.en_passant() {
        let victim_sq = if to > from { to - 8 } else { to + 8 };
        occupied &= !(1u64 << victim_sq);
    }
    occupied |= 1u64 << to;

    let defenders = pos.attackers_to(to, us.opposite(), occupied) & occupied;
    if defenders != 0 {
        gain -= landed.value();
    }
    gain
}
