// Quiescence Search
//
// At the horizon the static evaluation is only trusted in quiet positions.
// Captures keep being searched until none are left that win material by
// static exchange; the side to move may always "stand pat" on the
// evaluation instead of capturing.

use crate::game_repr::{MoveList, Position};
use super::evaluation::evaluate;
use super::move_ordering::order_captures;
use super::negamax::SearchContext;
use super::see::see;

/// Fail-hard capture search inside `[alpha, beta]`
///
/// Returns 0 once the context has run out of time; callers check
/// `ctx.stopped()` and discard the value.
pub fn quiescence(pos: &mut Position, mut alpha: i32, beta: i32, ctx: &mut SearchContext) -> i32 {
    if ctx.tick() {
        return 0;
    }

    let stand_pat = evaluate(pos);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut captures = MoveList::new();
    pos.pseudo_legal_captures_into(&mut captures);
    order_captures(pos, &mut captures);

    for mv in captures {
        if see(pos, mv) < 0 {
            continue;
        }
        let Some(undo) = pos.make_move_if_legal(mv) else {
            continue;
        };
        let score = -quiescence(pos, -beta, -alpha, ctx);
        pos.unmake_move(undo);

        if ctx.stopped() {
            return 0;
        }
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
