use super::*;

// ==================== HELPER FUNCTIONS ====================

/// Parse a FEN that the test knows to be valid
pub fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap_or_else(|e| panic!("bad test FEN {}: {}", s, e))
}

/// Square index from its name
pub fn sq(name: &str) -> usize {
    parse_square(name).unwrap_or_else(|| panic!("bad square {}", name)) as usize
}

/// Helper function to check if a move exists in the move list
pub fn has_move(moves: &[Move], from: &str, to: &str) -> bool {
    moves.iter().any(|m| m.from() == sq(from) && m.to() == sq(to))
}

/// Legal moves of the piece standing on `from`
pub fn moves_from(pos: &Position, from: &str) -> Vec<Move> {
    pos.legal_moves()
        .into_iter()
        .filter(|m| m.from() == sq(from))
        .collect()
}

/// Count moves that carry a promotion piece
pub fn count_promotions(moves: &[Move]) -> usize {
    moves.iter().filter(|m| m.is_promotion()).count()
}

// ==================== TEST MODULES ====================

mod en_passant;
mod fen_parsing;
mod perft;
