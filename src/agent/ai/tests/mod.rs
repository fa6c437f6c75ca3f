use crate::game_repr::Position;

mod search_tests;

pub fn fen(s: &str) -> Position {
    Position::from_fen(s).expect("test FEN should parse")
}
