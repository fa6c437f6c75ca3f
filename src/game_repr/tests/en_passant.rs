use super::*;

// ==================== EN PASSANT TESTS ====================

#[test]
fn test_double_push_sets_target() {
    let mut pos = Position::default();
    pos.make_move(Move::new(sq("e2") as u8, sq("e4") as u8));
    assert_eq!(pos.en_passant(), Some(sq("e3") as u8));

    pos.make_move(Move::new(sq("g8") as u8, sq("f6") as u8));
    assert_eq!(pos.en_passant(), None, "Target expires after one reply");
}

#[test]
fn test_en_passant_capture_available() {
    let pos = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let moves = moves_from(&pos, "e5");
    assert!(has_move(&moves, "e5", "d6"));
    assert!(has_move(&moves, "e5", "e6"));
}

#[test]
fn test_en_passant_removes_captured_pawn() {
    let mut pos = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let mv = Move::new(sq("e5") as u8, sq("d6") as u8);
    assert!(pos.is_capture(mv));
    assert_eq!(pos.captured_type(mv), Some(Type::Pawn));

    pos.make_move(mv);
    assert_eq!(pos.piece_at(sq("d5")), None);
    assert_eq!(pos.piece_at(sq("d6")), Some(Piece::new(Color::White, Type::Pawn)));
    assert_eq!(pos.piece_at(sq("e5")), None);
}

#[test]
fn test_black_en_passant() {
    let mut pos = Position::default();
    for uci in ["a2a3", "d7d5", "a3a4", "d5d4", "e2e4"] {
        let mv: Move = uci.parse().unwrap();
        pos.make_move(mv);
    }
    let moves = moves_from(&pos, "d4");
    assert!(has_move(&moves, "d4", "e3"));

    pos.make_move("d4e3".parse().unwrap());
    assert_eq!(pos.piece_at(sq("e4")), None);
}

#[test]
fn test_en_passant_not_allowed_when_exposing_king() {
    // Removing both pawns from the fifth rank would open the rook's line to a5
    let pos = fen("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1");
    let moves = moves_from(&pos, "e5");
    assert!(!has_move(&moves, "e5", "d6"));
}

#[test]
fn test_en_passant_only_immediately() {
    let pos = fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1");
    assert!(!has_move(&moves_from(&pos, "e5"), "e5", "d6"));
}
