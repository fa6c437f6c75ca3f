use super::*;
use crate::error::FenError;

// ==================== FEN PARSING TESTS ====================

#[test]
fn test_starting_fen_roundtrip() {
    let pos = fen(STARTING_FEN);
    assert_eq!(pos.to_fen(), STARTING_FEN);
    assert_eq!(pos, Position::startpos());
}

#[test]
fn test_fields_roundtrip() {
    for s in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1",
    ] {
        assert_eq!(fen(s).to_fen(), s);
    }
}

#[test]
fn test_fields_parsed() {
    let pos = fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b Kq e3 0 1");
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_eq!(pos.en_passant(), Some(sq("e3") as u8));
    assert_eq!(pos.castling_rights(), CASTLE_WHITE_KING | CASTLE_BLACK_QUEEN);
    assert_eq!(pos.piece_at(sq("e4")), Some(Piece::new(Color::White, Type::Pawn)));
    assert_eq!(pos.piece_at(sq("d8")), Some(Piece::new(Color::Black, Type::Queen)));
}

#[test]
fn test_missing_fields_default() {
    let pos = fen("4k3/8/8/8/8/8/8/4K3");
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.castling_rights(), 0);
    assert_eq!(pos.en_passant(), None);
}

#[test]
fn test_fen_errors() {
    assert_eq!(Position::from_fen(""), Err(FenError::Empty));
    assert_eq!(Position::from_fen("8/8/8 w - - 0 1"), Err(FenError::BadRankCount(3)));
    assert_eq!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"),
        Err(FenError::InvalidPiece('X'))
    );
    assert!(matches!(
        Position::from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Err(FenError::BadRankLength { rank: 7, .. })
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Err(FenError::BadRankLength { rank: 7, files: 7 })
    ));
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
        Err(FenError::InvalidSide(_))
    ));
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KX - 0 1"),
        Err(FenError::InvalidCastling(_))
    ));
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1"),
        Err(FenError::InvalidEnPassant(_))
    ));
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
        Err(FenError::MissingKing(Color::Black))
    );
}

#[test]
fn test_en_passant_square_validated() {
    // Accepted: the pawn that just double-pushed stands past the target
    assert_eq!(fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").en_passant(), Some(sq("d6") as u8));
    assert_eq!(fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").en_passant(), Some(sq("d3") as u8));

    for bad in [
        // No black pawn on d5
        "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1",
        // Wrong rank for the side to move
        "4k3/8/8/3pP3/8/8/8/4K3 w - d3 0 1",
        "4k3/8/8/8/3Pp3/8/8/4K3 b - d6 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d5 0 1",
        // Target square occupied
        "4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1",
        // The pawn past the target is our own
        "4k3/8/8/3PP3/8/8/8/4K3 w - d6 0 1",
    ] {
        assert!(
            matches!(Position::from_fen(bad), Err(FenError::InvalidEnPassant(_))),
            "{}",
            bad
        );
    }
}

#[test]
fn test_rejected_en_passant_never_reaches_move_generation() {
    assert!(crate::board::Board::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1").is_err());
    // Without the bogus target the same placement generates no capture onto d6
    let pos = fen("4k3/8/8/4P3/8/8/8/4K3 w - - 0 1");
    assert!(pos.legal_moves().iter().all(|mv| mv.to() != sq("d6")));
    assert!(pos.bitboards().is_consistent());
}
