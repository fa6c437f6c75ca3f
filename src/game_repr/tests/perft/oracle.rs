use std::str::FromStr;

use super::*;

// Cross-check move generation against the `chess` crate on positions
// without a published node count

fn oracle_count(fen_str: &str, depth: usize) -> u64 {
    let board = chess::Board::from_str(fen_str).unwrap();
    chess::MoveGen::movegen_perft_test(&board, depth) as u64
}

#[test]
fn test_perft_matches_oracle() {
    for fen_str in [
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        "8/8/3k4/3p4/4P3/8/2K5/8 w - - 0 1",
        "4k3/1P6/8/8/8/8/6p1/4K3 w - - 0 1",
        "r3k3/8/8/8/3pP3/8/8/4K2R b Kq e3 0 1",
    ] {
        for depth in 1..=3 {
            let mut pos = fen(fen_str);
            assert_eq!(
                pos.perft(depth as u32),
                oracle_count(fen_str, depth),
                "perft({}) of {}",
                depth,
                fen_str
            );
        }
    }
}

#[test]
fn test_legal_move_lists_match_oracle() {
    let fen_str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let board = chess::Board::from_str(fen_str).unwrap();

    let mut expected: Vec<String> = chess::MoveGen::new_legal(&board).map(|m| m.to_string()).collect();
    let mut ours: Vec<String> = fen(fen_str).legal_moves().iter().map(|m| m.to_string()).collect();
    expected.sort();
    ours.sort();
    assert_eq!(ours, expected);
}
