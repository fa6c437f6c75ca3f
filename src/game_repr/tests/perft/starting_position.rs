use super::*;

#[test]
fn test_perft_starting_position_depth_1() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(1), 20);
}

#[test]
fn test_perft_starting_position_depth_2() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(2), 400);
}

#[test]
fn test_perft_starting_position_depth_3() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(3), 8902);
}

#[test]
fn test_perft_starting_position_depth_4() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(4), 197281);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_perft_starting_position_depth_5() {
    let mut pos = Position::default();
    assert_eq!(pos.perft(5), 4865609);
}

#[test]
fn test_divide_sums_to_perft() {
    let mut pos = Position::default();
    let split = pos.divide(3);
    assert_eq!(split.len(), 20);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8902);
    let e2e4 = split.iter().find(|(mv, _)| mv.to_string() == "e2e4").map(|(_, n)| *n);
    assert_eq!(e2e4, Some(600));
}
