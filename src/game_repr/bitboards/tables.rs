/// Precomputed knight attack tables
/// KNIGHT_ATTACKS[square] returns a bitboard of all squares a knight can attack from that square
pub static KNIGHT_ATTACKS: [u64; 64] = generate_leaper_attacks(&[
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
]);

/// Precomputed king attack tables
/// KING_ATTACKS[square] returns a bitboard of all squares a king can attack from that square
pub static KING_ATTACKS: [u64; 64] = generate_leaper_attacks(&[
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
]);

/// Precomputed pawn attack tables
/// PAWN_ATTACKS[color][square] returns a bitboard of squares a pawn can attack from that square
pub static PAWN_ATTACKS: [[u64; 64]; 2] = [
    generate_leaper_attacks(&[(1, 1), (1, -1)]),
    generate_leaper_attacks(&[(-1, 1), (-1, -1)]),
];

// Direction indices
pub const NORTH: usize = 0;
pub const NORTH_EAST: usize = 1;
pub const EAST: usize = 2;
pub const SOUTH_EAST: usize = 3;
pub const SOUTH: usize = 4;
pub const SOUTH_WEST: usize = 5;
pub const WEST: usize = 6;
pub const NORTH_WEST: usize = 7;

/// (rank delta, file delta) for each direction index
const DIRECTION_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub const ORTHOGONAL: [usize; 4] = [NORTH, EAST, SOUTH, WEST];
pub const DIAGONAL: [usize; 4] = [NORTH_EAST, SOUTH_EAST, SOUTH_WEST, NORTH_WEST];

/// Ray tables for sliding pieces
/// RAYS[direction][square] returns a bitboard of all squares in that direction from the square
pub static RAYS: [[u64; 64]; 8] = generate_rays();

/// Build a table for a piece that jumps by fixed (rank, file) offsets
const fn generate_leaper_attacks(offsets: &[(i8, i8)]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    let mut sq = 0;

    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut attack = 0u64;

        let mut i = 0;
        while i < offsets.len() {
            let (dr, df) = offsets[i];
            let new_rank = rank + dr;
            let new_file = file + df;

            if new_rank >= 0 && new_rank < 8 && new_file >= 0 && new_file < 8 {
                attack |= 1u64 << (new_rank * 8 + new_file);
            }

            i += 1;
        }

        attacks[sq] = attack;
        sq += 1;
    }

    attacks
}

/// Generate ray tables at compile time
const fn generate_rays() -> [[u64; 64]; 8] {
    let mut rays = [[0u64; 64]; 8];
    let mut dir = 0;

    while dir < 8 {
        let (dr, df) = DIRECTION_DELTAS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut r = (sq / 8) as i8 + dr;
            let mut f = (sq % 8) as i8 + df;
            while r >= 0 && r < 8 && f >= 0 && f < 8 {
                rays[dir][sq] |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            sq += 1;
        }
        dir += 1;
    }

    rays
}

/// Directions whose squares increase in index; the nearest blocker is the lowest set bit
#[inline(always)]
const fn is_positive(direction: usize) -> bool {
    matches!(direction, NORTH | NORTH_EAST | EAST | NORTH_WEST)
}

/// Squares reachable along one ray, up to and including the first blocker
#[inline(always)]
pub fn ray_attacks(direction: usize, square: usize, occupied: u64) -> u64 {
    let ray = RAYS[direction][square];
    let blockers = ray & occupied;
    if blockers == 0 {
        return ray;
    }
    let blocker_sq = if is_positive(direction) {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray & !RAYS[direction][blocker_sq]
}

/// Nearest occupied square along a ray, if any
#[inline]
pub fn first_blocker(direction: usize, square: usize, occupied: u64) -> Option<usize> {
    let blockers = RAYS[direction][square] & occupied;
    if blockers == 0 {
        None
    } else if is_positive(direction) {
        Some(blockers.trailing_zeros() as usize)
    } else {
        Some(63 - blockers.leading_zeros() as usize)
    }
}

#[inline]
pub fn rook_attacks(square: usize, occupied: u64) -> u64 {
    ORTHOGONAL
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(dir, square, occupied))
}

#[inline]
pub fn bishop_attacks(square: usize, occupied: u64) -> u64 {
    DIAGONAL
        .iter()
        .fold(0, |acc, &dir| acc | ray_attacks(dir, square, occupied))
}

#[inline]
pub fn queen_attacks(square: usize, occupied: u64) -> u64 {
    rook_attacks(square, occupied) | bishop_attacks(square, occupied)
}
