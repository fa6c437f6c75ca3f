use super::{Color, Piece, Type};

pub mod tables;
pub use tables::*;

/// Bitboard set: one u64 per (color, kind), plus derived occupancy
/// Each bit represents presence/absence of a piece on that square (0-63, a1 = 0)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitboards {
    /// pieces[color][kind], kind in `Type::index()` order
    pieces: [[u64; 6]; 2],
    /// Union of each color's six piece boards
    colors: [u64; 2],
    /// Union of both color boards
    occupied: u64,
}

impl Bitboards {
    /// Create empty bitboards
    pub fn empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            colors: [0; 2],
            occupied: 0,
        }
    }

    /// Toggle one (color, kind) bit. Used for both placing and removing.
    #[inline(always)]
    pub fn toggle(&mut self, color: Color, piece_type: Type, square: usize) {
        let bit = 1u64 << square;
        self.pieces[color.index()][piece_type.index()] ^= bit;
        self.colors[color.index()] ^= bit;
        self.occupied = self.colors[0] | self.colors[1];
    }

    /// Add a piece to an empty square
    #[inline]
    pub fn add_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        debug_assert!(!self.is_occupied(square));
        self.toggle(color, piece_type, square);
    }

    /// Remove a piece known to be on `square`
    #[inline]
    pub fn remove_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        debug_assert!(self.pieces_of_type(color, piece_type) & (1u64 << square) != 0);
        self.toggle(color, piece_type, square);
    }

    /// Update a piece position (move from one square to another)
    #[inline]
    pub fn move_piece(&mut self, color: Color, piece_type: Type, from: usize, to: usize) {
        let mask = (1u64 << from) | (1u64 << to);
        self.pieces[color.index()][piece_type.index()] ^= mask;
        self.colors[color.index()] ^= mask;
        self.occupied = self.colors[0] | self.colors[1];
    }

    /// Get bitboard for a specific piece type and color
    #[inline(always)]
    pub fn pieces_of_type(&self, color: Color, piece_type: Type) -> u64 {
        self.pieces[color.index()][piece_type.index()]
    }

    /// Get bitboard for all pieces of a color
    #[inline(always)]
    pub fn occupied_by_color(&self, color: Color) -> u64 {
        self.colors[color.index()]
    }

    /// Get bitboard for all occupied squares
    #[inline(always)]
    pub fn all_occupied(&self) -> u64 {
        self.occupied
    }

    #[inline(always)]
    pub fn is_occupied(&self, square: usize) -> bool {
        self.occupied & (1u64 << square) != 0
    }

    /// Kind of whatever stands on `square`, looking only at `color`'s boards
    #[inline]
    pub fn type_at(&self, color: Color, square: usize) -> Option<Type> {
        let bit = 1u64 << square;
        if self.colors[color.index()] & bit == 0 {
            return None;
        }
        Type::ALL
            .iter()
            .copied()
            .find(|t| self.pieces[color.index()][t.index()] & bit != 0)
    }

    /// Get the piece at a specific square (if any)
    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        for color in [Color::White, Color::Black] {
            if let Some(piece_type) = self.type_at(color, square) {
                return Some(Piece { color, piece_type });
            }
        }
        None
    }

    /// Check the occupancy invariant: colour boards are the union of their
    /// piece boards, occupancy is the union of colours, and no square holds two pieces.
    pub fn is_consistent(&self) -> bool {
        let mut seen = 0u64;
        for color in 0..2 {
            let mut union = 0u64;
            for kind in 0..6 {
                let bb = self.pieces[color][kind];
                if seen & bb != 0 {
                    return false;
                }
                seen |= bb;
                union |= bb;
            }
            if union != self.colors[color] {
                return false;
            }
        }
        self.occupied == (self.colors[0] | self.colors[1])
    }
}

impl Default for Bitboards {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pop the least significant bit from a bitboard and return its index
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> usize {
    let sq = bb.trailing_zeros() as usize;
    *bb &= *bb - 1;
    sq
}

/// Count the number of set bits in a bitboard
#[inline(always)]
pub fn popcount(bb: u64) -> u32 {
    bb.count_ones()
}

// File and rank masks
pub const FILE_A: u64 = 0x0101010101010101;

pub const RANK_1: u64 = 0x00000000000000FF;
pub const RANK_4: u64 = 0x00000000FF000000;
pub const RANK_5: u64 = 0x000000FF00000000;
pub const RANK_8: u64 = 0xFF00000000000000;

/// FILE_MASKS[f] covers every square on file f
pub const FILE_MASKS: [u64; 8] = {
    let mut masks = [0u64; 8];
    let mut f = 0;
    while f < 8 {
        masks[f] = FILE_A << f;
        f += 1;
    }
    masks
};

/// ADJACENT_FILE_MASKS[f] covers the files either side of f (not f itself)
pub const ADJACENT_FILE_MASKS: [u64; 8] = {
    let mut masks = [0u64; 8];
    let mut f = 0;
    while f < 8 {
        if f > 0 {
            masks[f] |= FILE_MASKS[f - 1];
        }
        if f < 7 {
            masks[f] |= FILE_MASKS[f + 1];
        }
        f += 1;
    }
    masks
};

/// One rank towards rank 8
#[inline]
pub fn north(bb: u64) -> u64 {
    bb << 8
}

/// One rank towards rank 1
#[inline]
pub fn south(bb: u64) -> u64 {
    bb >> 8
}
