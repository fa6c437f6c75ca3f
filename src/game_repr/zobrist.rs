use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Color, Type};

/// Fixed seed so hashes are identical across runs and test machines
const ZOBRIST_SEED: u64 = 0x517cc1b727220a95;

/// Zobrist hashing constants for chess positions
///
/// Random 64-bit numbers for every piece-square combination, along with
/// castling rights, en passant file, and side to move. XOR-composable so
/// make/undo can update the key incrementally.
pub struct ZobristKeys {
    /// [color][piece_type][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// [castling_mask] - one key per 4-bit rights state
    pub castling: [u64; 16],
    /// [file] - en passant file (0-7)
    pub en_passant: [u64; 8],
    /// XORed in when black is to move
    pub side_to_move: u64,
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in &mut pieces {
            for piece_type in color {
                for square in piece_type {
                    *square = rng.gen();
                }
            }
        }

        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.gen();
        }

        let mut en_passant = [0u64; 8];
        for key in &mut en_passant {
            *key = rng.gen();
        }

        Self {
            pieces,
            castling,
            en_passant,
            side_to_move: rng.gen(),
        }
    }

    #[inline(always)]
    pub fn piece(&self, color: Color, piece_type: Type, square: usize) -> u64 {
        self.pieces[color.index()][piece_type.index()][square]
    }
}

/// Process-wide keys, built on first use and never written afterwards
pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);
