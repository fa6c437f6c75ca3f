use log::debug;

use super::bitboards::tables::*;
use super::bitboards::{pop_lsb, popcount, Bitboards};
use super::zobrist::ZOBRIST;
use super::*;
use crate::error::FenError;

/*
 * MODULE IS RESPONSIBLE FOR
 * GAME REPRESENTATION AND LOGIC
 */

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Castling rights, one bit each
pub const CASTLE_WHITE_KING: u8 = 1 << 0;
pub const CASTLE_WHITE_QUEEN: u8 = 1 << 1;
pub const CASTLE_BLACK_KING: u8 = 1 << 2;
pub const CASTLE_BLACK_QUEEN: u8 = 1 << 3;
pub const CASTLE_ALL: u8 = 0xF;

/// Rights that survive a move touching the square. ANDed with the current
/// mask for both origin and destination, so king moves, rook moves and rook
/// captures on the home squares all clear the right they belong to.
const CASTLE_KEEP: [u8; 64] = {
    let mut keep = [CASTLE_ALL; 64];
    keep[0] = CASTLE_ALL & !CASTLE_WHITE_QUEEN;
    keep[4] = CASTLE_ALL & !(CASTLE_WHITE_KING | CASTLE_WHITE_QUEEN);
    keep[7] = CASTLE_ALL & !CASTLE_WHITE_KING;
    keep[56] = CASTLE_ALL & !CASTLE_BLACK_QUEEN;
    keep[60] = CASTLE_ALL & !(CASTLE_BLACK_KING | CASTLE_BLACK_QUEEN);
    keep[63] = CASTLE_ALL & !CASTLE_BLACK_KING;
    keep
};

const BACK_RANK: [Type; 8] = [
    Type::Rook,
    Type::Knight,
    Type::Bishop,
    Type::Queen,
    Type::King,
    Type::Bishop,
    Type::Knight,
    Type::Rook,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Bitboard representation for fast move generation
    pub(crate) bitboards: Bitboards,
    side_to_move: Color,
    /// Square a pawn skipped over on the previous double push
    en_passant: Option<u8>,
    /// CASTLE_* bits
    castling: u8,
    /// Zobrist key, maintained incrementally by make/unmake
    hash: u64,
}

/// Snapshot of everything `make_move` may change
#[derive(Clone, Copy, Debug)]
pub struct UndoInfo {
    bitboards: Bitboards,
    side_to_move: Color,
    en_passant: Option<u8>,
    castling: u8,
    hash: u64,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    /// Standard initial position
    pub fn startpos() -> Position {
        let mut bitboards = Bitboards::empty();
        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            bitboards.add_piece(Color::White, piece_type, file);
            bitboards.add_piece(Color::White, Type::Pawn, 8 + file);
            bitboards.add_piece(Color::Black, Type::Pawn, 48 + file);
            bitboards.add_piece(Color::Black, piece_type, 56 + file);
        }

        let mut pos = Position {
            bitboards,
            side_to_move: Color::White,
            en_passant: None,
            castling: CASTLE_ALL,
            hash: 0,
        };
        pos.hash = pos.compute_hash();
        pos
    }

    /// Parse a FEN string. Halfmove and fullmove counters are accepted and ignored;
    /// missing trailing fields default to white to move, no castling, no en passant.
    pub fn from_fen(fen_str: &str) -> Result<Position, FenError> {
        let mut parts = fen_str.split_whitespace();
        let placement = parts.next().ok_or(FenError::Empty)?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount(ranks.len()));
        }

        let mut bitboards = Bitboards::empty();
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece(c))?;
                if file >= 8 {
                    return Err(FenError::BadRankLength { rank: rank + 1, files: file + 1 });
                }
                bitboards.add_piece(piece.color, piece.piece_type, rank * 8 + file);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength { rank: rank + 1, files: file });
            }
        }

        let side_to_move = match parts.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::InvalidSide(other.to_string())),
        };

        let mut castling = 0u8;
        if let Some(field) = parts.next() {
            if field != "-" {
                for c in field.chars() {
                    castling |= match c {
                        'K' => CASTLE_WHITE_KING,
                        'Q' => CASTLE_WHITE_QUEEN,
                        'k' => CASTLE_BLACK_KING,
                        'q' => CASTLE_BLACK_QUEEN,
                        _ => return Err(FenError::InvalidCastling(field.to_string())),
                    };
                }
            }
        }

        let en_passant = match parts.next() {
            None | Some("-") => None,
            Some(field) => {
                let square = parse_square(field)
                    .filter(|&sq| en_passant_is_plausible(&bitboards, side_to_move, sq as usize))
                    .ok_or_else(|| FenError::InvalidEnPassant(field.to_string()))?;
                Some(square)
            }
        };

        for color in [Color::White, Color::Black] {
            if bitboards.pieces_of_type(color, Type::King) == 0 {
                return Err(FenError::MissingKing(color));
            }
        }

        let mut pos = Position {
            bitboards,
            side_to_move,
            en_passant,
            castling,
            hash: 0,
        };
        pos.hash = pos.compute_hash();
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.piece_at(rank * 8 + file) {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_char());
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling == 0 {
            fen.push('-');
        } else {
            for (bit, c) in [
                (CASTLE_WHITE_KING, 'K'),
                (CASTLE_WHITE_QUEEN, 'Q'),
                (CASTLE_BLACK_KING, 'k'),
                (CASTLE_BLACK_QUEEN, 'q'),
            ] {
                if self.castling & bit != 0 {
                    fen.push(c);
                }
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&square_name(sq as usize)),
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn en_passant(&self) -> Option<u8> {
        self.en_passant
    }

    #[inline]
    pub fn castling_rights(&self) -> u8 {
        self.castling
    }

    /// Incrementally maintained Zobrist key
    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn bitboards(&self) -> &Bitboards {
        &self.bitboards
    }

    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        self.bitboards.piece_at(square)
    }

    pub fn king_square(&self, color: Color) -> Option<usize> {
        let kings = self.bitboards.pieces_of_type(color, Type::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as usize)
        }
    }

    /// Full Zobrist key from scratch
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;

        for color in [Color::White, Color::Black] {
            for piece_type in Type::ALL {
                let mut bb = self.bitboards.pieces_of_type(color, piece_type);
                while bb != 0 {
                    let sq = pop_lsb(&mut bb);
                    hash ^= ZOBRIST.piece(color, piece_type, sq);
                }
            }
        }

        hash ^= ZOBRIST.castling[self.castling as usize];

        if let Some(ep) = self.en_passant {
            hash ^= ZOBRIST.en_passant[ep as usize % 8];
        }

        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side_to_move;
        }

        hash
    }

    /// Every piece of `by` attacking `square`, with sliders blocked by `occupied`
    pub fn attackers_to(&self, square: usize, by: Color, occupied: u64) -> u64 {
        let bb = &self.bitboards;
        let queens = bb.pieces_of_type(by, Type::Queen);
        let diagonal = bb.pieces_of_type(by, Type::Bishop) | queens;
        let orthogonal = bb.pieces_of_type(by, Type::Rook) | queens;

        // A pawn of `by` attacks `square` from wherever a pawn of the other
        // colour standing on `square` would attack
        (PAWN_ATTACKS[by.opposite().index()][square] & bb.pieces_of_type(by, Type::Pawn))
            | (KNIGHT_ATTACKS[square] & bb.pieces_of_type(by, Type::Knight))
            | (KING_ATTACKS[square] & bb.pieces_of_type(by, Type::King))
            | (bishop_attacks(square, occupied) & diagonal)
            | (rook_attacks(square, occupied) & orthogonal)
    }

    /// Checks if a square is under attack by any piece of the given color
    #[inline]
    pub fn is_square_attacked(&self, square: usize, by_color: Color) -> bool {
        self.attackers_to(square, by_color, self.bitboards.all_occupied()) != 0
    }

    /// Checks if the king of the given color is currently in check
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(sq) => self.is_square_attacked(sq, color.opposite()),
            None => false,
        }
    }

    /// Does `mv` take something, en passant included
    #[inline]
    pub fn is_capture(&self, mv: Move) -> bool {
        self.captured_type(mv).is_some()
    }

    /// Kind removed from the board by `mv`, if any
    pub fn captured_type(&self, mv: Move) -> Option<Type> {
        let them = self.side_to_move.opposite();
        if let Some(victim) = self.bitboards.type_at(them, mv.to()) {
            return Some(victim);
        }
        let is_pawn = self.bitboards.pieces_of_type(self.side_to_move, Type::Pawn) & (1u64 << mv.from()) != 0;
        if is_pawn && self.en_passant == Some(mv.to() as u8) {
            Some(Type::Pawn)
        } else {
            None
        }
    }

    /// Kind standing on the move's origin for the side to move
    #[inline]
    pub fn moving_type(&self, mv: Move) -> Option<Type> {
        self.bitboards.type_at(self.side_to_move, mv.from())
    }

    /// Sum of non-king material for one side
    pub fn material(&self, color: Color) -> i32 {
        Type::ALL[..5]
            .iter()
            .map(|&t| popcount(self.bitboards.pieces_of_type(color, t)) as i32 * t.value())
            .sum()
    }

    /// Non-king material on the whole board
    pub fn non_king_material(&self) -> i32 {
        self.material(Color::White) + self.material(Color::Black)
    }

    /// Generate every pseudo-legal move for the side to move.
    /// The buffer is cleared before adding moves.
    pub fn pseudo_legal_moves_into(&self, moves: &mut MoveList) {
        moves.clear();
        self.generate_into(false, moves);
    }

    /// Pseudo-legal captures only (en passant and capturing promotions included)
    pub fn pseudo_legal_captures_into(&self, moves: &mut MoveList) {
        moves.clear();
        self.generate_into(true, moves);
    }

    fn generate_into(&self, captures_only: bool, moves: &mut MoveList) {
        let us = self.side_to_move;
        let targets = if captures_only {
            self.bitboards.occupied_by_color(us.opposite())
        } else {
            !self.bitboards.occupied_by_color(us)
        };

        self.pawn_moves_into(us, captures_only, moves);
        self.knight_moves_into(us, targets, moves);
        self.bishop_moves_into(us, targets, moves);
        self.rook_moves_into(us, targets, moves);
        self.queen_moves_into(us, targets, moves);
        self.king_moves_into(us, targets, moves);
        if !captures_only {
            self.castling_moves_into(us, moves);
        }
    }

    /// Apply `mv`, returning the snapshot needed to reverse it.
    /// A move from a square the side to move does not occupy leaves the position untouched.
    pub fn make_move(&mut self, mv: Move) -> UndoInfo {
        let undo = UndoInfo {
            bitboards: self.bitboards,
            side_to_move: self.side_to_move,
            en_passant: self.en_passant,
            castling: self.castling,
            hash: self.hash,
        };

        let us = self.side_to_move;
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();

        let Some(moving) = self.bitboards.type_at(us, from) else {
            return undo;
        };

        let old_ep = self.en_passant.take();
        if let Some(ep) = old_ep {
            self.hash ^= ZOBRIST.en_passant[ep as usize % 8];
        }

        if let Some(captured) = self.bitboards.type_at(them, to) {
            self.bitboards.remove_piece(them, captured, to);
            self.hash ^= ZOBRIST.piece(them, captured, to);
        } else if moving == Type::Pawn && old_ep == Some(to as u8) {
            let victim_sq = match us {
                Color::White => to - 8,
                Color::Black => to + 8,
            };
            self.bitboards.remove_piece(them, Type::Pawn, victim_sq);
            self.hash ^= ZOBRIST.piece(them, Type::Pawn, victim_sq);
        }

        let placed = match mv.promotion() {
            Some(promo) if moving == Type::Pawn => promo,
            _ => moving,
        };
        self.bitboards.remove_piece(us, moving, from);
        self.bitboards.add_piece(us, placed, to);
        self.hash ^= ZOBRIST.piece(us, moving, from) ^ ZOBRIST.piece(us, placed, to);

        if moving == Type::King && from.abs_diff(to) == 2 {
            let (rook_from, rook_to) = if to > from {
                (from + 3, from + 1)
            } else {
                (from - 4, from - 1)
            };
            self.bitboards.move_piece(us, Type::Rook, rook_from, rook_to);
            self.hash ^= ZOBRIST.piece(us, Type::Rook, rook_from) ^ ZOBRIST.piece(us, Type::Rook, rook_to);
        }

        if moving == Type::Pawn && from.abs_diff(to) == 16 {
            let ep = ((from + to) / 2) as u8;
            self.en_passant = Some(ep);
            self.hash ^= ZOBRIST.en_passant[ep as usize % 8];
        }

        let castling = self.castling & CASTLE_KEEP[from] & CASTLE_KEEP[to];
        if castling != self.castling {
            self.hash ^= ZOBRIST.castling[self.castling as usize] ^ ZOBRIST.castling[castling as usize];
            self.castling = castling;
        }

        self.side_to_move = them;
        self.hash ^= ZOBRIST.side_to_move;

        undo
    }

    /// Restore the position captured by `undo`
    #[inline]
    pub fn unmake_move(&mut self, undo: UndoInfo) {
        self.bitboards = undo.bitboards;
        self.side_to_move = undo.side_to_move;
        self.en_passant = undo.en_passant;
        self.castling = undo.castling;
        self.hash = undo.hash;
    }

    /// Make `mv` and keep it only if it does not leave our own king attacked
    #[inline]
    pub fn make_move_if_legal(&mut self, mv: Move) -> Option<UndoInfo> {
        let us = self.side_to_move;
        let undo = self.make_move(mv);
        if self.is_in_check(us) {
            self.unmake_move(undo);
            None
        } else {
            Some(undo)
        }
    }

    /// Pass the turn. Clears the en passant target.
    pub fn make_null_move(&mut self) -> UndoInfo {
        let undo = UndoInfo {
            bitboards: self.bitboards,
            side_to_move: self.side_to_move,
            en_passant: self.en_passant,
            castling: self.castling,
            hash: self.hash,
        };

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= ZOBRIST.en_passant[ep as usize % 8];
        }
        self.side_to_move = self.side_to_move.opposite();
        self.hash ^= ZOBRIST.side_to_move;

        undo
    }

    /// Generate all legal moves for the side to move into a provided buffer
    pub fn legal_moves_into(&mut self, moves: &mut MoveList) {
        let mut pseudo = MoveList::new();
        self.pseudo_legal_moves_into(&mut pseudo);
        moves.clear();
        for mv in pseudo {
            if let Some(undo) = self.make_move_if_legal(mv) {
                self.unmake_move(undo);
                moves.push(mv);
            }
        }
    }

    /// All legal moves for the side to move
    pub fn legal_moves(&self) -> MoveList {
        let mut scratch = self.clone();
        let mut moves = MoveList::new();
        scratch.legal_moves_into(&mut moves);
        moves
    }

    /// Cheaper than `legal_moves` when only existence matters
    pub fn has_legal_move(&self) -> bool {
        let mut scratch = self.clone();
        let mut pseudo = MoveList::new();
        scratch.pseudo_legal_moves_into(&mut pseudo);
        pseudo.into_iter().any(|mv| match scratch.make_move_if_legal(mv) {
            Some(undo) => {
                scratch.unmake_move(undo);
                true
            }
            None => false,
        })
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move) && !self.has_legal_move()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.side_to_move) && !self.has_legal_move()
    }

    /// Perft (Performance Test) - counts leaf nodes at a given depth
    /// Used to validate move generation correctness
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let mut moves = MoveList::new();
        self.pseudo_legal_moves_into(&mut moves);

        let mut nodes = 0;
        for mv in moves {
            if let Some(undo) = self.make_move_if_legal(mv) {
                // Bulk counting at the last ply: legality is all we need
                nodes += if depth == 1 { 1 } else { self.perft(depth - 1) };
                self.unmake_move(undo);
            }
        }

        nodes
    }

    /// Perft split by root move (debugging tool)
    pub fn divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        let mut split = Vec::new();
        if depth == 0 {
            return split;
        }

        let mut moves = MoveList::new();
        self.legal_moves_into(&mut moves);
        for mv in moves {
            let undo = self.make_move(mv);
            let count = self.perft(depth - 1);
            self.unmake_move(undo);
            debug!("{}: {}", mv, count);
            split.push((mv, count));
        }

        split
    }

    /// Colour-flipped copy: every piece changes colour and rank, side to move swaps.
    /// The result is the same game seen from the other side of the board.
    pub fn mirrored(&self) -> Position {
        let mut bitboards = Bitboards::empty();
        for color in [Color::White, Color::Black] {
            for piece_type in Type::ALL {
                let mut bb = self.bitboards.pieces_of_type(color, piece_type);
                while bb != 0 {
                    let sq = pop_lsb(&mut bb);
                    bitboards.add_piece(color.opposite(), piece_type, sq ^ 56);
                }
            }
        }

        let castling = ((self.castling & 0x3) << 2) | ((self.castling >> 2) & 0x3);
        let mut pos = Position {
            bitboards,
            side_to_move: self.side_to_move.opposite(),
            en_passant: self.en_passant.map(|sq| sq ^ 56),
            castling,
            hash: 0,
        };
        pos.hash = pos.compute_hash();
        pos
    }
}

/// The en-passant target is the empty square a pawn just skipped: rank 6 with
/// white to move (rank 3 with black), with the enemy pawn directly past it.
fn en_passant_is_plausible(bitboards: &Bitboards, side_to_move: Color, square: usize) -> bool {
    let (target_rank, pawn_square) = match side_to_move {
        Color::White => (5, square.wrapping_sub(8)),
        Color::Black => (2, square + 8),
    };
    square / 8 == target_rank
        && !bitboards.is_occupied(square)
        && bitboards.pieces_of_type(side_to_move.opposite(), Type::Pawn) & (1u64 << pawn_square) != 0
}
