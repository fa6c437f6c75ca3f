use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use super::Type;
use crate::error::MoveParseError;

/*-------ARCHITECTURE--------*/

// | 3 bits | 1 bit  | 6 bits | 6 bits |
// | Promo  | unused |   To   |  From  |
// |            16 bits              |
//
// Promo: 0 = none, otherwise Type::index() (knight..queen)
// Castling and en passant are not flagged; make_move infers them.

/// Move buffer sized for any legal position without spilling
pub type MoveList = SmallVec<[Move; 64]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    buf: u16,
}

impl Move {
    pub const fn new(from: u8, to: u8) -> Move {
        Self {
            buf: (from as u16 & 0x3F) | ((to as u16 & 0x3F) << 6),
        }
    }

    pub const fn with_promotion(from: u8, to: u8, promotion: Type) -> Move {
        let base = Self::new(from, to).buf;
        Self {
            buf: base | ((promotion as u16 & 0x7) << 13),
        }
    }

    #[inline(always)]
    pub const fn from(&self) -> usize {
        (self.buf & 0x3F) as usize
    }

    #[inline(always)]
    pub const fn to(&self) -> usize {
        ((self.buf >> 6) & 0x3F) as usize
    }

    #[inline]
    pub const fn promotion(&self) -> Option<Type> {
        match (self.buf >> 13) & 0x7 {
            0 => None,
            idx => Type::from_index(idx as usize),
        }
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        (self.buf >> 13) != 0
    }

    /// Raw encoding, used as a compact table key
    #[inline]
    pub const fn raw(&self) -> u16 {
        self.buf
    }
}

/// Parse a square name such as `e4` into its 0..63 index
pub fn parse_square(s: &str) -> Option<u8> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].wrapping_sub(b'a');
    let rank = bytes[1].wrapping_sub(b'1');
    if file < 8 && rank < 8 {
        Some(rank * 8 + file)
    } else {
        None
    }
}

/// Square index to name, `0` -> `a1`
pub fn square_name(sq: usize) -> String {
    let file = (b'a' + (sq % 8) as u8) as char;
    let rank = (b'1' + (sq / 8) as u8) as char;
    format!("{}{}", file, rank)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from()), square_name(self.to()))?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(MoveParseError::BadLength(s.to_string()));
        }

        let from = parse_square(&s[0..2])
            .ok_or_else(|| MoveParseError::InvalidSquare(s[0..2].to_string()))?;
        let to = parse_square(&s[2..4])
            .ok_or_else(|| MoveParseError::InvalidSquare(s[2..4].to_string()))?;

        match s[4..].chars().next() {
            None => Ok(Move::new(from, to)),
            Some(c) => match Type::from_char(c) {
                Some(t) if Type::PROMOTIONS.contains(&t) && c.is_ascii_lowercase() => {
                    Ok(Move::with_promotion(from, to, t))
                }
                _ => Err(MoveParseError::InvalidPromotion(c)),
            },
        }
    }
}
