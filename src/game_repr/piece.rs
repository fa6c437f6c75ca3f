#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Type {
    /// All piece kinds in bitboard index order
    pub const ALL: [Type; 6] = [
        Type::Pawn,
        Type::Knight,
        Type::Bishop,
        Type::Rook,
        Type::Queen,
        Type::King,
    ];

    /// Kinds a pawn may promote to, strongest first
    pub const PROMOTIONS: [Type; 4] = [Type::Queen, Type::Rook, Type::Bishop, Type::Knight];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Type::index`]
    #[inline]
    pub const fn from_index(idx: usize) -> Option<Type> {
        match idx {
            0 => Some(Type::Pawn),
            1 => Some(Type::Knight),
            2 => Some(Type::Bishop),
            3 => Some(Type::Rook),
            4 => Some(Type::Queen),
            5 => Some(Type::King),
            _ => None,
        }
    }

    /// Material value in centipawns. The king carries a nominal value that is
    /// never summed into material totals.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            Type::Pawn => 100,
            Type::Knight => 320,
            Type::Bishop => 330,
            Type::Rook => 500,
            Type::Queen => 900,
            Type::King => 20000,
        }
    }

    /// Lowercase letter used by FEN and coordinate notation
    pub const fn to_char(self) -> char {
        match self {
            Type::Pawn => 'p',
            Type::Knight => 'n',
            Type::Bishop => 'b',
            Type::Rook => 'r',
            Type::Queen => 'q',
            Type::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Type> {
        match c.to_ascii_lowercase() {
            'p' => Some(Type::Pawn),
            'n' => Some(Type::Knight),
            'b' => Some(Type::Bishop),
            'r' => Some(Type::Rook),
            'q' => Some(Type::Queen),
            'k' => Some(Type::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: Type,
}

impl Piece {
    pub fn new(color: Color, piece_type: Type) -> Self {
        Self { color, piece_type }
    }

    /// Parse a FEN piece letter; uppercase is white
    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = Type::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { color, piece_type })
    }

    pub fn to_char(&self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn is(&self, color: Color) -> bool {
        self.color == color
    }
}
