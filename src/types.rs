use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// FEN convention: uppercase pieces are white, lowercase are black
    pub fn from_case(c: char) -> Color {
        if c.is_uppercase() {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn other_color(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rank index (0-7) of this color's back rank
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank index (0-7) a pawn of this color promotes on
    pub const fn promotion_rank(self) -> u8 {
        self.other_color_const().back_rank()
    }

    /// Rank index (0-7) a pawn of this color must stand on to capture en passant
    pub const fn en_passant_source_rank(self) -> u8 {
        match self {
            Color::White => 4,
            Color::Black => 3,
        }
    }

    const fn other_color_const(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Is the piece a sliding piece (one which can move multiple square in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceType::Rook | PieceType::Bishop | PieceType::Queen)
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// The two piece kinds whose attacks go through the magic tables.
/// Queens are answered as rook | bishop.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    pub const ALL: [Slider; 2] = [Slider::Rook, Slider::Bishop];

    pub fn to_human(&self) -> &str {
        match self {
            Slider::Rook => "rook",
            Slider::Bishop => "bishop",
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_human())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PromotionPiece {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PromotionPiece {
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    pub fn piece_type(self) -> PieceType {
        match self {
            PromotionPiece::Knight => PieceType::Knight,
            PromotionPiece::Bishop => PieceType::Bishop,
            PromotionPiece::Rook => PieceType::Rook,
            PromotionPiece::Queen => PieceType::Queen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    Normal,
    /// Pawn promotion. Contains the piece promoted to
    Promotion(PromotionPiece),
    EnPassant,
    /// King move of two files; the rook is relocated alongside
    Castle,
}

/// A candidate move as handed over by the caller. The core never keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8,
    pub to: u8,
    pub category: MoveCategory,
}

impl Move {
    pub fn new(from: u8, to: u8, category: MoveCategory) -> Self {
        debug_assert!(from < 64 && to < 64, "square out of range");
        Self { from, to, category }
    }

    pub fn normal(from: u8, to: u8) -> Self {
        Self::new(from, to, MoveCategory::Normal)
    }

    pub fn promotion(from: u8, to: u8, piece: PromotionPiece) -> Self {
        Self::new(from, to, MoveCategory::Promotion(piece))
    }

    pub fn en_passant(from: u8, to: u8) -> Self {
        Self::new(from, to, MoveCategory::EnPassant)
    }

    pub fn castle(from: u8, to: u8) -> Self {
        Self::new(from, to, MoveCategory::Castle)
    }
}

/// Outcome of [`crate::status::is_terminal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    None,
    Checkmate,
    Stalemate,
}
