use crate::bitboard::{is_set, set_bit_indices, sq_to_bb, square_from_algebraic, Bitboard};
use crate::errors::FenError;
use crate::types::{Color, PieceType};

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Where every piece stands: one bitboard per (color, piece type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Occupancy {
    pieces: [[Bitboard; 6]; 2],
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn piece_bb(&self, color: Color, piece: PieceType) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// All pieces of one color
    #[inline]
    pub fn color_bb(&self, color: Color) -> Bitboard {
        self.pieces[color.index()].iter().fold(0, |acc, bb| acc | bb)
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.color_bb(Color::White) | self.color_bb(Color::Black)
    }

    pub fn piece_at(&self, sq: u8) -> Option<(Color, PieceType)> {
        Color::ALL.into_iter().find_map(|color| {
            PieceType::ALL
                .into_iter()
                .find(|&piece| is_set(self.piece_bb(color, piece), sq))
                .map(|piece| (color, piece))
        })
    }

    pub fn put(&mut self, color: Color, piece: PieceType, sq: u8) {
        self.pieces[color.index()][piece.index()] |= sq_to_bb(sq);
    }

    /// Remove whatever of `color` stands on `sq`
    pub fn remove_color(&mut self, color: Color, sq: u8) {
        let keep = !sq_to_bb(sq);
        for bb in self.pieces[color.index()].iter_mut() {
            *bb &= keep;
        }
    }

    pub fn remove(&mut self, color: Color, piece: PieceType, sq: u8) {
        self.pieces[color.index()][piece.index()] &= !sq_to_bb(sq);
    }

    /// Relocate a piece, leaving any capture handling to the caller
    pub fn shift_piece(&mut self, color: Color, piece: PieceType, from: u8, to: u8) {
        let bb = &mut self.pieces[color.index()][piece.index()];
        *bb = (*bb & !sq_to_bb(from)) | sq_to_bb(to);
    }

    /// Square of the king of `color`, if there is one on the board
    pub fn king_square(&self, color: Color) -> Option<u8> {
        set_bit_indices(self.piece_bb(color, PieceType::King)).next()
    }
}

/// Read-only position snapshot handed to the legality core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    // who's move it is
    pub active_color: Color,
    pub castle_kingside_white: bool,
    pub castle_queenside_white: bool,
    pub castle_kingside_black: bool,
    pub castle_queenside_black: bool,
    pub en_passant_target: Option<u8>,
    pub occupancy: Occupancy,
}

impl BoardState {
    pub fn new() -> Self {
        // the literal is well formed
        Self::from_fen(STARTING_POSITION_FEN).unwrap_or_else(|e| panic!("{e}"))
    }

    /// An empty board with no castling rights
    pub fn empty(active_color: Color) -> Self {
        BoardState {
            active_color,
            castle_kingside_white: false,
            castle_queenside_white: false,
            castle_kingside_black: false,
            castle_queenside_black: false,
            en_passant_target: None,
            occupancy: Occupancy::new(),
        }
    }

    /// Reads the first four FEN fields. Move clocks are accepted but ignored.
    pub fn from_fen(fen_string: &str) -> Result<BoardState, FenError> {
        let parts: Vec<&str> = fen_string.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut occupancy = Occupancy::new();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadPlacement);
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for piece_char in rank_str.chars() {
                if let Some(skip) = piece_char.to_digit(10) {
                    if skip == 0 || file as u32 + skip > 8 {
                        return Err(FenError::BadPlacement);
                    }
                    file += skip as u8;
                } else {
                    let piece = PieceType::from_char(piece_char)
                        .ok_or(FenError::InvalidPieceChar(piece_char))?;
                    if file >= 8 {
                        return Err(FenError::BadPlacement);
                    }
                    occupancy.put(Color::from_case(piece_char), piece, rank * 8 + file);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadPlacement);
            }
        }

        let mut color_chars = parts[1].chars();
        let active_color = match (color_chars.next(), color_chars.next()) {
            (Some(c), None) => Color::from_char(c),
            _ => None,
        }
        .ok_or_else(|| FenError::InvalidColor(parts[1].to_string()))?;

        let castling = parts[2];
        if castling != "-" && !castling.chars().all(|c| "KQkq".contains(c)) {
            return Err(FenError::InvalidCastling(castling.to_string()));
        }

        let en_passant_target = match parts[3] {
            "-" => None,
            ep => Some(
                square_from_algebraic(ep).ok_or_else(|| FenError::InvalidEnPassant(ep.to_string()))?,
            ),
        };

        Ok(BoardState {
            active_color,
            castle_kingside_white: castling.contains('K'),
            castle_queenside_white: castling.contains('Q'),
            castle_kingside_black: castling.contains('k'),
            castle_queenside_black: castling.contains('q'),
            en_passant_target,
            occupancy,
        })
    }

    pub fn piece_at(&self, sq: u8) -> Option<(Color, PieceType)> {
        self.occupancy.piece_at(sq)
    }

    pub fn castle_right(&self, color: Color, kingside: bool) -> bool {
        match (color, kingside) {
            (Color::White, true) => self.castle_kingside_white,
            (Color::White, false) => self.castle_queenside_white,
            (Color::Black, true) => self.castle_kingside_black,
            (Color::Black, false) => self.castle_queenside_black,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
