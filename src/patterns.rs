//! Precomputed per-square attack patterns.
//!
//! Everything here is computed at compile time from the directional shifts, the
//! same way the jump-piece tables always were. Sliding pieces only get their
//! masks here; the occupancy-dependent part lives in the magic tables.

use crate::bitboard::{sq_to_bb, Bitboard, FILE_A, FILE_H, RANK_1, RANK_4, RANK_5, RANK_8};
use crate::rays::{cast_ray, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use crate::shift::*;
use crate::types::{Color, Slider};

/// Precomputed attack tables
pub struct AttackPatterns {
    /// Knight attacks for each square
    pub knight: [Bitboard; 64],
    /// King attacks for each square
    pub king: [Bitboard; 64],
    /// Pawn captures for each color and square: pawn_attacks[color as usize][square]
    pub pawn_attacks: [[Bitboard; 64]; 2],
    /// Pawn pushes (single and, from the start rank, double). Empty on ranks 1 and 8.
    pub pawn_pushes: [[Bitboard; 64]; 2],
    /// Squares whose occupancy can change a rook's attacks (edges trimmed)
    pub rook_relevant: [Bitboard; 64],
    /// Squares whose occupancy can change a bishop's attacks (edges trimmed)
    pub bishop_relevant: [Bitboard; 64],
    /// Rook attacks on an empty board
    pub rook_unobstructed: [Bitboard; 64],
    /// Bishop attacks on an empty board
    pub bishop_unobstructed: [Bitboard; 64],
}

/// The edge a ray runs into. A piece sitting there can never hide anything further.
const fn terminal_edge(dir: Direction) -> Bitboard {
    match dir {
        Direction::N => RANK_8,
        Direction::NE => RANK_8 | FILE_H,
        Direction::E => FILE_H,
        Direction::SE => RANK_1 | FILE_H,
        Direction::S => RANK_1,
        Direction::SW => RANK_1 | FILE_A,
        Direction::W => FILE_A,
        Direction::NW => RANK_8 | FILE_A,
    }
}

const fn relevant_mask(sq: u8, directions: &[Direction]) -> Bitboard {
    let mut mask = 0u64;
    let mut i = 0;
    while i < directions.len() {
        let dir = directions[i];
        mask |= cast_ray(sq, 0, &[dir]) & !terminal_edge(dir);
        i += 1;
    }
    mask
}

const fn king_pattern(bb: Bitboard) -> Bitboard {
    north(bb)
        | north_east(bb)
        | east(bb)
        | south_east(bb)
        | south(bb)
        | south_west(bb)
        | west(bb)
        | north_west(bb)
}

const fn knight_pattern(bb: Bitboard) -> Bitboard {
    knight_nne(bb)
        | knight_nnw(bb)
        | knight_ene(bb)
        | knight_wnw(bb)
        | knight_sse(bb)
        | knight_ssw(bb)
        | knight_ese(bb)
        | knight_wsw(bb)
}

impl AttackPatterns {
    /// Initialize all attack tables at compile time
    pub const fn new() -> Self {
        let mut knight = [0u64; 64];
        let mut king = [0u64; 64];
        let mut pawn_attacks = [[0u64; 64]; 2];
        let mut pawn_pushes = [[0u64; 64]; 2];
        let mut rook_relevant = [0u64; 64];
        let mut bishop_relevant = [0u64; 64];
        let mut rook_unobstructed = [0u64; 64];
        let mut bishop_unobstructed = [0u64; 64];

        let white = Color::White.index();
        let black = Color::Black.index();

        let mut sq: u8 = 0;
        while sq < 64 {
            let i = sq as usize;
            let bb = sq_to_bb(sq);

            king[i] = king_pattern(bb);
            knight[i] = knight_pattern(bb);

            // Captures are kept for every square: the reverse lookup in
            // attackers_of probes from squares no pawn could stand on.
            pawn_attacks[white][i] = north_east(bb) | north_west(bb);
            pawn_attacks[black][i] = south_east(bb) | south_west(bb);

            if bb & (RANK_1 | RANK_8) == 0 {
                pawn_pushes[white][i] = north(bb) | (north_two(bb) & RANK_4);
                pawn_pushes[black][i] = south(bb) | (south_two(bb) & RANK_5);
            }

            rook_relevant[i] = relevant_mask(sq, &ROOK_DIRECTIONS);
            bishop_relevant[i] = relevant_mask(sq, &BISHOP_DIRECTIONS);
            rook_unobstructed[i] = cast_ray(sq, 0, &ROOK_DIRECTIONS);
            bishop_unobstructed[i] = cast_ray(sq, 0, &BISHOP_DIRECTIONS);

            sq += 1;
        }

        AttackPatterns {
            knight,
            king,
            pawn_attacks,
            pawn_pushes,
            rook_relevant,
            bishop_relevant,
            rook_unobstructed,
            bishop_unobstructed,
        }
    }

    #[inline(always)]
    pub fn relevant(&self, slider: Slider, sq: u8) -> Bitboard {
        match slider {
            Slider::Rook => self.rook_relevant[sq as usize],
            Slider::Bishop => self.bishop_relevant[sq as usize],
        }
    }

    #[inline(always)]
    pub fn unobstructed(&self, slider: Slider, sq: u8) -> Bitboard {
        match slider {
            Slider::Rook => self.rook_unobstructed[sq as usize],
            Slider::Bishop => self.bishop_unobstructed[sq as usize],
        }
    }

    /// Queen attacks on an empty board
    #[inline(always)]
    pub fn queen_unobstructed(&self, sq: u8) -> Bitboard {
        self.rook_unobstructed[sq as usize] | self.bishop_unobstructed[sq as usize]
    }
}

impl Default for AttackPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Global precomputed attack tables
pub static PATTERNS: AttackPatterns = AttackPatterns::new();
