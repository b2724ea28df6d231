//! Runtime attack queries.
//!
//! Jumping pieces and pawns come straight from the pattern tables; rooks and
//! bishops go through the magic tables; queens are the union of the two.

use crate::bitboard::Bitboard;
use crate::board::Occupancy;
use crate::magic::magic_tables;
use crate::patterns::PATTERNS;
use crate::types::{Color, PieceType};

/// Squares attacked by `piece` of `color` standing on `sq`.
///
/// For pawns this is the capture pattern only; pushes come from [`pawn_pushes`].
/// `color` only matters for pawns. `sq` must be in 0..64.
#[inline]
pub fn attacks(piece: PieceType, color: Color, sq: u8, occupied: Bitboard) -> Bitboard {
    match piece {
        PieceType::Pawn => PATTERNS.pawn_attacks[color.index()][sq as usize],
        PieceType::Knight => PATTERNS.knight[sq as usize],
        PieceType::King => PATTERNS.king[sq as usize],
        PieceType::Bishop => bishop_attacks(sq, occupied),
        PieceType::Rook => rook_attacks(sq, occupied),
        PieceType::Queen => queen_attacks(sq, occupied),
    }
}

/// Push targets of a pawn, ignoring blockers
#[inline(always)]
pub fn pawn_pushes(color: Color, sq: u8) -> Bitboard {
    PATTERNS.pawn_pushes[color.index()][sq as usize]
}

/// Get rook attacks using magic bitboards
#[inline(always)]
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    magic_tables().rook_attacks(sq, occupied)
}

/// Get bishop attacks using magic bitboards
#[inline(always)]
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    magic_tables().bishop_attacks(sq, occupied)
}

/// Get queen attacks using magic bitboards
#[inline(always)]
pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Every piece (of `by`, or of both colors) attacking `sq`.
///
/// Attacks are symmetric for everything but pawns, so each piece type's pattern
/// is cast backwards from the target. A pawn of `color` attacks `sq` exactly when
/// a pawn of the other color on `sq` would attack it back.
pub fn attackers_of(sq: u8, occupancy: &Occupancy, by: Option<Color>) -> Bitboard {
    let occupied = occupancy.occupied();
    let mut attackers = 0;
    for color in Color::ALL.into_iter().filter(|c| by.map_or(true, |b| b == *c)) {
        for piece in PieceType::ALL {
            let probe_color = match piece {
                PieceType::Pawn => color.other_color(),
                _ => color,
            };
            attackers |= attacks(piece, probe_color, sq, occupied) & occupancy.piece_bb(color, piece);
        }
    }
    attackers
}

#[inline]
pub fn is_square_attacked(sq: u8, occupancy: &Occupancy, by: Color) -> bool {
    attackers_of(sq, occupancy, Some(by)) != 0
}
