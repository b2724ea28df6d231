//! Brute-force sliding attacks.
//!
//! This is the slow path: the magic tables are trained against it and it is
//! the reference every magic lookup is tested against.

use crate::bitboard::{sq_to_bb, Bitboard};
use crate::shift::Direction;

pub const ROOK_DIRECTIONS: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];
pub const BISHOP_DIRECTIONS: [Direction; 4] =
    [Direction::NE, Direction::SE, Direction::SW, Direction::NW];
pub const QUEEN_DIRECTIONS: [Direction; 8] = Direction::ALL;

/// Walk each direction one square at a time from `sq`, stopping at the board edge
/// or after including the first occupied square.
pub const fn cast_ray(sq: u8, occupancy: Bitboard, directions: &[Direction]) -> Bitboard {
    let mut attacks = 0u64;
    let mut i = 0;
    while i < directions.len() {
        let mut cursor = sq_to_bb(sq);
        loop {
            cursor = directions[i].shift_one(cursor);
            if cursor == 0 {
                break;
            }
            attacks |= cursor;
            if cursor & occupancy != 0 {
                break;
            }
        }
        i += 1;
    }
    attacks
}

/// Compute actual rook attacks given occupancy
pub const fn rook_attacks_slow(sq: u8, occupied: Bitboard) -> Bitboard {
    cast_ray(sq, occupied, &ROOK_DIRECTIONS)
}

/// Compute actual bishop attacks given occupancy
pub const fn bishop_attacks_slow(sq: u8, occupied: Bitboard) -> Bitboard {
    cast_ray(sq, occupied, &BISHOP_DIRECTIONS)
}

pub const fn queen_attacks_slow(sq: u8, occupied: Bitboard) -> Bitboard {
    cast_ray(sq, occupied, &QUEEN_DIRECTIONS)
}
