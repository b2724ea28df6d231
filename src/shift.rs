//! One-step shifts of a whole bitboard.
//!
//! Every shift that moves along a file masks the source first so that nothing
//! wraps from the h-file onto the a-file (or back). Shifts along ranks simply
//! fall off the top or bottom of the u64.

use crate::bitboard::{Bitboard, FILE_A, FILE_B, FILE_G, FILE_H};

const NOT_A: Bitboard = !FILE_A;
const NOT_H: Bitboard = !FILE_H;
const NOT_AB: Bitboard = !(FILE_A | FILE_B);
const NOT_GH: Bitboard = !(FILE_G | FILE_H);

/// Directions: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    #[inline(always)]
    pub const fn shift_one(self, bb: Bitboard) -> Bitboard {
        match self {
            Direction::N => north(bb),
            Direction::NE => north_east(bb),
            Direction::E => east(bb),
            Direction::SE => south_east(bb),
            Direction::S => south(bb),
            Direction::SW => south_west(bb),
            Direction::W => west(bb),
            Direction::NW => north_west(bb),
        }
    }
}

#[inline(always)]
pub const fn north(bb: Bitboard) -> Bitboard {
    bb << 8
}

#[inline(always)]
pub const fn south(bb: Bitboard) -> Bitboard {
    bb >> 8
}

#[inline(always)]
pub const fn east(bb: Bitboard) -> Bitboard {
    (bb & NOT_H) << 1
}

#[inline(always)]
pub const fn west(bb: Bitboard) -> Bitboard {
    (bb & NOT_A) >> 1
}

#[inline(always)]
pub const fn north_east(bb: Bitboard) -> Bitboard {
    (bb & NOT_H) << 9
}

#[inline(always)]
pub const fn north_west(bb: Bitboard) -> Bitboard {
    (bb & NOT_A) << 7
}

#[inline(always)]
pub const fn south_east(bb: Bitboard) -> Bitboard {
    (bb & NOT_H) >> 7
}

#[inline(always)]
pub const fn south_west(bb: Bitboard) -> Bitboard {
    (bb & NOT_A) >> 9
}

/// Double pawn push for white
#[inline(always)]
pub const fn north_two(bb: Bitboard) -> Bitboard {
    bb << 16
}

/// Double pawn push for black
#[inline(always)]
pub const fn south_two(bb: Bitboard) -> Bitboard {
    bb >> 16
}

// Knight jumps, named by the long leg first: nne = two north, one east.

#[inline(always)]
pub const fn knight_nne(bb: Bitboard) -> Bitboard {
    (bb & NOT_H) << 17
}

#[inline(always)]
pub const fn knight_nnw(bb: Bitboard) -> Bitboard {
    (bb & NOT_A) << 15
}

#[inline(always)]
pub const fn knight_ene(bb: Bitboard) -> Bitboard {
    (bb & NOT_GH) << 10
}

#[inline(always)]
pub const fn knight_wnw(bb: Bitboard) -> Bitboard {
    (bb & NOT_AB) << 6
}

#[inline(always)]
pub const fn knight_sse(bb: Bitboard) -> Bitboard {
    (bb & NOT_H) >> 15
}

#[inline(always)]
pub const fn knight_ssw(bb: Bitboard) -> Bitboard {
    (bb & NOT_A) >> 17
}

#[inline(always)]
pub const fn knight_ese(bb: Bitboard) -> Bitboard {
    (bb & NOT_GH) >> 6
}

#[inline(always)]
pub const fn knight_wsw(bb: Bitboard) -> Bitboard {
    (bb & NOT_AB) >> 10
}

pub const KNIGHT_JUMPS: [fn(Bitboard) -> Bitboard; 8] = [
    knight_nne, knight_nnw, knight_ene, knight_wnw, knight_sse, knight_ssw, knight_ese, knight_wsw,
];

/// (rank_delta, file_delta) for each knight jump, in `KNIGHT_JUMPS` order
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (1, 2),
    (1, -2),
    (-2, 1),
    (-2, -1),
    (-1, 2),
    (-1, -2),
];

impl Direction {
    /// (rank_delta, file_delta) of a single step
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::N => (1, 0),
            Direction::NE => (1, 1),
            Direction::E => (0, 1),
            Direction::SE => (-1, 1),
            Direction::S => (-1, 0),
            Direction::SW => (-1, -1),
            Direction::W => (0, -1),
            Direction::NW => (1, -1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::{pos_to_sq, sq_to_bb, RANK_1, RANK_8};

    /// Reference answer computed with coordinate arithmetic instead of bit shifts
    fn expected(sq: u8, (dr, df): (i8, i8)) -> Bitboard {
        let rank = (sq / 8) as i8 + dr;
        let file = (sq % 8) as i8 + df;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            sq_to_bb((rank * 8 + file) as u8)
        } else {
            0
        }
    }

    fn edge_squares() -> Vec<u8> {
        (0..64u8)
            .filter(|sq| {
                let (r, f) = (sq / 8, sq % 8);
                r <= 1 || r >= 6 || f <= 1 || f >= 6
            })
            .collect()
    }

    #[test]
    fn directional_shifts_never_wrap() {
        for sq in edge_squares() {
            for dir in Direction::ALL {
                assert_eq!(
                    dir.shift_one(sq_to_bb(sq)),
                    expected(sq, dir.delta()),
                    "{:?} from square {}",
                    dir,
                    sq
                );
            }
        }
    }

    #[test]
    fn knight_jumps_never_wrap() {
        for sq in edge_squares() {
            for (jump, delta) in KNIGHT_JUMPS.iter().zip(KNIGHT_DELTAS) {
                assert_eq!(
                    jump(sq_to_bb(sq)),
                    expected(sq, delta),
                    "jump {:?} from square {}",
                    delta,
                    sq
                );
            }
        }
    }

    #[test]
    fn shifts_agree_on_every_square() {
        for sq in 0..64u8 {
            for dir in Direction::ALL {
                assert_eq!(dir.shift_one(sq_to_bb(sq)), expected(sq, dir.delta()));
            }
            for (jump, delta) in KNIGHT_JUMPS.iter().zip(KNIGHT_DELTAS) {
                assert_eq!(jump(sq_to_bb(sq)), expected(sq, delta));
            }
        }
    }

    #[test]
    fn known_edge_cases() {
        let h4 = sq_to_bb(pos_to_sq(4, 8));
        let a1 = sq_to_bb(pos_to_sq(1, 1));
        assert_eq!(east(h4), 0);
        assert_eq!(north_east(h4), 0);
        assert_eq!(north_west(a1), 0);
        assert_eq!(south(a1), 0);
        assert_eq!(north(RANK_8), 0);
        assert_eq!(south(RANK_1), 0);
        assert_eq!(west(FILE_A), 0);
        assert_eq!(east(FILE_H), 0);
        assert_eq!(knight_ene(FILE_G), 0);
        assert_eq!(knight_wsw(FILE_B), 0);
    }

    #[test]
    fn double_steps() {
        let e2 = sq_to_bb(pos_to_sq(2, 5));
        let e7 = sq_to_bb(pos_to_sq(7, 5));
        assert_eq!(north_two(e2), sq_to_bb(pos_to_sq(4, 5)));
        assert_eq!(south_two(e7), sq_to_bb(pos_to_sq(5, 5)));
        assert_eq!(north_two(RANK_8), 0);
        assert_eq!(south_two(RANK_1), 0);
    }
}
