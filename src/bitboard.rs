//! Bitboard primitives.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the chess board.
//! Square indexing: a1 = 0, b1 = 1, ..., h1 = 7, a2 = 8, ..., h8 = 63
//! This corresponds to: square_index = (rank - 1) * 8 + (file - 1) where rank/file are 1-indexed.

pub type Bitboard = u64;

pub const EMPTY: Bitboard = 0;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;

pub const RANK_1: Bitboard = 0xFF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_4: Bitboard = RANK_1 << (8 * 3);
pub const RANK_5: Bitboard = RANK_1 << (8 * 4);
pub const RANK_7: Bitboard = RANK_1 << (8 * 6);
pub const RANK_8: Bitboard = RANK_1 << (8 * 7);

/// Convert a 1-indexed rank/file pair to a square index (0-63)
#[inline(always)]
pub const fn pos_to_sq(rank: u8, file: u8) -> u8 {
    (rank - 1) * 8 + (file - 1)
}

/// Convert a square index to a bitboard with that single bit set
#[inline(always)]
pub const fn sq_to_bb(sq: u8) -> Bitboard {
    1u64 << sq
}

/// Rank index (0-7) of a square
#[inline(always)]
pub const fn rank_of(sq: u8) -> u8 {
    sq >> 3
}

/// File index (0-7) of a square
#[inline(always)]
pub const fn file_of(sq: u8) -> u8 {
    sq & 7
}

/// Parse "e4" style coordinates. Returns `None` for anything off the board.
pub fn square_from_algebraic(s: &str) -> Option<u8> {
    let mut chars = s.chars();
    let file_char = chars.next()?;
    let rank_char = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
        return None;
    }
    let file = file_char as u8 - b'a' + 1;
    let rank = rank_char as u8 - b'0';
    Some(pos_to_sq(rank, file))
}

pub fn square_to_algebraic(sq: u8) -> String {
    format!(
        "{}{}",
        (b'a' + file_of(sq)) as char,
        (b'1' + rank_of(sq)) as char
    )
}

#[inline(always)]
pub const fn is_set(mask: Bitboard, sq: u8) -> bool {
    mask & sq_to_bb(sq) != 0
}

#[inline(always)]
pub const fn with_bit_set(mask: Bitboard, sq: u8) -> Bitboard {
    mask | sq_to_bb(sq)
}

#[inline(always)]
pub const fn with_bit_cleared(mask: Bitboard, sq: u8) -> Bitboard {
    mask & !sq_to_bb(sq)
}

#[inline(always)]
pub fn set_bit(mask: &mut Bitboard, sq: u8) {
    *mask |= sq_to_bb(sq);
}

#[inline(always)]
pub fn clear_bit(mask: &mut Bitboard, sq: u8) {
    *mask &= !sq_to_bb(sq);
}

/// Clears exactly the lowest set bit
#[inline(always)]
pub const fn pop_lowest_set_bit(mask: Bitboard) -> Bitboard {
    mask & mask.wrapping_sub(1)
}

/// Index of the lowest set bit. Only defined for a nonzero mask.
#[inline(always)]
pub fn lowest_set_bit_index(mask: Bitboard) -> u8 {
    assert!(mask != 0, "lowest_set_bit_index called on an empty bitboard");
    mask.trailing_zeros() as u8
}

/// Population count by popping bits one at a time. Agrees with `u64::count_ones`.
pub const fn count_set_bits(mut mask: Bitboard) -> u32 {
    let mut count = 0;
    while mask != 0 {
        mask = pop_lowest_set_bit(mask);
        count += 1;
    }
    count
}

/// Ascending square indices of every set bit
#[inline(always)]
pub fn set_bit_indices(mask: Bitboard) -> BitboardIter {
    BitboardIter(mask)
}

/// Iterate over set bits in a bitboard, returning square indices.
///
/// Cloning the iterator restarts the walk from the clone's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitboardIter(pub Bitboard);

impl Iterator for BitboardIter {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let sq = self.0.trailing_zeros() as u8;
            self.0 = pop_lowest_set_bit(self.0);
            Some(sq)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitboard_iter() {
        let bb = sq_to_bb(0) | sq_to_bb(7) | sq_to_bb(63); // a1, h1, h8
        let squares: Vec<u8> = BitboardIter(bb).collect();
        assert_eq!(squares, vec![0, 7, 63]);
    }

    #[test]
    fn test_set_bit_indices_empty_and_restartable() {
        assert_eq!(set_bit_indices(0).count(), 0);

        let iter = set_bit_indices(0b1011_0000);
        let first: Vec<u8> = iter.collect();
        let second: Vec<u8> = iter.collect();
        assert_eq!(first, vec![4, 5, 7]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bit_set_and_clear() {
        let mask = with_bit_set(0, 28);
        assert!(is_set(mask, 28));
        assert!(!is_set(mask, 27));
        assert_eq!(with_bit_cleared(mask, 28), 0);
        // clearing an unset bit is a no-op
        assert_eq!(with_bit_cleared(mask, 3), mask);

        let mut m = 0;
        set_bit(&mut m, 63);
        set_bit(&mut m, 0);
        assert_eq!(m, sq_to_bb(0) | sq_to_bb(63));
        clear_bit(&mut m, 63);
        assert_eq!(m, 1);
    }

    #[test]
    fn test_pop_lowest_set_bit() {
        assert_eq!(pop_lowest_set_bit(0b1100), 0b1000);
        assert_eq!(pop_lowest_set_bit(1 << 63), 0);
        assert_eq!(pop_lowest_set_bit(0), 0);
    }

    #[test]
    fn test_lowest_set_bit_index() {
        assert_eq!(lowest_set_bit_index(1), 0);
        assert_eq!(lowest_set_bit_index(0b1010_0000), 5);
        assert_eq!(lowest_set_bit_index(1 << 63), 63);
    }

    #[test]
    #[should_panic]
    fn test_lowest_set_bit_index_of_zero_panics() {
        lowest_set_bit_index(0);
    }

    #[test]
    fn test_count_set_bits_agrees_with_hardware() {
        for mask in [0u64, 1, u64::MAX, FILE_A, RANK_8 | FILE_H, 0xDEAD_BEEF_0BAD_F00D] {
            assert_eq!(count_set_bits(mask), mask.count_ones());
        }
    }

    #[test]
    fn test_square_algebraic() {
        assert_eq!(square_from_algebraic("a1"), Some(0));
        assert_eq!(square_from_algebraic("h1"), Some(7));
        assert_eq!(square_from_algebraic("e4"), Some(pos_to_sq(4, 5)));
        assert_eq!(square_from_algebraic("h8"), Some(63));
        assert_eq!(square_from_algebraic("i1"), None);
        assert_eq!(square_from_algebraic("a9"), None);
        assert_eq!(square_from_algebraic("a10"), None);
        assert_eq!(square_to_algebraic(pos_to_sq(6, 3)), "c6");
    }
}
