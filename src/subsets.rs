//! Occupancy permutations: every blocker combination a slider on a square can see.

use crate::bitboard::{set_bit_indices, sq_to_bb, Bitboard};
use crate::patterns::PATTERNS;
use crate::rays::{bishop_attacks_slow, rook_attacks_slow};
use crate::types::Slider;

/// One training sample for the magic search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockerAndAttack {
    pub occupancy: Bitboard,
    pub attack: Bitboard,
}

/// Every subset of the set bits of `mask`, `2^popcount(mask)` of them.
///
/// Order is unspecified.
pub fn all_subsets(mask: Bitboard) -> Vec<Bitboard> {
    let bits: Vec<u8> = set_bit_indices(mask).collect();
    let mut subsets = Vec::with_capacity(1 << bits.len());
    extend_subsets(&bits, 0, &mut subsets);
    subsets
}

/// Decide the first remaining bit both ways, then recurse on the rest
fn extend_subsets(bits: &[u8], chosen: Bitboard, out: &mut Vec<Bitboard>) {
    match bits.split_first() {
        None => out.push(chosen),
        Some((&sq, rest)) => {
            extend_subsets(rest, chosen, out);
            extend_subsets(rest, chosen | sq_to_bb(sq), out);
        }
    }
}

/// All (occupancy, attack) pairs for a slider on `sq`. The attack is ray-cast
/// against the subset itself so it reflects real blocking.
pub fn training_pairs(sq: u8, slider: Slider) -> Vec<BlockerAndAttack> {
    let mask = PATTERNS.relevant(slider, sq);
    all_subsets(mask)
        .into_iter()
        .map(|occupancy| BlockerAndAttack {
            occupancy,
            attack: match slider {
                Slider::Rook => rook_attacks_slow(sq, occupancy),
                Slider::Bishop => bishop_attacks_slow(sq, occupancy),
            },
        })
        .collect()
}
