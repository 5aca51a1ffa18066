//! Hyperbola Quintessence slider attacks.
//!
//! Uses the `o^(o-2r)` trick on each line mask, with a byteswap for the
//! reverse direction. Ranks use a small lookup since byteswap does not
//! reverse bits within a byte.

use super::tables::{ANTI_MASKS, DIAG_MASKS, FILE_MASKS, FIRST_RANK_ATTACKS};
use super::SliderAttacks;

pub struct Hyperbola;

#[inline(always)]
fn hyp_quint(occupied: u64, mask: u64, square: usize) -> u64 {
    let piece_bit = 1u64 << square;
    let forward = occupied & mask;
    let backward = forward.swap_bytes();
    let forward_attacks = forward.wrapping_sub(piece_bit.wrapping_mul(2));
    let backward_attacks = backward
        .wrapping_sub(piece_bit.swap_bytes().wrapping_mul(2))
        .swap_bytes();
    (forward_attacks ^ backward_attacks) & mask
}

#[inline(always)]
fn rank_attacks(occupied: u64, square: usize) -> u64 {
    let rank = square / 8;
    let file = square % 8;
    let occ6 = ((occupied >> (rank * 8 + 1)) & 63) as usize;
    FIRST_RANK_ATTACKS[8 * occ6 + file] << (rank * 8)
}

impl SliderAttacks for Hyperbola {
    const NAME: &'static str = "hyperbola";

    #[inline(always)]
    fn bishop(square: usize, occupancy: u64) -> u64 {
        hyp_quint(occupancy, DIAG_MASKS[square], square)
            | hyp_quint(occupancy, ANTI_MASKS[square], square)
    }

    #[inline(always)]
    fn rook(square: usize, occupancy: u64) -> u64 {
        hyp_quint(occupancy, FILE_MASKS[square], square) | rank_attacks(occupancy, square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_attacks_empty_board() {
        // Rook on e4 attacks rank 4 and the e-file
        let expected = ((0xFFu64 << 24) | 0x1010101010101010) & !(1u64 << 28);
        assert_eq!(Hyperbola::rook(28, 0), expected);
    }

    #[test]
    fn test_bishop_attacks_with_blockers() {
        // Bishop on e4, blocker on g6: g6 is hit, h7 is not
        let attacks = Hyperbola::bishop(28, 1u64 << 46);
        assert!(attacks & (1u64 << 46) != 0);
        assert!(attacks & (1u64 << 55) == 0);
        assert!(attacks & (1u64 << 56) != 0);
    }
}
