//! Kindergarten slider attacks.
//!
//! The inner occupancy of a line is gathered into six bits with a single
//! multiply and looked up in a small table. Diagonals and ranks share the
//! fill-up table; files use a separate a-file table.

use once_cell::sync::Lazy;

use super::tables::{ray_attacks, ANTI_MASKS, DIAG_MASKS, RANK_MASKS};
use super::SliderAttacks;

pub struct Kindergarten;

const FILE_B: u64 = 0x0202020202020202;
const INNER_FILE_A: u64 = 0x0001010101010100;
const C2_H7_DIAGONAL: u64 = 0x0004081020408000;

/// First-rank attacks for `[file][occ6]`, copied to every rank.
static FILL_UP_ATTACKS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut table = [[0u64; 64]; 8];
    for (file, row) in table.iter_mut().enumerate() {
        for (occ6, slot) in row.iter_mut().enumerate() {
            let first_rank = ray_attacks(file, (occ6 as u64) << 1, &[(0, 1), (0, -1)]);
            *slot = first_rank.wrapping_mul(0x0101010101010101);
        }
    }
    table
});

/// A-file attacks for `[rank][occ6]`, where bit `i` of `occ6` is rank `i + 1`.
static A_FILE_ATTACKS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut table = [[0u64; 64]; 8];
    for (rank, row) in table.iter_mut().enumerate() {
        for (occ6, slot) in row.iter_mut().enumerate() {
            let mut occupancy = 0u64;
            for i in 0..6 {
                if occ6 & (1 << i) != 0 {
                    occupancy |= 1u64 << ((i + 1) * 8);
                }
            }
            *slot = ray_attacks(rank * 8, occupancy, &[(1, 0), (-1, 0)]);
        }
    }
    table
});

#[inline(always)]
fn line_attacks(mask: u64, square: usize, occupancy: u64) -> u64 {
    let occ6 = ((mask & occupancy).wrapping_mul(FILE_B) >> 58) as usize;
    mask & FILL_UP_ATTACKS[square & 7][occ6]
}

#[inline(always)]
fn file_attacks(square: usize, occupancy: u64) -> u64 {
    let file = square & 7;
    let occ = INNER_FILE_A & (occupancy >> file);
    let occ6 = (occ.wrapping_mul(C2_H7_DIAGONAL) >> 58) as usize;
    A_FILE_ATTACKS[square >> 3][occ6] << file
}

impl SliderAttacks for Kindergarten {
    const NAME: &'static str = "kindergarten";

    #[inline]
    fn bishop(square: usize, occupancy: u64) -> u64 {
        (line_attacks(DIAG_MASKS[square], square, occupancy)
            | line_attacks(ANTI_MASKS[square], square, occupancy))
            & !(1u64 << square)
    }

    #[inline]
    fn rook(square: usize, occupancy: u64) -> u64 {
        (line_attacks(RANK_MASKS[square], square, occupancy) | file_attacks(square, occupancy))
            & !(1u64 << square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_attacks_on_h_file() {
        // Rook on h1 with a blocker on h5
        let attacks = Kindergarten::rook(7, 1u64 << 39);
        assert_eq!(attacks & 0x8080808080808080, (1u64 << 15) | (1u64 << 23) | (1u64 << 31) | (1u64 << 39));
    }

    #[test]
    fn test_diagonal_from_corner() {
        assert_eq!(Kindergarten::bishop(0, 0), 0x8040201008040200);
    }
}
