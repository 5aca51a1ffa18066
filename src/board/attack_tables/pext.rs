//! PEXT-indexed slider attacks.
//!
//! Relevant blocker masks are compressed into a dense table index with a
//! parallel bit extract. On x86_64 builds with BMI2 enabled this is the
//! hardware instruction; elsewhere a portable loop computes the same index.
//! The tables are filled from the classic ray scan.

use once_cell::sync::Lazy;

use super::classic::Classic;
use super::tables::{ray_attacks, DIAGONAL, ORTHOGONAL};
use super::SliderAttacks;

pub struct Pext;

struct PextTable {
    masks: [u64; 64],
    offsets: [usize; 64],
    attacks: Vec<u64>,
}

#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline(always)]
fn pext(source: u64, mask: u64) -> u64 {
    // SAFETY: the bmi2 target feature is enabled at compile time.
    unsafe { core::arch::x86_64::_pext_u64(source, mask) }
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline(always)]
fn pext(source: u64, mut mask: u64) -> u64 {
    let mut result = 0u64;
    let mut bit = 1u64;
    while mask != 0 {
        let lowest = mask & mask.wrapping_neg();
        if source & lowest != 0 {
            result |= bit;
        }
        mask &= mask - 1;
        bit <<= 1;
    }
    result
}

/// Squares whose occupancy can change the attack set: the empty-board rays
/// without their final edge square.
fn relevant_mask(square: usize, directions: &[(isize, isize)]) -> u64 {
    let mut mask = 0u64;
    for &dir in directions {
        let ray = ray_attacks(square, 0, &[dir]);
        if ray == 0 {
            continue;
        }
        // The ray's last square is the farthest one from `square`.
        let last = if square < ray.trailing_zeros() as usize {
            63 - ray.leading_zeros() as usize
        } else {
            ray.trailing_zeros() as usize
        };
        mask |= ray & !(1u64 << last);
    }
    mask
}

fn build_table(directions: &[(isize, isize)], attacks_of: fn(usize, u64) -> u64) -> PextTable {
    let mut masks = [0u64; 64];
    let mut offsets = [0usize; 64];
    let mut attacks = Vec::new();
    for square in 0..64 {
        let mask = relevant_mask(square, directions);
        masks[square] = mask;
        offsets[square] = attacks.len();
        attacks.resize(attacks.len() + (1usize << mask.count_ones()), 0);
        // Carry-rippler walk over every subset of the mask.
        let mut subset = 0u64;
        loop {
            let index = offsets[square] + pext(subset, mask) as usize;
            attacks[index] = attacks_of(square, subset);
            subset = subset.wrapping_sub(mask) & mask;
            if subset == 0 {
                break;
            }
        }
    }
    PextTable {
        masks,
        offsets,
        attacks,
    }
}

static BISHOP_TABLE: Lazy<PextTable> = Lazy::new(|| build_table(&DIAGONAL, Classic::bishop));
static ROOK_TABLE: Lazy<PextTable> = Lazy::new(|| build_table(&ORTHOGONAL, Classic::rook));

impl PextTable {
    #[inline(always)]
    fn lookup(&self, square: usize, occupancy: u64) -> u64 {
        let index = pext(occupancy, self.masks[square]) as usize;
        self.attacks[self.offsets[square] + index]
    }
}

impl SliderAttacks for Pext {
    const NAME: &'static str = "pext";

    #[inline]
    fn bishop(square: usize, occupancy: u64) -> u64 {
        BISHOP_TABLE.lookup(square, occupancy)
    }

    #[inline]
    fn rook(square: usize, occupancy: u64) -> u64 {
        ROOK_TABLE.lookup(square, occupancy)
    }
}
