//! Classic ray-table slider attacks.
//!
//! Each direction has a precomputed empty-board ray. The nearest blocker
//! along the ray is found with a bit scan, and the ray beyond it is masked
//! away by xoring the blocker's own ray in the same direction.

use once_cell::sync::Lazy;

use super::tables::ray_attacks;
use super::SliderAttacks;

pub struct Classic;

// Directions that increase the square index are scanned with the lsb,
// the others with the msb.
const NORTH: usize = 0;
const NORTH_EAST: usize = 1;
const EAST: usize = 2;
const NORTH_WEST: usize = 3;
const SOUTH: usize = 4;
const SOUTH_WEST: usize = 5;
const WEST: usize = 6;
const SOUTH_EAST: usize = 7;

const STEPS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (1, -1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (-1, 1),
];

static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    for (dir, step) in STEPS.iter().enumerate() {
        for sq in 0..64 {
            rays[dir][sq] = ray_attacks(sq, 0, &[*step]);
        }
    }
    rays
});

#[inline(always)]
fn positive_ray(dir: usize, square: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][square];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    ray ^ RAYS[dir][blockers.trailing_zeros() as usize]
}

#[inline(always)]
fn negative_ray(dir: usize, square: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][square];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    ray ^ RAYS[dir][63 - blockers.leading_zeros() as usize]
}

impl SliderAttacks for Classic {
    const NAME: &'static str = "classic";

    #[inline]
    fn bishop(square: usize, occupancy: u64) -> u64 {
        positive_ray(NORTH_EAST, square, occupancy)
            | positive_ray(NORTH_WEST, square, occupancy)
            | negative_ray(SOUTH_WEST, square, occupancy)
            | negative_ray(SOUTH_EAST, square, occupancy)
    }

    #[inline]
    fn rook(square: usize, occupancy: u64) -> u64 {
        positive_ray(NORTH, square, occupancy)
            | positive_ray(EAST, square, occupancy)
            | negative_ray(SOUTH, square, occupancy)
            | negative_ray(WEST, square, occupancy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rays_point_away_from_square() {
        // North from a1 is the a-file above it
        assert_eq!(RAYS[NORTH][0], 0x0101010101010100);
        // West from a1 is empty
        assert_eq!(RAYS[WEST][0], 0);
    }

    #[test]
    fn test_rook_blocked_both_ways() {
        // Rook on d4 with blockers on d6 and b4
        let occ = (1u64 << 43) | (1u64 << 25);
        let attacks = Classic::rook(27, occ);
        assert!(attacks & (1u64 << 43) != 0);
        assert!(attacks & (1u64 << 51) == 0);
        assert!(attacks & (1u64 << 25) != 0);
        assert!(attacks & (1u64 << 24) == 0);
    }
}
