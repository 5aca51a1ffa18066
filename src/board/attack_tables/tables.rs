//! Leaper attack tables and line masks shared by the slider strategies.

use once_cell::sync::Lazy;

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Rook directions as (rank, file) steps.
pub(crate) const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
/// Bishop directions as (rank, file) steps.
pub(crate) const DIAGONAL: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn leaper_table(deltas: &[(isize, isize)]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << (nr * 8 + nf);
            }
        }
        *slot = mask;
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

pub(crate) static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

/// Squares a pawn of each color attacks, indexed `[color][square]`.
pub(crate) static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    [
        leaper_table(&[(1, -1), (1, 1)]),
        leaper_table(&[(-1, -1), (-1, 1)]),
    ]
});

/// Walks each direction from `sq` until the edge or the first occupied
/// square, which is included. Used to build tables and as the reference
/// the fast strategies are checked against.
pub(crate) fn ray_attacks(sq: usize, occupancy: u64, directions: &[(isize, isize)]) -> u64 {
    let r = (sq / 8) as isize;
    let f = (sq % 8) as isize;
    let mut attacks = 0u64;
    for &(dr, df) in directions {
        let (mut nr, mut nf) = (r + dr, f + df);
        while (0..8).contains(&nr) && (0..8).contains(&nf) {
            let bit = 1u64 << (nr * 8 + nf);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            nr += dr;
            nf += df;
        }
    }
    attacks
}

fn line_masks(dr: isize, df: isize) -> [u64; 64] {
    let mut masks = [0u64; 64];
    for (sq, slot) in masks.iter_mut().enumerate() {
        *slot = ray_attacks(sq, 0, &[(dr, df), (-dr, -df)]) | (1u64 << sq);
    }
    masks
}

/// Full a1-h8 direction diagonal through each square, the square included.
pub(crate) static DIAG_MASKS: Lazy<[u64; 64]> = Lazy::new(|| line_masks(1, 1));
/// Full a8-h1 direction anti-diagonal through each square, the square included.
pub(crate) static ANTI_MASKS: Lazy<[u64; 64]> = Lazy::new(|| line_masks(1, -1));
/// File through each square, the square included.
pub(crate) static FILE_MASKS: Lazy<[u64; 64]> = Lazy::new(|| line_masks(1, 0));
/// Rank through each square, the square included.
pub(crate) static RANK_MASKS: Lazy<[u64; 64]> = Lazy::new(|| line_masks(0, 1));

/// Attacks along the first rank for a slider on `file`, given the occupancy
/// of files b-g as six bits. Indexed `[8 * occ6 + file]`.
pub(crate) static FIRST_RANK_ATTACKS: Lazy<[u64; 512]> = Lazy::new(|| {
    let mut attacks = [0u64; 512];
    for occ6 in 0..64usize {
        for file in 0..8usize {
            let occupancy = (occ6 as u64) << 1;
            attacks[8 * occ6 + file] = ray_attacks(file, occupancy, &[(0, 1), (0, -1)]);
        }
    }
    attacks
});
