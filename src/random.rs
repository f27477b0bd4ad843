// Copyright (c) 2024 PostFinance AG
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use rand::{CryptoRng, RngCore};

/// Draws a uniformly distributed integer in `[0, n)` without modulo bias.
///
/// Random bytes are drawn from `rng` and rejected while they fall into the
/// truncated top of the byte range (`value >= n * floor(256 / n)`), the
/// accepted value is then reduced modulo `n`. For `n > 256` the same rule is
/// applied to the smallest big-endian byte group covering `n`.
///
/// At least half of the range is always accepted, so the expected number of
/// draws is below 2. For the alphabets used by the generator (26, 26 and 10
/// symbols) it is 1.09, 1.09 and 1.02 respectively.
///
/// # Panics
///
/// Panics if `n` is zero.
pub fn uniform_below<R: CryptoRng + ?Sized>(n: usize, rng: &mut R) -> usize {
    assert!(n > 0, "Cannot sample from an empty range");

    let width = byte_width(n);
    let n = n as u128;
    let zone = n * ((1u128 << (8 * width)) / n);

    let mut buffer = [0u8; 8];
    loop {
        rng.fill_bytes(&mut buffer[..width]);
        let value = buffer[..width]
            .iter()
            .fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte));

        if value < zone {
            return (value % n) as usize;
        }
    }
}

/// Shuffles `items` in place (Fisher–Yates) using [`uniform_below`] indices.
pub fn shuffle<T, R: CryptoRng + ?Sized>(items: &mut [T], rng: &mut R) {
    for n in (2..=items.len()).rev() {
        let k = uniform_below(n, rng);
        items.swap(k, n - 1);
    }
}

// Number of bytes needed so that 256^width >= n.
fn byte_width(n: usize) -> usize {
    let bits = u64::BITS - ((n - 1) as u64).leading_zeros();
    (bits as usize).div_ceil(8).max(1)
}
