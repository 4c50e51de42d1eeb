//! Word-width arithmetic shared by SHA-256 (32-bit words) and SHA-512
//! (64-bit words).
//!
//! The round and schedule code is written once against [`Word`]; the
//! rotation amounts of the sigma functions are part of the word type since
//! FIPS 180-4 fixes them per width.

use core::fmt::Debug;
use core::ops::{BitAnd, BitXor, Not};

/// An unsigned machine word the SHA-2 core operates on.
pub(crate) trait Word:
    Copy + Eq + Debug + BitAnd<Output = Self> + BitXor<Output = Self> + Not<Output = Self>
{
    /// Width in bytes.
    const BYTES: usize;

    const ZERO: Self;

    /// Rotations of Σ0.
    const BIG_SIGMA0: [u32; 3];
    /// Rotations of Σ1.
    const BIG_SIGMA1: [u32; 3];
    /// Two rotations and one shift of σ0.
    const SMALL_SIGMA0: [u32; 3];
    /// Two rotations and one shift of σ1.
    const SMALL_SIGMA1: [u32; 3];

    fn rotr(self, n: u32) -> Self;

    fn shr(self, n: u32) -> Self;

    /// Addition modulo 2^(8 * BYTES).
    fn add_mod(self, other: Self) -> Self;

    /// Decode a big-endian word from exactly `BYTES` bytes.
    fn from_be_slice(bytes: &[u8]) -> Self;

    /// Encode as big-endian into exactly `BYTES` bytes.
    fn write_be(self, out: &mut [u8]);
}

impl Word for u32 {
    const BYTES: usize = 4;
    const ZERO: Self = 0;

    const BIG_SIGMA0: [u32; 3] = [2, 13, 22];
    const BIG_SIGMA1: [u32; 3] = [6, 11, 25];
    const SMALL_SIGMA0: [u32; 3] = [7, 18, 3];
    const SMALL_SIGMA1: [u32; 3] = [17, 19, 10];

    #[inline(always)]
    fn rotr(self, n: u32) -> Self {
        self.rotate_right(n)
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        self >> n
    }

    #[inline(always)]
    fn add_mod(self, other: Self) -> Self {
        self.wrapping_add(other)
    }

    #[inline(always)]
    fn from_be_slice(bytes: &[u8]) -> Self {
        let mut word = [0u8; 4];
        word.copy_from_slice(bytes);
        u32::from_be_bytes(word)
    }

    #[inline(always)]
    fn write_be(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_be_bytes());
    }
}

impl Word for u64 {
    const BYTES: usize = 8;
    const ZERO: Self = 0;

    const BIG_SIGMA0: [u32; 3] = [28, 34, 39];
    const BIG_SIGMA1: [u32; 3] = [14, 18, 41];
    const SMALL_SIGMA0: [u32; 3] = [1, 8, 7];
    const SMALL_SIGMA1: [u32; 3] = [19, 61, 6];

    #[inline(always)]
    fn rotr(self, n: u32) -> Self {
        self.rotate_right(n)
    }

    #[inline(always)]
    fn shr(self, n: u32) -> Self {
        self >> n
    }

    #[inline(always)]
    fn add_mod(self, other: Self) -> Self {
        self.wrapping_add(other)
    }

    #[inline(always)]
    fn from_be_slice(bytes: &[u8]) -> Self {
        let mut word = [0u8; 8];
        word.copy_from_slice(bytes);
        u64::from_be_bytes(word)
    }

    #[inline(always)]
    fn write_be(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_be_bytes());
    }
}

/// Ch(x, y, z): for each bit, `y` where `x` is set, `z` otherwise.
#[inline(always)]
pub(crate) fn ch<W: Word>(x: W, y: W, z: W) -> W {
    (x & y) ^ (!x & z)
}

/// Maj(x, y, z): bitwise majority vote.
#[inline(always)]
pub(crate) fn maj<W: Word>(x: W, y: W, z: W) -> W {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
pub(crate) fn big_sigma0<W: Word>(x: W) -> W {
    let [r1, r2, r3] = W::BIG_SIGMA0;
    x.rotr(r1) ^ x.rotr(r2) ^ x.rotr(r3)
}

#[inline(always)]
pub(crate) fn big_sigma1<W: Word>(x: W) -> W {
    let [r1, r2, r3] = W::BIG_SIGMA1;
    x.rotr(r1) ^ x.rotr(r2) ^ x.rotr(r3)
}

#[inline(always)]
pub(crate) fn small_sigma0<W: Word>(x: W) -> W {
    let [r1, r2, s] = W::SMALL_SIGMA0;
    x.rotr(r1) ^ x.rotr(r2) ^ x.shr(s)
}

#[inline(always)]
pub(crate) fn small_sigma1<W: Word>(x: W) -> W {
    let [r1, r2, s] = W::SMALL_SIGMA1;
    x.rotr(r1) ^ x.rotr(r2) ^ x.shr(s)
}
