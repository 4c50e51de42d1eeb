//! # Hashkit
//!
//! Cryptographic hash primitives that work in both `no_std` and `std`
//! environments.
//!
//! ## Algorithms
//!
//! - **SHA-256**: Secure hash function, 256-bit output (FIPS 180-4)
//! - **SHA-512**: Secure hash function, 512-bit output (FIPS 180-4)
//! - **BLAKE2b**: Keyed or unkeyed hash, 1 to 64 byte output, delegated to
//!   the RustCrypto `blake2` crate
//!
//! ## Design
//!
//! - SHA-2 written from scratch: one compression core, one message schedule
//!   and one padding routine, all generic over the 32/64-bit word width
//! - Incremental hashers are chunking-independent: any split of the input
//!   across `update` calls yields the same digest
//! - Misuse after `finalize` is reported as [`HashError::Finalized`]
//! - No dynamic allocation in core operations
//!
//! ## Usage
//!
//! ```rust
//! use hashkit::{Sha256, Sha256Digest};
//!
//! let digest = Sha256::calculate(b"hello");
//! let expected: Sha256Digest =
//!     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824".parse()?;
//! assert_eq!(digest, expected);
//!
//! let mut hasher = Sha256::new();
//! hasher.update(b"hel")?;
//! hasher.update(b"lo")?;
//! assert_eq!(hasher.finalize()?, expected);
//! # Ok::<(), hashkit::HashError>(())
//! ```

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

pub mod blake2b;
pub mod digest;
pub mod error;
pub mod sha256;
pub mod sha512;

mod compress;
mod constants;
mod engine;
mod padding;
mod schedule;
mod word;

pub use blake2b::{Blake2b, Blake2b256, Blake2b512};
pub use self::digest::Digest;
pub use engine::Phase;
pub use error::HashError;
pub use sha256::{Sha256, Sha256Digest};
pub use sha512::{Sha512, Sha512Digest};

/// Common interface over every hasher in the crate.
///
/// `update` and `finalize` follow the `Fresh -> Accepting -> Finalized`
/// state machine; once finalized, both return [`HashError::Finalized`]
/// until [`Hash::reset`] is called.
pub trait Hash: Sized {
    /// Output size in bytes.
    const OUTPUT_SIZE: usize;

    /// Internal block size in bytes.
    const BLOCK_SIZE: usize;

    /// Digest produced by [`Hash::finalize`].
    type Output: AsRef<[u8]> + Eq + core::fmt::Debug;

    /// Create a new hasher.
    fn new() -> Self;

    /// Feed more input.
    fn update(&mut self, data: &[u8]) -> Result<(), HashError>;

    /// Pad, process the final block(s) and return the digest.
    fn finalize(&mut self) -> Result<Self::Output, HashError>;

    /// Return to the freshly constructed state.
    fn reset(&mut self);

    /// One-shot hash.
    fn calculate(data: &[u8]) -> Self::Output;

    /// One-shot hash to Vec.
    #[cfg(feature = "alloc")]
    fn hash_vec(data: &[u8]) -> Vec<u8> {
        Self::calculate(data).as_ref().to_vec()
    }
}
