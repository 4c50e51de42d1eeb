//! # BLAKE2b
//!
//! Keyed and unkeyed BLAKE2b (RFC 7693) with a runtime output width,
//! delegated to the RustCrypto `blake2` crate. Only the init / update /
//! finalize contract lives here; the compression function is the crate's.
//!
//! A non-empty key switches to keyed mode: the key is announced in the
//! parameter block and absorbed as a zero-padded first block.

use core::fmt;

#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

use blake2::digest::core_api::{Buffer, UpdateCore, VariableOutputCore};
use blake2::digest::Output;
use blake2::Blake2bVarCore;

use crate::digest::Digest;
use crate::engine::Phase;
use crate::error::HashError;
use crate::Hash;

/// Largest digest BLAKE2b can produce, in bytes.
pub const MAX_OUTPUT_LEN: usize = 64;

/// Longest key accepted in keyed mode, in bytes.
pub const MAX_KEY_LEN: usize = 64;

/// BLAKE2b block size in bytes.
pub const BLOCK_SIZE: usize = 128;

/// Incremental BLAKE2b with an output width chosen at construction.
#[derive(Clone)]
pub struct Blake2b {
    core: Blake2bVarCore,
    buffer: Buffer<Blake2bVarCore>,
    key: [u8; MAX_KEY_LEN],
    key_len: usize,
    output_len: usize,
    phase: Phase,
}

impl Blake2b {
    /// Unkeyed hasher producing `output_len` bytes.
    pub fn new(output_len: usize) -> Result<Self, HashError> {
        Self::new_keyed(&[], output_len)
    }

    /// Hasher producing `output_len` bytes, keyed when `key` is non-empty.
    pub fn new_keyed(key: &[u8], output_len: usize) -> Result<Self, HashError> {
        if output_len == 0 || output_len > MAX_OUTPUT_LEN {
            return Err(HashError::InvalidOutputLength(output_len));
        }
        if key.len() > MAX_KEY_LEN {
            return Err(HashError::InvalidKeyLength(key.len()));
        }
        Ok(Self::with_valid_params(key, output_len))
    }

    /// Construct from parameters already checked against the limits above.
    fn with_valid_params(key: &[u8], output_len: usize) -> Self {
        let mut hasher = Self {
            core: Blake2bVarCore::new_with_params(&[], &[], key.len(), output_len),
            buffer: Buffer::<Blake2bVarCore>::default(),
            key: [0u8; MAX_KEY_LEN],
            key_len: key.len(),
            output_len,
            phase: Phase::Fresh,
        };
        if !key.is_empty() {
            hasher.key[..key.len()].copy_from_slice(key);
            let mut block = [0u8; BLOCK_SIZE];
            block[..key.len()].copy_from_slice(key);
            hasher.absorb(&block);
        }
        hasher
    }

    /// Configured digest length in bytes.
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    pub fn is_keyed(&self) -> bool {
        self.key_len > 0
    }

    /// Start over with the same key and output width.
    pub fn reset(&mut self) {
        let key = self.key;
        *self = Self::with_valid_params(&key[..self.key_len], self.output_len);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feed more input.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> Result<(), HashError> {
        self.ensure_open("update")?;
        self.absorb(data.as_ref());
        self.phase = Phase::Accepting;
        Ok(())
    }

    /// Write the digest into `out`, which must be exactly `output_len` bytes.
    pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), HashError> {
        self.ensure_open("finalize")?;
        if out.len() != self.output_len {
            return Err(HashError::InvalidLength {
                expected: self.output_len,
                actual: out.len(),
            });
        }

        self.finish(out);
        Ok(())
    }

    /// Produce the digest as an owned buffer of `output_len` bytes.
    #[cfg(feature = "alloc")]
    pub fn finalize(&mut self) -> Result<Vec<u8>, HashError> {
        let mut out = vec![0u8; self.output_len];
        self.finalize_into(&mut out)?;
        Ok(out)
    }

    /// One-shot hash of `data`, keyed when `key` is non-empty.
    #[cfg(feature = "alloc")]
    pub fn calculate(key: &[u8], data: &[u8], output_len: usize) -> Result<Vec<u8>, HashError> {
        let mut hasher = Self::new_keyed(key, output_len)?;
        hasher.update(data)?;
        hasher.finalize()
    }

    fn finish(&mut self, out: &mut [u8]) {
        let mut full = Output::<Blake2bVarCore>::default();
        self.core.finalize_variable_core(&mut self.buffer, &mut full);
        out.copy_from_slice(&full[..self.output_len]);

        log::debug!("BLAKE2b: {}-byte digest computed", self.output_len);
        self.phase = Phase::Finalized;
    }

    fn absorb(&mut self, data: &[u8]) {
        let Self {
            core: compressor,
            buffer,
            ..
        } = self;
        buffer.digest_blocks(data, |blocks| compressor.update_blocks(blocks));
    }

    fn ensure_open(&self, operation: &str) -> Result<(), HashError> {
        if self.phase == Phase::Finalized {
            log::warn!("BLAKE2b: {} called after finalize", operation);
            return Err(HashError::Finalized);
        }
        Ok(())
    }
}

impl fmt::Debug for Blake2b {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blake2b")
            .field("output_len", &self.output_len)
            .field("keyed", &self.is_keyed())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

macro_rules! blake2b_fixed {
    ($name:ident, $len:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug)]
        pub struct $name {
            inner: Blake2b,
        }

        impl $name {
            pub const OUTPUT_SIZE: usize = $len;

            /// Unkeyed hasher.
            pub fn new() -> Self {
                Self {
                    inner: Blake2b::with_valid_params(&[], $len),
                }
            }

            /// Keyed hasher; an empty key is the same as [`Self::new`].
            pub fn new_keyed(key: &[u8]) -> Result<Self, HashError> {
                Ok(Self {
                    inner: Blake2b::new_keyed(key, $len)?,
                })
            }

            pub fn update(&mut self, data: impl AsRef<[u8]>) -> Result<(), HashError> {
                self.inner.update(data)
            }

            pub fn finalize(&mut self) -> Result<Digest<$len>, HashError> {
                let mut out = [0u8; $len];
                self.inner.finalize_into(&mut out)?;
                Ok(Digest::new(out))
            }

            /// Start over with the same key.
            pub fn reset(&mut self) {
                self.inner.reset();
            }

            pub fn phase(&self) -> Phase {
                self.inner.phase()
            }

            /// One-shot unkeyed hash.
            pub fn calculate(data: impl AsRef<[u8]>) -> Digest<$len> {
                let mut inner = Blake2b::with_valid_params(&[], $len);
                inner.absorb(data.as_ref());
                let mut out = [0u8; $len];
                inner.finish(&mut out);
                Digest::new(out)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Hash for $name {
            const OUTPUT_SIZE: usize = $len;
            const BLOCK_SIZE: usize = BLOCK_SIZE;

            type Output = Digest<$len>;

            fn new() -> Self {
                $name::new()
            }

            fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
                $name::update(self, data)
            }

            fn finalize(&mut self) -> Result<Digest<$len>, HashError> {
                $name::finalize(self)
            }

            fn reset(&mut self) {
                $name::reset(self)
            }

            fn calculate(data: &[u8]) -> Digest<$len> {
                $name::calculate(data)
            }
        }
    };
}

blake2b_fixed!(Blake2b256, 32, "BLAKE2b with a 32-byte digest.");
blake2b_fixed!(Blake2b512, 64, "BLAKE2b with a 64-byte digest.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake2b512_abc() {
        let expected: Digest<64> = concat!(
            "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1",
            "7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
        )
        .parse()
        .unwrap();
        assert_eq!(Blake2b512::calculate(b"abc"), expected);
    }

    #[test]
    fn test_blake2b256_empty() {
        let expected: Digest<32> =
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8".parse().unwrap();
        assert_eq!(Blake2b256::calculate(b""), expected);
    }

    #[test]
    fn test_keyed_empty_message() {
        let key: [u8; 64] = core::array::from_fn(|i| i as u8);
        let expected: Digest<64> = concat!(
            "10ebb67700b1868efb4417987acf4690ae9d972fb7a590c2f02871799aaa4786",
            "b5e996e8f0f4eb981fc214b005f42d2ff4233499391653df7aefcbc13fc51568"
        )
        .parse()
        .unwrap();

        let mut hasher = Blake2b512::new_keyed(&key).unwrap();
        assert_eq!(hasher.finalize().unwrap(), expected);
    }

    #[test]
    fn test_variable_output_len() {
        let mut hasher = Blake2b::new_keyed(b"secret", 20).unwrap();
        hasher.update(b"abc").unwrap();
        let mut out = [0u8; 20];
        hasher.finalize_into(&mut out).unwrap();
        assert_eq!(out, hex_literal::hex!("0c3d973f5f44547f37c0c0c34ae8cd9015c324ef"));

        let mut hasher = Blake2b::new(1).unwrap();
        hasher.update(b"abc").unwrap();
        let mut out = [0u8; 1];
        hasher.finalize_into(&mut out).unwrap();
        assert_eq!(out, [0x6b]);
    }

    #[test]
    fn test_parameter_limits() {
        assert_eq!(Blake2b::new(0).unwrap_err(), HashError::InvalidOutputLength(0));
        assert_eq!(Blake2b::new(65).unwrap_err(), HashError::InvalidOutputLength(65));
        assert_eq!(
            Blake2b::new_keyed(&[0u8; 65], 32).unwrap_err(),
            HashError::InvalidKeyLength(65)
        );
        assert!(Blake2b::new_keyed(&[0u8; 64], 64).is_ok());
    }

    #[test]
    fn test_finalize_buffer_must_match() {
        let mut hasher = Blake2b::new(32).unwrap();
        let mut out = [0u8; 16];
        assert_eq!(
            hasher.finalize_into(&mut out),
            Err(HashError::InvalidLength {
                expected: 32,
                actual: 16,
            })
        );
        assert_eq!(hasher.phase(), Phase::Fresh);
    }

    #[test]
    fn test_keyed_differs_from_unkeyed() {
        let mut keyed = Blake2b256::new_keyed(b"key").unwrap();
        keyed.update(b"message").unwrap();
        assert_ne!(keyed.finalize().unwrap(), Blake2b256::calculate(b"message"));

        let mut empty_key = Blake2b256::new_keyed(b"").unwrap();
        empty_key.update(b"message").unwrap();
        assert_eq!(empty_key.finalize().unwrap(), Blake2b256::calculate(b"message"));
    }

    #[test]
    fn test_misuse_and_reset_keeps_key() {
        let mut hasher = Blake2b512::new_keyed(b"key").unwrap();
        hasher.update(b"abc").unwrap();
        let first = hasher.finalize().unwrap();
        assert_eq!(hasher.update(b"abc"), Err(HashError::Finalized));
        assert_eq!(hasher.finalize(), Err(HashError::Finalized));

        hasher.reset();
        assert_eq!(hasher.phase(), Phase::Fresh);
        hasher.update(b"abc").unwrap();
        assert_eq!(hasher.finalize().unwrap(), first);
    }

    #[test]
    fn test_chunking_across_key_block() {
        let data = [0x42u8; 300];
        let one_shot = {
            let mut hasher = Blake2b512::new_keyed(b"k").unwrap();
            hasher.update(data).unwrap();
            hasher.finalize().unwrap()
        };
        for split in [0, 1, 127, 128, 129, 256, 300] {
            let mut hasher = Blake2b512::new_keyed(b"k").unwrap();
            hasher.update(&data[..split]).unwrap();
            hasher.update(&data[split..]).unwrap();
            assert_eq!(hasher.finalize().unwrap(), one_shot, "split {}", split);
        }
    }
}
