//! SHA-512 Implementation
//!
//! Pure Rust SHA-512 hash function (FIPS 180-4).

use crate::constants::{SHA512_IV, SHA512_K};
use crate::digest::Digest;
use crate::engine::{Engine, Phase, Variant};
use crate::error::HashError;
use crate::Hash;

/// A SHA-512 digest: 64 bytes.
pub type Sha512Digest = Digest<64>;

/// SHA-512 parameters: 64-bit words, 80 rounds, 128-byte blocks, 128-bit length.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Sha512Variant {}

impl Variant for Sha512Variant {
    type Word = u64;

    const NAME: &'static str = "SHA-512";
    const ROUNDS: usize = 80;
    const BLOCK_SIZE: usize = 128;
    const LENGTH_FIELD: usize = 16;
    const IV: [u64; 8] = SHA512_IV;
    const K: &'static [u64] = &SHA512_K;
}

/// SHA-512 hasher.
#[derive(Clone, Debug)]
pub struct Sha512 {
    engine: Engine<Sha512Variant>,
}

impl Sha512 {
    pub const OUTPUT_SIZE: usize = 64;
    pub const BLOCK_SIZE: usize = 128;

    /// Create a new SHA-512 hasher.
    pub const fn new() -> Self {
        Self {
            engine: Engine::new(),
        }
    }

    /// Update the hasher with input data.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> Result<(), HashError> {
        self.engine.update(data.as_ref())
    }

    /// Finalize and return the 64-byte hash.
    pub fn finalize(&mut self) -> Result<Sha512Digest, HashError> {
        let mut out = [0u8; 64];
        self.engine.finalize_into(&mut out)?;
        Ok(Digest::new(out))
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn bytes_consumed(&self) -> u128 {
        self.engine.bytes_consumed()
    }

    /// One-shot hash function.
    pub fn calculate(data: impl AsRef<[u8]>) -> Sha512Digest {
        let mut engine = Engine::<Sha512Variant>::new();
        engine.absorb(data.as_ref());
        let mut out = [0u8; 64];
        engine.finish(&mut out);
        Digest::new(out)
    }
}

impl Default for Sha512 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hash for Sha512 {
    const OUTPUT_SIZE: usize = 64;
    const BLOCK_SIZE: usize = 128;

    type Output = Sha512Digest;

    fn new() -> Self {
        Sha512::new()
    }

    fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        Sha512::update(self, data)
    }

    fn finalize(&mut self) -> Result<Sha512Digest, HashError> {
        Sha512::finalize(self)
    }

    fn reset(&mut self) {
        Sha512::reset(self)
    }

    fn calculate(data: &[u8]) -> Sha512Digest {
        Sha512::calculate(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Sha512Digest {
        s.parse().unwrap()
    }

    #[test]
    fn test_sha512_empty() {
        assert_eq!(
            Sha512::calculate(b""),
            hex(concat!(
                "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce",
                "47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
            ))
        );
    }

    #[test]
    fn test_sha512_abc() {
        assert_eq!(
            Sha512::calculate(b"abc"),
            hex(concat!(
                "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a",
                "2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
            ))
        );
    }

    #[test]
    fn test_sha512_two_blocks() {
        let message = concat!(
            "abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmn",
            "hijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu"
        );
        assert_eq!(message.len(), 112);
        assert_eq!(
            Sha512::calculate(message),
            hex(concat!(
                "8e959b75dae313da8cf4f72814fc143f8f7779c6eb9f7fa17299aeadb6889018",
                "501d289e4900f7e4331b99dec4b5433ac7d329eeb6dd26545e96e55b874be909"
            ))
        );
    }

    #[test]
    fn test_sha512_byte_at_a_time() {
        let message = b"The quick brown fox jumps over the lazy dog";
        let mut hasher = Sha512::new();
        for byte in message {
            hasher.update([*byte]).unwrap();
        }
        assert_eq!(hasher.bytes_consumed(), message.len() as u128);
        assert_eq!(hasher.finalize().unwrap(), Sha512::calculate(message));
    }

    #[test]
    fn test_sha512_misuse() {
        let mut hasher = Sha512::default();
        assert_eq!(hasher.phase(), Phase::Fresh);
        hasher.finalize().unwrap();
        assert_eq!(hasher.update(b""), Err(HashError::Finalized));
        assert_eq!(hasher.finalize(), Err(HashError::Finalized));
    }

    #[test]
    fn test_sha512_finalize_without_update_is_empty_digest() {
        let mut hasher = Sha512::new();
        assert_eq!(hasher.finalize().unwrap(), Sha512::calculate(b""));
    }
}
