//! SHA-256 Implementation
//!
//! Pure Rust SHA-256 hash function (FIPS 180-4).

use crate::constants::{SHA256_IV, SHA256_K};
use crate::digest::Digest;
use crate::engine::{Engine, Phase, Variant};
use crate::error::HashError;
use crate::Hash;

/// A SHA-256 digest: 32 bytes.
pub type Sha256Digest = Digest<32>;

/// SHA-256 parameters: 32-bit words, 64 rounds, 64-byte blocks, 64-bit length.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Sha256Variant {}

impl Variant for Sha256Variant {
    type Word = u32;

    const NAME: &'static str = "SHA-256";
    const ROUNDS: usize = 64;
    const BLOCK_SIZE: usize = 64;
    const LENGTH_FIELD: usize = 8;
    const IV: [u32; 8] = SHA256_IV;
    const K: &'static [u32] = &SHA256_K;
}

/// SHA-256 hasher.
#[derive(Clone, Debug)]
pub struct Sha256 {
    engine: Engine<Sha256Variant>,
}

impl Sha256 {
    /// Output size in bytes.
    pub const OUTPUT_SIZE: usize = 32;

    /// Block size in bytes.
    pub const BLOCK_SIZE: usize = 64;

    /// Create a new SHA-256 hasher.
    pub const fn new() -> Self {
        Self {
            engine: Engine::new(),
        }
    }

    /// Update the hasher with input data.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> Result<(), HashError> {
        self.engine.update(data.as_ref())
    }

    /// Finalize and return the 32-byte hash.
    ///
    /// Fails with [`HashError::Finalized`] if called twice without a reset.
    pub fn finalize(&mut self) -> Result<Sha256Digest, HashError> {
        let mut out = [0u8; 32];
        self.engine.finalize_into(&mut out)?;
        Ok(Digest::new(out))
    }

    /// Return to the freshly constructed state.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Bytes accepted so far.
    pub fn bytes_consumed(&self) -> u128 {
        self.engine.bytes_consumed()
    }

    /// One-shot hash function.
    pub fn calculate(data: impl AsRef<[u8]>) -> Sha256Digest {
        let mut engine = Engine::<Sha256Variant>::new();
        engine.absorb(data.as_ref());
        let mut out = [0u8; 32];
        engine.finish(&mut out);
        Digest::new(out)
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hash for Sha256 {
    const OUTPUT_SIZE: usize = 32;
    const BLOCK_SIZE: usize = 64;

    type Output = Sha256Digest;

    fn new() -> Self {
        Sha256::new()
    }

    fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        Sha256::update(self, data)
    }

    fn finalize(&mut self) -> Result<Sha256Digest, HashError> {
        Sha256::finalize(self)
    }

    fn reset(&mut self) {
        Sha256::reset(self)
    }

    fn calculate(data: &[u8]) -> Sha256Digest {
        Sha256::calculate(data)
    }
}
