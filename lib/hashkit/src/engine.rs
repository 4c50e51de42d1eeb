//! Incremental SHA-2 state machine shared by [`Sha256`](crate::Sha256) and
//! [`Sha512`](crate::Sha512).

use core::fmt;

use crate::compress::process_block;
use crate::error::HashError;
use crate::padding::{self, MAX_BLOCK_SIZE};
use crate::word::Word;

/// Lifecycle of a hash computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Constructed or reset, no input seen yet.
    Fresh,
    /// At least one `update` call has been accepted.
    Accepting,
    /// The digest has been produced; further input is rejected.
    Finalized,
}

/// Parameters that distinguish one SHA-2 variant from another.
pub(crate) trait Variant {
    type Word: Word + 'static;

    /// Name used in log output.
    const NAME: &'static str;

    /// Rounds per block, also the schedule length.
    const ROUNDS: usize;

    /// Block size in bytes.
    const BLOCK_SIZE: usize;

    /// Size of the trailing bit-length field in bytes.
    const LENGTH_FIELD: usize;

    const IV: [Self::Word; 8];

    /// Round constants, `ROUNDS` entries.
    const K: &'static [Self::Word];
}

/// Running state of one computation: accumulator, pending partial block and
/// byte counter.
///
/// `buffer_len < V::BLOCK_SIZE` holds between calls.
pub(crate) struct Engine<V: Variant> {
    state: [V::Word; 8],
    buffer: [u8; MAX_BLOCK_SIZE],
    buffer_len: usize,
    total_len: u128,
    phase: Phase,
}

impl<V: Variant> Engine<V> {
    pub(crate) const fn new() -> Self {
        Self {
            state: V::IV,
            buffer: [0u8; MAX_BLOCK_SIZE],
            buffer_len: 0,
            total_len: 0,
            phase: Phase::Fresh,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Bytes accepted since construction or the last reset.
    pub(crate) fn bytes_consumed(&self) -> u128 {
        self.total_len
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feed more input, rejecting it once finalized.
    pub(crate) fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.ensure_open("update")?;
        self.absorb(data);
        Ok(())
    }

    /// Produce the digest into `out` (`8 * Word::BYTES` bytes), rejecting a
    /// second call.
    pub(crate) fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), HashError> {
        self.ensure_open("finalize")?;
        self.finish(out);
        Ok(())
    }

    /// Consume input one block at a time, keeping any tail shorter than a
    /// block for the next call.
    pub(crate) fn absorb(&mut self, data: &[u8]) {
        let block_size = V::BLOCK_SIZE;
        self.total_len = self.total_len.wrapping_add(data.len() as u128);
        self.phase = Phase::Accepting;

        let mut data = data;

        // Fill buffer first
        if self.buffer_len > 0 {
            let space = block_size - self.buffer_len;
            if data.len() < space {
                self.buffer[self.buffer_len..self.buffer_len + data.len()].copy_from_slice(data);
                self.buffer_len += data.len();
                return;
            }
            self.buffer[self.buffer_len..block_size].copy_from_slice(&data[..space]);
            process_block::<V>(&mut self.state, &self.buffer[..block_size]);
            self.buffer_len = 0;
            data = &data[space..];
        }

        // Process full blocks straight from the input
        let mut blocks = data.chunks_exact(block_size);
        for block in &mut blocks {
            process_block::<V>(&mut self.state, block);
        }

        // Save remainder
        let tail = blocks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
        self.buffer_len = tail.len();
    }

    /// Pad, compress the final block(s) and write the big-endian state.
    pub(crate) fn finish(&mut self, out: &mut [u8]) {
        let width = <V::Word as Word>::BYTES;
        debug_assert_eq!(out.len(), 8 * width);

        let total_bits = self.total_len.wrapping_mul(8);
        let blocks = padding::pad(
            &self.buffer[..self.buffer_len],
            total_bits,
            V::BLOCK_SIZE,
            V::LENGTH_FIELD,
        );
        if blocks.len() > 1 {
            log::trace!(
                "{}: {} pending bytes leave no room for the length field, padding with an extra block",
                V::NAME,
                self.buffer_len
            );
        }
        for block in blocks.iter() {
            process_block::<V>(&mut self.state, block);
        }

        for (chunk, word) in out.chunks_exact_mut(width).zip(self.state) {
            word.write_be(chunk);
        }

        log::debug!("{}: digest computed over {} bytes", V::NAME, self.total_len);

        self.buffer = [0u8; MAX_BLOCK_SIZE];
        self.buffer_len = 0;
        self.phase = Phase::Finalized;
    }

    fn ensure_open(&self, operation: &str) -> Result<(), HashError> {
        if self.phase == Phase::Finalized {
            log::warn!("{}: {} called after finalize", V::NAME, operation);
            return Err(HashError::Finalized);
        }
        Ok(())
    }
}

impl<V: Variant> Clone for Engine<V> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            buffer: self.buffer,
            buffer_len: self.buffer_len,
            total_len: self.total_len,
            phase: self.phase,
        }
    }
}

impl<V: Variant> fmt::Debug for Engine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(V::NAME)
            .field("phase", &self.phase)
            .field("bytes_consumed", &self.total_len)
            .finish_non_exhaustive()
    }
}
