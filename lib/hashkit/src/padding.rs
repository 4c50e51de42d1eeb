//! Merkle–Damgård padding and length encoding.
//!
//! The message is followed by a single `0x80` byte, zeros up to
//! `block_size - length_field`, and the total bit count in big-endian.
//! When the marker lands past that boundary the current block is closed
//! with zeros and a second block carries the length field.

/// Largest block size of any variant (SHA-512).
pub(crate) const MAX_BLOCK_SIZE: usize = 128;

/// Widest length field of any variant (SHA-512, 128 bits).
pub(crate) const MAX_LENGTH_FIELD: usize = 16;

const MARKER: u8 = 0x80;

/// The one or two blocks that finish a message.
pub(crate) struct FinalBlocks {
    blocks: [[u8; MAX_BLOCK_SIZE]; 2],
    count: usize,
    block_size: usize,
}

impl FinalBlocks {
    /// Number of blocks to compress: 1, or 2 when padding overflowed.
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    /// The blocks in compression order, each exactly `block_size` bytes.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.blocks[..self.count]
            .iter()
            .map(move |block| &block[..self.block_size])
    }
}

/// Pad the trailing partial block.
///
/// `pending` holds the bytes not yet compressed (`pending.len() < block_size`)
/// and `total_bits` the bit length of the whole message. Only the low
/// `length_field` bytes of `total_bits` are written.
pub(crate) fn pad(
    pending: &[u8],
    total_bits: u128,
    block_size: usize,
    length_field: usize,
) -> FinalBlocks {
    debug_assert!(block_size <= MAX_BLOCK_SIZE);
    debug_assert!(length_field <= MAX_LENGTH_FIELD && length_field < block_size);
    debug_assert!(pending.len() < block_size);

    let boundary = block_size - length_field;
    let mut out = FinalBlocks {
        blocks: [[0u8; MAX_BLOCK_SIZE]; 2],
        count: 1,
        block_size,
    };

    out.blocks[0][..pending.len()].copy_from_slice(pending);
    out.blocks[0][pending.len()] = MARKER;

    // Marker plus length field do not fit: the remainder of this block stays
    // zero and the length moves to a fresh block.
    if pending.len() + 1 > boundary {
        out.count = 2;
    }

    let length = total_bits.to_be_bytes();
    out.blocks[out.count - 1][boundary..block_size]
        .copy_from_slice(&length[MAX_LENGTH_FIELD - length_field..]);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn collect(blocks: &FinalBlocks) -> Vec<Vec<u8>> {
        blocks.iter().map(|block| block.to_vec()).collect()
    }

    #[test]
    fn test_empty_message_sha256() {
        let blocks = pad(&[], 0, 64, 8);
        assert_eq!(blocks.len(), 1);

        let mut expected = [0u8; 64];
        expected[0] = 0x80;
        assert_eq!(collect(&blocks), [expected.to_vec()]);
    }

    #[test]
    fn test_length_field_big_endian() {
        let blocks = pad(b"abc", 24, 64, 8);
        let block = blocks.iter().next().unwrap();
        assert_eq!(&block[..4], b"abc\x80");
        assert!(block[4..56].iter().all(|b| *b == 0));
        assert_eq!(&block[56..], &[0, 0, 0, 0, 0, 0, 0, 24]);
    }

    #[test]
    fn test_last_length_that_fits() {
        // 55 bytes: marker at 55, length at 56..64.
        let pending = [0x61u8; 55];
        let blocks = pad(&pending, 55 * 8, 64, 8);
        assert_eq!(blocks.len(), 1);
        let block = blocks.iter().next().unwrap();
        assert_eq!(block[55], 0x80);
        assert_eq!(&block[56..], &(55u64 * 8).to_be_bytes());

        let blocks = pad(&[0x61u8; 111], 111 * 8, 128, 16);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_overflow_into_extra_block() {
        for len in 56..64 {
            let pending = [0x61u8; 64];
            let blocks = pad(&pending[..len], len as u128 * 8, 64, 8);
            assert_eq!(blocks.len(), 2, "length {}", len);

            let all = collect(&blocks);
            assert_eq!(all[0][len], 0x80);
            assert!(all[0][len + 1..].iter().all(|b| *b == 0));
            assert!(all[1][..56].iter().all(|b| *b == 0));
            assert_eq!(&all[1][56..], &(len as u64 * 8).to_be_bytes());
        }
    }

    #[test]
    fn test_sha512_overflow_and_wide_length() {
        let total_bits = (1u128 << 64) + 8;
        let blocks = pad(&[0u8; 112], total_bits, 128, 16);
        assert_eq!(blocks.len(), 2);

        let all = collect(&blocks);
        assert_eq!(all[0][112], 0x80);
        assert_eq!(&all[1][112..], &total_bits.to_be_bytes());
    }

    #[test]
    fn test_narrow_field_keeps_low_bits() {
        let blocks = pad(&[], (1u128 << 64) | 0x10, 64, 8);
        let block = blocks.iter().next().unwrap();
        assert_eq!(&block[56..], &0x10u64.to_be_bytes());
    }
}
