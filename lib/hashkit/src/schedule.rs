//! Message schedule expansion.

use crate::word::{small_sigma0, small_sigma1, Word};

/// Longest schedule of any variant (SHA-512).
pub(crate) const MAX_ROUNDS: usize = 80;

/// Words decoded from one block.
pub(crate) const BLOCK_WORDS: usize = 16;

/// Expanded schedule; only the first `rounds` entries are meaningful.
pub(crate) type Schedule<W> = [W; MAX_ROUNDS];

/// Decode one block into its 16 big-endian words.
pub(crate) fn load_words<W: Word>(block: &[u8]) -> [W; BLOCK_WORDS] {
    debug_assert_eq!(block.len(), BLOCK_WORDS * W::BYTES);

    let mut words = [W::ZERO; BLOCK_WORDS];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(W::BYTES)) {
        *word = W::from_be_slice(chunk);
    }
    words
}

/// Extend 16 block words to `rounds` schedule words:
/// `W[i] = W[i-16] + σ0(W[i-15]) + W[i-7] + σ1(W[i-2])`.
pub(crate) fn expand<W: Word>(words: &[W; BLOCK_WORDS], rounds: usize) -> Schedule<W> {
    debug_assert!((BLOCK_WORDS..=MAX_ROUNDS).contains(&rounds));

    let mut w = [W::ZERO; MAX_ROUNDS];
    w[..BLOCK_WORDS].copy_from_slice(words);
    for i in BLOCK_WORDS..rounds {
        w[i] = w[i - 16]
            .add_mod(small_sigma0(w[i - 15]))
            .add_mod(w[i - 7])
            .add_mod(small_sigma1(w[i - 2]));
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The single-block "abc" message after padding.
    fn abc_block() -> [u8; 64] {
        let mut block = [0u8; 64];
        block[..3].copy_from_slice(b"abc");
        block[3] = 0x80;
        block[63] = 24;
        block
    }

    #[test]
    fn test_load_words_big_endian() {
        let words: [u32; 16] = load_words(&abc_block());
        assert_eq!(words[0], 0x6162_6380);
        assert_eq!(words[1..15], [0u32; 14]);
        assert_eq!(words[15], 0x18);
    }

    #[test]
    fn test_expand_abc_sha256() {
        // Intermediate schedule words of the "abc" example.
        let schedule = expand(&load_words::<u32>(&abc_block()), 64);
        assert_eq!(schedule[16], 0x6162_6380);
        assert_eq!(schedule[17], 0x000f_0000);
        assert_eq!(schedule[18], 0x7da8_6405);
        assert_eq!(schedule[63], 0x12b1_edeb);
    }

    #[test]
    fn test_expand_leaves_tail_zero() {
        let schedule = expand(&load_words::<u32>(&abc_block()), 64);
        assert!(schedule[64..].iter().all(|w| *w == 0));
    }

    #[test]
    fn test_expand_is_deterministic() {
        let words = [0x0123_4567_89ab_cdefu64; 16];
        assert_eq!(expand(&words, 80), expand(&words, 80));
        assert_ne!(expand(&words, 80)[79], 0);
    }
}
