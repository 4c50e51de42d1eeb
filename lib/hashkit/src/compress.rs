//! The SHA-2 compression function.
//!
//! One round function serves both variants; the word type decides the
//! sigma rotations and the caller supplies the round-constant table.

use crate::engine::Variant;
use crate::schedule;
use crate::word::{big_sigma0, big_sigma1, ch, maj, Word};

/// Working registers `a..h` of one compression pass.
#[derive(Clone, Copy)]
struct Registers<W>([W; 8]);

impl<W: Word> Registers<W> {
    /// Apply one round with round constant `k` and schedule word `w`.
    #[inline(always)]
    fn round(&mut self, k: W, w: W) {
        let [a, b, c, d, e, f, g, h] = self.0;

        let temp1 = h
            .add_mod(big_sigma1(e))
            .add_mod(ch(e, f, g))
            .add_mod(k)
            .add_mod(w);
        let temp2 = big_sigma0(a).add_mod(maj(a, b, c));

        self.0 = [temp1.add_mod(temp2), a, b, c, d.add_mod(temp1), e, f, g];
    }
}

/// Run every round of `constants` over `schedule` and fold the result
/// back into `state`.
pub(crate) fn compress<W: Word>(state: &mut [W; 8], schedule: &[W], constants: &[W]) {
    debug_assert_eq!(schedule.len(), constants.len());

    let mut registers = Registers(*state);
    for (&k, &w) in constants.iter().zip(schedule) {
        registers.round(k, w);
    }

    for (word, register) in state.iter_mut().zip(registers.0) {
        *word = word.add_mod(register);
    }
}

/// Decode, expand and compress one full block of variant `V`.
pub(crate) fn process_block<V: Variant>(state: &mut [V::Word; 8], block: &[u8]) {
    debug_assert_eq!(block.len(), V::BLOCK_SIZE);

    let words = schedule::load_words::<V::Word>(block);
    let expanded = schedule::expand(&words, V::ROUNDS);
    compress(state, &expanded[..V::ROUNDS], V::K);
}
