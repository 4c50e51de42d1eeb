//! Fixed-size digest values.
//!
//! A [`Digest`] owns its bytes and exposes them through explicit accessors.
//! Hex parsing accepts exactly `2 * N` hexadecimal characters in either
//! case and rejects anything else.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

#[cfg(feature = "alloc")]
use alloc::string::String;

use crate::error::HashError;

/// Output of a hash computation: `N` bytes, immutable once produced.
#[derive(Clone, Copy)]
pub struct Digest<const N: usize>([u8; N]);

impl<const N: usize> Digest<N> {
    /// Digest length in bytes.
    pub const LEN: usize = N;

    /// Wrap raw digest bytes.
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub const fn to_bytes(&self) -> [u8; N] {
        self.0
    }

    pub const fn into_bytes(self) -> [u8; N] {
        self.0
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Iterate over the digest bytes in order.
    pub fn iter(&self) -> core::slice::Iter<'_, u8> {
        self.0.iter()
    }

    /// Parse a digest from its hexadecimal form.
    ///
    /// The input must be exactly `2 * N` bytes; upper and lower case are
    /// both accepted. A non-hex character yields
    /// [`HashError::InvalidEncoding`] with the byte offset where it starts.
    /// For UTF-8 input the whole character is reported, otherwise the
    /// offending byte.
    pub fn from_hex(hex: impl AsRef<[u8]>) -> Result<Self, HashError> {
        let hex = hex.as_ref();
        if hex.len() != 2 * N {
            return Err(HashError::InvalidLength {
                expected: 2 * N,
                actual: hex.len(),
            });
        }

        let mut bytes = [0u8; N];
        hex::decode_to_slice(hex, &mut bytes).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => invalid_character(hex, index, c),
            _ => HashError::InvalidLength {
                expected: 2 * N,
                actual: hex.len(),
            },
        })?;
        Ok(Self(bytes))
    }

    /// Lowercase hexadecimal form.
    #[cfg(feature = "alloc")]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// `hex` reports the offending byte; widen it to the UTF-8 character that
/// contains it when the input is text.
fn invalid_character(input: &[u8], index: usize, byte: char) -> HashError {
    let decoded = core::str::from_utf8(input).ok().and_then(|text| {
        text.char_indices().find(|(start, c)| index < start + c.len_utf8())
    });
    match decoded {
        Some((position, character)) => HashError::InvalidEncoding {
            position,
            character,
        },
        None => HashError::InvalidEncoding {
            position: index,
            character: byte,
        },
    }
}

impl<const N: usize> PartialEq for Digest<N> {
    /// Byte-for-byte comparison without an early exit.
    fn eq(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl<const N: usize> Eq for Digest<N> {}

impl<const N: usize> PartialEq<[u8; N]> for Digest<N> {
    fn eq(&self, other: &[u8; N]) -> bool {
        *self == Self(*other)
    }
}

impl<const N: usize> Hash for Digest<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<const N: usize> AsRef<[u8]> for Digest<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for Digest<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> From<Digest<N>> for [u8; N] {
    fn from(digest: Digest<N>) -> Self {
        digest.0
    }
}

impl<const N: usize> TryFrom<&[u8]> for Digest<N> {
    type Error = HashError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; N]>::try_from(bytes)
            .map(Self)
            .map_err(|_| HashError::InvalidLength {
                expected: N,
                actual: bytes.len(),
            })
    }
}

impl<const N: usize> FromStr for Digest<N> {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl<'a, const N: usize> IntoIterator for &'a Digest<N> {
    type Item = &'a u8;
    type IntoIter = core::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<const N: usize> IntoIterator for Digest<N> {
    type Item = u8;
    type IntoIter = core::array::IntoIter<u8, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<const N: usize> fmt::LowerHex for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::UpperHex for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Display for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl<const N: usize> fmt::Debug for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({:x})", self)
    }
}
