//! The variant registry.
//!
//! Speck is a family of ten ciphers, each defined by a word size and a number of key words. The
//! remaining parameters (round count and rotation amounts) follow from those two and are fixed by
//! the Speck paper (table 4.1). This module holds that table.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The parameters of a Speck variant.
#[derive(Debug, PartialEq, Eq)]
pub struct Params {
    /// The word size `w` in bits.
    pub word_bits: u32,
    /// The number of key words `m`.
    pub key_words: usize,
    /// The number of rounds `T`.
    pub rounds: usize,
    /// The right rotation applied to the left word (`α`).
    pub alpha: u32,
    /// The left rotation applied to the right word (`β`).
    pub beta: u32,
}

impl Params {
    /// The block size in bits (`2w`).
    pub fn block_bits(&self) -> u32 {
        2 * self.word_bits
    }

    /// The key size in bits (`m·w`).
    pub fn key_bits(&self) -> u32 {
        self.key_words as u32 * self.word_bits
    }

    /// The word size in bytes.
    pub fn word_size(&self) -> usize {
        self.word_bits as usize / 8
    }

    /// The block size in bytes.
    pub fn block_size(&self) -> usize {
        2 * self.word_size()
    }

    /// The key size in bytes.
    pub fn key_size(&self) -> usize {
        self.key_words * self.word_size()
    }

    /// The mask reducing a `u64` to a single word.
    pub fn mask(&self) -> u64 {
        !0 >> (64 - self.word_bits)
    }

    /// Can the block be treated as a counter in CTR-based modes?
    ///
    /// Only the 32, 64 and 128-bit blocks qualify. The 48 and 96-bit blocks have no standard
    /// counter encoding.
    pub fn supports_ctr(&self) -> bool {
        match self.block_bits() {
            32 | 64 | 128 => true,
            _ => false,
        }
    }
}

/// Build the parameters of a variant.
///
/// The rotation amounts are `(7, 2)` for 16-bit words and `(8, 3)` for everything else.
const fn params(word_bits: u32, key_words: usize, rounds: usize) -> Params {
    Params {
        word_bits,
        key_words,
        rounds,
        alpha: if word_bits == 16 { 7 } else { 8 },
        beta: if word_bits == 16 { 2 } else { 3 },
    }
}

/// The registry, indexed by `Variant as usize`.
static REGISTRY: [Params; 10] = [
    params(16, 4, 22),
    params(24, 3, 22),
    params(24, 4, 23),
    params(32, 3, 26),
    params(32, 4, 27),
    params(48, 2, 28),
    params(48, 3, 29),
    params(64, 2, 32),
    params(64, 3, 33),
    params(64, 4, 34),
];

/// A Speck variant, named by its block and key size in bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 32-bit block, 64-bit key.
    Speck32_64 = 0,
    /// 48-bit block, 72-bit key.
    Speck48_72 = 1,
    /// 48-bit block, 96-bit key.
    Speck48_96 = 2,
    /// 64-bit block, 96-bit key.
    Speck64_96 = 3,
    /// 64-bit block, 128-bit key.
    Speck64_128 = 4,
    /// 96-bit block, 96-bit key.
    Speck96_96 = 5,
    /// 96-bit block, 144-bit key.
    Speck96_144 = 6,
    /// 128-bit block, 128-bit key.
    Speck128_128 = 7,
    /// 128-bit block, 192-bit key.
    Speck128_192 = 8,
    /// 128-bit block, 256-bit key.
    Speck128_256 = 9,
}

impl Variant {
    /// Every variant, in registry order.
    pub const ALL: [Variant; 10] = [
        Variant::Speck32_64,
        Variant::Speck48_72,
        Variant::Speck48_96,
        Variant::Speck64_96,
        Variant::Speck64_128,
        Variant::Speck96_96,
        Variant::Speck96_144,
        Variant::Speck128_128,
        Variant::Speck128_192,
        Variant::Speck128_256,
    ];

    /// Get the parameters of this variant.
    pub fn params(self) -> &'static Params {
        &REGISTRY[self as usize]
    }

    /// The canonical name, e.g. `speck64_128`.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Speck32_64 => "speck32_64",
            Variant::Speck48_72 => "speck48_72",
            Variant::Speck48_96 => "speck48_96",
            Variant::Speck64_96 => "speck64_96",
            Variant::Speck64_128 => "speck64_128",
            Variant::Speck96_96 => "speck96_96",
            Variant::Speck96_144 => "speck96_144",
            Variant::Speck128_128 => "speck128_128",
            Variant::Speck128_192 => "speck128_192",
            Variant::Speck128_256 => "speck128_256",
        }
    }

    /// Look up a variant by name.
    ///
    /// Matching is case-insensitive, and `/` may be used in place of `_` (as in the paper's
    /// "Speck64/128"). Anything else results in `Error::UnknownVariant`.
    pub fn from_name(name: &str) -> Result<Variant, Error> {
        let normalized = name.trim().to_ascii_lowercase().replace('/', "_");

        Variant::ALL
            .iter()
            .cloned()
            .find(|variant| variant.name() == normalized)
            .ok_or_else(|| Error::UnknownVariant { name: name.to_owned() })
    }

    /// Look up a variant by its block and key size in bits.
    pub fn from_sizes(block_bits: u32, key_bits: u32) -> Result<Variant, Error> {
        Variant::ALL
            .iter()
            .cloned()
            .find(|variant| {
                let params = variant.params();
                params.block_bits() == block_bits && params.key_bits() == key_bits
            })
            .ok_or_else(|| Error::UnknownVariant {
                name: format!("speck{}_{}", block_bits, key_bits),
            })
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Variant, Error> {
        Variant::from_name(s)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
