//! Implementation of the Speck family of block ciphers.
//!
//! Speck is a really simple block cipher designed by the NSA. It is famous for its simple
//! structure and code size, which can fit in just a couple of lines, while still preserving
//! security.
//!
//! The family has ten members, differing in word size (16 to 64 bits) and key length. Rather than
//! having a type per member, this crate has a single implementation which is parameterized by the
//! variant's registry entry. The entry is picked once, when the key schedule is expanded, and
//! every later operation on the schedule uses it.
//!
//! # Byte order
//!
//! Blocks and keys are byte strings laid out as in the test vectors of the Speck paper: words
//! are big-endian, the block is the left word `x` followed by the right word `y`, and the key is
//! its words in the order `l_{m-2}, ..., l_0, k_0` (i.e. the first round key is the *last* word of
//! the key).
//!
//! # Example
//!
//! ```rust
//! use speck::{Schedule, Variant};
//!
//! let key = [0x19, 0x18, 0x11, 0x10, 0x09, 0x08, 0x01, 0x00];
//! let schedule = Schedule::new(&key, Variant::Speck32_64).unwrap();
//!
//! let ciphertext = schedule.encrypt_block(b"etiL").unwrap();
//! assert_eq!(ciphertext, [0xa8, 0x68, 0x42, 0xf2]);
//! assert_eq!(schedule.decrypt_block(&ciphertext).unwrap(), b"etiL");
//! ```

#![forbid(unsafe_code)]

#[macro_use]
extern crate quick_error;

/// Rotate a word to the right.
///
/// Both the input and output are words of `$p.word_bits` bits stored in a `u64`.
macro_rules! rotate_right {
    ($x:expr, $n:expr, $p:expr) => {
        (($x >> $n) | ($x << ($p.word_bits - $n))) & $p.mask()
    }
}

/// Rotate a word to the left.
macro_rules! rotate_left {
    ($x:expr, $n:expr, $p:expr) => {
        (($x << $n) | ($x >> ($p.word_bits - $n))) & $p.mask()
    }
}

/// A single round of Speck.
///
/// This is a keyed ARX transformation. It is used for both the message and the key schedule.
macro_rules! round {
    ($x:ident, $y:ident, $k:expr, $p:expr) => {
        $x = rotate_right!($x, $p.alpha, $p);
        $x = $x.wrapping_add($y) & $p.mask();
        $x ^= $k;
        $y = rotate_left!($y, $p.beta, $p);
        $y ^= $x;
    }
}

/// Revert a Speck round given some subkey.
macro_rules! inv_round {
    ($x:ident, $y:ident, $k:expr, $p:expr) => {
        $y ^= $x;
        $y = rotate_right!($y, $p.beta, $p);
        $x ^= $k;
        $x = $x.wrapping_sub($y) & $p.mask();
        $x = rotate_left!($x, $p.alpha, $p);
    }
}

mod block;
mod error;
mod schedule;
mod variant;


pub use crate::error::Error;
pub use crate::schedule::Schedule;
pub use crate::variant::{Params, Variant};

/// Expand a master key into the key schedule of some variant.
pub fn schedule(key: &[u8], variant: Variant) -> Result<Schedule, Error> {
    Schedule::new(key, variant)
}

/// Encrypt a single block.
pub fn encrypt_block(schedule: &Schedule, block: &[u8]) -> Result<Vec<u8>, Error> {
    schedule.encrypt_block(block)
}

/// Decrypt a single block.
pub fn decrypt_block(schedule: &Schedule, block: &[u8]) -> Result<Vec<u8>, Error> {
    schedule.decrypt_block(block)
}
