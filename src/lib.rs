//! Counter mode and authenticated encryption over the Speck block cipher family.
//!
//! The layers build strictly on each other:
//!
//! 1. The `speck` crate: variant registry, key schedule and block cipher.
//! 2. `ctr`: counter mode, with the whole block as one big-endian counter.
//! 3. `aead`: counter mode combined with a Poly1305 tag.
//! 4. `Sealer`: a wrapper for the 128-bit block variants which manages nonces.
//!
//! The free functions re-exported here (`schedule`, `encrypt_block`, `ctr_crypt`, `aead_encrypt`
//! and so on) are the stateless entry points. They are deterministic functions of their inputs,
//! so a `(key, nonce)` pair must never be reused: nothing in the core can notice.
//!
//! # Example
//!
//! ```rust
//! use speck_aead::{aead_decrypt, aead_encrypt, Variant};
//!
//! let key = [0x2a; 16];
//! let nonce = [0; 8];
//!
//! let (ciphertext, tag) = aead_encrypt(&key, &nonce, b"hello", b"header", Variant::Speck64_128)
//!     .unwrap();
//! let plaintext = aead_decrypt(&key, &nonce, &ciphertext, &tag, b"header", Variant::Speck64_128)
//!     .unwrap();
//!
//! assert_eq!(plaintext, b"hello");
//! ```

#![forbid(unsafe_code)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate slog;

pub mod aead;
pub mod counter;
pub mod ctr;
mod error;
mod sealer;
mod settings;

pub use speck::{decrypt_block, encrypt_block, schedule, Params, Schedule, Variant};

pub use crate::aead::{aead_decrypt, aead_encrypt, Aead, Tag, TAG_SIZE};
pub use crate::ctr::{ctr_crypt, Ctr};
pub use crate::error::Error;
pub use crate::sealer::{Nonce, Sealed, Sealer, NONCE_SIZE};
pub use crate::settings::Settings;
