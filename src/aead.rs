//! Authenticated encryption.
//!
//! This is Speck in counter mode combined with Poly1305, laid out like the usual stream cipher +
//! polynomial MAC constructions:
//!
//! 1. The first 32 bytes of the keystream at counter `nonce` are the one-time Poly1305 key.
//! 2. The plaintext is encrypted with the keystream which follows, so the ciphertext starts at
//!    counter `nonce + subkey_blocks(variant)`.
//! 3. The tag is Poly1305 over `pad16(aad) || pad16(ciphertext) || le64(len(aad)) ||
//!    le64(len(ciphertext))`, lengths in bytes.
//!
//! The tag is always 128 bits, whatever the block size.

use byteorder::{ByteOrder, LittleEndian};
use poly1305::universal_hash::{KeyInit, UniversalHash};
use poly1305::Poly1305;
use speck::{Schedule, Variant};
use subtle::ConstantTimeEq;

use crate::ctr::{self, Ctr};
use crate::error::Error;

/// The size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;
/// The size of the one-time MAC key in bytes.
pub const SUBKEY_SIZE: usize = 32;

/// An authentication tag.
pub type Tag = [u8; TAG_SIZE];

/// The number of counter values used by the MAC key derivation.
///
/// The ciphertext keystream starts this many blocks after the nonce.
pub fn subkey_blocks(variant: Variant) -> u64 {
    (SUBKEY_SIZE / variant.params().block_size()) as u64
}

/// An AEAD instance.
///
/// This owns an expanded key, so many messages can be processed without running the key schedule
/// again. Every message must have its own nonce.
#[derive(Clone, Debug)]
pub struct Aead {
    /// The expanded key.
    schedule: Schedule,
}

impl Aead {
    /// Expand a key for AEAD use.
    pub fn new(key: &[u8], variant: Variant) -> Result<Aead, Error> {
        ctr::check_variant(variant)?;

        Aead::from_schedule(Schedule::new(key, variant)?)
    }

    /// Use an existing schedule.
    pub fn from_schedule(schedule: Schedule) -> Result<Aead, Error> {
        ctr::check_variant(schedule.variant())?;

        Ok(Aead { schedule })
    }

    /// The variant in use.
    pub fn variant(&self) -> Variant {
        self.schedule.variant()
    }

    /// The expanded key.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Encrypt and authenticate a message.
    ///
    /// This returns the ciphertext (of the same length as the plaintext) and the tag.
    pub fn encrypt(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8])
        -> Result<(Vec<u8>, Tag), Error> {
        let (mut ctr, subkey) = self.start(nonce)?;

        let mut ciphertext = plaintext.to_vec();
        ctr.apply_keystream(&mut ciphertext);

        let tag = authenticate(&subkey, aad, &ciphertext);

        Ok((ciphertext, tag))
    }

    /// Verify and decrypt a message.
    ///
    /// A tag of the wrong length is rejected before touching the cipher. Any failure to verify
    /// results in `Error::AuthenticationFailed`, and nothing is decrypted in that case.
    pub fn decrypt(&self, nonce: &[u8], ciphertext: &[u8], tag: &[u8], aad: &[u8])
        -> Result<Vec<u8>, Error> {
        if tag.len() != TAG_SIZE {
            return Err(Error::AuthenticationFailed);
        }

        let (mut ctr, subkey) = self.start(nonce)?;

        let expected = authenticate(&subkey, aad, ciphertext);
        if !bool::from(expected.ct_eq(tag)) {
            return Err(Error::AuthenticationFailed);
        }

        let mut plaintext = ciphertext.to_vec();
        ctr.apply_keystream(&mut plaintext);

        Ok(plaintext)
    }

    /// Start the keystream and derive the MAC key from its head.
    ///
    /// The returned stream is positioned at the first ciphertext block.
    fn start(&self, nonce: &[u8]) -> Result<(Ctr, [u8; SUBKEY_SIZE]), Error> {
        let mut ctr = Ctr::new(&self.schedule, nonce)?;

        let mut subkey = [0; SUBKEY_SIZE];
        ctr.apply_keystream(&mut subkey);

        Ok((ctr, subkey))
    }
}

/// Compute the Poly1305 tag over the associated data and ciphertext.
fn authenticate(subkey: &[u8; SUBKEY_SIZE], aad: &[u8], ciphertext: &[u8]) -> Tag {
    let mut mac = Poly1305::new(poly1305::Key::from_slice(subkey));

    mac.update_padded(aad);
    mac.update_padded(ciphertext);

    // The length block.
    let mut lengths = [0; 16];
    LittleEndian::write_u64(&mut lengths[..8], aad.len() as u64);
    LittleEndian::write_u64(&mut lengths[8..], ciphertext.len() as u64);
    mac.update_padded(&lengths);

    mac.finalize().into()
}

/// Encrypt and authenticate a message under some key.
pub fn aead_encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8], aad: &[u8], variant: Variant)
    -> Result<(Vec<u8>, Tag), Error> {
    Aead::new(key, variant)?.encrypt(nonce, plaintext, aad)
}

/// Verify and decrypt a message under some key.
pub fn aead_decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8], tag: &[u8], aad: &[u8],
                    variant: Variant) -> Result<Vec<u8>, Error> {
    // Checked here too, so that the key is not even expanded.
    if tag.len() != TAG_SIZE {
        return Err(Error::AuthenticationFailed);
    }

    Aead::new(key, variant)?.decrypt(nonce, ciphertext, tag, aad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn known_answer() {
        let key: Vec<u8> = (0..32).collect();
        let nonce: Vec<u8> = (0x10..0x20).collect();

        let (ciphertext, tag) = aead_encrypt(&key, &nonce,
                                             b"The quick brown fox jumps over the lazy dog",
                                             b"header v1", Variant::Speck128_256).unwrap();

        assert_eq!(ciphertext, hex("4891684bfa29e709e7a089decfa8c5a2d581ca6b4f96087b33b4cd2689e7\
                                    1fd9eff70d7c282daa02c35006"));
        assert_eq!(tag.to_vec(), hex("2e46b870c07d5efeb13adcc2965d45de"));

        let (ciphertext, tag) = aead_encrypt(&key, &nonce, b"", b"", Variant::Speck128_256)
            .unwrap();
        assert!(ciphertext.is_empty());
        assert_eq!(tag.to_vec(), hex("67ea2d24cefa6c7fc2d79eeaedc68983"));
    }

    #[test]
    fn subkey_offset() {
        assert_eq!(subkey_blocks(Variant::Speck32_64), 8);
        assert_eq!(subkey_blocks(Variant::Speck64_96), 4);
        assert_eq!(subkey_blocks(Variant::Speck64_128), 4);
        assert_eq!(subkey_blocks(Variant::Speck128_128), 2);
        assert_eq!(subkey_blocks(Variant::Speck128_256), 2);
    }

    #[test]
    fn round_trip() {
        let aead = Aead::new(&[9; 12], Variant::Speck64_96).unwrap();
        let nonce = [1; 8];

        let cases: [(&[u8], &[u8]); 4] = [
            (b"", b""),
            (b"x", b""),
            (b"", b"only aad"),
            (b"both plaintext and associated data", b"aad"),
        ];

        for &(plaintext, aad) in cases.iter() {
            let (ciphertext, tag) = aead.encrypt(&nonce, plaintext, aad).unwrap();
            assert_eq!(ciphertext.len(), plaintext.len());
            assert_eq!(aead.decrypt(&nonce, &ciphertext, &tag, aad).unwrap(), plaintext);
        }
    }

    #[test]
    fn short_tag_checked_first() {
        // Even with a key of the wrong length, a bad tag length is an authentication failure.
        for &len in [0, 1, 15, 17, 32].iter() {
            assert_eq!(aead_decrypt(&[0; 3], &[0; 16], b"", &vec![0; len], b"",
                                    Variant::Speck128_128).unwrap_err(),
                       Error::AuthenticationFailed);
        }
    }

    #[test]
    fn precondition_errors() {
        assert_eq!(aead_encrypt(&[0; 16], &[0; 8], b"", b"", Variant::Speck128_128)
                       .unwrap_err(),
                   Error::InvalidNonceSize {
                       variant: Variant::Speck128_128,
                       expected: 16,
                       found: 8,
                   });
        assert_eq!(aead_encrypt(&[0; 12], &[0; 12], b"", b"", Variant::Speck96_96).unwrap_err(),
                   Error::UnsupportedVariant { variant: Variant::Speck96_96 });
        assert!(Aead::new(&[0; 15], Variant::Speck128_128).is_err());
    }
}
