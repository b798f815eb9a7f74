//! The high-level wrapper.
//!
//! The core modes take a full-block nonce and leave it to the caller to never let two calls share
//! counter values. That is easy to get wrong, so this wrapper takes the choice away: it only runs
//! the 128-bit block variants, and splits the counter block into a 96-bit nonce (chosen by the
//! caller or generated at random) and a 32-bit block counter which always starts at zero.
//!
//! Hence a message can be at most `2^32` blocks (64 GiB), and two messages never overlap as long
//! as their nonces differ. With random nonces, a key should not be used for more than `2^32`
//! messages.

use ring::rand::{SecureRandom, SystemRandom};
use slog::{Discard, Logger};
use speck::{Schedule, Variant};

use crate::aead::{self, Aead, Tag};
use crate::ctr;
use crate::error::Error;
use crate::settings::Settings;

/// The size of the caller-visible nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// The size of the block counter in bytes.
const COUNTER_SIZE: usize = 4;
/// The number of blocks addressable by the block counter.
const COUNTER_BLOCKS: u64 = 1 << (8 * COUNTER_SIZE);
/// The block size of the supported variants.
const BLOCK_SIZE: u64 = 16;

/// A 96-bit nonce.
pub type Nonce = [u8; NONCE_SIZE];

/// A sealed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sealed {
    /// The nonce. It is needed again to open the message.
    pub nonce: Nonce,
    /// The ciphertext.
    pub ciphertext: Vec<u8>,
    /// The authentication tag.
    pub tag: Tag,
}

/// A key bound to the nonce policy.
pub struct Sealer {
    /// The expanded key, used for both CTR and AEAD.
    aead: Aead,
    /// The variant in use.
    variant: Variant,
    /// The source of random nonces.
    rng: SystemRandom,
    /// The logger.
    log: Logger,
}

impl Sealer {
    /// Create a sealer, which logs nothing.
    pub fn new(key: &[u8], settings: Settings) -> Result<Sealer, Error> {
        Sealer::with_logger(key, settings, Logger::root(Discard, o!()))
    }

    /// Create a sealer with some logger.
    pub fn with_logger(key: &[u8], settings: Settings, log: Logger) -> Result<Sealer, Error> {
        settings.validate()?;

        let variant = settings.variant;
        let aead = Aead::from_schedule(Schedule::new(key, variant)?)?;

        Ok(Sealer {
            aead,
            variant,
            rng: SystemRandom::new(),
            log: log.new(o!("variant" => variant.name())),
        })
    }

    /// The variant in use.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Encrypt and authenticate a message under a fresh random nonce.
    pub fn seal(&self, plaintext: &[u8], aad: &[u8]) -> Result<Sealed, Error> {
        let nonce = self.generate_nonce()?;
        self.seal_with_nonce(&nonce, plaintext, aad)
    }

    /// Encrypt and authenticate a message under a caller-chosen nonce.
    ///
    /// The nonce must never be used twice with the same key.
    pub fn seal_with_nonce(&self, nonce: &Nonce, plaintext: &[u8], aad: &[u8])
        -> Result<Sealed, Error> {
        trace!(self.log, "sealing message"; "len" => plaintext.len(), "aad_len" => aad.len());

        // Part of the counter space goes to the MAC key.
        check_length(plaintext.len(),
                     COUNTER_BLOCKS - aead::subkey_blocks(self.variant))?;

        let (ciphertext, tag) = self.aead.encrypt(&counter_block(nonce), plaintext, aad)?;

        Ok(Sealed {
            nonce: *nonce,
            ciphertext,
            tag,
        })
    }

    /// Verify and decrypt a message.
    pub fn open(&self, nonce: &[u8], ciphertext: &[u8], tag: &[u8], aad: &[u8])
        -> Result<Vec<u8>, Error> {
        trace!(self.log, "opening message"; "len" => ciphertext.len(), "aad_len" => aad.len());

        let nonce = self.parse_nonce(nonce)?;

        self.aead.decrypt(&counter_block(&nonce), ciphertext, tag, aad).map_err(|err| {
            if err == Error::AuthenticationFailed {
                debug!(self.log, "rejected message with invalid tag");
            }

            err
        })
    }

    /// Open a sealed message.
    pub fn open_sealed(&self, sealed: &Sealed, aad: &[u8]) -> Result<Vec<u8>, Error> {
        self.open(&sealed.nonce, &sealed.ciphertext, &sealed.tag, aad)
    }

    /// Encrypt data in counter mode (unauthenticated) under a fresh random nonce.
    ///
    /// This returns the nonce and the ciphertext.
    pub fn encrypt(&self, data: &[u8]) -> Result<(Nonce, Vec<u8>), Error> {
        let nonce = self.generate_nonce()?;
        let ciphertext = self.encrypt_with_nonce(&nonce, data)?;

        Ok((nonce, ciphertext))
    }

    /// Encrypt data in counter mode under a caller-chosen nonce.
    pub fn encrypt_with_nonce(&self, nonce: &Nonce, data: &[u8]) -> Result<Vec<u8>, Error> {
        trace!(self.log, "applying keystream"; "len" => data.len());

        check_length(data.len(), COUNTER_BLOCKS)?;

        let mut ret = data.to_vec();
        ctr::apply_keystream(self.aead.schedule(), &counter_block(nonce), &mut ret)?;

        Ok(ret)
    }

    /// Decrypt data encrypted by `encrypt`.
    pub fn decrypt(&self, nonce: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
        let nonce = self.parse_nonce(nonce)?;
        self.encrypt_with_nonce(&nonce, data)
    }

    /// Draw a nonce from the system random number generator.
    fn generate_nonce(&self) -> Result<Nonce, Error> {
        let mut nonce = [0; NONCE_SIZE];
        self.rng.fill(&mut nonce).map_err(|_| Error::Rng)?;

        debug!(self.log, "generated random nonce");

        Ok(nonce)
    }

    /// Read a caller-supplied nonce.
    fn parse_nonce(&self, nonce: &[u8]) -> Result<Nonce, Error> {
        if nonce.len() != NONCE_SIZE {
            return Err(Error::InvalidNonceSize {
                variant: self.variant,
                expected: NONCE_SIZE,
                found: nonce.len(),
            });
        }

        let mut ret = [0; NONCE_SIZE];
        ret.copy_from_slice(nonce);

        Ok(ret)
    }
}

/// Append the zeroed 32-bit block counter to the nonce.
fn counter_block(nonce: &Nonce) -> [u8; NONCE_SIZE + COUNTER_SIZE] {
    let mut ret = [0; NONCE_SIZE + COUNTER_SIZE];
    ret[..NONCE_SIZE].copy_from_slice(nonce);

    ret
}

/// Check that a message fits into some number of blocks.
fn check_length(len: usize, blocks: u64) -> Result<(), Error> {
    let max = blocks * BLOCK_SIZE;

    if len as u64 > max {
        Err(Error::MessageTooLong { len: len as u64, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sealer() -> Sealer {
        Sealer::new(&[0x33; 32], Settings::default()).unwrap()
    }

    #[test]
    fn seal_open() {
        let sealer = sealer();
        let sealed = sealer.seal(b"attack at dawn", b"from: hq").unwrap();

        assert_eq!(sealed.ciphertext.len(), 14);
        assert_eq!(sealer.open_sealed(&sealed, b"from: hq").unwrap(), b"attack at dawn");
        assert_eq!(sealer.open_sealed(&sealed, b"from: me").unwrap_err(),
                   Error::AuthenticationFailed);
    }

    #[test]
    fn random_nonces_differ() {
        let sealer = sealer();

        let a = sealer.seal(b"same", b"").unwrap();
        let b = sealer.seal(b"same", b"").unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn matches_core_with_zero_counter() {
        let key = [0x44; 16];
        let sealer = Sealer::new(&key, Variant::Speck128_128.into()).unwrap();
        let nonce = [0xA0; NONCE_SIZE];

        let mut block = [0; 16];
        block[..NONCE_SIZE].copy_from_slice(&nonce);

        let sealed = sealer.seal_with_nonce(&nonce, b"payload", b"aad").unwrap();
        let (ciphertext, tag) = aead::aead_encrypt(&key, &block, b"payload", b"aad",
                                                   Variant::Speck128_128).unwrap();
        assert_eq!(sealed.ciphertext, ciphertext);
        assert_eq!(sealed.tag, tag);

        assert_eq!(sealer.encrypt_with_nonce(&nonce, b"payload").unwrap(),
                   ctr::ctr_crypt(&key, &block, b"payload", Variant::Speck128_128).unwrap());
    }

    #[test]
    fn ctr_round_trip() {
        let sealer = sealer();
        let (nonce, ciphertext) = sealer.encrypt(b"unauthenticated data").unwrap();

        assert_eq!(sealer.decrypt(&nonce, &ciphertext).unwrap(), b"unauthenticated data");
    }

    #[test]
    fn only_128_bit_blocks() {
        for &variant in Variant::ALL.iter() {
            let key = vec![0; variant.params().key_size()];
            let res = Sealer::new(&key, variant.into());

            if variant.params().block_bits() == 128 {
                assert_eq!(res.unwrap().variant(), variant);
            } else {
                assert_eq!(res.err(), Some(Error::UnsupportedVariant { variant }));
            }
        }
    }

    #[test]
    fn bad_nonce_length() {
        let sealer = sealer();

        assert_eq!(sealer.open(&[0; 16], b"", &[0; 16], b"").unwrap_err(),
                   Error::InvalidNonceSize {
                       variant: Variant::Speck128_256,
                       expected: NONCE_SIZE,
                       found: 16,
                   });
        assert!(sealer.decrypt(&[0; 11], b"").is_err());
    }

    #[test]
    fn length_limits() {
        assert!(check_length(0, COUNTER_BLOCKS).is_ok());
        assert!(check_length(1 << 20, COUNTER_BLOCKS - 2).is_ok());
        assert_eq!(check_length(33, 2), Err(Error::MessageTooLong { len: 33, max: 32 }));
        assert_eq!(COUNTER_BLOCKS * BLOCK_SIZE, 64 << 30);
    }
}
