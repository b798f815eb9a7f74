//! Counter mode.
//!
//! CTR turns the block cipher into a stream cipher: the keystream is `E(nonce), E(nonce + 1), ...`
//! and it is XORed onto the data. Encryption and decryption are the same operation.
//!
//! The nonce is a full block and the *whole* block is the counter, read as one big-endian integer.
//! There is no other counter convention.
//!
//! # Nonce reuse
//!
//! Nothing here can detect a `(key, nonce)` pair being used twice, since no state is kept between
//! calls. Doing so (or letting two calls cover overlapping counter ranges) leaks the XOR of the
//! plaintexts. Avoiding it is the caller's job; see `Sealer` for a wrapper which manages nonces.

use speck::{Schedule, Variant};

use crate::counter;
use crate::error::Error;

/// Check that some variant can be used in counter-based modes.
pub fn check_variant(variant: Variant) -> Result<(), Error> {
    if variant.params().supports_ctr() {
        Ok(())
    } else {
        Err(Error::UnsupportedVariant { variant })
    }
}

/// A keystream.
///
/// This is the stateful form of counter mode: successive calls to `apply_keystream` continue the
/// same stream, even when they stop in the middle of a block.
pub struct Ctr<'a> {
    /// The expanded key.
    schedule: &'a Schedule,
    /// The counter of the next keystream block to generate.
    counter: Vec<u8>,
    /// The current keystream block.
    block: Vec<u8>,
    /// The number of bytes of `block` already used.
    ///
    /// When this equals the block size, a new block is needed.
    used: usize,
    /// The number of keystream blocks generated so far.
    blocks: u64,
}

impl<'a> Ctr<'a> {
    /// Start a keystream at counter `nonce`.
    ///
    /// The nonce must be exactly one block long.
    pub fn new(schedule: &'a Schedule, nonce: &[u8]) -> Result<Ctr<'a>, Error> {
        let variant = schedule.variant();
        check_variant(variant)?;

        let block_size = variant.params().block_size();
        if nonce.len() != block_size {
            return Err(Error::InvalidNonceSize {
                variant,
                expected: block_size,
                found: nonce.len(),
            });
        }

        Ok(Ctr {
            schedule,
            counter: nonce.to_vec(),
            block: vec![0; block_size],
            used: block_size,
            blocks: 0,
        })
    }

    /// XOR the next `data.len()` bytes of keystream onto `data`.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data {
            if self.used == self.block.len() {
                self.refill();
            }

            *byte ^= self.block[self.used];
            self.used += 1;
        }
    }

    /// The number of counter values consumed so far.
    ///
    /// A partially used block counts as consumed.
    pub fn position(&self) -> u64 {
        self.blocks
    }

    /// Generate the keystream block for the current counter and advance it.
    fn refill(&mut self) {
        self.block.copy_from_slice(&self.counter);
        let res = self.schedule.encrypt_in_place(&mut self.block);
        // The buffer is one block by construction.
        debug_assert!(res.is_ok(), "Keystream buffer is not a single block.");

        counter::increment(&mut self.counter);
        self.used = 0;
        self.blocks += 1;
    }
}

/// Apply counter mode with a schedule which has already been expanded.
///
/// This transforms `data` in place.
pub fn apply_keystream(schedule: &Schedule, nonce: &[u8], data: &mut [u8]) -> Result<(), Error> {
    Ctr::new(schedule, nonce)?.apply_keystream(data);

    Ok(())
}

/// Encrypt or decrypt some data in counter mode.
///
/// The output has the same length as `data`. The nonce is the initial counter value and must be
/// one block long.
pub fn ctr_crypt(key: &[u8], nonce: &[u8], data: &[u8], variant: Variant)
    -> Result<Vec<u8>, Error> {
    check_variant(variant)?;
    let schedule = Schedule::new(key, variant)?;

    let mut ret = data.to_vec();
    apply_keystream(&schedule, nonce, &mut ret)?;

    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(variant: Variant) -> Vec<u8> {
        (0..variant.params().key_size() as u8).collect()
    }

    #[test]
    fn keystream_is_encrypted_counter() {
        for &variant in Variant::ALL.iter().filter(|v| v.params().supports_ctr()) {
            let schedule = Schedule::new(&key(variant), variant).unwrap();
            let block_size = variant.params().block_size();
            let nonce = vec![0x42; block_size];

            let mut stream = vec![0; 3 * block_size];
            apply_keystream(&schedule, &nonce, &mut stream).unwrap();

            let mut counter = nonce.clone();
            for chunk in stream.chunks(block_size) {
                assert_eq!(chunk, &schedule.encrypt_block(&counter).unwrap()[..]);
                counter::increment(&mut counter);
            }
        }
    }

    #[test]
    fn counter_wraps() {
        let schedule = Schedule::new(&key(Variant::Speck32_64), Variant::Speck32_64).unwrap();

        let mut stream = [0; 8];
        apply_keystream(&schedule, &[0xFF; 4], &mut stream).unwrap();

        assert_eq!(&stream[..4], &schedule.encrypt_block(&[0xFF; 4]).unwrap()[..]);
        assert_eq!(&stream[4..], &schedule.encrypt_block(&[0; 4]).unwrap()[..]);
    }

    #[test]
    fn split_calls_continue_stream() {
        let variant = Variant::Speck64_128;
        let schedule = Schedule::new(&key(variant), variant).unwrap();
        let nonce = [7; 8];

        let mut whole = [0x5A; 29];
        apply_keystream(&schedule, &nonce, &mut whole).unwrap();

        let mut pieces = [0x5A; 29];
        let mut ctr = Ctr::new(&schedule, &nonce).unwrap();
        let (a, rest) = pieces.split_at_mut(3);
        let (b, c) = rest.split_at_mut(13);
        ctr.apply_keystream(a);
        ctr.apply_keystream(b);
        ctr.apply_keystream(&mut [0u8; 0]);
        ctr.apply_keystream(c);

        assert_eq!(&whole[..], &pieces[..]);
        // 29 bytes is three full blocks and a partial one.
        assert_eq!(ctr.position(), 4);
    }

    #[test]
    fn position() {
        let schedule = Schedule::new(&[0; 16], Variant::Speck128_128).unwrap();
        let mut ctr = Ctr::new(&schedule, &[0; 16]).unwrap();

        assert_eq!(ctr.position(), 0);
        ctr.apply_keystream(&mut [0; 32]);
        assert_eq!(ctr.position(), 2);
        ctr.apply_keystream(&mut [0; 1]);
        assert_eq!(ctr.position(), 3);
    }

    #[test]
    fn rejects_unaligned_blocks() {
        for &variant in [Variant::Speck48_72, Variant::Speck48_96, Variant::Speck96_96,
                         Variant::Speck96_144].iter() {
            let block_size = variant.params().block_size();

            assert_eq!(ctr_crypt(&key(variant), &vec![0; block_size], b"data", variant)
                           .unwrap_err(),
                       Error::UnsupportedVariant { variant });
        }
    }

    #[test]
    fn rejects_bad_sizes() {
        let variant = Variant::Speck128_192;

        assert_eq!(ctr_crypt(&key(variant), &[0; 12], b"data", variant).unwrap_err(),
                   Error::InvalidNonceSize { variant, expected: 16, found: 12 });
        assert_eq!(ctr_crypt(&[0; 16], &[0; 16], b"data", variant).unwrap_err(),
                   Error::Cipher(speck::Error::InvalidKeySize {
                       variant,
                       expected: 24,
                       found: 16,
                   }));
    }
}
