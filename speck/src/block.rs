//! Block encryption and decryption.
//!
//! All operations are additions, rotations and XORs on words. There are no branches on the data
//! or key, and no table lookups.

use byteorder::{BigEndian, ByteOrder};

use crate::error::Error;
use crate::schedule::Schedule;

impl Schedule {
    /// Encrypt a block given as its two words `(x, y)`.
    ///
    /// The words are reduced to the word size before use.
    pub fn encrypt_words(&self, (x, y): (u64, u64)) -> (u64, u64) {
        let params = self.params();
        let mut x = x & params.mask();
        let mut y = y & params.mask();

        for &k in self.round_keys() {
            round!(x, y, k, params);
        }

        (x, y)
    }

    /// Decrypt a block given as its two words `(x, y)`.
    pub fn decrypt_words(&self, (x, y): (u64, u64)) -> (u64, u64) {
        let params = self.params();
        let mut x = x & params.mask();
        let mut y = y & params.mask();

        // Walk the schedule backwards.
        for &k in self.round_keys().iter().rev() {
            inv_round!(x, y, k, params);
        }

        (x, y)
    }

    /// Encrypt a block in place.
    ///
    /// The buffer must be exactly one block long.
    pub fn encrypt_in_place(&self, block: &mut [u8]) -> Result<(), Error> {
        let words = self.read_block(block)?;
        self.write_block(block, self.encrypt_words(words));

        Ok(())
    }

    /// Decrypt a block in place.
    pub fn decrypt_in_place(&self, block: &mut [u8]) -> Result<(), Error> {
        let words = self.read_block(block)?;
        self.write_block(block, self.decrypt_words(words));

        Ok(())
    }

    /// Encrypt a block into a new buffer.
    pub fn encrypt_block(&self, block: &[u8]) -> Result<Vec<u8>, Error> {
        let mut ret = block.to_vec();
        self.encrypt_in_place(&mut ret)?;

        Ok(ret)
    }

    /// Decrypt a block into a new buffer.
    pub fn decrypt_block(&self, block: &[u8]) -> Result<Vec<u8>, Error> {
        let mut ret = block.to_vec();
        self.decrypt_in_place(&mut ret)?;

        Ok(ret)
    }

    /// Split a block into its words.
    fn read_block(&self, block: &[u8]) -> Result<(u64, u64), Error> {
        let params = self.params();

        if block.len() != params.block_size() {
            return Err(Error::InvalidBlockSize {
                variant: self.variant(),
                expected: params.block_size(),
                found: block.len(),
            });
        }

        let (x, y) = block.split_at(params.word_size());
        Ok((BigEndian::read_uint(x, params.word_size()), BigEndian::read_uint(y, params.word_size())))
    }

    /// Write the words back into a buffer of the right length.
    fn write_block(&self, block: &mut [u8], (x, y): (u64, u64)) {
        let word_size = self.params().word_size();
        let (left, right) = block.split_at_mut(word_size);

        BigEndian::write_uint(left, x, word_size);
        BigEndian::write_uint(right, y, word_size);
    }
}
