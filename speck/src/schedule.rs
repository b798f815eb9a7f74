//! Key expansion.

use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::error::Error;
use crate::variant::{Params, Variant};

/// An expanded key, which can be used to encrypt and decrypt blocks.
///
/// This holds the variant and its `T` round keys. It is immutable once built, so a single
/// schedule can be shared between threads freely.
#[derive(Clone)]
pub struct Schedule {
    /// The variant this schedule was expanded for.
    variant: Variant,
    /// The round keys `K_0, ..., K_{T-1}`, each masked to the word size.
    keys: Box<[u64]>,
}

impl Schedule {
    /// Expand a master key.
    ///
    /// The key must be exactly `m·w/8` bytes long, otherwise `Error::InvalidKeySize` is returned.
    pub fn new(key: &[u8], variant: Variant) -> Result<Schedule, Error> {
        let params = variant.params();

        if key.len() != params.key_size() {
            return Err(Error::InvalidKeySize {
                variant,
                expected: params.key_size(),
                found: key.len(),
            });
        }

        Ok(Schedule {
            variant,
            keys: expand(key, params).into_boxed_slice(),
        })
    }

    /// The variant of this schedule.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The parameters of this schedule's variant.
    pub fn params(&self) -> &'static Params {
        self.variant.params()
    }

    /// The round keys in order.
    pub(crate) fn round_keys(&self) -> &[u64] {
        &self.keys
    }
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Never print the round keys.
        f.debug_struct("Schedule")
            .field("variant", &self.variant)
            .finish()
    }
}

/// Run the key schedule over some key of the right length.
fn expand(key: &[u8], params: &Params) -> Vec<u64> {
    let word_size = params.word_size();

    // The last word of the key is `k_0`, the ones before it are `l_{m-2}, ..., l_0`.
    let mut words = key.chunks(word_size).rev().map(|word| BigEndian::read_uint(word, word_size));
    // The length check guarantees `m >= 2` words.
    let mut k = words.next().unwrap_or(0);
    // The `l` sequence grows by one word every round.
    let mut l: Vec<u64> = Vec::with_capacity(params.key_words + params.rounds);
    l.extend(words);

    let mut keys = Vec::with_capacity(params.rounds);
    keys.push(k);

    for i in 0..params.rounds - 1 {
        // The beautiful thing about Speck is that it reuses its round function to generate the
        // key schedule, with the round number in place of the round key.
        let mut x = l[i];
        round!(x, k, i as u64, params);

        l.push(x);
        keys.push(k);
    }

    keys
}
