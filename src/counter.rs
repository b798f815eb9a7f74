//! Big-endian counter arithmetic.
//!
//! The nonce of the counter-based modes is one block wide and is treated as a single big-endian
//! integer. Adding to it wraps around modulo `2^(8·len)`.

/// Add `n` to the big-endian integer stored in `counter`.
///
/// Overflow wraps around silently.
pub fn add(counter: &mut [u8], mut n: u64) {
    let mut carry = 0;

    for byte in counter.iter_mut().rev() {
        let sum = *byte as u64 + (n & 0xFF) + carry;
        *byte = sum as u8;

        carry = sum >> 8;
        n >>= 8;
    }
}

/// Add one to the counter.
pub fn increment(counter: &mut [u8]) {
    add(counter, 1);
}
