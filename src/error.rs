use speck::Variant;

quick_error! {
    /// An error from the counter mode, AEAD or wrapper layer.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        /// A block cipher precondition failed (unknown variant, bad key or block length).
        Cipher(err: speck::Error) {
            from()
            source(err)
            display("Cipher error: {}", err)
        }
        /// The nonce is not exactly the expected length.
        ///
        /// In the core modes that is one block. In the wrapper it is the 96-bit user nonce.
        InvalidNonceSize {
            variant: Variant,
            expected: usize,
            found: usize,
        } {
            display("Invalid nonce size for {} - expected {} bytes, found {}.", variant, expected,
                    found)
        }
        /// The variant cannot be used here.
        ///
        /// Counter-based modes need a 32, 64 or 128-bit block, and the wrapper needs a 128-bit
        /// block.
        UnsupportedVariant {
            variant: Variant,
        } {
            display("Variant {} is not supported in this mode.", variant)
        }
        /// The authentication tag did not verify.
        ///
        /// Tampered ciphertext, tag or associated data, and a wrong key or nonce, all end up
        /// here without further detail.
        AuthenticationFailed {
            display("Authentication failed.")
        }
        /// The message is too long for the counter space reserved for it.
        MessageTooLong {
            len: u64,
            max: u64,
        } {
            display("Message of {} bytes exceeds the limit of {} bytes.", len, max)
        }
        /// The system random number generator failed.
        Rng {
            display("Unable to generate a random nonce.")
        }
    }
}
