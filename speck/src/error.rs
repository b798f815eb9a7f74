use crate::variant::Variant;

quick_error! {
    /// A Speck error.
    ///
    /// These are all precondition violations, detected before any cipher state is touched.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        /// The variant identifier does not name any member of the family.
        UnknownVariant {
            name: String,
        } {
            display("Unknown Speck variant '{}'.", name)
        }
        /// The master key does not have the length required by the variant.
        InvalidKeySize {
            variant: Variant,
            expected: usize,
            found: usize,
        } {
            display("Invalid key size for {} - expected {} bytes, found {}.", variant, expected,
                    found)
        }
        /// The block does not have the variant's block length.
        InvalidBlockSize {
            variant: Variant,
            expected: usize,
            found: usize,
        } {
            display("Invalid block size for {} - expected {} bytes, found {}.", variant, expected,
                    found)
        }
    }
}
