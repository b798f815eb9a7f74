//! Settings and presets.

use speck::Variant;

use crate::error::Error;

/// Settings for a `Sealer`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Settings {
    /// The cipher variant.
    ///
    /// This must be one of the 128-bit block variants, since only those leave room for both a
    /// 96-bit nonce and a 32-bit block counter.
    pub variant: Variant,
}

impl Settings {
    /// Check that the settings can be used by the wrapper.
    pub fn validate(&self) -> Result<(), Error> {
        if self.variant.params().block_bits() == 128 {
            Ok(())
        } else {
            Err(Error::UnsupportedVariant { variant: self.variant })
        }
    }
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            variant: Variant::Speck128_256,
        }
    }
}

impl From<Variant> for Settings {
    fn from(variant: Variant) -> Settings {
        Settings { variant }
    }
}
