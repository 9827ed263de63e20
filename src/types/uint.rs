//! Fixed-width identifiers: 20-byte script hashes and 32-byte hashes.

use crate::script::errors::ScriptError;
use std::fmt;
use std::str::FromStr;

/// Length of a [`UInt160`] in bytes.
pub const UINT160_LEN: usize = 20;
/// Length of a [`UInt256`] in bytes.
pub const UINT256_LEN: usize = 32;

macro_rules! define_uint {
    ($(#[$doc:meta])* $name:ident, $len:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Creates an all-zero value.
            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            /// Copies `data` into a new value.
            ///
            /// Returns [`ScriptError::InvalidIdentifierLength`] unless `data`
            /// is exactly the type's width.
            pub fn from_slice(data: &[u8]) -> Result<Self, ScriptError> {
                let bytes: [u8; $len] =
                    data.try_into()
                        .map_err(|_| ScriptError::InvalidIdentifierLength {
                            expected: $len,
                            actual: data.len(),
                        })?;
                Ok(Self(bytes))
            }

            /// Returns the identifier as a byte slice.
            pub fn as_slice(&self) -> &[u8] {
                &self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = ScriptError;

            fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
                Self::from_slice(data)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for byte in &self.0 {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }

        /// Parses hex, with or without a `0x` prefix, in byte order.
        impl FromStr for $name {
            type Err = ParseUIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(digits).map_err(|_| ParseUIntError::InvalidHex)?;
                Self::from_slice(&bytes).map_err(ParseUIntError::Length)
            }
        }
    };
}

define_uint!(
    /// 20-byte script hash identifying a deployed contract.
    UInt160,
    UINT160_LEN
);

define_uint!(
    /// 32-byte hash (transaction ids, block hashes, asset ids).
    UInt256,
    UINT256_LEN
);

/// Failure to parse a [`UInt160`] or [`UInt256`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseUIntError {
    #[error("invalid hex string")]
    InvalidHex,
    #[error(transparent)]
    Length(ScriptError),
}
