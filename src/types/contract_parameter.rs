//! Typed contract invocation parameters.

use std::fmt;
use std::str::FromStr;

/// Wire tag of a contract parameter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ContractParameterType {
    Signature = 0x00,
    Boolean = 0x01,
    Integer = 0x02,
    Hash160 = 0x03,
    Hash256 = 0x04,
    ByteArray = 0x05,
    PublicKey = 0x06,
    String = 0x07,
    Array = 0x10,
    InteropInterface = 0xF0,
    Void = 0xFF,
}

impl ContractParameterType {
    /// Returns the canonical type name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Signature => "Signature",
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Hash160 => "Hash160",
            Self::Hash256 => "Hash256",
            Self::ByteArray => "ByteArray",
            Self::PublicKey => "PublicKey",
            Self::String => "String",
            Self::Array => "Array",
            Self::InteropInterface => "InteropInterface",
            Self::Void => "Void",
        }
    }
}

impl TryFrom<u8> for ContractParameterType {
    type Error = UnknownParameterType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Signature),
            0x01 => Ok(Self::Boolean),
            0x02 => Ok(Self::Integer),
            0x03 => Ok(Self::Hash160),
            0x04 => Ok(Self::Hash256),
            0x05 => Ok(Self::ByteArray),
            0x06 => Ok(Self::PublicKey),
            0x07 => Ok(Self::String),
            0x10 => Ok(Self::Array),
            0xF0 => Ok(Self::InteropInterface),
            0xFF => Ok(Self::Void),
            _ => Err(UnknownParameterType(format!("0x{value:02x}"))),
        }
    }
}

impl FromStr for ContractParameterType {
    type Err = UnknownParameterType;

    /// Case-insensitive type name lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [ContractParameterType; 11] = [
            ContractParameterType::Signature,
            ContractParameterType::Boolean,
            ContractParameterType::Integer,
            ContractParameterType::Hash160,
            ContractParameterType::Hash256,
            ContractParameterType::ByteArray,
            ContractParameterType::PublicKey,
            ContractParameterType::String,
            ContractParameterType::Array,
            ContractParameterType::InteropInterface,
            ContractParameterType::Void,
        ];
        ALL.into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownParameterType(s.to_string()))
    }
}

impl fmt::Display for ContractParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag that does not name a contract parameter type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contract parameter type: {0}")]
pub struct UnknownParameterType(pub String);

/// A single typed argument to a contract invocation.
///
/// Hash payloads are carried as raw bytes; their width is checked when the
/// parameter is pushed. `Empty` models a declared parameter whose value was
/// never supplied and cannot be encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractParameter {
    Signature(Vec<u8>),
    Boolean(bool),
    Integer(i64),
    Hash160(Vec<u8>),
    Hash256(Vec<u8>),
    ByteArray(Vec<u8>),
    PublicKey(Vec<u8>),
    String(String),
    /// Elements in declaration order.
    Array(Vec<ContractParameter>),
    Empty(ContractParameterType),
}

impl ContractParameter {
    /// Returns the wire tag of this parameter.
    pub fn param_type(&self) -> ContractParameterType {
        match self {
            Self::Signature(_) => ContractParameterType::Signature,
            Self::Boolean(_) => ContractParameterType::Boolean,
            Self::Integer(_) => ContractParameterType::Integer,
            Self::Hash160(_) => ContractParameterType::Hash160,
            Self::Hash256(_) => ContractParameterType::Hash256,
            Self::ByteArray(_) => ContractParameterType::ByteArray,
            Self::PublicKey(_) => ContractParameterType::PublicKey,
            Self::String(_) => ContractParameterType::String,
            Self::Array(_) => ContractParameterType::Array,
            Self::Empty(t) => *t,
        }
    }
}

impl From<bool> for ContractParameter {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for ContractParameter {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for ContractParameter {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ContractParameter {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for ContractParameter {
    fn from(v: Vec<u8>) -> Self {
        Self::ByteArray(v)
    }
}

impl From<Vec<ContractParameter>> for ContractParameter {
    fn from(v: Vec<ContractParameter>) -> Self {
        Self::Array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_bytes_round_trip() {
        for byte in [0x00u8, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x10, 0xF0, 0xFF] {
            let t = ContractParameterType::try_from(byte).unwrap();
            assert_eq!(t as u8, byte);
        }
        assert!(ContractParameterType::try_from(0x08).is_err());
    }

    #[test]
    fn type_from_name_ignores_case() {
        assert_eq!(
            "hash160".parse::<ContractParameterType>(),
            Ok(ContractParameterType::Hash160)
        );
        assert_eq!(
            "BYTEARRAY".parse::<ContractParameterType>(),
            Ok(ContractParameterType::ByteArray)
        );
        assert_eq!(
            "float".parse::<ContractParameterType>(),
            Err(UnknownParameterType("float".to_string()))
        );
    }

    #[test]
    fn param_type_matches_variant() {
        assert_eq!(
            ContractParameter::from(true).param_type(),
            ContractParameterType::Boolean
        );
        assert_eq!(
            ContractParameter::from("a").param_type(),
            ContractParameterType::String
        );
        assert_eq!(
            ContractParameter::from(vec![ContractParameter::Integer(1)]).param_type(),
            ContractParameterType::Array
        );
        assert_eq!(
            ContractParameter::Empty(ContractParameterType::PublicKey).param_type(),
            ContractParameterType::PublicKey
        );
    }
}
