// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fmt;
use std::str::FromStr;

use data_encoding::{HEXUPPER, HEXUPPER_PERMISSIVE};
use thiserror::Error;

use crate::codec::{BinaryParser, BytesSink, CodecError, SerializedType, Type};
use crate::crypto;

pub const ACCOUNT_ID_LEN: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("account id is not valid hex")]
    InvalidHex,
    #[error("account id must be 20 bytes but was {0}")]
    WrongLength(usize),
}

/// A 160-bit account identifier.
/// Its textual form here is hex; checksummed human-readable addresses are produced elsewhere.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountId(pub [u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// Checks if an account id is the zero value.
    pub fn is_zero(&self) -> bool {
        *self == AccountId([0; ACCOUNT_ID_LEN])
    }

    /// The account id as a raw 160-bit value, e.g. for the `TakerPaysIssuer` fields.
    pub fn to_hash160(&self) -> crypto::Hash160 {
        crypto::Hash160(self.0)
    }
}

impl From<crypto::Hash160> for AccountId {
    fn from(h: crypto::Hash160) -> Self {
        AccountId(h.0)
    }
}

impl FromStr for AccountId {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = HEXUPPER_PERMISSIVE
            .decode(s.as_bytes())
            .map_err(|_| AddressError::InvalidHex)?;
        if decoded.len() != ACCOUNT_ID_LEN {
            return Err(AddressError::WrongLength(decoded.len()));
        }
        let mut id = AccountId::default();
        id.0.copy_from_slice(&decoded);
        Ok(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&HEXUPPER.encode(&self.0))
    }
}

impl SerializedType for AccountId {
    const TYPE: Type = Type::AccountId;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        sink.add_bytes(&self.0);
        Ok(())
    }

    /// Inside amounts and paths account ids appear bare; as a field they are length-prefixed.
    fn from_parser(parser: &mut BinaryParser, hint: Option<usize>) -> Result<Self, CodecError> {
        if let Some(len) = hint {
            if len != ACCOUNT_ID_LEN {
                return Err(CodecError::decode(
                    Type::AccountId.name(),
                    parser.pos(),
                    format!("length {} instead of {}", len, ACCOUNT_ID_LEN),
                ));
            }
        }
        Ok(AccountId(parser.read_array()?))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        json.as_str()
            .ok_or_else(|| CodecError::json(Type::AccountId.name(), "expected string"))?
            .parse()
            .map_err(|e: AddressError| CodecError::json(Type::AccountId.name(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let s = "B5F762798A53D543A014CAF8B297CFF8F2F937E8";
        let id: AccountId = s.parse().unwrap();
        assert_eq!(id.to_string(), s);
        assert_eq!(id.0[0], 0xb5);
        let lower: AccountId = s.to_lowercase().parse().unwrap();
        assert_eq!(lower, id);
    }

    #[test]
    fn too_short() {
        assert_eq!("".parse::<AccountId>(), Err(AddressError::WrongLength(0)));
        assert_eq!("ABCD".parse::<AccountId>(), Err(AddressError::WrongLength(2)));
        assert_eq!(
            AddressError::WrongLength(2).to_string(),
            "account id must be 20 bytes but was 2"
        );
    }

    #[test]
    fn invalid_hex() {
        assert_eq!("ZZ".parse::<AccountId>(), Err(AddressError::InvalidHex));
        assert_eq!("ABC".parse::<AccountId>(), Err(AddressError::InvalidHex));
    }

    #[test]
    fn wrong_length_hint() {
        let bytes = [1; 21];
        let mut p = BinaryParser::new(&bytes);
        assert!(matches!(
            AccountId::from_parser(&mut p, Some(21)),
            Err(CodecError::Decode { .. })
        ));
    }

    #[test]
    fn is_zero() {
        assert!(AccountId::default().is_zero());
        assert!(!AccountId([1; 20]).is_zero());
    }
}
