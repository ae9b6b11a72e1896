// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use serde_json::json;

use super::basics::{AccountId, Amount, Blob, PathSet, Vector256};
use super::{STArray, STObject};
use crate::codec::{BinaryParser, BytesSink, CodecError, EncodeValue, Field, SerializedType, Type};
use crate::crypto::{Hash128, Hash160, Hash256};
use crate::protocol::{EngineResult, LedgerEntryType, TransactionType};

/// A value held by an STObject field. The variant always matches the field's type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Hash128(Hash128),
    Hash160(Hash160),
    Hash256(Hash256),
    Amount(Amount),
    Blob(Blob),
    AccountId(AccountId),
    PathSet(PathSet),
    Vector256(Vector256),
    Object(STObject),
    Array(STArray),
}

macro_rules! value_from {
    ( $( $t:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    Hash128 => Hash128,
    Hash160 => Hash160,
    Hash256 => Hash256,
    Amount => Amount,
    Blob => Blob,
    AccountId => AccountId,
    PathSet => PathSet,
    Vector256 => Vector256,
    STObject => Object,
    STArray => Array,
}

impl From<TransactionType> for Value {
    fn from(t: TransactionType) -> Self {
        Value::UInt16(t.code())
    }
}

impl From<LedgerEntryType> for Value {
    fn from(t: LedgerEntryType) -> Self {
        Value::UInt16(t.code())
    }
}

impl Value {
    pub fn value_type(&self) -> Type {
        match self {
            Value::UInt8(_) => Type::UInt8,
            Value::UInt16(_) => Type::UInt16,
            Value::UInt32(_) => Type::UInt32,
            Value::UInt64(_) => Type::UInt64,
            Value::Hash128(_) => Type::Hash128,
            Value::Hash160(_) => Type::Hash160,
            Value::Hash256(_) => Type::Hash256,
            Value::Amount(_) => Type::Amount,
            Value::Blob(_) => Type::Blob,
            Value::AccountId(_) => Type::AccountId,
            Value::PathSet(_) => Type::PathSet,
            Value::Vector256(_) => Type::Vector256,
            Value::Object(_) => Type::STObject,
            Value::Array(_) => Type::STArray,
        }
    }

    /// Reads the value of `field`, whose header was just consumed.
    pub fn read(parser: &mut BinaryParser, field: Field) -> Result<Value, CodecError> {
        let hint = if field.is_length_prefixed() {
            Some(parser.read_length_prefix()?)
        } else {
            None
        };
        let start = parser.pos();
        let value = match field.field_type() {
            Type::UInt8 => Value::UInt8(u8::from_parser(parser, hint)?),
            Type::UInt16 => Value::UInt16(u16::from_parser(parser, hint)?),
            Type::UInt32 => Value::UInt32(u32::from_parser(parser, hint)?),
            Type::UInt64 => Value::UInt64(u64::from_parser(parser, hint)?),
            Type::Hash128 => Value::Hash128(Hash128::from_parser(parser, hint)?),
            Type::Hash160 => Value::Hash160(Hash160::from_parser(parser, hint)?),
            Type::Hash256 => Value::Hash256(Hash256::from_parser(parser, hint)?),
            Type::Amount => Value::Amount(Amount::from_parser(parser, hint)?),
            Type::Blob => Value::Blob(Blob::from_parser(parser, hint)?),
            Type::AccountId => Value::AccountId(AccountId::from_parser(parser, hint)?),
            Type::PathSet => Value::PathSet(PathSet::from_parser(parser, hint)?),
            Type::Vector256 => Value::Vector256(Vector256::from_parser(parser, hint)?),
            Type::STObject => Value::Object(STObject::from_parser(parser, None)?),
            Type::STArray => Value::Array(STArray::from_parser(parser, None)?),
            Type::Transaction | Type::LedgerEntry | Type::Validation => {
                return Err(CodecError::NotSerializable(field))
            }
        };
        if let Some(len) = hint {
            if parser.pos() - start != len {
                return Err(CodecError::decode(
                    field.field_type().name(),
                    start,
                    format!("consumed {} bytes of {}", parser.pos() - start, len),
                ));
            }
        }
        Ok(value)
    }

    /// The JSON projection of the value stored under `field`.
    /// Type codes and transaction results project to their names where known.
    pub fn to_json(&self, field: Field) -> serde_json::Value {
        match (field, self) {
            (Field::TransactionType, Value::UInt16(c)) => TransactionType::from_code(*c)
                .map_or_else(|| json!(c), |t| t.to_json()),
            (Field::LedgerEntryType, Value::UInt16(c)) => LedgerEntryType::from_code(*c)
                .map_or_else(|| json!(c), |t| t.to_json()),
            (Field::TransactionResult, Value::UInt8(b)) => EngineResult::from_meta_byte(*b)
                .map_or_else(|| json!(b), |r| r.to_json()),
            (_, v) => v.to_json_plain(),
        }
    }

    fn to_json_plain(&self) -> serde_json::Value {
        match self {
            Value::UInt8(v) => v.to_json(),
            Value::UInt16(v) => v.to_json(),
            Value::UInt32(v) => v.to_json(),
            Value::UInt64(v) => v.to_json(),
            Value::Hash128(v) => v.to_json(),
            Value::Hash160(v) => v.to_json(),
            Value::Hash256(v) => v.to_json(),
            Value::Amount(v) => v.to_json(),
            Value::Blob(v) => v.to_json(),
            Value::AccountId(v) => v.to_json(),
            Value::PathSet(v) => v.to_json(),
            Value::Vector256(v) => v.to_json(),
            Value::Object(v) => v.to_json(),
            Value::Array(v) => v.to_json(),
        }
    }

    /// Builds the value of `field` from its JSON projection.
    pub fn from_json(field: Field, json: &serde_json::Value) -> Result<Value, CodecError> {
        let name = field.field_type().name();
        if let serde_json::Value::String(s) = json {
            match field {
                Field::TransactionType => {
                    return TransactionType::from_name(s)
                        .map(Value::from)
                        .ok_or_else(|| CodecError::json(name, format!("unknown transaction type {}", s)))
                }
                Field::LedgerEntryType => {
                    return LedgerEntryType::from_name(s)
                        .map(Value::from)
                        .ok_or_else(|| CodecError::json(name, format!("unknown ledger entry type {}", s)))
                }
                Field::TransactionResult => {
                    return EngineResult::from_name(s)
                        .and_then(|r| r.to_meta_byte())
                        .map(Value::UInt8)
                        .ok_or_else(|| CodecError::json(name, format!("unknown result {}", s)))
                }
                _ => {}
            }
        }
        Ok(match field.field_type() {
            Type::UInt8 => Value::UInt8(u8::from_json(json)?),
            Type::UInt16 => Value::UInt16(u16::from_json(json)?),
            Type::UInt32 => Value::UInt32(u32::from_json(json)?),
            Type::UInt64 => Value::UInt64(u64::from_json(json)?),
            Type::Hash128 => Value::Hash128(Hash128::from_json(json)?),
            Type::Hash160 => Value::Hash160(Hash160::from_json(json)?),
            Type::Hash256 => Value::Hash256(Hash256::from_json(json)?),
            Type::Amount => Value::Amount(Amount::from_json(json)?),
            Type::Blob => Value::Blob(Blob::from_json(json)?),
            Type::AccountId => Value::AccountId(AccountId::from_json(json)?),
            Type::PathSet => Value::PathSet(PathSet::from_json(json)?),
            Type::Vector256 => Value::Vector256(Vector256::from_json(json)?),
            Type::STObject => Value::Object(STObject::from_json(json)?),
            Type::STArray => Value::Array(STArray::from_json(json)?),
            Type::Transaction | Type::LedgerEntry | Type::Validation => {
                return Err(CodecError::NotSerializable(field))
            }
        })
    }
}

impl EncodeValue for Value {
    fn encode_value(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        match self {
            Value::UInt8(v) => v.to_bytes_sink(sink),
            Value::UInt16(v) => v.to_bytes_sink(sink),
            Value::UInt32(v) => v.to_bytes_sink(sink),
            Value::UInt64(v) => v.to_bytes_sink(sink),
            Value::Hash128(v) => v.to_bytes_sink(sink),
            Value::Hash160(v) => v.to_bytes_sink(sink),
            Value::Hash256(v) => v.to_bytes_sink(sink),
            Value::Amount(v) => v.to_bytes_sink(sink),
            Value::Blob(v) => v.to_bytes_sink(sink),
            Value::AccountId(v) => v.to_bytes_sink(sink),
            Value::PathSet(v) => v.to_bytes_sink(sink),
            Value::Vector256(v) => v.to_bytes_sink(sink),
            Value::Object(v) => v.to_bytes_sink(sink),
            Value::Array(v) => v.to_bytes_sink(sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch() {
        // SigningPubKey claims 3 bytes, AccountId must be 20
        let bytes = [3, 1, 2, 3];
        let mut p = BinaryParser::new(&bytes);
        assert_eq!(
            Value::read(&mut p, Field::SigningPubKey).unwrap(),
            Value::Blob(Blob(vec![1, 2, 3]))
        );
        let mut p = BinaryParser::new(&bytes);
        assert!(Value::read(&mut p, Field::Account).is_err());
    }

    #[test]
    fn named_codes() {
        let v = Value::from(TransactionType::Payment);
        assert_eq!(v.to_json(Field::TransactionType), json!("Payment"));
        assert_eq!(v.to_json(Field::SignerWeight), json!(0));
        assert_eq!(Value::UInt16(999).to_json(Field::TransactionType), json!(999));
        assert_eq!(
            Value::from_json(Field::TransactionType, &json!("Payment")).unwrap(),
            v
        );
        assert_eq!(
            Value::from_json(Field::LedgerEntryType, &json!("AccountRoot")).unwrap(),
            Value::UInt16(0x61)
        );
        assert!(Value::from_json(Field::TransactionType, &json!("Bogus")).is_err());
    }

    #[test]
    fn transaction_result() {
        let v = Value::from_json(Field::TransactionResult, &json!("tecCLAIM")).unwrap();
        assert_eq!(v, Value::UInt8(100));
        assert_eq!(v.to_json(Field::TransactionResult), json!("tecCLAIM"));
        assert_eq!(
            Value::UInt8(0).to_json(Field::TransactionResult),
            json!("tesSUCCESS")
        );
    }
}
