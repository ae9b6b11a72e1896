// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::convert::TryFrom;

use crate::codec::{BinaryParser, BytesSink, CodecError, SerializedType, Type};

macro_rules! uint_type {
    ($t:ty, $ty:ident, $read:ident) => {
        impl SerializedType for $t {
            const TYPE: Type = Type::$ty;

            fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
                sink.add_bytes(&self.to_be_bytes());
                Ok(())
            }

            fn from_parser(parser: &mut BinaryParser, _hint: Option<usize>) -> Result<Self, CodecError> {
                parser.$read()
            }

            fn to_json(&self) -> serde_json::Value {
                serde_json::Value::from(*self)
            }

            fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
                let wide = match json {
                    serde_json::Value::Number(n) => n.as_u64(),
                    serde_json::Value::String(s) => s.parse::<u64>().ok(),
                    _ => None,
                };
                wide.and_then(|w| <$t>::try_from(w).ok())
                    .ok_or_else(|| CodecError::json(Type::$ty.name(), format!("{} out of range", json)))
            }
        }
    };
}

uint_type!(u8, UInt8, read_u8);
uint_type!(u16, UInt16, read_u16);
uint_type!(u32, UInt32, read_u32);

/// 64-bit values project to hex strings, since JSON numbers lose precision past 2^53.
impl SerializedType for u64 {
    const TYPE: Type = Type::UInt64;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        sink.add_bytes(&self.to_be_bytes());
        Ok(())
    }

    fn from_parser(parser: &mut BinaryParser, _hint: Option<usize>) -> Result<Self, CodecError> {
        parser.read_u64()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(format!("{:016X}", self))
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        match json {
            serde_json::Value::String(s) => u64::from_str_radix(s, 16)
                .map_err(|e| CodecError::json(Type::UInt64.name(), e.to_string())),
            serde_json::Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| CodecError::json(Type::UInt64.name(), "not an unsigned integer")),
            _ => Err(CodecError::json(Type::UInt64.name(), "expected hex string")),
        }
    }
}
