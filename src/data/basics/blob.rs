// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::convert::TryFrom;
use std::fmt;

use data_encoding::HEXUPPER;

use crate::codec::{hex_to_bytes, BinaryParser, BytesSink, CodecError, SerializedType, Type};
use crate::crypto::Hash256;

/// Variable length binary data, e.g. public keys, signatures and memos.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Blob(pub Vec<u8>);

impl Blob {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Blob {
    fn from(v: Vec<u8>) -> Self {
        Blob(v)
    }
}

impl From<&[u8]> for Blob {
    fn from(v: &[u8]) -> Self {
        Blob(v.to_vec())
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&HEXUPPER.encode(&self.0))
    }
}

impl SerializedType for Blob {
    const TYPE: Type = Type::Blob;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        sink.add_bytes(&self.0);
        Ok(())
    }

    /// Without a hint the blob extends to the end of the buffer.
    fn from_parser(parser: &mut BinaryParser, hint: Option<usize>) -> Result<Self, CodecError> {
        let len = hint.unwrap_or_else(|| parser.remaining());
        Ok(Blob(parser.read(len)?.to_vec()))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        let s = json
            .as_str()
            .ok_or_else(|| CodecError::json(Type::Blob.name(), "expected hex string"))?;
        Ok(Blob(hex_to_bytes(Type::Blob.name(), s)?))
    }
}

/// A length-prefixed list of 256-bit hashes, e.g. amendment ids or directory indexes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector256(pub Vec<Hash256>);

impl SerializedType for Vector256 {
    const TYPE: Type = Type::Vector256;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        for h in &self.0 {
            sink.add_bytes(&h.0);
        }
        Ok(())
    }

    fn from_parser(parser: &mut BinaryParser, hint: Option<usize>) -> Result<Self, CodecError> {
        let len = hint.unwrap_or_else(|| parser.remaining());
        if len % Hash256::LEN != 0 {
            return Err(CodecError::decode(
                Type::Vector256.name(),
                parser.pos(),
                format!("length {} is not a multiple of {}", len, Hash256::LEN),
            ));
        }
        let mut hashes = Vec::with_capacity(len / Hash256::LEN);
        for _ in 0..len / Hash256::LEN {
            hashes.push(Hash256::from_parser(parser, None)?);
        }
        Ok(Vector256(hashes))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.0.iter().map(|h| h.to_json()).collect())
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        let items = json
            .as_array()
            .ok_or_else(|| CodecError::json(Type::Vector256.name(), "expected array"))?;
        items
            .iter()
            .map(Hash256::from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Vector256)
    }
}

impl TryFrom<&[u8]> for Vector256 {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        crate::codec::decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use serde_json::json;

    #[test]
    fn blob_hint() {
        let bytes = [1, 2, 3, 4];
        let mut p = BinaryParser::new(&bytes);
        assert_eq!(Blob::from_parser(&mut p, Some(3)).unwrap(), Blob(vec![1, 2, 3]));
        assert_eq!(p.remaining(), 1);
        assert!(Blob::from_parser(&mut p, Some(2)).is_err());
    }

    #[test]
    fn blob_json() {
        let b = Blob(vec![0xde, 0xad]);
        assert_eq!(b.to_json(), json!("DEAD"));
        assert_eq!(Blob::from_json(&json!("dead")).unwrap(), b);
        assert!(Blob::from_json(&json!("xyz")).is_err());
        assert!(Blob::from_json(&json!(1)).is_err());
    }

    #[test]
    fn vector256() {
        let mut bytes = vec![0xaa; 32];
        bytes.extend_from_slice(&[0xbb; 32]);
        let v: Vector256 = decode(&bytes).unwrap();
        assert_eq!(v.0, vec![Hash256([0xaa; 32]), Hash256([0xbb; 32])]);
        assert_eq!(v.to_bytes().unwrap(), bytes);
        assert!(Vector256::try_from(&bytes[..40]).is_err());
        assert_eq!(Vector256::from_json(&v.to_json()).unwrap(), v);
    }
}
