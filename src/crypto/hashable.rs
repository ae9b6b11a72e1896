// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::convert::{TryFrom, TryInto};
use std::fmt;
use std::str::FromStr;

use data_encoding::{HEXUPPER, HEXUPPER_PERMISSIVE};
use sha2::{Digest, Sha512};
use thiserror::Error;

use crate::codec::{BinaryParser, BytesSink, CodecError, SerializedType, Type};
use crate::protocol::HashPrefix;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HashError {
    #[error("invalid hex encoding")]
    InvalidHex(#[from] data_encoding::DecodeError),
    #[error("wrong length for hash: `{0}`")]
    WrongLength(usize),
}

macro_rules! fixed_hash {
    ($(#[$meta:meta])* $name:ident, $len:expr, $ty:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            /// Returns true iff the value contains only zeros.
            pub fn is_zero(&self) -> bool {
                self.0 == [0; $len]
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&HEXUPPER.encode(&self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = HashError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                let arr: [u8; $len] = bytes
                    .try_into()
                    .map_err(|_| HashError::WrongLength(bytes.len()))?;
                Ok($name(arr))
            }
        }

        impl FromStr for $name {
            type Err = HashError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let decoded = HEXUPPER_PERMISSIVE.decode(s.as_bytes())?;
                $name::try_from(&decoded[..])
            }
        }

        impl SerializedType for $name {
            const TYPE: Type = Type::$ty;

            fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
                sink.add_bytes(&self.0);
                Ok(())
            }

            fn from_parser(parser: &mut BinaryParser, _hint: Option<usize>) -> Result<Self, CodecError> {
                Ok($name(parser.read_array()?))
            }

            fn to_json(&self) -> serde_json::Value {
                serde_json::Value::String(self.to_string())
            }

            fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
                let s = json
                    .as_str()
                    .ok_or_else(|| CodecError::json(Type::$ty.name(), "expected hex string"))?;
                s.parse()
                    .map_err(|e: HashError| CodecError::json(Type::$ty.name(), e.to_string()))
            }
        }
    };
}

fixed_hash!(
    /// A 128-bit value.
    Hash128, 16, Hash128
);
fixed_hash!(
    /// A 160-bit value, e.g. a raw currency code or issuer.
    Hash160, 20, Hash160
);
fixed_hash!(
    /// A 256-bit value holding a hash digest or ledger index.
    Hash256, 32, Hash256
);

/// Running SHA-512 accumulator whose output is truncated to its first half (or quarter).
/// It is a sink, so any value can be hashed by serializing it straight into it.
#[derive(Clone, Default)]
pub struct HalfSha512(Sha512);

impl HalfSha512 {
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts a hash with the given domain separation prefix already absorbed.
    pub fn prefixed(prefix: HashPrefix) -> Self {
        let mut h = HalfSha512::new();
        h.add_bytes(prefix.bytes());
        h
    }

    /// The first 256 bits of the digest.
    pub fn finish(self) -> Hash256 {
        let digest = self.0.finalize();
        let mut out = [0; 32];
        out.copy_from_slice(&digest[..32]);
        Hash256(out)
    }

    /// The first 128 bits of the digest.
    pub fn finish128(self) -> Hash128 {
        let digest = self.0.finalize();
        let mut out = [0; 16];
        out.copy_from_slice(&digest[..16]);
        Hash128(out)
    }
}

impl BytesSink for HalfSha512 {
    fn add_bytes(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }
}

/// Computes the first half of the SHA-512 hash of an array of bytes.
pub fn sha512_half(data: &[u8]) -> Hash256 {
    let mut h = HalfSha512::new();
    h.add_bytes(data);
    h.finish()
}

/// A trait implemented by objects that can be hashed under a domain separation prefix.
pub trait Hashable {
    fn hash_prefix(&self) -> HashPrefix;

    /// Writes the bytes to be hashed after the prefix.
    fn hash_into(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError>;
}

/// Computes a hash of a Hashable object and its prefix.
pub fn hash_obj(obj: &impl Hashable) -> Result<Hash256, CodecError> {
    let mut h = HalfSha512::prefixed(obj.hash_prefix());
    obj.hash_into(&mut h)?;
    Ok(h.finish())
}

/// Hashes an inner tree node from its sixteen child hashes (zero for empty branches).
pub fn hash_inner_node(children: &[Hash256; 16]) -> Hash256 {
    let mut h = HalfSha512::prefixed(HashPrefix::InnerNode);
    for child in children {
        h.add_bytes(&child.0);
    }
    h.finish()
}
