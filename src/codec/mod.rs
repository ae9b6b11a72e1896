// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

mod errors;
mod fields;
mod parser;
mod serializer;
mod types;

pub use errors::*;
pub use fields::*;
pub use parser::*;
pub use serializer::*;
pub use types::*;

use data_encoding::{HEXUPPER, HEXUPPER_PERMISSIVE};

/// The contract every wire type fulfills: it knows how to write itself to a sink,
/// read itself back from a parser, and convert to and from its JSON projection.
pub trait SerializedType: Sized {
    const TYPE: Type;

    /// Writes the raw value, without field header or length prefix.
    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError>;

    /// Reads a value. `hint` carries the already consumed length prefix for length-prefixed types.
    fn from_parser(parser: &mut BinaryParser, hint: Option<usize>) -> Result<Self, CodecError>;

    fn to_json(&self) -> serde_json::Value;

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError>;

    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        self.to_bytes_sink(&mut buf)?;
        Ok(buf)
    }

    fn to_hex(&self) -> Result<String, CodecError> {
        Ok(HEXUPPER.encode(&self.to_bytes()?))
    }
}

/// Encodes a value into its raw wire bytes.
pub fn encode(x: &impl SerializedType) -> Result<Vec<u8>, CodecError> {
    x.to_bytes()
}

/// Decodes a value that must span the whole buffer.
pub fn decode<T: SerializedType>(bytes: &[u8]) -> Result<T, CodecError> {
    let mut parser = BinaryParser::new(bytes);
    let value = T::from_parser(&mut parser, Some(bytes.len()))?;
    if !parser.at_end() {
        return Err(CodecError::decode(
            T::TYPE.name(),
            parser.pos(),
            format!("{} trailing bytes", parser.remaining()),
        ));
    }
    Ok(value)
}

/// Decodes a value from its hex textual form.
pub fn decode_hex<T: SerializedType>(hex: &str) -> Result<T, CodecError> {
    let bytes = hex_to_bytes(T::TYPE.name(), hex)?;
    decode(&bytes)
}

pub(crate) fn hex_to_bytes(type_name: &'static str, hex: &str) -> Result<Vec<u8>, CodecError> {
    HEXUPPER_PERMISSIVE
        .decode(hex.as_bytes())
        .map_err(|e| CodecError::json(type_name, format!("invalid hex: {}", e)))
}
