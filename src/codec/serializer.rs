// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use data_encoding::HEXUPPER;

use super::{CodecError, Field, SerializedType};

/// The largest length a length prefix can express.
pub const MAX_LENGTH_PREFIXED: usize = 918_744;

/// Anything that accepts bytes in emission order: a growable buffer, a running hash, or several of them.
pub trait BytesSink {
    fn add_bytes(&mut self, bytes: &[u8]);

    fn add_byte(&mut self, b: u8) {
        self.add_bytes(&[b]);
    }
}

impl BytesSink for Vec<u8> {
    fn add_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// A value that streams its raw encoding, without header or length prefix, into a sink.
pub trait EncodeValue {
    fn encode_value(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError>;
}

impl<T: SerializedType> EncodeValue for T {
    fn encode_value(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        self.to_bytes_sink(sink)
    }
}

/// Accumulates byte chunks without copying them into one buffer until asked to.
#[derive(Clone, Debug, Default)]
pub struct BytesList {
    chunks: Vec<Vec<u8>>,
    len: usize,
}

impl BytesList {
    pub fn new() -> Self {
        Default::default()
    }

    /// Total number of bytes held.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in &self.chunks {
            out.extend_from_slice(chunk);
        }
        out
    }

    pub fn to_hex(&self) -> String {
        HEXUPPER.encode(&self.bytes())
    }
}

impl BytesSink for BytesList {
    fn add_bytes(&mut self, bytes: &[u8]) {
        self.len += bytes.len();
        self.chunks.push(bytes.to_vec());
    }
}

/// Fans every byte out to several sinks in one pass,
/// e.g. to produce a wire blob and its hash without serializing twice.
pub struct MultiSink<'a> {
    sinks: Vec<&'a mut dyn BytesSink>,
}

impl<'a> MultiSink<'a> {
    pub fn new(sinks: Vec<&'a mut dyn BytesSink>) -> Self {
        MultiSink { sinks }
    }
}

impl BytesSink for MultiSink<'_> {
    fn add_bytes(&mut self, bytes: &[u8]) {
        for sink in self.sinks.iter_mut() {
            sink.add_bytes(bytes);
        }
    }
}

/// Encodes a length into its 1 to 3 byte prefix, the inverse of `BinaryParser::read_length_prefix`.
pub fn encode_length_prefix(length: usize) -> Result<Vec<u8>, CodecError> {
    if length <= 192 {
        Ok(vec![length as u8])
    } else if length <= 12480 {
        let l = length - 193;
        Ok(vec![193 + (l >> 8) as u8, (l & 0xff) as u8])
    } else if length <= MAX_LENGTH_PREFIXED {
        let l = length - 12481;
        Ok(vec![
            241 + (l >> 16) as u8,
            ((l >> 8) & 0xff) as u8,
            (l & 0xff) as u8,
        ])
    } else {
        Err(CodecError::Overflow(length))
    }
}

/// Writes field headers, length prefixes and raw values into a sink.
pub struct BinarySerializer<'a> {
    sink: &'a mut dyn BytesSink,
}

impl<'a> BinarySerializer<'a> {
    pub fn new(sink: &'a mut dyn BytesSink) -> Self {
        BinarySerializer { sink }
    }

    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.sink.add_bytes(bytes);
    }

    pub fn add_byte(&mut self, b: u8) {
        self.sink.add_byte(b);
    }

    pub fn add_length_prefix(&mut self, length: usize) -> Result<(), CodecError> {
        let prefix = encode_length_prefix(length)?;
        self.sink.add_bytes(&prefix);
        Ok(())
    }

    /// Writes the length prefix followed by the bytes themselves.
    pub fn add_length_encoded(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.add_length_prefix(bytes.len())?;
        self.sink.add_bytes(bytes);
        Ok(())
    }

    pub fn add_field_header(&mut self, field: Field) -> Result<(), CodecError> {
        let header = field.header().ok_or(CodecError::NotSerializable(field))?;
        self.sink.add_bytes(&header);
        Ok(())
    }

    /// Writes the header of the field closing a container-typed field, if any.
    pub fn add_end_marker(&mut self, field: Field) -> Result<(), CodecError> {
        match field.end_marker() {
            Some(marker) => self.add_field_header(marker),
            None => Ok(()),
        }
    }

    /// Writes a complete field: header, the value (length-prefixed where the type
    /// demands it), and the end marker for containers.
    pub fn add_value(&mut self, field: Field, value: &dyn EncodeValue) -> Result<(), CodecError> {
        self.add_field_header(field)?;
        if field.is_length_prefixed() {
            let mut buf: Vec<u8> = Vec::new();
            value.encode_value(&mut buf)?;
            self.add_length_encoded(&buf)?;
        } else {
            value.encode_value(&mut *self.sink)?;
        }
        self.add_end_marker(field)
    }

    /// Writes a field whose value was already encoded into `encoded`:
    /// header, then the value (length-prefixed where the type demands it),
    /// then the end marker for containers.
    pub fn add_encoded_field(&mut self, field: Field, encoded: &[u8]) -> Result<(), CodecError> {
        self.add_field_header(field)?;
        if field.is_length_prefixed() {
            self.add_length_encoded(encoded)?;
        } else {
            self.sink.add_bytes(encoded);
        }
        self.add_end_marker(field)
    }

    /// Direct access to the underlying sink, for values that stream themselves.
    pub fn sink(&mut self) -> &mut dyn BytesSink {
        &mut *self.sink
    }
}
