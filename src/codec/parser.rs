// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::convert::TryInto;

use super::{CodecError, Field};

/// Sequential reader over an immutable byte buffer.
/// A parser is scoped to a single decode call and is not meant to be shared.
pub struct BinaryParser<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> BinaryParser<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BinaryParser { bytes, cursor: 0 }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Current read offset.
    pub fn pos(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    pub fn at_end(&self) -> bool {
        self.cursor >= self.bytes.len()
    }

    /// Returns the next `n` bytes and advances past them.
    pub fn read(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::OutOfBounds {
                offset: self.cursor,
                wanted: n,
                remaining: self.remaining(),
            });
        }
        let out = &self.bytes[self.cursor..self.cursor + n];
        self.cursor += n;
        Ok(out)
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let slice = self.read(N)?;
        // `read` returned exactly N bytes
        Ok(slice.try_into().unwrap_or([0; N]))
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read(1)?[0])
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Reads a field header and returns the raw combined code.
    /// A zero high nibble means the type id follows in its own byte,
    /// a zero low nibble means the field id follows in its own byte (type first).
    /// An escaped id below 16 would fit its nibble and is rejected.
    pub fn read_field_code(&mut self) -> Result<i32, CodecError> {
        let start = self.cursor;
        let first = self.read_u8()?;
        let mut type_id = (first >> 4) as i32;
        let mut nth = (first & 0x0f) as i32;
        if type_id == 0 {
            type_id = self.read_escaped_id(start, "type")?;
        }
        if nth == 0 {
            nth = self.read_escaped_id(start, "field")?;
        }
        Ok((type_id << 16) | nth)
    }

    fn read_escaped_id(&mut self, start: usize, what: &str) -> Result<i32, CodecError> {
        let id = self.read_u8()?;
        if id < 16 {
            return Err(CodecError::decode(
                "field header",
                start,
                format!("escaped {} id {} fits in a nibble", what, id),
            ));
        }
        Ok(id as i32)
    }

    /// Reads a field header and resolves it against the field registry.
    pub fn read_field_header(&mut self) -> Result<Field, CodecError> {
        let code = self.read_field_code()?;
        Field::by_code(code).ok_or(CodecError::UnknownField(code))
    }

    /// Decodes the three-tier length prefix preceding length-prefixed values.
    pub fn read_length_prefix(&mut self) -> Result<usize, CodecError> {
        let b1 = self.read_u8()? as usize;
        match b1 {
            0..=192 => Ok(b1),
            193..=240 => {
                let b2 = self.read_u8()? as usize;
                Ok(193 + (b1 - 193) * 256 + b2)
            }
            241..=254 => {
                let b2 = self.read_u8()? as usize;
                let b3 = self.read_u8()? as usize;
                Ok(12481 + (b1 - 241) * 65536 + b2 * 256 + b3)
            }
            _ => Err(CodecError::InvalidLengthIndicator(b1 as u8)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_past_end() {
        let mut p = BinaryParser::new(&[1, 2, 3]);
        assert_eq!(p.read(2).unwrap(), &[1, 2]);
        assert_eq!(
            p.read(2),
            Err(CodecError::OutOfBounds {
                offset: 2,
                wanted: 2,
                remaining: 1
            })
        );
        assert_eq!(p.read_u8().unwrap(), 3);
        assert!(p.at_end());
        assert!(p.read_u8().is_err());
    }

    #[test]
    fn integers_are_big_endian() {
        let mut p = BinaryParser::new(&[0x01, 0x02, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(p.read_u16().unwrap(), 0x0102);
        assert_eq!(p.read_u32().unwrap(), 0x100);
        assert!(p.at_end());
    }

    #[test]
    fn field_headers() {
        let mut p = BinaryParser::new(&[0x12, 0x20, 0x1b, 0x03, 0x10, 0x00, 0x10, 0x10]);
        assert_eq!(p.read_field_header().unwrap(), Field::TransactionType);
        assert_eq!(p.read_field_header().unwrap(), Field::LastLedgerSequence);
        assert_eq!(p.read_field_header().unwrap(), Field::TransactionResult);
        assert_eq!(p.read_field_header().unwrap(), Field::TickSize);
        assert!(p.at_end());
    }

    #[test]
    fn non_canonical_headers() {
        // Flags (type 2, field 2) with its type id escaped
        let mut p = BinaryParser::new(&[0x02, 0x02, 0, 0, 0, 5]);
        assert!(matches!(
            p.read_field_code(),
            Err(CodecError::Decode { offset: 0, .. })
        ));
        // field id escaped as zero
        let mut p = BinaryParser::new(&[0x20, 0x00]);
        assert!(p.read_field_code().is_err());
        // both escaped
        let mut p = BinaryParser::new(&[0x00, 0x10, 0x0f]);
        assert!(p.read_field_code().is_err());
    }

    #[test]
    fn unknown_field() {
        // type 2 (UInt32), field 15 is not registered
        let mut p = BinaryParser::new(&[0x2f]);
        assert_eq!(
            p.read_field_header(),
            Err(CodecError::UnknownField((2 << 16) | 15))
        );
    }

    #[test]
    fn length_prefix_tiers() {
        let mut p = BinaryParser::new(&[0, 192, 193, 0, 240, 255, 241, 0, 0, 254, 212, 23]);
        assert_eq!(p.read_length_prefix().unwrap(), 0);
        assert_eq!(p.read_length_prefix().unwrap(), 192);
        assert_eq!(p.read_length_prefix().unwrap(), 193);
        assert_eq!(p.read_length_prefix().unwrap(), 12480);
        assert_eq!(p.read_length_prefix().unwrap(), 12481);
        assert_eq!(p.read_length_prefix().unwrap(), 918744);
    }

    #[test]
    fn invalid_length_indicator() {
        let mut p = BinaryParser::new(&[255]);
        assert_eq!(
            p.read_length_prefix(),
            Err(CodecError::InvalidLengthIndicator(255))
        );
    }
}
