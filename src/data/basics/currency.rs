// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fmt;
use std::str::FromStr;

use data_encoding::{HEXUPPER, HEXUPPER_PERMISSIVE};
use thiserror::Error;

use crate::codec::{BinaryParser, BytesSink, CodecError, SerializedType, Type};
use crate::crypto::Hash160;

/// A 160-bit currency code.
/// Standard codes keep three ASCII letters at bytes 12..15 and zeros elsewhere;
/// the native currency is all zeros.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Currency(pub [u8; 20]);

pub const XRP: Currency = Currency([0; 20]);

impl Currency {
    pub fn is_native(&self) -> bool {
        *self == XRP
    }

    /// Returns the ISO-style code for standard currencies.
    pub fn iso_code(&self) -> Option<String> {
        let b = &self.0;
        let zeros_around = b[..12].iter().all(|&x| x == 0) && b[15..].iter().all(|&x| x == 0);
        let code = &b[12..15];
        if zeros_around && code.iter().all(|c| c.is_ascii_alphanumeric()) {
            Some(String::from_utf8_lossy(code).into_owned())
        } else {
            None
        }
    }

    pub fn to_hash160(&self) -> Hash160 {
        Hash160(self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid currency code {0:?}")]
pub struct CurrencyError(pub String);

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "XRP" {
            return Ok(XRP);
        }
        if s.len() == 3 && s.bytes().all(|c| c.is_ascii_alphanumeric()) {
            let mut c = Currency::default();
            c.0[12..15].copy_from_slice(s.as_bytes());
            return Ok(c);
        }
        if s.len() == 40 {
            if let Ok(bytes) = HEXUPPER_PERMISSIVE.decode(s.as_bytes()) {
                let mut c = Currency::default();
                c.0.copy_from_slice(&bytes);
                return Ok(c);
            }
        }
        Err(CurrencyError(s.to_owned()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            return f.write_str("XRP");
        }
        match self.iso_code() {
            // A standard code spelling "XRP" would be confused with the native currency.
            Some(code) if code != "XRP" => f.write_str(&code),
            _ => f.write_str(&HEXUPPER.encode(&self.0)),
        }
    }
}

impl SerializedType for Currency {
    const TYPE: Type = Type::Hash160;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        sink.add_bytes(&self.0);
        Ok(())
    }

    fn from_parser(parser: &mut BinaryParser, _hint: Option<usize>) -> Result<Self, CodecError> {
        Ok(Currency(parser.read_array()?))
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        json.as_str()
            .ok_or_else(|| CodecError::json("Currency", "expected string"))?
            .parse()
            .map_err(|e: CurrencyError| CodecError::json("Currency", e.to_string()))
    }
}
