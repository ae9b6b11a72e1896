// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fmt;
use std::str::FromStr;

use serde_json::json;
use thiserror::Error;

use super::{AccountId, Currency};
use crate::codec::{BinaryParser, BytesSink, CodecError, SerializedType, Type};

/// Upper bound on native amounts, in drops (100 billion units of 10^6 drops).
pub const MAX_DROPS: i64 = 100_000_000_000_000_000;

const MIN_MANTISSA: u64 = 1_000_000_000_000_000;
const MAX_MANTISSA: u64 = 9_999_999_999_999_999;
const MIN_EXPONENT: i32 = -96;
const MAX_EXPONENT: i32 = 80;
/// Added to the exponent so that it fits an unsigned byte.
const EXPONENT_BIAS: i32 = 97;

const NOT_NATIVE: u64 = 0x8000_0000_0000_0000;
const POSITIVE: u64 = 0x4000_0000_0000_0000;
const MANTISSA_MASK: u64 = (1 << 54) - 1;
const DROPS_MASK: u64 = !(NOT_NATIVE | POSITIVE);

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("{0} drops is outside the representable range")]
    DropsOutOfRange(i64),
    #[error("exponent {0} is too large")]
    ExponentOverflow(i32),
    #[error("{0:?} has more than 16 significant digits")]
    Precision(String),
    #[error("{0:?} is not a decimal number")]
    InvalidDecimal(String),
    #[error("issued amounts cannot use the native currency")]
    NativeCurrency,
}

/// The value of an issued amount: a normalized decimal floating point number.
/// Non-zero mantissas lie in [10^15, 10^16); zero is mantissa 0, exponent 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IouValue {
    mantissa: u64,
    exponent: i32,
    negative: bool,
}

impl IouValue {
    pub fn zero() -> Self {
        Default::default()
    }

    /// Builds a value from any mantissa and exponent, normalizing it.
    /// Values too small to represent become zero.
    pub fn new(mantissa: u64, exponent: i32, negative: bool) -> Result<Self, AmountError> {
        let (mut m, mut e) = (mantissa, exponent);
        if m == 0 {
            return Ok(IouValue::zero());
        }
        while m < MIN_MANTISSA {
            m *= 10;
            e = match e.checked_sub(1) {
                Some(e) => e,
                None => return Ok(IouValue::zero()),
            };
        }
        while m > MAX_MANTISSA {
            if m % 10 != 0 {
                return Err(AmountError::Precision(format!("{}e{}", mantissa, exponent)));
            }
            m /= 10;
            e = e
                .checked_add(1)
                .ok_or(AmountError::ExponentOverflow(exponent))?;
        }
        if e < MIN_EXPONENT {
            return Ok(IouValue::zero());
        }
        if e > MAX_EXPONENT {
            return Err(AmountError::ExponentOverflow(e));
        }
        Ok(IouValue {
            mantissa: m,
            exponent: e,
            negative,
        })
    }

    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    pub fn negate(&self) -> Self {
        IouValue {
            negative: !self.negative && !self.is_zero(),
            ..*self
        }
    }

    fn to_bits(&self) -> u64 {
        if self.is_zero() {
            return NOT_NATIVE;
        }
        let sign = if self.negative { 0 } else { POSITIVE };
        NOT_NATIVE | sign | (((self.exponent + EXPONENT_BIAS) as u64) << 54) | self.mantissa
    }

    fn from_bits(bits: u64) -> Result<Self, String> {
        if bits == NOT_NATIVE {
            return Ok(IouValue::zero());
        }
        let negative = bits & POSITIVE == 0;
        let exponent = ((bits >> 54) & 0xff) as i32 - EXPONENT_BIAS;
        let mantissa = bits & MANTISSA_MASK;
        if !(MIN_MANTISSA..=MAX_MANTISSA).contains(&mantissa) {
            return Err(format!("mantissa {} is not normalized", mantissa));
        }
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
            return Err(format!("exponent {} out of range", exponent));
        }
        Ok(IouValue {
            mantissa,
            exponent,
            negative,
        })
    }
}

impl FromStr for IouValue {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::InvalidDecimal(s.to_owned());
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (number, exp) = match unsigned.find(|c| c == 'e' || c == 'E') {
            Some(i) => (
                &unsigned[..i],
                unsigned[i + 1..].parse::<i32>().map_err(|_| invalid())?,
            ),
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = match number.find('.') {
            Some(i) => (&number[..i], &number[i + 1..]),
            None => (number, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits = format!("{}{}", int_part, frac_part);
        let significant = digits.trim_start_matches('0');
        let trimmed = significant.trim_end_matches('0');
        if trimmed.is_empty() {
            return Ok(IouValue::zero());
        }
        if trimmed.len() > 16 {
            return Err(AmountError::Precision(s.to_owned()));
        }
        // saturate: anything this far out is zero or an overflow once normalized
        let exponent = i64::from(exp) - frac_part.len() as i64
            + (significant.len() - trimmed.len()) as i64;
        let exponent = exponent.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        let mantissa = trimmed.parse::<u64>().map_err(|_| invalid())?;
        IouValue::new(mantissa, exponent, negative)
    }
}

/// Plain decimal notation for moderate exponents, scientific notation otherwise.
impl fmt::Display for IouValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let sign = if self.negative { "-" } else { "" };
        let (mut m, mut e) = (self.mantissa, self.exponent);
        if e != 0 && (e < -25 || e > -5) {
            while m % 10 == 0 {
                m /= 10;
                e += 1;
            }
            return write!(f, "{}{}e{}", sign, m, e);
        }

        let digits = m.to_string();
        let point = digits.len() as i32 + e;
        let (int_part, frac_part) = if point >= digits.len() as i32 {
            (digits.clone(), String::new())
        } else if point > 0 {
            (
                digits[..point as usize].to_owned(),
                digits[point as usize..].to_owned(),
            )
        } else {
            ("0".to_owned(), "0".repeat((-point) as usize) + &digits)
        };
        let frac_part = frac_part.trim_end_matches('0');
        if frac_part.is_empty() {
            write!(f, "{}{}", sign, int_part)
        } else {
            write!(f, "{}{}.{}", sign, int_part, frac_part)
        }
    }
}

/// An issued (non-native) amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IssuedAmount {
    pub value: IouValue,
    pub currency: Currency,
    pub issuer: AccountId,
}

/// Either a native amount in drops or an issued amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Amount {
    Native(i64),
    Issued(IssuedAmount),
}

impl Amount {
    pub fn from_drops(drops: i64) -> Result<Self, AmountError> {
        if drops.checked_abs().map_or(true, |d| d > MAX_DROPS) {
            return Err(AmountError::DropsOutOfRange(drops));
        }
        Ok(Amount::Native(drops))
    }

    pub fn issued(value: &str, currency: Currency, issuer: AccountId) -> Result<Self, AmountError> {
        if currency.is_native() {
            return Err(AmountError::NativeCurrency);
        }
        Ok(Amount::Issued(IssuedAmount {
            value: value.parse()?,
            currency,
            issuer,
        }))
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Amount::Native(_))
    }

    pub fn drops(&self) -> Option<i64> {
        match self {
            Amount::Native(d) => Some(*d),
            Amount::Issued(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Amount::Native(d) => *d == 0,
            Amount::Issued(i) => i.value.is_zero(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Amount::Native(d) => *d < 0,
            Amount::Issued(i) => i.value.is_negative(),
        }
    }

    pub fn currency(&self) -> Currency {
        match self {
            Amount::Native(_) => super::XRP,
            Amount::Issued(i) => i.currency,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Native(d) => write!(f, "{}", d),
            Amount::Issued(i) => write!(f, "{}/{}/{}", i.value, i.currency, i.issuer),
        }
    }
}

impl SerializedType for Amount {
    const TYPE: Type = Type::Amount;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        match self {
            Amount::Native(drops) => {
                if drops.checked_abs().map_or(true, |d| d > MAX_DROPS) {
                    return Err(AmountError::DropsOutOfRange(*drops).into());
                }
                let bits = if *drops >= 0 {
                    POSITIVE | *drops as u64
                } else {
                    drops.unsigned_abs()
                };
                sink.add_bytes(&bits.to_be_bytes());
            }
            Amount::Issued(i) => {
                sink.add_bytes(&i.value.to_bits().to_be_bytes());
                i.currency.to_bytes_sink(sink)?;
                i.issuer.to_bytes_sink(sink)?;
            }
        }
        Ok(())
    }

    fn from_parser(parser: &mut BinaryParser, _hint: Option<usize>) -> Result<Self, CodecError> {
        let offset = parser.pos();
        let bits = parser.read_u64()?;
        let invalid = |reason: String| CodecError::decode(Type::Amount.name(), offset, reason);

        if bits & NOT_NATIVE == 0 {
            let magnitude = bits & DROPS_MASK;
            if magnitude > MAX_DROPS as u64 {
                return Err(invalid(format!("{} drops out of range", magnitude)));
            }
            if bits & POSITIVE == 0 {
                if magnitude == 0 {
                    return Err(invalid("negative zero".to_owned()));
                }
                return Ok(Amount::Native(-(magnitude as i64)));
            }
            return Ok(Amount::Native(magnitude as i64));
        }

        let value = IouValue::from_bits(bits).map_err(invalid)?;
        let currency = Currency::from_parser(parser, None)?;
        let issuer = AccountId::from_parser(parser, None)?;
        if currency.is_native() {
            return Err(invalid("issued amount in the native currency".to_owned()));
        }
        Ok(Amount::Issued(IssuedAmount {
            value,
            currency,
            issuer,
        }))
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Amount::Native(d) => serde_json::Value::String(d.to_string()),
            Amount::Issued(i) => json!({
                "currency": i.currency.to_string(),
                "issuer": i.issuer.to_string(),
                "value": i.value.to_string(),
            }),
        }
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        let name = Type::Amount.name();
        let amount = match json {
            serde_json::Value::String(s) => {
                let drops = s
                    .parse::<i64>()
                    .map_err(|_| CodecError::json(name, format!("{:?} is not a drops amount", s)))?;
                Amount::from_drops(drops)
            }
            serde_json::Value::Number(n) => {
                let drops = n
                    .as_i64()
                    .ok_or_else(|| CodecError::json(name, "drops must be an integer"))?;
                Amount::from_drops(drops)
            }
            serde_json::Value::Object(map) => {
                let value = match map.get("value") {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(serde_json::Value::Number(n)) => n.to_string(),
                    _ => return Err(CodecError::json(name, "missing value")),
                };
                let currency = Currency::from_json(
                    map.get("currency")
                        .ok_or_else(|| CodecError::json(name, "missing currency"))?,
                )?;
                let issuer = AccountId::from_json(
                    map.get("issuer")
                        .ok_or_else(|| CodecError::json(name, "missing issuer"))?,
                )?;
                Amount::issued(&value, currency, issuer)
            }
            _ => return Err(CodecError::json(name, "expected string or object")),
        };
        amount.map_err(|e| CodecError::json(name, e.to_string()))
    }
}
