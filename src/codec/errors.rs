// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use thiserror::Error;

use super::{Field, Type};
use crate::data::basics::AmountError;

/// Errors raised while reading or writing the canonical binary form (or its JSON projection).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("read of {wanted} bytes at offset {offset} exceeds buffer ({remaining} remaining)")]
    OutOfBounds {
        offset: usize,
        wanted: usize,
        remaining: usize,
    },
    #[error("no field registered for type {type_id}, field {nth} (code {code:#x})", type_id = .0 >> 16, nth = .0 & 0xffff, code = .0)]
    UnknownField(i32),
    #[error("invalid length indicator {0}")]
    InvalidLengthIndicator(u8),
    #[error("length {0} exceeds the maximum encodable length")]
    Overflow(usize),
    #[error("field {0} is never serialized")]
    NotSerializable(Field),
    #[error("path hop is empty")]
    EmptyPathHop,
    #[error("path has no hops")]
    EmptyPath,
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error("cannot decode {type_name} at offset {offset}: {reason}")]
    Decode {
        type_name: &'static str,
        offset: usize,
        reason: String,
    },

    // JSON projection
    #[error("unknown field name {0:?}")]
    UnknownFieldName(String),
    #[error("invalid JSON for {type_name}: {reason}")]
    InvalidJson {
        type_name: &'static str,
        reason: String,
    },
    #[error("field {field} holds values of type {expected}")]
    TypeMismatch { field: Field, expected: Type },
}

impl CodecError {
    pub(crate) fn decode(type_name: &'static str, offset: usize, reason: impl Into<String>) -> Self {
        CodecError::Decode {
            type_name,
            offset,
            reason: reason.into(),
        }
    }

    pub(crate) fn json(type_name: &'static str, reason: impl Into<String>) -> Self {
        CodecError::InvalidJson {
            type_name,
            reason: reason.into(),
        }
    }
}

/// A defect in the compiled-in field table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("field {current} (code {current_code:#x}) is declared after {previous} (code {previous_code:#x})")]
    NotPresorted {
        previous: &'static str,
        previous_code: i32,
        current: &'static str,
        current_code: i32,
    },
    #[error("fields {0} and {1} share a combined code")]
    Duplicate(&'static str, &'static str),
}
