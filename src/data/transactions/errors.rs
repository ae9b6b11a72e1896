// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use thiserror::Error;

use crate::codec::{CodecError, Field};
use crate::crypto::KeyError;
use crate::data::basics::Amount;
use crate::protocol::TransactionType;

/// Defines error types which could be returned from `Transaction::check_format`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("transaction type not set")]
    MissingTransactionType,
    #[error("unknown transaction type {0}")]
    UnknownTransactionType(u16),
    #[error("{0} transactions require field {1}")]
    MissingField(TransactionType, Field),
    #[error("field {1} is not allowed in {0} transactions")]
    UnexpectedField(TransactionType, Field),
}

/// Failures of the signing pipeline.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum SigningError {
    #[error("signing hash has not been prepared")]
    NotPrepared,
    #[error("transaction fee must be a native amount, got {0}")]
    NonNativeFee(Amount),
    #[error("transaction has no {0}")]
    MissingField(Field),

    #[error("signer failed")]
    Key(#[from] KeyError),
    #[error("cannot serialize transaction")]
    Codec(#[from] CodecError),
    #[error("malformed transaction")]
    Format(#[from] FormatError),
}
