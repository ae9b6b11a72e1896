// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::ops::{Deref, DerefMut};

use super::{FormatError, TxFormat};
use crate::codec::{BinaryParser, BytesSink, CodecError, Field, SerializedType, Type};
use crate::crypto::{hash_obj, HalfSha512, Hash256, Hashable};
use crate::data::basics::{AccountId, Amount};
use crate::data::STObject;
use crate::protocol::{HashPrefix, TransactionType};

/// An STObject tagged with a known transaction type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction(STObject);

impl Transaction {
    /// Creates an empty transaction of the given type.
    pub fn new(tx_type: TransactionType) -> Self {
        Transaction(STObject::with_transaction_type(tx_type))
    }

    /// Wraps an object whose `TransactionType` names a known type.
    pub fn from_object(obj: STObject) -> Result<Self, FormatError> {
        tagged_type(&obj)?;
        Ok(Transaction(obj))
    }

    /// The type tag. Only `None` if the tag was overwritten with an unknown code.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.0.transaction_type()
    }

    pub fn as_object(&self) -> &STObject {
        &self.0
    }

    pub fn into_object(self) -> STObject {
        self.0
    }

    pub fn account(&self) -> Option<AccountId> {
        self.0.get_account_id(Field::Account)
    }

    pub fn sequence(&self) -> Option<u32> {
        self.0.get_u32(Field::Sequence)
    }

    pub fn fee(&self) -> Option<Amount> {
        self.0.get_amount(Field::Fee)
    }

    /// Checks the transaction against the field table of its type.
    pub fn check_format(&self) -> Result<(), FormatError> {
        TxFormat::for_type(tagged_type(&self.0)?).check(&self.0)
    }

    /// The digest a signature covers: the signing fields under the `STX` prefix.
    pub fn signing_hash(&self) -> Result<Hash256, CodecError> {
        let mut h = HalfSha512::prefixed(HashPrefix::TxSign);
        self.0.to_signing_bytes(&mut h)?;
        Ok(h.finish())
    }

    /// The transaction id: all serialized fields, signature included, under the `TXN` prefix.
    pub fn id(&self) -> Result<Hash256, CodecError> {
        hash_obj(self)
    }
}

fn tagged_type(obj: &STObject) -> Result<TransactionType, FormatError> {
    let code = obj
        .get_u16(Field::TransactionType)
        .ok_or(FormatError::MissingTransactionType)?;
    TransactionType::from_code(code).ok_or(FormatError::UnknownTransactionType(code))
}

impl Deref for Transaction {
    type Target = STObject;

    fn deref(&self) -> &STObject {
        &self.0
    }
}

impl DerefMut for Transaction {
    fn deref_mut(&mut self) -> &mut STObject {
        &mut self.0
    }
}

impl Hashable for Transaction {
    fn hash_prefix(&self) -> HashPrefix {
        HashPrefix::TransactionId
    }

    fn hash_into(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        self.0.to_bytes_sink(sink)
    }
}

impl SerializedType for Transaction {
    const TYPE: Type = Type::Transaction;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        self.0.to_bytes_sink(sink)
    }

    fn from_parser(parser: &mut BinaryParser, hint: Option<usize>) -> Result<Self, CodecError> {
        let start = parser.pos();
        let obj = STObject::from_parser(parser, hint)?;
        Transaction::from_object(obj)
            .map_err(|e| CodecError::decode(Type::Transaction.name(), start, e.to_string()))
    }

    fn to_json(&self) -> serde_json::Value {
        self.0.to_json()
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        let obj = STObject::from_json(json)?;
        Transaction::from_object(obj)
            .map_err(|e| CodecError::json(Type::Transaction.name(), e.to_string()))
    }
}
