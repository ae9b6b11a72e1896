// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::ops::{Deref, DerefMut};

use thiserror::Error;

use super::index;
use crate::codec::{BinaryParser, BytesSink, CodecError, Field, SerializedType, Type};
use crate::crypto::{HalfSha512, Hash256};
use crate::data::basics::{AccountId, Amount};
use crate::data::STObject;
use crate::protocol::{HashPrefix, LedgerEntryType};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("ledger entry type not set")]
    MissingEntryType,
    #[error("unknown ledger entry type {0:#06x}")]
    UnknownEntryType(u16),
    #[error("{0} entry has no {1}")]
    MissingField(LedgerEntryType, Field),
    #[error("the index of a {0} entry cannot be derived from its fields")]
    NotDerivable(LedgerEntryType),
    #[error("cannot serialize ledger entry")]
    Codec(#[from] CodecError),
}

/// An STObject tagged with a known ledger entry type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry(STObject);

impl LedgerEntry {
    pub fn new(entry_type: LedgerEntryType) -> Self {
        LedgerEntry(STObject::with_ledger_entry_type(entry_type))
    }

    pub fn from_object(obj: STObject) -> Result<Self, EntryError> {
        tagged_type(&obj)?;
        Ok(LedgerEntry(obj))
    }

    pub fn entry_type(&self) -> Option<LedgerEntryType> {
        self.0.ledger_entry_type()
    }

    pub fn into_object(self) -> STObject {
        self.0
    }

    /// The index recorded in the `index` meta field, if any.
    pub fn index(&self) -> Option<Hash256> {
        self.0.get_hash256(Field::Index)
    }

    /// Computes the index from the key fields of the entry and records it.
    pub fn update_index(&mut self) -> Result<Hash256, EntryError> {
        let idx = self.compute_index()?;
        self.0.put(Field::Index, idx)?;
        Ok(idx)
    }

    /// Derives the index from the fields that key the entry.
    pub fn compute_index(&self) -> Result<Hash256, EntryError> {
        let entry_type = tagged_type(&self.0)?;
        let account = |f: Field| {
            self.0
                .get_account_id(f)
                .ok_or(EntryError::MissingField(entry_type, f))
        };
        let u32_field = |f: Field| {
            self.0
                .get_u32(f)
                .ok_or(EntryError::MissingField(entry_type, f))
        };
        let issued_limit = |f: Field| match self.0.get_amount(f) {
            Some(Amount::Issued(i)) => Ok(i),
            _ => Err(EntryError::MissingField(entry_type, f)),
        };

        Ok(match entry_type {
            LedgerEntryType::AccountRoot => index::account_root(&account(Field::Account)?),
            LedgerEntryType::Offer => {
                index::offer(&account(Field::Account)?, u32_field(Field::Sequence)?)
            }
            LedgerEntryType::Check => {
                index::check(&account(Field::Account)?, u32_field(Field::Sequence)?)
            }
            LedgerEntryType::Ticket => {
                index::ticket(&account(Field::Account)?, u32_field(Field::TicketSequence)?)
            }
            LedgerEntryType::DepositPreauth => {
                index::deposit_preauth(&account(Field::Account)?, &account(Field::Authorize)?)
            }
            LedgerEntryType::RippleState => {
                let low = issued_limit(Field::LowLimit)?;
                let high = issued_limit(Field::HighLimit)?;
                index::ripple_state(&low.issuer, &high.issuer, &low.currency)
            }
            LedgerEntryType::LedgerHashes => index::skip_list(),
            LedgerEntryType::Amendments => index::amendments(),
            LedgerEntryType::FeeSettings => index::fee_settings(),
            other => return Err(EntryError::NotDerivable(other)),
        })
    }

    /// Hash of the entry as a leaf of the state tree: `MLN` prefix, the entry, then its index.
    /// Uses the recorded index, computing it if none is recorded.
    pub fn leaf_hash(&self) -> Result<Hash256, EntryError> {
        let idx = match self.index() {
            Some(idx) => idx,
            None => self.compute_index()?,
        };
        let mut h = HalfSha512::prefixed(HashPrefix::LeafNode);
        self.0.to_bytes_sink(&mut h)?;
        h.add_bytes(&idx.0);
        Ok(h.finish())
    }

    pub fn owner(&self) -> Option<AccountId> {
        self.0.get_account_id(Field::Account)
    }
}

fn tagged_type(obj: &STObject) -> Result<LedgerEntryType, EntryError> {
    let code = obj
        .get_u16(Field::LedgerEntryType)
        .ok_or(EntryError::MissingEntryType)?;
    LedgerEntryType::from_code(code).ok_or(EntryError::UnknownEntryType(code))
}

impl Deref for LedgerEntry {
    type Target = STObject;

    fn deref(&self) -> &STObject {
        &self.0
    }
}

impl DerefMut for LedgerEntry {
    fn deref_mut(&mut self) -> &mut STObject {
        &mut self.0
    }
}

impl SerializedType for LedgerEntry {
    const TYPE: Type = Type::LedgerEntry;

    fn to_bytes_sink(&self, sink: &mut dyn BytesSink) -> Result<(), CodecError> {
        self.0.to_bytes_sink(sink)
    }

    fn from_parser(parser: &mut BinaryParser, hint: Option<usize>) -> Result<Self, CodecError> {
        let start = parser.pos();
        let obj = STObject::from_parser(parser, hint)?;
        LedgerEntry::from_object(obj)
            .map_err(|e| CodecError::decode(Type::LedgerEntry.name(), start, e.to_string()))
    }

    fn to_json(&self) -> serde_json::Value {
        self.0.to_json()
    }

    fn from_json(json: &serde_json::Value) -> Result<Self, CodecError> {
        LedgerEntry::from_object(STObject::from_json(json)?)
            .map_err(|e| CodecError::json(Type::LedgerEntry.name(), e.to_string()))
    }
}
