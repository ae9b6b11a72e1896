// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use crate::codec::{decode_hex, CodecError, Field};
use crate::crypto::Hash256;
use crate::data::basics::Amount;
use crate::data::STObject;
use crate::protocol::{EngineResult, LedgerEntryType};

/// What a transaction did to one ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeAction {
    Created,
    Modified,
    Deleted,
}

/// One entry of `AffectedNodes`.
#[derive(Clone, Copy, Debug)]
pub struct AffectedNode<'a> {
    pub action: NodeAction,
    node: &'a STObject,
}

impl<'a> AffectedNode<'a> {
    pub fn ledger_entry_type(&self) -> Option<LedgerEntryType> {
        self.node.ledger_entry_type()
    }

    pub fn ledger_index(&self) -> Option<Hash256> {
        self.node.get_hash256(Field::LedgerIndex)
    }

    /// Fields of a created entry.
    pub fn new_fields(&self) -> Option<&'a STObject> {
        self.node.get_object(Field::NewFields)
    }

    /// Fields of a modified or deleted entry after the transaction.
    pub fn final_fields(&self) -> Option<&'a STObject> {
        self.node.get_object(Field::FinalFields)
    }

    /// Prior values of the fields the transaction changed.
    pub fn previous_fields(&self) -> Option<&'a STObject> {
        self.node.get_object(Field::PreviousFields)
    }
}

/// The metadata a validated ledger records next to each transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionMeta(pub STObject);

impl TransactionMeta {
    pub fn from_hex(hex: &str) -> Result<Self, CodecError> {
        Ok(TransactionMeta(decode_hex(hex)?))
    }

    /// The engine result, or `None` if the code is missing or unknown to this version.
    pub fn transaction_result(&self) -> Option<EngineResult> {
        self.0
            .get_u8(Field::TransactionResult)
            .and_then(EngineResult::from_meta_byte)
    }

    /// Position of the transaction within its ledger.
    pub fn transaction_index(&self) -> Option<u32> {
        self.0.get_u32(Field::TransactionIndex)
    }

    pub fn delivered_amount(&self) -> Option<Amount> {
        self.0.get_amount(Field::DeliveredAmount)
    }

    pub fn affected_nodes(&self) -> impl Iterator<Item = AffectedNode<'_>> {
        self.0
            .get_array(Field::AffectedNodes)
            .into_iter()
            .flat_map(|a| a.iter())
            .filter_map(|entry| {
                let action = match entry.field() {
                    Field::CreatedNode => NodeAction::Created,
                    Field::ModifiedNode => NodeAction::Modified,
                    Field::DeletedNode => NodeAction::Deleted,
                    _ => return None,
                };
                Some(AffectedNode {
                    action,
                    node: entry.object(),
                })
            })
    }
}
