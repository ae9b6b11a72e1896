// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::convert::TryFrom;
use std::fmt;

use hex_literal::hex;

use crate::codec::CodecError;

/// Domain separation prefix for an object type that might be hashed.
/// This ensures, for example, the hash of a transaction will never collide with the hash of its signing payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashPrefix {
    /// Transaction plus signature, giving the transaction id.
    TransactionId,
    /// Transaction plus metadata, as stored in a transaction tree leaf.
    TxNode,
    /// Account state, as stored in a state tree leaf.
    LeafNode,
    /// Inner node in either tree.
    InnerNode,
    /// Ledger master data for signing.
    LedgerMaster,
    /// Inner transaction to sign.
    TxSign,
    /// Inner transaction to multi-sign.
    TxMultiSign,
    /// Validation for signing.
    Validation,
    /// Proposal for signing.
    Proposal,
    /// Validator manifest.
    Manifest,
    /// Payment channel claim.
    PaymentChannelClaim,
}

// Prefixes are three ASCII letters followed by a zero byte.
const TRANSACTION_ID: [u8; 4] = hex!("54584e00");
const TX_NODE: [u8; 4] = hex!("534e4400");
const LEAF_NODE: [u8; 4] = hex!("4d4c4e00");
const INNER_NODE: [u8; 4] = hex!("4d494e00");
const LEDGER_MASTER: [u8; 4] = hex!("4c575200");
const TX_SIGN: [u8; 4] = hex!("53545800");
const TX_MULTI_SIGN: [u8; 4] = hex!("534d5400");
const VALIDATION: [u8; 4] = hex!("56414c00");
const PROPOSAL: [u8; 4] = hex!("50525000");
const MANIFEST: [u8; 4] = hex!("4d414e00");
const PAYMENT_CHANNEL_CLAIM: [u8; 4] = hex!("434c4d00");

impl HashPrefix {
    pub const ALL: &'static [HashPrefix] = &[
        HashPrefix::TransactionId,
        HashPrefix::TxNode,
        HashPrefix::LeafNode,
        HashPrefix::InnerNode,
        HashPrefix::LedgerMaster,
        HashPrefix::TxSign,
        HashPrefix::TxMultiSign,
        HashPrefix::Validation,
        HashPrefix::Proposal,
        HashPrefix::Manifest,
        HashPrefix::PaymentChannelClaim,
    ];

    pub fn bytes(&self) -> &'static [u8; 4] {
        match self {
            HashPrefix::TransactionId => &TRANSACTION_ID,
            HashPrefix::TxNode => &TX_NODE,
            HashPrefix::LeafNode => &LEAF_NODE,
            HashPrefix::InnerNode => &INNER_NODE,
            HashPrefix::LedgerMaster => &LEDGER_MASTER,
            HashPrefix::TxSign => &TX_SIGN,
            HashPrefix::TxMultiSign => &TX_MULTI_SIGN,
            HashPrefix::Validation => &VALIDATION,
            HashPrefix::Proposal => &PROPOSAL,
            HashPrefix::Manifest => &MANIFEST,
            HashPrefix::PaymentChannelClaim => &PAYMENT_CHANNEL_CLAIM,
        }
    }

    /// The prefix read as a big-endian integer.
    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes(*self.bytes())
    }
}

impl TryFrom<&[u8]> for HashPrefix {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        HashPrefix::ALL
            .iter()
            .find(|p| &p.bytes()[..] == bytes)
            .copied()
            .ok_or_else(|| CodecError::Decode {
                type_name: "HashPrefix",
                offset: 0,
                reason: format!("no prefix matches {:02x?}", bytes),
            })
    }
}

impl fmt::Display for HashPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bytes();
        write!(f, "{}", String::from_utf8_lossy(&b[..3]))
    }
}

/// Two-byte namespace prepended to the key material of a ledger entry index,
/// so that e.g. an account root and an owner directory of the same account never share an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LedgerSpace {
    Account,
    DirectoryNode,
    Generator,
    RippleState,
    Offer,
    OwnerDirectory,
    BookDirectory,
    Contract,
    SkipList,
    Amendments,
    FeeSettings,
    Ticket,
    SignerList,
    Escrow,
    PayChannel,
    Check,
    DepositPreauth,
}

impl LedgerSpace {
    pub fn bytes(&self) -> [u8; 2] {
        let c = match self {
            LedgerSpace::Account => b'a',
            LedgerSpace::DirectoryNode => b'd',
            LedgerSpace::Generator => b'g',
            LedgerSpace::RippleState => b'r',
            LedgerSpace::Offer => b'o',
            LedgerSpace::OwnerDirectory => b'O',
            LedgerSpace::BookDirectory => b'B',
            LedgerSpace::Contract => b'c',
            LedgerSpace::SkipList => b's',
            LedgerSpace::Amendments => b'f',
            LedgerSpace::FeeSettings => b'e',
            LedgerSpace::Ticket => b'T',
            LedgerSpace::SignerList => b'S',
            LedgerSpace::Escrow => b'u',
            LedgerSpace::PayChannel => b'x',
            LedgerSpace::Check => b'C',
            LedgerSpace::DepositPreauth => b'p',
        };
        [0, c]
    }
}
