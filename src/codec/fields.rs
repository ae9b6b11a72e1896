// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;

use lazy_static::lazy_static;
use tracing::debug;

use super::{RegistryError, Type};

macro_rules! fields {
    ( $( $name:ident = ($ty:ident, $nth:expr) ),* $(,)? ) => {
        /// A named, typed slot that can appear in a serialized object.
        /// Variants are declared in ascending combined-code order, which is also the canonical wire order.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Field {
            $( $name ),*
        }

        /// Every field, in declaration order.
        pub const ALL_FIELDS: &[Field] = &[ $( Field::$name ),* ];

        impl Field {
            pub fn name(&self) -> &'static str {
                match self {
                    $( Field::$name => stringify!($name) ),*
                }
            }

            pub fn field_type(&self) -> Type {
                match self {
                    $( Field::$name => Type::$ty ),*
                }
            }

            /// The field id, unique within its type.
            pub fn nth(&self) -> i32 {
                match self {
                    $( Field::$name => $nth ),*
                }
            }
        }
    };
}

// Ids of 256 and above mark meta fields which are never written to the wire.
fields! {
    LedgerEntryType = (UInt16, 1),
    TransactionType = (UInt16, 2),
    SignerWeight = (UInt16, 3),

    Flags = (UInt32, 2),
    SourceTag = (UInt32, 3),
    Sequence = (UInt32, 4),
    PreviousTxnLgrSeq = (UInt32, 5),
    LedgerSequence = (UInt32, 6),
    CloseTime = (UInt32, 7),
    ParentCloseTime = (UInt32, 8),
    SigningTime = (UInt32, 9),
    Expiration = (UInt32, 10),
    TransferRate = (UInt32, 11),
    WalletSize = (UInt32, 12),
    OwnerCount = (UInt32, 13),
    DestinationTag = (UInt32, 14),
    HighQualityIn = (UInt32, 16),
    HighQualityOut = (UInt32, 17),
    LowQualityIn = (UInt32, 18),
    LowQualityOut = (UInt32, 19),
    QualityIn = (UInt32, 20),
    QualityOut = (UInt32, 21),
    StampEscrow = (UInt32, 22),
    BondAmount = (UInt32, 23),
    LoadFee = (UInt32, 24),
    OfferSequence = (UInt32, 25),
    FirstLedgerSequence = (UInt32, 26),
    LastLedgerSequence = (UInt32, 27),
    TransactionIndex = (UInt32, 28),
    OperationLimit = (UInt32, 29),
    ReferenceFeeUnits = (UInt32, 30),
    ReserveBase = (UInt32, 31),
    ReserveIncrement = (UInt32, 32),
    SetFlag = (UInt32, 33),
    ClearFlag = (UInt32, 34),
    SignerQuorum = (UInt32, 35),
    CancelAfter = (UInt32, 36),
    FinishAfter = (UInt32, 37),
    SignerListID = (UInt32, 38),
    SettleDelay = (UInt32, 39),
    TicketCount = (UInt32, 40),
    TicketSequence = (UInt32, 41),

    IndexNext = (UInt64, 1),
    IndexPrevious = (UInt64, 2),
    BookNode = (UInt64, 3),
    OwnerNode = (UInt64, 4),
    BaseFee = (UInt64, 5),
    ExchangeRate = (UInt64, 6),
    LowNode = (UInt64, 7),
    HighNode = (UInt64, 8),
    DestinationNode = (UInt64, 9),

    EmailHash = (Hash128, 1),

    LedgerHash = (Hash256, 1),
    ParentHash = (Hash256, 2),
    TransactionHash = (Hash256, 3),
    AccountHash = (Hash256, 4),
    PreviousTxnID = (Hash256, 5),
    LedgerIndex = (Hash256, 6),
    WalletLocator = (Hash256, 7),
    RootIndex = (Hash256, 8),
    AccountTxnID = (Hash256, 9),
    BookDirectory = (Hash256, 16),
    InvoiceID = (Hash256, 17),
    Nickname = (Hash256, 18),
    Amendment = (Hash256, 19),
    TicketID = (Hash256, 20),
    Digest = (Hash256, 21),
    Channel = (Hash256, 22),
    ConsensusHash = (Hash256, 23),
    CheckID = (Hash256, 24),
    Hash = (Hash256, 257),
    Index = (Hash256, 258),

    Amount = (Amount, 1),
    Balance = (Amount, 2),
    LimitAmount = (Amount, 3),
    TakerPays = (Amount, 4),
    TakerGets = (Amount, 5),
    LowLimit = (Amount, 6),
    HighLimit = (Amount, 7),
    Fee = (Amount, 8),
    SendMax = (Amount, 9),
    DeliverMin = (Amount, 10),
    MinimumOffer = (Amount, 16),
    RippleEscrow = (Amount, 17),
    DeliveredAmount = (Amount, 18),

    PublicKey = (Blob, 1),
    MessageKey = (Blob, 2),
    SigningPubKey = (Blob, 3),
    TxnSignature = (Blob, 4),
    Generator = (Blob, 5),
    Signature = (Blob, 6),
    Domain = (Blob, 7),
    FundCode = (Blob, 8),
    RemoveCode = (Blob, 9),
    ExpireCode = (Blob, 10),
    CreateCode = (Blob, 11),
    MemoType = (Blob, 12),
    MemoData = (Blob, 13),
    MemoFormat = (Blob, 14),
    Fulfillment = (Blob, 16),
    Condition = (Blob, 17),

    Account = (AccountId, 1),
    Owner = (AccountId, 2),
    Destination = (AccountId, 3),
    Issuer = (AccountId, 4),
    Authorize = (AccountId, 5),
    Unauthorize = (AccountId, 6),
    Target = (AccountId, 7),
    RegularKey = (AccountId, 8),

    ObjectEndMarker = (STObject, 1),
    TransactionMetaData = (STObject, 2),
    CreatedNode = (STObject, 3),
    DeletedNode = (STObject, 4),
    ModifiedNode = (STObject, 5),
    PreviousFields = (STObject, 6),
    FinalFields = (STObject, 7),
    NewFields = (STObject, 8),
    TemplateEntry = (STObject, 9),
    Memo = (STObject, 10),
    SignerEntry = (STObject, 11),
    Signer = (STObject, 16),
    Majority = (STObject, 18),

    ArrayEndMarker = (STArray, 1),
    Signers = (STArray, 3),
    SignerEntries = (STArray, 4),
    Template = (STArray, 5),
    Necessary = (STArray, 6),
    Sufficient = (STArray, 7),
    AffectedNodes = (STArray, 8),
    Memos = (STArray, 9),
    Majorities = (STArray, 16),

    CloseResolution = (UInt8, 1),
    Method = (UInt8, 2),
    TransactionResult = (UInt8, 3),
    TickSize = (UInt8, 16),

    TakerPaysCurrency = (Hash160, 1),
    TakerPaysIssuer = (Hash160, 2),
    TakerGetsCurrency = (Hash160, 3),
    TakerGetsIssuer = (Hash160, 4),

    Paths = (PathSet, 1),

    Indexes = (Vector256, 1),
    Hashes = (Vector256, 2),
    Amendments = (Vector256, 3),

    Transaction = (Transaction, 257),
    LedgerEntry = (LedgerEntry, 257),
    Validation = (Validation, 257),
}

impl Field {
    /// The canonical sort key: type id in the high half, field id in the low half.
    pub fn code(&self) -> i32 {
        (self.field_type().id() << 16) | self.nth()
    }

    /// Whether the field is ever written to the wire.
    pub fn is_serialized(&self) -> bool {
        let (t, n) = (self.field_type().id(), self.nth());
        t > 0 && t < 256 && n > 0 && n < 256
    }

    /// Whether the field is part of the payload that a transaction signature covers.
    /// The signature itself must never be hashed into the digest it signs.
    pub fn is_signing_field(&self) -> bool {
        self.is_serialized() && *self != Field::TxnSignature
    }

    pub fn is_length_prefixed(&self) -> bool {
        self.field_type().is_length_prefixed()
    }

    /// The field that closes a value of this field's type, for container types.
    pub fn end_marker(&self) -> Option<Field> {
        match self.field_type() {
            Type::STObject => Some(Field::ObjectEndMarker),
            Type::STArray => Some(Field::ArrayEndMarker),
            _ => None,
        }
    }

    /// Encodes the (type, field) pair into its 1 to 3 byte header.
    /// Values below 16 share a byte as nibbles; larger ones are escaped by a zero nibble and follow in full.
    /// Fields that never reach the wire have no header.
    pub fn header(&self) -> Option<Vec<u8>> {
        if !self.is_serialized() {
            return None;
        }
        let t = u8::try_from(self.field_type().id()).ok()?;
        let n = u8::try_from(self.nth()).ok()?;
        Some(match (t < 16, n < 16) {
            (true, true) => vec![(t << 4) | n],
            (true, false) => vec![t << 4, n],
            (false, true) => vec![n, t],
            (false, false) => vec![0, t, n],
        })
    }

    pub fn by_code(code: i32) -> Option<Field> {
        REGISTRY.by_code.get(&code).copied()
    }

    pub fn by_name(name: &str) -> Option<Field> {
        REGISTRY.by_name.get(name).copied()
    }
}

impl PartialOrd for Field {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders fields canonically, by combined code.
impl Ord for Field {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(&other.code())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct Registry {
    by_code: HashMap<i32, Field>,
    by_name: HashMap<&'static str, Field>,
}

lazy_static! {
    static ref REGISTRY: Registry = {
        if let Err(err) = check_presorted(ALL_FIELDS) {
            panic!("field registry is corrupt: {}", err);
        }
        debug!("field registry initialized with {} fields", ALL_FIELDS.len());
        Registry {
            by_code: ALL_FIELDS.iter().map(|f| (f.code(), *f)).collect(),
            by_name: ALL_FIELDS.iter().map(|f| (f.name(), *f)).collect(),
        }
    };
}

/// Verifies the compiled-in field table and builds the lookup tables.
/// Calling this at startup surfaces a miscoded table as an error instead of a panic on first use.
pub fn check_registry() -> Result<(), RegistryError> {
    check_presorted(ALL_FIELDS)?;
    lazy_static::initialize(&REGISTRY);
    Ok(())
}

fn check_presorted(fields: &[Field]) -> Result<(), RegistryError> {
    for pair in fields.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        match prev.code().cmp(&cur.code()) {
            Ordering::Less => {}
            Ordering::Equal => return Err(RegistryError::Duplicate(prev.name(), cur.name())),
            Ordering::Greater => {
                return Err(RegistryError::NotPresorted {
                    previous: prev.name(),
                    previous_code: prev.code(),
                    current: cur.name(),
                    current_code: cur.code(),
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_presorted() {
        assert_eq!(check_registry(), Ok(()));
    }

    #[test]
    fn misordered_table_is_rejected() {
        let err = check_presorted(&[Field::Sequence, Field::Flags]).unwrap_err();
        assert!(matches!(err, RegistryError::NotPresorted { .. }));
        let err = check_presorted(&[Field::Fee, Field::Fee]).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("Fee", "Fee"));
    }

    #[test]
    fn lookup() {
        assert_eq!(Field::by_name("Account"), Some(Field::Account));
        assert_eq!(Field::by_code((8 << 16) | 1), Some(Field::Account));
        assert_eq!(Field::by_code((8 << 16) | 99), None);
        assert_eq!(Field::by_name("Nope"), None);
        for f in ALL_FIELDS {
            assert_eq!(Field::by_code(f.code()), Some(*f));
            assert_eq!(Field::by_name(f.name()), Some(*f));
        }
    }

    #[test]
    fn flags() {
        assert!(Field::Account.is_serialized());
        assert!(Field::Account.is_length_prefixed());
        assert!(!Field::Hash.is_serialized());
        assert!(!Field::Index.is_serialized());
        assert!(!Field::Transaction.is_serialized());
        assert!(Field::TxnSignature.is_serialized());
        assert!(!Field::TxnSignature.is_signing_field());
        assert!(Field::SigningPubKey.is_signing_field());
        assert!(Field::Indexes.is_length_prefixed());
        assert!(!Field::Paths.is_length_prefixed());
        assert_eq!(Field::Memo.end_marker(), Some(Field::ObjectEndMarker));
        assert_eq!(Field::Memos.end_marker(), Some(Field::ArrayEndMarker));
        assert_eq!(Field::Fee.end_marker(), None);
    }

    #[test]
    fn headers() {
        assert_eq!(Field::TransactionType.header(), Some(vec![0x12]));
        assert_eq!(Field::Flags.header(), Some(vec![0x22]));
        assert_eq!(Field::Fee.header(), Some(vec![0x68]));
        assert_eq!(Field::ObjectEndMarker.header(), Some(vec![0xe1]));
        assert_eq!(Field::ArrayEndMarker.header(), Some(vec![0xf1]));
        assert_eq!(Field::LastLedgerSequence.header(), Some(vec![0x20, 0x1b]));
        assert_eq!(Field::TransactionResult.header(), Some(vec![0x03, 0x10]));
        assert_eq!(Field::TickSize.header(), Some(vec![0x00, 0x10, 0x10]));
    }

    #[test]
    fn meta_fields_have_no_header() {
        assert_eq!(Field::Hash.header(), None);
        assert_eq!(Field::Index.header(), None);
        assert_ne!(Field::LedgerHash.header(), None);
    }

    #[test]
    fn canonical_order() {
        assert!(Field::TransactionType < Field::Flags);
        assert!(Field::Fee < Field::SigningPubKey);
        assert!(Field::Memos < Field::TransactionResult);
    }
}
