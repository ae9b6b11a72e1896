// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fmt;

/// A wire-level value kind.
/// The set is closed and ids are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    UInt16,
    UInt32,
    UInt64,
    Hash128,
    Hash256,
    Amount,
    Blob,
    AccountId,
    STObject,
    STArray,
    UInt8,
    Hash160,
    PathSet,
    Vector256,

    // Top-level containers, never nested inside another object.
    Transaction,
    LedgerEntry,
    Validation,
}

impl Type {
    pub const ALL: &'static [Type] = &[
        Type::UInt16,
        Type::UInt32,
        Type::UInt64,
        Type::Hash128,
        Type::Hash256,
        Type::Amount,
        Type::Blob,
        Type::AccountId,
        Type::STObject,
        Type::STArray,
        Type::UInt8,
        Type::Hash160,
        Type::PathSet,
        Type::Vector256,
        Type::Transaction,
        Type::LedgerEntry,
        Type::Validation,
    ];

    pub fn id(&self) -> i32 {
        match self {
            Type::UInt16 => 1,
            Type::UInt32 => 2,
            Type::UInt64 => 3,
            Type::Hash128 => 4,
            Type::Hash256 => 5,
            Type::Amount => 6,
            Type::Blob => 7,
            Type::AccountId => 8,
            Type::STObject => 14,
            Type::STArray => 15,
            Type::UInt8 => 16,
            Type::Hash160 => 17,
            Type::PathSet => 18,
            Type::Vector256 => 19,
            Type::Transaction => 10001,
            Type::LedgerEntry => 10002,
            Type::Validation => 10003,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::UInt16 => "UInt16",
            Type::UInt32 => "UInt32",
            Type::UInt64 => "UInt64",
            Type::Hash128 => "Hash128",
            Type::Hash256 => "Hash256",
            Type::Amount => "Amount",
            Type::Blob => "Blob",
            Type::AccountId => "AccountID",
            Type::STObject => "STObject",
            Type::STArray => "STArray",
            Type::UInt8 => "UInt8",
            Type::Hash160 => "Hash160",
            Type::PathSet => "PathSet",
            Type::Vector256 => "Vector256",
            Type::Transaction => "Transaction",
            Type::LedgerEntry => "LedgerEntry",
            Type::Validation => "Validation",
        }
    }

    pub fn by_id(id: i32) -> Option<Type> {
        Type::ALL.iter().find(|t| t.id() == id).copied()
    }

    pub fn by_name(name: &str) -> Option<Type> {
        Type::ALL.iter().find(|t| t.name() == name).copied()
    }

    /// Whether values of this type are preceded by a length prefix on the wire.
    pub fn is_length_prefixed(&self) -> bool {
        matches!(self, Type::Blob | Type::AccountId | Type::Vector256)
    }

    /// Whether values of this type are closed by an end marker on the wire.
    pub fn is_container(&self) -> bool {
        matches!(self, Type::STObject | Type::STArray)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
