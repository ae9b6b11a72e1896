// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! Canonical binary encoding of ledger objects and transactions,
//! together with the hashing and signing envelope built on top of it.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod data;
pub mod protocol;
