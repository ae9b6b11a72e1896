// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod index;
pub mod ledger_entry;

pub use ledger_entry::*;
