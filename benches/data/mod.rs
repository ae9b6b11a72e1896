// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

mod ledger;
mod signing;

pub use ledger::*;
pub use signing::*;
