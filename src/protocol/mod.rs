// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

#[macro_use]
mod macros;

mod engine_result;
mod hash;
mod ledger_entry_type;
mod txtype;

pub use engine_result::*;
pub use hash::*;
pub use ledger_entry_type::*;
pub use txtype::*;
