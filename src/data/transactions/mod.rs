// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod errors;
pub mod format;
pub mod meta;
pub mod signed_tx;
pub mod transaction;

#[cfg(test)]
pub mod tests;

pub use errors::*;
pub use format::*;
pub use meta::*;
pub use signed_tx::*;
pub use transaction::*;
