// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod basics;
pub mod ledger;
pub mod starray;
pub mod stobject;
pub mod transactions;
pub mod value;

pub use starray::*;
pub use stobject::*;
pub use value::*;
