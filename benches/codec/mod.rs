// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

mod amount;
mod stobject;

pub use amount::*;
pub use stobject::*;
