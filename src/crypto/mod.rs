// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod hashable;
pub mod keys;

pub use hashable::*;
pub use keys::*;
