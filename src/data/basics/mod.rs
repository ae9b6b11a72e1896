// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod address;
pub mod blob;
pub mod currency;
pub mod pathset;
pub mod uint;
pub mod units;

pub use address::*;
pub use blob::*;
pub use currency::*;
pub use pathset::*;
pub use units::*;
