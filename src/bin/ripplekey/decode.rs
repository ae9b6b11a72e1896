// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use clap::Parser;

use ripplers::codec::{decode_hex, SerializedType};
use ripplers::data::STObject;

use crate::CliError;

/// Decode a hex wire blob into JSON
#[derive(Parser)]
pub struct DecodeCmd {
    /// Hex encoded object
    blob: String,
}

impl DecodeCmd {
    pub fn entrypoint(&self) -> Result<(), CliError> {
        let obj: STObject = decode_hex(self.blob.trim())?;
        println!("{}", serde_json::to_string_pretty(&obj.to_json())?);
        Ok(())
    }
}
