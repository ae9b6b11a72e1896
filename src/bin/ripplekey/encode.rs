// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use ripplers::codec::SerializedType;
use ripplers::data::STObject;

use crate::CliError;

/// Encode a JSON object into a hex wire blob
#[derive(Parser)]
pub struct EncodeCmd {
    /// JSON input filename
    #[clap(short = 'i', long = "infile")]
    in_file: PathBuf,
}

impl EncodeCmd {
    pub fn entrypoint(&self) -> Result<(), CliError> {
        let content = fs::read_to_string(&self.in_file)?;
        let json: serde_json::Value = serde_json::from_str(&content)?;
        let obj = STObject::from_json(&json)?;
        println!("{}", obj.to_hex()?);
        Ok(())
    }
}
