// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::path::PathBuf;

use clap::Parser;
use data_encoding::HEXUPPER;
use tracing::info;

use ripplers::config::{keyfile, Local};
use ripplers::crypto::{Ed25519KeyPair, KeyPair};

use crate::CliError;

/// Generate a new Ed25519 seed file
#[derive(Parser)]
pub struct GenerateCmd {
    /// Seed filename (default: key_file from the config)
    #[clap(short = 'f', long = "keyfile")]
    sk_file: Option<PathBuf>,
}

impl GenerateCmd {
    pub fn entrypoint(&self, cfg: &Local) -> Result<(), CliError> {
        let path = match &self.sk_file {
            Some(p) => p.clone(),
            None => cfg.key_file_path()?,
        };

        let (key, seed) = Ed25519KeyPair::generate();
        keyfile::save_seed(&path, &seed)?;
        info!(path = %path.display(), "wrote seed file");

        println!("Public key: {}", HEXUPPER.encode(&key.public_key()));
        Ok(())
    }
}
