// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::convert::TryFrom;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use tracing::debug;

use ripplers::codec::SerializedType;
use ripplers::config::{keyfile, Local};
use ripplers::crypto::Ed25519KeyPair;
use ripplers::data::basics::Amount;
use ripplers::data::transactions::{SignedTransaction, Transaction};

use crate::CliError;

/// Sign a JSON transaction
#[derive(Parser)]
pub struct SignCmd {
    /// Seed filename (default: key_file from the config)
    #[clap(short = 'f', long = "keyfile")]
    sk_file: Option<PathBuf>,
    /// Transaction input filename
    #[clap(short = 't', long = "txfile")]
    tx_file: PathBuf,
    /// Account sequence number
    #[clap(short = 's', long = "sequence")]
    sequence: u32,
    /// Fee in drops (default: fee_drops from the config)
    #[clap(long = "fee")]
    fee: Option<i64>,
    /// Current ledger; the transaction expires last_ledger_offset ledgers later
    #[clap(short = 'l', long = "ledger")]
    ledger: Option<u32>,
    /// Output filename (default: stdout)
    #[clap(short = 'o', long = "outfile")]
    out_file: Option<PathBuf>,
}

impl SignCmd {
    pub fn entrypoint(&self, cfg: &Local) -> Result<(), CliError> {
        let sk_file = match &self.sk_file {
            Some(p) => p.clone(),
            None => cfg.key_file_path()?,
        };
        let key = Ed25519KeyPair::from_seed(&keyfile::load_seed(&sk_file)?)?;

        let content = fs::read_to_string(&self.tx_file)?;
        let tx = Transaction::from_json(&serde_json::from_str(&content)?)?;

        let drops = match self.fee {
            Some(f) => f,
            None => i64::try_from(cfg.fee_drops)
                .map_err(|_| CliError::Usage(format!("fee_drops {} too large", cfg.fee_drops)))?,
        };
        let fee = Amount::from_drops(drops)?;
        let last_ledger = match self.ledger {
            Some(l) => Some(l.checked_add(cfg.last_ledger_offset).ok_or_else(|| {
                CliError::Usage(format!("ledger {} too large", l))
            })?),
            None => None,
        };

        let mut stx = SignedTransaction::new(tx);
        stx.prepare(&key, fee, self.sequence, last_ledger)?;
        debug!(hash = ?stx.hash(), "signed transaction");

        let out = json!({
            "tx_blob": stx.tx_blob(),
            "hash": stx.hash().map(|h| h.to_string()),
            "signing_hash": stx.signing_hash().map(|h| h.to_string()),
            "tx_json": stx.transaction().to_json(),
        });
        let out = serde_json::to_string_pretty(&out)?;
        match &self.out_file {
            Some(path) => fs::write(path, out)?,
            None => println!("{}", out),
        }
        Ok(())
    }
}
