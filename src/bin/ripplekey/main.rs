// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

mod decode;
mod encode;
mod generate;
mod sign;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use thiserror::Error;
use tracing::Level;

use ripplers::codec::CodecError;
use ripplers::config::{self, ConfigError, Local};
use ripplers::crypto::KeyError;
use ripplers::data::basics::AmountError;
use ripplers::data::transactions::{FormatError, SigningError};

use decode::DecodeCmd;
use encode::EncodeCmd;
use generate::GenerateCmd;
use sign::SignCmd;

/// CLI for managing XRP Ledger keys and wire blobs
#[derive(Parser)]
#[clap(name = "ripplekey", version = "0.1")]
#[clap(author = "Quentin M. Kniep <hello@quentinkniep.com>")]
#[clap(arg_required_else_help = true)]
struct RootCmd {
    /// Config directory (default: ~/.ripplers)
    #[clap(short = 'd', long = "configdir")]
    config_dir: Option<PathBuf>,
    /// Verbose logging, repeat for more
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[clap(subcommand)]
    subcmd: SubCmd,
}

#[derive(Subcommand)]
enum SubCmd {
    Generate(GenerateCmd),
    Encode(EncodeCmd),
    Decode(DecodeCmd),
    Sign(SignCmd),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),
    #[error("{0}")]
    Usage(String),
}

fn load_config(dir: &Option<PathBuf>) -> Result<Local, CliError> {
    let dir = match dir {
        Some(d) => d.clone(),
        None => config::get_default_config_dir()?,
    };
    Ok(Local::load_or_default(&dir)?)
}

fn main() {
    let cmd: RootCmd = RootCmd::parse();

    let cfg = match load_config(&cmd.config_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[Error] Could not load config: {}", e);
            process::exit(1);
        }
    };

    let level = match cmd.verbose {
        0 => cfg.log_level.parse().unwrap_or(Level::INFO),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let res = match cmd.subcmd {
        SubCmd::Generate(g) => g.entrypoint(&cfg),
        SubCmd::Encode(e) => e.entrypoint(),
        SubCmd::Decode(d) => d.entrypoint(),
        SubCmd::Sign(s) => s.entrypoint(&cfg),
    };
    if let Err(e) = res {
        eprintln!("[Error] {}", e);
        process::exit(1);
    }
}
