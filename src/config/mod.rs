// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod keyfile;

use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current version of the defaults, stored in every saved config.
pub const CONFIG_VERSION: u32 = 1;

// Filenames of config files within the configdir (e.g. ~/.ripplers)

const CONFIG_FILENAME: &str = "ripplers.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading/writing configuration failed")]
    IoError(#[from] io::Error),
    #[error("JSON (de)serialization failed")]
    SerializationError(#[from] serde_json::Error),
    #[error("path {0:?} is not valid unicode")]
    InvalidPath(PathBuf),
    #[error("cannot expand path")]
    ExpandError(#[from] shellexpand::LookupError<std::env::VarError>),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Local holds the settings of one installation of the tools.
/// Fields missing from a config file keep their default value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Local {
    /// Version of the defaults this config was written with.
    pub version: u32,

    /// Fee in drops used when signing without an explicit fee.
    pub fee_drops: u64,

    /// How many ledgers past the current one a transaction stays valid.
    pub last_ledger_offset: u32,

    /// Default key file; `~` and environment variables are expanded.
    pub key_file: String,

    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for Local {
    fn default() -> Self {
        Local {
            version: CONFIG_VERSION,
            fee_drops: 12,
            last_ledger_offset: 4,
            key_file: "~/.ripplers/default.seed".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl Local {
    pub fn load_from_disk(root: &impl AsRef<Path>) -> Result<Self> {
        Self::load_from_file(&root.as_ref().join(CONFIG_FILENAME))
    }

    pub fn load_from_file(file: &impl AsRef<Path>) -> Result<Self> {
        let mut c = Self::default();
        c.merge_from_file(file)?;
        Ok(c)
    }

    /// Like `load_from_disk`, but a missing config file yields the defaults.
    pub fn load_or_default(root: &impl AsRef<Path>) -> Result<Self> {
        match Self::load_from_disk(root) {
            Err(ConfigError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            res => res,
        }
    }

    fn merge_from_file(&mut self, full_path: &impl AsRef<Path>) -> Result<()> {
        let content = fs::read_to_string(full_path)?;
        self.load(&content)?;
        Ok(())
    }

    fn load(&mut self, content: &str) -> serde_json::Result<()> {
        *self = serde_json::from_str(content)?;
        Ok(())
    }

    pub fn save_to_disk(&self, root: &impl AsRef<Path>) -> Result<()> {
        let configpath = root.as_ref().join(CONFIG_FILENAME);
        self.save_to_file(&expand_path(&configpath)?)
    }

    pub fn save_to_file(&self, filename: &impl AsRef<Path>) -> Result<()> {
        let mut f = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(filename)?;
        serde_json::to_writer_pretty(&mut f, self)?;
        Ok(())
    }

    /// The configured key file with `~` and environment variables expanded.
    pub fn key_file_path(&self) -> Result<PathBuf> {
        expand_path(Path::new(&self.key_file))
    }
}

/// Expands `~` and `$VAR` references in a path.
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let s = path
        .to_str()
        .ok_or_else(|| ConfigError::InvalidPath(path.to_owned()))?;
    Ok(PathBuf::from(shellexpand::full(s)?.into_owned()))
}

/// Retrieves the default directory for config and key files.
/// By default we store these in ~/.ripplers/.
pub fn get_default_config_dir() -> io::Result<PathBuf> {
    match dirs::home_dir() {
        Some(home_dir) => Ok(Path::new(&home_dir).join(".ripplers")),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "current user has no home directory",
        )),
    }
}
