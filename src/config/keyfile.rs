// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fs;
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use data_encoding::HEXLOWER_PERMISSIVE;
use ed25519_dalek::SECRET_KEY_LENGTH;

use super::{ConfigError, Result};

/// Gives the seed filename that corresponds to the given account name.
pub fn seed_filename(account: &str) -> String {
    format!("{}.seed", account)
}

/// Returns true iff the given filename is the seed file of the given account name.
pub fn matches_seed_filename(account: &str, filename: &str) -> bool {
    seed_filename(account) == filename
}

/// Returns the account name given a seed filename.
///
/// If filename is not a valid seed filename, this returns None.
pub fn account_name_from_seed_filename(filename: &str) -> Option<&str> {
    filename
        .strip_suffix(".seed")
        .filter(|name| !name.is_empty())
}

/// Reads a hex encoded 32-byte seed; surrounding whitespace is ignored.
pub fn load_seed(path: &impl AsRef<Path>) -> Result<[u8; SECRET_KEY_LENGTH]> {
    let content = fs::read_to_string(path)?;
    let bytes = HEXLOWER_PERMISSIVE
        .decode(content.trim().as_bytes())
        .map_err(|e| invalid_seed(e.to_string()))?;
    let mut seed = [0; SECRET_KEY_LENGTH];
    if bytes.len() != seed.len() {
        return Err(invalid_seed(format!(
            "expected {} bytes, found {}",
            SECRET_KEY_LENGTH,
            bytes.len()
        )));
    }
    seed.copy_from_slice(&bytes);
    Ok(seed)
}

/// Writes a seed as lowercase hex, readable only by the owner.
/// Refuses to overwrite an existing file.
pub fn save_seed(path: &impl AsRef<Path>, seed: &[u8; SECRET_KEY_LENGTH]) -> Result<()> {
    if let Some(dir) = path.as_ref().parent() {
        fs::create_dir_all(dir)?;
    }
    let mut f = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;
    writeln!(f, "{}", HEXLOWER_PERMISSIVE.encode(seed))?;
    Ok(())
}

fn invalid_seed(reason: String) -> ConfigError {
    ConfigError::IoError(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("invalid seed file: {}", reason),
    ))
}
