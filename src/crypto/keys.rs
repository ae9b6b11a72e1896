// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::convert::TryFrom;
use std::fmt;

use ed25519::Signature;
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer, Verifier, SECRET_KEY_LENGTH};
use thiserror::Error;

use super::Hash256;

/// Leading byte marking a 33-byte public key as Ed25519.
pub const ED25519_KEY_PREFIX: u8 = 0xed;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid key material: {0}")]
    InvalidKey(String),
    #[error("unsupported key type (leading byte {0:#04x})")]
    UnsupportedKeyType(u8),
    #[error("signing failed: {0}")]
    SigningFailed(String),
}

/// The signing primitive the codec depends on: a public key to embed,
/// and a signature over a 256-bit digest.
pub trait KeyPair {
    /// The public key as it appears in the `SigningPubKey` field.
    fn public_key(&self) -> Vec<u8>;

    fn sign(&self, digest: &Hash256) -> Result<Vec<u8>, KeyError>;
}

/// An Ed25519 key pair, derived from a 32-byte seed.
pub struct Ed25519KeyPair {
    keypair: Keypair,
}

impl Ed25519KeyPair {
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Result<Self, KeyError> {
        let secret =
            SecretKey::from_bytes(seed).map_err(|e| KeyError::InvalidKey(e.to_string()))?;
        let public = PublicKey::from(&secret);
        Ok(Ed25519KeyPair {
            keypair: Keypair { secret, public },
        })
    }

    /// Generates a fresh key pair, returning it together with its seed.
    pub fn generate() -> (Self, [u8; SECRET_KEY_LENGTH]) {
        let mut csprng = rand::rngs::OsRng {};
        let keypair = Keypair::generate(&mut csprng);
        let seed = keypair.secret.to_bytes();
        (Ed25519KeyPair { keypair }, seed)
    }
}

impl KeyPair for Ed25519KeyPair {
    fn public_key(&self) -> Vec<u8> {
        let mut pk = vec![ED25519_KEY_PREFIX];
        pk.extend_from_slice(self.keypair.public.as_bytes());
        pk
    }

    fn sign(&self, digest: &Hash256) -> Result<Vec<u8>, KeyError> {
        let sig = self
            .keypair
            .try_sign(&digest.0)
            .map_err(|e| KeyError::SigningFailed(e.to_string()))?;
        Ok(sig.to_bytes().to_vec())
    }
}

impl fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519KeyPair({:02X?})", self.keypair.public.as_bytes())
    }
}

/// Checks a signature over a digest against a public key in its `SigningPubKey` form.
pub fn verify(public_key: &[u8], digest: &Hash256, signature: &[u8]) -> Result<bool, KeyError> {
    match public_key.first() {
        Some(&ED25519_KEY_PREFIX) if public_key.len() == 33 => {
            let pk = PublicKey::from_bytes(&public_key[1..])
                .map_err(|e| KeyError::InvalidKey(e.to_string()))?;
            let sig = match Signature::try_from(signature) {
                Ok(sig) => sig,
                Err(_) => return Ok(false),
            };
            Ok(pk.verify(&digest.0, &sig).is_ok())
        }
        Some(&b) => Err(KeyError::UnsupportedKeyType(b)),
        None => Err(KeyError::InvalidKey("empty public key".to_owned())),
    }
}
