// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use tracing::{debug, trace, warn};

use super::*;
use crate::codec::{decode_hex, BytesList, BytesSink, Field, MultiSink, SerializedType};
use crate::crypto::{self, HalfSha512, Hash256, KeyPair};
use crate::data::basics::{Amount, Blob};
use crate::protocol::HashPrefix;

/// Where a signed transaction stands in the signing pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigningState {
    Unsigned,
    HashPrepared,
    Signed,
}

/// Wraps a transaction together with the hashes and wire blob derived from it.
///
/// Preparing fills in the fee, sequence, last valid ledger and signing key and computes the
/// signing hash. Signing embeds the signature and serializes the whole transaction once,
/// producing the wire blob and the transaction id in the same pass.
/// If a transaction is prepared again without any signing field changing,
/// the existing signature is kept instead of signing again.
#[derive(Clone, Debug)]
pub struct SignedTransaction {
    tx: Transaction,
    signing_hash: Option<Hash256>,
    previous_signing_hash: Option<Hash256>,
    hash: Option<Hash256>,
    tx_blob: Option<String>,
}

impl SignedTransaction {
    pub fn new(tx: Transaction) -> Self {
        SignedTransaction {
            tx,
            signing_hash: None,
            previous_signing_hash: None,
            hash: None,
            tx_blob: None,
        }
    }

    /// Re-hydrates a signed transaction from its hex wire blob.
    pub fn from_blob(hex: &str) -> Result<Self, SigningError> {
        let tx: Transaction = decode_hex(hex)?;
        let signing_hash = tx.signing_hash()?;
        let signed = tx.has(Field::TxnSignature);
        let mut out = SignedTransaction::new(tx);
        out.signing_hash = Some(signing_hash);
        if signed {
            out.previous_signing_hash = Some(signing_hash);
            out.hash = Some(out.tx.id()?);
            out.tx_blob = Some(out.tx.to_hex()?);
        }
        Ok(out)
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// Mutable access to the transaction. Derived hashes and the blob are dropped,
    /// the transaction has to be prepared and signed again.
    pub fn transaction_mut(&mut self) -> &mut Transaction {
        self.signing_hash = None;
        self.hash = None;
        self.tx_blob = None;
        &mut self.tx
    }

    pub fn into_transaction(self) -> Transaction {
        self.tx
    }

    pub fn state(&self) -> SigningState {
        match (&self.signing_hash, &self.tx_blob) {
            (None, _) => SigningState::Unsigned,
            (Some(_), None) => SigningState::HashPrepared,
            (Some(_), Some(_)) => SigningState::Signed,
        }
    }

    pub fn signing_hash(&self) -> Option<Hash256> {
        self.signing_hash
    }

    /// The transaction id, once signed.
    pub fn hash(&self) -> Option<Hash256> {
        self.hash
    }

    /// The hex wire blob, once signed.
    pub fn tx_blob(&self) -> Option<&str> {
        self.tx_blob.as_deref()
    }

    /// Prepares and signs in one step.
    pub fn prepare(
        &mut self,
        key: &dyn KeyPair,
        fee: Amount,
        sequence: u32,
        last_ledger_sequence: Option<u32>,
    ) -> Result<(), SigningError> {
        self.prepare_signing_hash(key.public_key(), fee, sequence, last_ledger_sequence)?;
        self.sign(key)
    }

    /// Fills in the envelope fields and computes the signing hash.
    /// Without `last_ledger_sequence` an existing `LastLedgerSequence` is left untouched.
    pub fn prepare_signing_hash(
        &mut self,
        public_key: Vec<u8>,
        fee: Amount,
        sequence: u32,
        last_ledger_sequence: Option<u32>,
    ) -> Result<Hash256, SigningError> {
        if !fee.is_native() {
            return Err(SigningError::NonNativeFee(fee));
        }
        let tx = self.transaction_mut();
        tx.put(Field::Fee, fee)?;
        tx.put(Field::Sequence, sequence)?;
        if let Some(lls) = last_ledger_sequence {
            tx.put(Field::LastLedgerSequence, lls)?;
        }
        tx.put(Field::SigningPubKey, Blob(public_key))?;

        let signing_hash = self.tx.signing_hash()?;
        trace!(%signing_hash, sequence, "prepared signing hash");
        self.signing_hash = Some(signing_hash);
        Ok(signing_hash)
    }

    /// Signs the prepared signing hash, unless the current signature already covers it,
    /// then computes the wire blob and transaction id.
    /// A signer failure forces the next attempt to sign afresh.
    pub fn sign(&mut self, key: &dyn KeyPair) -> Result<(), SigningError> {
        let signing_hash = self.signing_hash.ok_or(SigningError::NotPrepared)?;

        let reuse =
            self.previous_signing_hash == Some(signing_hash) && self.tx.has(Field::TxnSignature);
        if reuse {
            debug!(%signing_hash, "signing hash unchanged, keeping signature");
        } else {
            match key.sign(&signing_hash) {
                Ok(signature) => {
                    self.tx.put(Field::TxnSignature, Blob(signature))?;
                }
                Err(err) => {
                    warn!(%signing_hash, %err, "signer failed");
                    // the old signature covers a different signing hash
                    self.tx.remove(Field::TxnSignature);
                    self.previous_signing_hash = None;
                    self.hash = None;
                    self.tx_blob = None;
                    return Err(err.into());
                }
            }
            debug!(%signing_hash, "signed transaction");
        }
        self.previous_signing_hash = Some(signing_hash);

        let mut blob = BytesList::new();
        let mut id = HalfSha512::prefixed(HashPrefix::TransactionId);
        {
            let mut sink = MultiSink::new(vec![&mut blob as &mut dyn BytesSink, &mut id]);
            self.tx.to_bytes_sink(&mut sink)?;
        }
        let hash = id.finish();
        debug!(%hash, len = blob.len(), "serialized signed transaction");
        self.hash = Some(hash);
        self.tx_blob = Some(blob.to_hex());
        Ok(())
    }

    /// Checks `TxnSignature` against `SigningPubKey` over a freshly computed signing hash.
    pub fn verify_signature(&self) -> Result<bool, SigningError> {
        let public_key = self
            .tx
            .get_blob(Field::SigningPubKey)
            .ok_or(SigningError::MissingField(Field::SigningPubKey))?;
        let signature = self
            .tx
            .get_blob(Field::TxnSignature)
            .ok_or(SigningError::MissingField(Field::TxnSignature))?;
        let signing_hash = self.tx.signing_hash()?;
        Ok(crypto::verify(&public_key.0, &signing_hash, &signature.0)?)
    }
}
