// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::cell::Cell;

use data_encoding::HEXUPPER;
use rand::{thread_rng, RngCore};

use super::*;
use crate::codec::{decode, CodecError, Field, SerializedType};
use crate::crypto::{sha512_half, Ed25519KeyPair, Hash256, KeyError, KeyPair};
use crate::data::basics::{AccountId, Amount, Blob};
use crate::protocol::{HashPrefix, TransactionType};

/// Counts how often it is asked to sign.
struct CountingSigner {
    inner: Ed25519KeyPair,
    count: Cell<usize>,
}

impl CountingSigner {
    fn new() -> Self {
        CountingSigner {
            inner: Ed25519KeyPair::from_seed(&[1; 32]).unwrap(),
            count: Cell::new(0),
        }
    }
}

impl KeyPair for CountingSigner {
    fn public_key(&self) -> Vec<u8> {
        self.inner.public_key()
    }

    fn sign(&self, digest: &Hash256) -> Result<Vec<u8>, KeyError> {
        self.count.set(self.count.get() + 1);
        self.inner.sign(digest)
    }
}

/// Shares the public key of `CountingSigner` but never produces a signature.
struct FailingSigner(Vec<u8>);

impl KeyPair for FailingSigner {
    fn public_key(&self) -> Vec<u8> {
        self.0.clone()
    }

    fn sign(&self, _digest: &Hash256) -> Result<Vec<u8>, KeyError> {
        Err(KeyError::SigningFailed("device disconnected".to_owned()))
    }
}

fn payment() -> Transaction {
    let mut tx = Transaction::new(TransactionType::Payment);
    tx.put(Field::Account, AccountId([0x0a; 20])).unwrap();
    tx.put(Field::Destination, AccountId([0x0b; 20])).unwrap();
    tx.put(Field::Amount, Amount::Native(25_000_000)).unwrap();
    tx
}

fn random_memo() -> Blob {
    let mut data = [0; 16];
    thread_rng().fill_bytes(&mut data);
    Blob(data.to_vec())
}

#[test]
fn prepare_fills_envelope() {
    let key = CountingSigner::new();
    let mut stx = SignedTransaction::new(payment());
    assert_eq!(stx.state(), SigningState::Unsigned);

    stx.prepare(&key, Amount::Native(12), 7, Some(100)).unwrap();
    assert_eq!(stx.state(), SigningState::Signed);

    let tx = stx.transaction();
    assert_eq!(tx.fee(), Some(Amount::Native(12)));
    assert_eq!(tx.sequence(), Some(7));
    assert_eq!(tx.get_u32(Field::LastLedgerSequence), Some(100));
    assert_eq!(tx.get_blob(Field::SigningPubKey).unwrap().0, key.public_key());
    assert_eq!(tx.get_blob(Field::TxnSignature).map(Blob::len), Some(64));
    assert_eq!(tx.check_format(), Ok(()));
    assert!(stx.verify_signature().unwrap());
}

#[test]
fn signing_is_idempotent() {
    let key = CountingSigner::new();
    let mut stx = SignedTransaction::new(payment());

    stx.prepare(&key, Amount::Native(12), 1, None).unwrap();
    let signature = stx.transaction().get_blob(Field::TxnSignature).cloned();
    let hash = stx.hash();
    let blob = stx.tx_blob().map(str::to_owned);

    stx.prepare(&key, Amount::Native(12), 1, None).unwrap();
    assert_eq!(key.count.get(), 1);
    assert_eq!(stx.transaction().get_blob(Field::TxnSignature).cloned(), signature);
    assert_eq!(stx.hash(), hash);
    assert_eq!(stx.tx_blob().map(str::to_owned), blob);
}

#[test]
fn changing_sequence_signs_again() {
    let key = CountingSigner::new();
    let mut stx = SignedTransaction::new(payment());

    stx.prepare(&key, Amount::Native(12), 1, None).unwrap();
    let first_signing_hash = stx.signing_hash();
    let first_hash = stx.hash();

    stx.prepare(&key, Amount::Native(12), 2, None).unwrap();
    assert_eq!(key.count.get(), 2);
    assert_ne!(stx.signing_hash(), first_signing_hash);
    assert_ne!(stx.hash(), first_hash);
    assert!(stx.verify_signature().unwrap());
}

#[test]
fn signature_is_not_part_of_signing_hash() {
    let mut tx = payment();
    tx.put(Field::Sequence, 3u32).unwrap();
    let before = tx.signing_hash().unwrap();
    tx.put(Field::TxnSignature, Blob(vec![0; 64])).unwrap();
    assert_eq!(tx.signing_hash().unwrap(), before);

    // but it is part of the id
    let unsigned_id = {
        let mut t = tx.clone();
        t.remove(Field::TxnSignature);
        t.id().unwrap()
    };
    assert_ne!(tx.id().unwrap(), unsigned_id);
}

#[test]
fn memos_are_signed() {
    let mut tx = payment();
    let before = tx.signing_hash().unwrap();
    let mut memo = crate::data::STObject::new();
    memo.put(Field::MemoData, random_memo()).unwrap();
    let mut memos = crate::data::STArray::new();
    memos.push(crate::data::ArrayEntry::new(Field::Memo, memo).unwrap());
    tx.put(Field::Memos, memos).unwrap();
    assert_ne!(tx.signing_hash().unwrap(), before);
}

#[test]
fn signer_failure_is_reported() {
    let key = CountingSigner::new();
    let failing = FailingSigner(key.public_key());
    let mut stx = SignedTransaction::new(payment());

    stx.prepare(&key, Amount::Native(12), 1, None).unwrap();
    assert_eq!(key.count.get(), 1);

    let err = stx
        .prepare(&failing, Amount::Native(12), 2, None)
        .unwrap_err();
    assert_eq!(
        err,
        SigningError::Key(KeyError::SigningFailed("device disconnected".to_owned()))
    );
    assert_eq!(stx.state(), SigningState::HashPrepared);
    assert_eq!(stx.tx_blob(), None);
    assert_eq!(stx.hash(), None);
    assert!(!stx.transaction().has(Field::TxnSignature));
    assert_eq!(
        stx.verify_signature(),
        Err(SigningError::MissingField(Field::TxnSignature))
    );
    let unsigned: Transaction = decode(&stx.transaction().to_bytes().unwrap()).unwrap();
    assert!(!unsigned.has(Field::TxnSignature));
    assert_eq!(unsigned.get_u32(Field::Sequence), Some(2));

    // Back at sequence 1 a fresh signature is made.
    stx.prepare(&key, Amount::Native(12), 1, None).unwrap();
    assert_eq!(key.count.get(), 2);
    assert!(stx.verify_signature().unwrap());
}

#[test]
fn sign_requires_prepare() {
    let key = CountingSigner::new();
    let mut stx = SignedTransaction::new(payment());
    assert_eq!(stx.sign(&key), Err(SigningError::NotPrepared));
    assert_eq!(key.count.get(), 0);
}

#[test]
fn fee_must_be_native() {
    let key = CountingSigner::new();
    let mut stx = SignedTransaction::new(payment());
    let fee = Amount::issued("1", "USD".parse().unwrap(), AccountId([1; 20])).unwrap();
    assert_eq!(
        stx.prepare(&key, fee, 1, None),
        Err(SigningError::NonNativeFee(fee))
    );
}

#[test]
fn id_hashes_the_blob() {
    let key = CountingSigner::new();
    let mut stx = SignedTransaction::new(payment());
    stx.prepare(&key, Amount::Native(10), 5, Some(20)).unwrap();

    let blob = HEXUPPER.decode(stx.tx_blob().unwrap().as_bytes()).unwrap();
    let mut prefixed = HashPrefix::TransactionId.bytes().to_vec();
    prefixed.extend_from_slice(&blob);
    assert_eq!(stx.hash(), Some(sha512_half(&prefixed)));
    assert_eq!(stx.hash(), Some(stx.transaction().id().unwrap()));

    let mut signing = HashPrefix::TxSign.bytes().to_vec();
    stx.transaction().to_signing_bytes(&mut signing).unwrap();
    assert_eq!(stx.signing_hash(), Some(sha512_half(&signing)));
}

#[test]
fn from_blob() {
    let key = CountingSigner::new();
    let mut stx = SignedTransaction::new(payment());
    stx.prepare(&key, Amount::Native(10), 5, None).unwrap();

    let restored = SignedTransaction::from_blob(stx.tx_blob().unwrap()).unwrap();
    assert_eq!(restored.transaction(), stx.transaction());
    assert_eq!(restored.hash(), stx.hash());
    assert_eq!(restored.signing_hash(), stx.signing_hash());
    assert_eq!(restored.state(), SigningState::Signed);
    assert!(restored.verify_signature().unwrap());

    // a restored transaction re-prepared without changes keeps its signature
    let mut restored = restored;
    restored.prepare(&key, Amount::Native(10), 5, None).unwrap();
    assert_eq!(key.count.get(), 1);
}

#[test]
fn tampering_breaks_signature() {
    let key = CountingSigner::new();
    let mut stx = SignedTransaction::new(payment());
    stx.prepare(&key, Amount::Native(10), 5, None).unwrap();

    stx.transaction_mut()
        .put(Field::Amount, Amount::Native(1))
        .unwrap();
    assert_eq!(stx.state(), SigningState::Unsigned);
    assert!(!stx.verify_signature().unwrap());
}

#[test]
fn verify_needs_signature() {
    let stx = SignedTransaction::new(payment());
    assert_eq!(
        stx.verify_signature(),
        Err(SigningError::MissingField(Field::SigningPubKey))
    );
}

#[test]
fn format_checks() {
    let mut tx = payment();
    tx.put(Field::Fee, Amount::Native(10)).unwrap();
    tx.put(Field::Sequence, 1u32).unwrap();
    assert_eq!(
        tx.check_format(),
        Err(FormatError::MissingField(
            TransactionType::Payment,
            Field::SigningPubKey
        ))
    );

    tx.put(Field::SigningPubKey, Blob(vec![0xed; 33])).unwrap();
    assert_eq!(tx.check_format(), Ok(()));

    tx.put(Field::TakerPays, Amount::Native(1)).unwrap();
    assert_eq!(
        tx.check_format(),
        Err(FormatError::UnexpectedField(
            TransactionType::Payment,
            Field::TakerPays
        ))
    );

    tx.remove(Field::TakerPays);
    tx.remove(Field::Destination);
    assert_eq!(
        tx.check_format(),
        Err(FormatError::MissingField(
            TransactionType::Payment,
            Field::Destination
        ))
    );
}

#[test]
fn decode_requires_known_type() {
    let mut obj = crate::data::STObject::new();
    obj.put(Field::TransactionType, 999u16).unwrap();
    assert_eq!(
        Transaction::from_object(obj.clone()),
        Err(FormatError::UnknownTransactionType(999))
    );
    assert!(matches!(
        decode::<Transaction>(&obj.to_bytes().unwrap()),
        Err(CodecError::Decode { type_name: "Transaction", .. })
    ));
    assert_eq!(
        Transaction::from_object(crate::data::STObject::new()),
        Err(FormatError::MissingTransactionType)
    );
}

#[test]
fn json_round_trip() {
    let key = CountingSigner::new();
    let mut stx = SignedTransaction::new(payment());
    stx.prepare(&key, Amount::Native(10), 5, None).unwrap();

    let json = stx.transaction().to_json();
    assert_eq!(json["TransactionType"], "Payment");
    let back = Transaction::from_json(&json).unwrap();
    assert_eq!(&back, stx.transaction());
    assert_eq!(back.id().unwrap(), stx.hash().unwrap());
}
