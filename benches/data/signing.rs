// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use criterion::Criterion;
use rand::{thread_rng, RngCore};

use ripplers::crypto::Ed25519KeyPair;
use ripplers::data::basics::Amount;
use ripplers::data::transactions::SignedTransaction;

use crate::codec::random_payment;

pub fn signing_hash(c: &mut Criterion) {
    c.bench_function("Transaction::signing_hash()", |b| {
        b.iter_with_setup(random_payment, |tx| tx.signing_hash().unwrap());
    });
}

pub fn prepare_and_sign(c: &mut Criterion) {
    let (key, _) = Ed25519KeyPair::generate();

    c.bench_function("SignedTransaction::prepare()", |b| {
        b.iter_with_setup(
            || SignedTransaction::new(random_payment()),
            |mut stx| {
                let seq = thread_rng().next_u32();
                stx.prepare(&key, Amount::Native(12), seq, None).unwrap();
                stx
            },
        );
    });
}
