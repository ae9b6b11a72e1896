// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use criterion::Criterion;
use rand::{thread_rng, RngCore};

use ripplers::codec::{decode, Field, SerializedType};
use ripplers::crypto::Hash256;
use ripplers::data::basics::{AccountId, Amount};
use ripplers::data::transactions::Transaction;
use ripplers::protocol::TransactionType;

pub(crate) fn random_payment() -> Transaction {
    let mut rng = thread_rng();
    let mut account = [0; 20];
    let mut destination = [0; 20];
    let mut invoice = [0; 32];
    rng.fill_bytes(&mut account);
    rng.fill_bytes(&mut destination);
    rng.fill_bytes(&mut invoice);

    let mut tx = Transaction::new(TransactionType::Payment);
    tx.put(Field::Account, AccountId(account)).unwrap();
    tx.put(Field::Destination, AccountId(destination)).unwrap();
    tx.put(Field::Amount, Amount::Native(rng.next_u32() as i64)).unwrap();
    tx.put(Field::Fee, Amount::Native(12)).unwrap();
    tx.put(Field::Sequence, rng.next_u32()).unwrap();
    tx.put(Field::InvoiceID, Hash256(invoice)).unwrap();
    tx
}

pub fn stobject_encode(c: &mut Criterion) {
    c.bench_function("STObject::to_bytes() (payment)", |b| {
        b.iter_with_setup(random_payment, |tx| tx.to_bytes().unwrap());
    });
}

pub fn stobject_decode(c: &mut Criterion) {
    c.bench_function("decode::<Transaction>() (payment)", |b| {
        b.iter_with_setup(
            || random_payment().to_bytes().unwrap(),
            |bytes| decode::<Transaction>(&bytes).unwrap(),
        );
    });
}
