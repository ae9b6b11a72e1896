// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use criterion::Criterion;
use rand::{thread_rng, RngCore};

use ripplers::data::basics::AccountId;
use ripplers::data::ledger::index;

pub fn account_root_index(c: &mut Criterion) {
    let mut rng = thread_rng();
    let mut account = [0; 20];

    c.bench_function("ledger::index::account_root()", |b| {
        b.iter_with_setup(
            || {
                rng.fill_bytes(&mut account);
                AccountId(account)
            },
            |a| index::account_root(&a),
        );
    });
}
