// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::str::FromStr;

use criterion::Criterion;
use rand::{thread_rng, Rng};

use ripplers::codec::SerializedType;
use ripplers::data::basics::{AccountId, Amount, Currency, IouValue};

pub fn iou_from_str(c: &mut Criterion) {
    let mut rng = thread_rng();

    c.bench_function("basics::IouValue::from_str()", |b| {
        b.iter_with_setup(
            || format!("{}.{}e{}", rng.gen::<u32>(), rng.gen::<u16>(), rng.gen_range(-20, 20)),
            |s| IouValue::from_str(&s),
        );
    });
}

pub fn issued_amount_encode(c: &mut Criterion) {
    let mut rng = thread_rng();
    let usd = Currency::from_str("USD").unwrap();

    c.bench_function("Amount::to_bytes() (issued)", |b| {
        b.iter_with_setup(
            || {
                let value = format!("{}e{}", rng.gen::<u32>(), rng.gen_range(-20, 20));
                Amount::issued(&value, usd, AccountId([7; 20])).unwrap()
            },
            |a| a.to_bytes().unwrap(),
        );
    });
}
