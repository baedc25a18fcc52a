//! Encode/decode throughput over a representative payment.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ledger_codec::{decode, encode};
use serde_json::json;

fn payment() -> serde_json::Value {
    json!({
        "TransactionType": "Payment",
        "Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
        "Destination": "rrrrrrrrrrrrrrrrrrrrBZbvji",
        "Amount": { "value": "12.34", "currency": "USD", "issuer": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh" },
        "SendMax": "250000000",
        "Fee": "12",
        "Sequence": 845,
        "LastLedgerSequence": 82000000u32,
        "SigningPubKey": "0330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020",
    })
}

fn bench_codec(c: &mut Criterion) {
    let tx = payment();
    let hex_blob = hex::encode_upper(encode(&tx).unwrap());

    c.bench_function("encode_payment", |b| {
        b.iter(|| encode(black_box(&tx)).unwrap())
    });

    c.bench_function("decode_payment", |b| {
        b.iter(|| decode(black_box(&hex_blob)).unwrap())
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
