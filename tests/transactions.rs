//! End-to-end codec tests over real transaction shapes: known byte vectors,
//! signing payloads, and round-trip properties.

use ledger_codec::{
    decode, encode, encode_for_multisigning, encode_for_signing, encode_for_signing_claim,
    encode_hex, transaction_id,
};
use proptest::prelude::*;
use serde_json::{json, Value as Json};

const GENESIS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const ACCOUNT_ONE: &str = "rrrrrrrrrrrrrrrrrrrrBZbvji";

/// Canonical bytes of the reference payment, assembled field by field:
/// TransactionType, Sequence, Amount, Fee, SigningPubKey, Account,
/// Destination in (type, field) order.
const PAYMENT_HEX: &str = "12000024000000016140000000000003E868400000000000000A73008114B5F762798A53D543A014CAF8B297CFF8F2F937E883140000000000000000000000000000000000000001";

fn payment() -> Json {
    json!({
        "TransactionType": "Payment",
        "Account": GENESIS,
        "Destination": ACCOUNT_ONE,
        "Amount": "1000",
        "Fee": "10",
        "Sequence": 1,
        "SigningPubKey": "",
    })
}

#[test]
fn native_payment_matches_known_vector() {
    assert_eq!(encode_hex(&payment()).unwrap(), PAYMENT_HEX);
}

#[test]
fn transaction_id_of_known_vector() {
    let bytes = encode(&payment()).unwrap();
    assert_eq!(
        hex::encode_upper(transaction_id(&bytes)),
        "A1C09BF9598E9139E75048A3F5279CDF1ACD719BF2FD02208C214CB57B913F66"
    );
}

#[test]
fn decode_inverts_encode() {
    let decoded = decode(PAYMENT_HEX).unwrap();
    assert_eq!(decoded, payment());
    // Lowercase input is accepted.
    assert_eq!(decode(&PAYMENT_HEX.to_lowercase()).unwrap(), payment());
}

#[test]
fn issued_payment_amount_bytes() {
    let mut tx = payment();
    tx["Amount"] = json!({
        "value": "1",
        "currency": "USD",
        "issuer": GENESIS,
    });
    let hex_out = encode_hex(&tx).unwrap();
    let expected_amount = format!(
        "61D4838D7EA4C68000{}{}",
        "0000000000000000000000005553440000000000",
        "B5F762798A53D543A014CAF8B297CFF8F2F937E8",
    );
    assert!(hex_out.contains(&expected_amount), "{hex_out}");

    // The issued form round-trips to the same canonical value string.
    let decoded = decode(&hex_out).unwrap();
    assert_eq!(decoded["Amount"], tx["Amount"]);
}

#[test]
fn multisigning_payload_is_signing_body_plus_signer() {
    let mut tx = payment();
    tx["Signers"] = json!([
        {
            "Signer": {
                "Account": ACCOUNT_ONE,
                "SigningPubKey": "AA",
                "TxnSignature": "BB",
            }
        }
    ]);

    let payload = encode_for_multisigning(&tx, ACCOUNT_ONE).unwrap();

    // Prefix, then the signing-field body (Signers and signatures dropped),
    // then the bare 20-byte signer id with no length prefix.
    assert_eq!(&payload[..4], &[0x53, 0x4D, 0x54, 0x00]);
    let body = encode(&payment()).unwrap();
    assert_eq!(&payload[4..4 + body.len()], &body[..]);
    let mut signer_id = [0u8; 20];
    signer_id[19] = 1;
    assert_eq!(&payload[4 + body.len()..], &signer_id);
}

#[test]
fn signing_payload_equals_manual_filter_construction() {
    let mut tx = payment();
    tx["TxnSignature"] = json!("DEADBEEF");

    let from_filter = encode_for_signing(&tx).unwrap();

    let mut manual = vec![0x53, 0x54, 0x58, 0x00];
    manual.extend_from_slice(&encode(&payment()).unwrap());
    assert_eq!(from_filter, manual);
}

#[test]
fn signer_array_roundtrips_in_given_order() {
    let mut tx = payment();
    // Deliberately unsorted by account: arrays are never reordered.
    tx["Signers"] = json!([
        {
            "Signer": {
                "Account": GENESIS,
                "SigningPubKey": "02",
                "TxnSignature": "A0A0",
            }
        },
        {
            "Signer": {
                "Account": ACCOUNT_ONE,
                "SigningPubKey": "03",
                "TxnSignature": "B1B1",
            }
        },
    ]);

    let decoded = decode(&encode_hex(&tx).unwrap()).unwrap();
    assert_eq!(decoded["Signers"], tx["Signers"]);
    assert_eq!(decoded["Signers"][0]["Signer"]["Account"], json!(GENESIS));
}

#[test]
fn pathset_framing_in_a_payment() {
    let mut tx = payment();
    tx["SendMax"] = json!({ "value": "2", "currency": "USD", "issuer": GENESIS });
    tx["Paths"] = json!([
        [
            { "account": ACCOUNT_ONE },
            { "currency": "USD", "issuer": GENESIS },
        ],
        [
            { "account": GENESIS },
            { "currency": "EUR", "issuer": GENESIS },
            { "account": ACCOUNT_ONE },
        ],
    ]);

    let bytes = encode(&tx).unwrap();
    // One path separator, and the set terminator is the final byte (PathSet
    // sorts last among these fields).
    assert_eq!(bytes.iter().filter(|&&b| b == 0xFF).count(), 1);
    assert_eq!(*bytes.last().unwrap(), 0x00);

    let decoded = decode(&hex::encode_upper(&bytes)).unwrap();
    assert_eq!(decoded["Paths"], tx["Paths"]);
}

#[test]
fn kitchen_sink_roundtrip() {
    let tx = json!({
        "TransactionType": "Payment",
        "Flags": 2147483648u32,
        "Account": GENESIS,
        "Destination": ACCOUNT_ONE,
        "DestinationTag": 736049272u32,
        "Amount": { "value": "0.5", "currency": "USD", "issuer": GENESIS },
        "SendMax": "250000000",
        "Fee": "12",
        "Sequence": 5,
        "LastLedgerSequence": 82000000u32,
        "InvoiceID": "3C63C07B6B9C88B50F26E4FD33F20CBB297F82EC55DBC2D0BE9B4F1B61D74545",
        "SigningPubKey": "0330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020",
        "Memos": [
            { "Memo": { "MemoType": "687474703A2F2F6578616D706C65", "MemoData": "72656E74" } }
        ],
    });

    let first = encode(&tx).unwrap();
    let decoded = decode(&hex::encode_upper(&first)).unwrap();
    assert_eq!(decoded, tx);
    let second = encode(&decoded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn enum_named_fields_roundtrip_in_metadata_shapes() {
    let entry = json!({
        "LedgerEntryType": "AccountRoot",
        "Flags": 0,
        "Account": GENESIS,
        "Balance": "99999999999999900",
        "OwnerCount": 0,
        "PreviousTxnID": "0000000000000000000000000000000000000000000000000000000000000000",
        "PreviousTxnLgrSeq": 0,
        "Sequence": 1,
    });
    let decoded = decode(&encode_hex(&entry).unwrap()).unwrap();
    assert_eq!(decoded["LedgerEntryType"], json!("AccountRoot"));
    assert_eq!(decoded, entry);
}

#[test]
fn claim_payload_known_layout() {
    let claim = json!({
        "channel": "5DB01B7FFED6B67E6B0414DED11E051D2EE2B7619CE0EAA6286D67A3A4D5BDB3",
        "amount": "1000000",
    });
    let payload = encode_for_signing_claim(&claim).unwrap();
    let expected = format!(
        "434C4D00{}{}",
        "5DB01B7FFED6B67E6B0414DED11E051D2EE2B7619CE0EAA6286D67A3A4D5BDB3",
        "00000000000F4240",
    );
    assert_eq!(hex::encode_upper(payload), expected);
}

#[test]
fn unknown_fields_fail_closed() {
    let mut tx = payment();
    tx["TotallyMadeUp"] = json!(7);
    assert!(encode(&tx).is_err());
}

proptest! {
    #[test]
    fn drops_amounts_roundtrip(drops in 0u64..=100_000_000_000_000_000u64) {
        let mut tx = payment();
        tx["Amount"] = json!(drops.to_string());
        let decoded = decode(&encode_hex(&tx).unwrap()).unwrap();
        prop_assert_eq!(&decoded["Amount"], &json!(drops.to_string()));
    }

    #[test]
    fn sequence_and_tags_roundtrip(sequence in any::<u32>(), tag in any::<u32>()) {
        let mut tx = payment();
        tx["Sequence"] = json!(sequence);
        tx["DestinationTag"] = json!(tag);
        let decoded = decode(&encode_hex(&tx).unwrap()).unwrap();
        prop_assert_eq!(&decoded, &tx);
    }

    #[test]
    fn json_key_order_never_changes_the_bytes(
        order in Just((0..7usize).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let canonical = payment();
        let entries: Vec<(&String, &Json)> =
            canonical.as_object().unwrap().iter().collect();

        let mut shuffled = serde_json::Map::new();
        for index in order {
            let (key, value) = entries[index];
            shuffled.insert(key.clone(), value.clone());
        }

        prop_assert_eq!(
            encode(&Json::Object(shuffled)).unwrap(),
            encode(&canonical).unwrap()
        );
    }

    #[test]
    fn scaled_issued_values_share_bytes(
        mantissa in 1u64..=9_999_999_999_999_999u64,
        shift in 0u32..=4,
    ) {
        let mut a = payment();
        a["Amount"] = json!({
            "value": format!("{mantissa}e0"),
            "currency": "USD",
            "issuer": GENESIS,
        });
        let mut b = payment();
        b["Amount"] = json!({
            "value": format!("{}e-{}", u128::from(mantissa) * 10u128.pow(shift), shift),
            "currency": "USD",
            "issuer": GENESIS,
        });
        prop_assert_eq!(encode(&a).unwrap(), encode(&b).unwrap());
    }

    #[test]
    fn canonical_bytes_are_a_fixed_point(extra_fee in 1u64..=1_000_000u64) {
        let mut tx = payment();
        tx["Fee"] = json!(extra_fee.to_string());
        let first = encode(&tx).unwrap();
        let decoded = decode(&hex::encode_upper(&first)).unwrap();
        let second = encode(&decoded).unwrap();
        prop_assert_eq!(first, second);
    }
}
