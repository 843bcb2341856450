// End-to-end behaviour of the public API: payload in, label/recipient out

use ledger_lens::{
    normalize_currency_code, AmountNormalizer, CanonicalAmount, EntityFactory, LedgerObject,
    LedgerObjectType, Transaction, TransactionType, TypeTag, UNKNOWN_CURRENCY,
};
use serde_json::{json, Value};
use strum::IntoEnumIterator;

#[test]
fn test_every_transaction_tag_builds_its_variant() {
    for kind in TransactionType::iter() {
        let tx = Transaction::from_raw(json!({ "TransactionType": kind.as_ref() }), None);

        assert_eq!(tx.tag(), TypeTag::Known(kind));
        assert_eq!(tx.type_name(), kind.as_ref());

        let base = tx.base();
        assert_eq!(base.account(), None);
        assert_eq!(base.fee(), None);
        assert_eq!(base.sequence(), None);
        assert_eq!(base.hash(), None);
        assert!(base.fields().len() >= ledger_lens::fields::TRANSACTION_BASE_FIELDS.len());
    }
}

#[test]
fn test_every_object_tag_builds_its_variant() {
    for kind in LedgerObjectType::iter() {
        let obj = LedgerObject::from_raw(json!({ "LedgerEntryType": kind.as_ref() }));

        assert_eq!(obj.tag(), TypeTag::Known(kind));
        assert_eq!(obj.base().index(), None);
        assert_eq!(obj.base().flags(), None);
    }
}

#[test]
fn test_minimal_payloads_have_empty_variant_accessors() {
    let Transaction::Payment(payment) = Transaction::from_raw(json!({ "TransactionType": "Payment" }), None) else {
        panic!("expected a Payment");
    };
    assert_eq!(payment.destination(), None);
    assert_eq!(payment.amount(), None);
    assert_eq!(payment.delivered_amount(), None);

    let Transaction::OfferCancel(cancel) = Transaction::from_raw(json!({ "TransactionType": "OfferCancel" }), None) else {
        panic!("expected an OfferCancel");
    };
    assert_eq!(cancel.offer_sequence(), None);
    assert_eq!(cancel.offer_id(), None);
}

const DEMURRAGE_XAU: &str = "0158415500000000C1F76FF6ECB0BAC600000000";
const HEX_SOLO: &str = "534F4C4F00000000000000000000000000000000";
const HEX_USD_160: &str = "0000000000000000000000005553440000000000";
const HEX_UNDECODABLE: &str = "E4B8ADE69687E4B8ADE69687E4B8ADE69687E4B8";

fn issued(currency: &str, value: &str) -> Value {
    json!({ "currency": currency, "issuer": "rGateway", "value": value })
}

/// A ledger entry of `kind` carrying every amount field that kind has
fn object_fixture(kind: LedgerObjectType) -> Value {
    match kind {
        LedgerObjectType::Offer => json!({
            "LedgerEntryType": "Offer",
            "TakerPays": issued(DEMURRAGE_XAU, "2.5"),
            "TakerGets": "1000000"
        }),
        LedgerObjectType::Escrow => json!({ "LedgerEntryType": "Escrow", "Amount": "25000000" }),
        LedgerObjectType::Check => json!({ "LedgerEntryType": "Check", "SendMax": issued("USD", "100") }),
        LedgerObjectType::NFTokenOffer => json!({
            "LedgerEntryType": "NFTokenOffer",
            "Amount": issued(HEX_SOLO, "1e-3")
        }),
        LedgerObjectType::PayChannel => json!({
            "LedgerEntryType": "PayChannel",
            "Amount": "5000000",
            "Balance": "1200000"
        }),
        LedgerObjectType::RippleState => json!({
            "LedgerEntryType": "RippleState",
            "Balance": issued(HEX_UNDECODABLE, "-4"),
            "LowLimit": issued(HEX_USD_160, "0"),
            "HighLimit": issued("EUR", "300")
        }),
        LedgerObjectType::Ticket
        | LedgerObjectType::DepositPreauth
        | LedgerObjectType::SignerList => json!({ "LedgerEntryType": kind.as_ref() }),
    }
}

/// Every amount an object exposes, keyed by its protocol field
fn object_amounts(obj: &LedgerObject) -> Vec<(&'static str, Option<CanonicalAmount>)> {
    match obj {
        LedgerObject::Offer(o) => vec![("TakerPays", o.taker_pays()), ("TakerGets", o.taker_gets())],
        LedgerObject::Escrow(o) => vec![("Amount", o.amount())],
        LedgerObject::Check(o) => vec![("SendMax", o.send_max())],
        LedgerObject::NFTokenOffer(o) => vec![("Amount", o.amount())],
        LedgerObject::PayChannel(o) => vec![("Amount", o.amount()), ("Balance", o.balance())],
        LedgerObject::RippleState(o) => vec![
            ("Balance", o.balance()),
            ("LowLimit", o.low_limit()),
            ("HighLimit", o.high_limit()),
        ],
        LedgerObject::Ticket(_)
        | LedgerObject::DepositPreauth(_)
        | LedgerObject::SignerList(_)
        | LedgerObject::Unknown(_) => Vec::new(),
    }
}

#[test]
fn test_object_amounts_round_trip() {
    let normalizer = AmountNormalizer::default();
    let mut checked = 0;

    for kind in LedgerObjectType::iter() {
        let obj = LedgerObject::from_raw(object_fixture(kind));
        assert_eq!(obj.kind(), Some(kind));

        for (key, amount) in object_amounts(&obj) {
            let canonical = amount.unwrap_or_else(|| panic!("{kind}.{key} missing"));
            let raw = normalizer.to_raw(&canonical);

            assert_eq!(&raw, &obj.base().raw()[key], "{kind}.{key} did not return to its raw shape");
            assert_eq!(normalizer.normalize(&raw), canonical, "{kind}.{key} changed on re-normalizing");
            checked += 1;
        }
    }

    assert_eq!(checked, 10);
}

#[test]
fn test_round_trip_fixtures_cover_every_currency_form() {
    let obj = LedgerObject::from_raw(object_fixture(LedgerObjectType::RippleState));
    let currencies: Vec<String> = object_amounts(&obj)
        .into_iter()
        .filter_map(|(_, amount)| amount.map(|a| a.currency))
        .collect();
    assert_eq!(currencies, vec!["E4B8...", "USD", "EUR"]);

    let offer = LedgerObject::from_raw(object_fixture(LedgerObjectType::Offer));
    let pays = object_amounts(&offer).remove(0).1.unwrap();
    assert_eq!(pays.currency, "XAU (-0.5%pa)");

    let nft = LedgerObject::from_raw(object_fixture(LedgerObjectType::NFTokenOffer));
    assert_eq!(object_amounts(&nft)[0].1.as_ref().unwrap().currency, "SOLO");
}

#[test]
fn test_currency_codes() {
    assert_eq!(normalize_currency_code("USD"), "USD");
    assert_eq!(normalize_currency_code("58595A0000000000000000000000000000000000"), "XYZ");
    assert_eq!(normalize_currency_code("E4B8ADE69687E4B8ADE69687E4B8ADE69687E4B8"), "E4B8...");
    assert_eq!(normalize_currency_code("US"), UNKNOWN_CURRENCY);
}

#[test]
fn test_offer_cancel_recipient_substitution() {
    let tx = Transaction::from_raw(
        json!({ "TransactionType": "OfferCancel", "Account": "rMaker", "OfferSequence": 12 }),
        None,
    );

    let result = tx.explain("rMaker");
    assert!(result.recipient.is_none());
    assert_eq!(result.recipient_or_viewer("rMaker").address, "rMaker");
}

#[test]
fn test_offer_object_label() {
    let offer = LedgerObject::from_raw(json!({
        "LedgerEntryType": "Offer",
        "Account": "rMaker",
        "TakerPays": { "currency": "USD", "issuer": "rIssuer", "value": "5" },
        "TakerGets": "1000000"
    }));

    assert_eq!(offer.explain("rMaker").label, "5 USD/XRP");
}

#[test]
fn test_future_transaction_type() {
    let tx = Transaction::from_raw(json!({ "TransactionType": "FutureType42", "Account": "rA" }), None);

    assert!(tx.is_unknown());
    assert_eq!(tx.type_name(), "FutureType42");
    assert_eq!(tx.tag(), TypeTag::Unknown("FutureType42".to_string()));

    let result = tx.explain("rA");
    assert_eq!(result.label, "Unsupported transaction");
    assert_eq!(result.recipient, None);
}

#[test]
fn test_account_tx_page() {
    let factory = EntityFactory::default();
    let page = json!([
        {
            "tx": {
                "TransactionType": "Payment",
                "Account": "rAlice",
                "Destination": "rBob",
                "Amount": { "currency": "USD", "issuer": "rGateway", "value": "12.5" }
            },
            "meta": { "TransactionResult": "tesSUCCESS", "delivered_amount": { "currency": "USD", "issuer": "rGateway", "value": "12.5" } }
        },
        {
            "tx": { "TransactionType": "AMMDeposit", "Account": "rBob" },
            "meta": { "TransactionResult": "tesSUCCESS" }
        }
    ]);

    let txs: Vec<Transaction> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| factory.transaction_from_response(entry.clone()))
        .collect();

    let labels: Vec<String> = txs.iter().map(|tx| tx.explain("rBob").label).collect();
    assert_eq!(labels, vec!["Received payment", "Unsupported transaction"]);

    let effect = txs[0].monetary_effect("rBob").unwrap();
    assert_eq!(effect.amount.value, "12.5");
    assert_eq!(effect.amount.currency, "USD");
}
