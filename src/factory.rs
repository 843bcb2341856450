// 🏗️ Entity Factory - raw payload in, typed entity out
//
// Detection is a single lookup on the payload's type tag. The tag found in
// the payload always wins; a caller-supplied hint is only consulted when the
// payload carries no tag at all. Nothing here fails: an unrecognized tag
// becomes the Unknown variant of the sum type.

use crate::amount::AmountNormalizer;
use crate::config::CoreConfig;
use crate::entities::common::str_field;
use crate::entities::objects::{
    BaseLedgerObject, LedgerObject, LedgerObjectTag, LedgerObjectType, UnknownLedgerObject,
};
use crate::entities::transaction::{
    BaseTransaction, Transaction, TransactionTag, TransactionType, UnknownTransaction,
};
use crate::entities::TypeTag;
use serde_json::Value;

// ============================================================================
// DETECTION
// ============================================================================

/// Resolve the discriminant: payload tag first, then the hint
fn detect<K>(raw: &Value, tag_key: &str, hint: Option<&str>) -> TypeTag<K>
where
    K: std::str::FromStr + AsRef<str>,
{
    match str_field(raw, tag_key).or(hint) {
        Some(tag) => TypeTag::parse(tag),
        None => {
            tracing::debug!(tag_key, "payload has no type tag and no hint was given");
            TypeTag::Unknown(String::new())
        }
    }
}

/// Detect a transaction's tag without building it
pub fn detect_transaction_type(raw: &Value) -> TransactionTag {
    detect(raw, "TransactionType", None)
}

/// Detect a ledger object's tag without building it
pub fn detect_object_type(raw: &Value) -> LedgerObjectTag {
    detect(raw, "LedgerEntryType", None)
}

// ============================================================================
// ENTITY FACTORY
// ============================================================================

/// EntityFactory - builds transactions and ledger objects for one network
#[derive(Debug, Clone, Default)]
pub struct EntityFactory {
    normalizer: AmountNormalizer,
}

impl EntityFactory {
    pub fn new(normalizer: AmountNormalizer) -> Self {
        EntityFactory { normalizer }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        EntityFactory::new(config.normalizer())
    }

    pub fn normalizer(&self) -> &AmountNormalizer {
        &self.normalizer
    }

    pub fn transaction(&self, raw: Value, meta: Option<Value>) -> Transaction {
        self.transaction_with_hint(raw, meta, None)
    }

    /// Build a transaction; `hint` names the type when the payload lacks one
    pub fn transaction_with_hint(
        &self,
        raw: Value,
        meta: Option<Value>,
        hint: Option<&str>,
    ) -> Transaction {
        let tag: TransactionTag = detect(&raw, "TransactionType", hint);
        let mut base = BaseTransaction::new(raw, meta, self.normalizer.clone());

        match tag {
            TypeTag::Known(kind) => Transaction::build(kind, base),
            TypeTag::Unknown(tag) => {
                if !tag.is_empty() {
                    tracing::debug!(tag = %tag, "unsupported transaction type");
                }
                base.fill_missing_type(&tag);
                Transaction::Unknown(UnknownTransaction::from_base(base, tag))
            }
        }
    }

    pub fn ledger_object(&self, raw: Value) -> LedgerObject {
        self.ledger_object_with_hint(raw, None)
    }

    pub fn ledger_object_with_hint(&self, raw: Value, hint: Option<&str>) -> LedgerObject {
        let tag: LedgerObjectTag = detect(&raw, "LedgerEntryType", hint);
        let mut base = BaseLedgerObject::new(raw, self.normalizer.clone());

        match tag {
            TypeTag::Known(kind) => LedgerObject::build(kind, base),
            TypeTag::Unknown(tag) => {
                if !tag.is_empty() {
                    tracing::debug!(tag = %tag, "unsupported ledger object type");
                }
                base.fill_missing_type(&tag);
                LedgerObject::Unknown(UnknownLedgerObject::from_base(base, tag))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Node response shapes
    // ------------------------------------------------------------------------

    /// Build from one node response entry
    ///
    /// Accepts an `account_tx` entry (`{ "tx" | "tx_json": {...}, "meta" |
    /// "metaData": {...}, "hash"?, "ledger_index"?, "date"? }`) or a `tx`
    /// result where the transaction fields and `meta` share one object.
    pub fn transaction_from_response(&self, entry: Value) -> Transaction {
        let mut entry = match entry {
            Value::Object(entry) => entry,
            other => return self.transaction(other, None),
        };

        let meta = entry.remove("meta").or_else(|| entry.remove("metaData"));
        let nested = entry.remove("tx").or_else(|| entry.remove("tx_json"));

        let tx = match nested {
            Some(Value::Object(mut tx)) => {
                // API v2 moves these next to tx_json
                for key in ["hash", "ledger_index", "date"] {
                    if let Some(value) = entry.remove(key) {
                        tx.entry(key).or_insert(value);
                    }
                }
                Value::Object(tx)
            }
            Some(other) => other,
            None => Value::Object(entry),
        };

        self.transaction(tx, meta)
    }

    /// Build every entry of an `account_objects` result
    ///
    /// Accepts the result object (`{ "account_objects": [...] }`) or the bare
    /// array.
    pub fn ledger_objects_from_response(&self, response: &Value) -> Vec<LedgerObject> {
        let entries = response
            .get("account_objects")
            .unwrap_or(response)
            .as_array();

        match entries {
            Some(entries) => entries
                .iter()
                .map(|raw| self.ledger_object(raw.clone()))
                .collect(),
            None => {
                tracing::debug!("response has no account_objects array");
                Vec::new()
            }
        }
    }
}

// ============================================================================
// DEFAULT-SETTINGS SHORTCUTS
// ============================================================================

pub fn transaction_from_raw(raw: Value, meta: Option<Value>) -> Transaction {
    EntityFactory::default().transaction(raw, meta)
}

pub fn ledger_object_from_raw(raw: Value) -> LedgerObject {
    EntityFactory::default().ledger_object(raw)
}

/// Every tag the factory turns into a concrete transaction variant
pub fn supported_transaction_types() -> impl Iterator<Item = TransactionType> {
    <TransactionType as strum::IntoEnumIterator>::iter()
}

/// Every tag the factory turns into a concrete ledger object variant
pub fn supported_object_types() -> impl Iterator<Item = LedgerObjectType> {
    <LedgerObjectType as strum::IntoEnumIterator>::iter()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_transaction_type() {
        assert_eq!(
            detect_transaction_type(&json!({ "TransactionType": "Payment" })),
            TypeTag::Known(TransactionType::Payment)
        );
        assert_eq!(
            detect_transaction_type(&json!({ "TransactionType": "AMMDeposit" })),
            TypeTag::Unknown("AMMDeposit".to_string())
        );
        assert_eq!(detect_transaction_type(&json!({})), TypeTag::Unknown(String::new()));
    }

    #[test]
    fn test_payload_tag_wins_over_hint() {
        let factory = EntityFactory::default();
        let tx = factory.transaction_with_hint(
            json!({ "TransactionType": "OfferCancel" }),
            None,
            Some("Payment"),
        );

        assert_eq!(tx.kind(), Some(TransactionType::OfferCancel));
    }

    #[test]
    fn test_hint_used_when_tag_missing() {
        let factory = EntityFactory::default();
        let tx = factory.transaction_with_hint(json!({ "OfferSequence": 4 }), None, Some("OfferCancel"));

        assert_eq!(tx.kind(), Some(TransactionType::OfferCancel));
        assert_eq!(tx.base().transaction_type(), Some("OfferCancel"));

        let obj = factory.ledger_object_with_hint(json!({}), Some("Ticket"));
        assert_eq!(obj.kind(), Some(LedgerObjectType::Ticket));
    }

    #[test]
    fn test_unknown_hint_is_stamped_into_payload() {
        let factory = EntityFactory::default();

        let tx = factory.transaction_with_hint(json!({ "Account": "rA" }), None, Some("FutureType42"));
        assert!(tx.is_unknown());
        assert_eq!(tx.type_name(), "FutureType42");
        assert_eq!(tx.base().transaction_type(), Some("FutureType42"));

        let obj = factory.ledger_object_with_hint(json!({}), Some("Oracle"));
        assert_eq!(obj.type_name(), "Oracle");
        assert_eq!(obj.base().object_type(), Some("Oracle"));
    }

    #[test]
    fn test_payload_tag_kept_when_unknown() {
        let tx = EntityFactory::default().transaction_with_hint(
            json!({ "TransactionType": "AMMDeposit" }),
            None,
            Some("FutureType42"),
        );

        assert_eq!(tx.type_name(), "AMMDeposit");
        assert_eq!(tx.base().transaction_type(), Some("AMMDeposit"));
    }

    #[test]
    fn test_missing_tag_without_hint_is_unknown() {
        let tx = transaction_from_raw(json!({ "Account": "rA" }), None);

        assert!(tx.is_unknown());
        assert_eq!(tx.type_name(), "");
    }

    #[test]
    fn test_unknown_object_keeps_tag() {
        let obj = ledger_object_from_raw(json!({ "LedgerEntryType": "AMM", "Account": "rAMM" }));

        assert!(obj.is_unknown());
        assert_eq!(obj.type_name(), "AMM");
        assert_eq!(obj.base().raw()["Account"], "rAMM");
    }

    #[test]
    fn test_factory_uses_configured_native_asset() {
        let factory = EntityFactory::new(AmountNormalizer::new("XAH"));
        let tx = factory.transaction(json!({ "TransactionType": "Payment", "Fee": "10" }), None);

        assert_eq!(tx.native_currency(), "XAH");
        assert_eq!(tx.base().fee().unwrap().currency, "XAH");
    }

    #[test]
    fn test_account_tx_entry() {
        let factory = EntityFactory::default();
        let tx = factory.transaction_from_response(json!({
            "tx": { "TransactionType": "Payment", "Account": "rA", "hash": "H1" },
            "meta": { "TransactionResult": "tesSUCCESS" },
            "validated": true
        }));

        assert_eq!(tx.kind(), Some(TransactionType::Payment));
        assert_eq!(tx.base().hash(), Some("H1"));
        assert_eq!(tx.base().is_successful(), Some(true));
    }

    #[test]
    fn test_api_v2_entry_moves_hash_into_tx() {
        let factory = EntityFactory::default();
        let tx = factory.transaction_from_response(json!({
            "tx_json": { "TransactionType": "TrustSet", "Account": "rA" },
            "metaData": { "TransactionResult": "tecNO_LINE" },
            "hash": "H2",
            "ledger_index": 88
        }));

        assert_eq!(tx.kind(), Some(TransactionType::TrustSet));
        assert_eq!(tx.base().hash(), Some("H2"));
        assert_eq!(tx.base().ledger_index(), Some(88));
        assert_eq!(tx.base().is_successful(), Some(false));
    }

    #[test]
    fn test_tx_result_with_top_level_meta() {
        let factory = EntityFactory::default();
        let tx = factory.transaction_from_response(json!({
            "TransactionType": "AccountSet",
            "Account": "rA",
            "meta": { "TransactionResult": "tesSUCCESS" }
        }));

        assert_eq!(tx.kind(), Some(TransactionType::AccountSet));
        assert!(tx.base().raw().get("meta").is_none());
        assert!(tx.base().meta().is_some());
    }

    #[test]
    fn test_account_objects_response() {
        let factory = EntityFactory::default();
        let objects = factory.ledger_objects_from_response(&json!({
            "account": "rA",
            "account_objects": [
                { "LedgerEntryType": "Offer" },
                { "LedgerEntryType": "Ticket" },
                { "LedgerEntryType": "Oracle" }
            ]
        }));

        assert_eq!(objects.len(), 3);
        assert_eq!(objects[0].kind(), Some(LedgerObjectType::Offer));
        assert!(objects[2].is_unknown());

        assert!(factory.ledger_objects_from_response(&json!({ "error": "actNotFound" })).is_empty());
    }

    #[test]
    fn test_supported_types() {
        assert_eq!(supported_transaction_types().count(), 24);
        assert_eq!(supported_object_types().count(), 9);
    }
}
