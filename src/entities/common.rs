// 🧩 Shared building blocks for transactions and ledger objects
//
// Raw payloads are serde_json::Value maps. Every read in this crate goes
// through the helpers below so that a missing or mistyped field is an
// Option::None, never a panic.

use crate::amount::{AmountNormalizer, CanonicalAmount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Ledger epoch (2000-01-01T00:00:00Z) as a Unix timestamp
pub const LEDGER_EPOCH_OFFSET: i64 = 946_684_800;

// ============================================================================
// TYPE TAGS
// ============================================================================

/// TypeTag - a discriminant that is either one of the known kinds or an
/// unrecognized string the ledger produced after this crate was written
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag<K> {
    Known(K),
    Unknown(String),
}

impl<K> TypeTag<K>
where
    K: FromStr + AsRef<str>,
{
    pub fn parse(tag: &str) -> Self {
        match K::from_str(tag) {
            Ok(kind) => TypeTag::Known(kind),
            Err(_) => TypeTag::Unknown(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Known(kind) => kind.as_ref(),
            TypeTag::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, TypeTag::Known(_))
    }
}

impl<K: AsRef<str>> fmt::Display for TypeTag<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Known(kind) => f.write_str(kind.as_ref()),
            TypeTag::Unknown(tag) => f.write_str(tag),
        }
    }
}

// ============================================================================
// ACCOUNT REFERENCE
// ============================================================================

/// AccountRef - an address plus the tag that travels with it
///
/// The ledger stores destination/source tags in companion fields
/// (`Destination` + `DestinationTag`); accessors fold them together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountRef {
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<u32>,
}

impl AccountRef {
    pub fn new(address: impl Into<String>) -> Self {
        AccountRef {
            address: address.into(),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Option<u32>) -> Self {
        self.tag = tag;
        self
    }

    /// Is this the viewer's own address?
    pub fn is(&self, address: &str) -> bool {
        self.address == address
    }
}

// ============================================================================
// SIGNER ENTRIES
// ============================================================================

/// One entry of a multi-signing list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerEntry {
    pub account: String,
    pub weight: u16,
}

pub(crate) fn signer_entries(raw: &Value) -> Option<Vec<SignerEntry>> {
    let entries = raw.get("SignerEntries")?.as_array()?;

    Some(
        entries
            .iter()
            .filter_map(|wrapper| {
                let entry = wrapper.get("SignerEntry")?;
                Some(SignerEntry {
                    account: str_field(entry, "Account")?.to_string(),
                    weight: u16::try_from(entry.get("SignerWeight")?.as_u64()?).ok()?,
                })
            })
            .collect(),
    )
}

// ============================================================================
// RAW READERS
// ============================================================================

pub(crate) fn str_field<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)?.as_str()
}

pub(crate) fn string_field(raw: &Value, key: &str) -> Option<String> {
    str_field(raw, key).map(str::to_string)
}

pub(crate) fn u32_field(raw: &Value, key: &str) -> Option<u32> {
    u32::try_from(raw.get(key)?.as_u64()?).ok()
}

pub(crate) fn u16_field(raw: &Value, key: &str) -> Option<u16> {
    u16::try_from(raw.get(key)?.as_u64()?).ok()
}

pub(crate) fn u8_field(raw: &Value, key: &str) -> Option<u8> {
    u8::try_from(raw.get(key)?.as_u64()?).ok()
}

pub(crate) fn amount_field(
    raw: &Value,
    key: &str,
    normalizer: &AmountNormalizer,
) -> Option<CanonicalAmount> {
    raw.get(key).map(|value| normalizer.normalize(value))
}

/// Address field folded together with its companion tag field
pub(crate) fn account_field(raw: &Value, key: &str, tag_key: Option<&str>) -> Option<AccountRef> {
    let address = str_field(raw, key)?;
    let tag = tag_key.and_then(|tag_key| u32_field(raw, tag_key));
    Some(AccountRef::new(address).with_tag(tag))
}

/// Ledger-epoch seconds as a UTC timestamp
pub(crate) fn time_field(raw: &Value, key: &str) -> Option<DateTime<Utc>> {
    u32_field(raw, key).and_then(|seconds| ledger_time(seconds))
}

pub fn ledger_time(seconds: u32) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::from(seconds) + LEDGER_EPOCH_OFFSET, 0)
}

/// Hex blob decoded as UTF-8 text (Domain, URI, memo fields)
pub(crate) fn hex_text_field(raw: &Value, key: &str) -> Option<String> {
    decode_hex_text(str_field(raw, key)?)
}

pub(crate) fn decode_hex_text(blob: &str) -> Option<String> {
    let bytes = hex::decode(blob).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Check a flag bit; absent flags read as "not set"
pub(crate) fn flag_set(raw: &Value, mask: u32) -> bool {
    u32_field(raw, "Flags").is_some_and(|flags| flags & mask == mask)
}

/// Make sure the payload is a JSON object we can own and extend
pub(crate) fn into_object(raw: Value, what: &str) -> Value {
    if raw.is_object() {
        raw
    } else {
        tracing::debug!(kind = what, raw = %raw, "payload is not an object, using empty record");
        Value::Object(Default::default())
    }
}

/// The other side of a two-party entity, as seen by `viewer`
///
/// If the viewer is `first`, the answer is `second`; otherwise it is
/// `first`. A party that turns out to be the viewer is never returned.
pub fn counterparty(
    first: Option<AccountRef>,
    second: Option<AccountRef>,
    viewer: &str,
) -> Option<AccountRef> {
    let other = match &first {
        Some(first) if first.is(viewer) => second,
        Some(_) => first,
        None => second,
    };

    other.filter(|party| !party.is(viewer))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_field_with_tag() {
        let raw = json!({ "Destination": "rDest", "DestinationTag": 42 });

        let dest = account_field(&raw, "Destination", Some("DestinationTag")).unwrap();
        assert_eq!(dest.address, "rDest");
        assert_eq!(dest.tag, Some(42));
    }

    #[test]
    fn test_account_field_missing() {
        let raw = json!({ "DestinationTag": 42 });
        assert!(account_field(&raw, "Destination", Some("DestinationTag")).is_none());
    }

    #[test]
    fn test_numeric_readers_reject_wrong_types() {
        let raw = json!({ "Sequence": "12", "Flags": -1, "TickSize": 300 });

        assert_eq!(u32_field(&raw, "Sequence"), None);
        assert_eq!(u32_field(&raw, "Flags"), None);
        assert_eq!(u8_field(&raw, "TickSize"), None);
    }

    #[test]
    fn test_ledger_time() {
        let time = ledger_time(0).unwrap();
        assert_eq!(time.to_rfc3339(), "2000-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_hex_text() {
        assert_eq!(decode_hex_text("6578616D706C652E636F6D").as_deref(), Some("example.com"));
        assert_eq!(decode_hex_text("zz"), None);
    }

    #[test]
    fn test_flag_set() {
        let raw = json!({ "Flags": 0x00020000u32 });
        assert!(flag_set(&raw, 0x00020000));
        assert!(!flag_set(&raw, 0x00010000));
        assert!(!flag_set(&json!({}), 0x1));
    }

    #[test]
    fn test_counterparty() {
        let alice = Some(AccountRef::new("rAlice"));
        let bob = Some(AccountRef::new("rBob"));

        assert_eq!(counterparty(alice.clone(), bob.clone(), "rAlice"), bob);
        assert_eq!(counterparty(alice.clone(), bob.clone(), "rBob"), alice);
        assert_eq!(counterparty(alice.clone(), bob.clone(), "rCarol"), alice);
        assert_eq!(counterparty(alice.clone(), None, "rAlice"), None);
        assert_eq!(counterparty(alice.clone(), alice.clone(), "rAlice"), None);
        assert_eq!(counterparty(None, bob.clone(), "rAlice"), bob);
    }

    #[test]
    fn test_signer_entries() {
        let raw = json!({
            "SignerEntries": [
                { "SignerEntry": { "Account": "rA", "SignerWeight": 1 } },
                { "SignerEntry": { "Account": "rB", "SignerWeight": 2 } },
                { "NotAnEntry": {} }
            ]
        });

        let entries = signer_entries(&raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], SignerEntry { account: "rB".to_string(), weight: 2 });
    }
}
