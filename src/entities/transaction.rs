// 🧾 Transaction model - shared base + closed set of variants
//
// A transaction is built once from the node's JSON (plus optional meta) and is
// read-only afterwards. The only write ever made to the payload is injecting
// `TransactionType` when a locally built, unsubmitted transaction lacks it.

use crate::amount::{AmountNormalizer, CanonicalAmount};
use crate::entities::common::{
    account_field, amount_field, decode_hex_text, flag_set, into_object, str_field, time_field,
    u32_field, AccountRef, TypeTag,
};
use crate::entities::transactions::*;
use crate::fields::{FieldRegistry, TRANSACTION_BASE_FIELDS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

/// TransactionType - every transaction kind this crate models
///
/// The string form is exactly the ledger's `TransactionType` tag.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
)]
pub enum TransactionType {
    Payment,
    OfferCreate,
    OfferCancel,
    TrustSet,
    AccountSet,
    AccountDelete,
    SetRegularKey,
    SignerListSet,
    EscrowCreate,
    EscrowFinish,
    EscrowCancel,
    PaymentChannelCreate,
    PaymentChannelFund,
    PaymentChannelClaim,
    CheckCreate,
    CheckCash,
    CheckCancel,
    DepositPreauth,
    TicketCreate,
    NFTokenMint,
    NFTokenBurn,
    NFTokenCreateOffer,
    NFTokenCancelOffer,
    NFTokenAcceptOffer,
}

/// Discriminant of a transaction, known or not
pub type TransactionTag = TypeTag<TransactionType>;

// ============================================================================
// MEMOS
// ============================================================================

/// A transaction memo with its hex fields decoded to text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Memo {
    pub memo_type: Option<String>,
    pub memo_data: Option<String>,
    pub memo_format: Option<String>,
}

// ============================================================================
// BASE TRANSACTION
// ============================================================================

/// BaseTransaction - fields every transaction carries
#[derive(Debug, Clone)]
pub struct BaseTransaction {
    tx: Value,
    meta: Option<Value>,
    fields: FieldRegistry,
    normalizer: AmountNormalizer,
}

impl BaseTransaction {
    pub fn new(tx: Value, meta: Option<Value>, normalizer: AmountNormalizer) -> Self {
        BaseTransaction {
            tx: into_object(tx, "transaction"),
            meta: meta.filter(|m| !m.is_null()),
            fields: FieldRegistry::new(TRANSACTION_BASE_FIELDS),
            normalizer,
        }
    }

    /// Inject the type tag into the payload if the payload has none
    pub(crate) fn assume_type(&mut self, kind: TransactionType) {
        match str_field(&self.tx, "TransactionType") {
            Some(tag) => debug_assert_eq!(
                tag,
                kind.as_ref(),
                "{} constructor used for a {} payload",
                kind,
                tag
            ),
            None => {
                if let Some(map) = self.tx.as_object_mut() {
                    map.insert("TransactionType".to_string(), Value::String(kind.to_string()));
                }
            }
        }
    }

    /// Stamp a tag the caller supplied onto a payload that has none
    pub(crate) fn fill_missing_type(&mut self, tag: &str) {
        if tag.is_empty() || str_field(&self.tx, "TransactionType").is_some() {
            return;
        }
        if let Some(map) = self.tx.as_object_mut() {
            map.insert("TransactionType".to_string(), Value::String(tag.to_string()));
        }
    }

    pub(crate) fn register_fields(&mut self, fields: &[&'static str]) {
        self.fields.extend(fields);
    }

    // ------------------------------------------------------------------------
    // Raw access
    // ------------------------------------------------------------------------

    pub fn raw(&self) -> &Value {
        &self.tx
    }

    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub(crate) fn normalizer(&self) -> &AmountNormalizer {
        &self.normalizer
    }

    pub(crate) fn amount(&self, key: &str) -> Option<CanonicalAmount> {
        amount_field(&self.tx, key, &self.normalizer)
    }

    // ------------------------------------------------------------------------
    // Common fields
    // ------------------------------------------------------------------------

    /// The `TransactionType` tag as found (or injected) in the payload
    pub fn transaction_type(&self) -> Option<&str> {
        str_field(&self.tx, "TransactionType")
    }

    pub fn account(&self) -> Option<AccountRef> {
        account_field(&self.tx, "Account", Some("SourceTag"))
    }

    /// Fee in drops of the native asset
    pub fn fee(&self) -> Option<CanonicalAmount> {
        self.amount("Fee")
    }

    pub fn sequence(&self) -> Option<u32> {
        u32_field(&self.tx, "Sequence")
    }

    pub fn flags(&self) -> Option<u32> {
        u32_field(&self.tx, "Flags")
    }

    pub fn has_flag(&self, mask: u32) -> bool {
        flag_set(&self.tx, mask)
    }

    pub fn hash(&self) -> Option<&str> {
        str_field(&self.tx, "hash")
    }

    pub fn last_ledger_sequence(&self) -> Option<u32> {
        u32_field(&self.tx, "LastLedgerSequence")
    }

    pub fn ticket_sequence(&self) -> Option<u32> {
        u32_field(&self.tx, "TicketSequence")
    }

    pub fn signing_pub_key(&self) -> Option<&str> {
        str_field(&self.tx, "SigningPubKey")
    }

    pub fn ledger_index(&self) -> Option<u32> {
        u32_field(&self.tx, "ledger_index")
    }

    /// Close time of the ledger that included the transaction
    pub fn date(&self) -> Option<DateTime<Utc>> {
        time_field(&self.tx, "date")
    }

    pub fn memos(&self) -> Vec<Memo> {
        let Some(memos) = self.tx.get("Memos").and_then(Value::as_array) else {
            return Vec::new();
        };

        memos
            .iter()
            .filter_map(|wrapper| wrapper.get("Memo"))
            .map(|memo| Memo {
                memo_type: str_field(memo, "MemoType").and_then(decode_hex_text),
                memo_data: str_field(memo, "MemoData").and_then(decode_hex_text),
                memo_format: str_field(memo, "MemoFormat").and_then(decode_hex_text),
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------------

    /// Engine result code, e.g. "tesSUCCESS"
    pub fn transaction_result(&self) -> Option<&str> {
        str_field(self.meta.as_ref()?, "TransactionResult")
    }

    pub fn is_successful(&self) -> Option<bool> {
        self.transaction_result().map(|result| result == "tesSUCCESS")
    }

    /// Final fields of the first deleted ledger entry of a given type
    pub fn deleted_node(&self, entry_type: &str) -> Option<&Value> {
        self.meta
            .as_ref()?
            .get("AffectedNodes")?
            .as_array()?
            .iter()
            .filter_map(|node| node.get("DeletedNode"))
            .find(|node| str_field(node, "LedgerEntryType") == Some(entry_type))?
            .get("FinalFields")
    }
}

// ============================================================================
// VARIANT DECLARATION
// ============================================================================

/// Declare a transaction variant: a newtype over BaseTransaction that stamps
/// its type tag and registers its own fields on construction.
macro_rules! transaction_variant {
    ($(#[$doc:meta])* $name:ident, [$($field:literal),* $(,)?]) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base: $crate::entities::transaction::BaseTransaction,
        }

        impl $name {
            pub const TYPE: $crate::entities::transaction::TransactionType =
                $crate::entities::transaction::TransactionType::$name;

            pub const FIELDS: &'static [&'static str] = &[$($field),*];

            /// Build from a raw payload using the default native asset
            pub fn new(tx: serde_json::Value, meta: Option<serde_json::Value>) -> Self {
                Self::from_base($crate::entities::transaction::BaseTransaction::new(
                    tx,
                    meta,
                    $crate::amount::AmountNormalizer::default(),
                ))
            }

            pub(crate) fn from_base(mut base: $crate::entities::transaction::BaseTransaction) -> Self {
                base.assume_type(Self::TYPE);
                base.register_fields(Self::FIELDS);
                $name { base }
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::entities::transaction::BaseTransaction;

            fn deref(&self) -> &Self::Target {
                &self.base
            }
        }
    };
}

pub(crate) use transaction_variant;

// ============================================================================
// UNKNOWN TRANSACTION
// ============================================================================

/// A transaction whose type this crate does not model
///
/// Kept so it can still be listed (as "unsupported") and passed through.
#[derive(Debug, Clone)]
pub struct UnknownTransaction {
    base: BaseTransaction,
    tag: String,
}

impl UnknownTransaction {
    pub(crate) fn from_base(base: BaseTransaction, tag: String) -> Self {
        UnknownTransaction { base, tag }
    }

    /// The unrecognized tag (empty if the payload had none at all)
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl std::ops::Deref for UnknownTransaction {
    type Target = BaseTransaction;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

// ============================================================================
// TRANSACTION (sum type)
// ============================================================================

macro_rules! transaction_enum {
    ($($variant:ident),* $(,)?) => {
        /// Transaction - one case per supported type, plus Unknown
        #[derive(Debug, Clone)]
        pub enum Transaction {
            $($variant($variant),)*
            Unknown(UnknownTransaction),
        }

        impl Transaction {
            /// Shared fields, whatever the variant
            pub fn base(&self) -> &BaseTransaction {
                match self {
                    $(Transaction::$variant(tx) => &**tx,)*
                    Transaction::Unknown(tx) => &**tx,
                }
            }

            /// Resolved discriminant
            pub fn tag(&self) -> TransactionTag {
                match self {
                    $(Transaction::$variant(_) => TypeTag::Known(TransactionType::$variant),)*
                    Transaction::Unknown(tx) => TypeTag::Unknown(tx.tag().to_string()),
                }
            }

            /// Wrap a base into the variant for `kind`
            pub(crate) fn build(kind: TransactionType, base: BaseTransaction) -> Self {
                match kind {
                    $(TransactionType::$variant => Transaction::$variant($variant::from_base(base)),)*
                }
            }
        }
    };
}

transaction_enum!(
    Payment,
    OfferCreate,
    OfferCancel,
    TrustSet,
    AccountSet,
    AccountDelete,
    SetRegularKey,
    SignerListSet,
    EscrowCreate,
    EscrowFinish,
    EscrowCancel,
    PaymentChannelCreate,
    PaymentChannelFund,
    PaymentChannelClaim,
    CheckCreate,
    CheckCash,
    CheckCancel,
    DepositPreauth,
    TicketCreate,
    NFTokenMint,
    NFTokenBurn,
    NFTokenCreateOffer,
    NFTokenCancelOffer,
    NFTokenAcceptOffer,
);

impl Transaction {
    /// Build from a raw payload with default settings (see `EntityFactory`)
    pub fn from_raw(tx: Value, meta: Option<Value>) -> Self {
        crate::factory::transaction_from_raw(tx, meta)
    }

    /// Known kind, or None for Unknown
    pub fn kind(&self) -> Option<TransactionType> {
        match self.tag() {
            TypeTag::Known(kind) => Some(kind),
            TypeTag::Unknown(_) => None,
        }
    }

    /// The type name as a string, known or not
    pub fn type_name(&self) -> &str {
        match self {
            Transaction::Unknown(tx) => tx.tag(),
            known => known.kind().map(<&'static str>::from).unwrap_or_default(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Transaction::Unknown(_))
    }

    pub fn native_currency(&self) -> &str {
        self.base().normalizer().native_currency()
    }
}

// ============================================================================
// TESTS
// ============================================================================
