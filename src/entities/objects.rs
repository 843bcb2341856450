// 📦 Ledger object model - entries returned by account_objects / ledger_entry
//
// Same shape as the transaction model: one shared base plus a closed set of
// variants, each registering its own fields on construction.

use crate::amount::{AmountNormalizer, CanonicalAmount};
use crate::entities::common::{
    account_field, amount_field, flag_set, into_object, signer_entries, str_field, time_field,
    u32_field, AccountRef, SignerEntry, TypeTag,
};
use crate::fields::{FieldRegistry, LEDGER_OBJECT_BASE_FIELDS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Offer: no funds move when the offer crosses at exactly its own rate
pub const LSF_PASSIVE: u32 = 0x0001_0000;
/// Offer: sell exactly TakerGets, even for more than TakerPays
pub const LSF_SELL: u32 = 0x0002_0000;
/// NFTokenOffer: a sell offer
pub const LSF_SELL_NFTOKEN: u32 = 0x0000_0001;

// ============================================================================
// LEDGER OBJECT TYPE
// ============================================================================

/// LedgerObjectType - every ledger entry kind this crate models
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
pub enum LedgerObjectType {
    Offer,
    Escrow,
    Check,
    NFTokenOffer,
    Ticket,
    PayChannel,
    DepositPreauth,
    SignerList,
    RippleState,
}

pub type LedgerObjectTag = TypeTag<LedgerObjectType>;

// ============================================================================
// BASE LEDGER OBJECT
// ============================================================================

#[derive(Debug, Clone)]
pub struct BaseLedgerObject {
    raw: Value,
    fields: FieldRegistry,
    normalizer: AmountNormalizer,
}

impl BaseLedgerObject {
    pub fn new(raw: Value, normalizer: AmountNormalizer) -> Self {
        BaseLedgerObject {
            raw: into_object(raw, "ledger object"),
            fields: FieldRegistry::new(LEDGER_OBJECT_BASE_FIELDS),
            normalizer,
        }
    }

    pub(crate) fn assume_type(&mut self, kind: LedgerObjectType) {
        match str_field(&self.raw, "LedgerEntryType") {
            Some(tag) => debug_assert_eq!(
                tag,
                kind.as_ref(),
                "{} constructor used for a {} entry",
                kind,
                tag
            ),
            None => {
                if let Some(map) = self.raw.as_object_mut() {
                    map.insert("LedgerEntryType".to_string(), Value::String(kind.to_string()));
                }
            }
        }
    }

    pub(crate) fn fill_missing_type(&mut self, tag: &str) {
        if tag.is_empty() || str_field(&self.raw, "LedgerEntryType").is_some() {
            return;
        }
        if let Some(map) = self.raw.as_object_mut() {
            map.insert("LedgerEntryType".to_string(), Value::String(tag.to_string()));
        }
    }

    pub(crate) fn register_fields(&mut self, fields: &[&'static str]) {
        self.fields.extend(fields);
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub(crate) fn normalizer(&self) -> &AmountNormalizer {
        &self.normalizer
    }

    pub(crate) fn amount(&self, key: &str) -> Option<CanonicalAmount> {
        amount_field(&self.raw, key, &self.normalizer)
    }

    /// The `LedgerEntryType` tag as found (or injected)
    pub fn object_type(&self) -> Option<&str> {
        str_field(&self.raw, "LedgerEntryType")
    }

    /// Ledger object id
    pub fn index(&self) -> Option<&str> {
        str_field(&self.raw, "index")
    }

    pub fn flags(&self) -> Option<u32> {
        u32_field(&self.raw, "Flags")
    }

    pub fn has_flag(&self, mask: u32) -> bool {
        flag_set(&self.raw, mask)
    }

    pub fn previous_txn_id(&self) -> Option<&str> {
        str_field(&self.raw, "PreviousTxnID")
    }

    pub fn previous_txn_lgr_seq(&self) -> Option<u32> {
        u32_field(&self.raw, "PreviousTxnLgrSeq")
    }
}

macro_rules! ledger_object_variant {
    ($(#[$doc:meta])* $name:ident, [$($field:literal),* $(,)?]) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base: BaseLedgerObject,
        }

        impl $name {
            pub const TYPE: LedgerObjectType = LedgerObjectType::$name;

            pub const FIELDS: &'static [&'static str] = &[$($field),*];

            pub fn new(raw: Value) -> Self {
                Self::from_base(BaseLedgerObject::new(raw, AmountNormalizer::default()))
            }

            pub(crate) fn from_base(mut base: BaseLedgerObject) -> Self {
                base.assume_type(Self::TYPE);
                base.register_fields(Self::FIELDS);
                $name { base }
            }
        }

        impl std::ops::Deref for $name {
            type Target = BaseLedgerObject;

            fn deref(&self) -> &Self::Target {
                &self.base
            }
        }
    };
}

// ============================================================================
// VARIANTS
// ============================================================================

ledger_object_variant!(
    /// Standing order in the decentralized exchange
    Offer,
    ["Account", "Sequence", "TakerGets", "TakerPays", "Expiration", "BookDirectory", "BookNode"]
);

impl Offer {
    pub fn account(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Account", None)
    }

    pub fn sequence(&self) -> Option<u32> {
        u32_field(self.raw(), "Sequence")
    }

    pub fn taker_gets(&self) -> Option<CanonicalAmount> {
        self.base.amount("TakerGets")
    }

    pub fn taker_pays(&self) -> Option<CanonicalAmount> {
        self.base.amount("TakerPays")
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "Expiration")
    }

    pub fn book_directory(&self) -> Option<&str> {
        str_field(self.raw(), "BookDirectory")
    }

    pub fn is_passive(&self) -> bool {
        self.has_flag(LSF_PASSIVE)
    }

    pub fn is_sell(&self) -> bool {
        self.has_flag(LSF_SELL)
    }
}

ledger_object_variant!(
    /// Funds held until a time or condition
    Escrow,
    [
        "Account",
        "SourceTag",
        "Destination",
        "DestinationTag",
        "Amount",
        "Condition",
        "FinishAfter",
        "CancelAfter",
        "DestinationNode",
    ]
);

impl Escrow {
    pub fn account(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Account", Some("SourceTag"))
    }

    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", Some("DestinationTag"))
    }

    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    pub fn condition(&self) -> Option<&str> {
        str_field(self.raw(), "Condition")
    }

    pub fn finish_after(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "FinishAfter")
    }

    pub fn cancel_after(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "CancelAfter")
    }
}

ledger_object_variant!(
    /// Uncashed check
    Check,
    [
        "Account",
        "SourceTag",
        "Destination",
        "DestinationTag",
        "SendMax",
        "Sequence",
        "Expiration",
        "InvoiceID",
        "DestinationNode",
    ]
);

impl Check {
    pub fn account(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Account", Some("SourceTag"))
    }

    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", Some("DestinationTag"))
    }

    pub fn send_max(&self) -> Option<CanonicalAmount> {
        self.base.amount("SendMax")
    }

    pub fn sequence(&self) -> Option<u32> {
        u32_field(self.raw(), "Sequence")
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "Expiration")
    }

    pub fn invoice_id(&self) -> Option<&str> {
        str_field(self.raw(), "InvoiceID")
    }
}

ledger_object_variant!(
    /// Open offer to buy or sell a token
    NFTokenOffer,
    ["Owner", "Destination", "Amount", "NFTokenID", "Expiration", "NFTokenOfferNode"]
);

impl NFTokenOffer {
    pub fn owner(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Owner", None)
    }

    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", None)
    }

    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    pub fn nftoken_id(&self) -> Option<&str> {
        str_field(self.raw(), "NFTokenID")
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "Expiration")
    }

    pub fn is_sell_offer(&self) -> bool {
        self.has_flag(LSF_SELL_NFTOKEN)
    }
}

ledger_object_variant!(
    /// Reserved sequence number
    Ticket,
    ["Account", "TicketSequence"]
);

impl Ticket {
    pub fn account(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Account", None)
    }

    pub fn ticket_sequence(&self) -> Option<u32> {
        u32_field(self.raw(), "TicketSequence")
    }
}

ledger_object_variant!(
    /// Open payment channel
    PayChannel,
    [
        "Account",
        "SourceTag",
        "Destination",
        "DestinationTag",
        "Amount",
        "Balance",
        "SettleDelay",
        "PublicKey",
        "Expiration",
        "CancelAfter",
        "DestinationNode",
    ]
);

impl PayChannel {
    pub fn account(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Account", Some("SourceTag"))
    }

    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", Some("DestinationTag"))
    }

    /// Total allocated to the channel
    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    /// Already paid out
    pub fn balance(&self) -> Option<CanonicalAmount> {
        self.base.amount("Balance")
    }

    pub fn settle_delay(&self) -> Option<u32> {
        u32_field(self.raw(), "SettleDelay")
    }

    pub fn public_key(&self) -> Option<&str> {
        str_field(self.raw(), "PublicKey")
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "Expiration")
    }

    pub fn cancel_after(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "CancelAfter")
    }
}

ledger_object_variant!(
    /// Preauthorization for an account to deliver payments
    DepositPreauth,
    ["Account", "Authorize"]
);

impl DepositPreauth {
    pub fn account(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Account", None)
    }

    pub fn authorize(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Authorize", None)
    }
}

ledger_object_variant!(
    /// Multi-signing list
    SignerList,
    ["SignerQuorum", "SignerEntries", "SignerListID"]
);

impl SignerList {
    pub fn signer_quorum(&self) -> Option<u32> {
        u32_field(self.raw(), "SignerQuorum")
    }

    pub fn signer_entries(&self) -> Option<Vec<SignerEntry>> {
        signer_entries(self.raw())
    }

    pub fn signer_list_id(&self) -> Option<u32> {
        u32_field(self.raw(), "SignerListID")
    }
}

ledger_object_variant!(
    /// Trust line between two accounts
    ///
    /// Stored once for both sides: `Balance` is from the low account's point
    /// of view, and each limit's issuer names the side that set it.
    RippleState,
    ["Balance", "LowLimit", "HighLimit", "LowNode", "HighNode", "QualityIn", "QualityOut"]
);

impl RippleState {
    pub fn balance(&self) -> Option<CanonicalAmount> {
        self.base.amount("Balance")
    }

    pub fn low_limit(&self) -> Option<CanonicalAmount> {
        self.base.amount("LowLimit")
    }

    pub fn high_limit(&self) -> Option<CanonicalAmount> {
        self.base.amount("HighLimit")
    }

    fn low_account(&self) -> Option<String> {
        self.low_limit()?.issuer
    }

    fn high_account(&self) -> Option<String> {
        self.high_limit()?.issuer
    }

    /// The other side of the trust line
    pub fn counterparty_of(&self, viewer: &str) -> Option<AccountRef> {
        let low = self.low_account().map(AccountRef::new);
        let high = self.high_account().map(AccountRef::new);
        crate::entities::common::counterparty(low, high, viewer)
    }

    /// Balance as seen by `viewer`: positive means the counterparty owes
    /// the viewer. The issuer is set to the counterparty.
    pub fn balance_for(&self, viewer: &str) -> Option<CanonicalAmount> {
        let mut balance = self.balance()?;
        let viewer_is_high = self.high_account().as_deref() == Some(viewer);

        if viewer_is_high {
            balance.value = negate(&balance.value);
        }
        balance.issuer = self.counterparty_of(viewer).map(|party| party.address);
        Some(balance)
    }
}

fn negate(value: &str) -> String {
    match value.strip_prefix('-') {
        Some(positive) => positive.to_string(),
        None if value.is_empty() || value.trim_start_matches(['0', '.']).is_empty() => {
            value.to_string()
        }
        None => format!("-{value}"),
    }
}

// ============================================================================
// UNKNOWN LEDGER OBJECT
// ============================================================================

/// A ledger entry whose type this crate does not model
#[derive(Debug, Clone)]
pub struct UnknownLedgerObject {
    base: BaseLedgerObject,
    tag: String,
}

impl UnknownLedgerObject {
    pub(crate) fn from_base(base: BaseLedgerObject, tag: String) -> Self {
        UnknownLedgerObject { base, tag }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl std::ops::Deref for UnknownLedgerObject {
    type Target = BaseLedgerObject;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

// ============================================================================
// LEDGER OBJECT (sum type)
// ============================================================================

macro_rules! ledger_object_enum {
    ($($variant:ident),* $(,)?) => {
        /// LedgerObject - one case per supported entry type, plus Unknown
        #[derive(Debug, Clone)]
        pub enum LedgerObject {
            $($variant($variant),)*
            Unknown(UnknownLedgerObject),
        }

        impl LedgerObject {
            pub fn base(&self) -> &BaseLedgerObject {
                match self {
                    $(LedgerObject::$variant(obj) => &**obj,)*
                    LedgerObject::Unknown(obj) => &**obj,
                }
            }

            pub fn tag(&self) -> LedgerObjectTag {
                match self {
                    $(LedgerObject::$variant(_) => TypeTag::Known(LedgerObjectType::$variant),)*
                    LedgerObject::Unknown(obj) => TypeTag::Unknown(obj.tag().to_string()),
                }
            }

            pub(crate) fn build(kind: LedgerObjectType, base: BaseLedgerObject) -> Self {
                match kind {
                    $(LedgerObjectType::$variant => LedgerObject::$variant($variant::from_base(base)),)*
                }
            }
        }
    };
}

ledger_object_enum!(
    Offer,
    Escrow,
    Check,
    NFTokenOffer,
    Ticket,
    PayChannel,
    DepositPreauth,
    SignerList,
    RippleState,
);

impl LedgerObject {
    /// Build from a raw entry with default settings (see `EntityFactory`)
    pub fn from_raw(raw: Value) -> Self {
        crate::factory::ledger_object_from_raw(raw)
    }

    pub fn kind(&self) -> Option<LedgerObjectType> {
        match self.tag() {
            TypeTag::Known(kind) => Some(kind),
            TypeTag::Unknown(_) => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            LedgerObject::Unknown(obj) => obj.tag(),
            known => known.kind().map(<&'static str>::from).unwrap_or_default(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, LedgerObject::Unknown(_))
    }

    pub fn native_currency(&self) -> &str {
        self.base().normalizer().native_currency()
    }
}

// ============================================================================
// TESTS
// ============================================================================
