// 🏛️ Field Registry - which protocol fields an entity carries
//
// Every entity starts from a base list (fields shared by all transactions, or
// by all ledger objects) and each concrete variant appends its own. The list
// is what diffing/serialization layers walk, so it must be complete and must
// never contain the same field twice.

use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Plain string (type tags, ids)
    String,
    /// Unsigned integer (UInt8/16/32)
    UInt,
    /// Drops string or issued-amount record
    Amount,
    /// Classic address
    Account,
    /// Hex-encoded 256-bit hash
    Hash,
    /// Arbitrary hex blob (keys, signatures, domains)
    Blob,
    /// Seconds since the ledger epoch
    Timestamp,
    /// JSON array (memos, paths, signer entries)
    Array,
}

// ============================================================================
// FIELD DEFINITION
// ============================================================================

/// FieldDefinition - what a protocol field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldDefinition {
    FieldDefinition { name, kind }
}

/// Catalog of every field any supported entity exposes
const CATALOG: &[FieldDefinition] = &[
    // Common transaction fields
    field("TransactionType", FieldKind::String),
    field("Account", FieldKind::Account),
    field("Fee", FieldKind::Amount),
    field("Sequence", FieldKind::UInt),
    field("Flags", FieldKind::UInt),
    field("SourceTag", FieldKind::UInt),
    field("LastLedgerSequence", FieldKind::UInt),
    field("TicketSequence", FieldKind::UInt),
    field("SigningPubKey", FieldKind::Blob),
    field("TxnSignature", FieldKind::Blob),
    field("Memos", FieldKind::Array),
    field("Signers", FieldKind::Array),
    field("AccountTxnID", FieldKind::Hash),
    field("NetworkID", FieldKind::UInt),
    // Common ledger object fields
    field("LedgerEntryType", FieldKind::String),
    field("index", FieldKind::Hash),
    field("PreviousTxnID", FieldKind::Hash),
    field("PreviousTxnLgrSeq", FieldKind::UInt),
    field("OwnerNode", FieldKind::String),
    // Variant fields
    field("Amount", FieldKind::Amount),
    field("Authorize", FieldKind::Account),
    field("Balance", FieldKind::Amount),
    field("BookDirectory", FieldKind::Hash),
    field("BookNode", FieldKind::String),
    field("CancelAfter", FieldKind::Timestamp),
    field("Channel", FieldKind::Hash),
    field("CheckID", FieldKind::Hash),
    field("ClearFlag", FieldKind::UInt),
    field("Condition", FieldKind::Blob),
    field("DeliverMin", FieldKind::Amount),
    field("Destination", FieldKind::Account),
    field("DestinationNode", FieldKind::String),
    field("DestinationTag", FieldKind::UInt),
    field("Domain", FieldKind::Blob),
    field("EmailHash", FieldKind::Blob),
    field("Expiration", FieldKind::Timestamp),
    field("FinishAfter", FieldKind::Timestamp),
    field("Fulfillment", FieldKind::Blob),
    field("HighLimit", FieldKind::Amount),
    field("HighNode", FieldKind::String),
    field("InvoiceID", FieldKind::Hash),
    field("Issuer", FieldKind::Account),
    field("LimitAmount", FieldKind::Amount),
    field("LowLimit", FieldKind::Amount),
    field("LowNode", FieldKind::String),
    field("MessageKey", FieldKind::Blob),
    field("NFTokenBrokerFee", FieldKind::Amount),
    field("NFTokenBuyOffer", FieldKind::Hash),
    field("NFTokenID", FieldKind::Hash),
    field("NFTokenMinter", FieldKind::Account),
    field("NFTokenOfferNode", FieldKind::String),
    field("NFTokenOffers", FieldKind::Array),
    field("NFTokenSellOffer", FieldKind::Hash),
    field("NFTokenTaxon", FieldKind::UInt),
    field("OfferID", FieldKind::Hash),
    field("OfferSequence", FieldKind::UInt),
    field("Owner", FieldKind::Account),
    field("Paths", FieldKind::Array),
    field("PublicKey", FieldKind::Blob),
    field("QualityIn", FieldKind::UInt),
    field("QualityOut", FieldKind::UInt),
    field("RegularKey", FieldKind::Account),
    field("SendMax", FieldKind::Amount),
    field("SetFlag", FieldKind::UInt),
    field("SettleDelay", FieldKind::UInt),
    field("Signature", FieldKind::Blob),
    field("SignerEntries", FieldKind::Array),
    field("SignerListID", FieldKind::UInt),
    field("SignerQuorum", FieldKind::UInt),
    field("TakerGets", FieldKind::Amount),
    field("TakerPays", FieldKind::Amount),
    field("TickSize", FieldKind::UInt),
    field("TicketCount", FieldKind::UInt),
    field("TransferFee", FieldKind::UInt),
    field("TransferRate", FieldKind::UInt),
    field("Unauthorize", FieldKind::Account),
    field("URI", FieldKind::Blob),
];

/// Fields shared by every transaction
pub const TRANSACTION_BASE_FIELDS: &[&str] = &[
    "TransactionType",
    "Account",
    "Fee",
    "Sequence",
    "Flags",
    "SourceTag",
    "LastLedgerSequence",
    "TicketSequence",
    "SigningPubKey",
    "TxnSignature",
    "Memos",
    "Signers",
    "AccountTxnID",
    "NetworkID",
];

/// Fields shared by every ledger object
pub const LEDGER_OBJECT_BASE_FIELDS: &[&str] = &[
    "LedgerEntryType",
    "Flags",
    "index",
    "PreviousTxnID",
    "PreviousTxnLgrSeq",
    "OwnerNode",
];

/// Look up a field in the catalog
pub fn definition(name: &str) -> Option<FieldDefinition> {
    CATALOG.iter().find(|def| def.name == name).copied()
}

// ============================================================================
// FIELD REGISTRY
// ============================================================================

/// FieldRegistry - ordered, duplicate-free list of field names for one entity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldRegistry {
    names: Vec<&'static str>,
}

impl FieldRegistry {
    /// Start from a base list
    pub fn new(base: &[&'static str]) -> Self {
        let mut registry = FieldRegistry { names: Vec::new() };
        registry.extend(base);
        registry
    }

    /// Append variant fields, skipping any already registered
    pub fn extend(&mut self, fields: &[&'static str]) {
        for name in fields {
            debug_assert!(definition(name).is_some(), "field {name} missing from catalog");

            if !self.names.contains(name) {
                self.names.push(name);
            }
        }
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| *n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Catalog definitions for every registered field
    pub fn definitions(&self) -> Vec<FieldDefinition> {
        self.names.iter().filter_map(|name| definition(name)).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
