// 📈 Offers on the decentralized exchange

use crate::amount::CanonicalAmount;
use crate::entities::common::{str_field, time_field, u32_field};
use crate::entities::transaction::transaction_variant;
use chrono::{DateTime, Utc};

pub const TF_PASSIVE: u32 = 0x0001_0000;
pub const TF_IMMEDIATE_OR_CANCEL: u32 = 0x0002_0000;
pub const TF_FILL_OR_KILL: u32 = 0x0004_0000;
pub const TF_SELL: u32 = 0x0008_0000;

transaction_variant!(
    /// Place an offer to exchange `TakerPays` for `TakerGets`
    OfferCreate,
    ["TakerGets", "TakerPays", "Expiration", "OfferSequence"]
);

impl OfferCreate {
    pub fn taker_gets(&self) -> Option<CanonicalAmount> {
        self.base.amount("TakerGets")
    }

    pub fn taker_pays(&self) -> Option<CanonicalAmount> {
        self.base.amount("TakerPays")
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "Expiration")
    }

    /// Sequence of an existing offer this one replaces
    pub fn offer_sequence(&self) -> Option<u32> {
        u32_field(self.raw(), "OfferSequence")
    }

    pub fn is_passive(&self) -> bool {
        self.has_flag(TF_PASSIVE)
    }

    pub fn is_immediate_or_cancel(&self) -> bool {
        self.has_flag(TF_IMMEDIATE_OR_CANCEL)
    }

    pub fn is_fill_or_kill(&self) -> bool {
        self.has_flag(TF_FILL_OR_KILL)
    }

    pub fn is_sell(&self) -> bool {
        self.has_flag(TF_SELL)
    }
}

transaction_variant!(
    /// Remove an offer from the order book
    OfferCancel,
    ["OfferSequence", "OfferID"]
);

impl OfferCancel {
    /// Sequence number of the offer being cancelled
    pub fn offer_sequence(&self) -> Option<u32> {
        u32_field(self.raw(), "OfferSequence")
    }

    /// Ledger id of the offer being cancelled
    ///
    /// Only present on payloads produced by newer protocol revisions. Absence
    /// says nothing about how the offer was cancelled.
    pub fn offer_id(&self) -> Option<&str> {
        str_field(self.raw(), "OfferID")
    }
}
