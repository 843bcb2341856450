// ⏳ Escrow: time- or condition-locked native payments

use crate::amount::CanonicalAmount;
use crate::entities::common::{account_field, str_field, time_field, u32_field, AccountRef};
use crate::entities::transaction::transaction_variant;
use chrono::{DateTime, Utc};

transaction_variant!(
    /// Lock funds until a time or condition is met
    EscrowCreate,
    ["Amount", "Destination", "DestinationTag", "FinishAfter", "CancelAfter", "Condition"]
);

impl EscrowCreate {
    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", Some("DestinationTag"))
    }

    pub fn finish_after(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "FinishAfter")
    }

    pub fn cancel_after(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "CancelAfter")
    }

    pub fn condition(&self) -> Option<&str> {
        str_field(self.raw(), "Condition")
    }
}

transaction_variant!(
    /// Release escrowed funds to the destination
    EscrowFinish,
    ["Owner", "OfferSequence", "Condition", "Fulfillment"]
);

impl EscrowFinish {
    /// Account that created the escrow
    pub fn owner(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Owner", None)
    }

    /// Sequence of the EscrowCreate transaction
    pub fn offer_sequence(&self) -> Option<u32> {
        u32_field(self.raw(), "OfferSequence")
    }

    pub fn condition(&self) -> Option<&str> {
        str_field(self.raw(), "Condition")
    }

    pub fn fulfillment(&self) -> Option<&str> {
        str_field(self.raw(), "Fulfillment")
    }
}

transaction_variant!(
    /// Return expired escrowed funds to the owner
    EscrowCancel,
    ["Owner", "OfferSequence"]
);

impl EscrowCancel {
    pub fn owner(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Owner", None)
    }

    pub fn offer_sequence(&self) -> Option<u32> {
        u32_field(self.raw(), "OfferSequence")
    }
}
