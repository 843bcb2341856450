// 🔁 Payment channels

use crate::amount::CanonicalAmount;
use crate::entities::common::{account_field, str_field, time_field, u32_field, AccountRef};
use crate::entities::transaction::transaction_variant;
use chrono::{DateTime, Utc};

transaction_variant!(
    /// Open a unidirectional channel funded with the native asset
    PaymentChannelCreate,
    ["Amount", "Destination", "DestinationTag", "SettleDelay", "PublicKey", "CancelAfter"]
);

impl PaymentChannelCreate {
    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", Some("DestinationTag"))
    }

    /// Seconds the source must wait before closing a channel with unclaimed funds
    pub fn settle_delay(&self) -> Option<u32> {
        u32_field(self.raw(), "SettleDelay")
    }

    pub fn public_key(&self) -> Option<&str> {
        str_field(self.raw(), "PublicKey")
    }

    pub fn cancel_after(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "CancelAfter")
    }
}

transaction_variant!(
    /// Add funds to an open channel
    PaymentChannelFund,
    ["Channel", "Amount", "Expiration"]
);

impl PaymentChannelFund {
    pub fn channel(&self) -> Option<&str> {
        str_field(self.raw(), "Channel")
    }

    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "Expiration")
    }
}

transaction_variant!(
    /// Claim from, renew, or close a channel
    PaymentChannelClaim,
    ["Channel", "Balance", "Amount", "Signature", "PublicKey"]
);

impl PaymentChannelClaim {
    pub fn channel(&self) -> Option<&str> {
        str_field(self.raw(), "Channel")
    }

    /// Total delivered by the channel after this claim
    pub fn balance(&self) -> Option<CanonicalAmount> {
        self.base.amount("Balance")
    }

    /// Amount authorized by the signature
    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    pub fn signature(&self) -> Option<&str> {
        str_field(self.raw(), "Signature")
    }

    pub fn public_key(&self) -> Option<&str> {
        str_field(self.raw(), "PublicKey")
    }
}
