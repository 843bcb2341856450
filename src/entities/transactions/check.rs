// 🧾 Checks: deferred payments the destination can cash

use crate::amount::CanonicalAmount;
use crate::entities::common::{account_field, str_field, time_field, AccountRef};
use crate::entities::transaction::transaction_variant;
use chrono::{DateTime, Utc};

transaction_variant!(
    /// Write a check
    CheckCreate,
    ["Destination", "DestinationTag", "SendMax", "Expiration", "InvoiceID"]
);

impl CheckCreate {
    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", Some("DestinationTag"))
    }

    pub fn send_max(&self) -> Option<CanonicalAmount> {
        self.base.amount("SendMax")
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "Expiration")
    }

    pub fn invoice_id(&self) -> Option<&str> {
        str_field(self.raw(), "InvoiceID")
    }
}

transaction_variant!(
    /// Cash a check, either for an exact `Amount` or at least `DeliverMin`
    CheckCash,
    ["CheckID", "Amount", "DeliverMin"]
);

impl CheckCash {
    pub fn check_id(&self) -> Option<&str> {
        str_field(self.raw(), "CheckID")
    }

    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    pub fn deliver_min(&self) -> Option<CanonicalAmount> {
        self.base.amount("DeliverMin")
    }

    /// Writer of the cashed check, from the deleted Check entry in meta
    pub fn check_writer(&self) -> Option<AccountRef> {
        account_field(self.deleted_node("Check")?, "Account", Some("SourceTag"))
    }
}

transaction_variant!(
    /// Cancel a check without cashing it
    CheckCancel,
    ["CheckID"]
);

impl CheckCancel {
    pub fn check_id(&self) -> Option<&str> {
        str_field(self.raw(), "CheckID")
    }

    /// Both parties of the cancelled check (writer, destination), from meta
    pub fn check_parties(&self) -> Option<(Option<AccountRef>, Option<AccountRef>)> {
        let check = self.deleted_node("Check")?;
        Some((
            account_field(check, "Account", Some("SourceTag")),
            account_field(check, "Destination", Some("DestinationTag")),
        ))
    }
}
