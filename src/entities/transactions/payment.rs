// 💸 Payment

use crate::amount::CanonicalAmount;
use crate::entities::common::{account_field, str_field, AccountRef};
use crate::entities::transaction::transaction_variant;
use serde_json::Value;

/// Allow delivering less than `Amount`
pub const TF_PARTIAL_PAYMENT: u32 = 0x0002_0000;

transaction_variant!(
    /// Value moving from `Account` to `Destination`
    Payment,
    ["Destination", "DestinationTag", "Amount", "SendMax", "DeliverMin", "InvoiceID", "Paths"]
);

impl Payment {
    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", Some("DestinationTag"))
    }

    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    pub fn send_max(&self) -> Option<CanonicalAmount> {
        self.base.amount("SendMax")
    }

    pub fn deliver_min(&self) -> Option<CanonicalAmount> {
        self.base.amount("DeliverMin")
    }

    pub fn invoice_id(&self) -> Option<&str> {
        str_field(self.raw(), "InvoiceID")
    }

    pub fn paths(&self) -> Option<&Value> {
        self.raw().get("Paths")
    }

    pub fn is_partial_payment(&self) -> bool {
        self.has_flag(TF_PARTIAL_PAYMENT)
    }

    /// What actually arrived, according to the metadata
    ///
    /// The node reports "unavailable" for payments from before the
    /// delivered-amount field existed; that reads as None.
    pub fn delivered_amount(&self) -> Option<CanonicalAmount> {
        let meta = self.meta()?;
        let delivered = meta
            .get("delivered_amount")
            .or_else(|| meta.get("DeliveredAmount"))?;

        if delivered.as_str() == Some("unavailable") {
            return None;
        }
        Some(self.normalizer().normalize(delivered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_fields() {
        let payment = Payment::new(
            json!({
                "TransactionType": "Payment",
                "Account": "rSender",
                "Destination": "rReceiver",
                "DestinationTag": 1234,
                "Amount": { "currency": "USD", "issuer": "rIssuer", "value": "10" },
                "SendMax": "1500000",
                "Flags": TF_PARTIAL_PAYMENT
            }),
            Some(json!({ "TransactionResult": "tesSUCCESS", "delivered_amount": { "currency": "USD", "issuer": "rIssuer", "value": "9.5" } })),
        );

        assert_eq!(payment.destination(), Some(AccountRef::new("rReceiver").with_tag(Some(1234))));
        assert_eq!(payment.amount().unwrap().currency, "USD");
        assert_eq!(payment.send_max().unwrap().currency, "XRP");
        assert_eq!(payment.deliver_min(), None);
        assert!(payment.is_partial_payment());
        assert_eq!(payment.delivered_amount().unwrap().value, "9.5");
    }

    #[test]
    fn test_delivered_amount_unavailable() {
        let payment = Payment::new(
            json!({ "Amount": "100" }),
            Some(json!({ "delivered_amount": "unavailable" })),
        );
        assert_eq!(payment.delivered_amount(), None);
    }
}
