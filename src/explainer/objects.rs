// Ledger object explainers, one per LedgerObjectType

use super::{other_party, Explainer, Recipient, UNSUPPORTED_OBJECT_LABEL};
use crate::entities::{counterparty, LedgerObject, LedgerObjectType};

macro_rules! object_explainer {
    ($($body:tt)*) => {
        variant_explainer!(LedgerObject, UNSUPPORTED_OBJECT_LABEL; $($body)*);
    };
}

pub(super) fn explainer_for(kind: LedgerObjectType) -> &'static dyn Explainer<LedgerObject> {
    match kind {
        LedgerObjectType::Offer => &OfferExplainer,
        LedgerObjectType::Escrow => &EscrowExplainer,
        LedgerObjectType::Check => &CheckExplainer,
        LedgerObjectType::NFTokenOffer => &NFTokenOfferExplainer,
        LedgerObjectType::Ticket => &TicketExplainer,
        LedgerObjectType::PayChannel => &PayChannelExplainer,
        LedgerObjectType::DepositPreauth => &DepositPreauthExplainer,
        LedgerObjectType::SignerList => &SignerListExplainer,
        LedgerObjectType::RippleState => &RippleStateExplainer,
    }
}

object_explainer!(
    /// "{pays value} {pays currency}/{gets currency}", e.g. "5 USD/XRP"
    OfferExplainer for Offer, |offer, viewer| {
        label: match (offer.taker_pays(), offer.taker_gets()) {
            (Some(pays), Some(gets)) => format!("{} {}/{}", pays.value, pays.currency, gets.currency),
            _ => "Offer".to_string(),
        },
        recipient: None,
    }
);

object_explainer!(EscrowExplainer for Escrow, |escrow, viewer| {
    label: "Escrow",
    recipient: counterparty(escrow.account(), escrow.destination(), viewer).map(Recipient::from),
});

object_explainer!(CheckExplainer for Check, |check, viewer| {
    label: "Check",
    recipient: counterparty(check.account(), check.destination(), viewer).map(Recipient::from),
});

object_explainer!(
    /// Labelled with the token id
    NFTokenOfferExplainer for NFTokenOffer, |offer, viewer| {
        label: offer.nftoken_id().unwrap_or("NFT offer"),
        recipient: counterparty(offer.owner(), offer.destination(), viewer).map(Recipient::from),
    }
);

object_explainer!(TicketExplainer for Ticket, |ticket, viewer| {
    label: match ticket.ticket_sequence() {
        Some(sequence) => format!("Ticket #{sequence}"),
        None => "Ticket".to_string(),
    },
    recipient: None,
});

object_explainer!(PayChannelExplainer for PayChannel, |channel, viewer| {
    label: "Payment channel",
    recipient: counterparty(channel.account(), channel.destination(), viewer).map(Recipient::from),
});

object_explainer!(DepositPreauthExplainer for DepositPreauth, |preauth, viewer| {
    label: "Deposit preauthorization",
    recipient: counterparty(preauth.account(), preauth.authorize(), viewer).map(Recipient::from),
});

object_explainer!(SignerListExplainer for SignerList, |list, viewer| {
    label: "Signer list",
    recipient: None,
});

object_explainer!(RippleStateExplainer for RippleState, |line, viewer| {
    label: "Trust line",
    recipient: other_party(line.counterparty_of(viewer), viewer),
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_type_has_a_matching_explainer() {
        for kind in LedgerObjectType::iter() {
            let obj = LedgerObject::from_raw(json!({ "LedgerEntryType": kind.as_ref() }));
            let result = explainer_for(kind).explain(&obj, "rViewer");

            assert_ne!(result.label, UNSUPPORTED_OBJECT_LABEL, "{kind} fell back");
        }
    }

    #[test]
    fn test_offer_label() {
        let offer = LedgerObject::from_raw(json!({
            "LedgerEntryType": "Offer",
            "Account": "rMaker",
            "TakerPays": { "currency": "USD", "issuer": "rIssuer", "value": "5" },
            "TakerGets": "1000000"
        }));

        let result = offer.explain("rMaker");
        assert_eq!(result.label, "5 USD/XRP");
        assert_eq!(result.recipient, None);
    }

    #[test]
    fn test_nftoken_offer_label_is_token_id() {
        let offer = LedgerObject::from_raw(json!({
            "LedgerEntryType": "NFTokenOffer",
            "Owner": "rSeller",
            "Destination": "rBuyer",
            "NFTokenID": "00081388DC1AB4937C899037B2FDFC3CB20F6F64E73120BB5F8AA66A00000228",
            "Amount": "1000000"
        }));

        let result = offer.explain("rSeller");
        assert_eq!(result.label, "00081388DC1AB4937C899037B2FDFC3CB20F6F64E73120BB5F8AA66A00000228");
        assert_eq!(result.recipient.unwrap().address, "rBuyer");
    }

    #[test]
    fn test_escrow_recipient_from_destination_side() {
        let escrow = LedgerObject::from_raw(json!({
            "LedgerEntryType": "Escrow",
            "Account": "rOwner",
            "SourceTag": 11,
            "Destination": "rDest"
        }));

        let recipient = escrow.explain("rDest").recipient.unwrap();
        assert_eq!(recipient.address, "rOwner");
        assert_eq!(recipient.tag, Some(11));
    }

    #[test]
    fn test_trust_line_recipient() {
        let line = LedgerObject::from_raw(json!({
            "LedgerEntryType": "RippleState",
            "Balance": { "currency": "USD", "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji", "value": "1" },
            "LowLimit": { "currency": "USD", "issuer": "rLow", "value": "10" },
            "HighLimit": { "currency": "USD", "issuer": "rHigh", "value": "0" }
        }));

        assert_eq!(line.explain("rLow").recipient.unwrap().address, "rHigh");
        assert_eq!(line.explain("rHigh").recipient.unwrap().address, "rLow");
    }

    #[test]
    fn test_self_referential_objects() {
        for entry in ["Ticket", "SignerList", "Offer"] {
            let obj = LedgerObject::from_raw(json!({ "LedgerEntryType": entry, "Account": "rMe" }));
            assert_eq!(obj.explain("rMe").recipient, None, "{entry}");
        }
    }
}
