// Transaction explainers, one per TransactionType

use super::{other_party, Explainer, Recipient, UNSUPPORTED_TRANSACTION_LABEL};
use crate::entities::{counterparty, AccountRef, Transaction, TransactionType};

macro_rules! tx_explainer {
    ($($body:tt)*) => {
        variant_explainer!(Transaction, UNSUPPORTED_TRANSACTION_LABEL; $($body)*);
    };
}

pub(super) fn explainer_for(kind: TransactionType) -> &'static dyn Explainer<Transaction> {
    match kind {
        TransactionType::Payment => &PaymentExplainer,
        TransactionType::OfferCreate => &OfferCreateExplainer,
        TransactionType::OfferCancel => &OfferCancelExplainer,
        TransactionType::TrustSet => &TrustSetExplainer,
        TransactionType::AccountSet => &AccountSetExplainer,
        TransactionType::AccountDelete => &AccountDeleteExplainer,
        TransactionType::SetRegularKey => &SetRegularKeyExplainer,
        TransactionType::SignerListSet => &SignerListSetExplainer,
        TransactionType::EscrowCreate => &EscrowCreateExplainer,
        TransactionType::EscrowFinish => &EscrowFinishExplainer,
        TransactionType::EscrowCancel => &EscrowCancelExplainer,
        TransactionType::PaymentChannelCreate => &PaymentChannelCreateExplainer,
        TransactionType::PaymentChannelFund => &PaymentChannelFundExplainer,
        TransactionType::PaymentChannelClaim => &PaymentChannelClaimExplainer,
        TransactionType::CheckCreate => &CheckCreateExplainer,
        TransactionType::CheckCash => &CheckCashExplainer,
        TransactionType::CheckCancel => &CheckCancelExplainer,
        TransactionType::DepositPreauth => &DepositPreauthExplainer,
        TransactionType::TicketCreate => &TicketCreateExplainer,
        TransactionType::NFTokenMint => &NFTokenMintExplainer,
        TransactionType::NFTokenBurn => &NFTokenBurnExplainer,
        TransactionType::NFTokenCreateOffer => &NFTokenCreateOfferExplainer,
        TransactionType::NFTokenCancelOffer => &NFTokenCancelOfferExplainer,
        TransactionType::NFTokenAcceptOffer => &NFTokenAcceptOfferExplainer,
    }
}

fn between(first: Option<AccountRef>, second: Option<AccountRef>, viewer: &str) -> Option<Recipient> {
    counterparty(first, second, viewer).map(Recipient::from)
}

// ============================================================================
// PAYMENTS & DEX
// ============================================================================

tx_explainer!(PaymentExplainer for Payment, |tx, viewer| {
    label: {
        let sent = tx.account().is_some_and(|a| a.is(viewer));
        let received = tx.destination().is_some_and(|d| d.is(viewer));
        match (sent, received) {
            (true, true) => "Exchange",
            (true, false) => "Sent payment",
            (false, true) => "Received payment",
            (false, false) => "Payment",
        }
    },
    recipient: between(tx.account(), tx.destination(), viewer),
});

tx_explainer!(OfferCreateExplainer for OfferCreate, |tx, viewer| {
    label: "Create offer",
    recipient: None,
});

tx_explainer!(
    /// Self-referential: no recipient whether or not OfferID is populated
    OfferCancelExplainer for OfferCancel, |tx, viewer| {
        label: "Cancel offer",
        recipient: None,
    }
);

// ============================================================================
// ACCOUNT MANAGEMENT
// ============================================================================

tx_explainer!(TrustSetExplainer for TrustSet, |tx, viewer| {
    label: if tx.is_removal() { "Remove trust line" } else { "Add trust line" },
    recipient: other_party(
        tx.limit_amount()
            .and_then(|limit| limit.issuer)
            .map(AccountRef::new),
        viewer,
    ),
});

tx_explainer!(AccountSetExplainer for AccountSet, |tx, viewer| {
    label: "Account settings",
    recipient: None,
});

tx_explainer!(AccountDeleteExplainer for AccountDelete, |tx, viewer| {
    label: "Delete account",
    recipient: between(tx.account(), tx.destination(), viewer),
});

tx_explainer!(SetRegularKeyExplainer for SetRegularKey, |tx, viewer| {
    label: if tx.regular_key().is_some() { "Set regular key" } else { "Remove regular key" },
    recipient: other_party(tx.regular_key(), viewer),
});

tx_explainer!(SignerListSetExplainer for SignerListSet, |tx, viewer| {
    label: if tx.is_removal() { "Remove signer list" } else { "Set signer list" },
    recipient: None,
});

tx_explainer!(DepositPreauthExplainer for DepositPreauth, |tx, viewer| {
    label: if tx.authorize().is_some() { "Authorize deposit" } else { "Unauthorize deposit" },
    recipient: other_party(tx.authorize().or_else(|| tx.unauthorize()), viewer),
});

tx_explainer!(TicketCreateExplainer for TicketCreate, |tx, viewer| {
    label: match tx.ticket_count() {
        Some(1) => "Create ticket".to_string(),
        Some(count) => format!("Create {count} tickets"),
        None => "Create tickets".to_string(),
    },
    recipient: None,
});

// ============================================================================
// ESCROW
// ============================================================================

tx_explainer!(EscrowCreateExplainer for EscrowCreate, |tx, viewer| {
    label: "Create escrow",
    recipient: between(tx.account(), tx.destination(), viewer),
});

tx_explainer!(EscrowFinishExplainer for EscrowFinish, |tx, viewer| {
    label: "Finish escrow",
    recipient: between(tx.owner(), tx.account(), viewer),
});

tx_explainer!(EscrowCancelExplainer for EscrowCancel, |tx, viewer| {
    label: "Cancel escrow",
    recipient: between(tx.owner(), tx.account(), viewer),
});

// ============================================================================
// PAYMENT CHANNELS
// ============================================================================

tx_explainer!(PaymentChannelCreateExplainer for PaymentChannelCreate, |tx, viewer| {
    label: "Create payment channel",
    recipient: between(tx.account(), tx.destination(), viewer),
});

tx_explainer!(PaymentChannelFundExplainer for PaymentChannelFund, |tx, viewer| {
    label: "Fund payment channel",
    recipient: None,
});

tx_explainer!(PaymentChannelClaimExplainer for PaymentChannelClaim, |tx, viewer| {
    label: "Claim payment channel",
    recipient: None,
});

// ============================================================================
// CHECKS
// ============================================================================

tx_explainer!(CheckCreateExplainer for CheckCreate, |tx, viewer| {
    label: "Create check",
    recipient: between(tx.account(), tx.destination(), viewer),
});

tx_explainer!(CheckCashExplainer for CheckCash, |tx, viewer| {
    label: "Cash check",
    recipient: between(tx.check_writer(), tx.account(), viewer),
});

tx_explainer!(CheckCancelExplainer for CheckCancel, |tx, viewer| {
    label: "Cancel check",
    recipient: tx
        .check_parties()
        .and_then(|(writer, destination)| between(writer, destination, viewer)),
});

// ============================================================================
// NFTOKENS
// ============================================================================

tx_explainer!(NFTokenMintExplainer for NFTokenMint, |tx, viewer| {
    label: "Mint NFT",
    recipient: other_party(tx.issuer(), viewer),
});

tx_explainer!(NFTokenBurnExplainer for NFTokenBurn, |tx, viewer| {
    label: "Burn NFT",
    recipient: other_party(tx.owner(), viewer),
});

tx_explainer!(NFTokenCreateOfferExplainer for NFTokenCreateOffer, |tx, viewer| {
    label: if tx.is_sell_offer() { "Create NFT sell offer" } else { "Create NFT buy offer" },
    recipient: other_party(tx.destination().or_else(|| tx.owner()), viewer),
});

tx_explainer!(NFTokenCancelOfferExplainer for NFTokenCancelOffer, |tx, viewer| {
    label: "Cancel NFT offer",
    recipient: None,
});

tx_explainer!(NFTokenAcceptOfferExplainer for NFTokenAcceptOffer, |tx, viewer| {
    label: "Accept NFT offer",
    recipient: between(tx.offer_owner(), tx.account(), viewer),
});

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explainer::ExplainerResult;
    use serde_json::{json, Value};
    use strum::IntoEnumIterator;

    fn explain(tx: Value, meta: Option<Value>, viewer: &str) -> ExplainerResult {
        Transaction::from_raw(tx, meta).explain(viewer)
    }

    #[test]
    fn test_every_type_has_a_matching_explainer() {
        for kind in TransactionType::iter() {
            let tx = Transaction::from_raw(json!({ "TransactionType": kind.as_ref() }), None);
            let result = explainer_for(kind).explain(&tx, "rViewer");

            assert!(!result.label.is_empty(), "{kind} has no label");
            assert_ne!(result.label, UNSUPPORTED_TRANSACTION_LABEL, "{kind} fell back");
        }
    }

    #[test]
    fn test_payment_direction() {
        let payment = json!({ "TransactionType": "Payment", "Account": "rAlice", "Destination": "rBob", "DestinationTag": 7 });

        let sent = explain(payment.clone(), None, "rAlice");
        assert_eq!(sent.label, "Sent payment");
        assert_eq!(sent.recipient.as_ref().unwrap().address, "rBob");
        assert_eq!(sent.recipient.as_ref().unwrap().tag, Some(7));

        let received = explain(payment.clone(), None, "rBob");
        assert_eq!(received.label, "Received payment");
        assert_eq!(received.recipient.unwrap().address, "rAlice");

        let observed = explain(payment, None, "rCarol");
        assert_eq!(observed.label, "Payment");
    }

    #[test]
    fn test_offer_cancel_has_no_recipient() {
        for payload in [
            json!({ "TransactionType": "OfferCancel", "Account": "rMaker", "OfferSequence": 4 }),
            json!({ "TransactionType": "OfferCancel", "Account": "rMaker", "OfferID": "ABC" }),
        ] {
            let result = explain(payload, None, "rMaker");
            assert_eq!(result.label, "Cancel offer");
            assert_eq!(result.recipient, None);
            assert_eq!(result.recipient_or_viewer("rMaker").address, "rMaker");
        }
    }

    #[test]
    fn test_trust_set_points_at_issuer() {
        let result = explain(
            json!({
                "TransactionType": "TrustSet",
                "Account": "rHolder",
                "LimitAmount": { "currency": "USD", "issuer": "rIssuer", "value": "0" }
            }),
            None,
            "rHolder",
        );

        assert_eq!(result.label, "Remove trust line");
        assert_eq!(result.recipient.unwrap().address, "rIssuer");
    }

    #[test]
    fn test_escrow_finish_by_third_party() {
        let finish = json!({ "TransactionType": "EscrowFinish", "Account": "rFinisher", "Owner": "rOwner" });

        assert_eq!(explain(finish.clone(), None, "rOwner").recipient.unwrap().address, "rFinisher");
        assert_eq!(explain(finish, None, "rFinisher").recipient.unwrap().address, "rOwner");
    }

    #[test]
    fn test_check_cash_recipient_from_meta() {
        let result = explain(
            json!({ "TransactionType": "CheckCash", "Account": "rCasher", "CheckID": "C1" }),
            Some(json!({
                "AffectedNodes": [{
                    "DeletedNode": {
                        "LedgerEntryType": "Check",
                        "FinalFields": { "Account": "rWriter", "Destination": "rCasher" }
                    }
                }]
            })),
            "rCasher",
        );

        assert_eq!(result.label, "Cash check");
        assert_eq!(result.recipient.unwrap().address, "rWriter");
    }

    #[test]
    fn test_ticket_create_label() {
        let one = explain(json!({ "TransactionType": "TicketCreate", "TicketCount": 1 }), None, "rA");
        let many = explain(json!({ "TransactionType": "TicketCreate", "TicketCount": 5 }), None, "rA");

        assert_eq!(one.label, "Create ticket");
        assert_eq!(many.label, "Create 5 tickets");
    }

    #[test]
    fn test_regular_key_removal() {
        let set = explain(json!({ "TransactionType": "SetRegularKey", "Account": "rA", "RegularKey": "rKey" }), None, "rA");
        let removed = explain(json!({ "TransactionType": "SetRegularKey", "Account": "rA" }), None, "rA");

        assert_eq!(set.label, "Set regular key");
        assert_eq!(set.recipient.unwrap().address, "rKey");
        assert_eq!(removed.label, "Remove regular key");
        assert_eq!(removed.recipient, None);
    }
}
