// 🖼️ Non-fungible tokens: mint, burn, and the offer lifecycle

use crate::amount::CanonicalAmount;
use crate::entities::common::{
    account_field, hex_text_field, str_field, time_field, u16_field, u32_field, AccountRef,
};
use crate::entities::transaction::transaction_variant;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// NFTokenCreateOffer: the offer sells a token the account owns
pub const TF_SELL_NFTOKEN: u32 = 0x0000_0001;

/// NFTokenMint flags
pub const TF_BURNABLE: u32 = 0x0000_0001;
pub const TF_ONLY_XRP: u32 = 0x0000_0002;
pub const TF_TRANSFERABLE: u32 = 0x0000_0008;

transaction_variant!(
    /// Mint a new token
    NFTokenMint,
    ["NFTokenTaxon", "Issuer", "TransferFee", "URI"]
);

impl NFTokenMint {
    pub fn nftoken_taxon(&self) -> Option<u32> {
        u32_field(self.raw(), "NFTokenTaxon")
    }

    /// Issuer when minting on behalf of another account
    pub fn issuer(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Issuer", None)
    }

    /// Secondary-sale fee in 1/100000 units (50000 = 50%)
    pub fn transfer_fee(&self) -> Option<u16> {
        u16_field(self.raw(), "TransferFee")
    }

    pub fn uri(&self) -> Option<String> {
        hex_text_field(self.raw(), "URI")
    }

    pub fn is_burnable(&self) -> bool {
        self.has_flag(TF_BURNABLE)
    }

    pub fn is_transferable(&self) -> bool {
        self.has_flag(TF_TRANSFERABLE)
    }

    /// The token can only be traded for the native asset
    pub fn is_only_native(&self) -> bool {
        self.has_flag(TF_ONLY_XRP)
    }
}

transaction_variant!(
    /// Destroy a token
    NFTokenBurn,
    ["NFTokenID", "Owner"]
);

impl NFTokenBurn {
    pub fn nftoken_id(&self) -> Option<&str> {
        str_field(self.raw(), "NFTokenID")
    }

    /// Holder of the token, when the issuer burns it
    pub fn owner(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Owner", None)
    }
}

transaction_variant!(
    /// Offer to buy or sell a token
    NFTokenCreateOffer,
    ["NFTokenID", "Amount", "Owner", "Destination", "Expiration"]
);

impl NFTokenCreateOffer {
    pub fn nftoken_id(&self) -> Option<&str> {
        str_field(self.raw(), "NFTokenID")
    }

    pub fn amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("Amount")
    }

    /// Current holder; present on buy offers
    pub fn owner(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Owner", None)
    }

    /// Only this account may accept the offer
    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", None)
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        time_field(self.raw(), "Expiration")
    }

    pub fn is_sell_offer(&self) -> bool {
        self.has_flag(TF_SELL_NFTOKEN)
    }
}

transaction_variant!(
    /// Withdraw one or more token offers
    NFTokenCancelOffer,
    ["NFTokenOffers"]
);

impl NFTokenCancelOffer {
    pub fn nftoken_offers(&self) -> Vec<String> {
        self.raw()
            .get("NFTokenOffers")
            .and_then(Value::as_array)
            .map(|offers| {
                offers
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

transaction_variant!(
    /// Accept a token offer, directly or as a broker matching two offers
    NFTokenAcceptOffer,
    ["NFTokenSellOffer", "NFTokenBuyOffer", "NFTokenBrokerFee"]
);

impl NFTokenAcceptOffer {
    pub fn sell_offer(&self) -> Option<&str> {
        str_field(self.raw(), "NFTokenSellOffer")
    }

    pub fn buy_offer(&self) -> Option<&str> {
        str_field(self.raw(), "NFTokenBuyOffer")
    }

    pub fn broker_fee(&self) -> Option<CanonicalAmount> {
        self.base.amount("NFTokenBrokerFee")
    }

    /// Brokered mode: both offers are given
    pub fn is_brokered(&self) -> bool {
        self.sell_offer().is_some() && self.buy_offer().is_some()
    }

    /// Creator of the accepted offer, from the deleted NFTokenOffer in meta
    pub fn offer_owner(&self) -> Option<AccountRef> {
        account_field(self.deleted_node("NFTokenOffer")?, "Owner", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mint_decodes_uri() {
        let mint = NFTokenMint::new(
            json!({
                "Account": "rMinter",
                "NFTokenTaxon": 0,
                "TransferFee": 314,
                "Flags": 8,
                "URI": "697066733A2F2F62616679"
            }),
            None,
        );

        assert_eq!(mint.nftoken_taxon(), Some(0));
        assert_eq!(mint.transfer_fee(), Some(314));
        assert_eq!(mint.uri().as_deref(), Some("ipfs://bafy"));
        assert!(mint.is_transferable());
        assert!(!mint.is_burnable());
        assert!(!mint.is_only_native());

        let native_only = NFTokenMint::new(json!({ "Flags": TF_ONLY_XRP | TF_BURNABLE }), None);
        assert!(native_only.is_only_native());
        assert!(native_only.is_burnable());
    }

    #[test]
    fn test_create_offer_direction() {
        let sell = NFTokenCreateOffer::new(
            json!({ "NFTokenID": "000B", "Amount": "1000000", "Flags": 1 }),
            None,
        );
        let buy = NFTokenCreateOffer::new(
            json!({ "NFTokenID": "000B", "Amount": "1000000", "Owner": "rHolder" }),
            None,
        );

        assert!(sell.is_sell_offer());
        assert!(!buy.is_sell_offer());
        assert_eq!(buy.owner(), Some(AccountRef::new("rHolder")));
    }

    #[test]
    fn test_cancel_offer_lists_ids() {
        let cancel = NFTokenCancelOffer::new(json!({ "NFTokenOffers": ["A1", "B2", 3] }), None);
        assert_eq!(cancel.nftoken_offers(), vec!["A1".to_string(), "B2".to_string()]);

        let empty = NFTokenCancelOffer::new(json!({}), None);
        assert!(empty.nftoken_offers().is_empty());
    }

    #[test]
    fn test_accept_offer_owner_from_meta() {
        let accept = NFTokenAcceptOffer::new(
            json!({ "Account": "rBuyer", "NFTokenSellOffer": "S1" }),
            Some(json!({
                "AffectedNodes": [{
                    "DeletedNode": {
                        "LedgerEntryType": "NFTokenOffer",
                        "FinalFields": { "Owner": "rSeller", "NFTokenID": "000B" }
                    }
                }]
            })),
        );

        assert!(!accept.is_brokered());
        assert_eq!(accept.offer_owner(), Some(AccountRef::new("rSeller")));
    }
}
