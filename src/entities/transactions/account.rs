// 🔑 Account management: settings, keys, signer lists, trust lines, tickets

use crate::amount::CanonicalAmount;
use crate::entities::common::{
    account_field, hex_text_field, signer_entries, str_field, u32_field, u8_field, AccountRef,
    SignerEntry,
};
use crate::entities::transaction::transaction_variant;

// ============================================================================
// TRUST LINES
// ============================================================================

transaction_variant!(
    /// Create or modify a trust line to an issuer
    TrustSet,
    ["LimitAmount", "QualityIn", "QualityOut"]
);

impl TrustSet {
    /// The limit; its issuer is the other side of the trust line
    pub fn limit_amount(&self) -> Option<CanonicalAmount> {
        self.base.amount("LimitAmount")
    }

    pub fn quality_in(&self) -> Option<u32> {
        u32_field(self.raw(), "QualityIn")
    }

    pub fn quality_out(&self) -> Option<u32> {
        u32_field(self.raw(), "QualityOut")
    }

    /// A zero limit means the trust line is being removed
    pub fn is_removal(&self) -> bool {
        self.limit_amount()
            .and_then(|limit| limit.decimal_value())
            .is_some_and(|value| value.is_zero())
    }
}

// ============================================================================
// ACCOUNT SETTINGS
// ============================================================================

transaction_variant!(
    /// Change account flags and properties
    AccountSet,
    [
        "SetFlag",
        "ClearFlag",
        "Domain",
        "EmailHash",
        "MessageKey",
        "TransferRate",
        "TickSize",
        "NFTokenMinter",
    ]
);

impl AccountSet {
    pub fn set_flag(&self) -> Option<u32> {
        u32_field(self.raw(), "SetFlag")
    }

    pub fn clear_flag(&self) -> Option<u32> {
        u32_field(self.raw(), "ClearFlag")
    }

    /// Domain, decoded from hex
    pub fn domain(&self) -> Option<String> {
        hex_text_field(self.raw(), "Domain")
    }

    pub fn email_hash(&self) -> Option<&str> {
        str_field(self.raw(), "EmailHash")
    }

    pub fn message_key(&self) -> Option<&str> {
        str_field(self.raw(), "MessageKey")
    }

    pub fn transfer_rate(&self) -> Option<u32> {
        u32_field(self.raw(), "TransferRate")
    }

    pub fn tick_size(&self) -> Option<u8> {
        u8_field(self.raw(), "TickSize")
    }

    pub fn nftoken_minter(&self) -> Option<&str> {
        str_field(self.raw(), "NFTokenMinter")
    }

    /// True when the transaction changes nothing but the sequence
    pub fn is_no_op(&self) -> bool {
        AccountSet::FIELDS
            .iter()
            .all(|field| self.raw().get(field).is_none())
    }
}

transaction_variant!(
    /// Delete the sending account, sweeping its balance to `Destination`
    AccountDelete,
    ["Destination", "DestinationTag"]
);

impl AccountDelete {
    pub fn destination(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Destination", Some("DestinationTag"))
    }
}

// ============================================================================
// KEYS & SIGNERS
// ============================================================================

transaction_variant!(
    /// Assign or remove the account's regular key
    SetRegularKey,
    ["RegularKey"]
);

impl SetRegularKey {
    /// None means the regular key is being removed
    pub fn regular_key(&self) -> Option<AccountRef> {
        account_field(self.raw(), "RegularKey", None)
    }
}

transaction_variant!(
    /// Replace (or delete, with quorum 0) the multi-signing list
    SignerListSet,
    ["SignerQuorum", "SignerEntries"]
);

impl SignerListSet {
    pub fn signer_quorum(&self) -> Option<u32> {
        u32_field(self.raw(), "SignerQuorum")
    }

    pub fn signer_entries(&self) -> Option<Vec<SignerEntry>> {
        signer_entries(self.raw())
    }

    pub fn is_removal(&self) -> bool {
        self.signer_quorum() == Some(0)
    }
}

// ============================================================================
// DEPOSIT AUTHORIZATION
// ============================================================================

transaction_variant!(
    /// Pre-authorize (or revoke) a sender for deposit-authorized accounts
    DepositPreauth,
    ["Authorize", "Unauthorize"]
);

impl DepositPreauth {
    pub fn authorize(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Authorize", None)
    }

    pub fn unauthorize(&self) -> Option<AccountRef> {
        account_field(self.raw(), "Unauthorize", None)
    }
}

// ============================================================================
// TICKETS
// ============================================================================

transaction_variant!(
    /// Reserve sequence numbers for later use
    TicketCreate,
    ["TicketCount"]
);

impl TicketCreate {
    pub fn ticket_count(&self) -> Option<u32> {
        u32_field(self.raw(), "TicketCount")
    }
}
