// 💬 Explainer Registry - a label and a counterparty for every entity
//
// One stateless strategy per variant, selected once by exhaustive match on
// the entity's tag. The result is recomputed on demand and never cached.

use crate::entities::{
    AccountRef, LedgerObject, LedgerObjectTag, Transaction, TransactionTag, TypeTag,
};
use serde::{Deserialize, Serialize};

pub const UNSUPPORTED_TRANSACTION_LABEL: &str = "Unsupported transaction";
pub const UNSUPPORTED_OBJECT_LABEL: &str = "Unsupported ledger object";

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Recipient - who the entity is "with", as shown next to its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<u32>,

    /// Filled in by a RecipientResolver
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kyc_approved: Option<bool>,
}

impl Recipient {
    pub fn new(address: impl Into<String>) -> Self {
        Recipient {
            address: address.into(),
            tag: None,
            name: None,
            kyc_approved: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.name.is_some()
    }
}

impl From<AccountRef> for Recipient {
    fn from(account: AccountRef) -> Self {
        Recipient {
            address: account.address,
            tag: account.tag,
            name: None,
            kyc_approved: None,
        }
    }
}

/// ExplainerResult - label + optional recipient for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainerResult {
    pub label: String,
    pub recipient: Option<Recipient>,
}

impl ExplainerResult {
    /// The recipient, or the viewer's own account when there is none
    pub fn recipient_or_viewer(&self, viewer: &str) -> Recipient {
        self.recipient
            .clone()
            .unwrap_or_else(|| Recipient::new(viewer))
    }
}

// ============================================================================
// EXPLAINER TRAIT
// ============================================================================

/// Explainer - presentation strategy for one entity variant
///
/// `viewer` is the address of the account whose history is being shown;
/// labels and recipients are direction-aware relative to it.
pub trait Explainer<E>: Send + Sync {
    fn label(&self, entity: &E, viewer: &str) -> String;

    /// The other party, or None for self-referential entities
    fn recipient(&self, entity: &E, viewer: &str) -> Option<Recipient>;

    fn explain(&self, entity: &E, viewer: &str) -> ExplainerResult {
        ExplainerResult {
            label: self.label(entity, viewer),
            recipient: self.recipient(entity, viewer),
        }
    }
}

/// An explainer was handed a variant it does not own. Always a bug in the
/// caller; release builds log it and fall back to the generic result.
pub(crate) fn contract_violation(expected: &str, found: &str) {
    debug_assert!(false, "{expected} explainer applied to a {found} entity");
    tracing::error!(expected, found, "explainer applied to the wrong entity variant");
}

/// Party as a recipient, unless it is the viewer
pub(crate) fn other_party(party: Option<AccountRef>, viewer: &str) -> Option<Recipient> {
    party.filter(|party| !party.is(viewer)).map(Recipient::from)
}

// ============================================================================
// VARIANT EXPLAINERS
// ============================================================================

/// Declare a unit-struct explainer bound to one variant of `$entity`.
///
/// The body sees the unwrapped variant as `$e` and the viewer address as
/// `$viewer`. Any other variant is a contract violation.
macro_rules! variant_explainer {
    (
        $entity:ident, $fallback:expr;
        $(#[$doc:meta])* $name:ident for $variant:ident, |$e:ident, $viewer:ident| {
            label: $label:expr,
            recipient: $recipient:expr $(,)?
        }
    ) => {
        $(#[$doc])*
        pub(super) struct $name;

        impl $crate::explainer::Explainer<$entity> for $name {
            #[allow(unused_variables)]
            fn label(&self, entity: &$entity, viewer: &str) -> String {
                let $entity::$variant($e) = entity else {
                    $crate::explainer::contract_violation(stringify!($variant), entity.type_name());
                    return $fallback.to_string();
                };
                let $viewer = viewer;
                ($label).into()
            }

            #[allow(unused_variables)]
            fn recipient(
                &self,
                entity: &$entity,
                viewer: &str,
            ) -> Option<$crate::explainer::Recipient> {
                let $entity::$variant($e) = entity else {
                    $crate::explainer::contract_violation(stringify!($variant), entity.type_name());
                    return None;
                };
                let $viewer = viewer;
                $recipient
            }
        }
    };
}

mod objects;
mod transactions;

// ============================================================================
// DEFAULT EXPLAINERS
// ============================================================================

pub struct UnsupportedTransaction;

impl Explainer<Transaction> for UnsupportedTransaction {
    fn label(&self, _entity: &Transaction, _viewer: &str) -> String {
        UNSUPPORTED_TRANSACTION_LABEL.to_string()
    }

    fn recipient(&self, _entity: &Transaction, _viewer: &str) -> Option<Recipient> {
        None
    }
}

pub struct UnsupportedLedgerObject;

impl Explainer<LedgerObject> for UnsupportedLedgerObject {
    fn label(&self, _entity: &LedgerObject, _viewer: &str) -> String {
        UNSUPPORTED_OBJECT_LABEL.to_string()
    }

    fn recipient(&self, _entity: &LedgerObject, _viewer: &str) -> Option<Recipient> {
        None
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// ExplainerRegistry - tag → explainer lookup
pub struct ExplainerRegistry;

impl ExplainerRegistry {
    pub fn for_transaction(tag: &TransactionTag) -> &'static dyn Explainer<Transaction> {
        match tag {
            TypeTag::Known(kind) => transactions::explainer_for(*kind),
            TypeTag::Unknown(_) => &UnsupportedTransaction,
        }
    }

    pub fn for_object(tag: &LedgerObjectTag) -> &'static dyn Explainer<LedgerObject> {
        match tag {
            TypeTag::Known(kind) => objects::explainer_for(*kind),
            TypeTag::Unknown(_) => &UnsupportedLedgerObject,
        }
    }
}

impl Transaction {
    pub fn explain(&self, viewer: &str) -> ExplainerResult {
        ExplainerRegistry::for_transaction(&self.tag()).explain(self, viewer)
    }
}

impl LedgerObject {
    pub fn explain(&self, viewer: &str) -> ExplainerResult {
        ExplainerRegistry::for_object(&self.tag()).explain(self, viewer)
    }
}

// ============================================================================
// TESTS
// ============================================================================
