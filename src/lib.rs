// Ledger Lens - Core Library
// Typed views over raw ledger JSON: transactions, ledger objects, amounts,
// and the labels/counterparties a history list shows for them

pub mod amount;     // Amount & currency-code normalization
pub mod config;     // Network + resolver settings
pub mod effect;     // Amount moved, and in which direction
pub mod entities;   // Transaction and ledger object models
pub mod error;      // Resolver boundary errors
pub mod explainer;  // Label + recipient per variant
pub mod factory;    // Raw payload → typed entity
pub mod fields;     // Field catalog & per-entity registries
pub mod resolver;   // Async name lookup for recipients

// Re-export commonly used types
pub use amount::{
    drops_to_native, native_to_drops, normalize_amount, normalize_currency_code,
    AmountNormalizer, CanonicalAmount, NATIVE_CURRENCY, UNKNOWN_CURRENCY,
};
pub use config::{CoreConfig, NetworkConfig, ResolverConfig};
pub use effect::{Direction, MonetaryEffect};
pub use entities::{
    counterparty, AccountRef, BaseLedgerObject, BaseTransaction, LedgerObject, LedgerObjectTag,
    LedgerObjectType, Transaction, TransactionTag, TransactionType, TypeTag,
};
pub use error::{ResolveError, ResolveResult};
pub use explainer::{Explainer, ExplainerRegistry, ExplainerResult, Recipient};
pub use factory::{ledger_object_from_raw, transaction_from_raw, EntityFactory};
pub use fields::{FieldDefinition, FieldKind, FieldRegistry};
pub use resolver::{
    enrich_recipient, summarize, AccountName, AddressBook, RecipientLookup, RecipientResolver,
    RequestId, Summarize, Summary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
