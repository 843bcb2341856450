// Entity Models - typed views over raw ledger JSON
//
// Each entity has:
// - A type tag resolved once, at construction, to a closed variant (or Unknown)
// - Option accessors that never fail on missing or malformed fields
// - A field registry listing every protocol field the variant carries

pub mod common;
pub mod objects;
pub mod transaction;
pub mod transactions;

pub use common::{counterparty, ledger_time, AccountRef, SignerEntry, TypeTag, LEDGER_EPOCH_OFFSET};
pub use objects::{
    BaseLedgerObject, LedgerObject, LedgerObjectTag, LedgerObjectType, UnknownLedgerObject,
};
pub use transaction::{
    BaseTransaction, Memo, Transaction, TransactionTag, TransactionType, UnknownTransaction,
};
