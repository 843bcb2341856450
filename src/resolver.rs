// 🔎 Recipient resolution - names for addresses, off the pure core
//
// The explainers produce an address-only Recipient. Turning that address into
// a display name is a network concern owned by the embedding application: it
// implements RecipientResolver, and this module runs the lookup with a
// deadline, as a cancellable task, and falls back to the bare address on any
// failure.

use crate::effect::MonetaryEffect;
use crate::entities::{LedgerObject, Transaction};
use crate::error::{ResolveError, ResolveResult};
use crate::explainer::{ExplainerResult, Recipient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

// ============================================================================
// RESOLVER BOUNDARY
// ============================================================================

/// What a resolver knows about an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountName {
    pub name: String,
    pub kyc_approved: bool,
}

impl AccountName {
    pub fn new(name: impl Into<String>) -> Self {
        AccountName {
            name: name.into(),
            kyc_approved: false,
        }
    }

    pub fn kyc_approved(mut self) -> Self {
        self.kyc_approved = true;
        self
    }
}

#[async_trait]
pub trait RecipientResolver: Send + Sync {
    async fn resolve_name(&self, address: &str, tag: Option<u32>) -> ResolveResult<AccountName>;
}

// ============================================================================
// ADDRESS BOOK
// ============================================================================

/// AddressBook - in-memory resolver
///
/// A name registered for (address, tag) wins over one registered for the
/// address alone.
#[derive(Debug, Default)]
pub struct AddressBook {
    entries: RwLock<HashMap<(String, Option<u32>), AccountName>>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, address: impl Into<String>, tag: Option<u32>, name: AccountName) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert((address.into(), tag), name);
    }

    pub fn with_entry(self, address: impl Into<String>, tag: Option<u32>, name: AccountName) -> Self {
        self.insert(address, tag, name);
        self
    }

    pub fn remove(&self, address: &str, tag: Option<u32>) -> Option<AccountName> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(&(address.to_string(), tag))
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, address: &str, tag: Option<u32>) -> Option<AccountName> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());

        tag.and_then(|tag| entries.get(&(address.to_string(), Some(tag))))
            .or_else(|| entries.get(&(address.to_string(), None)))
            .cloned()
    }
}

#[async_trait]
impl RecipientResolver for AddressBook {
    async fn resolve_name(&self, address: &str, tag: Option<u32>) -> ResolveResult<AccountName> {
        self.lookup(address, tag)
            .ok_or_else(|| ResolveError::NotFound(address.to_string()))
    }
}

// ============================================================================
// ENRICHMENT
// ============================================================================

/// Look the recipient's name up, failing with a typed error
pub async fn resolve_recipient(
    resolver: &dyn RecipientResolver,
    mut recipient: Recipient,
    timeout: Duration,
) -> ResolveResult<Recipient> {
    let lookup = resolver.resolve_name(&recipient.address, recipient.tag);

    let name = match tokio::time::timeout(timeout, lookup).await {
        Ok(result) => result?,
        Err(_) => return Err(ResolveError::Timeout(millis(timeout))),
    };

    recipient.name = Some(name.name);
    recipient.kyc_approved = Some(name.kyc_approved);
    Ok(recipient)
}

/// Whole milliseconds, saturating at u64::MAX
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Look the recipient's name up; on any failure keep the address only
pub async fn enrich_recipient(
    resolver: &dyn RecipientResolver,
    recipient: Recipient,
    timeout: Duration,
) -> Recipient {
    match resolve_recipient(resolver, recipient.clone(), timeout).await {
        Ok(resolved) => resolved,
        Err(err) => {
            tracing::warn!(
                address = %recipient.address,
                error = %err,
                "recipient lookup failed, showing address only"
            );
            recipient
        }
    }
}

// ============================================================================
// CANCELLABLE LOOKUP
// ============================================================================

/// Identity of one in-flight lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        RequestId(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// RecipientLookup - background name lookup the caller can abandon
///
/// Dropping the lookup does not stop it; call `cancel` when the view that
/// asked for the name goes away so a late answer is never delivered.
#[derive(Debug)]
pub struct RecipientLookup {
    id: RequestId,
    handle: JoinHandle<Recipient>,
}

impl RecipientLookup {
    /// Start the lookup on the current tokio runtime
    pub fn spawn(
        resolver: Arc<dyn RecipientResolver>,
        recipient: Recipient,
        timeout: Duration,
    ) -> Self {
        let id = RequestId::new();
        tracing::debug!(request_id = %id, address = %recipient.address, "recipient lookup started");

        let handle = tokio::spawn(async move {
            enrich_recipient(resolver.as_ref(), recipient, timeout).await
        });

        RecipientLookup { id, handle }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn cancel(&self) {
        tracing::debug!(request_id = %self.id, "recipient lookup cancelled");
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// The enriched recipient, or None if the lookup was cancelled
    pub async fn join(self) -> Option<Recipient> {
        match self.handle.await {
            Ok(recipient) => Some(recipient),
            Err(err) if err.is_cancelled() => None,
            Err(err) => {
                tracing::warn!(request_id = %self.id, error = %err, "recipient lookup task failed");
                None
            }
        }
    }
}

// ============================================================================
// SUMMARY PIPELINE
// ============================================================================

/// Anything the registry can explain
pub trait Summarize {
    fn explain(&self, viewer: &str) -> ExplainerResult;

    fn monetary_effect(&self, viewer: &str) -> Option<MonetaryEffect>;
}

impl Summarize for Transaction {
    fn explain(&self, viewer: &str) -> ExplainerResult {
        Transaction::explain(self, viewer)
    }

    fn monetary_effect(&self, viewer: &str) -> Option<MonetaryEffect> {
        Transaction::monetary_effect(self, viewer)
    }
}

impl Summarize for LedgerObject {
    fn explain(&self, viewer: &str) -> ExplainerResult {
        LedgerObject::explain(self, viewer)
    }

    fn monetary_effect(&self, viewer: &str) -> Option<MonetaryEffect> {
        LedgerObject::monetary_effect(self, viewer)
    }
}

/// Summary - everything a list row needs for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub label: String,
    pub recipient: Recipient,
    pub effect: Option<MonetaryEffect>,
}

/// Explain, substitute the viewer for a missing recipient, then resolve the
/// recipient's name within `timeout`
pub async fn summarize<E: Summarize + ?Sized>(
    entity: &E,
    viewer: &str,
    resolver: &dyn RecipientResolver,
    timeout: Duration,
) -> Summary {
    let explained = entity.explain(viewer);
    let recipient = explained.recipient_or_viewer(viewer);

    Summary {
        label: explained.label,
        recipient: enrich_recipient(resolver, recipient, timeout).await,
        effect: entity.monetary_effect(viewer),
    }
}

// ============================================================================
// TESTS
// ============================================================================
