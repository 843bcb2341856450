// Recipient lookup errors
//
// Parsing and explaining never fail (they fall back to sentinels), so the
// only typed error in the crate is the one crossing the async resolver
// boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No name known for {0}")]
    NotFound(String),

    #[error("Recipient lookup timed out after {0}ms")]
    Timeout(u64),

    #[error("Recipient lookup cancelled")]
    Cancelled,

    #[error("Resolver backend error: {0}")]
    Backend(String),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

impl ResolveError {
    pub fn backend(message: impl Into<String>) -> Self {
        ResolveError::Backend(message.into())
    }

    /// Worth retrying later (the address itself is not the problem)
    pub fn is_transient(&self) -> bool {
        matches!(self, ResolveError::Timeout(_) | ResolveError::Backend(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = ResolveError::Timeout(5000);
        assert!(err.is_transient());
        assert!(err.to_string().contains("5000ms"));
    }

    #[test]
    fn test_not_found_is_not_transient() {
        let err = ResolveError::NotFound("rUnknown".to_string());
        assert!(!err.is_transient());
        assert!(err.to_string().contains("rUnknown"));
    }
}
