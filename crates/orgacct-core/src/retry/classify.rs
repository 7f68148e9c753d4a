//! Classify HTTP status codes as retriable or terminal.

/// Status codes the accounts API uses for transient conditions:
/// rate limited, internal error, unavailable, gateway timeout.
pub const DEFAULT_RETRIABLE_STATUSES: [u16; 4] = [429, 500, 503, 504];

/// True if `status` is in the default retriable set.
pub fn is_retriable(status: u16) -> bool {
    DEFAULT_RETRIABLE_STATUSES.contains(&status)
}

/// Immutable set of retriable status codes owned by one `RetryPolicy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetriableStatuses(Vec<u16>);

impl RetriableStatuses {
    pub fn new(codes: impl IntoIterator<Item = u16>) -> Self {
        let mut codes: Vec<u16> = codes.into_iter().collect();
        codes.sort_unstable();
        codes.dedup();
        Self(codes)
    }

    pub fn contains(&self, status: u16) -> bool {
        self.0.binary_search(&status).is_ok()
    }

    pub fn codes(&self) -> &[u16] {
        &self.0
    }
}

impl Default for RetriableStatuses {
    fn default() -> Self {
        Self::new(DEFAULT_RETRIABLE_STATUSES)
    }
}
