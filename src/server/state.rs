use chrono::{DateTime, Utc};

use crate::location::LocationResolver;

/// Shared by every request. The resolver is immutable, so no locking.
pub struct AppState {
    pub resolver: LocationResolver,
    /// Upper bound on autocomplete `limit`.
    pub max_suggestions: usize,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(resolver: LocationResolver, max_suggestions: usize) -> Self {
        Self {
            resolver,
            max_suggestions,
            started_at: Utc::now(),
        }
    }
}
