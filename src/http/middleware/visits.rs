//! Static asset visit counting.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

/// Process-wide count of `/app/*` requests.
///
/// Created once at startup and shared as `Arc<VisitCounter>`. Every operation
/// is a single atomic instruction, so concurrent increments are never lost
/// and a reset is seen by every later snapshot.
#[derive(Debug, Default)]
pub struct VisitCounter {
    hits: AtomicI64,
}

impl VisitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> i64 {
        self.hits.load(Ordering::SeqCst)
    }

    /// Zero the counter. Callers are responsible for the dev-mode check.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::SeqCst);
    }
}

/// Counts the hit before the asset lookup, so misses are counted too.
pub async fn count_visits(
    State(visits): State<Arc<VisitCounter>>,
    request: Request,
    next: Next,
) -> Response {
    visits.increment();
    metrics::record_visit();
    next.run(request).await
}
