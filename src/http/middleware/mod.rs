//! Request middleware.

pub mod metrics;
pub mod visits;

pub use self::metrics::track_requests;
pub use self::visits::{count_visits, VisitCounter};
