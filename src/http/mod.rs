//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, JSON body decoding)
//!     → middleware/visits.rs (only for /app/*)
//!     → chirps.rs / users.rs / health.rs / admin handlers
//!     → response.rs (JSON payload or error envelope)
//!     → Send to client
//! ```

pub mod chirps;
pub mod error;
pub mod health;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod users;

pub use error::ApiError;
pub use middleware::VisitCounter;
pub use request::{JsonBody, X_REQUEST_ID};
pub use response::{respond_with_error, respond_with_json};
pub use server::{AppState, HttpServer};
