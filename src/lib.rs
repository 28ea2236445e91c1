//! Chirpy: a small social-post API.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod moderation;
pub mod observability;
pub mod storage;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
