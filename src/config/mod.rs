//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional) + .env + process environment
//!     → loader.rs (parse, deserialize, overlay env)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → Platform copied into the router state at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, ObservabilityConfig, Platform, SecurityConfig, ServerConfig, ServiceConfig,
    TimeoutConfig,
};
