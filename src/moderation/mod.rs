//! Content moderation subsystem.
//!
//! # Data Flow
//! ```text
//! incoming chirp body
//!     → validator.rs (byte-length bound, reject before any other work)
//!     → ValidatedBody (raw body kept intact)
//!     → filter.rs (whole-token masking, only when a cleaned copy is asked for)
//! ```
//!
//! # Design Decisions
//! - Validation never mutates; the persisting path stores the raw body
//! - Filtering is exact whole-token matching on single spaces, no substrings
//! - Both stages are pure and synchronous

pub mod filter;
pub mod validator;

pub use filter::{clean, MASK, PROFANITIES};
pub use validator::{validate, TooLong, ValidatedBody, MAX_CHIRP_LENGTH};
