//! Chirp body validation.

use thiserror::Error;

use crate::moderation::filter;

/// Maximum chirp body length, in bytes.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// The body exceeded [`MAX_CHIRP_LENGTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Chirp is too long")]
pub struct TooLong {
    /// Byte length of the rejected body.
    pub len: usize,
}

/// A chirp body that passed validation.
///
/// Holds the raw text; the filtered variant is only computed when asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedBody<'a> {
    raw: &'a str,
}

impl<'a> ValidatedBody<'a> {
    /// The body exactly as submitted.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The body with denylisted words masked.
    pub fn cleaned(&self) -> String {
        filter::clean(self.raw)
    }
}

/// Check the byte length of `body`.
pub fn validate(body: &str) -> Result<ValidatedBody<'_>, TooLong> {
    let len = body.len();
    if len > MAX_CHIRP_LENGTH {
        return Err(TooLong { len });
    }
    Ok(ValidatedBody { raw: body })
}
