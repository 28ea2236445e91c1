//! Profanity masking.

/// Words replaced by [`MASK`] when they appear as a whole token.
pub const PROFANITIES: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replacement for a masked token.
pub const MASK: &str = "****";

/// Mask denylisted words in `text`.
///
/// Tokens are produced by splitting on a single `' '`, so runs of spaces and
/// other whitespace are preserved on rejoin. A token only matches when it is
/// equal to a denylisted word ignoring case; `"kerfuffle."` or `"kerfuffles"`
/// pass through untouched.
pub fn clean(text: &str) -> String {
    text.split(' ')
        .map(|token| if is_profane(token) { MASK } else { token })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_profane(token: &str) -> bool {
    let lowered = token.to_lowercase();
    PROFANITIES.iter().any(|word| *word == lowered)
}
