//! Canonical skill keys: the join key between a requirement written for humans
//! ("Data Analysis") and a stored profile skill ("data_analysis").

/// Lower-cases and collapses every whitespace run into a single underscore.
/// Leading and trailing whitespace is dropped. Idempotent.
pub fn canonicalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
