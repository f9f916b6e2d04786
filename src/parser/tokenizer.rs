//! Tokenizer
//!
//! Whitespace tokenization in two flavours: upper-cased for keyword,
//! amount and mention matching, and case-preserving for usernames and
//! addresses that are echoed back or are case-sensitive.

/// Split on whitespace runs and upper-case every token
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_uppercase).collect()
}

/// Split on whitespace runs, keeping the original case
pub fn tokenize_preserving(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
