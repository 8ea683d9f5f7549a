// Simple helpers to avoid accidental printing of secrets in logs/tests.
use std::env;

fn secrets_allowed() -> bool {
    env::var("DEV_PRINT_SECRETS").ok().as_deref() == Some("1")
}

/// Redact secret text unless DEV_PRINT_SECRETS=1 is set in the environment.
/// By default this returns a short placeholder containing only the length.
pub fn redact_secret(s: &str) -> String {
    if secrets_allowed() {
        return s.to_string();
    }
    format!("<redacted len={}>", s.len())
}

/// Show only the first and last word of a seed phrase.
pub fn mask_phrase(phrase: &str) -> String {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    match words.as_slice() {
        [] => String::new(),
        [only] => format!("{} …", only),
        [first, .., last] => format!("{} … {} ({} words)", first, last, words.len()),
    }
}
