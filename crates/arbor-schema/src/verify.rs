//! Verdict accumulation and base-type validation.

use std::fmt;

use crate::token::BaseType;

/// Outcome of a schema verification pass.
///
/// Validation never short-circuits: every invalid token found is
/// reported in the detail message, and the verdict is false iff any
/// token was unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// True when every checked token was valid.
    pub is_valid: bool,
    /// Accumulated human-readable diagnostics; empty when valid.
    pub detail: String,
}

impl Verdict {
    /// A passing verdict with no diagnostics.
    pub fn ok() -> Self {
        Verdict {
            is_valid: true,
            detail: String::new(),
        }
    }

    /// Records an unknown primitive token.
    pub fn push_invalid_token(&mut self, token: &str) {
        self.is_valid = false;
        self.detail
            .push_str(&format!("Key type '{}' is not valid. ", token));
    }

    /// Records a field whose expression could not be unpacked.
    pub fn push_malformed(&mut self, expr: &str, reason: &str) {
        self.is_valid = false;
        self.detail
            .push_str(&format!("Key type '{}' is malformed: {}. ", expr, reason));
    }

    /// Merges another verdict into this one, concatenating diagnostics.
    pub fn merge(&mut self, other: Verdict) {
        self.is_valid = self.is_valid && other.is_valid;
        self.detail.push_str(&other.detail);
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

/// Checks every token case-insensitively against the base-type
/// vocabulary.
pub fn verify_base_types<I, S>(tokens: I) -> Verdict
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut verdict = Verdict::ok();
    for token in tokens {
        if BaseType::lookup(token.as_ref()).is_none() {
            verdict.push_invalid_token(token.as_ref());
        }
    }
    verdict
}
