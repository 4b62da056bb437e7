//! Search-token classification.
//!
//! A single public identifier space accepts three kinds of tokens. [`classify`]
//! decides which one a raw token is, in strict precedence order:
//!
//! 1. an opaque id (24 hex characters) is [`SearchToken::OpaqueId`]
//! 2. otherwise a finite number is [`SearchToken::NumericCode`]
//! 3. anything else is [`SearchToken::Name`]
//!
//! ```rust
//! use pokedex::search::{SearchKind, classify};
//!
//! assert_eq!(classify("507f1f77bcf86cd799439011").kind(), SearchKind::OpaqueId);
//! assert_eq!(classify("25").kind(), SearchKind::NumericCode);
//! assert_eq!(classify("pikachu").kind(), SearchKind::Name);
//! ```

use crate::model::ObjectId;
use serde::Serialize;
use std::fmt;

/// A classified search token.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchToken {
    OpaqueId(ObjectId),
    NumericCode(Number),
    /// The token as supplied; lower-casing happens at lookup.
    Name(String),
}

/// A numeric token, kept exact when it is written as an integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    /// Any other finite number: fractions, exponents, out-of-range integers.
    Float(f64),
}

// Largest magnitude below which every integer has an exact f64.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

impl Number {
    /// The integer code this number denotes, if any.
    ///
    /// Fractional floats denote no code. Integral floats only do while they
    /// are exact, so `25.0` is code 25 but `9007199254740993.0` is nothing.
    pub fn as_code(&self) -> Option<i64> {
        match *self {
            Number::Integer(code) => Some(code),
            Number::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT => Some(f as i64),
            Number::Float(_) => None,
        }
    }
}

/// Payload-free tag of a [`SearchToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    OpaqueId,
    NumericCode,
    Name,
}

impl SearchToken {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchToken::OpaqueId(_) => SearchKind::OpaqueId,
            SearchToken::NumericCode(_) => SearchKind::NumericCode,
            SearchToken::Name(_) => SearchKind::Name,
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchKind::OpaqueId => "id",
            SearchKind::NumericCode => "number",
            SearchKind::Name => "name",
        };
        f.write_str(label)
    }
}

/// Classify a raw search token. Never fails.
pub fn classify(token: &str) -> SearchToken {
    if let Ok(id) = ObjectId::parse_str(token) {
        return SearchToken::OpaqueId(id);
    }

    if let Some(number) = parse_number(token) {
        return SearchToken::NumericCode(number);
    }

    SearchToken::Name(token.to_string())
}

// Surrounding whitespace is ignored; inf/NaN spellings are names.
fn parse_number(token: &str) -> Option<Number> {
    let trimmed = token.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(integer) = trimmed.parse::<i64>() {
        return Some(Number::Integer(integer));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Number::Float)
}
