use std::fmt;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};

/// A predicate a bound value has to satisfy for its route to match.
#[derive(Clone)]
pub enum Constraint {
    /// Matches the whole value, ignoring case.
    Regex(Regex),
    /// ASCII digits with an optional leading `-`.
    Integer,
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Constraint {
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        RegexBuilder::new(&format!("^(?:{})$", pattern))
            .case_insensitive(true)
            .build()
            .map(Self::Regex)
    }

    pub fn custom(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(value),
            Self::Integer => {
                let digits = value.strip_prefix('-').unwrap_or(value);
                !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            }
            Self::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Self::Integer => f.write_str("Integer"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
