//! Cache keys
//!
//! A key is a resource name followed by identifying parts, e.g.
//! `["characters", "<id>"]` or `["personality-questions", "es"]`.
//! Prefix matching lets a single call address a whole bucket.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(root: impl Into<String>) -> Self {
        Self(vec![root.into()])
    }

    /// Append an identifying part
    pub fn with(mut self, part: impl ToString) -> Self {
        self.0.push(part.to_string());
        self
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `prefix`'s parts are the leading parts of this key
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn contains(&self, part: &str) -> bool {
        self.0.iter().any(|p| p == part)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl<S: Into<String>> From<Vec<S>> for QueryKey {
    fn from(parts: Vec<S>) -> Self {
        Self(parts.into_iter().map(Into::into).collect())
    }
}
