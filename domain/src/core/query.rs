//! Query value object

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// A free-text query submitted for processing (Value Object)
///
/// Owned by exactly one pipeline run and immutable once accepted.
/// Guaranteed non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    content: String,
}

impl Query {
    /// Create a new query
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Query cannot be empty");
        Self { content }
    }

    /// Try to create a new query, rejecting empty or whitespace-only input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyQuery)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Query::new(s)
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Query::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_creation() {
        let q = Query::new("Design a login flow");
        assert_eq!(q.content(), "Design a login flow");
    }

    #[test]
    fn test_query_from_str() {
        let q: Query = "Design a login flow".into();
        assert_eq!(q.content(), "Design a login flow");
    }

    #[test]
    #[should_panic]
    fn test_empty_query_panics() {
        Query::new("");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Query::try_new("").is_err());
        assert!(Query::try_new("   ").is_err());
        assert!(Query::try_new("\n\t").is_err());
    }

    #[test]
    fn test_try_new_valid() {
        assert!(Query::try_new("Design a login flow").is_ok());
    }

    #[test]
    fn test_content_preserved_verbatim() {
        let q = Query::try_new("  padded  ").expect("non-empty");
        assert_eq!(q.content(), "  padded  ");
    }
}
