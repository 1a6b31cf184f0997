//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: a validated free-text query submitted for processing
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod query;
