//! Core domain concepts shared across all subdomains.
//!
//! - [`thread_url::ThreadUrl`]: a validated Reddit thread URL
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod string;
pub mod thread_url;
