//! Logging infrastructure: structured audit logging.
//!
//! Provides [`JsonlAuditLogger`], a JSONL file writer that implements
//! the [`AuditLog`](threadsense_application::AuditLog) port.

mod audit_logger;

pub use audit_logger::JsonlAuditLogger;
