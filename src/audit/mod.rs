//! Audit logging for the ledger
//!
//! Records every create and delete with a JSON snapshot of the entity in an
//! append-only, line-delimited JSON file.
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_cli::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(
//!     EntityType::Transaction,
//!     txn.id.to_string(),
//!     Some(txn.title.clone()),
//!     &txn,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
