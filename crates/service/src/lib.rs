//! Service layer for the Spott duplicate resolver
//!
//! Sits between the HTTP/CLI entry points and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod dedup_service;
mod error;

pub use dedup_service::DedupService;
pub use error::ServiceError;
