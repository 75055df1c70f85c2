//! Service layer for rentswipe
//!
//! Keeps the judged-listing state of one user coherent across the remote like
//! authority, the device-local dislike store and the shared in-memory catalog.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::cognitive_complexity, reason = "Complex async flows are inherent")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod catalog;
mod config;
mod error;
mod interaction_builder;
mod judgment;
mod notification;
mod reset;
mod session;
mod state;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogChange, CatalogPublisher, CatalogSnapshot, CatalogSubscription};
pub use config::{SessionConfig, default_db_path};
pub use error::ServiceError;
pub use interaction_builder::{InteractionSetBuilder, InteractionSnapshot};
pub use judgment::JudgmentCoordinator;
pub use notification::{
    DecisionOutcome, IgnoreReason, ResetOutcome, RetrySummary, SessionNotification,
};
pub use reset::ResetController;
pub use session::SwipeSession;
