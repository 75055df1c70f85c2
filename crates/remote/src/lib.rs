//! Client side of the remote like authority
//!
//! The server owns the set of listings a user has liked. This crate exposes it
//! through the [`LikeAuthority`] trait, with an HTTP implementation for real
//! backends and an in-memory one for offline runs.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod api_types;
mod authority;
mod client;
pub mod error;
mod memory;

pub use authority::LikeAuthority;
pub use client::{HttpLikeAuthority, RemoteConfig, truncate};
pub use error::RemoteError;
pub use memory::MemoryLikeAuthority;
