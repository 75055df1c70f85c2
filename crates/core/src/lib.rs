//! Core types and pure logic for rentswipe
//!
//! Listing records, judgment bookkeeping, the image-validity predicate and the
//! candidate filter. Nothing in this crate performs I/O.

pub mod candidates;
pub mod constants;
mod env_config;
mod error;
pub mod image_filter;
mod interaction;
mod judgment;
mod listing;

pub use candidates::candidate_queue;
pub use env_config::{env_list, env_parse_with_default};
pub use error::*;
pub use image_filter::{first_valid_image, has_valid_image, is_valid_image_piece, resolve_image_url};
pub use interaction::InteractionSet;
pub use judgment::*;
pub use listing::*;
