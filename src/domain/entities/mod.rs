//! Core domain entities.
//!
//! - [`Link`] - A stored short code → long URL mapping with click metadata
//! - [`NewLink`] - Input for creating a link
//! - [`LinkIdentifier`] - Parsed delete target (numeric id or short code)

pub mod identifier;
pub mod link;

pub use identifier::LinkIdentifier;
pub use link::{Link, NewLink};
