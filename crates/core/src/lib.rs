//! Quoteloom domain logic.
//!
//! Holds the template catalog, the quote and image-prompt synthesizers, the
//! CSV export builder and the shared error and id/timestamp types. Nothing in
//! this crate touches the database or HTTP.

pub mod catalog;
pub mod error;
pub mod export;
pub mod prompt;
pub mod quote;
pub mod types;
