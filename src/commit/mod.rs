//! Commit message types, composition, and validation.

pub mod message;
pub mod types;
pub mod validate;

pub use message::{CommitMessage, clean_generated_subject};
pub use types::CommitType;
pub use validate::validate_message;
