//! Validation for admin request payloads.

pub mod rules;

pub use validator::Validate;
