//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, errors)
//! - `counseling` - Turns, sessions, and the response-sanitization rules

pub mod counseling;
pub mod foundation;
