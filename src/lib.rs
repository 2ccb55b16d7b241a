//! Counselor Chat - Panic-support counseling chat relay
//!
//! Relays client messages to a language-model backend, cleans the raw
//! generation into a single counselor line, and passes it through a
//! safety review before it reaches the client. Sessions live in a
//! time-bounded in-memory store and every turn is written to a JSON log.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
