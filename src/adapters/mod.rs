//! Adapters - Implementations of the ports plus the HTTP surface.

pub mod generation;
pub mod http;
pub mod safety;
pub mod storage;
