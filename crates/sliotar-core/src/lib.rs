//! Core types and trait definitions for the Sliotar fixtures store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod date;
pub mod error;
pub mod fixture;
pub mod store;

pub use error::{Error, Result};
