//! Core types and trait definitions for the spendlog expense ledger.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod error;
pub mod expense;
pub mod store;

pub use error::{Classify, Error, ErrorBody, ErrorKind, Result};
