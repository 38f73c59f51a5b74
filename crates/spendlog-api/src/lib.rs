//! JSON REST API for spendlog.
//!
//! Exposes an axum [`Router`] backed by any
//! [`spendlog_core::store::ExpenseStore`]. Transport, TLS, and the category
//! catalog resource are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", spendlog_api::api_router(store.clone()))
//! ```

pub mod debug;
pub mod error;
pub mod expenses;
pub mod summary;

use std::sync::Arc;

use axum::{Router, routing::get};
use spendlog_core::store::ExpenseStore;

pub use error::{ApiError, status_for};
pub use expenses::AddExpenseResponse;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ExpenseStore + 'static,
{
  Router::new()
    .route("/expenses", get(expenses::list::<S>).post(expenses::create::<S>))
    .route("/summary", get(summary::handler::<S>))
    .route("/debug", get(debug::handler::<S>))
    .with_state(store)
}
