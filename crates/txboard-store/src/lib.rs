//! Transaction sources
//!
//! A source supplies the full list of a user's transactions and deletes
//! transactions by id. Two implementations are provided:
//! - memory: in-process list, used for tests and local runs
//! - postgrest: REST client for PostgREST-compatible backends (e.g. Supabase)

use async_trait::async_trait;
use std::sync::Arc;

pub mod error;
pub mod memory;
pub mod models;
pub mod postgrest;

pub use error::{StoreError, StoreResult};
pub use memory::MemorySource;
pub use models::Transaction;
pub use postgrest::PostgrestSource;

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Remote data store holding transactions
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch every transaction owned by `owner_id`, in the source's order.
    /// Missing entries come back as `None`.
    async fn fetch_all(&self, owner_id: &str) -> StoreResult<Vec<Option<Transaction>>>;

    /// Delete all transactions whose id is in `ids`, as one request
    async fn delete_by_ids(&self, ids: &[String]) -> StoreResult<()>;
}
