//! In-memory transaction source

use crate::{StoreError, StoreResult, Transaction, TransactionSource};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// In-process transaction list.
///
/// Counts calls and can be told to fail, so it doubles as a test source.
#[derive(Debug, Default)]
pub struct MemorySource {
    rows: RwLock<Vec<Option<Transaction>>>,
    fetch_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    fail_fetch: AtomicBool,
    fail_delete: AtomicBool,
    deleted_batches: RwLock<Vec<Vec<String>>>,
}

impl MemorySource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self::with_rows(transactions.into_iter().map(Some).collect())
    }

    /// Create with raw rows, including null entries
    pub fn with_rows(rows: Vec<Option<Transaction>>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Default::default()
        }
    }

    /// Load rows from a JSON array file
    pub async fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| StoreError::Seed {
            message: format!("{}: {}", path.display(), e),
        })?;
        let rows: Vec<Option<Transaction>> = serde_json::from_str(&content)?;
        log::info!("Seeded memory store with {} rows from {}", rows.len(), path.display());
        Ok(Self::with_rows(rows))
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Id lists received by `delete_by_ids`, one entry per call
    pub fn deleted_batches(&self) -> Vec<Vec<String>> {
        self.deleted_batches.read().unwrap().clone()
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Number of non-null rows across all owners
    pub fn len(&self) -> usize {
        self.rows.read().unwrap().iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TransactionSource for MemorySource {
    async fn fetch_all(&self, owner_id: &str) -> StoreResult<Vec<Option<Transaction>>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StoreError::Injected {
                message: "fetch failed".to_string(),
            });
        }

        let rows = self.rows.read().unwrap();
        Ok(rows
            .iter()
            .filter(|row| match row {
                Some(tx) => tx.belongs_to(owner_id),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn delete_by_ids(&self, ids: &[String]) -> StoreResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.deleted_batches.write().unwrap().push(ids.to_vec());
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StoreError::Injected {
                message: "delete failed".to_string(),
            });
        }

        self.rows.write().unwrap().retain(|row| match row {
            Some(tx) => !ids.contains(&tx.id),
            None => true,
        });
        Ok(())
    }
}
