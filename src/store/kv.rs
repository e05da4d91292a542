//! KV Store Module
//!
//! The concurrent map: one reader/writer lock over every record.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::store::{OverwritePolicy, Record};

// == KV Store ==
/// In-memory key/value store guarded by a single `RwLock`.
///
/// Reads share the lock; `set`, `delete` and the sweep take it exclusively.
/// Absence is reported through `Option`, the store never returns errors.
#[derive(Debug)]
pub struct KvStore {
    /// Key to record mapping
    records: RwLock<HashMap<String, Record>>,
    /// Records created longer ago than this are removed by the sweep
    max_age: Duration,
    /// Treatment of `created_at` on overwrite
    policy: OverwritePolicy,
}

impl KvStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_age` - Age past which the sweep removes a record
    /// * `policy` - Whether overwrites refresh or preserve `created_at`
    pub fn new(max_age: Duration, policy: OverwritePolicy) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            max_age,
            policy,
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    // == Set ==
    /// Inserts or overwrites the record for `key`.
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.set_at(key, value, Utc::now()).await;
    }

    /// Same as [`KvStore::set`] with an explicit timestamp.
    pub async fn set_at(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        let key = key.into();
        let value = value.into();

        let mut records = self.records.write().await;
        match records.get_mut(&key) {
            Some(record) => record.overwrite(value, now, self.policy),
            None => {
                records.insert(key.clone(), Record::new(key, value, now));
            }
        }
    }

    // == Get ==
    /// Returns a copy of the record for `key`.
    ///
    /// Values that parse as JSON come back in canonical compact form;
    /// anything else is returned untouched.
    pub async fn get(&self, key: &str) -> Option<Record> {
        let records = self.records.read().await;
        records.get(key).map(|record| Record {
            value: record.canonical_value(),
            ..record.clone()
        })
    }

    // == Delete ==
    /// Removes `key`, returning the removed record. Absent keys are a no-op.
    pub async fn delete(&self, key: &str) -> Option<Record> {
        self.records.write().await.remove(key)
    }

    // == Sweep ==
    /// Removes every record older than the store's maximum age.
    ///
    /// Returns the number of records removed.
    pub async fn sweep(&self) -> usize {
        self.sweep_at(Utc::now()).await
    }

    /// Same as [`KvStore::sweep`], measuring age against `now`.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let Some(cutoff) = self.cutoff(now) else {
            return 0;
        };

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.created_before(cutoff));
        before - records.len()
    }

    // == Length ==
    /// Returns the current number of records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Oldest creation time a record may have and survive a sweep at `now`.
    /// `None` when the maximum age reaches past the representable range.
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let max_age = TimeDelta::from_std(self.max_age).ok()?;
        now.checked_sub_signed(max_age)
    }
}
