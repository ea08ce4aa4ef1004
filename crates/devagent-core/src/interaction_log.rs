//! Bounded, append-only interaction log kept as one blob in a key-value store.
//!
//! The whole history is serialized as a JSON array under a single key,
//! newest record first. Every mutation rewrites the entire array. Storage
//! problems never reach the caller: reads degrade to an empty log and failed
//! writes are logged and dropped.

use crate::kv::KeyValueStore;
use crate::Result;
use chrono::Utc;
use devagent_types::{Category, InteractionRecord};
use serde_json::{Map, Value};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, warn};

/// Key the log is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "devagent_db_v1";

/// Number of records retained by `append`.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;
type Cache = Option<Vec<InteractionRecord>>;

/// The interaction log.
///
/// Owns its persistence port and an in-memory copy of the persisted array.
/// The copy is loaded on first access and replaced only after a write lands,
/// so it always mirrors what a fresh process would read back.
pub struct InteractionLog<S> {
    store: S,
    key: String,
    limit: usize,
    cache: Mutex<Cache>,
    clock: Clock,
}

impl<S: KeyValueStore> InteractionLog<S> {
    /// Create a log over `store` with the default key and limit.
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            limit: DEFAULT_HISTORY_LIMIT,
            cache: Mutex::new(None),
            clock: Box::new(|| Utc::now().timestamp_millis()),
        }
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Retain at most `limit` records on append.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Replace the millisecond clock used to stamp new records.
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The persistence port.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Current time according to the log's clock.
    pub(crate) fn now(&self) -> i64 {
        (self.clock)()
    }

    /// Record one interaction, newest first, dropping anything past the limit.
    ///
    /// Always returns the created record. If the write fails the persisted
    /// log is left as it was, so a returned record is not proof of
    /// durability.
    pub fn append(
        &self,
        category: Category,
        input: impl Into<String>,
        output: impl Into<String>,
        metadata: Option<Map<String, Value>>,
    ) -> InteractionRecord {
        let record = InteractionRecord::new(category, input, output, metadata, self.now());
        let mut cache = self.lock_cache();

        let mut records = match self.load(&mut cache) {
            Ok(records) => records,
            Err(e) => {
                error!(target: "devagent::log", "Failed to save item, history unreadable: {}", e);
                return record;
            }
        };

        records.insert(0, record.clone());
        if records.len() > self.limit {
            debug!(
                target: "devagent::log",
                "Dropping {} record(s) past the limit of {}",
                records.len() - self.limit,
                self.limit
            );
            records.truncate(self.limit);
        }

        if let Err(e) = self.persist(&mut cache, records) {
            error!(target: "devagent::log", "Failed to save item: {}", e);
        }
        record
    }

    /// All records, most recent first. Empty if the store is absent, failing
    /// or holds something unparsable.
    pub fn all(&self) -> Vec<InteractionRecord> {
        let mut cache = self.lock_cache();
        self.load(&mut cache).unwrap_or_else(|e| {
            warn!(target: "devagent::log", "Failed to load history: {}", e);
            Vec::new()
        })
    }

    /// Delete the persisted log entirely.
    pub fn clear(&self) {
        let mut cache = self.lock_cache();
        match self.store.remove(&self.key) {
            Ok(()) => *cache = Some(Vec::new()),
            Err(e) => error!(target: "devagent::log", "Failed to clear history: {}", e),
        }
    }

    /// Replace the persisted log with `records` as given.
    ///
    /// Neither the limit nor id uniqueness is enforced. Returns `false` only
    /// when the write fails.
    pub fn import(&self, records: Vec<InteractionRecord>) -> bool {
        let mut cache = self.lock_cache();
        let count = records.len();
        match self.persist(&mut cache, records) {
            Ok(()) => {
                debug!(target: "devagent::log", "Imported {} record(s)", count);
                true
            }
            Err(e) => {
                error!(target: "devagent::log", "Failed to import DB: {}", e);
                false
            }
        }
    }

    /// The log's logical content, suitable for passing back to [`import`](Self::import).
    pub fn export(&self) -> Vec<InteractionRecord> {
        self.all()
    }

    /// Drop every record of `category`, keeping the others in order.
    pub fn remove_category(&self, category: Category) {
        let mut cache = self.lock_cache();
        let records = match self.load(&mut cache) {
            Ok(records) => records,
            Err(e) => {
                error!(target: "devagent::log", "Failed to clear {} history: {}", category, e);
                return;
            }
        };

        let before = records.len();
        let kept: Vec<_> = records
            .into_iter()
            .filter(|r| r.category != category)
            .collect();
        let removed = before - kept.len();

        match self.persist(&mut cache, kept) {
            Ok(()) => debug!(target: "devagent::log", "Removed {} {} record(s)", removed, category),
            Err(e) => error!(target: "devagent::log", "Failed to clear {} history: {}", category, e),
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current records, reading through to the store on first use.
    ///
    /// A store error is returned and nothing is cached, so a later call can
    /// retry. Unparsable content counts as an empty log.
    fn load(&self, cache: &mut Cache) -> Result<Vec<InteractionRecord>> {
        if let Some(records) = cache.as_ref() {
            return Ok(records.clone());
        }

        let records: Vec<InteractionRecord> = match self.store.get(&self.key)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(target: "devagent::log", "Stored history is unparsable, treating as empty: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        *cache = Some(records.clone());
        Ok(records)
    }

    fn persist(&self, cache: &mut Cache, records: Vec<InteractionRecord>) -> Result<()> {
        let raw = serde_json::to_string(&records)?;
        self.store.set(&self.key, &raw)?;
        *cache = Some(records);
        Ok(())
    }
}
