use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::SdkConfig;

pub(crate) const KEY_ACCESS_TOKEN: &str = "beacon.config.access_token";
pub(crate) const KEY_DEBUG: &str = "beacon.config.debug";
pub(crate) const KEY_LIFECYCLE: &str = "beacon.config.lifecycle";
pub(crate) const KEY_ADVERTISER_ID: &str = "beacon.config.advertiser_id";

/// Durable string key-value storage provided by the host platform.
///
/// The SDK stores its configuration snapshot here so tracking can resume after a process
/// restart without the host re-supplying its setup call. Implementations are expected to be
/// local and fast (no network, no long suspension); the SDK calls into the store synchronously
/// during `initialize` and `rebuild_config`.
pub trait KeyValueStore {
    /// Merge the given entries into the store.
    fn set(&self, values: HashMap<String, String>);

    /// Read a single value. `None` if the key was never written.
    fn get(&self, key: &str) -> Option<String>;
}

/// A [`KeyValueStore`] held in process memory.
///
/// Suitable for tests and for hosts that accept losing the snapshot on process exit. Durable
/// hosts should back the trait with platform storage instead.
#[derive(Default)]
pub struct InMemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn set(&self, values: HashMap<String, String>) {
        // Lock poisoning would mean a writer panicked mid-insert; unwrapping the poison keeps
        // the store usable rather than silently dropping writes.
        let mut guard = self.values.lock().unwrap_or_else(|e| e.into_inner());
        guard.extend(values);
    }

    fn get(&self, key: &str) -> Option<String> {
        let guard = self.values.lock().unwrap_or_else(|e| e.into_inner());
        guard.get(key).cloned()
    }
}

/// Persists and retrieves the configuration snapshot under fixed keys.
///
/// Booleans are stored as the literal strings `"true"`/`"false"` and are read back by exact
/// string equality. Any other literal is treated as absent, which keeps the rebuild protocol
/// byte-compatible with snapshots written by earlier SDK generations.
pub(crate) struct ConfigStore {
    store: Arc<dyn KeyValueStore + Send + Sync>,
}

impl ConfigStore {
    pub(crate) fn new(store: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Write the durable subset of `config` as a snapshot.
    pub(crate) fn write_snapshot(&self, config: &SdkConfig) {
        let mut values = HashMap::new();
        if let Some(token) = &config.access_token {
            values.insert(KEY_ACCESS_TOKEN.to_owned(), token.clone());
        }
        values.insert(KEY_DEBUG.to_owned(), literal(config.debug_enabled));
        values.insert(
            KEY_LIFECYCLE.to_owned(),
            literal(config.lifecycle_tracking_enabled),
        );
        values.insert(
            KEY_ADVERTISER_ID.to_owned(),
            literal(config.advertiser_id_collection_enabled),
        );
        self.store.set(values);
        log::debug!(target: "beacon", "persisted configuration snapshot");
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.store.get(KEY_ACCESS_TOKEN)
    }

    /// Typed read of a stored boolean flag. Only the exact literals round-trip; anything else
    /// yields `None` and leaves the caller's default in place.
    pub(crate) fn flag(&self, key: &str) -> Option<bool> {
        self.store.get(key).as_deref().and_then(parse_literal)
    }
}

fn literal(value: bool) -> String {
    if value { "true" } else { "false" }.to_owned()
}

fn parse_literal(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
