use std::sync::Arc;

use crate::{config_store::KeyValueStore, Error, Result};

/// Metadata key under which a host may declare the access token instead of passing it
/// programmatically.
pub const META_ACCESS_TOKEN: &str = "beacon.sdk.access_token";
/// Metadata key for opting out of auto-start. Only the exact literal `"true"` opts out.
pub const META_OPT_OUT_AUTO_START: &str = "beacon.sdk.opt_out_auto_start";

/// Read-only source of host application metadata (e.g. a manifest or an embedded properties
/// file).
///
/// Reads are best-effort by contract: a missing key, an unreadable manifest, or any other
/// platform hiccup is expressed as `None` and is never an error. The SDK treats metadata purely
/// as optional enrichment of its configuration.
pub trait MetadataSource {
    /// Look up a metadata value by key. `None` means "not available", for any reason.
    fn get(&self, key: &str) -> Option<String>;
}

impl<F> MetadataSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// A metadata source with no entries, for hosts that configure everything programmatically.
pub struct NoMetadata;

impl MetadataSource for NoMetadata {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Opaque handle to the host application.
///
/// The SDK never owns the host; it captures this handle at initialization and keeps it for the
/// process lifetime. The handle bundles everything the SDK needs from the platform: a stable
/// application identifier, the metadata source, and the durable key-value store used for the
/// persisted configuration snapshot.
pub struct AppContext {
    app_id: String,
    metadata: Box<dyn MetadataSource + Send + Sync>,
    store: Arc<dyn KeyValueStore + Send + Sync>,
}

impl AppContext {
    /// Create an application context handle.
    ///
    /// Fails with [`Error::InvalidArgument`] if `app_id` is empty: an identifiable host
    /// application is the minimum the SDK requires to operate.
    pub fn new(
        app_id: impl Into<String>,
        metadata: impl MetadataSource + Send + Sync + 'static,
        store: Arc<dyn KeyValueStore + Send + Sync>,
    ) -> Result<Arc<AppContext>> {
        let app_id = app_id.into();
        if app_id.is_empty() {
            return Err(Error::InvalidArgument("application id must not be empty"));
        }
        Ok(Arc::new(AppContext {
            app_id,
            metadata: Box::new(metadata),
            store,
        }))
    }

    /// The host application identifier this context was created with.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Best-effort metadata lookup.
    pub fn metadata(&self, key: &str) -> Option<String> {
        self.metadata.get(key)
    }

    /// The durable key-value store backing the persisted configuration snapshot.
    pub fn key_value_store(&self) -> Arc<dyn KeyValueStore + Send + Sync> {
        self.store.clone()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config_store::InMemoryStore;

    use super::*;

    #[test]
    fn rejects_empty_app_id() {
        let result = AppContext::new("", NoMetadata, Arc::new(InMemoryStore::new()));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn closures_act_as_metadata_sources() {
        let context = AppContext::new(
            "com.example.app",
            |key: &str| (key == META_ACCESS_TOKEN).then(|| "token-from-manifest".to_owned()),
            Arc::new(InMemoryStore::new()),
        )
        .unwrap();

        assert_eq!(
            context.metadata(META_ACCESS_TOKEN).as_deref(),
            Some("token-from-manifest")
        );
        assert_eq!(context.metadata(META_OPT_OUT_AUTO_START), None);
    }
}
