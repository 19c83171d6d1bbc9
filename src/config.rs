use std::sync::Arc;

use crate::{
    context::{AppContext, META_ACCESS_TOKEN, META_OPT_OUT_AUTO_START},
    event_logger::{EngineSettings, EventLogger, EventLoggerFactory, NoopEventLogger},
};

/// Configuration for the SDK, handed to [`Sdk::initialize`](crate::Sdk::initialize).
///
/// Setters perform no validation; the whole configuration is validated once, at initialization.
///
/// ```
/// # use std::sync::Arc;
/// # use beacon::{AppContext, InMemoryStore, NoMetadata, SdkConfig};
/// let context = AppContext::new("com.example.app", NoMetadata, Arc::new(InMemoryStore::new()))?;
/// let config = SdkConfig::new(context)
///     .set_access_token("access-token")
///     .enable_debug();
/// # Ok::<(), beacon::Error>(())
/// ```
pub struct SdkConfig {
    pub(crate) context: Arc<AppContext>,
    pub(crate) access_token: Option<String>,
    pub(crate) api_id: Option<String>,
    pub(crate) debug_enabled: bool,
    pub(crate) lifecycle_tracking_enabled: bool,
    pub(crate) advertiser_id_collection_enabled: bool,
    pub(crate) auto_start: bool,
    pub(crate) logger_factory: Box<dyn EventLoggerFactory + Send + Sync>,
}

impl SdkConfig {
    /// Create a configuration for the given application context.
    ///
    /// The access token and the auto-start opt-out are read from platform metadata as optional
    /// enrichment: absent or unreadable metadata leaves the defaults in place and is never an
    /// error. Only the exact literal `"true"` under the opt-out key disables auto-start.
    pub fn new(context: Arc<AppContext>) -> SdkConfig {
        let access_token = context.metadata(META_ACCESS_TOKEN);
        let auto_start = context.metadata(META_OPT_OUT_AUTO_START).as_deref() != Some("true");
        SdkConfig {
            context,
            access_token,
            api_id: None,
            debug_enabled: false,
            lifecycle_tracking_enabled: true,
            advertiser_id_collection_enabled: true,
            auto_start,
            logger_factory: Box::new(|_: EngineSettings| {
                Box::new(NoopEventLogger) as Box<dyn EventLogger + Send + Sync>
            }),
        }
    }

    /// Enable debug logs. The SDK log level becomes `Verbose` instead of `Info`.
    pub fn enable_debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Set the api id used for reporting.
    pub fn set_api_id(mut self, api_id: impl Into<String>) -> Self {
        self.api_id = Some(api_id.into());
        self
    }

    /// Set the access token, overriding any token found in platform metadata.
    pub fn set_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Disable automatic lifecycle event tracking (app foreground/background/launch capture).
    pub fn opt_out_auto_event_tracking(mut self) -> Self {
        self.lifecycle_tracking_enabled = false;
        self
    }

    /// Disable collection of the platform advertising identifier.
    pub fn opt_out_advertiser_id_collection(mut self) -> Self {
        self.advertiser_id_collection_enabled = false;
        self
    }

    /// Set the factory that builds the event-logging engine at initialization.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use beacon::{AppContext, EventLogger, InMemoryStore, NoMetadata, SdkConfig};
    /// # struct MyEngine;
    /// # impl EventLogger for MyEngine {
    /// #     fn track(&self, _: &str, _: Option<&beacon::EventProperties>) {}
    /// #     fn flush(&self) {}
    /// # }
    /// # let context = AppContext::new("com.example.app", NoMetadata, Arc::new(InMemoryStore::new()))?;
    /// let config = SdkConfig::new(context).event_logger_factory(|_settings| {
    ///     Box::new(MyEngine) as Box<dyn EventLogger + Send + Sync>
    /// });
    /// # Ok::<(), beacon::Error>(())
    /// ```
    pub fn event_logger_factory(
        mut self,
        factory: impl EventLoggerFactory + Send + Sync + 'static,
    ) -> Self {
        self.logger_factory = Box::new(factory);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        config_store::InMemoryStore,
        context::{NoMetadata, META_ACCESS_TOKEN, META_OPT_OUT_AUTO_START},
        AppContext,
    };

    use super::*;

    fn context_with_metadata(
        entries: Vec<(&'static str, &'static str)>,
    ) -> Arc<AppContext> {
        AppContext::new(
            "com.example.app",
            move |key: &str| {
                entries
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| (*v).to_owned())
            },
            Arc::new(InMemoryStore::new()),
        )
        .unwrap()
    }

    #[test]
    fn defaults_without_metadata() {
        let context =
            AppContext::new("com.example.app", NoMetadata, Arc::new(InMemoryStore::new()))
                .unwrap();
        let config = SdkConfig::new(context);

        assert_eq!(config.access_token, None);
        assert_eq!(config.api_id, None);
        assert!(!config.debug_enabled);
        assert!(config.lifecycle_tracking_enabled);
        assert!(config.advertiser_id_collection_enabled);
        assert!(config.auto_start);
    }

    #[test]
    fn access_token_comes_from_metadata() {
        let config =
            SdkConfig::new(context_with_metadata(vec![(META_ACCESS_TOKEN, "meta-token")]));
        assert_eq!(config.access_token.as_deref(), Some("meta-token"));
    }

    #[test]
    fn explicit_token_overrides_metadata() {
        let config =
            SdkConfig::new(context_with_metadata(vec![(META_ACCESS_TOKEN, "meta-token")]))
                .set_access_token("explicit");
        assert_eq!(config.access_token.as_deref(), Some("explicit"));
    }

    #[test]
    fn auto_start_opt_out_requires_exact_literal() {
        let opted_out =
            SdkConfig::new(context_with_metadata(vec![(META_OPT_OUT_AUTO_START, "true")]));
        assert!(!opted_out.auto_start);

        let still_on =
            SdkConfig::new(context_with_metadata(vec![(META_OPT_OUT_AUTO_START, "TRUE")]));
        assert!(still_on.auto_start);
    }

    #[test]
    fn opt_outs_flip_the_corresponding_flags() {
        let context =
            AppContext::new("com.example.app", NoMetadata, Arc::new(InMemoryStore::new()))
                .unwrap();
        let config = SdkConfig::new(context)
            .opt_out_auto_event_tracking()
            .opt_out_advertiser_id_collection()
            .set_api_id("api-123");

        assert!(!config.lifecycle_tracking_enabled);
        assert!(!config.advertiser_id_collection_enabled);
        assert_eq!(config.api_id.as_deref(), Some("api-123"));
    }
}
