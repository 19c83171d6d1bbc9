use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    config_store::{ConfigStore, KEY_ADVERTISER_ID, KEY_DEBUG, KEY_LIFECYCLE},
    context::AppContext,
    event_logger::{EngineSettings, EventLogger},
    Error, Result, SdkConfig,
};

/// Controls the level of SDK logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// No logging.
    None,
    /// Log exceptional situations only.
    Info,
    /// Log exceptional situations and debug output.
    Debug,
    /// Same as [`LogLevel::Debug`], plus per-event trace output.
    Verbose,
}

impl LogLevel {
    /// Whether any logging is enabled at this level.
    pub fn should_log(self) -> bool {
        self != LogLevel::None
    }

    /// The equivalent [`log::LevelFilter`], for hosts wiring the SDK level into their logger.
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::None => log::LevelFilter::Off,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Verbose => log::LevelFilter::Trace,
        }
    }
}

// Guards the one-instance-per-process invariant. Deliberately never reset: re-initialization
// within a process is rejected, not supported.
static INSTANCE_EXISTS: AtomicBool = AtomicBool::new(false);

/// The SDK lifecycle core.
///
/// At most one `Sdk` exists per process. [`Sdk::initialize`] constructs it behind a process-wide
/// guard and hands back an `Arc` that the host passes to every component needing SDK state;
/// there is no global accessor and no teardown short of process exit. A second `initialize`
/// call fails with [`Error::AlreadyInitialized`].
///
/// The `Sdk` itself runs no threads. It is a passive, thread-safe state holder that may be
/// shared freely across the host's threads.
pub struct Sdk {
    context: Arc<AppContext>,
    access_token: String,
    app_id: Option<String>,
    log_level: LogLevel,
    /// The start-tracking gate: whether the engine is permitted to flush. Queueing of events is
    /// not affected by this flag.
    tracking_enabled: AtomicBool,
    event_logger: Box<dyn EventLogger + Send + Sync>,
}

impl Sdk {
    /// Validate `config` and construct the process-wide SDK instance.
    ///
    /// On success a configuration snapshot has been written to the context's key-value store and
    /// the event-logging engine has been built from the config's factory. On failure no state
    /// is created and nothing is persisted.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCredential`] if no non-empty access token was supplied (explicitly or via
    /// platform metadata); [`Error::AlreadyInitialized`] if an instance already exists in this
    /// process.
    pub fn initialize(config: SdkConfig) -> Result<Arc<Sdk>> {
        Sdk::initialize_guarded(config, &INSTANCE_EXISTS)
    }

    /// `initialize` against an explicit guard. Tests use local guards to exercise the protocol
    /// without consuming the process-wide one.
    pub(crate) fn initialize_guarded(config: SdkConfig, guard: &AtomicBool) -> Result<Arc<Sdk>> {
        // The singleton check takes precedence: once an instance exists, a second call fails
        // with AlreadyInitialized no matter what config it carries.
        if guard.load(Ordering::Acquire) {
            return Err(Error::AlreadyInitialized);
        }

        // Validation before the guard write: a rejected config must leave no trace, neither in
        // the guard nor in durable storage.
        let access_token = match config.access_token.as_deref() {
            Some(token) if !token.is_empty() => token.to_owned(),
            _ => return Err(Error::MissingCredential),
        };

        if guard
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::AlreadyInitialized);
        }

        let log_level = if config.debug_enabled {
            LogLevel::Verbose
        } else {
            LogLevel::Info
        };

        ConfigStore::new(config.context.key_value_store()).write_snapshot(&config);

        let SdkConfig {
            context,
            api_id,
            lifecycle_tracking_enabled,
            advertiser_id_collection_enabled,
            auto_start,
            logger_factory,
            ..
        } = config;

        let event_logger = logger_factory.build(EngineSettings {
            lifecycle_tracking_enabled,
            advertiser_id_collection_enabled,
        });

        log::info!(target: "beacon", app_id = context.app_id(), auto_start; "SDK initialized");

        Ok(Arc::new(Sdk {
            context,
            access_token,
            app_id: api_id,
            log_level,
            tracking_enabled: AtomicBool::new(auto_start),
            event_logger,
        }))
    }

    /// Permit tracking and flush buffered events immediately.
    ///
    /// Unconditional and idempotent: calling when tracking is already permitted only re-triggers
    /// the flush.
    pub fn start_tracking(&self) {
        self.tracking_enabled.store(true, Ordering::Release);
        log::debug!(target: "beacon", "tracking started, flushing buffered events");
        self.event_logger.flush();
    }

    /// Reconstruct an equivalent [`SdkConfig`] from the snapshot persisted by a previous
    /// successful `initialize` in an earlier process (e.g. after a platform boot event).
    ///
    /// The stored access token is taken verbatim, overriding any metadata-derived token: on
    /// resume the snapshot is authoritative. If no snapshot exists the returned config carries
    /// no access token and a subsequent `initialize` fails with
    /// [`Error::MissingCredential`]; the caller must treat that as "cannot resume".
    pub fn rebuild_config(context: Arc<AppContext>) -> SdkConfig {
        let store = ConfigStore::new(context.key_value_store());
        let mut config = SdkConfig::new(context);
        config.access_token = store.access_token();
        if store.flag(KEY_DEBUG) == Some(true) {
            config = config.enable_debug();
        }
        if store.flag(KEY_LIFECYCLE) == Some(false) {
            config = config.opt_out_auto_event_tracking();
        }
        if store.flag(KEY_ADVERTISER_ID) == Some(false) {
            config = config.opt_out_advertiser_id_collection();
        }
        config
    }

    /// The host application context captured at initialization.
    pub fn application_context(&self) -> &Arc<AppContext> {
        &self.context
    }

    /// The access token events are reported under.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The SDK log level derived at initialization.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// The api id, if one was configured.
    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    /// Whether tracking is currently permitted (the start-tracking gate).
    ///
    /// This reflects `auto_start` after `initialize` and becomes true permanently after
    /// [`Sdk::start_tracking`]. It does not gate event queueing, only flushing policy.
    pub fn is_tracking_enabled(&self) -> bool {
        self.tracking_enabled.load(Ordering::Acquire)
    }

    pub(crate) fn event_logger(&self) -> &(dyn EventLogger + Send + Sync) {
        &*self.event_logger
    }
}
