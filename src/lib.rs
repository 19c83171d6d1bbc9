//! Client-side event tracking SDK for Rust host applications.
//!
//! # Overview
//!
//! The SDK revolves around a process-wide [`Sdk`] instance constructed once via
//! [`Sdk::initialize`] from an [`SdkConfig`]. The configuration is built fluently from an
//! [`AppContext`] handle supplied by the host and is validated only at initialization. Events
//! are tracked through an [`EventDispatcher`], which forwards them to a host-provided
//! [`EventLogger`] engine responsible for queueing, batching, and delivery.
//!
//! A configuration snapshot is persisted to the host's [`KeyValueStore`] on every successful
//! initialization, and [`Sdk::rebuild_config`] reconstructs an equivalent configuration after a
//! process restart so tracking can resume without the host re-supplying its setup call.
//!
//! ```
//! use std::sync::Arc;
//! use beacon::{AppContext, EventDispatcher, InMemoryStore, NoMetadata, Sdk, SdkConfig};
//!
//! # fn main() -> beacon::Result<()> {
//! let context = AppContext::new("com.example.app", NoMetadata, Arc::new(InMemoryStore::new()))?;
//! let sdk = Sdk::initialize(SdkConfig::new(context).set_access_token("access-token"))?;
//!
//! let dispatcher = EventDispatcher::new(sdk);
//! dispatcher.track_event("launch");
//! dispatcher.flush();
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Errors are represented by the [`Error`] enum. Every variant signals a contract violation at
//! the calling site (invalid context, missing credential, double initialization) and is surfaced
//! synchronously; the SDK performs no internal retries. Failures of event delivery never reach
//! this layer.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate for logging messages
//! under the `beacon` target. Consider integrating a `log`-compatible logger implementation for
//! better visibility into SDK operations.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

mod config;
mod config_store;
mod context;
mod dispatcher;
mod error;
mod event_logger;
mod sdk;

pub use config::SdkConfig;
pub use config_store::{InMemoryStore, KeyValueStore};
pub use context::{
    AppContext, MetadataSource, NoMetadata, META_ACCESS_TOKEN, META_OPT_OUT_AUTO_START,
};
pub use dispatcher::EventDispatcher;
pub use error::{Error, Result};
pub use event_logger::{
    EngineSettings, EventLogger, EventLoggerFactory, EventProperties, PropertyValue,
};
pub use sdk::{LogLevel, Sdk};
