use std::collections::HashMap;

use derive_more::From;
use serde::{Deserialize, Serialize};

/// A single property value attached to a tracked event.
#[derive(Debug, Serialize, Deserialize, PartialEq, From, Clone)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A string value.
    String(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Boolean(bool),
    /// An explicit null.
    Null,
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

/// String-keyed properties attached to a custom event.
///
/// ```
/// # use beacon::EventProperties;
/// let props = EventProperties::new()
///     .put("currency", "USD")
///     .put("value", 9.99);
/// ```
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(transparent)]
pub struct EventProperties(HashMap<String, PropertyValue>);

impl EventProperties {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, returning the set for chaining.
    pub fn put(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a property by key.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// Number of properties in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Settings the engine is constructed with at SDK initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Whether the engine should capture app foreground/background/launch events automatically.
    pub lifecycle_tracking_enabled: bool,
    /// Whether the engine may collect the platform advertising identifier.
    pub advertiser_id_collection_enabled: bool,
}

/// The event-logging engine: queueing, batching, and network delivery of tracked events.
///
/// The core never implements delivery itself; it forwards every tracked event here. Ordering,
/// batching, retry, and cancellation of in-flight delivery are entirely the engine's concern.
/// Implementations must tolerate concurrent calls from arbitrary threads.
pub trait EventLogger {
    /// Queue an event for delivery.
    fn track(&self, event: &str, properties: Option<&EventProperties>);

    /// Ask the engine to deliver buffered events now instead of waiting for batching thresholds.
    fn flush(&self);
}

/// Builds the event-logging engine during SDK initialization.
pub trait EventLoggerFactory {
    /// Construct the engine with the settings derived from the SDK configuration.
    fn build(&self, settings: EngineSettings) -> Box<dyn EventLogger + Send + Sync>;
}

impl<F> EventLoggerFactory for F
where
    F: Fn(EngineSettings) -> Box<dyn EventLogger + Send + Sync>,
{
    fn build(&self, settings: EngineSettings) -> Box<dyn EventLogger + Send + Sync> {
        self(settings)
    }
}

pub(crate) struct NoopEventLogger;
impl EventLogger for NoopEventLogger {
    fn track(&self, _event: &str, _properties: Option<&EventProperties>) {}
    fn flush(&self) {}
}
