use std::sync::Arc;

use crate::{event_logger::EventProperties, Sdk};

/// The public tracking surface: forwards events and flush requests to the event-logging engine.
///
/// Events are forwarded unconditionally; the tracking gate on [`Sdk`] governs whether and when
/// the engine flushes, not whether events are queued. Calls may come from any thread
/// concurrently, and the dispatcher adds no serialization of its own: ordering and batching
/// guarantees belong to the engine.
pub struct EventDispatcher {
    sdk: Arc<Sdk>,
}

impl EventDispatcher {
    /// Create a dispatcher for the given SDK instance.
    pub fn new(sdk: Arc<Sdk>) -> Self {
        EventDispatcher { sdk }
    }

    /// Track an event without custom properties.
    pub fn track_event(&self, event: &str) {
        log::trace!(target: "beacon", event; "queueing event");
        self.sdk.event_logger().track(event, None);
    }

    /// Track an event with custom properties.
    pub fn track_event_with_properties(&self, event: &str, properties: &EventProperties) {
        log::trace!(target: "beacon", event, properties:serde; "queueing event");
        self.sdk.event_logger().track(event, Some(properties));
    }

    /// Ask the engine to deliver buffered events now. Delivery is asynchronous and fully owned
    /// by the engine.
    pub fn flush(&self) {
        self.sdk.event_logger().flush();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use crate::{
        config_store::InMemoryStore,
        context::NoMetadata,
        event_logger::{EngineSettings, EventLogger},
        AppContext, SdkConfig,
    };

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingLogger(Arc<RecordingInner>);

    #[derive(Default)]
    struct RecordingInner {
        tracked: Mutex<Vec<(String, Option<EventProperties>)>>,
        flushes: AtomicUsize,
    }

    impl EventLogger for RecordingLogger {
        fn track(&self, event: &str, properties: Option<&EventProperties>) {
            self.0
                .tracked
                .lock()
                .unwrap()
                .push((event.to_owned(), properties.cloned()));
        }

        fn flush(&self) {
            self.0.flushes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn dispatcher_with_logger() -> (EventDispatcher, RecordingLogger) {
        let logger = RecordingLogger::default();
        let factory = {
            let logger = logger.clone();
            move |_: EngineSettings| Box::new(logger.clone()) as Box<dyn EventLogger + Send + Sync>
        };

        let context =
            AppContext::new("com.example.app", NoMetadata, Arc::new(InMemoryStore::new()))
                .unwrap();
        let guard = AtomicBool::new(false);
        let sdk = Sdk::initialize_guarded(
            SdkConfig::new(context)
                .set_access_token("token")
                .event_logger_factory(factory),
            &guard,
        )
        .unwrap();

        (EventDispatcher::new(sdk), logger)
    }

    #[test]
    fn forwards_events_unchanged() {
        let (dispatcher, logger) = dispatcher_with_logger();

        let props = EventProperties::new().put("currency", "USD").put("value", 9.99);
        dispatcher.track_event_with_properties("purchase", &props);
        dispatcher.track_event("launch");

        let tracked = logger.0.tracked.lock().unwrap();
        assert_eq!(tracked.len(), 2);
        assert_eq!(tracked[0], ("purchase".to_owned(), Some(props)));
        assert_eq!(tracked[1], ("launch".to_owned(), None));
    }

    #[test]
    fn forwards_even_when_tracking_gate_is_off() {
        let logger = RecordingLogger::default();
        let factory = {
            let logger = logger.clone();
            move |_: EngineSettings| Box::new(logger.clone()) as Box<dyn EventLogger + Send + Sync>
        };

        // Auto-start opted out via metadata, so the gate starts closed.
        let context = AppContext::new(
            "com.example.app",
            |key: &str| {
                (key == crate::context::META_OPT_OUT_AUTO_START).then(|| "true".to_owned())
            },
            Arc::new(InMemoryStore::new()),
        )
        .unwrap();
        let guard = AtomicBool::new(false);
        let sdk = Sdk::initialize_guarded(
            SdkConfig::new(context)
                .set_access_token("token")
                .event_logger_factory(factory),
            &guard,
        )
        .unwrap();
        assert!(!sdk.is_tracking_enabled());

        let dispatcher = EventDispatcher::new(sdk);
        dispatcher.track_event("background_event");

        assert_eq!(logger.0.tracked.lock().unwrap().len(), 1);
    }

    #[test]
    fn flush_forwards_to_engine() {
        let (dispatcher, logger) = dispatcher_with_logger();
        dispatcher.flush();
        dispatcher.flush();
        assert_eq!(logger.0.flushes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_tracks_are_neither_lost_nor_duplicated() {
        let (dispatcher, logger) = dispatcher_with_logger();
        let dispatcher = Arc::new(dispatcher);

        const THREADS: usize = 8;
        const EVENTS_PER_THREAD: usize = 50;

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let dispatcher = dispatcher.clone();
                std::thread::spawn(move || {
                    for i in 0..EVENTS_PER_THREAD {
                        dispatcher.track_event(&format!("event-{t}-{i}"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let tracked = logger.0.tracked.lock().unwrap();
        assert_eq!(tracked.len(), THREADS * EVENTS_PER_THREAD);

        let mut names: Vec<_> = tracked.iter().map(|(name, _)| name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), THREADS * EVENTS_PER_THREAD);
    }
}
