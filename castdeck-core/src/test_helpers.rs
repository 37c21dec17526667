//! Test helpers and fixtures for castdeck-core tests

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    models::{BroadcastType, Product, SessionConfig, SessionEvent},
    service::{EventSink, FixedPicker, SessionContext, SessionController},
};

/// Event sink that keeps every published event for assertions
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<SessionEvent>>,
}

impl RecordingEventSink {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().clone()
    }

    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(SessionEvent::event_type).collect()
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event: SessionEvent) {
        self.events.lock().push(event);
    }
}

/// Products a scheduler would hand over for a commerce broadcast
pub fn catalog_fixture() -> Vec<Product> {
    vec![
        Product::new("sku-1", "Glow Serum", 32.0),
        Product::new("sku-2", "Lip Tint", 18.5),
        Product::new("sku-3", "Travel Pouch", 9.99),
    ]
}

/// Test fixture builder for a session controller
pub struct SessionFixture {
    broadcast_type: BroadcastType,
    config: SessionConfig,
    picker_index: usize,
}

impl SessionFixture {
    pub fn new() -> Self {
        Self {
            broadcast_type: BroadcastType::General,
            config: SessionConfig {
                title: "Test Broadcast".to_string(),
                platforms: vec!["youtube".to_string()],
                catalog: catalog_fixture(),
            },
            picker_index: 0,
        }
    }

    pub fn with_broadcast_type(mut self, broadcast_type: BroadcastType) -> Self {
        self.broadcast_type = broadcast_type;
        self
    }

    pub fn with_picker_index(mut self, index: usize) -> Self {
        self.picker_index = index;
        self
    }

    pub fn build(self) -> (SessionController, Arc<RecordingEventSink>) {
        let events = Arc::new(RecordingEventSink::default());
        let context = SessionContext::default()
            .with_picker(Arc::new(FixedPicker(self.picker_index)))
            .with_events(events.clone());

        let controller =
            SessionController::create_session(self.broadcast_type, self.config, context);
        (controller, events)
    }
}

impl Default for SessionFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn general_session() -> (SessionController, Arc<RecordingEventSink>) {
    SessionFixture::new().build()
}

pub fn commerce_session() -> (SessionController, Arc<RecordingEventSink>) {
    SessionFixture::new()
        .with_broadcast_type(BroadcastType::Commerce)
        .build()
}
