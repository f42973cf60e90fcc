// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Translation
//!
//! Maps domain events to storage envelopes and back.
//!
//! # Registry
//!
//! Hydration is driven by an immutable, process-wide registry keyed by type tag.
//! It is built once from [`EVENT_DESCRIPTORS`], the statically declared closed
//! set of event variants; adding a variant means adding one descriptor here and
//! one arm to `DomainEvent`.
//!
//! # Outbound
//!
//! ```text
//! DomainEvent → resolve user → encode hook → payload fields → EventEnvelope
//! ```
//!
//! Only the variant's payload struct is written into `data`; shared metadata
//! travels in the envelope's own columns.
//!
//! # Inbound
//!
//! ```text
//! EventEnvelope → registry[type] → metadata + payload → bind stream → decode hook
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::envelope::{EventEnvelope, User, UserId};
use crate::errors::{TranslationError, TranslationResult};
use crate::events::{
    DomainEvent, EmployeeFired, EmployeeHired, Event, EventMetadata, EventPayload,
    MenuItemAdded, MenuItemCreated, MenuItemRemoved, PriceChanged, RestaurantOpened,
};
use crate::users::UserDirectory;

/// Users already resolved within one save batch
pub type UserCache = HashMap<UserId, User>;

type Hydrate = fn(EventMetadata, Uuid, Map<String, Value>) -> TranslationResult<DomainEvent>;

/// Registry entry: type tag plus the constructor-from-envelope for one variant
#[derive(Clone, Copy)]
pub struct EventDescriptor {
    pub event_type: &'static str,
    hydrate: Hydrate,
}

impl EventDescriptor {
    pub const fn of<P: EventPayload>() -> Self {
        Self {
            event_type: P::EVENT_TYPE,
            hydrate: hydrate::<P>,
        }
    }
}

impl std::fmt::Debug for EventDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDescriptor")
            .field("event_type", &self.event_type)
            .finish()
    }
}

/// Every event variant that can be read back from storage
pub const EVENT_DESCRIPTORS: &[EventDescriptor] = &[
    EventDescriptor::of::<RestaurantOpened>(),
    EventDescriptor::of::<EmployeeHired>(),
    EventDescriptor::of::<EmployeeFired>(),
    EventDescriptor::of::<MenuItemAdded>(),
    EventDescriptor::of::<MenuItemRemoved>(),
    EventDescriptor::of::<MenuItemCreated>(),
    EventDescriptor::of::<PriceChanged>(),
];

static REGISTRY: LazyLock<HashMap<&'static str, EventDescriptor>> = LazyLock::new(|| {
    EVENT_DESCRIPTORS
        .iter()
        .map(|descriptor| (descriptor.event_type, *descriptor))
        .collect()
});

/// Look up the descriptor registered for a type tag
pub fn descriptor(event_type: &str) -> Option<&'static EventDescriptor> {
    REGISTRY.get(event_type)
}

/// Deserialize a stored payload, bind it to its stream, then run the decode hook
fn hydrate_event<P: EventPayload>(
    mut metadata: EventMetadata,
    stream_id: Uuid,
    payload: Map<String, Value>,
) -> TranslationResult<Event<P>> {
    let mut payload: P = serde_json::from_value(Value::Object(payload)).map_err(|source| {
        TranslationError::Payload {
            event_type: P::EVENT_TYPE,
            source,
        }
    })?;
    metadata.bind_stream(stream_id);
    payload.decode();
    Ok(Event { metadata, payload })
}

fn hydrate<P: EventPayload>(
    metadata: EventMetadata,
    stream_id: Uuid,
    payload: Map<String, Value>,
) -> TranslationResult<DomainEvent> {
    hydrate_event::<P>(metadata, stream_id, payload).map(Event::into_domain)
}

fn extract_payload<P: EventPayload>(event: &Event<P>) -> TranslationResult<Map<String, Value>> {
    let mut payload = event.payload.clone();
    payload.encode();

    let to_error = |source: serde_json::Error| TranslationError::Payload {
        event_type: P::EVENT_TYPE,
        source,
    };
    match serde_json::to_value(&payload).map_err(to_error)? {
        Value::Object(map) => Ok(map),
        _ => Err(to_error(<serde_json::Error as serde::ser::Error>::custom(
            "payload must serialize to a JSON object",
        ))),
    }
}

fn payload_of(event: &DomainEvent) -> TranslationResult<Map<String, Value>> {
    match event {
        DomainEvent::RestaurantOpened(e) => extract_payload(e),
        DomainEvent::EmployeeHired(e) => extract_payload(e),
        DomainEvent::EmployeeFired(e) => extract_payload(e),
        DomainEvent::MenuItemAdded(e) => extract_payload(e),
        DomainEvent::MenuItemRemoved(e) => extract_payload(e),
        DomainEvent::MenuItemCreated(e) => extract_payload(e),
        DomainEvent::PriceChanged(e) => extract_payload(e),
    }
}

/// Bidirectional mapping between domain events and envelopes
#[derive(Clone)]
pub struct EventTranslator {
    users: Arc<dyn UserDirectory>,
}

impl EventTranslator {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// Translate a whole save batch, resolving each user at most once
    pub async fn to_envelopes(&self, events: &[DomainEvent]) -> TranslationResult<Vec<EventEnvelope>> {
        let mut cache = UserCache::new();
        let mut envelopes = Vec::with_capacity(events.len());
        for event in events {
            envelopes.push(self.to_envelope(event, &mut cache).await?);
        }
        Ok(envelopes)
    }

    /// Translate one bound event into its storage envelope
    ///
    /// # Errors
    ///
    /// - `UnknownUser` if the user id does not resolve
    /// - `UnboundEvent` if no aggregate has applied the event yet
    /// - `Payload` if the payload cannot be serialized
    pub async fn to_envelope(
        &self,
        event: &DomainEvent,
        cache: &mut UserCache,
    ) -> TranslationResult<EventEnvelope> {
        let user_id = event.user_id();
        if !cache.contains_key(&user_id) {
            let user = self
                .users
                .find_user(user_id)
                .await?
                .ok_or(TranslationError::UnknownUser(user_id))?;
            cache.insert(user_id, user);
        }

        let event_stream_id = event
            .event_stream_id()
            .ok_or(TranslationError::UnboundEvent {
                event_type: event.event_type(),
                revision: event.revision(),
            })?;

        let payload = payload_of(event)?;

        debug!(
            stream_id = %event_stream_id,
            revision = event.revision(),
            event_type = event.event_type(),
            "Translated event to envelope"
        );

        Ok(EventEnvelope {
            event_stream_id,
            revision: event.revision(),
            event_type: event.event_type().to_string(),
            time: event.timestamp(),
            recorded_at: None,
            user_id,
            payload,
        })
    }

    /// Hydrate a stored envelope into a replayable domain event
    ///
    /// # Errors
    ///
    /// - `UnknownEventType` if the type tag is not registered
    /// - `Construction` if the stored metadata is invalid
    /// - `Payload` if the stored payload does not match the variant
    pub fn from_envelope(&self, envelope: EventEnvelope) -> TranslationResult<DomainEvent> {
        let descriptor = descriptor(&envelope.event_type)
            .ok_or_else(|| TranslationError::UnknownEventType(envelope.event_type.clone()))?;

        let mut metadata = EventMetadata::new(Some(envelope.user_id), envelope.revision)?;
        metadata.set_timestamp(envelope.time);

        (descriptor.hydrate)(metadata, envelope.event_stream_id, envelope.payload)
    }
}
