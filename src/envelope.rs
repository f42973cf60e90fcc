// Copyright (c) 2025 - Cowboy AI, Inc.
//! Persisted Event Records
//!
//! An [`EventEnvelope`] is the storage-shaped form of one domain event:
//! stream metadata plus an opaque JSON payload. Envelopes are what the event
//! store writes and reads; domain code never constructs them directly, the
//! translator does.
//!
//! # Stored Shape
//!
//! ```text
//! event_stream_id | revision | event_type | time | recorded_at | user_id | payload
//! ----------------+----------+------------+------+-------------+---------+--------
//!       UUID      |  i64 ≥0  |  ≤125 chr  | ts   | server ts   | FK user | JSON
//! ```
//!
//! `(event_stream_id, revision)` is unique across the whole store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::events::Revision;

/// Integer reference into the user directory
pub type UserId = i64;

/// Storage-shaped record of a single domain event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Stream (aggregate identity) this event belongs to
    pub event_stream_id: Uuid,

    /// Position within the stream
    pub revision: Revision,

    /// Stable type tag of the domain event variant
    #[serde(rename = "type")]
    pub event_type: String,

    /// Business timestamp (when the event occurred)
    pub time: DateTime<Utc>,

    /// Server-assigned insertion timestamp, `None` until stored
    pub recorded_at: Option<DateTime<Utc>>,

    /// User who caused the event
    pub user_id: UserId,

    /// Variant-specific payload fields
    #[serde(rename = "data")]
    pub payload: Map<String, Value>,
}

impl EventEnvelope {
    /// Storage key enforcing the uniqueness invariant
    pub fn key(&self) -> (Uuid, Revision) {
        (self.event_stream_id, self.revision)
    }
}

/// User directory record referenced by every envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across the directory
    pub email: String,
    pub active: bool,
}

impl User {
    /// Create an active user
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            active: true,
        }
    }
}
