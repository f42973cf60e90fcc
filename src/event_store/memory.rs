// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory event storage
//!
//! A single table guarded by one lock. A batch is validated in full before any
//! row is written, so readers never see part of a batch.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EnvelopeQuery, EventStorage};
use crate::config::StoreConfig;
use crate::envelope::EventEnvelope;
use crate::errors::{StoreError, StoreResult};
use crate::events::Revision;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<EventEnvelope>,
    keys: HashSet<(Uuid, Revision)>,
    last_recorded_at: Option<DateTime<Utc>>,
}

impl Table {
    /// Strictly increasing insertion timestamp
    fn next_recorded_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let recorded_at = match self.last_recorded_at {
            Some(last) if now <= last => last + chrono::Duration::microseconds(1),
            _ => now,
        };
        self.last_recorded_at = Some(recorded_at);
        recorded_at
    }
}

/// Event storage held in process memory
#[derive(Debug, Default)]
pub struct InMemoryEventStorage {
    config: StoreConfig,
    table: RwLock<Table>,
}

impl InMemoryEventStorage {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            table: RwLock::new(Table::default()),
        }
    }

    /// Total number of stored envelopes across all streams
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }

    fn validate(&self, envelope: &EventEnvelope) -> StoreResult<()> {
        if envelope.event_type.is_empty() {
            return Err(StoreError::InvalidEnvelope("event type is empty".to_string()));
        }
        if envelope.event_type.chars().count() > self.config.max_event_type_len {
            return Err(StoreError::InvalidEnvelope(format!(
                "event type '{}' exceeds {} characters",
                envelope.event_type, self.config.max_event_type_len
            )));
        }
        if envelope.revision < 0 {
            return Err(StoreError::InvalidEnvelope(format!(
                "negative revision {}",
                envelope.revision
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl EventStorage for InMemoryEventStorage {
    async fn insert_batch(&self, envelopes: Vec<EventEnvelope>) -> StoreResult<Vec<EventEnvelope>> {
        let mut table = self.table.write().await;

        let mut batch_keys = HashSet::with_capacity(envelopes.len());
        for envelope in &envelopes {
            self.validate(envelope)?;

            let key = envelope.key();
            if table.keys.contains(&key) || !batch_keys.insert(key) {
                return Err(StoreError::ConcurrentModification {
                    stream_id: key.0,
                    revision: key.1,
                });
            }
        }

        let mut stored = Vec::with_capacity(envelopes.len());
        for mut envelope in envelopes {
            envelope.recorded_at = Some(table.next_recorded_at());
            table.keys.insert(envelope.key());
            table.rows.push(envelope.clone());
            stored.push(envelope);
        }

        Ok(stored)
    }

    async fn query(&self, query: &EnvelopeQuery) -> StoreResult<Vec<EventEnvelope>> {
        let table = self.table.read().await;

        let mut matched: Vec<EventEnvelope> = table
            .rows
            .iter()
            .filter(|envelope| query.matches(envelope))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            a.revision
                .cmp(&b.revision)
                .then_with(|| a.recorded_at.cmp(&b.recorded_at))
        });

        Ok(matched)
    }

    async fn count(&self, stream_id: Uuid) -> StoreResult<usize> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|envelope| envelope.event_stream_id == stream_id)
            .count())
    }
}
