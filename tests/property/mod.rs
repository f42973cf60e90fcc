// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of the aggregate fold engine and the event store round trip.

mod event_application;
