// Copyright (c) 2025 - Cowboy AI, Inc.
//! User Directory
//!
//! The engine's only dependency on user management: resolve an integer user id
//! to a user record, or report that it does not exist. User lifecycle lives
//! elsewhere; [`InMemoryUserDirectory`] exists for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::envelope::{User, UserId};
use crate::errors::DirectoryError;

/// Resolves user ids referenced by events
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a user; `Ok(None)` when the id is unknown
    async fn find_user(&self, id: UserId) -> Result<Option<User>, DirectoryError>;
}

/// In-memory user directory enforcing unique ids and emails
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user
    ///
    /// # Errors
    ///
    /// - `DuplicateId` if the id is taken
    /// - `DuplicateEmail` if another user has the same email
    pub async fn insert(&self, user: User) -> Result<(), DirectoryError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(DirectoryError::DuplicateId(user.id));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(DirectoryError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}
