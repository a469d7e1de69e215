// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::BTreeMap;

use crate::UserId;

pub const USER_ID_KEY: &str = "userId";
pub const TOKEN_KEY: &str = "token";

/// Persisted string key-value storage backing the session.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Writes every pair or none of them.
    fn set_items(&mut self, items: &[(&str, &str)]) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<UserId>,
    pub token: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some() && self.bearer_token().is_some()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}

pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    pub fn session(&self) -> Result<Session> {
        let user_id = self
            .storage
            .get_item(USER_ID_KEY)?
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(UserId::new);
        let token = self
            .storage
            .get_item(TOKEN_KEY)?
            .filter(|token| !token.is_empty());
        Ok(Session { user_id, token })
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.session()?.is_authenticated())
    }

    pub fn set_session(&mut self, user_id: UserId, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            bail!("session token must not be empty");
        }
        let user_id = user_id.get().to_string();
        self.storage
            .set_items(&[(USER_ID_KEY, user_id.as_str()), (TOKEN_KEY, token)])
    }

    /// Logs out by writing empty values for both keys.
    pub fn clear_session(&mut self) -> Result<()> {
        self.storage.set_items(&[(USER_ID_KEY, ""), (TOKEN_KEY, "")])
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_items(&mut self, items: &[(&str, &str)]) -> Result<()> {
        for (key, value) in items {
            self.items.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }
}
