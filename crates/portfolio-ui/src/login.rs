// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use portfolio_app::{
    ApiAction, ApiFailure, ErrorKind, LoginFieldError, LoginForm, Session, SessionStorage,
    SessionStore,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::GalleryApi;
use crate::dom::ErrorSlot;

#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Invalid(#[from] LoginFieldError),
    #[error(transparent)]
    Rejected(#[from] ApiFailure),
    #[error("cannot persist session: {0}")]
    Storage(String),
}

impl LoginError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(_) => ErrorKind::Validation,
            Self::Rejected(failure) => failure.kind(),
            Self::Storage(_) => ErrorKind::Server,
        }
    }

    /// Text for the inline error slot of the login panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(error) => error.to_string(),
            Self::Rejected(failure) => failure.user_message(),
            Self::Storage(_) => "Could not save your session.".to_owned(),
        }
    }
}

/// Validates the form, exchanges the credentials for a token and persists the
/// grant. Every failure is also written to `slot`.
pub fn submit_login<A, S>(
    api: &A,
    store: &mut SessionStore<S>,
    form: &LoginForm,
    slot: &mut ErrorSlot,
) -> Result<Session, LoginError>
where
    A: GalleryApi + ?Sized,
    S: SessionStorage,
{
    let result = authenticate(api, store, form);
    match &result {
        Ok(session) => {
            slot.clear();
            info!(user_id = ?session.user_id, "logged in");
        }
        Err(error) => {
            warn!(%error, "login failed");
            slot.set(&error.user_message());
        }
    }
    result
}

fn authenticate<A, S>(
    api: &A,
    store: &mut SessionStore<S>,
    form: &LoginForm,
) -> Result<Session, LoginError>
where
    A: GalleryApi + ?Sized,
    S: SessionStorage,
{
    let credentials = form.validate()?;
    let grant = api
        .login(&credentials)
        .map_err(|error| ApiFailure::new(ApiAction::Login, error))?;
    store
        .set_session(grant.user_id, &grant.token)
        .map_err(|error| LoginError::Storage(format!("{error:#}")))?;
    store
        .session()
        .map_err(|error| LoginError::Storage(format!("{error:#}")))
}

pub fn log_out<S: SessionStorage>(store: &mut SessionStore<S>) -> anyhow::Result<()> {
    store.clear_session()?;
    info!("logged out");
    Ok(())
}
