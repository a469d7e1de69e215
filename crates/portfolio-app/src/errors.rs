// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Server,
    Network,
    Timeout,
}

/// Failure of a single remote call, classified by status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request rejected as malformed (400)")]
    BadRequest,
    #[error("request unauthorized (401)")]
    Unauthorized,
    #[error("resource not found (404)")]
    NotFound,
    #[error("server error ({0})")]
    Server(u16),
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            500..=599 => Self::Server(status),
            other => Self::UnexpectedStatus(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    Login,
    Load,
    Delete,
    Create,
}

impl ApiAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Load => "load",
            Self::Delete => "delete",
            Self::Create => "create",
        }
    }
}

/// An [`ApiError`] tagged with the action that produced it. The action decides
/// both the error kind and the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} failed: {error}", action.as_str())]
pub struct ApiFailure {
    pub action: ApiAction,
    #[source]
    pub error: ApiError,
}

impl ApiFailure {
    pub const fn new(action: ApiAction, error: ApiError) -> Self {
        Self { action, error }
    }

    pub fn kind(&self) -> ErrorKind {
        match (&self.error, self.action) {
            (ApiError::BadRequest, _) => ErrorKind::Validation,
            (ApiError::Unauthorized, _) => ErrorKind::Auth,
            (ApiError::NotFound, ApiAction::Login) => ErrorKind::Auth,
            (ApiError::NotFound, _) => ErrorKind::NotFound,
            (ApiError::Server(_) | ApiError::UnexpectedStatus(_) | ApiError::Decode(_), _) => {
                ErrorKind::Server
            }
            (ApiError::Timeout, _) => ErrorKind::Timeout,
            (ApiError::Network(_), _) => ErrorKind::Network,
        }
    }

    pub fn user_message(&self) -> String {
        match (&self.error, self.action) {
            (ApiError::Timeout, _) => "The server took too long to respond. Try again.".to_owned(),
            (ApiError::Network(_), _) => {
                "Cannot reach the server. Check your connection and try again.".to_owned()
            }
            (ApiError::Unauthorized, ApiAction::Login) => "Wrong password.".to_owned(),
            (ApiError::NotFound, ApiAction::Login) => "Unknown email.".to_owned(),
            (_, ApiAction::Login) => "Unknown authentication error.".to_owned(),
            (ApiError::Unauthorized, ApiAction::Delete) => {
                "You are not allowed to delete this work. Log in again.".to_owned()
            }
            (ApiError::NotFound, ApiAction::Delete) => "This work no longer exists.".to_owned(),
            (ApiError::Server(_), ApiAction::Delete) => {
                "Server error while deleting the work.".to_owned()
            }
            (_, ApiAction::Delete) => "Unknown error while deleting the work.".to_owned(),
            (ApiError::BadRequest, ApiAction::Create) => {
                "The server rejected the work. Check the image, title and category.".to_owned()
            }
            (ApiError::Unauthorized, ApiAction::Create) => {
                "You are not allowed to add works. Log in again.".to_owned()
            }
            (ApiError::Server(_), ApiAction::Create) => {
                "Server error while adding the work.".to_owned()
            }
            (ApiError::Decode(_), ApiAction::Create) => {
                "The server returned an unexpected response for the new work.".to_owned()
            }
            (_, ApiAction::Create) => "Unknown error while adding the work.".to_owned(),
            (_, ApiAction::Load) => "Could not load the gallery.".to_owned(),
        }
    }
}
