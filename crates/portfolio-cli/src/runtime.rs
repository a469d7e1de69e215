// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use portfolio_app::{
    ApiError, Category, Credentials, LoginGrant, ValidUpload, WorkId, WorkItem, WorkRecord,
};
use portfolio_ui::{Confirm, GalleryApi};
use std::io::{BufRead, Write};
use tracing::warn;

pub struct HttpRuntime {
    client: portfolio_api::Client,
}

impl HttpRuntime {
    pub fn new(client: portfolio_api::Client) -> Self {
        Self { client }
    }
}

impl GalleryApi for HttpRuntime {
    fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        self.client.login(credentials)
    }

    fn list_works(&self) -> Result<Vec<WorkItem>, ApiError> {
        self.client.list_works()
    }

    fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client.list_categories()
    }

    fn delete_work(&self, token: &str, id: WorkId) -> Result<(), ApiError> {
        self.client.delete_work(token, id)
    }

    fn create_work(&self, token: &str, upload: &ValidUpload) -> Result<WorkRecord, ApiError> {
        self.client.create_work(token, upload)
    }
}

/// Asks on `output` and reads a y/n answer from `input`. Anything other than
/// `y` or `yes` declines.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if let Err(error) = write!(self.output, "{message} [y/N] ").and_then(|()| self.output.flush())
        {
            warn!(%error, "cannot write confirmation prompt");
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(error) => {
                warn!(%error, "cannot read confirmation answer");
                false
            }
        }
    }
}
