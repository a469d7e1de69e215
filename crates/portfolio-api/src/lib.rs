// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use portfolio_app::{
    ApiError, Category, Credentials, LoginGrant, ValidUpload, WorkId, WorkItem, WorkRecord,
};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url {base_url:?} uses scheme {:?}; use http or https",
                parsed.scheme()
            );
        }
        if timeout.is_zero() {
            bail!("api.timeout must be positive");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        let request = self.http.post(self.endpoint("users/login")).json(credentials);
        let response = self.send("POST", "users/login", request)?;
        decode(response)
    }

    pub fn list_works(&self) -> Result<Vec<WorkItem>, ApiError> {
        let response = self.send("GET", "works", self.http.get(self.endpoint("works")))?;
        decode(response)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.send(
            "GET",
            "categories",
            self.http.get(self.endpoint("categories")),
        )?;
        decode(response)
    }

    pub fn delete_work(&self, token: &str, id: WorkId) -> Result<(), ApiError> {
        let path = format!("works/{id}");
        let request = self.http.delete(self.endpoint(&path)).bearer_auth(token);
        self.send("DELETE", &path, request)?;
        Ok(())
    }

    pub fn create_work(&self, token: &str, upload: &ValidUpload) -> Result<WorkRecord, ApiError> {
        let image = Part::bytes(upload.image.data.clone())
            .file_name(upload.image.file_name.clone())
            .mime_str(&upload.image.mime_type)
            .map_err(|error| ApiError::Network(format!("build upload: {error}")))?;
        let form = Form::new()
            .part("image", image)
            .text("title", upload.title.clone())
            .text("category", upload.category_id.to_string());

        let request = self
            .http
            .post(self.endpoint("works"))
            .bearer_auth(token)
            .multipart(form);
        let response = self.send("POST", "works", request)?;
        decode(response)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn send(&self, method: &str, path: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        debug!(method, path, "sending request");
        let started = Instant::now();
        let response = request.send().map_err(|error| {
            warn!(method, path, %error, "request failed");
            transport_error(error)
        })?;

        let status = response.status();
        info!(
            method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16()));
        }
        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().map_err(transport_error)?;
    serde_json::from_str(&body).map_err(|error| ApiError::Decode(error.to_string()))
}

fn transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(error.to_string())
}
