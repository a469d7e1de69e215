// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::path::Path;
use thiserror::Error;

use crate::{Category, CategoryId, Credentials};

pub const MAX_IMAGE_BYTES: usize = 4_000_000;
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}

impl ImageFile {
    pub fn new(file_name: &str, mime_type: &str, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_owned(),
            mime_type: mime_type.to_owned(),
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn check(&self) -> Result<(), UploadFieldError> {
        if self.size_bytes() > MAX_IMAGE_BYTES {
            return Err(UploadFieldError::ImageTooLarge {
                size_bytes: self.size_bytes(),
            });
        }
        let mime = self.mime_type.trim().to_ascii_lowercase();
        if !ACCEPTED_IMAGE_TYPES.contains(&mime.as_str()) {
            return Err(UploadFieldError::UnsupportedImageFormat {
                mime_type: self.mime_type.clone(),
            });
        }
        Ok(())
    }
}

/// MIME type guessed from a file extension; `None` when the extension is not
/// an image type we know about.
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadFieldError {
    #[error("choose an image to upload")]
    MissingImage,
    #[error("image is {size_bytes} bytes; the limit is 4 MB")]
    ImageTooLarge { size_bytes: usize },
    #[error("image type {mime_type:?} is not supported; use jpg or png")]
    UnsupportedImageFormat { mime_type: String },
    #[error("enter a title")]
    MissingTitle,
    #[error("choose a category")]
    MissingCategory,
    #[error("category {0} does not exist")]
    UnknownCategory(CategoryId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.0))]
pub struct FieldErrors(pub Vec<UploadFieldError>);

impl FieldErrors {
    pub fn contains(&self, error: &UploadFieldError) -> bool {
        self.0.contains(error)
    }
}

fn join_messages(errors: &[UploadFieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// An upload that passed validation and is ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUpload {
    pub image: ImageFile,
    pub title: String,
    pub category_id: CategoryId,
}

/// In-progress input of the add-work panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingUpload {
    pub image: Option<ImageFile>,
    pub title: String,
    pub category_id: Option<CategoryId>,
}

impl PendingUpload {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.title.is_empty() && self.category_id.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Keeps `file` only when it passes the size and type checks; a rejected
    /// pick also discards any previously picked file.
    pub fn pick_image(&mut self, file: ImageFile) -> Result<(), UploadFieldError> {
        match file.check() {
            Ok(()) => {
                self.image = Some(file);
                Ok(())
            }
            Err(error) => {
                self.image = None;
                Err(error)
            }
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
    }

    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.category_id = category_id;
    }

    pub fn validate(&self, categories: &[Category]) -> Result<ValidUpload, FieldErrors> {
        let mut errors = Vec::new();

        let image = match &self.image {
            None => {
                errors.push(UploadFieldError::MissingImage);
                None
            }
            Some(image) => match image.check() {
                Ok(()) => Some(image),
                Err(error) => {
                    errors.push(error);
                    None
                }
            },
        };

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(UploadFieldError::MissingTitle);
        }

        match self.category_id {
            None => errors.push(UploadFieldError::MissingCategory),
            Some(id) if !categories.iter().any(|category| category.id == id) => {
                errors.push(UploadFieldError::UnknownCategory(id));
            }
            Some(_) => {}
        }

        match (image, self.category_id) {
            (Some(image), Some(category_id)) if errors.is_empty() => Ok(ValidUpload {
                image: image.clone(),
                title: title.to_owned(),
                category_id,
            }),
            _ => Err(FieldErrors(errors)),
        }
    }

    pub fn is_submittable(&self, categories: &[Category]) -> bool {
        self.validate(categories).is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginFieldError {
    #[error("Enter a valid email address.")]
    InvalidEmail,
    #[error("Enter your password.")]
    MissingPassword,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, LoginFieldError> {
        let email = self.email.trim().to_ascii_lowercase();
        if !is_plausible_email(&email) {
            return Err(LoginFieldError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(LoginFieldError::MissingPassword);
        }
        Ok(Credentials {
            email,
            password: self.password.clone(),
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    let allowed = |ch: char| ch.is_ascii_lowercase() || ch.is_ascii_digit() || "._-".contains(ch);
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    [local, host, tld]
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(allowed))
}
