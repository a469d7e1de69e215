// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dom;
pub mod login;
pub mod modal;
pub mod page;
pub mod render;

pub use dom::{Document, ErrorSlot, FormFields, Listeners, Node, Panel, Region};
pub use login::{LoginError, log_out, submit_login};
pub use modal::{ModalContext, ModalEvent, ModalWorkflow, UiEvent};
pub use page::{Page, PageEvent, fetch_catalog};

use portfolio_app::{
    ApiError, Category, Credentials, LoginGrant, ValidUpload, WorkId, WorkItem, WorkRecord,
};

/// Remote operations the page needs. Calls are blocking; `Sync` lets the
/// initial works and categories requests run side by side.
pub trait GalleryApi: Sync {
    fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError>;
    fn list_works(&self) -> Result<Vec<WorkItem>, ApiError>;
    fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    fn delete_work(&self, token: &str, id: WorkId) -> Result<(), ApiError>;
    fn create_work(&self, token: &str, upload: &ValidUpload) -> Result<WorkRecord, ApiError>;
}

/// Yes/no prompt shown before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}
