// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use portfolio_app::{
    ApiAction, ApiError, ApiFailure, CategoryFilter, Session, SessionStorage, SessionStore,
    WorkCatalog,
};
use std::thread;
use tracing::{debug, info};

use crate::dom::{CATEGORY_ATTR, Document, Region};
use crate::modal::{ModalContext, ModalEvent, ModalWorkflow, UiEvent};
use crate::render::{ALL_CATEGORIES, filter_key, render_filter_bar, render_gallery};
use crate::{Confirm, GalleryApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    FilterSelected(CategoryFilter),
    Modal(ModalEvent),
}

/// Requests works and categories concurrently and joins them into one catalog.
pub fn fetch_catalog<A: GalleryApi + ?Sized>(api: &A) -> Result<WorkCatalog, ApiFailure> {
    let (works, categories) = thread::scope(|scope| {
        let works = scope.spawn(|| api.list_works());
        let categories = api.list_categories();
        let works = works
            .join()
            .unwrap_or_else(|_| Err(ApiError::Network("works request panicked".to_owned())));
        (works, categories)
    });

    let load = |error| ApiFailure::new(ApiAction::Load, error);
    let works = works.map_err(load)?;
    let categories = categories.map_err(load)?;
    debug!(
        works = works.len(),
        categories = categories.len(),
        "catalog fetched"
    );
    Ok(WorkCatalog::from_parts(works, categories))
}

/// The public portfolio page plus, for an authenticated session, the admin
/// modal.
pub struct Page<'a, A: ?Sized> {
    api: &'a A,
    session: Session,
    catalog: WorkCatalog,
    doc: Document,
    filter: CategoryFilter,
    modal: Option<ModalWorkflow>,
}

impl<'a, A: GalleryApi + ?Sized> Page<'a, A> {
    pub fn load<S: SessionStorage>(api: &'a A, store: &SessionStore<S>) -> Result<Self> {
        let session = store.session()?;
        let catalog = fetch_catalog(api)?;
        Ok(Self::with_catalog(api, session, catalog))
    }

    pub fn with_catalog(api: &'a A, session: Session, catalog: WorkCatalog) -> Self {
        let authenticated = session.is_authenticated();
        let mut page = Self {
            api,
            session,
            catalog,
            doc: Document::default(),
            filter: CategoryFilter::All,
            modal: authenticated.then(ModalWorkflow::new),
        };
        page.doc.edit_mode = authenticated;
        page.render();
        info!(
            works = page.catalog.len(),
            edit_mode = authenticated,
            "page ready"
        );
        page
    }

    pub fn catalog(&self) -> &WorkCatalog {
        &self.catalog
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn active_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn modal(&self) -> Option<&ModalWorkflow> {
        self.modal.as_ref()
    }

    pub fn select_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.render();
    }

    pub fn dispatch(&mut self, event: UiEvent, confirm: &mut dyn Confirm) -> Vec<PageEvent> {
        if let UiEvent::Click {
            region: Region::FilterBar,
            path,
        } = &event
        {
            return self.filter_clicked(path);
        }

        let Some(modal) = self.modal.as_mut() else {
            debug!(?event, "admin modal is not armed");
            return Vec::new();
        };
        let mut ctx = ModalContext {
            api: self.api,
            token: self.session.bearer_token(),
            catalog: &mut self.catalog,
            doc: &mut self.doc,
            filter: &self.filter,
        };
        let modal_events = modal.handle(event, &mut ctx, confirm);
        let catalog_changed = modal_events
            .iter()
            .any(|event| matches!(event, ModalEvent::WorkDeleted(_) | ModalEvent::WorkCreated(_)));
        let mut events: Vec<PageEvent> =
            modal_events.into_iter().map(PageEvent::Modal).collect();
        if catalog_changed {
            events.extend(self.refresh_filters());
        }
        events
    }

    pub fn to_html(&self, heading: &str) -> String {
        self.doc.to_html(heading)
    }

    fn filter_clicked(&mut self, path: &[usize]) -> Vec<PageEvent> {
        let Some(key) = self
            .doc
            .closest_attr(Region::FilterBar, path, CATEGORY_ATTR)
            .map(str::to_owned)
        else {
            return Vec::new();
        };
        let filter = if key == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            let Some(filter) = self
                .catalog
                .categories_for()
                .into_iter()
                .find(|filter| filter_key(filter) == key)
            else {
                return Vec::new();
            };
            filter
        };
        self.select_filter(filter.clone());
        vec![PageEvent::FilterSelected(filter)]
    }

    /// Rebuilds the filter bar after the catalog changed. An active category
    /// with no works left falls back to `All`.
    fn refresh_filters(&mut self) -> Option<PageEvent> {
        let filters = self.catalog.categories_for();
        let active = self.filter.category_id();
        if filters.iter().any(|filter| filter.category_id() == active) {
            render_filter_bar(&mut self.doc, &filters, &self.filter);
            return None;
        }
        debug!(filter = self.filter.label(), "active category emptied");
        self.select_filter(CategoryFilter::All);
        Some(PageEvent::FilterSelected(CategoryFilter::All))
    }

    fn render(&mut self) {
        render_gallery(&mut self.doc, self.catalog.filtered(&self.filter));
        render_filter_bar(&mut self.doc, &self.catalog.categories_for(), &self.filter);
    }
}
