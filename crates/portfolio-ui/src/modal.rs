// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Admin modal controller: which panel is visible, which listeners are bound,
//! and the delete/create flows against the catalog and the remote API.

use portfolio_app::{
    ApiAction, ApiError, ApiFailure, CategoryFilter, CategoryId, Handler, ImageFile, ModalCommand,
    ModalState, PendingUpload, WorkCatalog, WorkId,
};
use tracing::{debug, info, trace, warn};

use crate::dom::{DELETE_ID_ATTR, Document, FormFields, Panel, Region};
use crate::render::{render_category_options, render_modal_gallery, work_card};
use crate::{Confirm, GalleryApi};

/// User interaction delivered to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    OpenModal,
    /// Click inside a rendered container; `path` addresses the clicked element
    /// from the container root.
    Click { region: Region, path: Vec<usize> },
    ModalClick { on_backdrop: bool },
    CloseGallery,
    CloseForm,
    AddPhoto,
    Back,
    ImagePicked(ImageFile),
    TitleInput(String),
    CategoryChosen(Option<CategoryId>),
    Submit,
}

impl UiEvent {
    fn handler(&self) -> Option<Handler> {
        match self {
            Self::OpenModal => None,
            Self::Click {
                region: Region::ModalGallery,
                ..
            } => Some(Handler::GalleryDelete),
            Self::Click { .. } => None,
            Self::ModalClick { .. } => Some(Handler::Backdrop),
            Self::CloseGallery => Some(Handler::GalleryClose),
            Self::CloseForm => Some(Handler::FormClose),
            Self::AddPhoto => Some(Handler::AddPhoto),
            Self::Back => Some(Handler::FormBack),
            Self::ImagePicked(_) => Some(Handler::ImageChange),
            Self::TitleInput(_) => Some(Handler::TitleInput),
            Self::CategoryChosen(_) => Some(Handler::CategoryChange),
            Self::Submit => Some(Handler::Submit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    StateChanged(ModalState),
    DeleteCancelled(WorkId),
    WorkDeleted(WorkId),
    WorkCreated(WorkId),
    ErrorShown { panel: Panel, message: String },
}

/// Everything the controller touches besides its own state.
pub struct ModalContext<'a, A: ?Sized> {
    pub api: &'a A,
    pub token: Option<&'a str>,
    pub catalog: &'a mut WorkCatalog,
    pub doc: &'a mut Document,
    pub filter: &'a CategoryFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalWorkflow {
    state: ModalState,
    pending: PendingUpload,
}

impl ModalWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn pending(&self) -> &PendingUpload {
        &self.pending
    }

    /// Applies `command` if the current state allows it. The exit hook of the
    /// old state always runs before the enter hook of the new one.
    pub fn run<A: GalleryApi + ?Sized>(
        &mut self,
        command: ModalCommand,
        ctx: &mut ModalContext<'_, A>,
    ) -> Vec<ModalEvent> {
        let Some(transition) = self.state.transition(command) else {
            trace!(state = ?self.state, ?command, "command does not apply");
            return Vec::new();
        };

        debug!(from = ?transition.from, to = ?transition.to, ?command, "modal transition");
        self.exit(transition.from, ctx);
        self.state = transition.to;
        self.enter(transition.to, ctx);
        vec![ModalEvent::StateChanged(transition.to)]
    }

    pub fn handle<A: GalleryApi + ?Sized>(
        &mut self,
        event: UiEvent,
        ctx: &mut ModalContext<'_, A>,
        confirm: &mut dyn Confirm,
    ) -> Vec<ModalEvent> {
        if event == UiEvent::OpenModal {
            return self.run(ModalCommand::Open, ctx);
        }

        let Some(handler) = event.handler() else {
            return Vec::new();
        };
        if !ctx.doc.listeners.is_bound(handler) {
            trace!(?handler, state = ?self.state, "event ignored; handler not bound");
            return Vec::new();
        }

        match event {
            UiEvent::ModalClick { on_backdrop: false } => Vec::new(),
            UiEvent::ModalClick { on_backdrop: true } | UiEvent::CloseGallery | UiEvent::CloseForm => {
                self.run(ModalCommand::Close, ctx)
            }
            UiEvent::AddPhoto => self.run(ModalCommand::SwitchToAddForm, ctx),
            UiEvent::Back => self.run(ModalCommand::SwitchToGallery, ctx),
            UiEvent::Click { path, .. } => self.delete_clicked(&path, ctx, confirm),
            UiEvent::ImagePicked(file) => self.image_picked(file, ctx),
            UiEvent::TitleInput(title) => {
                self.pending.set_title(&title);
                ctx.doc.form.title = title;
                self.refresh_submit(ctx);
                Vec::new()
            }
            UiEvent::CategoryChosen(category) => {
                self.pending.set_category(category);
                ctx.doc.form.category = category;
                self.refresh_submit(ctx);
                Vec::new()
            }
            UiEvent::Submit => self.submit(ctx),
            UiEvent::OpenModal => Vec::new(),
        }
    }

    fn exit<A: GalleryApi + ?Sized>(&mut self, state: ModalState, ctx: &mut ModalContext<'_, A>) {
        ctx.doc.listeners.unbind(state.handlers());
        match state {
            ModalState::Closed => {}
            ModalState::ShowingGallery => ctx.doc.gallery_error.clear(),
            ModalState::ShowingAddForm => {
                self.pending.clear();
                ctx.doc.form = FormFields::default();
                ctx.doc.form_error.clear();
                ctx.doc.submit_enabled = false;
            }
        }
    }

    fn enter<A: GalleryApi + ?Sized>(&mut self, state: ModalState, ctx: &mut ModalContext<'_, A>) {
        match state {
            ModalState::Closed => {
                ctx.doc.modal_visible = false;
                ctx.doc.visible_panel = None;
            }
            ModalState::ShowingGallery => {
                render_modal_gallery(ctx.doc, ctx.catalog.works());
                ctx.doc.modal_visible = true;
                ctx.doc.visible_panel = Some(Panel::Gallery);
            }
            ModalState::ShowingAddForm => {
                self.pending.clear();
                ctx.doc.form = FormFields::default();
                render_category_options(ctx.doc, ctx.catalog.categories());
                ctx.doc.modal_visible = true;
                ctx.doc.visible_panel = Some(Panel::AddForm);
                self.refresh_submit(ctx);
            }
        }
        ctx.doc.listeners.bind(state.handlers());
    }

    fn refresh_submit<A: GalleryApi + ?Sized>(&self, ctx: &mut ModalContext<'_, A>) {
        ctx.doc.submit_enabled = self.pending.is_submittable(ctx.catalog.categories());
    }

    fn delete_clicked<A: GalleryApi + ?Sized>(
        &mut self,
        path: &[usize],
        ctx: &mut ModalContext<'_, A>,
        confirm: &mut dyn Confirm,
    ) -> Vec<ModalEvent> {
        let Some(id) = ctx
            .doc
            .closest_attr(Region::ModalGallery, path, DELETE_ID_ATTR)
            .and_then(|raw| raw.parse::<i64>().ok())
            .map(WorkId::new)
        else {
            return Vec::new();
        };
        if !ctx.doc.delete_enabled {
            debug!(%id, "delete already in flight");
            return Vec::new();
        }

        let title = ctx
            .catalog
            .get(id)
            .map(|work| work.title.clone())
            .unwrap_or_else(|| format!("work {id}"));
        if !confirm.confirm(&format!("Delete \"{title}\"?")) {
            debug!(%id, "delete cancelled");
            return vec![ModalEvent::DeleteCancelled(id)];
        }

        ctx.doc.delete_enabled = false;
        let result = match ctx.token {
            Some(token) => ctx.api.delete_work(token, id),
            None => Err(ApiError::Unauthorized),
        };
        ctx.doc.delete_enabled = true;

        match result {
            Ok(()) => {
                ctx.catalog.remove(id);
                ctx.doc.remove_tagged(Region::Gallery, id);
                ctx.doc.remove_tagged(Region::ModalGallery, id);
                ctx.doc.gallery_error.clear();
                info!(%id, "work deleted");
                vec![ModalEvent::WorkDeleted(id)]
            }
            Err(error) => {
                let failure = ApiFailure::new(ApiAction::Delete, error);
                warn!(%id, error = %failure, "delete failed");
                show_error(ctx.doc, Panel::Gallery, &failure.user_message())
            }
        }
    }

    fn image_picked<A: GalleryApi + ?Sized>(
        &mut self,
        file: ImageFile,
        ctx: &mut ModalContext<'_, A>,
    ) -> Vec<ModalEvent> {
        let file_name = file.file_name.clone();
        let events = match self.pending.pick_image(file) {
            Ok(()) => {
                ctx.doc.form.preview = Some(file_name);
                ctx.doc.form_error.clear();
                Vec::new()
            }
            Err(error) => {
                ctx.doc.form.preview = None;
                show_error(ctx.doc, Panel::AddForm, &error.to_string())
            }
        };
        self.refresh_submit(ctx);
        events
    }

    fn submit<A: GalleryApi + ?Sized>(&mut self, ctx: &mut ModalContext<'_, A>) -> Vec<ModalEvent> {
        if !ctx.doc.submit_enabled {
            debug!("submit ignored while the control is disabled");
            return Vec::new();
        }

        let upload = match self.pending.validate(ctx.catalog.categories()) {
            Ok(upload) => upload,
            Err(errors) => {
                ctx.doc.submit_enabled = false;
                return show_error(ctx.doc, Panel::AddForm, &errors.to_string());
            }
        };

        ctx.doc.submit_enabled = false;
        let created = match ctx.token {
            Some(token) => ctx.api.create_work(token, &upload),
            None => Err(ApiError::Unauthorized),
        }
        .and_then(|record| record.into_work(ctx.catalog.categories()));

        let work = match created {
            Ok(work) if ctx.catalog.contains(work.id) => Err(ApiError::Decode(format!(
                "server returned existing work id {}",
                work.id
            ))),
            other => other,
        };

        match work {
            Ok(work) => {
                let id = work.id;
                if ctx.filter.matches(&work) {
                    ctx.doc.append(Region::Gallery, work_card(&work));
                }
                ctx.catalog.add(work);
                info!(%id, "work created");
                let mut events = vec![ModalEvent::WorkCreated(id)];
                events.extend(self.run(ModalCommand::SubmissionCompleted, ctx));
                events
            }
            Err(error) => {
                let failure = ApiFailure::new(ApiAction::Create, error);
                warn!(error = %failure, "create failed");
                self.refresh_submit(ctx);
                show_error(ctx.doc, Panel::AddForm, &failure.user_message())
            }
        }
    }
}

fn show_error(doc: &mut Document, panel: Panel, message: &str) -> Vec<ModalEvent> {
    doc.set_error(panel, message);
    vec![ModalEvent::ErrorShown {
        panel,
        message: message.to_owned(),
    }]
}
