// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModalState {
    #[default]
    Closed,
    ShowingGallery,
    ShowingAddForm,
}

/// Listeners a modal state owns. Entering a state binds exactly this set and
/// leaving it unbinds the same set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Handler {
    Backdrop,
    GalleryClose,
    GalleryDelete,
    AddPhoto,
    FormClose,
    FormBack,
    ImageChange,
    TitleInput,
    CategoryChange,
    Submit,
}

const GALLERY_HANDLERS: [Handler; 4] = [
    Handler::Backdrop,
    Handler::GalleryClose,
    Handler::GalleryDelete,
    Handler::AddPhoto,
];

const ADD_FORM_HANDLERS: [Handler; 7] = [
    Handler::Backdrop,
    Handler::FormClose,
    Handler::FormBack,
    Handler::ImageChange,
    Handler::TitleInput,
    Handler::CategoryChange,
    Handler::Submit,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalCommand {
    Open,
    SwitchToAddForm,
    SwitchToGallery,
    Close,
    SubmissionCompleted,
}

impl ModalCommand {
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::SwitchToAddForm,
        Self::SwitchToGallery,
        Self::Close,
        Self::SubmissionCompleted,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ModalState,
    pub to: ModalState,
}

impl ModalState {
    pub const ALL: [Self; 3] = [Self::Closed, Self::ShowingGallery, Self::ShowingAddForm];

    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub const fn handlers(self) -> &'static [Handler] {
        match self {
            Self::Closed => &[],
            Self::ShowingGallery => &GALLERY_HANDLERS,
            Self::ShowingAddForm => &ADD_FORM_HANDLERS,
        }
    }

    /// Target of `command` from this state, or `None` when the command does not
    /// apply here.
    pub const fn next(self, command: ModalCommand) -> Option<Self> {
        match (self, command) {
            (Self::Closed, ModalCommand::Open) => Some(Self::ShowingGallery),
            (Self::ShowingGallery, ModalCommand::SwitchToAddForm) => Some(Self::ShowingAddForm),
            (Self::ShowingAddForm, ModalCommand::SwitchToGallery)
            | (Self::ShowingAddForm, ModalCommand::SubmissionCompleted) => {
                Some(Self::ShowingGallery)
            }
            (Self::ShowingGallery | Self::ShowingAddForm, ModalCommand::Close) => {
                Some(Self::Closed)
            }
            _ => None,
        }
    }

    pub fn transition(self, command: ModalCommand) -> Option<Transition> {
        self.next(command).map(|to| Transition { from: self, to })
    }
}
