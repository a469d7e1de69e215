// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use portfolio_app::{CategoryId, Handler, WorkId};
use std::collections::BTreeSet;
use tracing::warn;

pub const WORK_ID_ATTR: &str = "data-id";
pub const DELETE_ID_ATTR: &str = "data-delete-id";
pub const CATEGORY_ATTR: &str = "data-category";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_owned(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|value| value.split_whitespace().any(|name| name == class))
    }

    pub fn work_id(&self) -> Option<WorkId> {
        parse_id(self.get_attr(WORK_ID_ATTR)?).map(WorkId::new)
    }

    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        if is_void(self.tag) {
            out.push('>');
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_html(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }

    fn find_path(&self, name: &str, value: &str, path: &mut Vec<usize>) -> bool {
        if self.get_attr(name) == Some(value) {
            return true;
        }
        for (index, child) in self.children.iter().enumerate() {
            path.push(index);
            if child.find_path(name, value, path) {
                return true;
            }
            path.pop();
        }
        false
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "img" | "input" | "br" | "hr" | "meta" | "link")
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Containers whose children are produced by the view renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Gallery,
    FilterBar,
    ModalGallery,
    CategorySelect,
}

/// Panels that own an inline error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Login,
    Gallery,
    AddForm,
}

/// One inline error message; setting a new message replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot(Option<String>);

impl ErrorSlot {
    pub fn set(&mut self, message: &str) {
        self.0 = if message.is_empty() {
            None
        } else {
            Some(message.to_owned())
        };
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Handlers currently attached to modal elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listeners {
    bound: BTreeSet<Handler>,
}

impl Listeners {
    pub fn bind(&mut self, handlers: &[Handler]) {
        for handler in handlers {
            if !self.bound.insert(*handler) {
                warn!(?handler, "handler was already bound");
            }
        }
    }

    pub fn unbind(&mut self, handlers: &[Handler]) {
        for handler in handlers {
            self.bound.remove(handler);
        }
    }

    pub fn is_bound(&self, handler: Handler) -> bool {
        self.bound.contains(&handler)
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn bound(&self) -> Vec<Handler> {
        self.bound.iter().copied().collect()
    }
}

/// Add-form controls whose values the controller resets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub preview: Option<String>,
    pub title: String,
    pub category: Option<CategoryId>,
}

/// In-memory stand-in for the page markup the renderer and controller mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    gallery: Vec<Node>,
    filter_bar: Vec<Node>,
    modal_gallery: Vec<Node>,
    category_select: Vec<Node>,
    pub edit_mode: bool,
    pub modal_visible: bool,
    pub visible_panel: Option<Panel>,
    pub gallery_error: ErrorSlot,
    pub form_error: ErrorSlot,
    pub login_error: ErrorSlot,
    pub form: FormFields,
    pub submit_enabled: bool,
    pub delete_enabled: bool,
    pub listeners: Listeners,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            gallery: Vec::new(),
            filter_bar: Vec::new(),
            modal_gallery: Vec::new(),
            category_select: Vec::new(),
            edit_mode: false,
            modal_visible: false,
            visible_panel: None,
            gallery_error: ErrorSlot::default(),
            form_error: ErrorSlot::default(),
            login_error: ErrorSlot::default(),
            form: FormFields::default(),
            submit_enabled: false,
            delete_enabled: true,
            listeners: Listeners::default(),
        }
    }
}

impl Document {
    pub fn region(&self, region: Region) -> &[Node] {
        match region {
            Region::Gallery => &self.gallery,
            Region::FilterBar => &self.filter_bar,
            Region::ModalGallery => &self.modal_gallery,
            Region::CategorySelect => &self.category_select,
        }
    }

    fn region_mut(&mut self, region: Region) -> &mut Vec<Node> {
        match region {
            Region::Gallery => &mut self.gallery,
            Region::FilterBar => &mut self.filter_bar,
            Region::ModalGallery => &mut self.modal_gallery,
            Region::CategorySelect => &mut self.category_select,
        }
    }

    pub fn replace(&mut self, region: Region, nodes: Vec<Node>) {
        *self.region_mut(region) = nodes;
    }

    pub fn append(&mut self, region: Region, node: Node) {
        self.region_mut(region).push(node);
    }

    /// Removes the top-level element tagged with `id`. Returns whether one was
    /// found.
    pub fn remove_tagged(&mut self, region: Region, id: WorkId) -> bool {
        let nodes = self.region_mut(region);
        let Some(index) = nodes.iter().position(|node| node.work_id() == Some(id)) else {
            return false;
        };
        nodes.remove(index);
        true
    }

    pub fn tagged_ids(&self, region: Region) -> Vec<WorkId> {
        self.region(region)
            .iter()
            .filter_map(Node::work_id)
            .collect()
    }

    pub fn error(&self, panel: Panel) -> Option<&str> {
        match panel {
            Panel::Login => self.login_error.message(),
            Panel::Gallery => self.gallery_error.message(),
            Panel::AddForm => self.form_error.message(),
        }
    }

    pub fn set_error(&mut self, panel: Panel, message: &str) {
        match panel {
            Panel::Login => self.login_error.set(message),
            Panel::Gallery => self.gallery_error.set(message),
            Panel::AddForm => self.form_error.set(message),
        }
    }

    /// Path from the region root to the first element whose `name` attribute
    /// equals `value`.
    pub fn find_path(&self, region: Region, name: &str, value: &str) -> Option<Vec<usize>> {
        for (index, node) in self.region(region).iter().enumerate() {
            let mut path = vec![index];
            if node.find_path(name, value, &mut path) {
                return Some(path);
            }
        }
        None
    }

    /// Value of `name` on the element at `path` or on its nearest ancestor,
    /// the way a delegated listener resolves its event target.
    pub fn closest_attr(&self, region: Region, path: &[usize], name: &str) -> Option<&str> {
        let (first, rest) = path.split_first()?;
        let mut chain = vec![self.region(region).get(*first)?];
        for index in rest {
            let parent: &Node = chain.last().copied()?;
            chain.push(parent.children.get(*index)?);
        }
        chain.iter().rev().find_map(|node| node.get_attr(name))
    }

    pub fn to_html(&self, heading: &str) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>");
        out.push_str(&escape_html(heading));
        out.push_str("</title></head>\n<body>\n");
        if self.edit_mode {
            out.push_str("<div class=\"edit-banner\">Edit mode</div>\n");
        }
        out.push_str("<section id=\"portfolio\">\n<h2>");
        out.push_str(&escape_html(heading));
        out.push_str("</h2>\n");
        push_container(&mut out, "filters", &self.filter_bar);
        push_container(&mut out, "gallery", &self.gallery);
        out.push_str("</section>\n");
        if self.modal_visible {
            out.push_str("<aside class=\"modal\">\n");
            push_container(&mut out, "modal-gallery", &self.modal_gallery);
            out.push_str("</aside>\n");
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}

fn push_container(out: &mut String, class: &str, nodes: &[Node]) {
    out.push_str("<div class=\"");
    out.push_str(class);
    out.push_str("\">");
    for node in nodes {
        node.write_html(out);
    }
    out.push_str("</div>\n");
}
