// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Pure projections from works and categories to document nodes.

use portfolio_app::{Category, CategoryFilter, WorkItem};

use crate::dom::{CATEGORY_ATTR, DELETE_ID_ATTR, Document, Node, Region, WORK_ID_ATTR};

pub const ALL_CATEGORIES: &str = "all";

/// Public gallery card. `image_url` is opaque and used as the server sent it.
pub fn work_card(work: &WorkItem) -> Node {
    Node::new("figure")
        .attr(WORK_ID_ATTR, work.id.to_string())
        .child(
            Node::new("img")
                .attr("src", work.image_url.clone())
                .attr("alt", work.title.clone()),
        )
        .child(Node::new("figcaption").text(work.title.clone()))
}

pub fn modal_card(work: &WorkItem) -> Node {
    Node::new("figure")
        .attr(WORK_ID_ATTR, work.id.to_string())
        .attr("class", "modal-card")
        .child(
            Node::new("img")
                .attr("src", work.image_url.clone())
                .attr("alt", work.title.clone()),
        )
        .child(
            Node::new("button")
                .attr("type", "button")
                .attr("class", "delete-work")
                .attr(DELETE_ID_ATTR, work.id.to_string())
                .attr("aria-label", format!("Delete {}", work.title))
                .child(Node::new("i").attr("class", "icon-trash")),
        )
}

pub fn gallery_nodes<'a>(works: impl IntoIterator<Item = &'a WorkItem>) -> Vec<Node> {
    works.into_iter().map(work_card).collect()
}

pub fn modal_gallery_nodes<'a>(works: impl IntoIterator<Item = &'a WorkItem>) -> Vec<Node> {
    works.into_iter().map(modal_card).collect()
}

pub fn filter_key(filter: &CategoryFilter) -> String {
    match filter.category_id() {
        None => ALL_CATEGORIES.to_owned(),
        Some(id) => id.to_string(),
    }
}

/// One button per filter; only the button matching `active` carries the
/// `active` class.
pub fn filter_bar_nodes(filters: &[CategoryFilter], active: &CategoryFilter) -> Vec<Node> {
    filters
        .iter()
        .map(|filter| {
            let class = if filter == active {
                "filter active"
            } else {
                "filter"
            };
            Node::new("button")
                .attr("type", "button")
                .attr("class", class)
                .attr(CATEGORY_ATTR, filter_key(filter))
                .text(filter.label())
        })
        .collect()
}

pub fn category_option_nodes(categories: &[Category]) -> Vec<Node> {
    let mut options = vec![Node::new("option").attr("value", "").text("")];
    options.extend(categories.iter().map(|category| {
        Node::new("option")
            .attr("value", category.id.to_string())
            .text(category.name.clone())
    }));
    options
}

pub fn render_gallery<'a>(doc: &mut Document, works: impl IntoIterator<Item = &'a WorkItem>) {
    doc.replace(Region::Gallery, gallery_nodes(works));
}

pub fn render_modal_gallery<'a>(
    doc: &mut Document,
    works: impl IntoIterator<Item = &'a WorkItem>,
) {
    doc.replace(Region::ModalGallery, modal_gallery_nodes(works));
}

pub fn render_filter_bar(doc: &mut Document, filters: &[CategoryFilter], active: &CategoryFilter) {
    doc.replace(Region::FilterBar, filter_bar_nodes(filters, active));
}

pub fn render_category_options(doc: &mut Document, categories: &[Category]) {
    doc.replace(Region::CategorySelect, category_option_nodes(categories));
}
