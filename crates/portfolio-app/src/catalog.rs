// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Category, CategoryFilter, CategoryId, WorkId, WorkItem};

/// Canonical list of works for the current page session. Insertion order is
/// display order and ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkCatalog {
    works: Vec<WorkItem>,
    categories: Vec<Category>,
}

impl WorkCatalog {
    /// Builds the catalog from freshly fetched data. Later duplicates of an id
    /// are dropped so the uniqueness invariant holds even for a bad payload.
    pub fn from_parts(works: Vec<WorkItem>, categories: Vec<Category>) -> Self {
        let mut catalog = Self {
            works: Vec::with_capacity(works.len()),
            categories,
        };
        for work in works {
            catalog.add(work);
        }
        catalog
    }

    pub fn works(&self) -> &[WorkItem] {
        &self.works
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    pub fn contains(&self, id: WorkId) -> bool {
        self.works.iter().any(|work| work.id == id)
    }

    pub fn get(&self, id: WorkId) -> Option<&WorkItem> {
        self.works.iter().find(|work| work.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Appends `work`. Returns false and leaves the catalog untouched when the
    /// id is already present.
    pub fn add(&mut self, work: WorkItem) -> bool {
        if self.contains(work.id) {
            return false;
        }
        self.works.push(work);
        true
    }

    /// Removes the work with `id`, if any.
    pub fn remove(&mut self, id: WorkId) -> Option<WorkItem> {
        let index = self.works.iter().position(|work| work.id == id)?;
        Some(self.works.remove(index))
    }

    pub fn filtered<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a WorkItem> {
        self.works.iter().filter(move |work| filter.matches(work))
    }

    /// "All" followed by every distinct category seen on a work, in first-seen
    /// order.
    pub fn categories_for(&self) -> Vec<CategoryFilter> {
        let mut filters = vec![CategoryFilter::All];
        let mut seen: Vec<CategoryId> = Vec::new();
        for work in &self.works {
            if seen.contains(&work.category.id) {
                continue;
            }
            seen.push(work.category.id);
            filters.push(CategoryFilter::Only(work.category.clone()));
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::WorkCatalog;
    use crate::{Category, CategoryFilter, CategoryId, WorkId, WorkItem};

    fn category(id: i64, name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_owned(),
        }
    }

    fn work(id: i64, category: &Category) -> WorkItem {
        WorkItem {
            id: WorkId::new(id),
            title: format!("work {id}"),
            image_url: format!("http://localhost/images/{id}.png"),
            category_id: category.id,
            category: category.clone(),
        }
    }

    fn assert_unique(catalog: &WorkCatalog) {
        let mut ids: Vec<_> = catalog.works().iter().map(|work| work.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn add_appends_in_display_order() {
        let objects = category(1, "Objects");
        let mut catalog = WorkCatalog::default();
        assert!(catalog.add(work(3, &objects)));
        assert!(catalog.add(work(1, &objects)));

        let ids: Vec<_> = catalog.works().iter().map(|work| work.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let objects = category(1, "Objects");
        let mut catalog = WorkCatalog::default();
        assert!(catalog.add(work(1, &objects)));
        assert!(!catalog.add(work(1, &objects)));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let objects = category(1, "Objects");
        let mut catalog = WorkCatalog::from_parts(vec![work(1, &objects)], vec![objects]);
        let before = catalog.clone();

        assert!(catalog.remove(WorkId::new(99)).is_none());
        assert_eq!(catalog, before);
    }

    #[test]
    fn interleaved_adds_and_removes_keep_ids_unique() {
        let objects = category(1, "Objects");
        let mut catalog = WorkCatalog::default();
        for step in 0..60_i64 {
            let id = (step * 7) % 11;
            if step % 3 == 0 {
                catalog.remove(WorkId::new(id));
            } else {
                catalog.add(work(id, &objects));
            }
            assert_unique(&catalog);
        }
    }

    #[test]
    fn from_parts_drops_duplicate_payload_rows() {
        let objects = category(1, "Objects");
        let catalog = WorkCatalog::from_parts(
            vec![work(1, &objects), work(2, &objects), work(1, &objects)],
            vec![objects],
        );
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn categories_for_lists_all_then_distinct_seen_categories() {
        let objects = category(1, "Objects");
        let flats = category(2, "Flats");
        let hotels = category(3, "Hotels & restaurants");
        let catalog = WorkCatalog::from_parts(
            vec![work(1, &flats), work(2, &objects), work(3, &flats)],
            vec![objects.clone(), flats.clone(), hotels],
        );

        assert_eq!(
            catalog.categories_for(),
            vec![
                CategoryFilter::All,
                CategoryFilter::Only(flats),
                CategoryFilter::Only(objects),
            ]
        );
    }

    #[test]
    fn filtered_keeps_order() {
        let objects = category(1, "Objects");
        let flats = category(2, "Flats");
        let catalog = WorkCatalog::from_parts(
            vec![work(1, &flats), work(2, &objects), work(3, &flats)],
            vec![objects, flats.clone()],
        );
        let filter = CategoryFilter::Only(flats);
        let ids: Vec<_> = catalog.filtered(&filter).map(|work| work.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
