// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;
use crate::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: WorkId,
    pub title: String,
    pub image_url: String,
    pub category_id: CategoryId,
    pub category: Category,
}

/// Work as returned by the create endpoint, which may omit the nested
/// category object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    pub id: WorkId,
    pub title: String,
    pub image_url: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub category: Option<Category>,
}

impl WorkRecord {
    pub fn into_work(self, categories: &[Category]) -> Result<WorkItem, ApiError> {
        if self.title.trim().is_empty() || self.image_url.trim().is_empty() {
            return Err(ApiError::Decode(format!(
                "work {} is missing its title or image url",
                self.id
            )));
        }

        let category = match self.category {
            Some(category) if category.id == self.category_id => category,
            Some(category) => {
                return Err(ApiError::Decode(format!(
                    "work {} has category id {} but nested category {}",
                    self.id, self.category_id, category.id
                )));
            }
            None => categories
                .iter()
                .find(|category| category.id == self.category_id)
                .cloned()
                .ok_or_else(|| {
                    ApiError::Decode(format!(
                        "work {} references unknown category {}",
                        self.id, self.category_id
                    ))
                })?,
        };

        Ok(WorkItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            category_id: self.category_id,
            category,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGrant {
    pub user_id: UserId,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Only(category) => &category.name,
        }
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(category.id),
        }
    }

    pub fn matches(&self, work: &WorkItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => work.category_id == category.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryFilter, WorkItem, WorkRecord};
    use crate::{ApiError, CategoryId, WorkId};

    fn objects() -> Category {
        Category {
            id: CategoryId::new(1),
            name: "Objects".to_owned(),
        }
    }

    #[test]
    fn work_item_decodes_api_shape() {
        let raw = r#"{"id":1,"title":"Abajour Tahina","imageUrl":"http://localhost:5678/images/abajour-tahina1651286843956.png","categoryId":1,"userId":1,"category":{"id":1,"name":"Objects"}}"#;
        let work: WorkItem = serde_json::from_str(raw).expect("valid work payload");
        assert_eq!(work.id, WorkId::new(1));
        assert_eq!(work.category, objects());
    }

    #[test]
    fn record_without_category_resolves_from_known_categories() {
        let record = WorkRecord {
            id: WorkId::new(12),
            title: "Lamp".to_owned(),
            image_url: "http://localhost/images/lamp.png".to_owned(),
            category_id: CategoryId::new(1),
            category: None,
        };
        let work = record.into_work(&[objects()]).expect("category is known");
        assert_eq!(work.category.name, "Objects");
    }

    #[test]
    fn record_with_unknown_category_is_malformed() {
        let record = WorkRecord {
            id: WorkId::new(12),
            title: "Lamp".to_owned(),
            image_url: "http://localhost/images/lamp.png".to_owned(),
            category_id: CategoryId::new(9),
            category: None,
        };
        let error = record.into_work(&[objects()]).expect_err("unknown category");
        assert!(matches!(error, ApiError::Decode(_)));
    }

    #[test]
    fn filter_all_matches_everything() {
        let work = WorkItem {
            id: WorkId::new(1),
            title: "Lamp".to_owned(),
            image_url: "lamp.png".to_owned(),
            category_id: CategoryId::new(1),
            category: objects(),
        };
        assert!(CategoryFilter::All.matches(&work));
        assert!(CategoryFilter::Only(objects()).matches(&work));
        assert!(
            !CategoryFilter::Only(Category {
                id: CategoryId::new(2),
                name: "Flats".to_owned(),
            })
            .matches(&work)
        );
    }
}
