// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use portfolio_app::{
    ApiError, Category, CategoryId, Credentials, ImageFile, LoginGrant, UserId, ValidUpload,
    WorkCatalog, WorkId, WorkItem, WorkRecord,
};
use portfolio_ui::GalleryApi;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

const CATEGORY_NAMES: [&str; 3] = ["Objects", "Apartments", "Hotels & restaurants"];

const TITLE_ADJECTIVES: [&str; 10] = [
    "Abajour", "Glass", "Oak", "Coastal", "Urban", "Quiet", "Bright", "Stone", "Garden",
    "Harbor",
];
const TITLE_NOUNS: [&str; 10] = [
    "Lamp", "Loft", "Villa", "Pavilion", "Terrace", "Bistro", "Studio", "Residence", "Table",
    "Atelier",
];

pub fn fixture_token() -> &'static str {
    "fixture-token"
}

pub fn categories() -> Vec<Category> {
    CATEGORY_NAMES
        .iter()
        .zip(1_i64..)
        .map(|(name, id)| Category {
            id: CategoryId::new(id),
            name: (*name).to_owned(),
        })
        .collect()
}

pub fn category(id: i64) -> Category {
    categories()
        .into_iter()
        .find(|category| category.id.get() == id)
        .unwrap_or_else(|| Category {
            id: CategoryId::new(id),
            name: format!("Category {id}"),
        })
}

pub fn work(id: i64, title: &str, category_id: i64) -> WorkItem {
    WorkItem {
        id: WorkId::new(id),
        title: title.to_owned(),
        image_url: format!("http://localhost:5678/images/work-{id}.png"),
        category_id: CategoryId::new(category_id),
        category: category(category_id),
    }
}

/// Record the create endpoint would return for `work`, without the nested
/// category.
pub fn record_for(work: &WorkItem) -> WorkRecord {
    WorkRecord {
        id: work.id,
        title: work.title.clone(),
        image_url: work.image_url.clone(),
        category_id: work.category_id,
        category: None,
    }
}

pub fn sample_works() -> Vec<WorkItem> {
    vec![
        work(1, "Abajour Tahina", 1),
        work(2, "Hotel First Arte - New Delhi", 3),
        work(3, "Restaurant Sushisen - London", 3),
        work(4, "Villa \"La Balisiere\" - Port-Louis", 2),
        work(5, "Structures Thermopolis", 1),
    ]
}

pub fn sample_catalog() -> WorkCatalog {
    WorkCatalog::from_parts(sample_works(), categories())
}

pub fn png_image(size_bytes: usize) -> ImageFile {
    ImageFile::new("photo.png", "image/png", vec![0_u8; size_bytes])
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for larger galleries.
#[derive(Debug, Clone)]
pub struct GalleryFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl GalleryFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn work(&mut self) -> WorkItem {
        let id = self.next_id;
        self.next_id += 1;
        let title = format!(
            "{} {}",
            TITLE_ADJECTIVES[self.rng.int_n(TITLE_ADJECTIVES.len())],
            TITLE_NOUNS[self.rng.int_n(TITLE_NOUNS.len())]
        );
        let category_id = self.rng.int_n(CATEGORY_NAMES.len()) as i64 + 1;
        work(id, &title, category_id)
    }

    pub fn works(&mut self, count: usize) -> Vec<WorkItem> {
        (0..count).map(|_| self.work()).collect()
    }
}

/// Remote call observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login { email: String },
    ListWorks,
    ListCategories,
    Delete { token: String, id: WorkId },
    Create {
        token: String,
        title: String,
        category_id: CategoryId,
    },
}

/// Scripted [`GalleryApi`]. Listing returns the configured data; login, delete
/// and create pop queued responses and fall back to a default when the queue is
/// empty.
#[derive(Debug)]
pub struct FakeApi {
    works: Mutex<Result<Vec<WorkItem>, ApiError>>,
    categories: Mutex<Result<Vec<Category>, ApiError>>,
    logins: Mutex<VecDeque<Result<LoginGrant, ApiError>>>,
    deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    creates: Mutex<VecDeque<Result<WorkRecord, ApiError>>>,
    calls: Mutex<Vec<Call>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new(sample_works(), categories())
    }
}

impl FakeApi {
    pub fn new(works: Vec<WorkItem>, categories: Vec<Category>) -> Self {
        Self {
            works: Mutex::new(Ok(works)),
            categories: Mutex::new(Ok(categories)),
            logins: Mutex::new(VecDeque::new()),
            deletes: Mutex::new(VecDeque::new()),
            creates: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_works(self, error: ApiError) -> Self {
        *lock(&self.works) = Err(error);
        self
    }

    pub fn fail_categories(self, error: ApiError) -> Self {
        *lock(&self.categories) = Err(error);
        self
    }

    pub fn push_login(&self, response: Result<LoginGrant, ApiError>) {
        lock(&self.logins).push_back(response);
    }

    pub fn push_delete(&self, response: Result<(), ApiError>) {
        lock(&self.deletes).push_back(response);
    }

    pub fn push_create(&self, response: Result<WorkRecord, ApiError>) {
        lock(&self.creates).push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        lock(&self.calls).iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GalleryApi for FakeApi {
    fn login(&self, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
        self.record(Call::Login {
            email: credentials.email.clone(),
        });
        lock(&self.logins).pop_front().unwrap_or_else(|| {
            Ok(LoginGrant {
                user_id: UserId::new(1),
                token: fixture_token().to_owned(),
            })
        })
    }

    fn list_works(&self) -> Result<Vec<WorkItem>, ApiError> {
        self.record(Call::ListWorks);
        lock(&self.works).clone()
    }

    fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.record(Call::ListCategories);
        lock(&self.categories).clone()
    }

    fn delete_work(&self, token: &str, id: WorkId) -> Result<(), ApiError> {
        self.record(Call::Delete {
            token: token.to_owned(),
            id,
        });
        lock(&self.deletes).pop_front().unwrap_or(Ok(()))
    }

    fn create_work(&self, token: &str, upload: &ValidUpload) -> Result<WorkRecord, ApiError> {
        self.record(Call::Create {
            token: token.to_owned(),
            title: upload.title.clone(),
            category_id: upload.category_id,
        });
        lock(&self.creates)
            .pop_front()
            .unwrap_or(Err(ApiError::Server(500)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Call, FakeApi, GalleryFaker, categories, sample_catalog};
    use portfolio_app::{ApiError, WorkId};
    use portfolio_ui::GalleryApi;

    #[test]
    fn faker_is_deterministic_per_seed() {
        let left = GalleryFaker::new(42).works(8);
        let right = GalleryFaker::new(42).works(8);
        assert_eq!(left, right);
        assert!(left.iter().all(|work| (1..=3).contains(&work.category_id.get())));
    }

    #[test]
    fn sample_catalog_uses_fixture_categories() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.categories(), categories().as_slice());
    }

    #[test]
    fn fake_api_pops_scripted_responses_in_order() {
        let api = FakeApi::default();
        api.push_delete(Err(ApiError::NotFound));

        assert_eq!(api.delete_work("t", WorkId::new(1)), Err(ApiError::NotFound));
        assert_eq!(api.delete_work("t", WorkId::new(1)), Ok(()));
        assert_eq!(
            api.count(|call| matches!(call, Call::Delete { .. })),
            2
        );
    }
}
