#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use link_shortener::domain::entities::{Link, NewLink};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::routes::app_router;
use link_shortener::state::AppState;
use serde_json::json;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the PostgreSQL store.
///
/// Enforces code uniqueness inside `create` under one lock, like the unique
/// index does, so concurrent creates behave the same way.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    links: Vec<Link>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().links.len()
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        self.inner
            .lock()
            .unwrap()
            .links
            .iter()
            .find(|l| l.short_code == code)
            .cloned()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.inner.lock().unwrap();

        if inner
            .links
            .iter()
            .any(|l| l.short_code == new_link.short_code)
        {
            return Err(AppError::conflict(
                "Short code already in use",
                json!({ "constraint": "links_short_code_key" }),
            ));
        }

        inner.next_id += 1;
        let link = Link::new(
            inner.next_id,
            new_link.long_url,
            new_link.short_code,
            0,
            Utc::now(),
            None,
        );
        inner.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get(code))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .links
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let mut links = self.inner.lock().unwrap().links.clone();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();

        match inner.links.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.clicks += 1;
                link.last_clicked = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.links.len();
        inner.links.retain(|l| l.id != id);
        Ok(inner.links.len() < before)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.links.len();
        inner.links.retain(|l| l.short_code != code);
        Ok(inner.links.len() < before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose every call fails, for exercising the 500 path.
pub struct FailingLinkRepository;

fn storage_down() -> AppError {
    AppError::internal(
        "Database error",
        json!({ "reason": "connection refused (10.0.0.5:5432)" }),
    )
}

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(storage_down())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(storage_down())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Link>, AppError> {
        Err(storage_down())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        Err(storage_down())
    }

    async fn increment_clicks(&self, _id: i64) -> Result<bool, AppError> {
        Err(storage_down())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<bool, AppError> {
        Err(storage_down())
    }

    async fn delete_by_code(&self, _code: &str) -> Result<bool, AppError> {
        Err(storage_down())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(storage_down())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(storage_down())
    }
}

/// Full application router (all routes and middleware) over `repo`.
pub fn make_server_with(repo: Arc<dyn LinkRepository>) -> TestServer {
    let state = AppState::new(repo);
    let app = Router::new().fallback_service(app_router(state, None));
    TestServer::new(app).unwrap()
}

/// Full application over a fresh in-memory store.
pub fn make_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    (make_server_with(repo.clone()), repo)
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (short_code, long_url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}
