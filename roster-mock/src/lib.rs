//! Roster Mock - in-process stand-in for the record services
//!
//! Two json-server style services: basic info (`/basicInfo`,
//! `/departments`) and details (`/details`, `/locations`). Lists honour the
//! `_start` / `_end` slice parameters; creates assign an id and answer 201.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::models::{BasicInfo, Details, NamedRef};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// How POST requests are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostBehavior {
    /// Store the record and echo it (201)
    #[default]
    Accept,
    /// 500, nothing stored
    Fail,
    /// 201 with a body that is not a record, nothing stored
    Malformed,
}

/// Records carrying an optional service-assigned id
pub trait Record: Clone + Send + Sync + serde::Serialize + DeserializeOwned + 'static {
    fn id_mut(&mut self) -> &mut Option<String>;
}

impl Record for BasicInfo {
    fn id_mut(&mut self) -> &mut Option<String> {
        &mut self.id
    }
}

impl Record for Details {
    fn id_mut(&mut self) -> &mut Option<String> {
        &mut self.id
    }
}

/// State of one mock service
#[derive(Debug, Default)]
pub struct MockState {
    basic_info: RwLock<Vec<BasicInfo>>,
    details: RwLock<Vec<Details>>,
    departments: RwLock<Vec<NamedRef>>,
    locations: RwLock<Vec<NamedRef>>,
    post_behavior: RwLock<PostBehavior>,
    posts: AtomicUsize,
}

impl MockState {
    /// Empty record collections, seeded reference data
    pub fn new() -> Arc<Self> {
        let mut state = Self::default();
        *state.departments.get_mut() = seed(&["Lending", "Funding", "Operations", "Engineering"]);
        *state.locations.get_mut() = seed(&["Jakarta", "Depok", "Surabaya"]);
        Arc::new(state)
    }

    pub async fn set_post_behavior(&self, behavior: PostBehavior) {
        *self.post_behavior.write().await = behavior;
    }

    pub async fn set_departments(&self, departments: Vec<NamedRef>) {
        *self.departments.write().await = departments;
    }

    pub async fn set_locations(&self, locations: Vec<NamedRef>) {
        *self.locations.write().await = locations;
    }

    pub async fn basic_info(&self) -> Vec<BasicInfo> {
        self.basic_info.read().await.clone()
    }

    pub async fn details(&self) -> Vec<Details> {
        self.details.read().await.clone()
    }

    pub async fn insert_basic_info(&self, record: BasicInfo) {
        self.basic_info.write().await.push(record);
    }

    pub async fn insert_details(&self, record: Details) {
        self.details.write().await.push(record);
    }

    /// POST requests received, whatever their outcome
    pub fn post_count(&self) -> usize {
        self.posts.load(Ordering::Relaxed)
    }
}

fn seed(names: &[&str]) -> Vec<NamedRef> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| NamedRef::new((i + 1).to_string(), *name))
        .collect()
}

/// json-server slice parameters
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(rename = "_start")]
    pub start: Option<usize>,
    #[serde(rename = "_end")]
    pub end: Option<usize>,
}

impl RangeQuery {
    fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = self.start.unwrap_or(0).min(items.len());
        let end = self.end.unwrap_or(items.len()).clamp(start, items.len());
        items[start..end].to_vec()
    }
}

async fn list<T: Clone>(collection: &RwLock<Vec<T>>, range: &RangeQuery) -> Json<Vec<T>> {
    Json(range.slice(&collection.read().await))
}

async fn create<T: Record>(state: &MockState, collection: &RwLock<Vec<T>>, mut record: T) -> Response {
    state.posts.fetch_add(1, Ordering::Relaxed);

    match *state.post_behavior.read().await {
        PostBehavior::Fail => {
            tracing::debug!("Rejecting POST");
            (StatusCode::INTERNAL_SERVER_ERROR, "mock failure").into_response()
        }
        PostBehavior::Malformed => (StatusCode::CREATED, "not json").into_response(),
        PostBehavior::Accept => {
            let id = record.id_mut();
            if id.as_deref().is_none_or(str::is_empty) {
                *id = Some(uuid::Uuid::new_v4().to_string());
            }
            collection.write().await.push(record.clone());
            (StatusCode::CREATED, Json(record)).into_response()
        }
    }
}

pub async fn list_basic_info(
    State(state): State<Arc<MockState>>,
    Query(range): Query<RangeQuery>,
) -> Json<Vec<BasicInfo>> {
    list(&state.basic_info, &range).await
}

pub async fn create_basic_info(
    State(state): State<Arc<MockState>>,
    Json(record): Json<BasicInfo>,
) -> Response {
    create(&state, &state.basic_info, record).await
}

pub async fn list_details(
    State(state): State<Arc<MockState>>,
    Query(range): Query<RangeQuery>,
) -> Json<Vec<Details>> {
    list(&state.details, &range).await
}

pub async fn create_details(
    State(state): State<Arc<MockState>>,
    Json(record): Json<Details>,
) -> Response {
    create(&state, &state.details, record).await
}

pub async fn list_departments(
    State(state): State<Arc<MockState>>,
    Query(range): Query<RangeQuery>,
) -> Json<Vec<NamedRef>> {
    list(&state.departments, &range).await
}

pub async fn list_locations(
    State(state): State<Arc<MockState>>,
    Query(range): Query<RangeQuery>,
) -> Json<Vec<NamedRef>> {
    list(&state.locations, &range).await
}

/// Basic info service: `/basicInfo`, `/departments`
pub fn basic_info_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/basicInfo", get(list_basic_info).post(create_basic_info))
        .route("/departments", get(list_departments))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Details service: `/details`, `/locations`
pub fn details_router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/details", get(list_details).post(create_details))
        .route("/locations", get(list_locations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::EmployeeRole;

    fn basic(employee_id: &str) -> BasicInfo {
        BasicInfo {
            id: None,
            full_name: "Jane Roe".into(),
            email: "jane@example.com".into(),
            department: "Engineering".into(),
            role: EmployeeRole::Engineer,
            employee_id: employee_id.into(),
        }
    }

    #[test]
    fn test_range_slice() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        let range = |start, end| RangeQuery { start, end };
        assert_eq!(range(Some(5), Some(10)).slice(&items), vec![6, 7]);
        assert_eq!(range(None, None).slice(&items).len(), 7);
        assert!(range(Some(9), Some(12)).slice(&items).is_empty());
        assert!(range(Some(4), Some(2)).slice(&items).is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let state = MockState::new();
        let response = create_basic_info(State(state.clone()), Json(basic("ENG-001"))).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let stored = state.basic_info().await;
        assert_eq!(stored.len(), 1);
        assert!(stored[0].id.as_deref().is_some_and(|id| !id.is_empty()));
        assert_eq!(state.post_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_posts_store_nothing() {
        let state = MockState::new();
        state.set_post_behavior(PostBehavior::Fail).await;
        let response = create_basic_info(State(state.clone()), Json(basic("ENG-001"))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.basic_info().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_departments_seeded() {
        let state = MockState::new();
        let Json(all) = list_departments(State(state), Query(RangeQuery::default())).await;
        let names: Vec<_> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Lending", "Funding", "Operations", "Engineering"]);
    }
}
