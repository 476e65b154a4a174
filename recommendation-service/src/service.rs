use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    backend::{self, GenerativeBackend},
    catalog::{Book, Catalog},
    config::{RecommenderOptions, ServiceConfig},
    models::{RecommendationResponse, parse_query},
    reading_lists::{
        InMemoryReadingListStorage, NewReadingList, ReadingList, ReadingListError,
        ReadingListStorage, ReadingListUpdate,
    },
    recommender::Recommender,
};

/// Errors surfaced to HTTP callers as `{"error": message}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(&'static str),
}

impl From<ReadingListError> for ApiError {
    fn from(e: ReadingListError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub catalog: Catalog,
    pub reading_lists: Arc<dyn ReadingListStorage>,
}

impl AppState {
    /// State over the built-in catalog and seeded reading lists
    pub fn new(backend: Arc<dyn GenerativeBackend>, options: RecommenderOptions) -> Self {
        let catalog = Catalog::builtin();
        Self {
            recommender: Arc::new(Recommender::new(backend, catalog, options)),
            catalog,
            reading_lists: Arc::new(InMemoryReadingListStorage::seeded()),
        }
    }
}

pub fn create_app(config: &ServiceConfig) -> anyhow::Result<Router> {
    let backend = backend::from_config(&config.llm)?;
    Ok(build_router(AppState::new(backend, config.recommender)))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/recommendations", post(recommend))
        .route("/recommend", post(recommend))
        .route("/books", get(list_books))
        .route("/books/{id}", get(get_book))
        .route(
            "/reading-lists",
            get(list_reading_lists).post(create_reading_list),
        )
        .route(
            "/reading-lists/{id}",
            get(get_reading_list)
                .put(update_reading_list)
                .delete(delete_reading_list),
        )
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(CorsLayer::permissive()),
        )
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Book Recommendation Service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /recommendations": "Recommend books for a free-text query",
            "GET /books": "List the catalog",
            "GET /books/{id}": "Get one book",
            "GET /reading-lists": "List reading lists (optional ?userId=)",
            "POST /reading-lists": "Create a reading list",
            "GET|PUT|DELETE /reading-lists/{id}": "Read, update or delete a reading list",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// The only non-200 outcome is a missing query.
async fn recommend(State(state): State<AppState>, body: Bytes) -> Response {
    let query = match parse_query(&body) {
        Ok(query) => query,
        Err(e) => {
            warn!("Rejected recommendation request: {}", e);
            return ApiError::BadRequest(e.to_string()).into_response();
        }
    };

    info!("Received recommendation request: {}", query);
    let response: RecommendationResponse = state.recommender.recommend(&query).await;
    (StatusCode::OK, Json(response)).into_response()
}

async fn list_books(State(state): State<AppState>) -> Json<&'static [Book]> {
    Json(state.catalog.books())
}

async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<&'static Book>> {
    state
        .catalog
        .find(&id)
        .map(Json)
        .ok_or(ApiError::NotFound("Book not found"))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

async fn list_reading_lists(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<ReadingList>> {
    Json(state.reading_lists.list(params.user_id.as_deref()).await)
}

async fn get_reading_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ReadingList>> {
    state
        .reading_lists
        .get(&id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound("Reading list not found"))
}

async fn create_reading_list(
    State(state): State<AppState>,
    Json(request): Json<NewReadingList>,
) -> ApiResult<(StatusCode, Json<ReadingList>)> {
    let list = ReadingList::create(request, &state.catalog, Utc::now())?;
    info!(list_id = %list.id, user_id = %list.user_id, "Created reading list");

    state.reading_lists.save(list.clone()).await;
    Ok((StatusCode::CREATED, Json(list)))
}

async fn update_reading_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ReadingListUpdate>,
) -> ApiResult<Json<ReadingList>> {
    let list = state
        .reading_lists
        .update(&id, update, &state.catalog, Utc::now())
        .await
        .ok_or(ApiError::NotFound("Reading list not found"))??;

    info!(list_id = %list.id, "Updated reading list");
    Ok(Json(list))
}

async fn delete_reading_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.reading_lists.delete(&id).await {
        info!(list_id = %id, "Deleted reading list");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Reading list not found"))
    }
}
