use crate::error::ServiceError;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cora_identity::{Identity, IdentityClient};
use cora_timetable::TimetableStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, read-only dependencies handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityClient>,
    pub store: Arc<dyn TimetableStore>,
}

impl AppState {
    pub fn new(identity: IdentityClient, store: impl TimetableStore + 'static) -> Self {
        Self {
            identity: Arc::new(identity),
            store: Arc::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/oauth/login", get(oauth_login))
        .route("/oauth/exchange", get(oauth_exchange))
        .route("/db/freeclass", get(free_class))
        .route("/db/freeslot", get(free_slot))
        .route("/db/daytimetable", get(day_timetable))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

type QueryPairs = Vec<(String, String)>;

/// First value of `key`. Later repeats are ignored.
fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

async fn oauth_login(State(state): State<AppState>) -> Response {
    let url = state.identity.begin_login();
    (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
}

async fn oauth_exchange(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<Identity>, ServiceError> {
    let code = first(&params, "code").unwrap_or_default();
    let identity = state
        .identity
        .complete_exchange(code, first(&params, "state"))
        .await?;
    Ok(Json(identity))
}

async fn free_class(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<Vec<String>>, ServiceError> {
    let slot: i64 = first(&params, "slot")
        .unwrap_or_default()
        .parse()
        .map_err(|_| ServiceError::InvalidSlot)?;
    let day = first(&params, "day").unwrap_or_default();
    let rooms = state.store.free_class(slot, day).await?;
    Ok(Json(rooms))
}

async fn free_slot(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<Vec<i64>>, ServiceError> {
    let class = first(&params, "class").unwrap_or_default();
    let day = first(&params, "day").unwrap_or_default();
    let slots = state.store.free_slot(class, day).await?;
    Ok(Json(slots))
}

async fn day_timetable(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<Vec<String>>, ServiceError> {
    let class = first(&params, "class").unwrap_or_default();
    let day = first(&params, "day").unwrap_or_default();
    let subjects = state.store.timetable_by_day(class, day).await?;
    Ok(Json(subjects))
}
