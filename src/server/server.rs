use anyhow::Result;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{Book, Catalog};

use super::{log_requests, state::*, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct AddBookBody {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: String,
    #[serde(default)]
    pub read_status: bool,
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    pub field: String,
    pub q: String,
}

#[derive(Serialize)]
struct RemovedResponse {
    pub removed: usize,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

async fn list_books(State(catalog): State<GuardedCatalog>) -> Response {
    Json(catalog.lock().unwrap().list_all().to_vec()).into_response()
}

async fn add_book(
    State(catalog): State<GuardedCatalog>,
    Json(body): Json<AddBookBody>,
) -> Response {
    // Required-field validation lives here, not in the catalog
    if body.title.is_empty() || body.author.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Title and author must not be empty",
        )
            .into_response();
    }

    let book = Book {
        title: body.title,
        author: body.author,
        publication_year: body.publication_year,
        genre: body.genre,
        read_status: body.read_status,
    };

    match catalog.lock().unwrap().add(book.clone()) {
        Ok(()) => (StatusCode::CREATED, Json(book)).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn remove_book(State(catalog): State<GuardedCatalog>, Path(title): Path<String>) -> Response {
    match catalog.lock().unwrap().remove_by_title(&title) {
        Ok(removed) => {
            if removed > 0 {
                info!("Removed {} books titled {:?}", removed, title);
            }
            Json(RemovedResponse { removed }).into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response(),
    }
}

async fn search_books(
    State(catalog): State<GuardedCatalog>,
    Query(params): Query<SearchParams>,
) -> Response {
    Json(catalog.lock().unwrap().search(&params.field, &params.q)).into_response()
}

async fn get_statistics(State(catalog): State<GuardedCatalog>) -> Response {
    Json(catalog.lock().unwrap().statistics()).into_response()
}

async fn get_genre_distribution(State(catalog): State<GuardedCatalog>) -> Response {
    Json(catalog.lock().unwrap().genre_distribution()).into_response()
}

async fn get_publication_timeline(State(catalog): State<GuardedCatalog>) -> Response {
    Json(catalog.lock().unwrap().publication_timeline()).into_response()
}

async fn get_recommendation(State(catalog): State<GuardedCatalog>) -> Response {
    match catalog.lock().unwrap().recommend() {
        Some(book) => Json(book.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn make_app(config: ServerConfig, catalog: Catalog) -> Router {
    let guarded_catalog = Arc::new(Mutex::new(catalog));
    let state = ServerState::new(config, guarded_catalog);

    let catalog_routes: Router = Router::new()
        .route("/books", get(list_books).post(add_book))
        .route("/books/search", get(search_books))
        .route("/books/{title}", delete(remove_book))
        .route("/stats", get(get_statistics))
        .route("/stats/genres", get(get_genre_distribution))
        .route("/stats/timeline", get(get_publication_timeline))
        .route("/recommendation", get(get_recommendation))
        .with_state(state.clone());

    let app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/v1", catalog_routes);

    app.layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    catalog: Catalog,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
    };
    let app = make_app(config, catalog);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
