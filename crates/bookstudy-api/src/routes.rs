//! Router assembly

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{books, chunks, epub, health, sections};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let book_routes = Router::new()
        .route("/api/books", get(books::list_books).post(books::create_book))
        .route(
            "/api/books/{id}",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .route("/api/books/{id}/sections", get(sections::list_sections))
        .route("/api/books/{id}/sections/tree", get(sections::section_tree))
        .route("/api/books/{id}/toc", post(sections::import_toc))
        .route("/api/books/{id}/epub", post(epub::upload_epub))
        .route("/api/books/{id}/chunks", get(chunks::list_chunks))
        .route("/api/books/{id}/ingest", post(chunks::ingest_text));

    Router::new()
        .merge(public_routes)
        .merge(book_routes)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
