use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use bookstudy_api::{build_router, AppState};
use bookstudy_core::processing::ChunkConfig;
use bookstudy_core::repositories::{BookRepository, ChunkRepository, SectionRepository};
use bookstudy_core::services::{BookService, ChunkService, EpubImportService, TocImportService};
use bookstudy_infrastructure::{
    create_pool, run_migrations, PgBookRepository, PgChunkRepository, PgSectionRepository,
    ProcessEpubParser,
};
use bookstudy_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also reads .env)
    let config = AppConfig::load()?;

    // Initialize telemetry
    bookstudy_shared::telemetry::init_telemetry(&config.logging)?;
    info!("{} starting ({})...", config.app.name, config.app.env);

    // Connect to Database
    let pool = create_pool(&config.database).await?;
    info!("Database connection established.");
    run_migrations(&pool).await?;

    // Repositories
    let books: Arc<dyn BookRepository> = Arc::new(PgBookRepository::new(pool.clone()));
    let sections: Arc<dyn SectionRepository> = Arc::new(PgSectionRepository::new(pool.clone()));
    let chunks: Arc<dyn ChunkRepository> = Arc::new(PgChunkRepository::new(pool));

    // Services
    let chunk_config = ChunkConfig::new(config.chunking.max_chars, config.chunking.min_chars);
    let toc_service = Arc::new(TocImportService::new(
        books.clone(),
        sections.clone(),
        chunks.clone(),
    ));
    let epub_service = EpubImportService::new(
        books.clone(),
        toc_service.clone(),
        Arc::new(ProcessEpubParser::from_settings(&config.epub)),
    );

    let state = AppState {
        book_service: Arc::new(BookService::new(books)),
        toc_service,
        chunk_service: Arc::new(ChunkService::new(sections, chunks, chunk_config)),
        epub_service: Arc::new(epub_service),
        max_upload_bytes: config.epub.max_upload_bytes,
    };

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
