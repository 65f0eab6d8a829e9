use library_lending_api::{
    adapters::memory::{
        BookRepository as MemoryBookRepository, BorrowRepository as MemoryBorrowRepository,
        LibraryStore, UserRepository as MemoryUserRepository,
    },
    adapters::postgres::{
        PostgresBookRepository, PostgresBorrowRepository, PostgresUserRepository,
    },
    api::{handlers::AppState, router::create_router},
    application::library::ServiceDependencies,
    config::{AppConfig, StorageBackend},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_lending_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Initialize adapters
    let service_deps = match config.storage {
        StorageBackend::Postgres => {
            tracing::info!("Connecting to PostgreSQL");

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;

            sqlx::migrate!("./migrations").run(&pool).await?;

            ServiceDependencies {
                user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
                book_repository: Arc::new(PostgresBookRepository::new(pool.clone())),
                borrow_repository: Arc::new(PostgresBorrowRepository::new(pool)),
            }
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");

            let store = Arc::new(LibraryStore::new());
            ServiceDependencies {
                user_repository: Arc::new(MemoryUserRepository::new(store.clone())),
                book_repository: Arc::new(MemoryBookRepository::new(store.clone())),
                borrow_repository: Arc::new(MemoryBorrowRepository::new(store)),
            }
        }
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
