use book_recommendation_service::{ServiceConfig, create_app};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "book_recommendation_service=debug,book_flow=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env()?;
    let app = create_app(&config)?;

    let listener = TcpListener::bind(config.listen_addr()).await?;
    let addr = listener.local_addr()?;

    info!("Book recommendation service running on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /health            - Health check");
    info!("  POST /recommendations   - Recommend books for a query");
    info!("  GET  /books             - Catalog");
    info!("  *    /reading-lists     - Reading list CRUD");
    info!(r#"    Example: curl -X POST http://{}/recommendations -d '{{"query":"something scary"}}'"#, addr);

    axum::serve(listener, app).await?;

    Ok(())
}
