use std::net::SocketAddr;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use askd::api::{AppState, create_router};
use askd::config::Cli;
use askd::history::{ConversationRepository, QueryService};
use askd::{db, provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "askd=debug,tower_http=debug"
    } else {
        "askd=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the conversation store; refuse to serve without it
    let pool = match db::connect(&cli.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, url = %cli.database_url, "failed to open conversation store");
            return Err(e.into());
        }
    };
    info!("Conversation store ready at {}", cli.database_url);

    // Select the completion backend; refuse to serve without a usable one
    let completion = match provider::from_config(&cli) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "invalid provider configuration");
            return Err(e.into());
        }
    };
    info!("Completion provider: {} (model {})", cli.provider, cli.model);

    let repo = ConversationRepository::new(pool);
    let state = AppState::new(
        QueryService::new(completion, repo),
        cli.expose_upstream_errors,
    );

    // Development CORS posture: mirror any origin, allow credentials
    let cors = CorsLayer::very_permissive();

    // Build router
    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;
    info!("Starting askd on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
