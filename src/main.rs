use std::sync::{Arc, Mutex};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use huncho_booking::config::AppConfig;
use huncho_booking::handlers;
use huncho_booking::services::client::RemoteClient;
use huncho_booking::services::remote::supabase::SupabaseConnector;
use huncho_booking::services::site::{NavMenu, RevealTracker};
use huncho_booking::services::submission::BookingController;
use huncho_booking::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        project = %config.supabase_url,
        table = %config.appointments_table,
        "using hosted appointments table"
    );

    let connector = SupabaseConnector::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
        config.appointments_table.clone(),
    );
    let booking = Arc::new(BookingController::new(
        RemoteClient::new(Box::new(connector)),
        config.message_hide_after,
    ));

    // Speculative; the first submission retries if this fails.
    let warm = Arc::clone(&booking);
    tokio::spawn(async move { warm.client().warm_up().await });

    let state = Arc::new(AppState {
        config: config.clone(),
        booking,
        nav: NavMenu::default(),
        reveal: Mutex::new(RevealTracker::default()),
    });

    let app = handlers::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
