use std::{env, net::SocketAddr, sync::Arc};

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use habit_dash::provider::HttpProvider;
use habit_dash::session;
use habit_dash::{AppState, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let session = session::resolve_session()?;
    let api_url = session::resolve_api_url();
    info!(user_id = %session.user_id, api_url = %api_url, "starting habit dashboard");

    let provider = HttpProvider::new(api_url, session.auth_token.as_deref())?;
    let state = AppState::new(session, Arc::new(provider));
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
