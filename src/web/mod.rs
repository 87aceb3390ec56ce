pub mod dashboard;
pub mod views;

use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::client::ActivitiesClient;
use crate::controller::Controller;
use crate::models::Config;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) controller: Arc<Controller>,
}

pub async fn serve(config: Config, addr: &str) -> Result<()> {
    let client = ActivitiesClient::new(&config.server.base_url)?;
    let state = AppState {
        controller: Arc::new(Controller::new(client)),
    };
    info!("Using activities API at {}", config.server.base_url);

    let app = Router::new()
        .route("/", get(dashboard::dashboard_handler))
        .route("/signup", post(dashboard::signup_handler))
        .route("/unregister", post(dashboard::unregister_handler))
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Dashboard listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
