use std::{net::IpAddr, sync::Arc};

use axum::{extract::State, routing, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const SITEVERIFY_ROUTE: &str = "/recaptcha/api/siteverify";

pub async fn start_server(host: IpAddr, port: u16, secret: String) -> anyhow::Result<()> {
    info!("Starting recaptcha testing server on {host}:{port}");
    info!("Recaptcha siteverify endpoint: http://{host}:{port}{SITEVERIFY_ROUTE}");
    info!("Secret: {secret:?}");
    info!(
        "Valid recaptcha responses are \"success\" and \"success-SCORE\", where SCORE is a \
         floating point number between 0 and 1"
    );

    crate::serve(router(secret), host, port).await
}

pub fn router(secret: String) -> Router<()> {
    Router::new()
        .route(SITEVERIFY_ROUTE, routing::post(siteverify))
        .with_state(secret.into())
}

#[derive(Deserialize)]
struct SiteverifyRequest {
    secret: String,
    response: String,
}

#[derive(Serialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

async fn siteverify(
    state: State<Arc<str>>,
    Form(SiteverifyRequest { secret, response }): Form<SiteverifyRequest>,
) -> Json<SiteverifyResponse> {
    let mut parts = response.split('-');
    let success = *secret == **state && parts.next() == Some("success");
    let score = success
        .then(|| parts.next())
        .flatten()
        .and_then(|score| score.parse::<f64>().ok())
        .filter(|score| (0.0..=1.0).contains(score));

    Json(SiteverifyResponse { success, score })
}
