use std::{net::IpAddr, sync::Arc};

use axum::{extract::State, routing, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const SITEVERIFY_ROUTE: &str = "/turnstile/v0/siteverify";

pub async fn start_server(host: IpAddr, port: u16, secret: String) -> anyhow::Result<()> {
    info!("Starting turnstile testing server on {host}:{port}");
    info!("Turnstile siteverify endpoint: http://{host}:{port}{SITEVERIFY_ROUTE}");
    info!("Secret: {secret:?}");
    info!("The only valid turnstile response is \"success\"");

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
    #[serde(rename = "error-codes")]
    error_codes: Vec<&'static str>,
}

async fn siteverify(
    state: State<Arc<str>>,
    Form(SiteverifyRequest { secret, response }): Form<SiteverifyRequest>,
) -> Json<SiteverifyResponse> {
    let error_codes = if *secret != **state {
        vec!["invalid-input-secret"]
    } else if response != "success" {
        vec!["invalid-input-response"]
    } else {
        vec![]
    };

    Json(SiteverifyResponse {
        success: error_codes.is_empty(),
        error_codes,
    })
}
