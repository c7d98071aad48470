use std::{
    collections::HashMap,
    net::IpAddr,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Resend api endpoint: http://{host}:{port}/");
    info!("Api key: {api_key:?}");
    info!("Sent emails can be inspected at http://{host}:{port}{EMAILS_ROUTE}/ID");

    crate::serve(router(api_key), host, port).await
}

pub fn router(api_key: String) -> Router<()> {
    let state = Arc::new(ResendState {
        api_key,
        emails: Default::default(),
    });

    Router::new()
        .route(EMAILS_ROUTE, routing::post(send_email))
        .route("/emails/:id", routing::get(get_email))
        .with_state(state)
}

struct ResendState {
    api_key: String,
    emails: Mutex<HashMap<String, Value>>,
}

#[derive(Serialize)]
struct ErrorResponse {
    #[serde(rename = "statusCode")]
    status_code: u16,
    name: &'static str,
    message: &'static str,
}

fn error(status: StatusCode, name: &'static str, message: &'static str) -> Response {
    let body = ErrorResponse {
        status_code: status.as_u16(),
        name,
        message,
    };
    (status, Json(body)).into_response()
}

async fn send_email(
    state: State<Arc<ResendState>>,
    headers: HeaderMap,
    Json(email): Json<Value>,
) -> Response {
    let expected = format!("Bearer {}", state.api_key);
    if headers.get(AUTHORIZATION).and_then(|x| x.to_str().ok()) != Some(expected.as_str()) {
        return error(
            StatusCode::UNAUTHORIZED,
            "validation_error",
            "API key is invalid",
        );
    }

    let has_recipient = email["to"].as_array().is_some_and(|to| !to.is_empty());
    if !email["from"].is_string() || !email["subject"].is_string() || !has_recipient {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Missing required field",
        );
    }

    let id = Uuid::now_v7().to_string();
    info!(%id, to = %email["to"], subject = %email["subject"], "received email");
    state.emails.lock().unwrap().insert(id.clone(), email);

    Json(serde_json::json!({ "id": id })).into_response()
}

async fn get_email(state: State<Arc<ResendState>>, Path(id): Path<String>) -> Response {
    match state.emails.lock().unwrap().get(&id) {
        Some(email) => Json(email.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "not_found", "Email not found"),
    }
}
