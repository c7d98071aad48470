use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::contact::ApiContactResponse;

pub mod contact;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor.")
}

fn error(code: StatusCode, error: &'static str) -> Response {
    (code, Json(ApiContactResponse::error(error))).into_response()
}
