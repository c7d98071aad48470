use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use nyxion_core_contact_contracts::{
    ContactFeatureService, ContactFormError, ContactSendMessageError,
};
use nyxion_models::contact::{ContactForm, ContactFormInput};
use serde_json::Value;
use tracing::{error, warn};
use url::Url;

use super::{error, internal_server_error};
use crate::models::contact::{ApiContactForm, ApiContactResponse};

pub fn router(service: Arc<impl ContactFeatureService>, site_origin: Arc<Url>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_recaptcha_message))
        .route("/api/contact/turnstile", routing::post(send_turnstile_message))
        .with_state(ContactState {
            service,
            site_origin,
        })
}

struct ContactState<S> {
    service: Arc<S>,
    site_origin: Arc<Url>,
}

impl<S> Clone for ContactState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            site_origin: Arc::clone(&self.site_origin),
        }
    }
}

async fn send_recaptcha_message(
    State(state): State<ContactState<impl ContactFeatureService>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    send_message(&state, ContactForm::Recaptcha, &headers, &body).await
}

async fn send_turnstile_message(
    State(state): State<ContactState<impl ContactFeatureService>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    send_message(&state, ContactForm::Turnstile, &headers, &body).await
}

async fn send_message(
    state: &ContactState<impl ContactFeatureService>,
    form: ContactForm,
    headers: &HeaderMap,
    body: &[u8],
) -> Response {
    if form.checks_origin() && !origin_allowed(headers, &state.site_origin) {
        warn!(origin = ?headers.get(header::ORIGIN), "contact request from foreign origin rejected");
        return error(StatusCode::FORBIDDEN, "Origen no permitido.");
    }

    if !is_json(headers) {
        return error(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Solicitud no válida.");
    }

    let Some(input) = parse_body(body, form) else {
        return error(StatusCode::BAD_REQUEST, "Datos enviados no válidos.");
    };

    match state.service.send_message(form, input).await {
        Ok(_) => Json(ApiContactResponse::ok()).into_response(),
        Err(ContactSendMessageError::Captcha) => match form {
            ContactForm::Recaptcha => {
                error(StatusCode::BAD_REQUEST, "Captcha inválido o sospechoso.")
            }
            ContactForm::Turnstile => Json(ApiContactResponse::regenerate()).into_response(),
        },
        Err(ContactSendMessageError::Invalid(err)) => {
            error(StatusCode::BAD_REQUEST, invalid_form_message(err))
        }
        Err(ContactSendMessageError::Send) => {
            error!(?form, "email provider rejected the contact notification");
            error(StatusCode::INTERNAL_SERVER_ERROR, "Error interno del servidor.")
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

fn origin_allowed(headers: &HeaderMap, site_origin: &Url) -> bool {
    headers
        .get(header::ORIGIN)
        .and_then(|origin| origin.to_str().ok())
        .and_then(|origin| origin.parse::<Url>().ok())
        .is_some_and(|origin| origin.origin() == site_origin.origin())
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.contains("application/json"))
}

/// Only JSON objects are accepted, arrays are not mapped onto the form fields.
///
/// A filled in honeypot is passed on without the other fields, so bots get the
/// silent success response even if the rest of the body is malformed.
fn parse_body(body: &[u8], form: ContactForm) -> Option<ContactFormInput> {
    let Value::Object(mut object) = serde_json::from_slice::<Value>(body).ok()? else {
        return None;
    };

    if let Some(honeypot) = object.get("website").and_then(honeypot_value) {
        return Some(ContactFormInput {
            honeypot: Some(honeypot),
            ..Default::default()
        });
    }

    // falsy non-string honeypots carry no information
    object.retain(|key, value| key != "website" || value.is_string());

    serde_json::from_value::<ApiContactForm>(Value::Object(object))
        .ok()
        .map(|data| data.into_input(form))
}

/// The honeypot counts as filled in for any truthy JSON value.
fn honeypot_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(value) if value.is_empty() => None,
        Value::Number(value) if value.as_f64() == Some(0.0) => None,
        Value::String(value) => Some(value.clone()),
        value => Some(value.to_string()),
    }
}

fn invalid_form_message(err: ContactFormError) -> &'static str {
    match err {
        ContactFormError::MissingFields => "Por favor, completa todos los campos obligatorios.",
        ContactFormError::InvalidEmail => "El correo electrónico no tiene un formato válido.",
        ContactFormError::NameTooLong => "El nombre es demasiado largo.",
        ContactFormError::MessageTooShort => "El mensaje es demasiado corto.",
        ContactFormError::MessageTooLong => "El mensaje supera el tamaño permitido.",
        ContactFormError::InvalidPhone => "Introduce un número de teléfono válido",
        ContactFormError::TopicMissing => "Debes seleccionar un servicio.",
        ContactFormError::TopicInvalid => "El servicio seleccionado no es válido.",
    }
}
