use std::sync::Arc;

use anyhow::Context;
use nyxion_extern_contracts::resend::{ResendApiService, ResendEmail, ResendSendResponse};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::HttpClient;

const API_ENDPOINT: &str = "https://api.resend.com/";

#[derive(Debug, Clone)]
pub struct ResendApiServiceImpl {
    config: ResendApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ResendApiServiceConfig {
    emails_endpoint: Arc<Url>,
}

impl ResendApiServiceConfig {
    pub fn new(endpoint_override: Option<Url>) -> anyhow::Result<Self> {
        let base = endpoint_override.unwrap_or_else(|| API_ENDPOINT.parse().unwrap());
        let emails_endpoint = base
            .join("emails")
            .with_context(|| format!("Invalid resend endpoint {base}"))?;
        Ok(Self {
            emails_endpoint: emails_endpoint.into(),
        })
    }
}

impl ResendApiServiceImpl {
    pub fn new(config: ResendApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl ResendApiService for ResendApiServiceImpl {
    async fn send_email(
        &self,
        api_key: &str,
        email: ResendEmail,
    ) -> anyhow::Result<ResendSendResponse> {
        let response = self
            .client
            .post((*self.config.emails_endpoint).clone())
            .bearer_auth(api_key)
            .json(&SendEmailRequest::from(&email))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let SendEmailResponse { id } = response.json().await?;
            return Ok(ResendSendResponse::Sent { id });
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|err| err.message)
            .unwrap_or_else(|_| status.to_string());

        Ok(ResendSendResponse::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl<'a> From<&'a ResendEmail> for SendEmailRequest<'a> {
    fn from(value: &'a ResendEmail) -> Self {
        Self {
            from: &value.from,
            to: &value.to,
            subject: &value.subject,
            html: value.html.as_deref(),
            text: value.text.as_deref(),
            reply_to: value.reply_to.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}
