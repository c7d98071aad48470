use std::sync::Arc;

use nyxion_extern_contracts::turnstile::{TurnstileApiService, TurnstileSiteverifyResponse};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::HttpClient;

const SITEVERIFY_ENDPOINT: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[derive(Debug, Clone)]
pub struct TurnstileApiServiceImpl {
    config: TurnstileApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct TurnstileApiServiceConfig {
    siteverify_endpoint: Arc<Url>,
}

impl TurnstileApiServiceConfig {
    pub fn new(siteverify_endpoint_override: Option<Url>) -> Self {
        Self {
            siteverify_endpoint: siteverify_endpoint_override
                .unwrap_or_else(|| SITEVERIFY_ENDPOINT.parse().unwrap())
                .into(),
        }
    }
}

impl TurnstileApiServiceImpl {
    pub fn new(config: TurnstileApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl TurnstileApiService for TurnstileApiServiceImpl {
    async fn siteverify(
        &self,
        response: &str,
        secret: &str,
    ) -> anyhow::Result<TurnstileSiteverifyResponse> {
        self.client
            .post((*self.config.siteverify_endpoint).clone())
            .form(&SiteverifyRequest { response, secret })
            .send()
            .await?
            .error_for_status()?
            .json::<SiteverifyResponse>()
            .await
            .map(Into::into)
            .map_err(Into::into)
    }
}

#[derive(Serialize)]
struct SiteverifyRequest<'a> {
    response: &'a str,
    secret: &'a str,
}

#[derive(Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

impl From<SiteverifyResponse> for TurnstileSiteverifyResponse {
    fn from(value: SiteverifyResponse) -> Self {
        Self {
            success: value.success,
            error_codes: value.error_codes,
        }
    }
}
