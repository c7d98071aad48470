use std::sync::Arc;

use nyxion_email_contracts::{ContentType, Email, EmailService};
use nyxion_extern_contracts::resend::{ResendApiService, ResendEmail, ResendSendResponse};
use tracing::{info, warn};

/// Email delivery through the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct EmailServiceImpl<ResendApi> {
    resend_api: ResendApi,
    config: EmailServiceConfig,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    pub api_key: Arc<str>,
}

impl<ResendApi> EmailServiceImpl<ResendApi> {
    pub fn new(resend_api: ResendApi, config: EmailServiceConfig) -> Self {
        Self { resend_api, config }
    }
}

impl<ResendApi> EmailService for EmailServiceImpl<ResendApi>
where
    ResendApi: ResendApiService,
{
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body), None),
            ContentType::Text => (None, Some(email.body)),
        };

        let request = ResendEmail {
            from: email.sender.to_string(),
            to: vec![email.recipient.to_string()],
            subject: email.subject,
            html,
            text,
            reply_to: email.reply_to.map(|x| x.to_string()),
        };

        match self.resend_api.send_email(&self.config.api_key, request).await? {
            ResendSendResponse::Sent { id } => {
                info!(%id, "email accepted by resend");
                Ok(true)
            }
            ResendSendResponse::Rejected { status, message } => {
                warn!(status, reason = %message, "email rejected by resend");
                Ok(false)
            }
        }
    }
}
