use std::sync::Arc;

use nyxion_api_rest::RestServerConfig;
use nyxion_config::{Config, ContactFormConfig};
use nyxion_core_contact_impl::{ContactFeatureConfig, ContactNotificationConfig};
use nyxion_email_impl::EmailServiceConfig;
use nyxion_extern_impl::{
    http::HttpClient, recaptcha::RecaptchaApiServiceConfig, resend::ResendApiServiceConfig,
    turnstile::TurnstileApiServiceConfig,
};
use nyxion_models::email_address::Mailbox;
use nyxion_shared_impl::captcha::{RecaptchaCaptchaServiceConfig, TurnstileCaptchaServiceConfig};
use types::{
    ContactFeature, Email, RecaptchaApi, RecaptchaCaptcha, ResendApi, RestServer, Template,
    TurnstileApi, TurnstileCaptcha,
};

pub mod types;

/// Builds the services of the backend from the configuration.
///
/// All outbound API clients share a single HTTP client.
#[derive(Debug, Clone)]
pub struct Provider {
    http_client: HttpClient,
    config: ConfigProvider,
}

impl Provider {
    pub fn new(config: ConfigProvider) -> Self {
        Self {
            http_client: HttpClient::default(),
            config,
        }
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(self.contact_feature(), self.config.rest_server_config.clone())
    }

    pub fn contact_feature(&self) -> ContactFeature {
        ContactFeature::new(
            self.recaptcha_captcha(),
            self.turnstile_captcha(),
            self.email(),
            Template::default(),
            self.config.contact_feature_config.clone(),
        )
    }

    pub fn email(&self) -> Email {
        Email::new(self.resend_api(), self.config.email_service_config.clone())
    }

    fn recaptcha_captcha(&self) -> RecaptchaCaptcha {
        RecaptchaCaptcha::new(
            RecaptchaApi::new(
                self.config.recaptcha_api_service_config.clone(),
                self.http_client.clone(),
            ),
            self.config.recaptcha_captcha_service_config.clone(),
        )
    }

    fn turnstile_captcha(&self) -> TurnstileCaptcha {
        TurnstileCaptcha::new(
            TurnstileApi::new(
                self.config.turnstile_api_service_config.clone(),
                self.http_client.clone(),
            ),
            self.config.turnstile_captcha_service_config.clone(),
        )
    }

    fn resend_api(&self) -> ResendApi {
        ResendApi::new(
            self.config.resend_api_service_config.clone(),
            self.http_client.clone(),
        )
    }
}

/// Service configs derived from the [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    // API
    rest_server_config: RestServerConfig,

    // Extern
    recaptcha_api_service_config: RecaptchaApiServiceConfig,
    turnstile_api_service_config: TurnstileApiServiceConfig,
    resend_api_service_config: ResendApiServiceConfig,

    // Shared
    recaptcha_captcha_service_config: Option<RecaptchaCaptchaServiceConfig>,
    turnstile_captcha_service_config: Option<TurnstileCaptchaServiceConfig>,

    // Email
    email_service_config: EmailServiceConfig,

    // Core
    contact_feature_config: ContactFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
            site_origin: config.contact.site_origin.clone().into(),
        };

        // Extern
        let recaptcha_api_service_config = RecaptchaApiServiceConfig::new(
            config
                .recaptcha
                .as_ref()
                .and_then(|recaptcha| recaptcha.siteverify_endpoint_override.clone()),
        );

        let turnstile_api_service_config = TurnstileApiServiceConfig::new(
            config
                .turnstile
                .as_ref()
                .and_then(|turnstile| turnstile.siteverify_endpoint_override.clone()),
        );

        let resend_api_service_config =
            ResendApiServiceConfig::new(config.resend.endpoint_override.clone())?;

        // Shared
        let recaptcha_captcha_service_config =
            config
                .recaptcha
                .as_ref()
                .map(|recaptcha| RecaptchaCaptchaServiceConfig {
                    secret: recaptcha.secret.as_str().into(),
                    min_score: recaptcha.min_score,
                });

        let turnstile_captcha_service_config =
            config
                .turnstile
                .as_ref()
                .map(|turnstile| TurnstileCaptchaServiceConfig {
                    secret: turnstile.secret.as_str().into(),
                });

        // Email
        let email_service_config = EmailServiceConfig {
            api_key: config.resend.api_key.as_str().into(),
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            subject: config.contact.subject.as_str().into(),
            recaptcha_form: notification_config(&config.contact.recaptcha_form).into(),
            turnstile_form: notification_config(&config.contact.turnstile_form).into(),
        };

        Ok(Self {
            rest_server_config,
            recaptcha_api_service_config,
            turnstile_api_service_config,
            resend_api_service_config,
            recaptcha_captcha_service_config,
            turnstile_captcha_service_config,
            email_service_config,
            contact_feature_config,
        })
    }
}

fn notification_config(form: &ContactFormConfig) -> ContactNotificationConfig {
    ContactNotificationConfig {
        sender: Mailbox::new(form.sender_name.as_str(), form.sender.clone()),
        recipient: form.recipient.clone(),
        accent_color: form.accent_color.clone(),
    }
}
