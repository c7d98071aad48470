use nyxion_models::{
    contact::{ContactForm, ContactFormInput},
    Sensitive,
};
use serde::{Deserialize, Serialize};

/// Body of a contact form submission as sent by the website.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Code of the selected service, e.g. `preventiva`
    pub service: Option<String>,
    pub message: Option<String>,
    /// reCAPTCHA v3 token
    pub token: Option<Sensitive<String>>,
    /// Cloudflare Turnstile token
    #[serde(rename = "cf-turnstile-response")]
    pub turnstile_response: Option<Sensitive<String>>,
    /// Honeypot
    pub website: Option<String>,
}

impl ApiContactForm {
    pub fn into_input(self, form: ContactForm) -> ContactFormInput {
        let captcha_response = match form {
            ContactForm::Recaptcha => self.token,
            ContactForm::Turnstile => self.turnstile_response,
        };

        ContactFormInput {
            name: self.name,
            email: self.email,
            phone: self.phone,
            service: self.service,
            message: self.message,
            honeypot: self.website,
            captcha_response,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Ask the client to solve a fresh captcha and submit again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regenerate: Option<bool>,
}

impl ApiContactResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            regenerate: None,
        }
    }

    pub fn error(error: &'static str) -> Self {
        Self {
            success: false,
            error: Some(error),
            regenerate: None,
        }
    }

    pub fn regenerate() -> Self {
        Self {
            success: false,
            error: None,
            regenerate: Some(true),
        }
    }
}
