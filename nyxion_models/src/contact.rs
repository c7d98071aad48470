use std::{str::FromStr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Sensitive;

pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Spanish phone numbers: optional `+34`/`0034` prefix, a leading 6, 7, 8 or 9
/// and nine ASCII digits in total, optionally grouped by spaces or hyphens.
pub static PHONE_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+34|0034)?\s?[6789][0-9]{2}[\s-]?[0-9]{3}[\s-]?[0-9]{3}$").unwrap()
});

/// Raw contact form fields as submitted by the browser, before any validation.
///
/// Empty strings are treated like missing fields by the validation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    /// Hidden decoy field that humans never fill in.
    pub honeypot: Option<String>,
    pub captcha_response: Option<Sensitive<String>>,
}

/// A contact request that passed every validation gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub author: ContactAuthor,
    pub topic: ContactTopic,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAuthor {
    pub name: ContactAuthorName,
    pub email: ContactEmail,
    pub phone: Option<PhoneNumber>,
}

#[nutype(
    validate(len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactAuthorName(String);

#[nutype(
    validate(regex = CONTACT_EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    validate(regex = PHONE_NUMBER_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct PhoneNumber(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// The services a visitor can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactTopic {
    #[serde(rename = "preventiva")]
    Preventive,
    #[serde(rename = "reactiva")]
    Reactive,
    #[serde(rename = "avanzada")]
    Advanced,
    #[serde(rename = "formacion")]
    Training,
    #[serde(rename = "consulta")]
    General,
    /// "Service of interest", the placeholder option of the select box.
    #[serde(rename = "interes")]
    Unspecified,
}

impl ContactTopic {
    pub const ALL: [Self; 6] = [
        Self::Preventive,
        Self::Reactive,
        Self::Advanced,
        Self::Training,
        Self::General,
        Self::Unspecified,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Preventive => "preventiva",
            Self::Reactive => "reactiva",
            Self::Advanced => "avanzada",
            Self::Training => "formacion",
            Self::General => "consulta",
            Self::Unspecified => "interes",
        }
    }

    /// Human readable label used in notification emails.
    pub fn label(self) -> &'static str {
        match self {
            Self::Preventive => "Ciberseguridad Preventiva",
            Self::Reactive => "Ciberseguridad Reactiva",
            Self::Advanced => "Ciberseguridad Avanzada",
            Self::Training => "Formación y Concienciación",
            Self::General => "Consulta General",
            Self::Unspecified => "Servicio de interés",
        }
    }
}

impl std::fmt::Display for ContactTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown contact topic {0:?}")]
pub struct UnknownContactTopic(pub String);

impl FromStr for ContactTopic {
    type Err = UnknownContactTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.code() == s)
            .ok_or_else(|| UnknownContactTopic(s.into()))
    }
}

/// The contact forms served by the backend.
///
/// Both forms run the same validation pipeline but differ in the captcha
/// provider, whether a phone number is mandatory and which topics they offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactForm {
    /// Main website form, protected by reCAPTCHA v3 and an origin check.
    Recaptcha,
    /// Alternate form protected by Cloudflare Turnstile.
    Turnstile,
}

impl ContactForm {
    pub fn requires_phone(self) -> bool {
        match self {
            Self::Recaptcha => true,
            Self::Turnstile => false,
        }
    }

    pub fn checks_origin(self) -> bool {
        match self {
            Self::Recaptcha => true,
            Self::Turnstile => false,
        }
    }

    /// Topics a submission of this form may select.
    pub fn topics(self) -> &'static [ContactTopic] {
        use ContactTopic::*;
        match self {
            Self::Recaptcha => &[Preventive, Reactive, Advanced, Training, General],
            Self::Turnstile => &[Preventive, Reactive, Advanced, Training, General, Unspecified],
        }
    }

    /// Select box option that counts as "nothing selected".
    pub fn placeholder_topic(self) -> Option<ContactTopic> {
        match self {
            Self::Recaptcha => Some(ContactTopic::Unspecified),
            Self::Turnstile => None,
        }
    }
}
