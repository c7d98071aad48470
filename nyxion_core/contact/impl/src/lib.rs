use std::sync::Arc;

use nyxion_core_contact_contracts::{
    ContactFeatureService, ContactSendMessageError, ContactSendMessageOutcome,
};
use nyxion_email_contracts::{ContentType, Email, EmailService};
use nyxion_models::{
    contact::{ContactForm, ContactFormInput, ContactSubmission},
    email_address::{EmailAddress, Mailbox},
};
use nyxion_shared_contracts::captcha::{CaptchaCheckError, CaptchaService};
use nyxion_templates_contracts::{ContactNotificationTemplate, TemplateService};
use nyxion_utils::html::escape_html;
use tracing::{info, warn};

use crate::validate::validate_submission;

mod validate;

/// Placeholder for the phone line of forms that collect a phone number.
const NO_PHONE: &str = "—";

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<RecaptchaCaptcha, TurnstileCaptcha, Email, Template> {
    recaptcha_captcha: RecaptchaCaptcha,
    turnstile_captcha: TurnstileCaptcha,
    email: Email,
    template: Template,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub subject: Arc<str>,
    pub recaptcha_form: Arc<ContactNotificationConfig>,
    pub turnstile_form: Arc<ContactNotificationConfig>,
}

/// Where and how the notifications of a single form are delivered.
#[derive(Debug, Clone)]
pub struct ContactNotificationConfig {
    pub sender: Mailbox,
    pub recipient: EmailAddress,
    pub accent_color: String,
}

impl ContactFeatureConfig {
    fn notification(&self, form: ContactForm) -> &ContactNotificationConfig {
        match form {
            ContactForm::Recaptcha => &self.recaptcha_form,
            ContactForm::Turnstile => &self.turnstile_form,
        }
    }
}

impl<RecaptchaCaptcha, TurnstileCaptcha, Email, Template>
    ContactFeatureServiceImpl<RecaptchaCaptcha, TurnstileCaptcha, Email, Template>
{
    pub fn new(
        recaptcha_captcha: RecaptchaCaptcha,
        turnstile_captcha: TurnstileCaptcha,
        email: Email,
        template: Template,
        config: ContactFeatureConfig,
    ) -> Self {
        Self {
            recaptcha_captcha,
            turnstile_captcha,
            email,
            template,
            config,
        }
    }
}

impl<RecaptchaCaptcha, TurnstileCaptcha, EmailS, TemplateS> ContactFeatureService
    for ContactFeatureServiceImpl<RecaptchaCaptcha, TurnstileCaptcha, EmailS, TemplateS>
where
    RecaptchaCaptcha: CaptchaService,
    TurnstileCaptcha: CaptchaService,
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_message(
        &self,
        form: ContactForm,
        input: ContactFormInput,
    ) -> Result<ContactSendMessageOutcome, ContactSendMessageError> {
        if input.honeypot.as_deref().is_some_and(|x| !x.is_empty()) {
            warn!(?form, "contact request discarded by honeypot");
            return Ok(ContactSendMessageOutcome::Discarded);
        }

        let captcha_response = input
            .captcha_response
            .as_deref()
            .map(String::as_str)
            .filter(|x| !x.is_empty());
        let captcha = match form {
            ContactForm::Recaptcha => self.recaptcha_captcha.check(captcha_response).await,
            ContactForm::Turnstile => self.turnstile_captcha.check(captcha_response).await,
        };
        captcha.map_err(|err| match err {
            CaptchaCheckError::Failed => ContactSendMessageError::Captcha,
            CaptchaCheckError::Other(err) => err.into(),
        })?;

        let submission = validate_submission(form, input)?;

        let email = self.compose(form, submission)?;
        if !self.email.send(email).await? {
            return Err(ContactSendMessageError::Send);
        }

        info!(?form, "contact request relayed");
        Ok(ContactSendMessageOutcome::Sent)
    }
}

impl<RecaptchaCaptcha, TurnstileCaptcha, EmailS, TemplateS>
    ContactFeatureServiceImpl<RecaptchaCaptcha, TurnstileCaptcha, EmailS, TemplateS>
where
    TemplateS: TemplateService,
{
    fn compose(
        &self,
        form: ContactForm,
        submission: ContactSubmission,
    ) -> anyhow::Result<Email> {
        let notification = self.config.notification(form);
        let ContactSubmission {
            author,
            topic,
            content,
        } = submission;

        let body = self.template.render(&ContactNotificationTemplate {
            accent_color: notification.accent_color.clone(),
            name: escape_html(&author.name),
            email: escape_html(&author.email),
            phone: match author.phone.as_deref() {
                Some(phone) => Some(escape_html(phone)),
                None => form.requires_phone().then(|| NO_PHONE.into()),
            },
            service: topic.label().into(),
            message: escape_html(&content),
        })?;

        Ok(Email {
            sender: notification.sender.clone(),
            recipient: notification.recipient.clone(),
            subject: self.config.subject.to_string(),
            body,
            content_type: ContentType::Html,
            reply_to: author.email.parse::<EmailAddress>().ok().map(Into::into),
        })
    }
}
