use std::future::Future;

use nyxion_models::contact::{ContactForm, ContactFormInput};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and relay it to the site owner.
    fn send_message(
        &self,
        form: ContactForm,
        input: ContactFormInput,
    ) -> impl Future<Output = Result<ContactSendMessageOutcome, ContactSendMessageError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSendMessageOutcome {
    /// The notification email has been accepted by the email provider.
    Sent,
    /// The submission was made by a bot and dropped without notice.
    Discarded,
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("The captcha check failed.")]
    Captcha,
    #[error(transparent)]
    Invalid(#[from] ContactFormError),
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Reasons a submission fails validation, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFormError {
    #[error("A required field is missing.")]
    MissingFields,
    #[error("The email address is invalid.")]
    InvalidEmail,
    #[error("The name is too long.")]
    NameTooLong,
    #[error("The message is too short.")]
    MessageTooShort,
    #[error("The message is too long.")]
    MessageTooLong,
    #[error("The phone number is invalid.")]
    InvalidPhone,
    #[error("No service has been selected.")]
    TopicMissing,
    #[error("The selected service is not offered by this form.")]
    TopicInvalid,
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        form: ContactForm,
        input: ContactFormInput,
        result: Result<ContactSendMessageOutcome, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(
                mockall::predicate::eq(form),
                mockall::predicate::eq(input),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
