use std::future::Future;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ResendApiService: Send + Sync + 'static {
    /// Submit an email to the Resend `POST /emails` endpoint.
    ///
    /// Transport failures are returned as errors, requests the API refused
    /// are reported as [`ResendSendResponse::Rejected`].
    fn send_email(
        &self,
        api_key: &str,
        email: ResendEmail,
    ) -> impl Future<Output = anyhow::Result<ResendSendResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendEmail {
    /// Sender mailbox, e.g. `Nyxion <info@nyxionsec.com>`.
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResendSendResponse {
    Sent { id: String },
    Rejected { status: u16, message: String },
}

#[cfg(feature = "mock")]
impl MockResendApiService {
    pub fn with_send_email(
        mut self,
        api_key: String,
        email: ResendEmail,
        result: ResendSendResponse,
    ) -> Self {
        self.expect_send_email()
            .once()
            .with(
                mockall::predicate::eq(api_key),
                mockall::predicate::eq(email),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
