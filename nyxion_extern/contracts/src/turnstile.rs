use std::future::Future;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TurnstileApiService: Send + Sync + 'static {
    fn siteverify(
        &self,
        response: &str,
        secret: &str,
    ) -> impl Future<Output = anyhow::Result<TurnstileSiteverifyResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnstileSiteverifyResponse {
    pub success: bool,
    pub error_codes: Vec<String>,
}

#[cfg(feature = "mock")]
impl MockTurnstileApiService {
    pub fn with_siteverify(
        mut self,
        response: String,
        secret: String,
        result: TurnstileSiteverifyResponse,
    ) -> Self {
        self.expect_siteverify()
            .once()
            .with(
                mockall::predicate::eq(response),
                mockall::predicate::eq(secret),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
