use std::sync::Arc;

use nyxion_extern_contracts::{recaptcha::RecaptchaApiService, turnstile::TurnstileApiService};
use nyxion_shared_contracts::captcha::{CaptchaCheckError, CaptchaService};
use tracing::warn;

/// Score based captcha check backed by reCAPTCHA v3.
///
/// Without a config the check is disabled and always passes.
#[derive(Debug, Clone)]
pub struct RecaptchaCaptchaServiceImpl<RecaptchaApi> {
    recaptcha_api: RecaptchaApi,
    config: Option<RecaptchaCaptchaServiceConfig>,
}

#[derive(Debug, Clone)]
pub struct RecaptchaCaptchaServiceConfig {
    pub secret: Arc<str>,
    pub min_score: f64,
}

impl<RecaptchaApi> RecaptchaCaptchaServiceImpl<RecaptchaApi> {
    pub fn new(recaptcha_api: RecaptchaApi, config: Option<RecaptchaCaptchaServiceConfig>) -> Self {
        Self {
            recaptcha_api,
            config,
        }
    }
}

impl<RecaptchaApi> CaptchaService for RecaptchaCaptchaServiceImpl<RecaptchaApi>
where
    RecaptchaApi: RecaptchaApiService,
{
    async fn check(&self, response: Option<&str>) -> Result<(), CaptchaCheckError> {
        let Some(config) = &self.config else {
            return Ok(());
        };

        let response = response.ok_or(CaptchaCheckError::Failed)?;
        let response = self
            .recaptcha_api
            .siteverify(response, &config.secret)
            .await?;
        // a verification without a score is not considered suspicious
        let ok = response.success
            && response
                .score
                .is_none_or(|score| score >= config.min_score);
        if !ok {
            warn!(success = response.success, score = ?response.score, "recaptcha check failed");
        }
        ok.then_some(()).ok_or(CaptchaCheckError::Failed)
    }
}

/// Pass/fail captcha check backed by Cloudflare Turnstile.
///
/// Without a config the check is disabled and always passes.
#[derive(Debug, Clone)]
pub struct TurnstileCaptchaServiceImpl<TurnstileApi> {
    turnstile_api: TurnstileApi,
    config: Option<TurnstileCaptchaServiceConfig>,
}

#[derive(Debug, Clone)]
pub struct TurnstileCaptchaServiceConfig {
    pub secret: Arc<str>,
}

impl<TurnstileApi> TurnstileCaptchaServiceImpl<TurnstileApi> {
    pub fn new(turnstile_api: TurnstileApi, config: Option<TurnstileCaptchaServiceConfig>) -> Self {
        Self {
            turnstile_api,
            config,
        }
    }
}

impl<TurnstileApi> CaptchaService for TurnstileCaptchaServiceImpl<TurnstileApi>
where
    TurnstileApi: TurnstileApiService,
{
    async fn check(&self, response: Option<&str>) -> Result<(), CaptchaCheckError> {
        let Some(config) = &self.config else {
            return Ok(());
        };

        let Some(response) = response else {
            warn!("no turnstile response received from client");
            return Err(CaptchaCheckError::Failed);
        };

        let response = self
            .turnstile_api
            .siteverify(response, &config.secret)
            .await?;
        if !response.success {
            warn!(error_codes = ?response.error_codes, "turnstile token invalid or expired");
            return Err(CaptchaCheckError::Failed);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nyxion_extern_contracts::{
        recaptcha::{MockRecaptchaApiService, RecaptchaSiteverifyResponse},
        turnstile::{MockTurnstileApiService, TurnstileSiteverifyResponse},
    };
    use nyxion_utils::assert_matches;

    use super::*;

    fn recaptcha_config(min_score: f64) -> Option<RecaptchaCaptchaServiceConfig> {
        Some(RecaptchaCaptchaServiceConfig {
            secret: "secret".into(),
            min_score,
        })
    }

    fn turnstile_config() -> Option<TurnstileCaptchaServiceConfig> {
        Some(TurnstileCaptchaServiceConfig {
            secret: "secret".into(),
        })
    }

    #[tokio::test]
    async fn recaptcha_ok() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "secret".into(),
            RecaptchaSiteverifyResponse {
                success: true,
                score: Some(0.7),
            },
        );

        let sut = RecaptchaCaptchaServiceImpl::new(recaptcha_api, recaptcha_config(0.5));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn recaptcha_ok_score_equals_threshold() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "secret".into(),
            RecaptchaSiteverifyResponse {
                success: true,
                score: Some(0.5),
            },
        );

        let sut = RecaptchaCaptchaServiceImpl::new(recaptcha_api, recaptcha_config(0.5));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn recaptcha_ok_no_score() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "secret".into(),
            RecaptchaSiteverifyResponse {
                success: true,
                score: None,
            },
        );

        let sut = RecaptchaCaptchaServiceImpl::new(recaptcha_api, recaptcha_config(0.0));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn recaptcha_ok_disabled_no_response() {
        // Arrange
        let sut = RecaptchaCaptchaServiceImpl::new(MockRecaptchaApiService::new(), None);

        // Act
        let result = sut.check(None).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn recaptcha_failed_insufficient_score() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "secret".into(),
            RecaptchaSiteverifyResponse {
                success: true,
                score: Some(0.2),
            },
        );

        let sut = RecaptchaCaptchaServiceImpl::new(recaptcha_api, recaptcha_config(0.5));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }

    #[tokio::test]
    async fn recaptcha_ok_no_score_above_zero_threshold() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "secret".into(),
            RecaptchaSiteverifyResponse {
                success: true,
                score: None,
            },
        );

        let sut = RecaptchaCaptchaServiceImpl::new(recaptcha_api, recaptcha_config(0.5));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn recaptcha_failed_no_success() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "secret".into(),
            RecaptchaSiteverifyResponse {
                success: false,
                score: Some(0.9),
            },
        );

        let sut = RecaptchaCaptchaServiceImpl::new(recaptcha_api, recaptcha_config(0.5));

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }

    #[tokio::test]
    async fn recaptcha_failed_no_response() {
        // Arrange
        let sut =
            RecaptchaCaptchaServiceImpl::new(MockRecaptchaApiService::new(), recaptcha_config(0.5));

        // Act
        let result = sut.check(None).await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }

    #[tokio::test]
    async fn turnstile_ok() {
        // Arrange
        let turnstile_api = MockTurnstileApiService::new().with_siteverify(
            "captcha response".into(),
            "secret".into(),
            TurnstileSiteverifyResponse {
                success: true,
                error_codes: vec![],
            },
        );

        let sut = TurnstileCaptchaServiceImpl::new(turnstile_api, turnstile_config());

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn turnstile_ok_disabled() {
        // Arrange
        let sut = TurnstileCaptchaServiceImpl::new(MockTurnstileApiService::new(), None);

        // Act
        let result = sut.check(None).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn turnstile_failed() {
        // Arrange
        let turnstile_api = MockTurnstileApiService::new().with_siteverify(
            "captcha response".into(),
            "secret".into(),
            TurnstileSiteverifyResponse {
                success: false,
                error_codes: vec!["timeout-or-duplicate".into()],
            },
        );

        let sut = TurnstileCaptchaServiceImpl::new(turnstile_api, turnstile_config());

        // Act
        let result = sut.check(Some("captcha response")).await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }

    #[tokio::test]
    async fn turnstile_failed_no_response() {
        // Arrange
        let sut =
            TurnstileCaptchaServiceImpl::new(MockTurnstileApiService::new(), turnstile_config());

        // Act
        let result = sut.check(None).await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }
}
