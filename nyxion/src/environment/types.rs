use nyxion_core_contact_impl::ContactFeatureServiceImpl;
use nyxion_email_impl::EmailServiceImpl;
use nyxion_extern_impl::{
    recaptcha::RecaptchaApiServiceImpl, resend::ResendApiServiceImpl,
    turnstile::TurnstileApiServiceImpl,
};
use nyxion_shared_impl::captcha::{RecaptchaCaptchaServiceImpl, TurnstileCaptchaServiceImpl};
use nyxion_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = nyxion_api_rest::RestServer<ContactFeature>;

// Core
pub type ContactFeature =
    ContactFeatureServiceImpl<RecaptchaCaptcha, TurnstileCaptcha, Email, Template>;

// Shared
pub type RecaptchaCaptcha = RecaptchaCaptchaServiceImpl<RecaptchaApi>;
pub type TurnstileCaptcha = TurnstileCaptchaServiceImpl<TurnstileApi>;

// Extern
pub type RecaptchaApi = RecaptchaApiServiceImpl;
pub type TurnstileApi = TurnstileApiServiceImpl;
pub type ResendApi = ResendApiServiceImpl;

// Email
pub type Email = EmailServiceImpl<ResendApi>;

// Templates
pub type Template = TemplateServiceImpl;
