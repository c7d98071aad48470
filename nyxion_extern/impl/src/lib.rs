pub mod http;
pub mod recaptcha;
pub mod resend;
pub mod turnstile;
