pub mod recaptcha;
pub mod resend;
pub mod turnstile;
