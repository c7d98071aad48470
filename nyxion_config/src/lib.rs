use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use email_address::EmailAddress;
use nyxion_utils::Apply;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files take precedence.
pub const CONFIG_PATHS_ENV: &str = "NYXION_CONFIG";

/// Prefix of environment variables overriding single config values,
/// e.g. `NYXION__RESEND__API_KEY`.
pub const ENV_PREFIX: &str = "NYXION";

/// Load the config from the files listed in `NYXION_CONFIG` (or `config.toml`
/// in the working directory) and apply `NYXION__*` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATHS_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from("config.toml")],
    };

    let sources = read_files(&paths)?;
    build(
        sources.iter().map(String::as_str),
        Some(Environment::with_prefix(ENV_PREFIX).separator("__")),
    )
}

/// Load the config from the given files only.
pub fn load_files(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let sources = read_files(paths)?;
    build(sources.iter().map(String::as_str), None)
}

fn read_files(paths: &[impl AsRef<Path>]) -> anyhow::Result<Vec<String>> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))
        })
        .collect()
}

fn build<'a>(
    sources: impl IntoIterator<Item = &'a str>,
    environment: Option<Environment>,
) -> anyhow::Result<Config> {
    let builder = sources
        .into_iter()
        .fold(config::Config::builder(), |builder, content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        });

    builder
        .apply_map(environment, |builder, environment| {
            builder.add_source(environment)
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub contact: ContactConfig,
    pub resend: ResendConfig,
    pub recaptcha: Option<RecaptchaConfig>,
    pub turnstile: Option<TurnstileConfig>,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub site_origin: Url,
    pub subject: String,
    pub recaptcha_form: ContactFormConfig,
    pub turnstile_form: ContactFormConfig,
}

#[derive(Debug, Deserialize)]
pub struct ContactFormConfig {
    pub recipient: EmailAddress,
    pub sender: EmailAddress,
    pub sender_name: String,
    pub accent_color: String,
}

#[derive(Debug, Deserialize)]
pub struct ResendConfig {
    pub api_key: String,
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct RecaptchaConfig {
    pub secret: String,
    pub min_score: f64,
    pub siteverify_endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct TurnstileConfig {
    pub secret: String,
    pub siteverify_endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: Url,
}
