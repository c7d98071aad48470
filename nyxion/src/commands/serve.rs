use nyxion_config::Config;
use tracing::{info, warn};

use crate::environment::{ConfigProvider, Provider};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    if config.recaptcha.is_none() {
        warn!("recaptcha is not configured, submissions of the main contact form are not verified");
    }
    if config.turnstile.is_none() {
        warn!("turnstile is not configured, submissions of the turnstile contact form are not verified");
    }

    let config_provider = ConfigProvider::new(&config)?;
    let server = Provider::new(config_provider).rest_server();

    info!("Starting http server on {}", config.http.address);
    server.serve().await
}
