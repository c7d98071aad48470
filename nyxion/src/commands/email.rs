use anyhow::ensure;
use clap::Subcommand;
use nyxion_config::Config;
use nyxion_email_contracts::{ContentType, Email, EmailService};
use nyxion_models::email_address::{EmailAddress, Mailbox};

use crate::environment::{ConfigProvider, Provider};

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test {
        recipient: EmailAddress,
        /// Send from the sender of the turnstile form instead of the main form
        #[arg(long)]
        turnstile: bool,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test {
                recipient,
                turnstile,
            } => test(config, recipient, turnstile).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddress, turnstile: bool) -> anyhow::Result<()> {
    let form = if turnstile {
        &config.contact.turnstile_form
    } else {
        &config.contact.recaptcha_form
    };
    let sender = Mailbox::new(form.sender_name.as_str(), form.sender.clone());

    let email_service = Provider::new(ConfigProvider::new(&config)?).email();

    let ok = email_service
        .send(Email {
            sender,
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}
