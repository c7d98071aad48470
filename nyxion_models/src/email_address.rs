use std::str::FromStr;

pub use email_address::EmailAddress;
use thiserror::Error;

/// An email address with an optional display name, e.g. `Nyxion <info@nyxionsec.com>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub name: Option<String>,
    pub address: EmailAddress,
}

impl Mailbox {
    pub fn new(name: impl Into<String>, address: EmailAddress) -> Self {
        Self {
            name: Some(name.into()),
            address,
        }
    }
}

impl From<EmailAddress> for Mailbox {
    fn from(address: EmailAddress) -> Self {
        Self {
            name: None,
            address,
        }
    }
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid mailbox: {0}")]
pub struct InvalidMailbox(#[from] email_address::Error);

impl FromStr for Mailbox {
    type Err = InvalidMailbox;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_suffix('>').and_then(|s| s.rsplit_once('<')) {
            Some((name, address)) => {
                let name = name.trim();
                Ok(Self {
                    name: (!name.is_empty()).then(|| name.into()),
                    address: address.trim().parse()?,
                })
            }
            None => Ok(s.parse::<EmailAddress>()?.into()),
        }
    }
}
