use snafu::{OptionExt, ResultExt};
use url::Url;

use crate::models::Credentials;
use crate::{error, Result};

pub const USERNAME_ENV: &str = "DOCKERHUB_USERNAME";
pub const PASSWORD_ENV: &str = "DOCKERHUB_PASSWORD";
pub const HUB_URL_ENV: &str = "DOCKERHUB_URL";

/// Everything needed to open a session, resolved before any request is made
#[derive(Debug, Clone)]
pub struct Config {
    pub hub_url: Url,
    pub credentials: Credentials,
}

impl Config {
    /// Validate the raw option values. Empty strings count as missing.
    pub fn new(hub_url: &str, username: Option<String>, password: Option<String>) -> Result<Self> {
        let username = username
            .filter(|value| !value.is_empty())
            .context(error::MissingCredentialSnafu {
                variable: USERNAME_ENV,
                flag: "username",
            })?;
        let password = password
            .filter(|value| !value.is_empty())
            .context(error::MissingCredentialSnafu {
                variable: PASSWORD_ENV,
                flag: "password",
            })?;
        let hub_url = Url::parse(hub_url).context(error::UrlSnafu)?;
        Ok(Self {
            hub_url,
            credentials: Credentials { username, password },
        })
    }
}
