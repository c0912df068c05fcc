use clap::Args;
use hubtag::config::{Config, HUB_URL_ENV, PASSWORD_ENV, USERNAME_ENV};
use hubtag::hub::{Hub, DEFAULT_HUB_URL};
use hubtag::name::RepositoryName;
use hubtag::repository::Repository;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Options shared by every subcommand
#[derive(Args, Debug)]
pub struct HubArgs {
    /// Docker hub username
    #[arg(short = 'U', long, env = USERNAME_ENV, global = true)]
    username: Option<String>,
    /// Docker hub password or personal access token
    #[arg(short = 'P', long, env = PASSWORD_ENV, hide_env_values = true, global = true)]
    password: Option<String>,
    /// Base url of the docker hub api
    #[arg(long, env = HUB_URL_ENV, default_value = DEFAULT_HUB_URL, global = true)]
    hub_url: String,
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

pub struct Ctx {
    config: Config,
}

impl Ctx {
    /// Install the logger and resolve the configuration. Nothing here talks to the network.
    pub fn init(args: &HubArgs) -> anyhow::Result<Self> {
        let level = if args.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        };
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(
                        EnvFilter::builder()
                            .with_default_directive(level.into())
                            .from_env_lossy(),
                    ),
            )
            .try_init()?;
        let config = Config::new(
            args.hub_url.as_str(),
            args.username.clone(),
            args.password.clone(),
        )?;
        Ok(Self { config })
    }

    /// Parse the repository argument, then log in and open a session on it
    pub async fn repository(&self, name: &str) -> hubtag::Result<Repository> {
        let name: RepositoryName = name.parse()?;
        let hub = Hub::login(&self.config.hub_url, &self.config.credentials).await?;
        Ok(Repository::new(&hub, &name))
    }
}
