use std::time::Duration;

use console::style;
use squaregate_core::{DEFAULT_CURRENCY, GatewayState, start_server};
use squaregate_driver_square::{DEFAULT_SQUARE_VERSION, SquareClientError, SquareConfig};
use squaregate_types::Environment;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum RunCommandError {
    #[error("Failed to configure the Square client: {0}")]
    ClientConfig(#[from] SquareClientError),
    #[error("Failed to start gateway server on {0}: {1}")]
    ServerStart(String, std::io::Error),
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct RunCommand {
    /// Square access token
    #[arg(long, env = "SQUARE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Square environment (sandbox or production)
    #[arg(long, env = "SQUARE_ENVIRONMENT", default_value = "sandbox")]
    pub environment: Environment,

    /// Square-Version header sent with every call
    #[arg(long, env = "SQUARE_VERSION", default_value = DEFAULT_SQUARE_VERSION)]
    pub square_version: String,

    /// Square API host, overriding the one derived from --environment
    #[arg(long, env = "SQUARE_API_BASE")]
    pub base_url: Option<Url>,

    /// Timeout for each Square call, in seconds
    #[arg(long, env = "SQUARE_TIMEOUT_SECS", default_value = "100")]
    pub timeout_secs: u64,

    /// Currency attached to amounts sent to Square
    #[arg(long, env = "SQUAREGATE_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to run the server on
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,
}

impl RunCommand {
    fn square_config(&self) -> SquareConfig {
        let mut config = SquareConfig::new(self.access_token.clone(), self.environment);
        config.square_version = self.square_version.clone();
        config.timeout = Duration::from_secs(self.timeout_secs);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        config
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        println!();
        println!("{}{}", style("Square").white(), style("Gate").green());
        println!("{}", style("Starting gateway server").dim());
        println!();

        let config = self.square_config();
        let state = GatewayState::from_config(&config, self.currency.as_str())
            .map_err(RunCommandError::from)?;

        let upstream = match &config.base_url {
            Some(url) => url.to_string(),
            None => config.environment.base_url().to_string(),
        };
        println!("{} {}", style("Environment").dim(), config.environment);
        println!("{} {}", style("Square API").dim(), upstream);
        println!("{} {}", style("Square-Version").dim(), config.square_version);
        println!("{} {}", style("Currency").dim(), self.currency);
        println!("{} {}", style("Port").dim(), self.port);
        println!();

        let base = format!("http://localhost:{}", self.port);
        println!("{}", style("Endpoints").dim());
        for (method, path) in ENDPOINTS {
            println!("  {:<6} {}{}", method, base, path);
        }
        println!();
        println!("{}", style("Press Ctrl+C to stop").dim());
        println!();

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();

        start_server(state, &self.host, self.port)
            .await
            .map_err(|e| RunCommandError::ServerStart(format!("{}:{}", self.host, self.port), e))?;
        Ok(())
    }
}

const ENDPOINTS: [(&str, &str); 19] = [
    ("GET", "/health"),
    ("GET", "/get-locations"),
    ("POST", "/customers"),
    ("POST", "/customers/create"),
    ("GET", "/customers/{id}"),
    ("PUT", "/customers/{id}"),
    ("DELETE", "/customers/{id}/{version}"),
    ("POST", "/cards"),
    ("POST", "/cards/create"),
    ("GET", "/cards/{id}"),
    ("PUT", "/cards/{id}"),
    ("POST", "/payments"),
    ("POST", "/payments/create"),
    ("GET", "/payments/{id}"),
    ("PUT", "/payments/{id}"),
    ("PUT", "/payments/idempotencyKey/{id}"),
    ("PUT", "/payments/complete/{id}"),
    ("POST", "/payments/refund"),
    ("GET", "/payments/refund/{refund_id}"),
];
