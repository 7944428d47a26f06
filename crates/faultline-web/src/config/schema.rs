use std::net::SocketAddr;

use serde::Deserialize;
use faultline_core::error::{FaultlineError, Result};
use faultline_core::strategy::{StrategyConfig, DEFAULT_TEMPLATE};
use faultline_core::template::DEFAULT_MESSAGE;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub strategy: StrategySection,

    #[serde(default)]
    pub reporting: ReportingSection,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FaultlineError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.strategy.to_strategy_config()?;
        self.reporting.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            FaultlineError::Config(format!("server.listen must be a socket address: {}", self.listen))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategySection {
    #[serde(default)]
    pub display_exceptions: bool,

    #[serde(default = "default_message_template")]
    pub message_template: String,

    #[serde(default = "default_template")]
    pub template: String,
}

impl Default for StrategySection {
    fn default() -> Self {
        Self {
            display_exceptions: false,
            message_template: default_message_template(),
            template: default_template(),
        }
    }
}

impl StrategySection {
    /// Compile into the immutable strategy config (validates the template).
    pub fn to_strategy_config(&self) -> Result<StrategyConfig> {
        StrategyConfig::default()
            .with_display_exceptions(self.display_exceptions)
            .with_message_template(&self.message_template)
            .and_then(|c| c.with_template(self.template.clone()))
            .map_err(|e| FaultlineError::Config(format!("strategy: {e}")))
    }
}

fn default_message_template() -> String {
    DEFAULT_MESSAGE.into()
}
fn default_template() -> String {
    DEFAULT_TEMPLATE.into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportingSection {
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ReportingSection {
    fn default() -> Self {
        Self {
            environment: default_environment(),
        }
    }
}

impl ReportingSection {
    pub fn validate(&self) -> Result<()> {
        if self.environment.trim().is_empty() {
            return Err(FaultlineError::Config("reporting.environment must not be empty".into()));
        }
        Ok(())
    }
}

fn default_environment() -> String {
    "production".into()
}
