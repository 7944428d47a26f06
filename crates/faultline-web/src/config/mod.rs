//! Host config loader (strict parsing).

pub mod schema;

use std::fs;

use faultline_core::error::{FaultlineError, Result};

pub use schema::{AppConfig, ReportingSection, ServerSection, StrategySection};

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FaultlineError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| FaultlineError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
