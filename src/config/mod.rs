use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    currency::{CurrencyCode, LocaleConfig},
    domain::{Budget, PeriodKind, DEFAULT_ALERT_THRESHOLD},
    errors::FinanceError,
};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Threshold given to budgets created through `Config::new_budget`.
    #[serde(default = "Config::default_threshold")]
    pub default_alert_threshold: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_alert_threshold: DEFAULT_ALERT_THRESHOLD,
            snapshot_path: None,
        }
    }
}

impl Config {
    fn default_threshold() -> u8 {
        DEFAULT_ALERT_THRESHOLD
    }

    pub fn validate(&self) -> Result<(), FinanceError> {
        if !(1..=100).contains(&self.default_alert_threshold) {
            return Err(FinanceError::Config(format!(
                "default_alert_threshold must be between 1 and 100, got {}",
                self.default_alert_threshold
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(FinanceError::Config("currency must not be empty".into()));
        }
        Ok(())
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.as_str())
    }

    pub fn new_budget(
        &self,
        owner_id: Uuid,
        name: impl Into<String>,
        limit_amount: Decimal,
        period: PeriodKind,
        start_date: NaiveDate,
    ) -> Budget {
        Budget::new(owner_id, name, limit_amount, period, start_date)
            .with_threshold(self.default_alert_threshold)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, FinanceError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, FinanceError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Missing file yields defaults; a present but invalid file is an error.
    pub fn load(&self) -> Result<Config, FinanceError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| FinanceError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), FinanceError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
