//! TOML-based calculator configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::calc::types::Period;
use crate::error::CalcError;
use crate::tariff::{Tariff, TariffParams};

/// Top-level calculator configuration parsed from TOML.
///
/// All fields have defaults matching the 2023 reference tariff. Load from
/// TOML with [`CalculatorConfig::from_toml_file`] or use
/// [`CalculatorConfig::reference`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Tariff parameters; missing keys fall back to the reference tariff.
    #[serde(default)]
    pub tariff: TariffParams,
    /// Defaults applied when the caller does not choose.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Calculation defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Billing period: `"year"` or `"month"`.
    pub period: Period,
    /// Whether reported figures include VAT.
    pub include_vat: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            period: Period::Year,
            include_vat: true,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"tariff.boiler_share"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl CalculatorConfig {
    /// Returns the reference configuration (2023 tariff, yearly, VAT included).
    pub fn reference() -> Self {
        Self {
            tariff: TariffParams::default(),
            defaults: DefaultsConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["reference_2023"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "reference_2023" => Ok(Self::reference()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), "loaded calculator config");
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates the tariff table and returns every problem found.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        self.tariff
            .problems()
            .into_iter()
            .map(|e| {
                let field = match &e {
                    CalcError::InvalidTariffValue { field, .. } => format!("tariff.{field}"),
                    CalcError::InvalidTariffShares { .. } => "tariff.boiler_share".to_string(),
                    CalcError::InvalidConsumption { .. } => "tariff".to_string(),
                };
                ConfigError {
                    field,
                    message: e.to_string(),
                }
            })
            .collect()
    }

    /// Builds the validated tariff described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`CalcError`] raised by [`Tariff::new`].
    pub fn tariff(&self) -> Result<Tariff, CalcError> {
        Tariff::new(self.tariff.clone())
    }
}
