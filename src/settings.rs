//! Layered runtime settings.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. an optional settings file (`psrquery.toml`, `.json`, `.yaml`, ...)
//! 3. environment variables prefixed with `PSRQUERY_`, e.g. `PSRQUERY_TOLERANCE=1e-9`

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{QueryError, Result};
use crate::parameters::ATNF_VERSION;
use crate::registry::Registry;

pub const DEFAULT_FILE: &str = "psrquery";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Catalogue version the records are expected to come from.
    pub catalogue_version: String,
    /// Absolute tolerance for numeric `==` conditions, in the field's declared unit.
    pub tolerance: f64,
    /// Fallback `tracing` filter when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalogue_version: ATNF_VERSION.to_string(),
            tolerance: 0.0,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `psrquery.*` in the working directory, if any, and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_FILE)
    }

    /// Loads settings with `path` as the (optional) settings file. The
    /// extension may be omitted, in which case all supported formats are tried.
    pub fn load_from(path: &str) -> Result<Self> {
        let defaults = Settings::default();
        let settings: Settings = Config::builder()
            .set_default("catalogue_version", defaults.catalogue_version)?
            .set_default("tolerance", defaults.tolerance)?
            .set_default("log_filter", defaults.log_filter)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("PSRQUERY").try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(QueryError::Config(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Warns when the configured catalogue version differs from the one the
    /// registry was built for. Returns whether they agree.
    pub fn check_version(&self, registry: &Registry) -> bool {
        if self.catalogue_version == registry.version() {
            info!(version = %registry.version(), parameters = registry.len(), "registry ready");
            true
        } else {
            warn!(
                configured = %self.catalogue_version,
                registry = %registry.version(),
                "catalogue version differs from the built-in registry"
            );
            false
        }
    }
}
