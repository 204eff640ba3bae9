//! Run settings merged from a TOML file and command-line flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use loon_system_scheduler::Config;
use serde::Deserialize;

/// Seed used when neither the settings file nor the command line supplies one.
pub(crate) const DEFAULT_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Optional overrides for the scheduler and the random source.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub(crate) seed: Option<u64>,
    pub(crate) bands: Option<usize>,
    pub(crate) journeys_per_band: Option<usize>,
    pub(crate) turns_lag: Option<usize>,
}

impl Settings {
    /// Reads settings from a TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("failed to parse settings in {}", path.display()))
    }

    fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Layers `overrides` on top of `self`; values present in `overrides` win.
    #[must_use]
    pub(crate) fn overridden_by(self, overrides: Self) -> Self {
        Self {
            seed: overrides.seed.or(self.seed),
            bands: overrides.bands.or(self.bands),
            journeys_per_band: overrides.journeys_per_band.or(self.journeys_per_band),
            turns_lag: overrides.turns_lag.or(self.turns_lag),
        }
    }

    /// Seed for the run's random source.
    #[must_use]
    pub(crate) fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Scheduler configuration with unset knobs left at their defaults.
    #[must_use]
    pub(crate) fn scheduler_config(&self) -> Config {
        let defaults = Config::default();
        Config::new(
            self.bands.unwrap_or(defaults.bands()),
            self.journeys_per_band.unwrap_or(defaults.journeys_per_band()),
            self.turns_lag.unwrap_or(defaults.turns_lag()),
        )
    }
}
