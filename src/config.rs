//! Configuration loading and management

use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::capture::{DeviceAvailability, FacingMode};
use crate::state::ResetPolicy;

/// How console replies are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow!("unknown output format '{}'", other)),
        }
    }
}

/// Console configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Time between analysis ticks
    pub tick_interval: Duration,

    /// Fixed rng seed; drawn from entropy when unset
    pub seed: Option<u64>,

    /// Behavior of reset while analysis runs
    pub reset_policy: ResetPolicy,

    /// Simulated capture device state
    pub camera: DeviceAvailability,

    /// Camera direction requested on capture
    pub facing: FacingMode,

    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(800),
            seed: None,
            reset_policy: ResetPolicy::default(),
            camera: DeviceAvailability::Present,
            facing: FacingMode::User,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(ms) = lookup("VERACITY_TICK_MS") {
            let ms = ms
                .trim()
                .parse::<u64>()
                .with_context(|| format!("VERACITY_TICK_MS is not a number: '{}'", ms))?;
            if ms == 0 {
                return Err(anyhow!("VERACITY_TICK_MS must be greater than zero"));
            }
            config.tick_interval = Duration::from_millis(ms);
        }

        if let Some(seed) = lookup("VERACITY_SEED") {
            let seed = seed
                .trim()
                .parse::<u64>()
                .with_context(|| format!("VERACITY_SEED is not a number: '{}'", seed))?;
            config.seed = Some(seed);
        }

        if let Some(policy) = lookup("VERACITY_RESET_POLICY") {
            config.reset_policy = policy
                .parse::<ResetPolicy>()
                .map_err(|e: String| anyhow!(e))
                .context("invalid VERACITY_RESET_POLICY")?;
        }

        if let Some(camera) = lookup("VERACITY_CAMERA") {
            config.camera = match camera.trim().to_ascii_lowercase().as_str() {
                "on" | "present" => DeviceAvailability::Present,
                "off" | "missing" => DeviceAvailability::Missing,
                "denied" => DeviceAvailability::Denied,
                other => return Err(anyhow!("invalid VERACITY_CAMERA '{}'", other)),
            };
        }

        if let Some(facing) = lookup("VERACITY_FACING") {
            config.facing = match facing.trim().to_ascii_lowercase().as_str() {
                "user" | "front" => FacingMode::User,
                "environment" | "back" => FacingMode::Environment,
                other => return Err(anyhow!("invalid VERACITY_FACING '{}'", other)),
            };
        }

        if let Some(output) = lookup("VERACITY_OUTPUT") {
            config.output = output.parse::<OutputFormat>().context("invalid VERACITY_OUTPUT")?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(800));
        assert_eq!(config.seed, None);
        assert_eq!(config.reset_policy, ResetPolicy::KeepRunning);
        assert_eq!(config.camera, DeviceAvailability::Present);
        assert_eq!(config.facing, FacingMode::User);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_config_overrides() {
        let config = load(&[
            ("VERACITY_TICK_MS", "250"),
            ("VERACITY_SEED", "42"),
            ("VERACITY_RESET_POLICY", "stop-analysis"),
            ("VERACITY_CAMERA", "denied"),
            ("VERACITY_FACING", "back"),
            ("VERACITY_OUTPUT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.reset_policy, ResetPolicy::StopAnalysis);
        assert_eq!(config.camera, DeviceAvailability::Denied);
        assert_eq!(config.facing, FacingMode::Environment);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(load(&[("VERACITY_TICK_MS", "fast")]).is_err());
        assert!(load(&[("VERACITY_TICK_MS", "0")]).is_err());
        assert!(load(&[("VERACITY_SEED", "-1")]).is_err());
        assert!(load(&[("VERACITY_RESET_POLICY", "maybe")]).is_err());
        assert!(load(&[("VERACITY_CAMERA", "blurry")]).is_err());
        assert!(load(&[("VERACITY_FACING", "sideways")]).is_err());
        assert!(load(&[("VERACITY_OUTPUT", "xml")]).is_err());
    }
}
