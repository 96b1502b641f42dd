/// `load_config` module: Loads the optional YAML config file and applies environment overrides.
///
/// This module is the only place where untrusted YAML is parsed and mapped to
/// the strongly-typed settings the ledger is built from.
///
/// # Responsibilities
/// - Parse the YAML file into [`CliConfig`] (ticket id policy and start-up fleet)
/// - Resolve the config path from `--config` or `BUS_LEDGER_CONFIG`
/// - Apply `BUS_LEDGER_TICKET_SEED` over the file's `seed`
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use bus_ledger_core::config::{CollisionPolicy, LedgerConfig, DEFAULT_MAX_ATTEMPTS};
use bus_ledger_core::NewBus;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const CONFIG_PATH_ENV: &str = "BUS_LEDGER_CONFIG";
pub const TICKET_SEED_ENV: &str = "BUS_LEDGER_TICKET_SEED";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub ticket_ids: TicketIdSection,
    /// Buses registered before the first command runs.
    pub fleet: Vec<NewBus>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TicketIdSection {
    pub on_collision: CollisionPolicy,
    pub max_attempts: u32,
    pub seed: Option<u64>,
}

impl Default for TicketIdSection {
    fn default() -> Self {
        Self {
            on_collision: CollisionPolicy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl TicketIdSection {
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            on_collision: self.on_collision,
            max_attempts: self.max_attempts,
        }
    }
}

/// `--config` wins; otherwise `BUS_LEDGER_CONFIG` if set and non-empty.
pub fn resolve_config_path(arg: Option<PathBuf>) -> Option<PathBuf> {
    arg.or_else(|| {
        std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Config to use when no file is given: defaults plus environment overrides.
pub fn default_config() -> Result<CliConfig> {
    let mut config = CliConfig::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Loads a YAML config file and applies environment overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let mut config: CliConfig = if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        CliConfig::default()
    } else {
        match serde_yaml::from_str(&config_content) {
            Ok(conf) => {
                info!(config_path = ?path_ref, "Parsed config YAML successfully");
                conf
            }
            Err(e) => {
                error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
                return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
            }
        }
    };

    apply_env_overrides(&mut config)?;

    info!(
        fleet = config.fleet.len(),
        on_collision = ?config.ticket_ids.on_collision,
        seeded = config.ticket_ids.seed.is_some(),
        "Config loaded and merged successfully"
    );
    Ok(config)
}

fn apply_env_overrides(config: &mut CliConfig) -> Result<()> {
    if let Ok(var) = std::env::var(TICKET_SEED_ENV) {
        match var.parse::<u64>() {
            Ok(seed) => {
                info!(seed, "{TICKET_SEED_ENV} overrides ticket id seed");
                config.ticket_ids.seed = Some(seed);
            }
            Err(e) => {
                error!(error = ?e, var = ?var, "{TICKET_SEED_ENV} must be a valid integer");
                anyhow::bail!("{TICKET_SEED_ENV} must be a valid integer: {e}");
            }
        }
    }
    Ok(())
}
