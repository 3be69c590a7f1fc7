//! Configuration loading.
//!
//! `tfcheck.toml` is optional. When `--config` is not given the file is looked
//! up in the current directory; a missing default file means built-in
//! defaults, a missing explicit file is an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use tfcheck_types::ConfigFile;

use crate::env_expand::expand_env_vars;

pub const DEFAULT_CONFIG_FILE: &str = "tfcheck.toml";

pub fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                debug!("No config file found, using built-in defaults");
                return Ok(ConfigFile::default());
            }
            path
        }
    };

    load_config_file(&path, |text| {
        expand_env_vars(text).map(std::borrow::Cow::into_owned)
    })
}

/// Read, expand and parse one config file.
pub fn load_config_file<F>(path: &Path, expand_env: F) -> Result<ConfigFile>
where
    F: Fn(&str) -> Result<String>,
{
    info!("Loading config from: {}", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let expanded =
        expand_env(&text).with_context(|| format!("expand env in config '{}'", path.display()))?;
    let config: ConfigFile =
        toml::from_str(&expanded).with_context(|| format!("parse config '{}'", path.display()))?;

    debug!(
        "Config defaults: terraform_bin={:?} plan_args={:?} strip_refresh={:?}",
        config.defaults.terraform_bin, config.defaults.plan_args, config.defaults.strip_refresh
    );
    Ok(config)
}
