// Copyright (c) Contributors to the hostid project.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::Result;

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

static CONFIG: OnceCell<RwLock<Arc<Config>>> = OnceCell::new();

const ENV_PREFIX: &str = "HOSTID_";
const DEFAULT_MOUNTINFO_PATH: &str = "/proc/self/mountinfo";

/// Configuration keys that hold a list, and are split on
/// commas when they are provided through the environment
const LIST_KEYS: &[&str] = &["mounts.subvolume_filesystems"];

/// Settings related to mount table inspection.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Mounts {
    /// The pseudo-file listing the live mount table, one mount per line
    ///
    /// The fifth whitespace-separated field of each line must be the
    /// mount path, as in the linux mountinfo format.
    pub mountinfo_path: PathBuf,

    /// Filesystems that give subvolumes their own device id
    ///
    /// A device id change alone is not trusted to identify a mount
    /// point on these filesystems, a matching mount table entry is
    /// required instead.
    pub subvolume_filesystems: Vec<String>,
}

impl Default for Mounts {
    fn default() -> Self {
        Self {
            mountinfo_path: PathBuf::from(DEFAULT_MOUNTINFO_PATH),
            subvolume_filesystems: vec!["btrfs".to_string()],
        }
    }
}

/// Configuration values for hostid.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    // These sub-types should aim to only have one level of
    // values within them, otherwise they become impossible to address
    // with environment variables.
    pub mounts: Mounts,
}

impl Config {
    /// Get the current loaded config, loading it if needed
    pub fn current() -> Result<Arc<Self>> {
        get_config()
    }

    /// Load the config from disk, even if it's already been loaded before
    pub fn load() -> Result<Self> {
        load_config()
    }

    /// Load a config from a toml string, ignoring any files or environment
    pub fn load_string<S: AsRef<str>>(conf: S) -> Result<Self> {
        use config::{Config as RawConfig, File, FileFormat};

        let config = RawConfig::builder()
            .add_source(File::from_str(conf.as_ref(), FileFormat::Toml))
            .build()?;
        Ok(Config::deserialize(config)?)
    }

    /// Make this config the current global one
    pub fn make_current(self) -> Result<Arc<Self>> {
        // Note we don't know if we won the race to set the value here,
        // so we still need to try to update it.
        let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
            Ok(RwLock::new(Arc::new(self.clone())))
        })?;

        let mut lock = config
            .write()
            .map_err(|err| crate::Error::LockPoisonedWrite(err.to_string()))?;
        *Arc::make_mut(&mut lock) = self;
        Ok(Arc::clone(&lock))
    }
}

/// Get the current hostid config, fetching it from disk if needed.
pub fn get_config() -> Result<Arc<Config>> {
    let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
        Ok(RwLock::new(Arc::new(load_config()?)))
    })?;
    let lock = config
        .read()
        .map_err(|err| crate::Error::LockPoisonedRead(err.to_string()))?;
    Ok(Arc::clone(&*lock))
}

/// Load the hostid configuration from disk, even if it has already been loaded.
///
/// This includes the system and user configurations (if they exist),
/// followed by any `HOSTID_<SECTION>_<NAME>` environment variables.
pub fn load_config() -> Result<Config> {
    use config::{Config as RawConfig, File};

    let mut config_builder = RawConfig::builder()
        // the system config can be in any supported format: toml, yaml, json, ini, etc
        .add_source(File::with_name("/etc/hostid").required(false));

    if let Some(user_config) = dirs::config_dir().map(|dir| dir.join("hostid").join("hostid")) {
        config_builder =
            config_builder.add_source(File::with_name(&user_config.to_string_lossy()).required(false));
    }

    for (var, value) in std::env::vars() {
        let Some(key) = env_var_to_key(&var) else {
            continue;
        };
        tracing::trace!(%var, %key, "config override from environment");
        if LIST_KEYS.contains(&key.as_str()) {
            let items = value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect::<Vec<_>>();
            config_builder = config_builder.set_override(key, items)?;
        } else {
            config_builder = config_builder.set_override(key, value)?;
        }
    }

    let config = config_builder.build()?;
    Ok(Config::deserialize(config)?)
}

/// Map an environment variable name onto a dotted config key
fn env_var_to_key(var: &str) -> Option<String> {
    let tail = var.strip_prefix(ENV_PREFIX)?;
    // typically, a value with no section is not a configuration
    // value, and can be skipped (eg: HOSTID_LOG)
    let (section, name) = tail.split_once('_')?;
    Some(format!("{}.{}", section.to_lowercase(), name.to_lowercase()))
}
