//! Settings loader for the toolloop binaries.
//!
//! Reads the project `.env` and `$XDG_CONFIG_HOME/<app>/config.toml` (`[env]` table) and
//! copies their entries into the process environment. Priority per key:
//! **existing env > .env > XDG**. Nothing already set in the environment is overwritten.
//!
//! ```toml
//! # ~/.config/toolloop/config.toml
//! [env]
//! OLLAMA_HOST = "http://gpu-box:11434"
//! TOOLLOOP_MAX_ITERATIONS = 6
//! ```

mod dotenv;
mod xdg_toml;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use xdg_toml::config_file_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read {path}: {source}")]
    XdgRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Entries found in the two config sources, before they are applied.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigSources {
    pub dotenv: HashMap<String, String>,
    pub xdg: HashMap<String, String>,
}

impl ConfigSources {
    /// Reads `.env` (from `override_dir`, else the current directory) and the app's XDG
    /// `config.toml`. Missing files contribute nothing.
    pub fn collect(app_name: &str, override_dir: Option<&Path>) -> Result<Self, LoadError> {
        let xdg = match config_file_path(app_name) {
            Some(path) => xdg_toml::load_env_map(&path)?,
            None => HashMap::new(),
        };
        let dotenv = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
        Ok(Self { dotenv, xdg })
    }

    /// Keys to set and their winning value, skipping keys for which `is_set` is true.
    pub fn pending(&self, is_set: impl Fn(&str) -> bool) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for (key, value) in self.xdg.iter().chain(self.dotenv.iter()) {
            if is_set(key) {
                continue;
            }
            let winner = self.dotenv.get(key).unwrap_or(value);
            out.insert(key.clone(), winner.clone());
        }
        out
    }
}

/// Loads both sources and sets every key not already present in the environment.
/// Returns the keys that were set, sorted.
///
/// * `app_name`: directory under the XDG config home, e.g. `"toolloop"`.
/// * `override_dir`: where to look for `.env` instead of the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<Vec<String>, LoadError> {
    let sources = ConfigSources::collect(app_name, override_dir)?;
    let pending = sources.pending(|key| std::env::var_os(key).is_some());
    let mut applied = Vec::with_capacity(pending.len());
    for (key, value) in pending {
        std::env::set_var(&key, value);
        applied.push(key);
    }
    Ok(applied)
}
