//! `[env]` table of `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `$XDG_CONFIG_HOME` when set to an absolute path, otherwise the platform config dir.
fn config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(dirs::config_dir)
}

/// Path of the app's `config.toml`, if that file exists.
pub fn config_file_path(app_name: &str) -> Option<PathBuf> {
    let path = config_home()?.join(app_name).join("config.toml");
    path.is_file().then_some(path)
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, toml::Value>,
}

/// Scalar values are stringified (`6` → `"6"`, `true` → `"true"`); tables and arrays are skipped.
fn env_value(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

fn parse_env_table(content: &str) -> Result<HashMap<String, String>, LoadError> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file
        .env
        .into_iter()
        .filter_map(|(k, v)| env_value(v).map(|v| (k, v)))
        .collect())
}

/// Reads the `[env]` table of `path`. A file without the table yields an empty map.
pub fn load_env_map(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::XdgRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_env_table(&content)
}
