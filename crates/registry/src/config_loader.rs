//! Healer config file search and parse.
//!
//! Searched in order at `/etc/contrail-healer/<name>` then
//! `~/.config/contrail-healer/<name>`, INI-style sections. Absence when
//! `config_file` is declared is a [`ConfigurationError`].

use std::path::{Path, PathBuf};

use healer_core::HealerConfig;
use indexmap::IndexMap;

use crate::error::ConfigurationError;

fn default_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/etc/contrail-healer")];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config/contrail-healer"));
    }
    roots
}

/// Load and parse `config_file` for `resource_type`, searching the standard
/// locations in order. Returns `ConfigurationError` if the file cannot be
/// found anywhere, or exists but fails to parse.
pub fn load(resource_type: &str, config_file: &str) -> Result<HealerConfig, ConfigurationError> {
    load_from_roots(resource_type, config_file, &default_roots())
}

/// As [`load`], but searching an explicit ordered list of root directories
/// instead of the real system locations — used by tests.
pub fn load_from_roots(
    resource_type: &str,
    config_file: &str,
    roots: &[PathBuf],
) -> Result<HealerConfig, ConfigurationError> {
    for root in roots {
        let path = root.join(config_file);
        if !path.is_file() {
            continue;
        }
        return parse_file(resource_type, config_file, &path);
    }
    Err(ConfigurationError::MissingConfigFile {
        resource_type: resource_type.to_string(),
        config_file: config_file.to_string(),
    })
}

fn parse_file(
    resource_type: &str,
    config_file: &str,
    path: &Path,
) -> Result<HealerConfig, ConfigurationError> {
    let ini = ini::Ini::load_from_file(path).map_err(|source| {
        ConfigurationError::InvalidConfigFile {
            resource_type: resource_type.to_string(),
            config_file: config_file.to_string(),
            source,
        }
    })?;
    Ok(to_healer_config(&ini))
}

fn to_healer_config(ini: &ini::Ini) -> HealerConfig {
    let mut sections = IndexMap::new();
    for (section, props) in ini.iter() {
        let section_name = section.unwrap_or("default").to_string();
        let mut entries = IndexMap::new();
        for (k, v) in props.iter() {
            entries.insert(k.to_string(), v.to_string());
        }
        sections.insert(section_name, entries);
    }
    HealerConfig::new(sections)
}

#[cfg(test)]
#[path = "config_loader_tests.rs"]
mod tests;
