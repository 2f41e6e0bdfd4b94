use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{DataConfig, GapmapConfig};
use crate::errors::{Error, Result};

/// File name searched for in the current directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".gapmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string, replacing invalid sections with defaults
pub fn parse_and_validate_config(contents: &str) -> Result<GapmapConfig> {
    let mut config = toml::from_str::<GapmapConfig>(contents)?;

    if let Some(thresholds) = config.thresholds {
        if let Err(e) = thresholds.validate() {
            log::warn!("Invalid [thresholds]: {}. Using defaults.", e);
            config.thresholds = None;
        }
    }

    if let Some(narrative) = config.narrative {
        if let Err(e) = narrative.validate() {
            log::warn!("Invalid [narrative]: {}. Using defaults.", e);
            config.narrative = None;
        }
    }

    if let Some(data) = config.data.as_mut() {
        let defaults = DataConfig::default();
        if data.search_limit == 0 {
            log::warn!(
                "Invalid [data] search_limit: must be greater than zero. Using {}.",
                defaults.search_limit
            );
            data.search_limit = defaults.search_limit;
        }
        if data.quick_search_limit == 0 {
            log::warn!(
                "Invalid [data] quick_search_limit: must be greater than zero. Using {}.",
                defaults.quick_search_limit
            );
            data.quick_search_limit = defaults.quick_search_limit;
        }
    }

    Ok(config)
}

/// Load an explicitly requested config file. Missing files are an error.
pub fn load_config_from(path: &Path) -> Result<GapmapConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::file_system_with_source("Failed to read config file", path, e)
    })?;
    let config = parse_and_validate_config(&contents).map_err(|e| {
        Error::Configuration(format!("{}: {}", path.display(), e))
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading config from a path found during discovery
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<GapmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.gapmap.toml` starting from `start`
pub fn discover_config(start: PathBuf) -> GapmapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            GapmapConfig::default()
        })
}

/// Load configuration, discovering it from the current directory upward
pub fn load_config() -> GapmapConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            GapmapConfig::default()
        }
    }
}
