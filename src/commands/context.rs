//! Everything a command needs, resolved once from flags and config.

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::affordability::Assessor;
use crate::compare::{CompareList, FileKvStore};
use crate::config::{self, GapmapConfig};
use crate::data::{LocalStore, RestStore, SchoolStore};
use crate::formatting::FormattingConfig;
use crate::output::TerminalRenderer;

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub remote: Option<String>,
    pub state_file: Option<PathBuf>,
    pub plain: bool,
}

/// Where school records come from, after flags override config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Local(PathBuf),
    Remote(String),
}

impl DataSource {
    /// Flags win over config; a local file wins over a remote URL at the same level.
    pub fn resolve(options: &GlobalOptions, config: &GapmapConfig) -> Option<Self> {
        let data = config.data_config();
        options
            .data
            .clone()
            .map(DataSource::Local)
            .or_else(|| options.remote.clone().map(DataSource::Remote))
            .or_else(|| data.source.map(DataSource::Local))
            .or_else(|| data.rest_url.map(DataSource::Remote))
    }
}

pub struct AppContext {
    pub config: GapmapConfig,
    pub assessor: Assessor,
    pub formatting: FormattingConfig,
    data_source: Option<DataSource>,
    state_file: Option<PathBuf>,
}

impl AppContext {
    pub fn from_options(options: &GlobalOptions) -> Result<Self> {
        let config = match &options.config {
            Some(path) => config::load_config_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => config::load_config(),
        };
        Ok(Self::with_config(options, config))
    }

    pub fn with_config(options: &GlobalOptions, config: GapmapConfig) -> Self {
        let formatting = if options.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };
        Self {
            assessor: Assessor::from_config(&config),
            data_source: DataSource::resolve(options, &config),
            state_file: options.state_file.clone().or_else(|| config.state_file()),
            formatting,
            config,
        }
    }

    pub fn data_source(&self) -> Option<&DataSource> {
        self.data_source.as_ref()
    }

    pub fn open_store(&self) -> Result<Box<dyn SchoolStore>> {
        let source = self.data_source.as_ref().context(
            "No school data configured. Pass --data <FILE> or --remote <URL>, \
             or set [data] source in .gapmap.toml",
        )?;
        let data = self.config.data_config();

        match source {
            DataSource::Local(path) => {
                let travel = self.config.travel_config();
                let estimate = travel.estimate_missing.then_some(&travel);
                let store = LocalStore::open(path, estimate)
                    .with_context(|| format!("Failed to open dataset {}", path.display()))?;
                Ok(Box::new(store))
            }
            DataSource::Remote(url) => {
                let store = RestStore::from_config(url, &data)
                    .with_context(|| format!("Failed to set up client for {}", url))?;
                Ok(Box::new(store))
            }
        }
    }

    pub fn compare_list(&self) -> Result<CompareList<FileKvStore>> {
        let path = self.state_file.clone().context(
            "Could not determine where to save the compare list. Pass --state <FILE>",
        )?;
        log::debug!("Compare list state file: {}", path.display());
        Ok(CompareList::new(FileKvStore::new(path)))
    }

    pub fn renderer(&self) -> TerminalRenderer {
        TerminalRenderer::new(self.formatting)
    }

    pub fn search_limit(&self) -> usize {
        self.config.data_config().search_limit
    }

    pub fn quick_search_limit(&self) -> usize {
        self.config.data_config().quick_search_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompareConfig, DataConfig};

    fn config_with_sources() -> GapmapConfig {
        GapmapConfig {
            data: Some(DataConfig {
                source: Some(PathBuf::from("from-config.json")),
                rest_url: Some("https://config.example".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_override_config_source() {
        let options = GlobalOptions {
            remote: Some("https://flag.example".into()),
            ..Default::default()
        };
        assert_eq!(
            DataSource::resolve(&options, &config_with_sources()),
            Some(DataSource::Remote("https://flag.example".into()))
        );
    }

    #[test]
    fn test_config_local_source_before_remote() {
        assert_eq!(
            DataSource::resolve(&GlobalOptions::default(), &config_with_sources()),
            Some(DataSource::Local(PathBuf::from("from-config.json")))
        );
        assert_eq!(
            DataSource::resolve(&GlobalOptions::default(), &GapmapConfig::default()),
            None
        );
    }

    #[test]
    fn test_open_store_without_source_explains_fix() {
        let ctx = AppContext::with_config(&GlobalOptions::default(), GapmapConfig::default());
        let err = ctx.open_store().err().unwrap();
        assert!(err.to_string().contains("--data"));
    }

    #[test]
    fn test_state_flag_overrides_config() {
        let config = GapmapConfig {
            compare: Some(CompareConfig {
                state_file: Some(PathBuf::from("config-state.json")),
            }),
            ..Default::default()
        };
        let options = GlobalOptions {
            state_file: Some(PathBuf::from("flag-state.json")),
            ..Default::default()
        };
        let ctx = AppContext::with_config(&options, config);
        let list = ctx.compare_list().unwrap();
        assert_eq!(list.store().path(), std::path::Path::new("flag-state.json"));
    }
}
