//! User configuration (`~/.vitrine/config.toml`)

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SOURCE: &str = "content.json";
pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

pub const CONFIG_ENV: &str = "VITRINE_CONFIG";
pub const SOURCE_ENV: &str = "VITRINE_SOURCE";

/// User-visible strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub search_placeholder: String,
    pub search: String,
    pub clear: String,
    pub load_more: String,
    pub no_results: String,
    pub view_more: String,
    pub download: String,
    pub downloading: String,
    pub close: String,
    pub size: String,
    pub version: String,
    pub compatibility: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            search_placeholder: "Pesquisar por nome ou descrição...".to_string(),
            search: "Pesquisar".to_string(),
            clear: "Limpar".to_string(),
            load_more: "Carregar Mais".to_string(),
            no_results: "Nenhum produto encontrado.".to_string(),
            view_more: "Ver Mais".to_string(),
            download: "Download".to_string(),
            downloading: "Baixando...".to_string(),
            close: "x".to_string(),
            size: "Tamanho".to_string(),
            version: "Versão".to_string(),
            compatibility: "Compatibilidade".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitrineConfig {
    /// Default catalog source when none is given on the command line
    pub source: Option<String>,
    pub page_size: usize,
    pub debounce_ms: u64,
    pub labels: Labels,
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            source: None,
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            labels: Labels::default(),
        }
    }
}

impl VitrineConfig {
    /// `~/.vitrine/config.toml`, if a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".vitrine").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path (or `VITRINE_CONFIG`) must exist. The default path is
    /// optional and falls back to built-in defaults when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Self::load_from(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        log::debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(CatalogError::Config(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Pick the catalog source: command line, then `VITRINE_SOURCE`, then the
    /// configured `source`, then `content.json`.
    pub fn resolve_source(&self, cli: Option<&str>) -> String {
        if let Some(source) = cli {
            return source.to_string();
        }
        if let Ok(source) = std::env::var(SOURCE_ENV) {
            if !source.is_empty() {
                return source;
            }
        }
        self.source
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
    }
}
