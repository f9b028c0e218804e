use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::detect::DEFAULT_TRIGGER;
use crate::registry::SymbolRegistry;

pub const DEFAULT_CONFIG_FILE: &str = "checkimport.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub trigger: String,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    /// External registry replacing the built-in table.
    pub registry: Option<PathBuf>,
    /// Extra entries layered over the registry.
    pub symbols: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trigger: DEFAULT_TRIGGER.to_string(),
            extensions: vec!["kt".to_string()],
            exclude: Vec::new(),
            registry: None,
            symbols: BTreeMap::new(),
        }
    }
}

// --- Raw TOML structures ---
#[derive(Deserialize)]
struct ConfigFile {
    checkimport: Option<CheckImportToml>,
}

#[derive(Deserialize)]
struct CheckImportToml {
    trigger: Option<String>,
    extensions: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    registry: Option<String>,
    symbols: Option<BTreeMap<String, String>>,
}

impl AppConfig {
    /// Load `config_path`, or `./checkimport.toml` when present, or defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut cfg = Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        // registry paths are relative to the config file
        if let Some(registry) = cfg.registry.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            cfg.registry = Some(base.join(registry));
        }
        tracing::debug!(config = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let root: ConfigFile = toml::from_str(content).context("invalid TOML")?;
        let Some(section) = root.checkimport else {
            bail!("[checkimport] not found");
        };
        let defaults = Self::default();

        let trigger = section.trigger.unwrap_or(defaults.trigger);
        if trigger.trim().is_empty() {
            bail!("trigger must not be empty");
        }
        let extensions = section
            .extensions
            .unwrap_or(defaults.extensions)
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();

        Ok(Self {
            trigger,
            extensions,
            exclude: section.exclude.unwrap_or_default(),
            registry: section.registry.map(PathBuf::from),
            symbols: section.symbols.unwrap_or_default(),
        })
    }

    /// Build the registry: `registry_override` beats the configured file,
    /// which beats the built-in table; `[checkimport.symbols]` goes on top.
    pub fn build_registry(&self, registry_override: Option<&Path>) -> Result<SymbolRegistry> {
        let base = match registry_override.or(self.registry.as_deref()) {
            Some(path) => SymbolRegistry::load(path)?,
            None => SymbolRegistry::builtin().clone(),
        };
        if self.symbols.is_empty() {
            return Ok(base);
        }
        base.with_overrides(self.symbols.clone())
            .context("invalid [checkimport.symbols] entry")
    }

    pub fn exclude_patterns(&self) -> Result<Vec<Pattern>> {
        self.exclude
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("invalid exclude glob: {}", p)))
            .collect()
    }
}
