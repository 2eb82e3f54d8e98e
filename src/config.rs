use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::infra::import::SheetFileBackend;
use crate::infra::script::{ScriptBackend, DEFAULT_TIMEOUT_SECS};
use crate::usecase::ports::backend::SheetBackend;

pub const ENV_SCRIPT_URL: &str = "PESQUEIRO_SCRIPT_URL";
pub const ENV_SHEET_PATH: &str = "PESQUEIRO_SHEET_PATH";
pub const DEFAULT_LOG_FILTER: &str = "pesqueiro=info";

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigFile {
    /// Published web script in front of the spreadsheet.
    pub script_url: Option<String>,
    /// Local `.xlsx` export or directory of CSV exports; wins over `script_url`.
    pub sheet_path: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
    pub log_filter: Option<String>,
}

/// Where the rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendChoice {
    SheetFile(PathBuf),
    Script { url: String, timeout: Duration },
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "pesqueiro", "pesqueiro")
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(project_dirs()?.config_dir().join("config.yml"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs().context("unable to resolve data directory")?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str::<ConfigFile>(&contents)
            .with_context(|| format!("failed to parse config '{}'", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) => {
            Err(e).with_context(|| format!("failed to read config '{}'", path.display()))
        }
    }
}

/// Config file at the platform location, then environment overrides.
pub fn load_default() -> Result<ConfigFile> {
    let file = match default_config_path() {
        Some(path) => load_config(&path, true)?,
        None => ConfigFile::default(),
    };
    Ok(file.with_env_overrides(|key| std::env::var(key).ok()))
}

impl ConfigFile {
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_SCRIPT_URL).filter(|v| !v.trim().is_empty()) {
            self.script_url = Some(url);
        }
        if let Some(path) = lookup(ENV_SHEET_PATH).filter(|v| !v.trim().is_empty()) {
            self.sheet_path = Some(PathBuf::from(path));
        }
        self
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter
            .as_deref()
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn backend_choice(&self) -> Result<BackendChoice> {
        if let Some(path) = &self.sheet_path {
            return Ok(BackendChoice::SheetFile(path.clone()));
        }
        match self.script_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(BackendChoice::Script {
                url: url.to_string(),
                timeout: self.timeout(),
            }),
            _ => anyhow::bail!(
                "no data source configured: set script_url or sheet_path in {}, \
                 or {ENV_SCRIPT_URL} / {ENV_SHEET_PATH}",
                default_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.yml".to_string())
            ),
        }
    }
}

pub fn connect(choice: &BackendChoice) -> Result<Arc<dyn SheetBackend>> {
    match choice {
        BackendChoice::SheetFile(path) => {
            tracing::info!(path = %path.display(), "using sheet export");
            Ok(Arc::new(SheetFileBackend::open(path)))
        }
        BackendChoice::Script { url, timeout } => {
            tracing::info!(url, timeout_secs = timeout.as_secs(), "using sheet script");
            let backend = ScriptBackend::new(url.clone(), *timeout)
                .context("failed to set up the script client")?;
            Ok(Arc::new(backend))
        }
    }
}
