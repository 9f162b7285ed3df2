use anyhow::{Context, Result};
use clap::ValueEnum;
use finwise_classify::RemoteSettings;
use finwise_classify::remote::DEFAULT_BATCH_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::ensure_finwise_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierSection,
    pub remote: RemoteSection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Deterministic keyword rules only
    #[default]
    Keyword,
    /// Hosted model, falling back to keyword rules per batch
    Remote,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    pub mode: Mode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    /// OpenAI-compatible host; `/v1/chat/completions` is appended
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub batch_size: usize,
    pub timeout_secs: u64,
    /// Environment variable holding a bearer token, if the host needs one
    pub api_key_env: Option<String>,
}

impl Default for RemoteSection {
    fn default() -> Self {
        let settings = RemoteSettings::default();
        Self {
            base_url: "http://localhost:8000".to_string(),
            model: settings.model,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_secs: 60,
            api_key_env: Some("FINWISE_API_KEY".to_string()),
        }
    }
}

impl RemoteSection {
    pub fn settings(&self) -> RemoteSettings {
        RemoteSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            batch_size: self.batch_size.max(1),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn api_key(&self) -> Option<String> {
        let var = self.api_key_env.as_deref()?;
        std::env::var(var).ok().filter(|k| !k.is_empty())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_finwise_home()?.join("config.toml"))
}

/// The config on disk, or defaults when none has been written yet
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    match fs::read_to_string(&path) {
        Ok(text) => {
            parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e).with_context(|| format!("reading config {}", path.display())),
    }
}

pub fn parse_config(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

fn write_config(path: &Path, cfg: &Config) -> Result<()> {
    let text = toml::to_string_pretty(cfg).context("encoding config as TOML")?;
    fs::write(path, text).with_context(|| format!("writing config {}", path.display()))
}

pub enum InitOutcome {
    Created(PathBuf),
    /// An existing file is never overwritten
    AlreadyPresent(PathBuf),
}

pub fn init_config() -> Result<InitOutcome> {
    let path = config_path()?;
    if path.exists() {
        return Ok(InitOutcome::AlreadyPresent(path));
    }
    write_config(&path, &Config::default())?;
    Ok(InitOutcome::Created(path))
}
