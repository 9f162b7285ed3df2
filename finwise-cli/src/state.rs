use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$FINWISE_HOME`, or `~/.finwise`
pub fn finwise_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FINWISE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".finwise"))
}

pub fn ensure_finwise_home() -> Result<PathBuf> {
    let dir = finwise_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
