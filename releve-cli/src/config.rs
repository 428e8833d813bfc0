use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use releve_store::{Env, FsStore, HttpStore, ObjectStore};

use crate::session::ensure_releve_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreSection,
    /// Deployment environment folder inside the bucket: "prod" or "local".
    pub env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    /// "fs" or "http".
    pub backend: String,
    pub bucket: String,

    /// For backend = "fs": root directory (default: ~/.releve/store)
    pub root: Option<PathBuf>,
    /// For backend = "http": S3-compatible endpoint, e.g. "https://objects.example.net"
    pub endpoint: Option<String>,
    /// For backend = "http": optional bearer token
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreSection {
                backend: "fs".to_string(),
                bucket: "expense-tracker".to_string(),
                root: None,
                endpoint: None,
                token: None,
            },
            env: "local".to_string(),
        }
    }
}

impl Config {
    pub fn env(&self) -> Result<Env> {
        Ok(self.env.parse()?)
    }

    /// Build the configured store backend.
    pub fn open_store(&self) -> Result<Box<dyn ObjectStore>> {
        match self.store.backend.as_str() {
            "fs" => {
                let root = match &self.store.root {
                    Some(root) => root.clone(),
                    None => ensure_releve_home()?.join("store"),
                };
                Ok(Box::new(FsStore::new(root)))
            }
            "http" => {
                let endpoint = self
                    .store
                    .endpoint
                    .clone()
                    .context("store.endpoint is required for the http backend")?;
                Ok(Box::new(HttpStore::new(endpoint, self.store.token.clone())))
            }
            other => bail!("unknown store backend {other:?} (expected fs or http)"),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_releve_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}
