use anyhow::{Context, Result};
use inflow_providers::{DEFAULT_DAYS, ProviderSettings, TOKEN_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerSection,
    pub providers: ProvidersSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub port: u16,
    /// Browser origin allowed by CORS
    pub frontend_origin: String,
    /// Lookback window when the request does not pass ?days=
    pub default_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersSection {
    pub provider_a_base_url: String,
    pub provider_a_token: String,
    pub provider_b_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerSection {
                port: 8000,
                frontend_origin: "http://localhost:3000".to_string(),
                default_days: DEFAULT_DAYS,
            },
            providers: ProvidersSection {
                provider_a_base_url: "https://api.payments.example".to_string(),
                provider_a_token: TOKEN_PLACEHOLDER.to_string(),
                provider_b_token: TOKEN_PLACEHOLDER.to_string(),
            },
        }
    }
}

impl Config {
    /// Connection settings for the provider clients, with environment
    /// overrides applied (`PROVIDER_A_TOKEN`, `PROVIDER_B_TOKEN`).
    pub fn provider_settings(&self) -> ProviderSettings {
        let env = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        ProviderSettings {
            payments_base_url: self.providers.provider_a_base_url.clone(),
            payments_token: env("PROVIDER_A_TOKEN")
                .or_else(|| Some(self.providers.provider_a_token.clone())),
            bank_token: env("PROVIDER_B_TOKEN")
                .or_else(|| Some(self.providers.provider_b_token.clone())),
        }
    }
}

pub fn inflow_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".inflow"))
}

pub fn ensure_inflow_home() -> Result<PathBuf> {
    let dir = inflow_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_inflow_home()?.join("config.toml"))
}

/// Load the config at `path` (or the default location), falling back to
/// defaults when no file exists yet.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.default_days, 30);
        assert_eq!(cfg.providers.provider_a_token, TOKEN_PLACEHOLDER);
    }

    #[test]
    fn test_toml_roundtrip() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.server.port, cfg.server.port);
        assert_eq!(back.providers.provider_a_base_url, cfg.providers.provider_a_base_url);
    }
}
