use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use url::Url;

use crate::proxy::{self, ProxyConfigError, ProxyRule};
use crate::routes;

pub const API_BASE_URL_VAR: &str = "VITE_API_BASE_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: String,
    pub proxy: ProxyRule,
    pub service_port: u16,
    pub service_host: String,
    pub static_dir: PathBuf,
    pub source_root: PathBuf,
}

impl Config {
    /// Load configuration for the current process
    ///
    /// Env files for the mode are read from the working directory first;
    /// real environment variables take priority over anything in them.
    pub fn from_env() -> Result<Self> {
        let mode = env::var("MODE").unwrap_or_else(|_| "development".to_string());
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let file_vars = load_env_files(&mode, &cwd)?;

        Self::from_lookup(|key| env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mode = lookup("MODE").unwrap_or_else(|| "development".to_string());

        let target = proxy::parse_target(API_BASE_URL_VAR, lookup(API_BASE_URL_VAR))?;

        let prefix = lookup("API_PROXY_PREFIX").unwrap_or_else(|| proxy::DEFAULT_PREFIX.to_string());

        let change_origin = match lookup("API_PROXY_CHANGE_ORIGIN") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("API_PROXY_CHANGE_ORIGIN must be a boolean, got '{}'", raw))?,
            None => true,
        };

        let proxy = ProxyRule::new(prefix, target, change_origin)?;
        if let Some(endpoint) = routes::shadowed_endpoint(proxy.match_prefix()) {
            return Err(ProxyConfigError::ShadowsEndpoint {
                prefix: proxy.match_prefix().to_string(),
                endpoint,
            }
            .into());
        }

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let static_dir = PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| "dist".to_string()));
        let source_root = PathBuf::from(lookup("SOURCE_ROOT").unwrap_or_else(|| "src".to_string()));

        Ok(Config {
            mode,
            proxy,
            service_port,
            service_host,
            static_dir,
            source_root,
        })
    }

    pub fn api_target(&self) -> &Url {
        self.proxy.target_origin()
    }

    /// Expand the `@` source alias; other paths are returned unchanged
    pub fn resolve_alias(&self, module: &str) -> PathBuf {
        match module.strip_prefix("@/") {
            Some(rest) => self.source_root.join(rest),
            None if module == "@" => self.source_root.clone(),
            None => PathBuf::from(module),
        }
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Mode: {}", self.mode);
        tracing::info!("  API proxy: {} -> {}", self.proxy.match_prefix(), self.api_target());
        tracing::info!("  Change origin: {}", self.proxy.change_origin());
        tracing::info!("  Static dir: {}", self.static_dir.display());
        tracing::info!("  Source root (@): {}", self.source_root.display());
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Env files for a mode, lowest priority first
fn env_files(mode: &str) -> [String; 4] {
    [
        ".env".to_string(),
        ".env.local".to_string(),
        format!(".env.{mode}"),
        format!(".env.{mode}.local"),
    ]
}

/// Read the env files for `mode` in `dir` without touching the process env
///
/// Later files override earlier ones. Missing files are skipped, unreadable
/// or malformed ones are an error.
pub fn load_env_files(mode: &str, dir: &Path) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();

    for name in env_files(mode) {
        let path = dir.join(&name);
        if !path.is_file() {
            continue;
        }

        let iter = dotenvy::from_path_iter(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        for item in iter {
            let (key, value) = item.with_context(|| format!("Failed to parse {}", path.display()))?;
            vars.insert(key, value);
        }
        tracing::debug!("Loaded env file {}", path.display());
    }

    Ok(vars)
}
