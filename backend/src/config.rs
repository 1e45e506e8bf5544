//! Process configuration read from `TERMO_*` environment variables.
//!
//! Every setting has a default so the server starts with no environment at
//! all; a value that fails to parse is ignored with a warning.

use crate::pipeline::compose::PaginationStrategy;
use log::warn;
use std::path::PathBuf;

pub const ENV_HOST: &str = "TERMO_HOST";
pub const ENV_PORT: &str = "TERMO_PORT";
pub const ENV_DATABASE: &str = "TERMO_DATABASE";
pub const ENV_TEMPLATES_DIR: &str = "TERMO_TEMPLATES_DIR";
pub const ENV_ASSETS_DIR: &str = "TERMO_ASSETS_DIR";
pub const ENV_HEADER_IMAGE: &str = "TERMO_HEADER_IMAGE";
pub const ENV_FOOTER_IMAGE: &str = "TERMO_FOOTER_IMAGE";
pub const ENV_PAGINATION: &str = "TERMO_PAGINATION";
pub const ENV_MAX_ATTACHMENT_BYTES: &str = "TERMO_MAX_ATTACHMENT_BYTES";
pub const ENV_CHROME_PATH: &str = "TERMO_CHROME_PATH";

/// 10 MiB, the same ceiling the server applies to JSON payloads.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file holding the `documentos` and `condominios` tables.
    pub database: PathBuf,
    pub templates_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub header_image: String,
    pub footer_image: String,
    pub pagination: PaginationStrategy,
    pub max_attachment_bytes: usize,
    pub chrome_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database: PathBuf::from("termosign.sqlite"),
            templates_dir: PathBuf::from("./templates"),
            assets_dir: PathBuf::from("."),
            header_image: "cabecalho.png".to_string(),
            footer_image: "rodape.png".to_string(),
            pagination: PaginationStrategy::table_flow(),
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            chrome_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!("Ignoring invalid {}: {}", ENV_PORT, port),
            }
        }
        if let Some(path) = lookup(ENV_DATABASE) {
            self.database = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_TEMPLATES_DIR) {
            self.templates_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_ASSETS_DIR) {
            self.assets_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup(ENV_HEADER_IMAGE) {
            self.header_image = name;
        }
        if let Some(name) = lookup(ENV_FOOTER_IMAGE) {
            self.footer_image = name;
        }
        if let Some(mode) = lookup(ENV_PAGINATION) {
            match mode.parse() {
                Ok(strategy) => self.pagination = strategy,
                Err(e) => warn!("Ignoring {}: {}", ENV_PAGINATION, e),
            }
        }
        if let Some(limit) = lookup(ENV_MAX_ATTACHMENT_BYTES) {
            match limit.parse() {
                Ok(limit) => self.max_attachment_bytes = limit,
                Err(_) => warn!("Ignoring invalid {}: {}", ENV_MAX_ATTACHMENT_BYTES, limit),
            }
        }
        if let Some(path) = lookup(ENV_CHROME_PATH).filter(|p| !p.is_empty()) {
            self.chrome_path = Some(PathBuf::from(path));
        }
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
