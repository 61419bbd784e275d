use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotemindConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub llm: LlmConfig,
    pub context: ContextConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub transcription_model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ContextConfig {
    pub max_context_chars: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UploadConfig {
    pub max_audio_bytes: usize,
}

impl Default for NotemindConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            llm: LlmConfig::default(),
            context: ContextConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_notemind_dir()
            .join("notes.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            base_url: "https://api.openai.com/v1".into(),
            api_key: String::new(),
            chat_model: "gpt-4o-mini".into(),
            transcription_model: "whisper-1".into(),
            max_output_tokens: 500,
            temperature: 0.2,
            request_timeout_secs: 60,
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_context_chars: 3000,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            // Whisper rejects uploads above 25 MiB.
            max_audio_bytes: 25 * 1024 * 1024,
        }
    }
}

/// Returns `~/.notemind/`, or `./.notemind/` when no home directory is known.
pub fn default_notemind_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".notemind")
}

/// Returns the default config file path: `~/.notemind/config.toml`
pub fn default_config_path() -> PathBuf {
    default_notemind_dir().join("config.toml")
}

impl NotemindConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            NotemindConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// `NOTEMIND_DB`, `NOTEMIND_LOG_LEVEL`, `NOTEMIND_HOST`, `NOTEMIND_PORT`,
    /// `OPENAI_API_KEY`, `OPENAI_BASE_URL`.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("NOTEMIND_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("NOTEMIND_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("NOTEMIND_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("NOTEMIND_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid NOTEMIND_PORT"),
            }
        }
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            self.llm.api_key = val;
        }
        if let Ok(val) = std::env::var("OPENAI_BASE_URL") {
            self.llm.base_url = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    /// `host:port` the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
