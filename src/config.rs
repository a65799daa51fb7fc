// src/config.rs
use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, bail};

use crate::services::providers::{deepseek, gemini};

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    DeepSeek,
}

impl ProviderKind {
    /// Environment variable holding this provider's credential.
    pub fn key_var(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            other => bail!("unknown LLM_PROVIDER {other:?} (expected \"gemini\" or \"deepseek\")"),
        }
    }
}

#[derive(Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

// Keeps the key out of logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub static_dir: PathBuf,
    pub upstream_timeout: Duration,
    pub provider: ProviderConfig,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values behave like unset ones.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid UPSTREAM_TIMEOUT_SECS {raw:?}"))?;
                if secs == 0 {
                    bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_UPSTREAM_TIMEOUT,
        };

        let kind = match get("LLM_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => ProviderKind::Gemini,
        };

        let (model, base_url) = match kind {
            ProviderKind::Gemini => (
                get("GEMINI_MODEL").unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
                get("GEMINI_API_BASE").unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string()),
            ),
            ProviderKind::DeepSeek => (
                get("DEEPSEEK_MODEL").unwrap_or_else(|| deepseek::DEFAULT_MODEL.to_string()),
                get("DEEPSEEK_API_BASE").unwrap_or_else(|| deepseek::DEFAULT_BASE_URL.to_string()),
            ),
        };

        Ok(Self {
            port,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            upstream_timeout,
            provider: ProviderConfig {
                kind,
                api_key: get(kind.key_var()).map(|k| k.trim().to_string()),
                model,
                base_url,
            },
        })
    }
}
