// src/services/relay.rs
use std::{sync::Arc, time::Duration};

use reqwest::Client;
use tracing::{debug, error};

use crate::{
    config::{Config, ProviderKind},
    error::AppError,
    services::{
        prompt::SystemPrompt,
        providers::{
            CompletionProvider, CompletionRequest, DeepSeekProvider, GeminiProvider, ProviderError,
        },
    },
};

pub const FALLBACK_UPSTREAM: &str =
    "Hubo un problema al conectar con la IA. Intenta de nuevo más tarde.";
pub const FALLBACK_NO_REPLY: &str = "Lo siento, no pude generar una respuesta en este momento.";
pub const FALLBACK_INTERNAL: &str =
    "Ocurrió un error interno al procesar tu pregunta. Intenta más tarde.";

#[derive(Clone)]
enum Backend {
    Ready(Arc<dyn CompletionProvider>),
    Unconfigured { missing_key: &'static str },
}

/// Turns one user message into one upstream call and a reply for the widget.
#[derive(Clone)]
pub struct ChatRelay {
    backend: Backend,
    prompt: SystemPrompt,
    timeout: Duration,
}

impl ChatRelay {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self {
            backend: Backend::Ready(provider),
            prompt: SystemPrompt::default(),
            timeout,
        }
    }

    /// A relay that answers every message with `AppError::Unconfigured`.
    pub fn unconfigured(missing_key: &'static str) -> Self {
        Self {
            backend: Backend::Unconfigured { missing_key },
            prompt: SystemPrompt::default(),
            timeout: Duration::ZERO,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let settings = &config.provider;
        let Some(api_key) = settings.api_key.clone() else {
            return Self::unconfigured(settings.kind.key_var());
        };

        let client = Client::new();
        let provider: Arc<dyn CompletionProvider> = match settings.kind {
            ProviderKind::Gemini => Arc::new(GeminiProvider::new(
                client,
                settings.base_url.clone(),
                settings.model.clone(),
                api_key,
            )),
            ProviderKind::DeepSeek => Arc::new(DeepSeekProvider::new(
                client,
                settings.base_url.clone(),
                settings.model.clone(),
                api_key,
            )),
        };

        Self::new(provider, config.upstream_timeout)
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    /// Upstream and parse failures become fallback text; only a missing
    /// credential comes back as an error.
    pub async fn reply(&self, message: &str) -> Result<String, AppError> {
        let provider = match &self.backend {
            Backend::Ready(provider) => provider,
            Backend::Unconfigured { missing_key } => {
                error!(missing_key, "chat request rejected: API key not configured");
                return Err(AppError::Unconfigured(*missing_key));
            }
        };

        let request = CompletionRequest {
            system: self.prompt.text(),
            user: message,
        };

        let outcome = tokio::time::timeout(self.timeout, provider.complete(&request))
            .await
            .unwrap_or_else(|_| Err(ProviderError::Timeout(self.timeout)));

        match outcome {
            Ok(text) => Ok(text),
            Err(ProviderError::MissingReply) => {
                debug!(provider = provider.name(), "no reply text in upstream response");
                Ok(FALLBACK_NO_REPLY.to_string())
            }
            Err(err) => {
                error!(provider = provider.name(), error = %err, "upstream call failed");
                Ok(FALLBACK_UPSTREAM.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Script {
        Reply(&'static str),
        Fail(u16),
        Empty,
        Hang,
    }

    struct ScriptedProvider {
        script: Script,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(request.system.starts_with("Eres el asistente cristiano"));
            match self.script {
                Script::Reply(text) => Ok(format!("{text} ({})", request.user)),
                Script::Fail(status) => Err(ProviderError::Status {
                    status,
                    body: r#"{"error":{"message":"overloaded"}}"#.to_string(),
                }),
                Script::Empty => Err(ProviderError::MissingReply),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    fn relay(provider: Arc<ScriptedProvider>) -> ChatRelay {
        ChatRelay::new(provider, Duration::from_millis(50))
    }

    #[tokio::test]
    async fn passes_reply_through() {
        let provider = ScriptedProvider::new(Script::Reply("Paz"));
        let reply = relay(provider.clone()).reply("hola").await.unwrap();
        assert_eq!(reply, "Paz (hola)");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upstream_status_becomes_fallback() {
        let provider = ScriptedProvider::new(Script::Fail(503));
        let reply = relay(provider.clone()).reply("hola").await.unwrap();
        assert_eq!(reply, FALLBACK_UPSTREAM);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_reply_has_its_own_fallback() {
        let reply = relay(ScriptedProvider::new(Script::Empty))
            .reply("hola")
            .await
            .unwrap();
        assert_eq!(reply, FALLBACK_NO_REPLY);
    }

    #[tokio::test]
    async fn slow_upstream_times_out_into_fallback() {
        let provider = ScriptedProvider::new(Script::Hang);
        let reply = relay(provider.clone()).reply("hola").await.unwrap();
        assert_eq!(reply, FALLBACK_UPSTREAM);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unconfigured_relay_is_an_error() {
        let relay = ChatRelay::unconfigured("GEMINI_API_KEY");
        assert!(!relay.is_configured());
        let err = relay.reply("hola").await.unwrap_err();
        assert!(matches!(err, AppError::Unconfigured("GEMINI_API_KEY")));
    }

    #[test]
    fn config_without_key_builds_unconfigured_relay() {
        let config = Config::from_lookup(|key| match key {
            "LLM_PROVIDER" => Some("deepseek".to_string()),
            _ => None,
        })
        .unwrap();
        let relay = ChatRelay::from_config(&config);
        assert!(!relay.is_configured());
        assert!(matches!(
            relay.backend,
            Backend::Unconfigured {
                missing_key: "DEEPSEEK_API_KEY"
            }
        ));
    }
}
