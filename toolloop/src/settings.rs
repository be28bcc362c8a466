//! Runtime settings read from the process environment.
//!
//! Callers load `.env` and the XDG `config.toml` first (see the `config` crate), then
//! call [`AgentSettings::from_env`] / [`QnaSettings::from_env`]. No variable is required.

use tracing::warn;

use crate::agent::{LoopConfig, Strategy, DEFAULT_MAX_ITERATIONS};
use crate::llm::{OllamaChat, DEFAULT_OLLAMA_HOST};
use crate::qna::{KnowledgeBaseClient, DEFAULT_QNA_ENDPOINT};

/// Settings for the agent demo.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSettings {
    /// Ollama base URL.
    pub ollama_host: String,
    /// Model name; `None` picks the strategy's default model.
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_iterations: usize,
    pub strategy: Strategy,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            model: None,
            temperature: Some(0.0),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            strategy: Strategy::default(),
        }
    }
}

impl AgentSettings {
    /// Reads `OLLAMA_HOST`, `TOOLLOOP_MODEL`, `TOOLLOOP_TEMPERATURE`,
    /// `TOOLLOOP_MAX_ITERATIONS` and `TOOLLOOP_STRATEGY`. Unparsable values are logged
    /// and replaced by the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            ollama_host: lookup("OLLAMA_HOST")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.ollama_host),
            model: lookup("TOOLLOOP_MODEL").filter(|s| !s.trim().is_empty()),
            temperature: parsed(&lookup, "TOOLLOOP_TEMPERATURE")
                .map(Some)
                .unwrap_or(defaults.temperature),
            max_iterations: parsed(&lookup, "TOOLLOOP_MAX_ITERATIONS")
                .unwrap_or(defaults.max_iterations),
            strategy: parsed(&lookup, "TOOLLOOP_STRATEGY").unwrap_or(defaults.strategy),
        }
    }

    /// Configured model, or the strategy's default.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.strategy.default_model())
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig::default()
            .with_max_iterations(self.max_iterations)
            .with_temperature(self.temperature)
    }

    /// Ollama client for the configured host, model and strategy.
    pub fn ollama_chat(&self) -> OllamaChat {
        OllamaChat::new(self.model())
            .with_base_url(self.ollama_host.clone())
            .with_arguments_encoding(self.strategy.arguments_encoding())
    }
}

/// Settings for the support bot.
#[derive(Clone, Debug, PartialEq)]
pub struct QnaSettings {
    pub endpoint: String,
    /// Subscription key; requests fail with `QnaError::MissingKey` without it.
    pub api_key: Option<String>,
}

impl Default for QnaSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_QNA_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

impl QnaSettings {
    /// Reads `QNA_ENDPOINT` and `LANGUAGE_QNA_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: lookup("QNA_ENDPOINT")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_QNA_ENDPOINT.to_string()),
            api_key: lookup("LANGUAGE_QNA_KEY").filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn client(&self) -> KnowledgeBaseClient {
        KnowledgeBaseClient::new(self.endpoint.clone(), self.api_key.clone())
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring invalid setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn agent_defaults_when_nothing_set() {
        let s = AgentSettings::from_lookup(lookup(&[]));
        assert_eq!(s, AgentSettings::default());
        assert_eq!(s.ollama_host, "http://localhost:11434");
        assert_eq!(s.strategy, Strategy::JsonArguments);
        assert_eq!(s.model(), "gpt-oss:20b");
        assert_eq!(s.loop_config().max_iterations, 10);
    }

    #[test]
    fn agent_reads_all_keys() {
        let s = AgentSettings::from_lookup(lookup(&[
            ("OLLAMA_HOST", "http://gpu-box:11434"),
            ("TOOLLOOP_MODEL", "llama3.1:8b"),
            ("TOOLLOOP_TEMPERATURE", "0.2"),
            ("TOOLLOOP_MAX_ITERATIONS", "4"),
            ("TOOLLOOP_STRATEGY", "react"),
        ]));
        assert_eq!(s.ollama_host, "http://gpu-box:11434");
        assert_eq!(s.model(), "llama3.1:8b");
        assert_eq!(s.temperature, Some(0.2));
        assert_eq!(s.max_iterations, 4);
        assert_eq!(s.strategy, Strategy::FreeText);
        assert_eq!(s.ollama_chat().model(), "llama3.1:8b");
    }

    #[test]
    fn free_text_strategy_defaults_to_small_model() {
        let s = AgentSettings::from_lookup(lookup(&[("TOOLLOOP_STRATEGY", "react")]));
        assert_eq!(s.model(), "qwen3:1.7b");
    }

    #[test]
    fn invalid_values_fall_back() {
        let s = AgentSettings::from_lookup(lookup(&[
            ("TOOLLOOP_MAX_ITERATIONS", "ten"),
            ("TOOLLOOP_STRATEGY", "xml"),
            ("TOOLLOOP_TEMPERATURE", "warm"),
        ]));
        assert_eq!(s.max_iterations, 10);
        assert_eq!(s.strategy, Strategy::JsonArguments);
        assert_eq!(s.temperature, Some(0.0));
    }

    #[test]
    fn qna_reads_endpoint_and_key() {
        let s = QnaSettings::from_lookup(lookup(&[]));
        assert_eq!(s.endpoint, DEFAULT_QNA_ENDPOINT);
        assert!(s.api_key.is_none());

        let s = QnaSettings::from_lookup(lookup(&[
            ("QNA_ENDPOINT", "http://localhost:9000/qna"),
            ("LANGUAGE_QNA_KEY", "secret"),
        ]));
        assert_eq!(s.endpoint, "http://localhost:9000/qna");
        assert_eq!(s.api_key.as_deref(), Some("secret"));
    }
}
