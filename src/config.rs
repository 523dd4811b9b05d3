use stepgraph_core::{ChatCompletionRequestOptions, RunConfig, DEFAULT_MAX_HOPS};
use thiserror::Error;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "STEPGRAPH_MODEL";
pub const TEMPERATURE_VAR: &str = "STEPGRAPH_TEMPERATURE";
pub const MAX_HOPS_VAR: &str = "STEPGRAPH_MAX_HOPS";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Runtime settings for the tutorial driver
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_hops: usize,
}

impl Settings {
    /// Read settings from the process environment, after loading `.env` if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ChatCompletionRequestOptions::default();

        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let model = lookup(MODEL_VAR).unwrap_or(defaults.model);
        let temperature = match lookup(TEMPERATURE_VAR) {
            Some(raw) => parse(TEMPERATURE_VAR, raw)?,
            None => defaults.temperature.unwrap_or(0.7),
        };
        let max_hops = match lookup(MAX_HOPS_VAR) {
            Some(raw) => parse(MAX_HOPS_VAR, raw)?,
            None => DEFAULT_MAX_HOPS,
        };

        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid {
                key: TEMPERATURE_VAR,
                value: temperature.to_string(),
                message: "must be between 0 and 2".to_string(),
            });
        }
        if max_hops == 0 {
            return Err(ConfigError::Invalid {
                key: MAX_HOPS_VAR,
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            api_key,
            model,
            temperature,
            max_hops,
        })
    }

    pub fn chat_options(&self) -> ChatCompletionRequestOptions {
        ChatCompletionRequestOptions {
            model: self.model.clone(),
            temperature: Some(self.temperature),
        }
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig::default().with_max_hops(self.max_hops)
    }
}

fn parse<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: e.to_string(),
        value: raw,
    })
}
