use service_core::config::{self as core_config, get_env};
use service_core::error::AppError;

/// Model queries are forwarded to unless overridden by environment.
const DEFAULT_TARGET_MODEL: &str = "models/chat-bison-001";

/// Kept at 1 for compatibility with older models like Bison.
const DEFAULT_CANDIDATE_COUNT: i32 = 1;

#[derive(Debug, Clone)]
pub struct AskaiConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Desired model identifier, matched against the provider catalog at startup.
    pub target_model: String,
    /// Candidates requested per generation.
    pub candidate_count: i32,
}

impl AskaiConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(AskaiConfig {
            common,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None)?,
            },
            models: ModelConfig {
                target_model: get_env("ASKAI_TARGET_MODEL", Some(DEFAULT_TARGET_MODEL))?,
                candidate_count: get_env(
                    "ASKAI_CANDIDATE_COUNT",
                    Some(&DEFAULT_CANDIDATE_COUNT.to_string()),
                )?
                .parse()
                .unwrap_or(DEFAULT_CANDIDATE_COUNT)
                .max(1),
            },
        })
    }
}
