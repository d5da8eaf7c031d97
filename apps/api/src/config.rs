use anyhow::{Context, Result};

const DEFAULT_VISION_PROMPT: &str =
    "Read all the text in this image and give it back into JSON format.";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub run_migrations: bool,
    pub llm: LlmConfig,
    pub pdf: PdfConfig,
    /// `None` unless every S3 variable is set.
    pub s3: Option<S3Config>,
}

/// Settings for the OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub vision_model: String,
    pub vision_prompt: String,
    pub seed: i64,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone)]
pub struct PdfConfig {
    pub pdftoppm_path: String,
    pub render_dpi: u32,
    /// Upper bound on vision calls in flight for one PDF.
    pub parallel_tasks: usize,
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let parallel_tasks: usize = parse_env("PARALLEL_TASKS", 20)?;
        if parallel_tasks == 0 {
            anyhow::bail!("PARALLEL_TASKS must be at least 1");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            host: optional_env("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            run_migrations: parse_env("RUN_MIGRATIONS", true)?,
            llm: LlmConfig {
                api_key: require_env("OPENAI_API_KEY")?,
                base_url: optional_env("OPENAI_BASE_URL")
                    .unwrap_or_else(|| "https://api.openai.com".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                model: optional_env("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
                vision_model: optional_env("VISION_MODEL")
                    .unwrap_or_else(|| "gpt-4o".to_string()),
                vision_prompt: optional_env("VISION_PROMPT")
                    .unwrap_or_else(|| DEFAULT_VISION_PROMPT.to_string()),
                seed: parse_env("LLM_SEED", 12345)?,
                temperature: parse_env("LLM_TEMPERATURE", 0.0)?,
                max_tokens: parse_env("LLM_MAX_TOKENS", 4096)?,
                timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
                max_retries: parse_env("LLM_MAX_RETRIES", 0)?,
            },
            pdf: PdfConfig {
                pdftoppm_path: optional_env("PDFTOPPM_PATH")
                    .unwrap_or_else(|| "pdftoppm".to_string()),
                render_dpi: parse_env("PDF_RENDER_DPI", 200)?,
                parallel_tasks,
            },
            s3: s3_from_env(),
        })
    }
}

impl LlmConfig {
    pub fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

fn s3_from_env() -> Option<S3Config> {
    Some(S3Config {
        bucket: optional_env("S3_BUCKET")?,
        endpoint: optional_env("S3_ENDPOINT")?,
        access_key_id: optional_env("AWS_ACCESS_KEY_ID")?,
        secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY")?,
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_completions_url_joins_base() {
        let llm = LlmConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:9999".to_string(),
            model: "m".to_string(),
            vision_model: "v".to_string(),
            vision_prompt: DEFAULT_VISION_PROMPT.to_string(),
            seed: 1,
            temperature: 0.0,
            max_tokens: 16,
            timeout_secs: 5,
            max_retries: 0,
        };
        assert_eq!(
            llm.chat_completions_url(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: u32 = parse_env("CV_COPILOT_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
