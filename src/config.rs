use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub app_base_url: String,
    // OpenRouter (optional — the assistant degrades gracefully without it)
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub assistant_model: String,
    pub assistant_max_tokens: u32,
    pub assistant_rate_limit_per_hour: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
            jwt_secret: required("JWT_SECRET")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost".into()),
            openrouter_api_key: env::var("OPENROUTER_API_KEY").ok().filter(|s| !s.is_empty()),
            openrouter_base_url: env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".into()),
            assistant_model: env::var("ASSISTANT_MODEL")
                .unwrap_or_else(|_| "deepseek/deepseek-chat".into()),
            assistant_max_tokens: env::var("ASSISTANT_MAX_TOKENS")
                .unwrap_or_else(|_| "800".into())
                .parse()?,
            assistant_rate_limit_per_hour: env::var("ASSISTANT_RATE_LIMIT_PER_HOUR")
                .unwrap_or_else(|_| "30".into())
                .parse()?,
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}
