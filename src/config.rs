use std::time::Duration;

/// Which record store backs the running server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Runtime configuration, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub store: StoreBackend,
    pub session_key: Option<String>,
    pub app_url: String,
    pub http_timeout: Duration,
    pub llm: LlmSettings,
    pub smtp: SmtpSettings,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub from: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "llama3-70b-8192".to_string(),
            max_tokens: 512,
            temperature: 0.2,
        }
    }
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            user: None,
            pass: None,
            from: "\"CRM App\" <noreply@localhost>".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            database_url: "postgres://localhost/crm".to_string(),
            store: StoreBackend::Postgres,
            session_key: None,
            app_url: "http://localhost:8080".to_string(),
            http_timeout: Duration::from_secs(30),
            llm: LlmSettings::default(),
            smtp: SmtpSettings::default(),
        }
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    match var(name) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparseable {name}={raw}");
            default
        }),
        None => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let store = match var("CRM_STORE").as_deref() {
            Some("memory") => StoreBackend::Memory,
            Some("postgres") | None => StoreBackend::Postgres,
            Some(other) => {
                log::warn!("Unknown CRM_STORE '{other}', falling back to postgres");
                StoreBackend::Postgres
            }
        };

        let llm_defaults = LlmSettings::default();
        let smtp_defaults = SmtpSettings::default();

        Self {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            store,
            session_key: var("SESSION_KEY"),
            app_url: var("APP_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.app_url),
            http_timeout: Duration::from_secs(parsed("HTTP_TIMEOUT_SECS", 30)),
            llm: LlmSettings {
                api_url: var("LLM_API_URL").unwrap_or(llm_defaults.api_url),
                api_key: var("LLM_API_KEY").unwrap_or_default(),
                model: var("LLM_MODEL").unwrap_or(llm_defaults.model),
                max_tokens: parsed("LLM_MAX_TOKENS", llm_defaults.max_tokens),
                temperature: parsed("LLM_TEMPERATURE", llm_defaults.temperature),
            },
            smtp: SmtpSettings {
                host: var("SMTP_HOST").unwrap_or(smtp_defaults.host),
                port: parsed("SMTP_PORT", smtp_defaults.port),
                user: var("SMTP_USER"),
                pass: var("SMTP_PASS"),
                from: var("SMTP_FROM").unwrap_or(smtp_defaults.from),
            },
        }
    }

    /// Registration link embedded in invitation emails.
    pub fn invite_url(&self, token: &str) -> String {
        format!("{}/register?invite={}", self.app_url, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_url_embeds_token() {
        let config = Config { app_url: "http://localhost:3000".into(), ..Config::default() };
        assert_eq!(config.invite_url("abc123"), "http://localhost:3000/register?invite=abc123");
    }

    #[test]
    fn llm_defaults_match_assistant_parameters() {
        let llm = LlmSettings::default();
        assert_eq!(llm.max_tokens, 512);
        assert!((llm.temperature - 0.2).abs() < f32::EPSILON);
    }
}
