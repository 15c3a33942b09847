//! Bot configuration loaded from the environment: Telegram access, the two distribution
//! channels, template file, logging, and timeouts.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Full bot configuration.
#[derive(Debug, Clone)]
pub struct RepostConfig {
    /// BOT_TOKEN (or API_TOKEN)
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// CHANNEL_RELEASE_ID
    pub release_channel_id: i64,
    /// CHANNEL_RESERVE_ID
    pub reserve_channel_id: i64,
    /// TEMPLATES_FILE
    pub templates_file: String,
    /// LOG_FILE
    pub log_file: String,
    /// SEND_TIMEOUT_SECS: bound on each video send to a channel
    pub send_timeout_secs: u64,
    /// PERSIST_TIMEOUT_SECS: bound on each template file write
    pub persist_timeout_secs: u64,
    /// SESSION_IDLE_SECS: unfinished flows older than this fall back to idle; 0 disables
    pub session_idle_secs: u64,
}

fn required_i64(name: &str) -> Result<i64> {
    let raw = env::var(name).map_err(|_| anyhow::anyhow!("{} not set", name))?;
    raw.trim()
        .parse()
        .with_context(|| format!("{} must be an integer chat id, got {:?}", name, raw))
}

fn optional_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl RepostConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN if provided.
    /// BOT_TOKEN (or API_TOKEN), CHANNEL_RELEASE_ID and CHANNEL_RESERVE_ID are required.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("API_TOKEN"))
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let release_channel_id = required_i64("CHANNEL_RELEASE_ID")?;
        let reserve_channel_id = required_i64("CHANNEL_RESERVE_ID")?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let templates_file =
            env::var("TEMPLATES_FILE").unwrap_or_else(|_| "templates.json".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/repost-bot.log".to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            release_channel_id,
            reserve_channel_id,
            templates_file,
            log_file,
            send_timeout_secs: optional_u64("SEND_TIMEOUT_SECS", 60),
            persist_timeout_secs: optional_u64("PERSIST_TIMEOUT_SECS", 10),
            session_idle_secs: optional_u64("SESSION_IDLE_SECS", 3600),
        })
    }

    /// Validates config (e.g. telegram_api_url must be a valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    pub fn persist_timeout(&self) -> Duration {
        Duration::from_secs(self.persist_timeout_secs)
    }

    /// `None` when expiry is disabled.
    pub fn session_idle(&self) -> Option<Duration> {
        (self.session_idle_secs > 0).then(|| Duration::from_secs(self.session_idle_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 11] = [
        "BOT_TOKEN",
        "API_TOKEN",
        "CHANNEL_RELEASE_ID",
        "CHANNEL_RESERVE_ID",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "TEMPLATES_FILE",
        "LOG_FILE",
        "SEND_TIMEOUT_SECS",
        "PERSIST_TIMEOUT_SECS",
        "SESSION_IDLE_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_with_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");
        env::set_var("CHANNEL_RELEASE_ID", "-1001");
        env::set_var("CHANNEL_RESERVE_ID", " -1002 ");

        let config = RepostConfig::from_env(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.release_channel_id, -1001);
        assert_eq!(config.reserve_channel_id, -1002);
        assert!(config.telegram_api_url.is_none());
        assert_eq!(config.templates_file, "templates.json");
        assert_eq!(config.log_file, "logs/repost-bot.log");
        assert_eq!(config.send_timeout(), Duration::from_secs(60));
        assert_eq!(config.persist_timeout(), Duration::from_secs(10));
        assert_eq!(config.session_idle(), Some(Duration::from_secs(3600)));
        assert!(config.validate().is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_with_custom_values() {
        clear_env();
        env::set_var("API_TOKEN", "legacy_token");
        env::set_var("CHANNEL_RELEASE_ID", "1");
        env::set_var("CHANNEL_RESERVE_ID", "2");
        env::set_var("TEMPLATES_FILE", "/data/templates.json");
        env::set_var("SEND_TIMEOUT_SECS", "5");
        env::set_var("SESSION_IDLE_SECS", "0");

        let config = RepostConfig::from_env(None).unwrap();

        assert_eq!(config.bot_token, "legacy_token");
        assert_eq!(config.templates_file, "/data/templates.json");
        assert_eq!(config.send_timeout(), Duration::from_secs(5));
        assert_eq!(config.session_idle(), None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_token_argument_overrides_env() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");
        env::set_var("CHANNEL_RELEASE_ID", "1");
        env::set_var("CHANNEL_RESERVE_ID", "2");

        let config = RepostConfig::from_env(Some("cli_token".to_string())).unwrap();
        assert_eq!(config.bot_token, "cli_token");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_required_values_fail() {
        clear_env();
        env::set_var("CHANNEL_RELEASE_ID", "1");
        env::set_var("CHANNEL_RESERVE_ID", "2");
        assert!(RepostConfig::from_env(None).is_err());

        env::set_var("BOT_TOKEN", "t");
        env::remove_var("CHANNEL_RESERVE_ID");
        let err = RepostConfig::from_env(None).unwrap_err();
        assert!(err.to_string().contains("CHANNEL_RESERVE_ID"));

        env::set_var("CHANNEL_RESERVE_ID", "@channel");
        let err = RepostConfig::from_env(None).unwrap_err();
        assert!(err.to_string().contains("CHANNEL_RESERVE_ID"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_api_url_fails_validation() {
        clear_env();
        env::set_var("BOT_TOKEN", "t");
        env::set_var("CHANNEL_RELEASE_ID", "1");
        env::set_var("CHANNEL_RESERVE_ID", "2");
        env::set_var("TELEGRAM_API_URL", "not a url");

        let config = RepostConfig::from_env(None).unwrap();
        assert!(config.validate().is_err());
        clear_env();
    }
}
