use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

pub const DEFAULT_STOCK_SYMBOLS: &str = "005930.KS,000660.KS,AAPL,NVDA,TSLA";
pub const DEFAULT_QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";
pub const DEFAULT_MAIL_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    /// Minutes east of UTC. Day/week/month boundaries are cut in this zone.
    pub utc_offset_minutes: i32,
    pub mail: MailConfig,
    pub verification: VerificationConfig,
    pub stocks: StockConfig,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    /// `None` puts mail in log-only mode.
    pub resend_key: Option<String>,
    pub endpoint: String,
    pub from: String,
}

#[derive(Clone, Debug)]
pub struct VerificationConfig {
    pub ttl_minutes: i64,
    pub resend_cooldown_secs: i64,
}

#[derive(Clone, Debug)]
pub struct StockConfig {
    pub symbols: Vec<String>,
    pub quote_url: String,
    pub ttl_secs: u64,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    fn get_env_or<T: FromStr>(key: &str, default: T) -> T
    where
        T::Err: Display,
    {
        match env::var(key) {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Invalid {key} value ({e}), using default");
                default
            }),
            Err(_) => default,
        }
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let db_url: String = Self::get_env("DATABASE_URL");
        let resend_key = env::var("RESEND_KEY").ok().filter(|k| !k.trim().is_empty());
        if resend_key.is_none() {
            warn!("RESEND_KEY not set, outgoing mail will only be logged");
        }

        EnvConfig {
            port: Self::get_env_or("PORT", 8080),
            db_url,
            utc_offset_minutes: Self::get_env_or("UTC_OFFSET_MINUTES", 9 * 60),
            mail: MailConfig {
                resend_key,
                endpoint: Self::get_env_or("MAIL_ENDPOINT", DEFAULT_MAIL_ENDPOINT.to_string()),
                from: Self::get_env_or("MAIL_FROM", "noreply@patience-lion.app".to_string()),
            },
            verification: VerificationConfig {
                ttl_minutes: Self::get_env_or("VERIFICATION_CODE_TTL_MINUTES", 10),
                resend_cooldown_secs: Self::get_env_or("VERIFICATION_RESEND_COOLDOWN_SECS", 60),
            },
            stocks: StockConfig {
                symbols: parse_symbols(&Self::get_env_or("STOCK_SYMBOLS", DEFAULT_STOCK_SYMBOLS.to_string())),
                quote_url: Self::get_env_or("STOCK_QUOTE_URL", DEFAULT_QUOTE_URL.to_string()),
                ttl_secs: clamp_stock_ttl(Self::get_env_or("STOCK_CACHE_TTL_SECS", 600)),
            },
        }
    }

    /// Falls back to UTC when the configured offset is out of range.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| {
            warn!("UTC_OFFSET_MINUTES={} out of range, using UTC", self.utc_offset_minutes);
            Utc.fix()
        })
    }
}

pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Stock quotes are memoized for five to ten minutes.
pub fn clamp_stock_ttl(secs: u64) -> u64 {
    secs.clamp(300, 600)
}

pub static CONFIG: OnceLock<EnvConfig> = OnceLock::new();

pub fn config() -> &'static EnvConfig {
    CONFIG.get().expect("Not initialized")
}
