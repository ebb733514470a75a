use chrono_tz::Tz;
use mediscan_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign and verify the json web tokens of `User`s
    pub jwt_secret: String,
    /// Timezone in which the clock times of `Reminder`s and the monthly
    /// vitals reminder are evaluated
    pub reminder_timezone: Tz,
    /// Seconds between two scans of the active `Reminder`s
    pub reminder_tick_secs: u64,
    /// Documents with less text than this are not worth extracting events from
    pub min_extraction_text_len: usize,
    /// Notifications are only recorded in logs when this is missing
    pub smtp: Option<SmtpConfig>,
}

const DEFAULT_TICK_SECS: u64 = 10;

/// Every minute needs at least one tick, otherwise slots scheduled
/// for the skipped minutes never fire
fn valid_tick_secs(tick_secs: u64) -> u64 {
    if tick_secs == 0 || tick_secs >= 60 {
        warn!(
            "REMINDER_TICK_SECS must be between 1 and 59, got {}. Falling back to {}.",
            tick_secs, DEFAULT_TICK_SECS
        );
        return DEFAULT_TICK_SECS;
    }
    tick_secs
}

fn parse_env_or<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET environment variable. Going to create one.");
                create_random_secret(32)
            }
        };

        let reminder_timezone = match std::env::var("REMINDER_TIMEZONE") {
            Ok(tz) => tz.parse::<Tz>().unwrap_or_else(|_| {
                warn!(
                    "The given REMINDER_TIMEZONE: {} is not a valid IANA timezone, falling back to UTC.",
                    tz
                );
                Tz::UTC
            }),
            Err(_) => Tz::UTC,
        };

        let reminder_tick_secs =
            valid_tick_secs(parse_env_or("REMINDER_TICK_SECS", DEFAULT_TICK_SECS));

        let smtp = match (std::env::var("EMAIL_USER"), std::env::var("EMAIL_PASS")) {
            (Ok(user), Ok(password)) => Some(SmtpConfig {
                host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
                port: parse_env_or("SMTP_PORT", 587),
                user,
                password,
            }),
            _ => {
                warn!("EMAIL_USER and EMAIL_PASS are not both set. Notifications will only be logged.");
                None
            }
        };

        Self {
            port: parse_env_or("PORT", 5000),
            jwt_secret,
            reminder_timezone,
            reminder_tick_secs,
            min_extraction_text_len: parse_env_or("MIN_EXTRACTION_TEXT_LEN", 30),
            smtp,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
