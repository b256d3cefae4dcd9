use chrono_tz::Tz;

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the Ergast-compatible API, without trailing slash.
    pub api_base_url: String,
    /// Season year, or "current" to follow the upstream's current season.
    pub season: String,
    /// Civil timezone used to interpret and display session times.
    pub home_timezone: Tz,
    pub user_agent: String,
    pub port: u16,
    pub upstream_timeout_secs: u64,
    /// Maximum number of winner lookups in flight while building the calendar.
    pub winner_lookup_concurrency: usize,
    /// "pretty" (default) or "json".
    pub log_format: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("JOLPICA_BASE_URL")
                .unwrap_or_else(|_| "https://api.jolpi.ca/ergast/f1".to_string())
                .trim_end_matches('/')
                .to_string(),
            season: std::env::var("F1_SEASON").unwrap_or_else(|_| "current".to_string()),
            home_timezone: std::env::var("HOME_TIMEZONE")
                .unwrap_or_else(|_| "Europe/Lisbon".to_string())
                .parse()
                .expect("HOME_TIMEZONE must be a valid IANA timezone name"),
            user_agent: std::env::var("F1_USER_AGENT")
                .unwrap_or_else(|_| "F1Live/0.1 (season overview service)".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds"),
            winner_lookup_concurrency: std::env::var("WINNER_LOOKUP_CONCURRENCY")
                .unwrap_or_else(|_| "24".to_string())
                .parse::<usize>()
                .expect("WINNER_LOOKUP_CONCURRENCY must be a positive integer")
                .max(1),
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        }
    }
}
