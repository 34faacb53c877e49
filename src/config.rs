//! Environment-driven game configuration

use std::time::Duration;

/// How far the "one active battle" rule reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    /// At most one battle in the whole process
    Global,
    /// At most one battle per channel
    Channel,
}

impl SessionScope {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "global" => Some(SessionScope::Global),
            "channel" => Some(SessionScope::Channel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Time limit per round; also the base of the scoring formula
    pub round_secs: u64,
    /// Points awarded for a correct guess no matter how late
    pub min_points: u32,
    /// Delay before an auto-start battle begins
    pub auto_start_secs: u64,
    /// Rounds for a tournament created without an explicit count
    pub default_rounds: u32,
    pub session_scope: SessionScope,
    /// Newline-delimited dictionary file (None = builtin list)
    pub dictionary_path: Option<String>,
    pub port: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_secs: 60,
            min_points: 5,
            auto_start_secs: 120,
            default_rounds: 5,
            session_scope: SessionScope::Global,
            dictionary_path: None,
            port: 6574,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

impl GameConfig {
    /// Load config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let session_scope = match std::env::var("WORDBATTLE_SESSION_SCOPE") {
            Ok(v) => SessionScope::parse(&v).unwrap_or_else(|| {
                tracing::warn!("Unknown WORDBATTLE_SESSION_SCOPE {:?}, using global", v);
                SessionScope::Global
            }),
            Err(_) => defaults.session_scope,
        };

        let dictionary_path = std::env::var("WORDBATTLE_DICTIONARY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            round_secs: env_parse::<u64>("WORDBATTLE_ROUND_SECS")
                .filter(|s| *s > 0)
                .unwrap_or(defaults.round_secs),
            min_points: env_parse::<u32>("WORDBATTLE_MIN_POINTS").unwrap_or(defaults.min_points),
            auto_start_secs: env_parse::<u64>("WORDBATTLE_AUTO_START_SECS")
                .unwrap_or(defaults.auto_start_secs),
            default_rounds: env_parse::<u32>("WORDBATTLE_DEFAULT_ROUNDS")
                .filter(|r| *r > 0)
                .unwrap_or(defaults.default_rounds),
            session_scope,
            dictionary_path,
            port: env_parse::<u16>("WORDBATTLE_PORT").unwrap_or(defaults.port),
        }
    }

    pub fn round_timeout(&self) -> Duration {
        Duration::from_secs(self.round_secs)
    }

    pub fn auto_start_delay(&self) -> Duration {
        Duration::from_secs(self.auto_start_secs)
    }

    /// Points for a correct guess made `elapsed_secs` whole seconds into the round
    pub fn points_for(&self, elapsed_secs: u64) -> u32 {
        let remaining = self.round_secs.saturating_sub(elapsed_secs);
        let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
        remaining.max(self.min_points)
    }
}
