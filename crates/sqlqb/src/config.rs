use serde::Deserialize;
use tracing::Level;

/// Per-builder options.
///
/// By default, SQL logging is disabled and IN-lists are unbounded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Emit a `tracing` event with the rendered SQL on every `sql()` call.
    pub log_sql: bool,
    /// Level of the SQL event.
    #[serde(with = "level_name")]
    pub sql_log_level: Level,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
    /// Reject IN/NOT IN lists longer than this.
    pub max_in_list: Option<usize>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            log_sql: false,
            sql_log_level: Level::DEBUG,
            max_sql_length: Some(200),
            max_in_list: None,
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable SQL logging.
    pub fn enable_sql_logging(mut self) -> Self {
        self.log_sql = true;
        self
    }

    /// Disable SQL logging.
    pub fn disable_sql_logging(mut self) -> Self {
        self.log_sql = false;
        self
    }

    /// Override the tracing event level.
    pub fn sql_log_level(mut self, level: Level) -> Self {
        self.sql_log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// Cap the number of values accepted by IN/NOT IN predicates.
    pub fn max_in_list(mut self, len: usize) -> Self {
        self.max_in_list = Some(len);
        self
    }
}

mod level_name {
    use serde::{Deserialize, Deserializer};
    use tracing::Level;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse::<Level>().map_err(serde::de::Error::custom)
    }
}
