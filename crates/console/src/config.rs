use foundrytrack_core::maintenance::DEFAULT_TECHNICIAN;
use foundrytrack_core::types::{parse_iso_date, Date};

/// How screens are written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Console configuration loaded from environment variables.
///
/// All fields have defaults suitable for interactive use.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Fixed "today"; `None` uses the system date.
    pub today: Option<Date>,
    /// Technician stamped on new maintenance logs.
    pub technician: String,
    pub output: OutputFormat,
    /// Whether screens require a signed-in session.
    pub require_login: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            today: None,
            technician: DEFAULT_TECHNICIAN.to_string(),
            output: OutputFormat::Text,
            require_login: true,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                      | Default        |
    /// |------------------------------|----------------|
    /// | `FOUNDRYTRACK_TODAY`         | system date    |
    /// | `FOUNDRYTRACK_TECHNICIAN`    | `Current User` |
    /// | `FOUNDRYTRACK_OUTPUT`        | `text`         |
    /// | `FOUNDRYTRACK_REQUIRE_LOGIN` | `true`         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let today = match get("FOUNDRYTRACK_TODAY") {
            Some(value) => Some(parse_iso_date(&value).map_err(|e| ConfigError::Invalid {
                var: "FOUNDRYTRACK_TODAY",
                value: value.clone(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        let technician = get("FOUNDRYTRACK_TECHNICIAN")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.technician);

        let output = match get("FOUNDRYTRACK_OUTPUT") {
            None => defaults.output,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "FOUNDRYTRACK_OUTPUT",
                        value,
                        reason: "expected 'text' or 'json'".to_string(),
                    })
                }
            },
        };

        let require_login = match get("FOUNDRYTRACK_REQUIRE_LOGIN") {
            None => defaults.require_login,
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::Invalid {
                var: "FOUNDRYTRACK_REQUIRE_LOGIN",
                value: value.clone(),
                reason: "expected true or false".to_string(),
            })?,
        };

        Ok(Self {
            today,
            technician,
            output,
            require_login,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
