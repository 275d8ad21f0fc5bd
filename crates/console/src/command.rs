//! Parsing of console input lines into [`Command`]s.
//!
//! Words are whitespace-separated. Commands whose arguments may contain
//! spaces (`log`, `profile-update`) separate their fields with `|`.

use foundrytrack_core::search::StatusFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Login { email: String, password: String },
    LoginDemo,
    Logout,
    Home,
    Profile,
    ProfileUpdate {
        full_name: String,
        phone_number: String,
        department: String,
        new_password: String,
    },
    Dashboard,
    Patterns { filter: StatusFilter, query: String },
    Scan { pattern_id: String },
    ScanQr,
    /// Add one use; `None` means the most recently scanned pattern.
    Use { pattern_id: Option<String> },
    Logs,
    Log {
        pattern_id: String,
        maintenance_type: String,
        remarks: String,
    },
    Types,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    InvalidArgument(String),
}

pub const USAGE_LOGIN: &str = "login <email> <password>";
pub const USAGE_PATTERNS: &str = "patterns [--status <all|good|warning|overdue>] [query]";
pub const USAGE_SCAN: &str = "scan <pattern id>";
pub const USAGE_LOG: &str = "log <pattern id> | <type> | <remarks>";
pub const USAGE_PROFILE_UPDATE: &str =
    "profile-update <full name> | <phone> | <department> [| <new password>]";

/// One line per command, shown by `help`.
pub const HELP: &[(&str, &str)] = &[
    ("help", "Show this list"),
    (USAGE_LOGIN, "Sign in (any non-empty credentials)"),
    ("login-demo", "Sign in as the demo user"),
    ("logout", "Sign out"),
    ("home", "Welcome screen"),
    ("profile", "Show the signed-in user"),
    (USAGE_PROFILE_UPDATE, "Simulate a profile update"),
    ("dashboard", "Status counts and recent activity"),
    (USAGE_PATTERNS, "Search and filter patterns"),
    (USAGE_SCAN, "Look up a pattern by id"),
    ("scan-qr", "Simulate scanning a QR code"),
    ("use [pattern id]", "Add one use (defaults to the last scanned pattern)"),
    ("logs", "Maintenance history, newest first"),
    (USAGE_LOG, "Record maintenance"),
    ("types", "List maintenance types"),
    ("quit", "Exit"),
];

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "login" => {
            let mut args = rest.split_whitespace();
            match (args.next(), args.next(), args.next()) {
                (Some(email), Some(password), None) => Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                _ => return Err(CommandError::Usage(USAGE_LOGIN)),
            }
        }
        "login-demo" => Command::LoginDemo,
        "logout" => Command::Logout,
        "home" => Command::Home,
        "profile" => Command::Profile,
        "profile-update" => parse_profile_update(rest)?,
        "dashboard" => Command::Dashboard,
        "patterns" | "list" => parse_patterns(rest)?,
        "scan" => {
            if rest.is_empty() {
                return Err(CommandError::Usage(USAGE_SCAN));
            }
            Command::Scan {
                pattern_id: rest.to_string(),
            }
        }
        "scan-qr" => Command::ScanQr,
        "use" => Command::Use {
            pattern_id: (!rest.is_empty()).then(|| rest.to_string()),
        },
        "logs" => Command::Logs,
        "log" => parse_log(rest)?,
        "types" => Command::Types,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_patterns(rest: &str) -> Result<Command, CommandError> {
    let mut filter = StatusFilter::All;
    let mut query = rest;

    if let Some(after_flag) = rest.strip_prefix("--status") {
        let after_flag = after_flag.trim_start();
        let (value, remainder) = match after_flag.split_once(char::is_whitespace) {
            Some((value, remainder)) => (value, remainder.trim_start()),
            None => (after_flag, ""),
        };
        if value.is_empty() {
            return Err(CommandError::Usage(USAGE_PATTERNS));
        }
        filter = StatusFilter::from_str(value)
            .map_err(|e| CommandError::InvalidArgument(e.to_string()))?;
        query = remainder;
    }

    Ok(Command::Patterns {
        filter,
        query: query.to_string(),
    })
}

/// Split on `|`. Blank fields are kept so the registry can report them.
fn fields(rest: &str) -> Vec<String> {
    rest.split('|').map(|f| f.trim().to_string()).collect()
}

/// Remarks are free text and keep any further `|`.
fn parse_log(rest: &str) -> Result<Command, CommandError> {
    let mut parts = rest.splitn(3, '|').map(|f| f.trim().to_string());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(pattern_id), Some(maintenance_type), Some(remarks)) => Ok(Command::Log {
            pattern_id,
            maintenance_type,
            remarks,
        }),
        _ => Err(CommandError::Usage(USAGE_LOG)),
    }
}

fn parse_profile_update(rest: &str) -> Result<Command, CommandError> {
    let parts = fields(rest);
    match parts.as_slice() {
        [full_name, phone_number, department] => Ok(Command::ProfileUpdate {
            full_name: full_name.clone(),
            phone_number: phone_number.clone(),
            department: department.clone(),
            new_password: String::new(),
        }),
        [full_name, phone_number, department, new_password] => Ok(Command::ProfileUpdate {
            full_name: full_name.clone(),
            phone_number: phone_number.clone(),
            department: department.clone(),
            new_password: new_password.clone(),
        }),
        _ => Err(CommandError::Usage(USAGE_PROFILE_UPDATE)),
    }
}

impl Command {
    /// Commands usable before signing in.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Help | Self::Login { .. } | Self::LoginDemo | Self::Logout | Self::Quit
        )
    }
}
