//! Sign-in and profile simulation.
//!
//! No credential is checked: any non-blank email/password pair signs in, and
//! profile edits are only logged. The session exists so the presentation
//! layer can gate its screens.

use serde::Serialize;

use crate::error::CoreError;

pub const DEMO_EMAIL: &str = "demo@foundrytrack.com";
pub const DEMO_NAME: &str = "Demo User";

/// Initials shown when nobody is signed in.
pub const FALLBACK_INITIALS: &str = "JD";

/// Departments a profile can belong to.
pub const DEPARTMENTS: &[&str] = &[
    "Quality Assurance",
    "Tool Room Management",
    "Production",
    "Engineering",
    "Maintenance",
    "Administration",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// Simulated email/password sign-in.
///
/// The display name is the email's local part with its first letter
/// upper-cased (`jane.doe@x` becomes `Jane.doe`).
pub fn login(email: &str, password: &str) -> Option<User> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return None;
    }
    let local = email.split('@').next().unwrap_or_default();
    Some(User {
        email: email.to_string(),
        name: capitalize_first(local),
    })
}

/// Simulated third-party sign-in; always yields the demo account.
pub fn login_demo() -> User {
    User {
        email: DEMO_EMAIL.to_string(),
        name: DEMO_NAME.to_string(),
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First letter of each word, upper-cased.
pub fn initials(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect(),
        _ => FALLBACK_INITIALS.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The signed-in user, if any.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in with email and password. Returns whether sign-in succeeded.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        match login(email, password) {
            Some(user) => {
                tracing::info!(email = %user.email, "User signed in");
                self.user = Some(user);
                true
            }
            None => false,
        }
    }

    pub fn login_demo(&mut self) {
        let user = login_demo();
        tracing::info!(email = %user.email, "Demo user signed in");
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(email = %user.email, "User signed out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The signed-in user, or `Unauthorized`.
    pub fn require_user(&self) -> Result<&User, CoreError> {
        self.user
            .as_ref()
            .ok_or_else(|| CoreError::Unauthorized("Please sign in first".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone_number: String,
    pub department: String,
    pub new_password: String,
}

/// What a profile update would have changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateSummary {
    pub full_name: String,
    pub phone_number: String,
    pub department: String,
    pub password_changed: bool,
}

impl ProfileUpdate {
    /// Validate the department and record the simulated update.
    pub fn apply(&self) -> Result<ProfileUpdateSummary, CoreError> {
        let department = DEPARTMENTS
            .iter()
            .find(|d| d.eq_ignore_ascii_case(self.department.trim()))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown department: '{}'. Valid departments: {}",
                    self.department,
                    DEPARTMENTS.join(", ")
                ))
            })?;

        let summary = ProfileUpdateSummary {
            full_name: self.full_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            department: department.to_string(),
            password_changed: !self.new_password.is_empty(),
        };
        tracing::info!(
            full_name = %summary.full_name,
            department = %summary.department,
            password_changed = summary.password_changed,
            "Profile update simulated",
        );
        Ok(summary)
    }
}
