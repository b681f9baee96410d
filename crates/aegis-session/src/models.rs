//! Data models shared between the session core and the dashboard shell.

use serde::{Deserialize, Serialize};

/// Denormalized user display data, stored alongside the bearer token.
///
/// Field names serialize in camelCase to match what the auth transport
/// returns and what the stored `user` record looks like. This is
/// display-only state: session validity derives solely from the token,
/// never from the presence of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl UserProfile {
    /// Initials for the avatar badge, `"?"` when both names are empty.
    pub fn initials(&self) -> String {
        let first = self.first_name.chars().next();
        let last = self.last_name.chars().next();
        match (first, last) {
            (None, None) => "?".to_string(),
            (f, l) => f
                .into_iter()
                .chain(l)
                .flat_map(|c| c.to_uppercase())
                .collect(),
        }
    }
}
