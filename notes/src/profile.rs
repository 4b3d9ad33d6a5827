//! The two predefined local profiles and the identity built from them.
//!
//! DESIGN
//! ======
//! Identity is a display convention, not an authenticated principal. A
//! `LocalUser` lives only in the browser's local storage and is never written
//! to the shared store; two browsers may pick the same profile at once.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use serde::{Deserialize, Serialize};

/// Local storage key holding the selected identity as JSON.
pub const SELECTED_USER_KEY: &str = "selectedUser";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub avatar: &'static str,
    /// Gradient token used for the selector button and header badge.
    pub gradient: &'static str,
}

pub const PROFILES: [Profile; 2] = [
    Profile { name: "You", avatar: "\u{1F917}", gradient: "from-pink-400 to-purple-500" },
    Profile { name: "Your Love", avatar: "\u{1F60D}", gradient: "from-purple-400 to-blue-500" },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUser {
    /// `user_{index}_{epochMs}`.
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub color: String,
}

impl LocalUser {
    /// Synthesize an identity for `PROFILES[index]` selected at `now_ms`.
    #[must_use]
    pub fn from_profile(index: usize, now_ms: i64) -> Option<Self> {
        let profile = PROFILES.get(index)?;
        Some(Self {
            id: format!("user_{index}_{now_ms}"),
            name: profile.name.to_owned(),
            avatar: profile.avatar.to_owned(),
            color: profile.gradient.to_owned(),
        })
    }

    /// Parse a stored identity. Blank names are treated as corrupt.
    ///
    /// # Errors
    ///
    /// Returns the JSON error, or a custom one for a blank name.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let user: Self = serde_json::from_str(raw)?;
        if user.name.trim().is_empty() {
            return Err(serde::de::Error::custom("stored user has an empty name"));
        }
        Ok(user)
    }
}
