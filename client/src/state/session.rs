//! Local identity for this browser.
//!
//! DESIGN
//! ======
//! The selected profile is kept in `localStorage` only. A stored entry that
//! fails to parse is logged and ignored, which re-shows the selector.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use notes::LocalUser;
use notes::profile::SELECTED_USER_KEY;

use crate::util::storage;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<LocalUser>,
}

impl SessionState {
    /// Rebuild the session from a raw stored value.
    pub fn restore(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match LocalUser::from_json(raw) {
            Ok(user) => Self { user: Some(user) },
            Err(e) => {
                leptos::logging::warn!("ignoring stored user: {e}");
                Self::default()
            }
        }
    }

    /// Select `PROFILES[index]` as the current identity.
    pub fn select(&mut self, index: usize, now_ms: i64) -> Option<&LocalUser> {
        self.user = LocalUser::from_profile(index, now_ms);
        self.user.as_ref()
    }

    pub fn switch_user(&mut self) {
        self.user = None;
    }

    /// Display name used as note and reaction author.
    pub fn viewer_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

/// Read the persisted identity, if any.
pub fn load() -> SessionState {
    SessionState::restore(storage::load_raw(SELECTED_USER_KEY).as_deref())
}

pub fn persist(user: &LocalUser) {
    storage::save_json(SELECTED_USER_KEY, user);
}

pub fn forget() {
    storage::remove(SELECTED_USER_KEY);
}
