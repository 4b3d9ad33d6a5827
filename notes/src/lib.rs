//! Shared note model and wire envelope for the love-notes board.
//!
//! This crate owns every type that crosses the server/client boundary:
//! notes and reactions as the store keeps them, the fixed palettes, the
//! two local profiles, day-scoping arithmetic, and the JSON `Frame` used on
//! the websocket. It has no I/O of its own so both the tokio server and the
//! WASM client can depend on it.

pub mod day;
pub mod frame;
pub mod note;
pub mod palette;
pub mod profile;

pub use frame::{Data, ErrorCode, Frame, Status};
pub use note::{NewNote, Note, NoteId, Position, Reaction, ReactionTally, Viewport};
pub use palette::{NoteColor, PaletteError, ReactionEmoji};
pub use profile::{LocalUser, PROFILES, Profile};

/// Current time as milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Current time as milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn now_ms() -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    {
        js_sys::Date::now() as i64
    }
}
