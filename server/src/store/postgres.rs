//! PostgreSQL note store.
//!
//! DESIGN
//! ======
//! Writes go straight to the `notes` table. A trigger on that table calls
//! `pg_notify('notes_changed', id)`, and one relay task per store forwards
//! those notifications into the broadcast change feed. Every backend that
//! writes through the same database therefore wakes every live query, not
//! just the process that made the change.
//!
//! ERROR HANDLING
//! ==============
//! Rows that fail to decode are kept rather than dropped: an unknown color
//! falls back to the default token and unreadable reactions are skipped, each
//! with a warning. A dropped listener connection is re-established by sqlx;
//! the relay then emits one notice so queries re-read whatever they missed.
//! After `MAX_RELAY_FAILURES` receive errors in a row the relay gives up and
//! closes the feed, so every live query ends with `FeedClosed` instead of
//! waiting forever on a dead listener.

use std::time::Duration;

use async_trait::async_trait;
use notes::{NewNote, Note, NoteColor, NoteId, Position, Reaction};
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use sqlx::types::Json;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{ChangeFeed, ChangeNotice, NoteStore, StoreError};

/// Notification channel written by the `notes` table trigger.
pub const NOTIFY_CHANNEL: &str = "notes_changed";

const RELAY_RETRY_MS: u64 = 1_000;

/// Consecutive listener errors tolerated before the feed is closed.
pub const MAX_RELAY_FAILURES: u32 = 5;

type NoteRow = (NoteId, String, String, String, f64, f64, i64, Json<serde_json::Value>, bool);

const SELECT_COLUMNS: &str = "id, content, author, color, x, y, created_ms, reactions, is_today";

pub struct PgStore {
    pool: PgPool,
    /// The relay task owns the only strong sender; once it exits the feed
    /// is closed for every subscriber.
    changes: broadcast::WeakSender<ChangeNotice>,
    relay: JoinHandle<()>,
}

impl PgStore {
    /// Start listening on the notification channel and return the store.
    ///
    /// # Errors
    ///
    /// Returns a database error if the listener connection cannot be opened.
    pub async fn connect(pool: PgPool, feed_capacity: usize) -> Result<Self, StoreError> {
        let mut listener = PgListener::connect_with(&pool).await?;
        listener.listen(NOTIFY_CHANNEL).await?;

        let (changes, _) = broadcast::channel(feed_capacity.max(1));
        let weak = changes.downgrade();
        let relay = tokio::spawn(relay_notifications(listener, changes));
        info!(channel = NOTIFY_CHANNEL, "postgres change feed listening");

        Ok(Self { pool, changes: weak, relay })
    }
}

impl Drop for PgStore {
    fn drop(&mut self) {
        self.relay.abort();
    }
}

/// Run of listener errors since the last successful receive.
#[derive(Debug, Default)]
struct FailureStreak(u32);

impl FailureStreak {
    fn reset(&mut self) {
        self.0 = 0;
    }

    /// Count one more error. Returns true once the limit is passed.
    fn record(&mut self) -> bool {
        self.0 += 1;
        self.0 > MAX_RELAY_FAILURES
    }
}

/// Forward notifications until the listener fails too often in a row.
/// Returning drops `changes`, which closes the feed.
async fn relay_notifications(mut listener: PgListener, changes: broadcast::Sender<ChangeNotice>) {
    let mut failures = FailureStreak::default();
    loop {
        match listener.try_recv().await {
            Ok(Some(notification)) => {
                failures.reset();
                let note_id = notification.payload().parse().ok();
                debug!(?note_id, "notes_changed");
                let _ = changes.send(ChangeNotice { note_id });
            }
            Ok(None) => {
                failures.reset();
                warn!("change feed connection lost; reconnecting");
                let _ = changes.send(ChangeNotice { note_id: None });
            }
            Err(e) => {
                if failures.record() {
                    error!(error = %e, failures = failures.0, "change feed listener gave up; closing feed");
                    return;
                }
                warn!(error = %e, failures = failures.0, "change feed receive failed");
                tokio::time::sleep(Duration::from_millis(RELAY_RETRY_MS)).await;
            }
        }
    }
}

/// Subscribe through the relay's sender, or hand out an already closed
/// feed when the relay has stopped.
fn subscribe_feed(changes: &broadcast::WeakSender<ChangeNotice>) -> ChangeFeed {
    match changes.upgrade() {
        Some(sender) => ChangeFeed::new(sender.subscribe()),
        None => {
            let (_, rx) = broadcast::channel(1);
            ChangeFeed::new(rx)
        }
    }
}

fn note_from_row(row: NoteRow) -> Note {
    let (id, content, author, color, x, y, timestamp, Json(reactions), is_today) = row;

    let color = color.parse::<NoteColor>().unwrap_or_else(|e| {
        warn!(%id, error = %e, "unreadable note color; using default");
        NoteColor::default()
    });

    let reactions = match reactions {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Reaction>(item) {
                Ok(reaction) => Some(reaction),
                Err(e) => {
                    warn!(%id, error = %e, "skipping unreadable reaction");
                    None
                }
            })
            .collect(),
        serde_json::Value::Null => Vec::new(),
        other => {
            warn!(%id, kind = ?other, "reactions column is not an array");
            Vec::new()
        }
    };

    Note { id, content, author, color, x, y, timestamp, reactions, is_today }
}

fn not_found_unless_touched(id: NoteId, rows_affected: u64) -> Result<(), StoreError> {
    if rows_affected == 0 {
        return Err(StoreError::NotFound(id));
    }
    Ok(())
}

#[async_trait]
impl NoteStore for PgStore {
    async fn insert(&self, draft: NewNote) -> Result<Note, StoreError> {
        let id: NoteId = sqlx::query_scalar(
            "INSERT INTO notes (content, author, color, x, y, created_ms, reactions, is_today) \
             VALUES ($1, $2, $3, $4, $5, $6, '[]'::jsonb, TRUE) RETURNING id",
        )
        .bind(&draft.content)
        .bind(&draft.author)
        .bind(draft.color.name())
        .bind(draft.position.x)
        .bind(draft.position.y)
        .bind(draft.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(draft.into_note(id))
    }

    async fn set_position(&self, id: NoteId, position: Position) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE notes SET x = $2, y = $3 WHERE id = $1")
            .bind(id)
            .bind(position.x)
            .bind(position.y)
            .execute(&self.pool)
            .await?;
        not_found_unless_touched(id, result.rows_affected())
    }

    async fn delete(&self, id: NoteId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        not_found_unless_touched(id, result.rows_affected())
    }

    async fn union_reaction(&self, id: NoteId, reaction: Reaction) -> Result<(), StoreError> {
        let value = serde_json::to_value(&reaction).map_err(|e| StoreError::Database(sqlx::Error::Encode(Box::new(e))))?;
        let result = sqlx::query(
            "UPDATE notes SET reactions = CASE \
                 WHEN reactions @> jsonb_build_array($2::jsonb) THEN reactions \
                 ELSE reactions || jsonb_build_array($2::jsonb) END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(Json(value))
        .execute(&self.pool)
        .await?;
        not_found_unless_touched(id, result.rows_affected())
    }

    async fn query_since(&self, day_start: i64) -> Result<Vec<Note>, StoreError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM notes WHERE created_ms >= $1 ORDER BY created_ms DESC, id ASC");
        let rows = sqlx::query_as::<_, NoteRow>(&sql)
            .bind(day_start)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(note_from_row).collect())
    }

    fn changes(&self) -> ChangeFeed {
        subscribe_feed(&self.changes)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
