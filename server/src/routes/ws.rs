//! WebSocket handler — bidirectional frame relay.
//!
//! DESIGN
//! ======
//! On upgrade, generates a client ID and enters a `select!` loop:
//! - Incoming client frames → parse + dispatch by syscall prefix
//! - Snapshot frames from this connection's live query → forward to client
//!
//! Handler functions validate input, call the note service, and return an
//! `Outcome`. The dispatch layer turns the outcome into reply frames. There
//! is no peer broadcast: every client sees every change through its own live
//! query, which re-delivers the full snapshot.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → send `session:connected` with `client_id`
//! 2. `notes:subscribe` → spawn relay; snapshots arrive as `item` frames
//! 3. `note:*` writes → `done` or `error` to the sender only
//! 4. Unsubscribe, re-subscribe, cancel or close → subscription guard dropped

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{Sink, SinkExt};
use notes::{Data, Frame, NoteColor, ReactionEmoji, Status, Viewport};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services;
use crate::services::subscription::SubscriptionGuard;
use crate::state::AppState;

// =============================================================================
// OUTCOME
// =============================================================================

/// Result returned by handler functions. The dispatch layer uses this to
/// decide what the sender receives.
enum Outcome {
    /// Send done+data to sender.
    Reply(Data),
    /// Send empty done to sender.
    Done,
    /// Nothing now; the relay task streams item frames for this request.
    Streaming,
}

// =============================================================================
// CONNECTION
// =============================================================================

/// Per-connection state owned by the websocket loop.
struct Connection {
    client_id: Uuid,
    subscription: Option<SubscriptionGuard>,
}

impl Connection {
    fn new(client_id: Uuid) -> Self {
        Self { client_id, subscription: None }
    }

    /// Replace the active subscription. The previous guard, if any, is
    /// dropped and its relay stops.
    fn subscribe(&mut self, guard: SubscriptionGuard) {
        self.subscription = Some(guard);
    }

    fn unsubscribe(&mut self) -> bool {
        self.subscription.take().is_some()
    }

    /// Release the subscription only if it serves `request_id`.
    fn cancel(&mut self, request_id: Uuid) -> bool {
        if self
            .subscription
            .as_ref()
            .is_some_and(|s| s.request_id() == request_id)
        {
            self.subscription = None;
            return true;
        }
        false
    }
}

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();

    // Per-connection channel for frames produced by the subscription relay.
    let (client_tx, mut client_rx) = mpsc::channel::<Frame>(state.ws_outbound_capacity);

    let welcome = Frame::request("session:connected", Data::new())
        .with_data("client_id", client_id.to_string())
        .with_data("backend", state.store.backend());
    if send_frame(&mut socket, &welcome).await.is_err() {
        return;
    }

    info!(%client_id, "ws: client connected");

    let mut conn = Connection::new(client_id);

    'conn: loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        let replies = process_inbound_text(&state, &mut conn, &client_tx, &text).await;
                        if send_frames(&mut socket, &replies).await.is_err() {
                            break 'conn;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(frame) = client_rx.recv() => {
                if send_frame(&mut socket, &frame).await.is_err() {
                    break;
                }
            }
        }
    }

    drop(conn);
    info!(%client_id, "ws: client disconnected");
}

// =============================================================================
// FRAME DISPATCH
// =============================================================================

/// Parse and process one inbound text frame and return frames for the sender.
///
/// Transport concerns stay in `run_ws` so tests can drive dispatch directly.
async fn process_inbound_text(
    state: &AppState,
    conn: &mut Connection,
    client_tx: &mpsc::Sender<Frame>,
    text: &str,
) -> Vec<Frame> {
    let req: Frame = match serde_json::from_str(text) {
        Ok(r) => r,
        Err(e) => {
            warn!(client_id = %conn.client_id, error = %e, "ws: invalid inbound frame");
            let err = Frame::request("gateway:error", Data::new()).with_data("message", format!("invalid json: {e}"));
            return vec![err];
        }
    };

    if req.status == Status::Cancel {
        if let Some(target) = req.parent_id {
            if conn.cancel(target) {
                info!(client_id = %conn.client_id, %target, "ws: subscription cancelled");
            }
        }
        return vec![];
    }

    info!(client_id = %conn.client_id, id = %req.id, syscall = %req.syscall, "ws: recv frame");

    let result = match req.prefix() {
        "notes" => handle_notes(state, conn, client_tx, &req),
        "note" => handle_note(state, &req).await,
        prefix => Err(req.error(format!("unknown prefix: {prefix}"))),
    };

    match result {
        Ok(Outcome::Reply(data)) => vec![req.done_with(data)],
        Ok(Outcome::Done) => vec![req.done()],
        Ok(Outcome::Streaming) => vec![],
        Err(err_frame) => vec![err_frame],
    }
}

// =============================================================================
// SUBSCRIPTION HANDLERS
// =============================================================================

fn handle_notes(
    state: &AppState,
    conn: &mut Connection,
    client_tx: &mpsc::Sender<Frame>,
    req: &Frame,
) -> Result<Outcome, Frame> {
    match req.op() {
        "subscribe" => {
            let Some(day_start) = req.day_start() else {
                return Err(req.error("day_start required"));
            };
            let query = services::notes::subscribe(state, day_start);
            let guard = services::subscription::spawn_relay(query, req.clone(), client_tx.clone());
            conn.subscribe(guard);
            info!(client_id = %conn.client_id, day_start, "ws: subscribed");
            Ok(Outcome::Streaming)
        }
        "unsubscribe" => {
            if conn.unsubscribe() {
                info!(client_id = %conn.client_id, "ws: unsubscribed");
            }
            Ok(Outcome::Done)
        }
        op => Err(req.error(format!("unknown notes op: {op}"))),
    }
}

// =============================================================================
// NOTE HANDLERS
// =============================================================================

async fn handle_note(state: &AppState, req: &Frame) -> Result<Outcome, Frame> {
    match req.op() {
        "create" => {
            let Some(content) = req.data_str("content") else {
                return Err(req.error("content required"));
            };
            let Some(author) = req.data_str("author") else {
                return Err(req.error("author required"));
            };
            let color = match req.data_str("color") {
                Some(raw) => raw.parse::<NoteColor>().map_err(|e| req.error_from(&e))?,
                None => NoteColor::default(),
            };
            let viewport: Viewport = req.data_as("viewport").unwrap_or_default();

            let note = services::notes::create_note(state, content, color, author, viewport)
                .await
                .map_err(|e| req.error_from(&e))?;

            let mut data = Data::new();
            data.insert("note".into(), serde_json::to_value(&note).unwrap_or_default());
            Ok(Outcome::Reply(data))
        }
        "move" => {
            let id = required_id(req)?;
            let Some(position) = req.position() else {
                return Err(req.error("x and y required"));
            };
            services::notes::move_note(state, id, position)
                .await
                .map_err(|e| req.error_from(&e))?;
            Ok(Outcome::Done)
        }
        "delete" => {
            let id = required_id(req)?;
            services::notes::delete_note(state, id)
                .await
                .map_err(|e| req.error_from(&e))?;
            Ok(Outcome::Done)
        }
        "react" => {
            let id = required_id(req)?;
            let Some(raw_emoji) = req.data_str("emoji") else {
                return Err(req.error("emoji required"));
            };
            let emoji = raw_emoji
                .parse::<ReactionEmoji>()
                .map_err(|e| req.error_from(&e))?;
            let Some(author) = req.data_str("author") else {
                return Err(req.error("author required"));
            };

            let reaction = services::notes::add_reaction(state, id, emoji, author)
                .await
                .map_err(|e| req.error_from(&e))?;

            let mut data = Data::new();
            data.insert("reaction".into(), serde_json::to_value(&reaction).unwrap_or_default());
            Ok(Outcome::Reply(data))
        }
        op => Err(req.error(format!("unknown note op: {op}"))),
    }
}

fn required_id(req: &Frame) -> Result<Uuid, Frame> {
    req.note_id().ok_or_else(|| req.error("id required"))
}

// =============================================================================
// HELPERS
// =============================================================================

/// Send `frames` in order, stopping at the first one the socket refuses.
async fn send_frames<S>(socket: &mut S, frames: &[Frame]) -> Result<(), ()>
where
    S: Sink<Message> + Unpin,
{
    for frame in frames {
        send_frame(socket, frame).await?;
    }
    Ok(())
}

async fn send_frame<S>(socket: &mut S, frame: &Frame) -> Result<(), ()>
where
    S: Sink<Message> + Unpin,
{
    let json = match serde_json::to_string(frame) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize frame");
            return Err(());
        }
    };
    if frame.status == Status::Error {
        let code = frame.error_code().unwrap_or("-");
        let message = frame.error_message().unwrap_or("-");
        warn!(id = %frame.id, syscall = %frame.syscall, code, message, "ws: send frame status=Error");
    } else {
        info!(id = %frame.id, syscall = %frame.syscall, status = ?frame.status, "ws: send frame");
    }
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
