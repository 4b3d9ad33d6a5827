//! WebSocket frame client for the live note board.
//!
//! Manages the socket lifecycle: connection, reconnection with exponential
//! backoff, and routing inbound frames through `dispatch::apply_frame`.
//! All of it is gated behind `#[cfg(feature = "hydrate")]` since it needs a
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Parse and transport failures are logged and turned into a reconnect. The
//! board's standing subscription is re-sent once the server greets the new
//! connection, so a dropped socket heals without a page reload.

#[cfg(feature = "hydrate")]
use leptos::prelude::{RwSignal, Update};
#[cfg(feature = "hydrate")]
use notes::Frame;

#[cfg(feature = "hydrate")]
use crate::net::dispatch::{Effect, apply_frame};
#[cfg(feature = "hydrate")]
use crate::net::requests;
#[cfg(feature = "hydrate")]
use crate::state::board::{BoardState, ConnectionStatus, TOAST_MS};

#[cfg(feature = "hydrate")]
const INITIAL_BACKOFF_MS: u32 = 1_000;
#[cfg(feature = "hydrate")]
const MAX_BACKOFF_MS: u32 = 10_000;

/// Send a frame to the server via the shared sender channel.
///
/// Returns `false` if the channel is closed.
#[cfg(feature = "hydrate")]
pub fn send_frame(tx: &futures::channel::mpsc::UnboundedSender<String>, frame: &Frame) -> bool {
    match serde_json::to_string(frame) {
        Ok(json) => tx.unbounded_send(json).is_ok(),
        Err(e) => {
            leptos::logging::warn!("failed to encode {}: {e}", frame.syscall);
            false
        }
    }
}

/// Spawn the socket lifecycle as a local task and return its outbound
/// channel. Frames queued while disconnected go out after reconnect.
#[cfg(feature = "hydrate")]
pub fn spawn_frame_client(board: RwSignal<BoardState>) -> futures::channel::mpsc::UnboundedSender<String> {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<String>();
    leptos::task::spawn_local(frame_client_loop(board, tx.clone(), rx));
    tx
}

#[cfg(feature = "hydrate")]
async fn frame_client_loop(
    board: RwSignal<BoardState>,
    tx: futures::channel::mpsc::UnboundedSender<String>,
    mut rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    let mut backoff_ms = INITIAL_BACKOFF_MS;

    loop {
        board.update(|b| b.connection_status = ConnectionStatus::Connecting);

        let url = ws_url();
        match connect_and_run(&url, board, &tx, &mut rx).await {
            Ok(true) => backoff_ms = INITIAL_BACKOFF_MS,
            Ok(false) => {}
            Err(e) => leptos::logging::warn!("WS error: {e}"),
        }

        board.update(|b| b.connection_status = ConnectionStatus::Disconnected);

        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
    }
}

#[cfg(feature = "hydrate")]
fn ws_url() -> String {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location
        .as_ref()
        .and_then(|l| l.protocol().ok())
        .unwrap_or_default();
    let host = location
        .as_ref()
        .and_then(|l| l.host().ok())
        .unwrap_or_else(|| "localhost:3000".to_owned());
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}/api/ws")
}

/// Run one connection until it drops. Returns whether the server greeted us,
/// which resets the reconnect backoff.
#[cfg(feature = "hydrate")]
async fn connect_and_run(
    url: &str,
    board: RwSignal<BoardState>,
    tx: &futures::channel::mpsc::UnboundedSender<String>,
    rx: &mut futures::channel::mpsc::UnboundedReceiver<String>,
) -> Result<bool, String> {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();
    let mut greeted = false;

    let send_task = async {
        while let Some(json) = rx.next().await {
            if ws_write.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<Frame>(&text) {
                    Ok(frame) => {
                        greeted |= frame.syscall == "session:connected";
                        dispatch_frame(&frame, board, tx);
                    }
                    Err(e) => leptos::logging::warn!("WS bad frame: {e}"),
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("WS recv error: {e}");
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;
    Ok(greeted)
}

#[cfg(feature = "hydrate")]
fn dispatch_frame(frame: &Frame, board: RwSignal<BoardState>, tx: &futures::channel::mpsc::UnboundedSender<String>) {
    let Some(effect) = board.try_update(|b| apply_frame(b, frame)) else {
        return;
    };
    match effect {
        Effect::None => {}
        Effect::Resubscribe(day_start) => {
            if let Some(request) = board.try_update(|b| requests::subscribe(b, day_start)) {
                send_frame(tx, &request);
            }
        }
        Effect::ClearToastLater(seq) => {
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(TOAST_MS))).await;
                board.update(|b| b.clear_toast(seq));
            });
        }
    }
}
