//! WebSocket handler — the room relay.
//!
//! DESIGN
//! ======
//! On upgrade, mints a connection id and enters a `select!` loop:
//! - Incoming client events → parse + dispatch by event type
//! - Events fanned out by room peers → forward to this client
//!
//! The channel is fire-and-forget. Events with a missing or empty room id
//! are dropped silently, malformed JSON is logged and dropped, and no
//! acknowledgment is ever sent back to the originator.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → connection id minted, outbound mpsc queue created
//! 2. `join_room` → membership registered, peers get `user_joined`
//! 3. `draw` / `clear` → relayed to every other member of the named room
//! 4. Close → membership removed silently, empty room evicted

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::protocol::{ClientEvent, ServerEvent};
use crate::services;
use crate::state::AppState;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();

    // Per-connection queue for events fanned out by room peers. FIFO, so
    // per-sender ordering survives end-to-end.
    let (client_tx, mut client_rx) = mpsc::channel::<ServerEvent>(256);

    info!(%client_id, "ws: client connected");

    // The room this connection has joined, if any. One room at a time:
    // joining another room replaces the membership.
    let mut current_room: Option<String> = None;

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        dispatch_event(&state, &mut current_room, client_id, &client_tx, &text).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(event) = client_rx.recv() => {
                if send_event(&mut socket, &event).await.is_err() {
                    break;
                }
            }
        }
    }

    // Silent cleanup: peers are not notified of disconnects.
    if let Some(room_id) = current_room.take() {
        services::room::leave_room(&state, &room_id, client_id).await;
    }
    info!(%client_id, "ws: client disconnected");
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Parse one inbound text message and apply it. Kept separate from the
/// transport loop so tests can drive dispatch directly.
async fn dispatch_event(
    state: &AppState,
    current_room: &mut Option<String>,
    client_id: Uuid,
    client_tx: &mpsc::Sender<ServerEvent>,
    text: &str,
) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            warn!(%client_id, error = %e, "ws: dropping malformed event");
            return;
        }
    };

    match event {
        ClientEvent::JoinRoom { room_id, user_name } => {
            let Some(room_id) = nonempty(room_id) else { return };

            // Joining a new room replaces the previous membership.
            if let Some(prev) = current_room.take() {
                if prev != room_id {
                    services::room::leave_room(state, &prev, client_id).await;
                }
            }

            services::room::join_room(state, &room_id, client_id, client_tx.clone()).await;

            // Every pre-existing member is told; the joiner hears nothing.
            let notice = ServerEvent::UserJoined { user_name, socket_id: client_id };
            services::room::broadcast(state, &room_id, &notice, Some(client_id)).await;

            *current_room = Some(room_id);
        }
        ClientEvent::Draw { room_id, segment } => {
            let Some(room_id) = nonempty(room_id) else { return };
            services::room::broadcast(state, &room_id, &ServerEvent::Draw { segment }, Some(client_id))
                .await;
        }
        ClientEvent::Clear { room_id } => {
            let Some(room_id) = nonempty(room_id) else { return };
            info!(%client_id, room_id, "ws: clear requested");
            services::room::broadcast(state, &room_id, &ServerEvent::Clear, Some(client_id)).await;
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Missing or empty room ids make the whole event a silent no-op.
fn nonempty(room_id: Option<String>) -> Option<String> {
    room_id.filter(|room_id| !room_id.is_empty())
}

async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), ()> {
    let json = match serde_json::to_string(event) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize event");
            return Err(());
        }
    };
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
