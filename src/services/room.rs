//! Room service — membership registry and broadcast fan-out.
//!
//! DESIGN
//! ======
//! Rooms exist only as entries in the in-memory registry on `AppState`.
//! Joining creates the entry implicitly; the last leave evicts it. All
//! operations are plain map mutations under the registry lock — no
//! suspension beyond lock acquisition, no persistence.

use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::protocol::ServerEvent;
use crate::state::{AppState, RoomState};

/// Add a connection to a room's membership set, creating the room entry
/// on first join. Re-joining the same room is idempotent.
pub async fn join_room(
    state: &AppState,
    room_id: &str,
    client_id: Uuid,
    tx: mpsc::Sender<ServerEvent>,
) {
    let mut rooms = state.rooms.write().await;
    let room = rooms.entry(room_id.to_string()).or_insert_with(RoomState::new);
    room.clients.insert(client_id, tx);
    info!(%client_id, room_id, members = room.clients.len(), "client joined room");
}

/// Remove a connection from a room. Evicts the room entry when the last
/// member leaves. Peers are not notified — disconnect is silent lifecycle,
/// not an event in the catalog.
pub async fn leave_room(state: &AppState, room_id: &str, client_id: Uuid) {
    let mut rooms = state.rooms.write().await;
    let Some(room) = rooms.get_mut(room_id) else {
        return;
    };

    room.clients.remove(&client_id);
    info!(%client_id, room_id, remaining = room.clients.len(), "client left room");

    if room.clients.is_empty() {
        rooms.remove(room_id);
        info!(room_id, "evicted empty room");
    }
}

/// Broadcast an event to all members of a room, optionally excluding one
/// connection (the originator). Unknown rooms are a no-op.
pub async fn broadcast(state: &AppState, room_id: &str, event: &ServerEvent, exclude: Option<Uuid>) {
    let rooms = state.rooms.read().await;
    let Some(room) = rooms.get(room_id) else {
        return;
    };

    for (client_id, tx) in &room.clients {
        if exclude == Some(*client_id) {
            continue;
        }
        // Best-effort: if a client's channel is full, skip it.
        let _ = tx.try_send(event.clone());
    }
}

/// Number of live members in a room. Zero for unknown rooms.
pub async fn member_count(state: &AppState, room_id: &str) -> usize {
    let rooms = state.rooms.read().await;
    rooms.get(room_id).map_or(0, |room| room.clients.len())
}

#[cfg(test)]
#[path = "room_test.rs"]
mod tests;
