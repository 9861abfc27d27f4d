//! Wire protocol — the JSON events exchanged over the websocket.
//!
//! DESIGN
//! ======
//! Events are internally tagged on `"type"` with camelCase payload fields,
//! matching what the canvas client emits. The channel is fire-and-forget:
//! there are no request ids, no acks, and no error frames back to the
//! sender — an event either fans out to the room or is dropped.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// SEGMENT
// =============================================================================

/// One line segment of a pen stroke.
///
/// Fields are opaque to the server and forwarded exactly as received —
/// no validation of coordinate types or ranges (trust-the-client design).
/// Absent fields stay absent on the way out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x0: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y0: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<serde_json::Value>,
}

// =============================================================================
// CLIENT → SERVER
// =============================================================================

/// Events a client may send. `room_id` is optional at the wire level;
/// dispatch drops any event whose room id is missing or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        #[serde(default)]
        room_id: Option<String>,
        #[serde(default)]
        user_name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Draw {
        #[serde(default)]
        room_id: Option<String>,
        #[serde(flatten)]
        segment: Segment,
    },
    #[serde(rename_all = "camelCase")]
    Clear {
        #[serde(default)]
        room_id: Option<String>,
    },
}

// =============================================================================
// SERVER → PEERS
// =============================================================================

/// Events fanned out to the other members of a room. The originating
/// connection never receives its own echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    UserJoined {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_name: Option<String>,
        socket_id: Uuid,
    },
    Draw {
        #[serde(flatten)]
        segment: Segment,
    },
    Clear,
}

// =============================================================================
// TESTS
// =============================================================================
