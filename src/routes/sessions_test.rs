use super::*;
use crate::state::test_helpers;

fn body(room_id: Option<&str>, user_name: Option<&str>, image_data: Option<&str>) -> SaveSessionBody {
    SaveSessionBody {
        room_id: room_id.map(str::to_string),
        user_name: user_name.map(str::to_string),
        image_data: image_data.map(str::to_string),
    }
}

#[tokio::test]
async fn save_without_room_id_returns_400() {
    let state = test_helpers::test_app_state();
    let result = save_session(
        State(state),
        Json(body(None, Some("alice"), Some("data:image/png;base64,AA=="))),
    )
    .await;

    let (status, Json(payload)) = result.expect_err("should be rejected");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["error"], "roomId is required");
}

#[tokio::test]
async fn save_without_image_returns_400() {
    let state = test_helpers::test_app_state();
    let result = save_session(State(state), Json(body(Some("r1"), Some("alice"), None))).await;

    let (status, Json(payload)) = result.expect_err("should be rejected");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["error"], "imageData is required");
}

#[tokio::test]
async fn save_with_empty_room_id_returns_400() {
    let state = test_helpers::test_app_state();
    let result =
        save_session(State(state), Json(body(Some(""), None, Some("data:image/png;base64,AA==")))).await;

    let (status, _) = result.expect_err("should be rejected");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn save_body_parses_camel_case() {
    let body: SaveSessionBody = serde_json::from_str(
        r#"{"roomId":"r1","userName":"alice","imageData":"data:image/png;base64,AA=="}"#,
    )
    .expect("parse");
    assert_eq!(body.room_id.as_deref(), Some("r1"));
    assert_eq!(body.user_name.as_deref(), Some("alice"));
    assert_eq!(body.image_data.as_deref(), Some("data:image/png;base64,AA=="));
}

#[test]
fn save_response_omits_session_id_on_update() {
    let response =
        SaveSessionResponse { message: "Session saved", action: "updated", session_id: None };
    let json = serde_json::to_value(&response).expect("serialize");
    assert_eq!(json["action"], "updated");
    assert!(json.get("sessionId").is_none());
}

#[test]
fn load_response_uses_camel_case_keys() {
    let response =
        LoadSessionResponse { room_id: "r1".into(), image_data: "data:image/png;base64,AA==".into() };
    let json = serde_json::to_value(&response).expect("serialize");
    assert_eq!(json["roomId"], "r1");
    assert_eq!(json["imageData"], "data:image/png;base64,AA==");
}
