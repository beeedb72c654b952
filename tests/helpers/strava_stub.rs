// ABOUTME: Local axum stand-in for the Strava activities endpoint
// ABOUTME: Serves paged activity lists per access token and records every request it receives

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Access tokens with a scripted failure
pub const EXPIRED_TOKEN: &str = "expired-token";
pub const THROTTLED_TOKEN: &str = "throttled-token";
pub const BROKEN_PAYLOAD_TOKEN: &str = "broken-payload-token";
pub const SERVER_ERROR_TOKEN: &str = "server-error-token";

/// One request seen by the stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub token: String,
    pub after: i64,
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Deserialize)]
struct ActivitiesQuery {
    after: i64,
    page: usize,
    per_page: usize,
}

#[derive(Default)]
struct StubState {
    activities: HashMap<String, Vec<Value>>,
    seen: Mutex<Vec<SeenRequest>>,
}

/// Running stub server
pub struct StravaStub {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StravaStub {
    /// Requests received so far
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }
}

/// Strava-shaped activity JSON
pub fn activity_json(id: u64, activity_type: &str, start_date: &str, distance: f64, elapsed: u64) -> Value {
    json!({
        "id": id,
        "name": format!("{activity_type} #{id}"),
        "type": activity_type,
        "sport_type": activity_type,
        "start_date": start_date,
        "distance": distance,
        "elapsed_time": elapsed,
        "moving_time": elapsed,
        "total_elevation_gain": 0.0
    })
}

/// Start the stub; `activities` maps access tokens to the full activity list
pub async fn spawn_strava_stub(activities: HashMap<String, Vec<Value>>) -> StravaStub {
    let state = Arc::new(StubState {
        activities,
        seen: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/athlete/activities", get(list_activities))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StravaStub {
        base_url: format!("http://{address}"),
        state,
    }
}

async fn list_activities(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(query): Query<ActivitiesQuery>,
) -> Response {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_owned();

    state.seen.lock().unwrap().push(SeenRequest {
        token: token.clone(),
        after: query.after,
        page: query.page,
        per_page: query.per_page,
    });

    match token.as_str() {
        EXPIRED_TOKEN => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Authorization Error"})),
        )
            .into_response(),
        THROTTLED_TOKEN => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"message": "Rate Limit Exceeded"})),
        )
            .into_response(),
        BROKEN_PAYLOAD_TOKEN => (StatusCode::OK, "[{\"id\": ").into_response(),
        SERVER_ERROR_TOKEN => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => match state.activities.get(&token) {
            Some(all) => {
                let start = (query.page.saturating_sub(1)) * query.per_page;
                let page: Vec<Value> = all.iter().skip(start).take(query.per_page).cloned().collect();
                Json(page).into_response()
            }
            None => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Authorization Error"})),
            )
                .into_response(),
        },
    }
}
