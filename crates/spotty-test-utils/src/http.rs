//! Local stand-in for the Spotify Web API.
//!
//! Serves `GET /search`, `GET /me`, `POST /users/{id}/playlists` and
//! `POST /playlists/{id}/tracks` on an ephemeral port, checks the bearer
//! token, and records every request for assertions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use spotty_core::track::TrackCandidate;

/// User ID returned by `GET /me`.
pub const STUB_USER_ID: &str = "stub-user";

type Rejection = (StatusCode, Json<Value>);

#[derive(Default)]
struct Recorded {
    searches: Vec<HashMap<String, String>>,
    created: Vec<(String, Value)>,
    added: Vec<(String, Vec<String>)>,
}

struct ApiState {
    token: String,
    tracks: Vec<TrackCandidate>,
    recorded: Mutex<Recorded>,
}

/// A running stub server. Shut down when dropped.
pub struct StubApi {
    pub base_url: String,
    state: Arc<ApiState>,
    server: JoinHandle<()>,
}

impl StubApi {
    /// Start a server that accepts `token` and searches `tracks`.
    pub async fn spawn(tracks: Vec<TrackCandidate>, token: &str) -> Self {
        let state = Arc::new(ApiState {
            token: token.to_owned(),
            tracks,
            recorded: Mutex::new(Recorded::default()),
        });

        let app = Router::new()
            .route("/search", get(search))
            .route("/me", get(me))
            .route("/users/{user_id}/playlists", post(create_playlist))
            .route("/playlists/{playlist_id}/tracks", post(add_tracks))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub API listener");
        let addr = listener.local_addr().expect("stub API has no local address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("stub API server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    /// Query parameters of every search request, in arrival order.
    pub fn searches(&self) -> Vec<HashMap<String, String>> {
        self.recorded().searches.clone()
    }

    /// `(user_id, body)` of every playlist creation.
    pub fn created_playlists(&self) -> Vec<(String, Value)> {
        self.recorded().created.clone()
    }

    /// `(playlist_id, uris)` of every add-tracks request.
    pub fn added_tracks(&self) -> Vec<(String, Vec<String>)> {
        self.recorded().added.clone()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.state.recorded.lock().expect("recorded lock poisoned")
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn authorize(state: &ApiState, headers: &HeaderMap) -> Result<(), Rejection> {
    let expected = format!("Bearer {}", state.token);
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if provided == Some(expected.as_str()) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"status": 401, "message": "Invalid access token"}})),
        ))
    }
}

fn track_json(track: &TrackCandidate) -> Value {
    json!({
        "id": track.id,
        "name": track.name,
        "popularity": track.popularity,
        "artists": [{"id": "artist", "name": track.artist}],
        "uri": track.uri,
        "type": "track",
    })
}

async fn search(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, Rejection> {
    authorize(&state, &headers)?;

    let q = params.get("q").cloned().unwrap_or_default();
    let term = q
        .strip_prefix("track:\"")
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(&q)
        .to_lowercase();
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);
    let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);

    let matching: Vec<&TrackCandidate> = state
        .tracks
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&term))
        .collect();
    let items: Vec<Value> = matching
        .iter()
        .skip(offset)
        .take(limit)
        .map(|t| track_json(t))
        .collect();

    state
        .recorded
        .lock()
        .expect("recorded lock poisoned")
        .searches
        .push(params);

    Ok(Json(json!({
        "tracks": {
            "items": items,
            "limit": limit,
            "offset": offset,
            "total": matching.len(),
        }
    })))
}

async fn me(State(state): State<Arc<ApiState>>, headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    authorize(&state, &headers)?;
    Ok(Json(json!({"id": STUB_USER_ID, "display_name": "Stub User"})))
}

async fn create_playlist(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), Rejection> {
    authorize(&state, &headers)?;

    let mut recorded = state.recorded.lock().expect("recorded lock poisoned");
    recorded.created.push((user_id, body.clone()));
    let id = format!("stub-playlist-{}", recorded.created.len());

    Ok((
        StatusCode::CREATED,
        Json(json!({"id": id, "name": body["name"], "public": body["public"]})),
    ))
}

async fn add_tracks(
    State(state): State<Arc<ApiState>>,
    Path(playlist_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), Rejection> {
    authorize(&state, &headers)?;

    let uris: Vec<String> = body["uris"]
        .as_array()
        .map(|uris| {
            uris.iter()
                .filter_map(|u| u.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default();
    state
        .recorded
        .lock()
        .expect("recorded lock poisoned")
        .added
        .push((playlist_id, uris));

    Ok((StatusCode::CREATED, Json(json!({"snapshot_id": "stub-snapshot"}))))
}
