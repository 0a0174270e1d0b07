//! In-memory stand-in for the course file server.
//!
//! Files live in a map keyed by their absolute path (`/archivo.txt`).
//! `POST /` accepts free text and echoes it back; `GET /` lists what is
//! stored.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Default)]
pub struct Store {
    files: BTreeMap<String, String>,
    posted: Vec<String>,
}

pub type Db = Arc<RwLock<Store>>;

/// Body of `GET /`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    pub files: Vec<String>,
    pub posted: usize,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/", get(list_files).post(receive_text))
        .route("/{*path}", get(read_file).put(write_file).delete(delete_file))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn key(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

async fn list_files(State(db): State<Db>) -> Json<Listing> {
    let store = db.read().await;
    Json(Listing {
        files: store.files.keys().cloned().collect(),
        posted: store.posted.len(),
    })
}

async fn receive_text(State(db): State<Db>, body: String) -> (StatusCode, String) {
    tracing::debug!(bytes = body.len(), "received POST body");
    db.write().await.posted.push(body.clone());
    (StatusCode::CREATED, body)
}

async fn read_file(State(db): State<Db>, Path(path): Path<String>) -> Result<String, StatusCode> {
    let store = db.read().await;
    store.files.get(&key(&path)).cloned().ok_or(StatusCode::NOT_FOUND)
}

async fn write_file(State(db): State<Db>, Path(path): Path<String>, body: String) -> StatusCode {
    let mut store = db.write().await;
    match store.files.insert(key(&path), body) {
        Some(_) => StatusCode::OK,
        None => StatusCode::CREATED,
    }
}

async fn delete_file(State(db): State<Db>, Path(path): Path<String>) -> StatusCode {
    let mut store = db.write().await;
    store
        .files
        .remove(&key(&path))
        .map(|_| StatusCode::NO_CONTENT)
        .unwrap_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_normalizes_leading_slash() {
        assert_eq!(key("archivo.txt"), "/archivo.txt");
        assert_eq!(key("/archivo.txt"), "/archivo.txt");
        assert_eq!(key("dir/nested.txt"), "/dir/nested.txt");
    }

    #[test]
    fn listing_serializes_to_json() {
        let listing = Listing {
            files: vec!["/a.txt".to_string()],
            posted: 2,
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["files"][0], "/a.txt");
        assert_eq!(json["posted"], 2);
    }

    #[test]
    fn listing_roundtrips_through_json() {
        let listing: Listing = serde_json::from_str(r#"{"files":[],"posted":0}"#).unwrap();
        assert!(listing.files.is_empty());
        assert_eq!(listing.posted, 0);
    }
}
