use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagProtection {
    pub id: i64,
    pub pattern: String,
}

#[derive(Deserialize)]
pub struct CreateTagProtection {
    pub pattern: String,
}

/// Rules per `(owner, repo)`, plus the next id to hand out.
#[derive(Debug, Default)]
pub struct Store {
    repos: HashMap<(String, String), Vec<TagProtection>>,
    next_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

/// Router with the single repository `octo/hello`.
pub fn app() -> Router {
    app_with_repos(&[("octo", "hello")])
}

pub fn app_with_repos(repos: &[(&str, &str)]) -> Router {
    let store = Store {
        repos: repos
            .iter()
            .map(|(owner, repo)| ((owner.to_string(), repo.to_string()), Vec::new()))
            .collect(),
        next_id: 1,
    };
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route(
            "/repos/{owner}/{repo}/tags/protection",
            get(list_tag_protection).post(create_tag_protection),
        )
        .route(
            "/repos/{owner}/{repo}/tags/protection/{id}",
            delete(delete_tag_protection),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not Found" })),
    )
        .into_response()
}

async fn list_tag_protection(
    State(db): State<Db>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    let store = db.read().await;
    match store.repos.get(&(owner, repo)) {
        Some(rules) => Json(rules.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_tag_protection(
    State(db): State<Db>,
    Path((owner, repo)): Path<(String, String)>,
    Json(input): Json<CreateTagProtection>,
) -> Response {
    if input.pattern.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Validation Failed" })),
        )
            .into_response();
    }

    let mut store = db.write().await;
    let id = store.next_id;
    let Some(rules) = store.repos.get_mut(&(owner.clone(), repo.clone())) else {
        return not_found();
    };
    let rule = TagProtection {
        id,
        pattern: input.pattern,
    };
    rules.push(rule.clone());
    store.next_id += 1;
    tracing::info!(%owner, %repo, id, pattern = %rule.pattern, "created tag protection");
    (StatusCode::CREATED, Json(rule)).into_response()
}

async fn delete_tag_protection(
    State(db): State<Db>,
    Path((owner, repo, id)): Path<(String, String, i64)>,
) -> Response {
    let mut store = db.write().await;
    let Some(rules) = store.repos.get_mut(&(owner.clone(), repo.clone())) else {
        return not_found();
    };
    let Some(pos) = rules.iter().position(|r| r.id == id) else {
        return not_found();
    };
    rules.remove(pos);
    tracing::info!(%owner, %repo, id, "deleted tag protection");
    StatusCode::NO_CONTENT.into_response()
}
