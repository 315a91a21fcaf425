use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: Option<String>,
}

/// What the server actually received, reflected back so clients can verify
/// query decoding, form bodies, and signature parameters end to end.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub params: Vec<(String, String)>,
}

pub type Db = Arc<RwLock<HashMap<u64, User>>>;

/// Build the app with one seeded user (42, "Ann").
pub fn app() -> Router {
    let mut seed = HashMap::new();
    seed.insert(
        42,
        User {
            id: 42,
            name: "Ann".to_string(),
            email: None,
        },
    );
    let db: Db = Arc::new(RwLock::new(seed));
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/echo", get(echo_query).post(echo_form))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_user(
    State(db): State<Db>,
    Form(input): Form<CreateUser>,
) -> (StatusCode, Json<User>) {
    let mut users = db.write().await;
    let id = users.keys().max().copied().unwrap_or(0) + 1;
    let user = User {
        id,
        name: input.name,
        email: input.email,
    };
    users.insert(id, user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn echo_query(Query(params): Query<Vec<(String, String)>>) -> Json<Echo> {
    Json(Echo { params })
}

async fn echo_form(Form(params): Form<Vec<(String, String)>>) -> Json<Echo> {
    Json(Echo { params })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_without_null_email() {
        let user = User {
            id: 42,
            name: "Ann".to_string(),
            email: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"id":42,"name":"Ann"}"#);
    }

    #[test]
    fn user_roundtrips_through_json() {
        let user = User {
            id: 7,
            name: "Bo".to_string(),
            email: Some("bo@example.com".to_string()),
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
