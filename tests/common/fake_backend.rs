//! Stateful in-process vocabulary backend for end-to-end tests.
//!
//! Implements the endpoints the client talks to, plus a Google token and
//! userinfo endpoint, on top of plain in-memory tables.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const HISTORY_LIST: &str = "Vocab Word History";
pub const SEED_LIST: &str = "Created List for testuser";
pub const CREATED_AT: &str = "2025-01-15T10:00:00Z";

#[derive(Debug, Clone)]
pub struct FakeUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub security_question: String,
    pub security_answer: String,
}

#[derive(Debug, Clone)]
pub struct FakeList {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct FakeWord {
    pub id: i64,
    pub list_id: i64,
    pub user_id: i64,
    pub word: String,
    pub definition: String,
}

#[derive(Debug, Clone)]
pub struct GoogleAccount {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct Tables {
    pub users: Vec<FakeUser>,
    pub lists: Vec<FakeList>,
    pub words: Vec<FakeWord>,
    pub history: HashMap<i64, i64>,
    next_id: i64,
    /// Omit `userId` from register responses.
    pub register_without_id: bool,
    /// Leak the history list into the exclude-history response.
    pub leak_history: bool,
    pub google: Option<GoogleAccount>,
    /// Form bodies posted to the token endpoint.
    pub token_requests: Vec<HashMap<String, String>>,
}

impl Tables {
    fn next(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn add_user(&mut self, email: &str, password: &str, question: &str, answer: &str) -> i64 {
        let id = self.next();
        self.users.push(FakeUser {
            id,
            email: email.to_string(),
            password: password.to_string(),
            security_question: question.to_string(),
            security_answer: answer.to_string(),
        });
        let history = self.add_list(id, HISTORY_LIST);
        self.history.insert(id, history);
        id
    }

    fn add_list(&mut self, user_id: i64, name: &str) -> i64 {
        let id = self.next();
        self.lists.push(FakeList {
            id,
            user_id,
            name: name.to_string(),
        });
        id
    }

    fn add_word(&mut self, user_id: i64, list_id: i64, word: &str, definition: &str) -> i64 {
        let id = self.next();
        self.words.push(FakeWord {
            id,
            list_id,
            user_id,
            word: word.to_string(),
            definition: definition.to_string(),
        });
        id
    }

    pub fn user_by_email(&self, email: &str) -> Option<&FakeUser> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn lists_of(&self, user_id: i64) -> Vec<&FakeList> {
        self.lists.iter().filter(|l| l.user_id == user_id).collect()
    }

    pub fn words_in(&self, list_id: i64) -> Vec<&FakeWord> {
        self.words.iter().filter(|w| w.list_id == list_id).collect()
    }
}

type Shared = Arc<Mutex<Tables>>;

pub struct FakeBackend {
    pub addr: SocketAddr,
    pub tables: Shared,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl FakeBackend {
    /// Start with the demo account: `testuser` / `123`, a history list, and
    /// one list holding "serendipity".
    pub async fn start() -> Self {
        let mut tables = Tables::default();
        let user = tables.add_user("testuser", "123", "What is 1 + 1?", "2");
        let list = tables.add_list(user, SEED_LIST);
        tables.add_word(
            user,
            list,
            "serendipity",
            "The occurrence and development of events by chance in a happy or beneficial way.",
        );
        let tables = Arc::new(Mutex::new(tables));

        let app = Router::new()
            .route("/api/dictionary/random", get(random_word))
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/vocab/lists", post(create_list))
            .route("/api/vocab/lists/{user}", get(all_lists))
            .route("/api/vocab/lists/{user}/exclude-history", get(lists_excluding_history))
            .route("/api/vocab/lists/{user}/{list}", delete(delete_list))
            .route("/api/vocab/words", post(add_word))
            .route("/api/vocab/words/{user}/{list}", get(words_in_list))
            .route("/oauth/token", post(google_token))
            .route("/oauth/userinfo", get(google_userinfo))
            .with_state(Arc::clone(&tables));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            tables,
            shutdown: shutdown_tx,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn user_id(&self, email: &str) -> i64 {
        self.tables
            .lock()
            .await
            .user_by_email(email)
            .map(|u| u.id)
            .expect("user exists")
    }

    pub async fn history_id(&self, email: &str) -> i64 {
        let tables = self.tables.lock().await;
        let user = tables.user_by_email(email).expect("user exists").id;
        tables.history[&user]
    }

    pub async fn list_id(&self, user_id: i64, name: &str) -> Option<i64> {
        self.tables
            .lock()
            .await
            .lists
            .iter()
            .find(|l| l.user_id == user_id && l.name == name)
            .map(|l| l.id)
    }

    pub async fn set_google_account(&self, id: &str, email: &str) {
        self.tables.lock().await.google = Some(GoogleAccount {
            id: id.to_string(),
            email: email.to_string(),
            name: "Test Person".to_string(),
        });
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

fn list_json(list: &FakeList) -> Value {
    json!({
        "id": list.id,
        "userId": list.user_id,
        "listName": list.name,
        "createdAt": CREATED_AT,
    })
}

fn word_json(word: &FakeWord) -> Value {
    json!({
        "id": word.id,
        "listId": word.list_id,
        "userId": word.user_id,
        "word": word.word,
        "definition": word.definition,
        "createdAt": CREATED_AT,
    })
}

fn error(status: StatusCode, message: &str, code: Option<&str>) -> Response {
    let mut body = json!({ "error": message });
    if let Some(code) = code {
        body["code"] = json!(code);
    }
    (status, Json(body)).into_response()
}

/// Ids arrive as strings or numbers depending on the client.
fn id_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_of<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or("")
}

async fn random_word() -> Json<Value> {
    Json(json!({
        "word": "laconic",
        "shortdef": ["using or involving the use of a minimum of words"],
    }))
}

async fn login(State(tables): State<Shared>, Json(body): Json<Value>) -> Response {
    let tables = tables.lock().await;
    let email = text_of(&body, "email");
    let Some(user) = tables.user_by_email(email) else {
        return error(StatusCode::NOT_FOUND, "User not found", Some("USER_NOT_FOUND"));
    };
    if user.password != text_of(&body, "password") {
        return error(StatusCode::UNAUTHORIZED, "Invalid credentials", None);
    }
    Json(json!({ "message": "Login successful", "userId": user.id })).into_response()
}

async fn register(State(tables): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut tables = tables.lock().await;
    let email = text_of(&body, "email").to_string();
    if email.is_empty() || text_of(&body, "password").is_empty() {
        return error(StatusCode::BAD_REQUEST, "Email and password are required", None);
    }
    if tables.user_by_email(&email).is_some() {
        return error(StatusCode::CONFLICT, "User already exists", Some("USER_EXISTS"));
    }
    let password = text_of(&body, "password").to_string();
    let question = text_of(&body, "securityQuestion").to_string();
    let answer = text_of(&body, "securityAnswer").to_string();
    let id = tables.add_user(&email, &password, &question, &answer);

    let body = if tables.register_without_id {
        json!({ "message": "User registered" })
    } else {
        json!({ "message": "User registered", "userId": id })
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn all_lists(State(tables): State<Shared>, Path(user): Path<String>) -> Response {
    let tables = tables.lock().await;
    let Some(user) = id_of(&Value::String(user)) else {
        return error(StatusCode::BAD_REQUEST, "Invalid user id", None);
    };
    let lists: Vec<Value> = tables.lists_of(user).into_iter().map(list_json).collect();
    Json(Value::Array(lists)).into_response()
}

async fn lists_excluding_history(
    State(tables): State<Shared>,
    Path(user): Path<String>,
) -> Response {
    let tables = tables.lock().await;
    let Some(user) = id_of(&Value::String(user)) else {
        return error(StatusCode::BAD_REQUEST, "Invalid user id", None);
    };
    let history = tables.history.get(&user).copied();
    let lists: Vec<Value> = tables
        .lists_of(user)
        .into_iter()
        .filter(|l| tables.leak_history || Some(l.id) != history)
        .map(list_json)
        .collect();
    Json(json!({ "vocabHistoryId": history, "lists": lists })).into_response()
}

async fn create_list(State(tables): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut tables = tables.lock().await;
    let Some(user) = body.get("userId").and_then(id_of) else {
        return error(StatusCode::BAD_REQUEST, "userId is required", None);
    };
    let name = text_of(&body, "listName").to_string();
    if name.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "", None);
    }
    let id = tables.add_list(user, &name);
    let list = tables.lists.iter().find(|l| l.id == id).map(list_json);
    (StatusCode::CREATED, Json(json!({ "list": list }))).into_response()
}

async fn delete_list(
    State(tables): State<Shared>,
    Path((user, list)): Path<(String, String)>,
) -> Response {
    let mut tables = tables.lock().await;
    let (Some(user), Some(list)) = (
        id_of(&Value::String(user)),
        id_of(&Value::String(list)),
    ) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Some(found) = tables.lists.iter().find(|l| l.id == list).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if found.user_id != user {
        return StatusCode::FORBIDDEN.into_response();
    }
    tables.words.retain(|w| w.list_id != list);
    tables.lists.retain(|l| l.id != list);
    StatusCode::NO_CONTENT.into_response()
}

async fn words_in_list(
    State(tables): State<Shared>,
    Path((_user, list)): Path<(String, String)>,
) -> Response {
    let tables = tables.lock().await;
    let Some(list) = id_of(&Value::String(list)) else {
        return error(StatusCode::BAD_REQUEST, "Invalid list id", None);
    };
    let Some(found) = tables.lists.iter().find(|l| l.id == list) else {
        return error(StatusCode::NOT_FOUND, "List not found", Some("NOT_FOUND"));
    };
    let words: Vec<Value> = tables.words_in(list).into_iter().map(word_json).collect();
    Json(json!({ "listName": found.name, "words": words })).into_response()
}

async fn add_word(State(tables): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut tables = tables.lock().await;
    let (Some(user), Some(list)) = (
        body.get("userId").and_then(id_of),
        body.get("listId").and_then(id_of),
    ) else {
        return error(StatusCode::BAD_REQUEST, "userId and listId are required", None);
    };
    if !tables.lists.iter().any(|l| l.id == list) {
        return error(StatusCode::NOT_FOUND, "List not found", Some("NOT_FOUND"));
    }
    let word = text_of(&body, "word").to_string();
    let definition = text_of(&body, "definition").to_string();
    let id = tables.add_word(user, list, &word, &definition);
    let saved = tables.words.iter().find(|w| w.id == id).map(word_json);
    (StatusCode::CREATED, Json(json!({ "word": saved }))).into_response()
}

async fn google_token(
    State(tables): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut tables = tables.lock().await;
    let code = form.get("code").cloned().unwrap_or_default();
    tables.token_requests.push(form);
    if code != "good-code" {
        return error(StatusCode::BAD_REQUEST, "invalid_grant", None);
    }
    Json(json!({
        "access_token": "google-access-token",
        "token_type": "Bearer",
        "expires_in": 3599,
    }))
    .into_response()
}

async fn google_userinfo(State(tables): State<Shared>, headers: HeaderMap) -> Response {
    let tables = tables.lock().await;
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer google-access-token");
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match &tables.google {
        Some(account) => Json(json!({
            "id": account.id,
            "email": account.email,
            "name": account.name,
        }))
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
