//! Shared fixtures: an in-memory dauth backend and request helpers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use futures::stream::{self, StreamExt};
use tonic::Status;
use tower::ServiceExt;

use dapi::backend::{AuthBackend, RecordStream, SendStream};
use dapi::config::Config;
use dapi::proto::{
    AuthRequest, AuthResponse, DeleteResponse, PermRequest, PermResponse, TokenRequest,
    TokenResponse, UserPermRequest, UserPermResponse, UserRequest, UserResponse,
};
use dapi::AppState;

pub const TEST_TOKEN: &str = "test";

/// Scriptable backend. Reads stream back whatever the per-kind vectors hold,
/// saves echo their input, deletes report `delete_num`.
pub struct FakeBackend {
    calls: AtomicUsize,
    auth_calls: AtomicUsize,
    auth_script: Mutex<VecDeque<Result<AuthResponse, Status>>>,
    pub tokens: Mutex<Vec<TokenResponse>>,
    pub users: Mutex<Vec<UserResponse>>,
    pub perms: Mutex<Vec<PermResponse>>,
    pub user_perms: Mutex<Vec<UserPermResponse>>,
    /// Emitted after the configured items on every read stream.
    pub stream_error: Mutex<Option<Status>>,
    /// Emitted after the acknowledgements on every save stream.
    pub save_error: Mutex<Option<Status>>,
    /// Acknowledge at most this many saved records.
    pub ack_limit: Mutex<Option<usize>>,
    pub delete_num: Mutex<i64>,
    /// Applied before every read call returns.
    pub read_delay: Mutex<Option<Duration>>,
    pub auth_requests: Mutex<Vec<AuthRequest>>,
    pub user_reads: Mutex<Vec<UserRequest>>,
    pub saved_users: Arc<Mutex<Vec<UserRequest>>>,
    pub token_deletes: Mutex<Vec<TokenRequest>>,
    pub user_deletes: Mutex<Vec<UserRequest>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            auth_calls: AtomicUsize::new(0),
            auth_script: Mutex::new(VecDeque::new()),
            tokens: Mutex::new(Vec::new()),
            users: Mutex::new(Vec::new()),
            perms: Mutex::new(Vec::new()),
            user_perms: Mutex::new(Vec::new()),
            stream_error: Mutex::new(None),
            save_error: Mutex::new(None),
            ack_limit: Mutex::new(None),
            delete_num: Mutex::new(1),
            read_delay: Mutex::new(None),
            auth_requests: Mutex::new(Vec::new()),
            user_reads: Mutex::new(Vec::new()),
            saved_users: Arc::new(Mutex::new(Vec::new())),
            token_deletes: Mutex::new(Vec::new()),
            user_deletes: Mutex::new(Vec::new()),
        }
    }
}

pub fn authorized() -> AuthResponse {
    AuthResponse {
        ok: true,
        user: Some(UserResponse {
            id: 1,
            user: "test".into(),
            pass: "secret".into(),
        }),
    }
}

pub fn user(id: i64, name: &str) -> UserResponse {
    UserResponse {
        id,
        user: name.into(),
        pass: "secret".into(),
    }
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Total RPC calls of any kind.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    /// Queue results for upcoming `Auth` calls; once drained, every call
    /// succeeds.
    pub fn script_auth(&self, results: impl IntoIterator<Item = Result<AuthResponse, Status>>) {
        self.auth_script.lock().unwrap().extend(results);
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn read<T: Clone + Send + 'static>(&self, items: &Mutex<Vec<T>>) -> RecordStream<T> {
        self.hit();
        let delay = *self.read_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut out: Vec<Result<T, Status>> =
            items.lock().unwrap().iter().cloned().map(Ok).collect();
        if let Some(err) = self.stream_error.lock().unwrap().clone() {
            out.push(Err(err));
        }
        stream::iter(out).boxed()
    }

    fn echo<Req, Res>(
        &self,
        reqs: SendStream<Req>,
        ack: impl Fn(usize, Req) -> Res + Send + 'static,
    ) -> RecordStream<Res>
    where
        Req: Send + 'static,
        Res: Send + 'static,
    {
        self.hit();
        let limit = self.ack_limit.lock().unwrap().unwrap_or(usize::MAX);
        let tail = self.save_error.lock().unwrap().clone();
        reqs.take(limit)
            .enumerate()
            .map(move |(i, req)| Ok(ack(i, req)))
            .chain(stream::iter(tail.map(Err)))
            .boxed()
    }

    fn deleted(&self) -> DeleteResponse {
        self.hit();
        DeleteResponse {
            num: *self.delete_num.lock().unwrap(),
        }
    }
}

fn assigned(id: i64, index: usize) -> i64 {
    if id == 0 {
        index as i64 + 1
    } else {
        id
    }
}

#[async_trait]
impl AuthBackend for FakeBackend {
    async fn auth(&self, req: AuthRequest) -> Result<AuthResponse, Status> {
        self.hit();
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        self.auth_requests.lock().unwrap().push(req);
        self.auth_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(authorized()))
    }

    async fn login(&self, req: UserRequest) -> Result<TokenResponse, Status> {
        self.hit();
        if req.user == "test" && req.pass == "test" {
            Ok(TokenResponse {
                id: 1,
                token: "test".into(),
                user_id: 1,
                ..Default::default()
            })
        } else {
            Err(Status::unauthenticated("invalid credentials"))
        }
    }

    async fn logout(&self, req: TokenRequest) -> Result<TokenResponse, Status> {
        self.hit();
        if req.token.is_empty() {
            return Err(Status::invalid_argument("no token"));
        }
        Ok(TokenResponse {
            token: "logout".into(),
            ..Default::default()
        })
    }

    async fn get_tokens(&self, _req: TokenRequest) -> Result<RecordStream<TokenResponse>, Status> {
        Ok(self.read(&self.tokens).await)
    }

    async fn save_tokens(
        &self,
        reqs: SendStream<TokenRequest>,
    ) -> Result<RecordStream<TokenResponse>, Status> {
        Ok(self.echo(reqs, |i, r| TokenResponse {
            id: assigned(r.id, i),
            token: r.token,
            user_id: r.user_id,
            created: r.created,
            expires: r.expires,
        }))
    }

    async fn delete_tokens(&self, req: TokenRequest) -> Result<DeleteResponse, Status> {
        self.token_deletes.lock().unwrap().push(req);
        Ok(self.deleted())
    }

    async fn get_users(&self, req: UserRequest) -> Result<RecordStream<UserResponse>, Status> {
        self.user_reads.lock().unwrap().push(req);
        Ok(self.read(&self.users).await)
    }

    async fn save_users(
        &self,
        reqs: SendStream<UserRequest>,
    ) -> Result<RecordStream<UserResponse>, Status> {
        let saved = Arc::clone(&self.saved_users);
        Ok(self.echo(reqs, move |i, r| {
            saved.lock().unwrap().push(r.clone());
            UserResponse {
                id: assigned(r.id, i),
                user: r.user,
                pass: r.pass,
            }
        }))
    }

    async fn delete_users(&self, req: UserRequest) -> Result<DeleteResponse, Status> {
        self.user_deletes.lock().unwrap().push(req);
        Ok(self.deleted())
    }

    async fn get_perms(&self, _req: PermRequest) -> Result<RecordStream<PermResponse>, Status> {
        Ok(self.read(&self.perms).await)
    }

    async fn save_perms(
        &self,
        reqs: SendStream<PermRequest>,
    ) -> Result<RecordStream<PermResponse>, Status> {
        Ok(self.echo(reqs, |i, r| PermResponse {
            id: assigned(r.id, i),
            service: r.service,
            name: r.name,
        }))
    }

    async fn delete_perms(&self, _req: PermRequest) -> Result<DeleteResponse, Status> {
        Ok(self.deleted())
    }

    async fn get_user_perms(
        &self,
        _req: UserPermRequest,
    ) -> Result<RecordStream<UserPermResponse>, Status> {
        Ok(self.read(&self.user_perms).await)
    }

    async fn save_user_perms(
        &self,
        reqs: SendStream<UserPermRequest>,
    ) -> Result<RecordStream<UserPermResponse>, Status> {
        Ok(self.echo(reqs, |i, r| UserPermResponse {
            id: assigned(r.id, i),
            user_id: r.user_id,
            perm_id: r.perm_id,
        }))
    }

    async fn delete_user_perms(&self, _req: UserPermRequest) -> Result<DeleteResponse, Status> {
        Ok(self.deleted())
    }
}

pub fn app(backend: Arc<FakeBackend>) -> Router {
    app_with_config(backend, Config::default())
}

pub fn app_with_config(backend: Arc<FakeBackend>, config: Config) -> Router {
    let state = Arc::new(AppState::new(backend, config));
    dapi::api::build_router(state)
}

/// Request carrying the test token.
pub fn authed(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Token", TEST_TOKEN);
    with_body(builder, body)
}

/// Request with no token header.
pub fn anonymous(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    with_body(builder, body)
}

fn with_body(builder: axum::http::request::Builder, body: Option<serde_json::Value>) -> Request<Body> {
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: Router, req: Request<Body>) -> Response {
    app.oneshot(req).await.unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Status and parsed JSON body.
pub async fn send_json(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = send(app, req).await;
    let status = resp.status();
    let text = body_text(resp).await;
    let json = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
    (status, json)
}
