use crate::config::SourceConfig;
use crate::server::guards::auth::RequireKeyAuth;
use crate::server::routes::{config, sessions, sync};
use crate::store::ContentStore;
use crate::sync::{
    ResultReporter, SharedConfigStore, SnapshotExtractor, SyncPipeline, SyncService,
};
use crate::watcher::{SessionRegistry, SyncDispatcher};

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct BridgeState {
    pub sessions: Arc<SessionRegistry>,
    pub service: Arc<SyncService>,
    pub snapshots: Arc<SnapshotExtractor>,
    pub config: Arc<SharedConfigStore>,
    pub bridge_key: Arc<str>,
}

impl BridgeState {
    /// Wires the pipeline, the snapshot extractor and the watcher registry around `store`.
    pub fn new(
        store: Arc<dyn ContentStore>,
        config: Arc<SharedConfigStore>,
        reporter: ResultReporter,
        source: SourceConfig,
        bridge_key: Arc<str>,
    ) -> Self {
        let pipeline = Arc::new(SyncPipeline::new(store, config.clone(), reporter));
        let snapshots = Arc::new(SnapshotExtractor::new());
        let service = Arc::new(SyncService::new(pipeline, snapshots.clone(), source));
        let sessions = Arc::new(SessionRegistry::new(Arc::new(SyncDispatcher::new(
            service.clone(),
        ))));

        Self {
            sessions,
            service,
            snapshots,
            config,
            bridge_key,
        }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis();
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

pub fn bridge_router(state: BridgeState) -> Router {
    let bridge = Router::new()
        // Page sessions
        .route("/sessions", post(sessions::open_session))
        .route("/sessions/{id}", delete(sessions::close_session))
        .route("/sessions/{id}/signals", post(sessions::post_signal))
        .route("/sessions/{id}/snapshot", put(sessions::put_snapshot))
        // Sync actions and status
        .route("/sync", post(sync::manual_sync))
        .route("/status", get(sync::status))
        .route("/verify", post(sync::verify))
        // Config store writes
        .route("/config/target", put(config::update_target))
        .route("/config/auto-sync", put(config::set_auto_sync))
        .layer(middleware::from_extractor_with_state::<RequireKeyAuth, _>(
            state.clone(),
        ));

    Router::new()
        .merge(bridge)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
