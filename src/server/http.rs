use crate::bot::{ChoiceSet, Dispatcher, InboundEvent, OutboundEffect};
use crate::state::SessionRegistry;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type SharedDispatcher = Arc<Dispatcher>;

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    pub conversation_id: String,
    pub text: Option<String>,
    pub file_name: Option<String>,
    pub content: Option<String>,
}

impl EventRequest {
    pub fn into_event(self) -> Option<InboundEvent> {
        match (self.text, self.file_name, self.content) {
            (Some(text), None, None) => Some(InboundEvent::text(self.conversation_id, text)),
            (None, Some(file_name), Some(content)) => Some(InboundEvent::file(
                self.conversation_id,
                file_name,
                content.into_bytes(),
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectView {
    Text { message: String, choices: ChoiceSet },
    File { file_name: String, content: String },
}

impl From<OutboundEffect> for EffectView {
    fn from(effect: OutboundEffect) -> Self {
        match effect {
            OutboundEffect::SendText { message, choices } => EffectView::Text { message, choices },
            OutboundEffect::SendFile { file_name, bytes } => EffectView::File {
                file_name,
                content: String::from_utf8_lossy(&bytes).into_owned(),
            },
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "attraction-bot",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn info() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "attraction-bot",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Attraction dataset bot - HTTP Mode",
        "endpoints": {
            "GET /health": "Health check",
            "GET /info": "Server info",
            "POST /events": "Send a message ({conversation_id, text}) or a file ({conversation_id, file_name, content})"
        }
    }))
}

async fn events_handler(
    State(dispatcher): State<SharedDispatcher>,
    Json(payload): Json<EventRequest>,
) -> impl IntoResponse {
    let Some(event) = payload.into_event() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "expected either `text` or both `file_name` and `content`"
            })),
        );
    };

    let effects: Vec<EffectView> = dispatcher
        .handle(&event)
        .await
        .into_iter()
        .map(EffectView::from)
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "effects": effects })))
}

pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/events", post(events_handler))
        .with_state(Arc::new(dispatcher))
}

pub async fn run_http_server(bind_addr: &str, port: u16) -> anyhow::Result<()> {
    let app = router(Dispatcher::new(SessionRegistry::new()));

    let addr = format!("{}:{}", bind_addr, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("HTTP Server listening on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  GET  /info   - Server info");
    tracing::info!("  POST /events - Send a message or file");
    tracing::info!("Example:");
    tracing::info!(
        "  curl -X POST http://{}/events -H 'Content-Type: application/json' -d '{{\"conversation_id\": \"1\", \"text\": \"/start\"}}'",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown requested");
        })
        .await?;

    Ok(())
}
