//! Axum web server with WebSocket streaming for the visualizer frontend.
//!
//! One playback engine per visualizer; REST routes drive the controls and a
//! single WebSocket streams every engine's frames, tagged with the
//! visualizer they belong to. Rendering happens in the browser.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use algoscope_dataset::{DatasetConfig, DatasetKind, GridPos, NodeId};
use algoscope_playback::{Engine, EngineError, EngineEvent, Snapshot};
use algoscope_trace::AlgorithmId;

/// The three visualizers the server drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizerId {
    Sorting,
    Pathfinding,
    Traversal,
}

impl VisualizerId {
    pub const ALL: [VisualizerId; 3] = [
        VisualizerId::Sorting,
        VisualizerId::Pathfinding,
        VisualizerId::Traversal,
    ];

    pub fn dataset_kind(&self) -> DatasetKind {
        match self {
            VisualizerId::Sorting => DatasetKind::Sequence,
            VisualizerId::Pathfinding => DatasetKind::Grid,
            VisualizerId::Traversal => DatasetKind::Graph,
        }
    }

    fn from_path(s: &str) -> Option<Self> {
        match s {
            "sorting" => Some(VisualizerId::Sorting),
            "pathfinding" => Some(VisualizerId::Pathfinding),
            "traversal" => Some(VisualizerId::Traversal),
            _ => None,
        }
    }
}

/// Shared application state: one engine per visualizer.
pub struct AppState {
    sorting: Engine,
    pathfinding: Engine,
    traversal: Engine,
}

impl AppState {
    fn engine(&self, id: VisualizerId) -> &Engine {
        match id {
            VisualizerId::Sorting => &self.sorting,
            VisualizerId::Pathfinding => &self.pathfinding,
            VisualizerId::Traversal => &self.traversal,
        }
    }
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl Default for VisServer {
    fn default() -> Self {
        Self::new(DatasetConfig::default())
    }
}

impl VisServer {
    /// Create a server with one engine per visualizer, all sharing a dataset
    /// configuration.
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            state: Arc::new(AppState {
                sorting: Engine::new(DatasetKind::Sequence, config.clone()),
                pathfinding: Engine::new(DatasetKind::Grid, config.clone()),
                traversal: Engine::new(DatasetKind::Graph, config),
            }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            // Serve the frontend
            .route("/", get(index_handler))
            // API routes
            .route("/api/status", get(status_handler))
            .route("/api/{vis}/snapshot", get(snapshot_handler))
            .route("/api/{vis}/run", post(run_handler))
            .route("/api/{vis}/pause", post(pause_handler))
            .route("/api/{vis}/resume", post(resume_handler))
            .route("/api/{vis}/reset", post(reset_handler))
            .route("/api/{vis}/speed", post(speed_handler))
            .route("/api/{vis}/grid/wall", post(wall_handler))
            .route("/api/{vis}/grid/start", post(grid_start_handler))
            .route("/api/{vis}/grid/end", post(grid_end_handler))
            .route("/api/{vis}/graph/start", post(graph_start_handler))
            .route("/api/{vis}/graph/node", post(graph_node_handler))
            // WebSocket for real-time frames
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> Result<(), std::io::Error> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("visualizer running on http://localhost:{}", port);
        axum::serve(listener, self.router()).await
    }
}

/// API error with the status code it maps to.
struct ApiError(StatusCode, String);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let status = match err {
            EngineError::EditWhileRunning => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct Body {
            error: String,
        }
        (self.0, Json(Body { error: self.1 })).into_response()
    }
}

fn visualizer(path: &str) -> Result<VisualizerId, ApiError> {
    VisualizerId::from_path(path).ok_or_else(|| {
        ApiError(
            StatusCode::NOT_FOUND,
            format!("unknown visualizer '{path}'"),
        )
    })
}

#[derive(Serialize)]
struct Ack {
    ok: bool,
}

const ACK: Ack = Ack { ok: true };

/// Serve the frontend page.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Server status response: the static lookup tables the frontend builds its
/// selectors from.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    visualizers: Vec<VisualizerId>,
    algorithms: Vec<AlgorithmEntry>,
}

#[derive(Serialize)]
struct AlgorithmEntry {
    id: AlgorithmId,
    name: &'static str,
    dataset: DatasetKind,
}

async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        visualizers: VisualizerId::ALL.to_vec(),
        algorithms: AlgorithmId::ALL
            .iter()
            .map(|&id| AlgorithmEntry {
                id,
                name: id.name(),
                dataset: id.dataset_kind(),
            })
            .collect(),
    })
}

async fn snapshot_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    let id = visualizer(&vis)?;
    Ok(Json(state.engine(id).snapshot().await))
}

#[derive(Deserialize)]
struct RunRequest {
    algorithm: AlgorithmId,
}

async fn run_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
    Json(req): Json<RunRequest>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state.engine(id).start_run(req.algorithm).await?;
    Ok(Json(ACK))
}

async fn pause_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state.engine(id).pause().await?;
    Ok(Json(ACK))
}

async fn resume_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state.engine(id).resume().await?;
    Ok(Json(ACK))
}

async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state.engine(id).reset().await;
    Ok(Json(ACK))
}

#[derive(Deserialize)]
struct SpeedRequest {
    speed: u8,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
    Json(req): Json<SpeedRequest>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state.engine(id).set_speed(req.speed).await;
    Ok(Json(ACK))
}

#[derive(Deserialize)]
struct CellRequest {
    row: usize,
    col: usize,
}

async fn wall_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
    Json(req): Json<CellRequest>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state
        .engine(id)
        .toggle_wall(GridPos::new(req.row, req.col))
        .await?;
    Ok(Json(ACK))
}

async fn grid_start_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
    Json(req): Json<CellRequest>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state
        .engine(id)
        .move_start(GridPos::new(req.row, req.col))
        .await?;
    Ok(Json(ACK))
}

async fn grid_end_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
    Json(req): Json<CellRequest>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state
        .engine(id)
        .move_end(GridPos::new(req.row, req.col))
        .await?;
    Ok(Json(ACK))
}

#[derive(Deserialize)]
struct GraphStartRequest {
    node: Option<usize>,
}

async fn graph_start_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
    Json(req): Json<GraphStartRequest>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state
        .engine(id)
        .select_start_node(req.node.map(NodeId))
        .await?;
    Ok(Json(ACK))
}

#[derive(Deserialize)]
struct MoveNodeRequest {
    node: usize,
    x: f32,
    y: f32,
}

async fn graph_node_handler(
    State(state): State<Arc<AppState>>,
    Path(vis): Path<String>,
    Json(req): Json<MoveNodeRequest>,
) -> Result<Json<Ack>, ApiError> {
    let id = visualizer(&vis)?;
    state
        .engine(id)
        .move_node(NodeId(req.node), req.x, req.y)
        .await?;
    Ok(Json(ACK))
}

/// A frame as sent over the WebSocket, tagged with its visualizer.
#[derive(Serialize)]
struct WsFrame {
    visualizer: VisualizerId,
    #[serde(flatten)]
    event: EngineEvent,
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    use tokio::sync::broadcast::error::RecvError;

    let mut sorting = state.sorting.subscribe();
    let mut pathfinding = state.pathfinding.subscribe();
    let mut traversal = state.traversal.subscribe();

    loop {
        let frame = tokio::select! {
            event = sorting.recv() => tag(VisualizerId::Sorting, event),
            event = pathfinding.recv() => tag(VisualizerId::Pathfinding, event),
            event = traversal.recv() => tag(VisualizerId::Traversal, event),
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => continue,
                }
            }
        };

        match frame {
            Ok(frame) => {
                if let Ok(json) = serde_json::to_string(&frame) {
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
            }
            // A lagged subscriber skips frames; the next snapshot fetch
            // resynchronizes the renderer.
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
}

fn tag(
    visualizer: VisualizerId,
    event: Result<EngineEvent, tokio::sync::broadcast::error::RecvError>,
) -> Result<WsFrame, tokio::sync::broadcast::error::RecvError> {
    event.map(|event| WsFrame { visualizer, event })
}
