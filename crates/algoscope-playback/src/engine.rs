//! The timer-driven playback engine.
//!
//! One engine drives one visualizer. State sits behind an async mutex; a
//! spawned ticker task sleeps one interval, then applies the next step under
//! the lock. Every control that must kill an in-flight tick (pause, reset, a
//! new run) bumps the session generation; a ticker that wakes up to a
//! different generation exits without touching anything, so a tick scheduled
//! before a reset can never mutate state after it.

use std::sync::Arc;
use std::time::Duration;

use algoscope_dataset::{Dataset, DatasetConfig, DatasetKind, GridPos, NodeId};
use algoscope_trace::{record, AlgorithmId, View};
use serde::Serialize;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::session::{AppliedStep, Phase, PlaybackSession, PlaybackState};
use crate::speed::Speed;

/// Capacity of the frame broadcast channel. Slow subscribers lag rather than
/// block the ticker.
const CHANNEL_CAPACITY: usize = 256;

/// Everything the renderer hears from the engine.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// One step was applied; `view` already reflects it
    Step {
        cursor: usize,
        step: AppliedStep,
        view: View,
    },
    /// A run (all phases) finished; sent exactly once per run
    Completed,
    /// The session was torn down and the dataset regenerated
    Reset,
}

/// Playback status for sending to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub speed: Speed,
    pub session: Option<SessionStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub cursor: usize,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub phase: Phase,
    pub progress: f64,
    pub interval_ms: u64,
}

/// Current view plus playback status, for late-joining renderers.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub view: View,
    pub status: EngineStatus,
}

struct Inner {
    kind: DatasetKind,
    config: DatasetConfig,
    dataset: Dataset,
    speed: Speed,
    session: Option<PlaybackSession>,
    /// Bumped by every pause/reset/new-run; stale tickers check it and die.
    generation: u64,
}

/// The playback engine for one visualizer.
pub struct Engine {
    inner: Arc<Mutex<Inner>>,
    events: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Create an engine with a freshly generated dataset.
    pub fn new(kind: DatasetKind, config: DatasetConfig) -> Self {
        let dataset = Dataset::generate(kind, &config);
        let (events, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                kind,
                config,
                dataset,
                speed: Speed::default(),
                session: None,
                generation: 0,
            })),
            events,
        }
    }

    /// Subscribe to frames and completion notices.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Record a trace for `algorithm` over the current dataset and start
    /// playing it. Any prior session is fully torn down first.
    pub async fn start_run(&self, algorithm: AlgorithmId) -> Result<(), EngineError> {
        let mut inner = self.inner.lock().await;
        let trace = record(&inner.dataset, algorithm)?;

        inner.generation += 1;
        let interval = inner.speed.interval();
        let session = PlaybackSession::new(&inner.dataset, trace, interval);
        let steps = session.total_steps();
        info!(algorithm = %algorithm, steps, interval_ms = interval.as_millis() as u64, "run started");

        if session.state() == PlaybackState::Finished {
            // Empty trace: complete immediately, no ticker.
            inner.session = Some(session);
            let _ = self.events.send(EngineEvent::Completed);
            return Ok(());
        }

        inner.session = Some(session);
        self.spawn_ticker(inner.generation, interval);
        Ok(())
    }

    /// Stop scheduling ticks, keeping cursor and view for a later resume.
    pub async fn pause(&self) -> Result<(), EngineError> {
        let mut inner = self.inner.lock().await;
        let session = inner.session.as_mut().ok_or(EngineError::NoSession)?;
        match session.state() {
            PlaybackState::Playing => {
                session.pause();
                inner.generation += 1; // invalidate the pending tick
                debug!("paused");
                Ok(())
            }
            PlaybackState::Paused => Ok(()),
            PlaybackState::Finished => Err(EngineError::NoSession),
        }
    }

    /// Continue a paused session from its exact cursor.
    pub async fn resume(&self) -> Result<(), EngineError> {
        let mut inner = self.inner.lock().await;
        let session = inner.session.as_mut().ok_or(EngineError::NothingToResume)?;
        if session.state() != PlaybackState::Paused {
            return Err(EngineError::NothingToResume);
        }
        session.resume();
        let interval = session.interval();
        inner.generation += 1;
        debug!("resumed");
        self.spawn_ticker(inner.generation, interval);
        Ok(())
    }

    /// Discard the session (invalidating any pending tick) and regenerate the
    /// dataset under a new seed.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.generation += 1;
        inner.session = None;
        inner.config.seed = inner.config.seed.wrapping_add(1);
        inner.dataset = Dataset::generate(inner.kind, &inner.config);
        info!(seed = inner.config.seed, "reset; dataset regenerated");
        let _ = self.events.send(EngineEvent::Reset);
    }

    /// Store a new speed. Takes effect when the next session starts; an
    /// in-flight session keeps the interval it was born with.
    pub async fn set_speed(&self, value: u8) {
        let mut inner = self.inner.lock().await;
        inner.speed = Speed::new(value);
        debug!(speed = inner.speed.value(), "speed set; applies to the next run");
    }

    /// Current view and playback status.
    pub async fn snapshot(&self) -> Snapshot {
        let inner = self.inner.lock().await;
        let view = match &inner.session {
            Some(session) => session.view().clone(),
            None => View::of(&inner.dataset),
        };
        Snapshot {
            view,
            status: EngineStatus {
                speed: inner.speed,
                session: inner.session.as_ref().map(|s| SessionStatus {
                    cursor: s.cursor(),
                    total_steps: s.total_steps(),
                    state: s.state(),
                    phase: s.phase(),
                    progress: s.progress(),
                    interval_ms: s.interval().as_millis() as u64,
                }),
            },
        }
    }

    /// Toggle a wall cell. Rejected while a session is active.
    pub async fn toggle_wall(&self, pos: GridPos) -> Result<(), EngineError> {
        self.edit(|dataset| match dataset {
            Dataset::Grid(grid) => grid.toggle_wall(pos).map_err(Into::into),
            _ => Err(EngineError::WrongVisualizer),
        })
        .await
    }

    /// Move the grid start cell. Rejected while a session is active.
    pub async fn move_start(&self, pos: GridPos) -> Result<(), EngineError> {
        self.edit(|dataset| match dataset {
            Dataset::Grid(grid) => grid.move_start(pos).map_err(Into::into),
            _ => Err(EngineError::WrongVisualizer),
        })
        .await
    }

    /// Move the grid end cell. Rejected while a session is active.
    pub async fn move_end(&self, pos: GridPos) -> Result<(), EngineError> {
        self.edit(|dataset| match dataset {
            Dataset::Grid(grid) => grid.move_end(pos).map_err(Into::into),
            _ => Err(EngineError::WrongVisualizer),
        })
        .await
    }

    /// Select the traversal start node. Rejected while a session is active.
    pub async fn select_start_node(&self, node: Option<NodeId>) -> Result<(), EngineError> {
        self.edit(|dataset| match dataset {
            Dataset::Graph(graph) => graph.set_start(node).map_err(Into::into),
            _ => Err(EngineError::WrongVisualizer),
        })
        .await
    }

    /// Reposition a graph node. Rejected while a session is active.
    pub async fn move_node(&self, node: NodeId, x: f32, y: f32) -> Result<(), EngineError> {
        self.edit(|dataset| match dataset {
            Dataset::Graph(graph) => graph.move_node(node, x, y).map_err(Into::into),
            _ => Err(EngineError::WrongVisualizer),
        })
        .await
    }

    /// Run a dataset edit if no session is active. A finished session is torn
    /// down first so its stale highlights don't outlive the edit.
    async fn edit(
        &self,
        apply: impl FnOnce(&mut Dataset) -> Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        let mut inner = self.inner.lock().await;
        if inner.session.as_ref().is_some_and(|s| s.is_active()) {
            warn!("dataset edit rejected while a session is active");
            return Err(EngineError::EditWhileRunning);
        }
        inner.session = None;
        apply(&mut inner.dataset)
    }

    fn spawn_ticker(&self, generation: u64, interval: Duration) {
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let mut guard = inner.lock().await;
                if guard.generation != generation {
                    // Cancelled at the tick boundary; never touch state.
                    break;
                }
                let Some(session) = guard.session.as_mut() else {
                    break;
                };
                let Some(applied) = session.step() else {
                    break;
                };
                let finished = applied.finished;
                let frame = EngineEvent::Step {
                    cursor: applied.cursor,
                    step: applied.step,
                    view: session.view().clone(),
                };
                let _ = events.send(frame);
                if finished {
                    info!("run complete");
                    let _ = events.send(EngineEvent::Completed);
                    break;
                }
            }
        });
    }
}
