//! Algoscope Playback
//!
//! Replays a recorded step-event trace into visual state at a user-controlled
//! cadence, independent of which visualizer produced the events.
//!
//! # Architecture
//!
//! - **Speed**: `[1, 100]`, tick interval `101 - speed` ms, captured at
//!   session start
//! - **PlaybackSession**: trace + monotonic cursor + run state + view; pure
//!   state, no clock
//! - **Engine**: owns the dataset and session behind an async mutex, spawns
//!   one ticker task per (re)start, and broadcasts a frame per applied step
//!   plus exactly one completion notice per run
//!
//! Cancellation is cooperative: pause, reset and new runs bump a session
//! generation; a sleeping tick that wakes to a stale generation exits without
//! mutating anything.

mod engine;
mod error;
mod session;
mod speed;

pub use engine::{Engine, EngineEvent, EngineStatus, SessionStatus, Snapshot};
pub use error::EngineError;
pub use session::{Applied, AppliedStep, Phase, PlaybackSession, PlaybackState};
pub use speed::Speed;

#[cfg(test)]
mod tests {
    use super::*;
    use algoscope_dataset::{DatasetConfig, DatasetKind, GridPos, NodeId};
    use algoscope_trace::{AlgorithmId, RecorderError, View};
    use std::time::Duration;
    use tokio::sync::broadcast::error::TryRecvError;

    fn sequence_engine(bars: usize) -> Engine {
        let config = DatasetConfig {
            bars,
            ..DatasetConfig::default()
        };
        Engine::new(DatasetKind::Sequence, config)
    }

    /// Receive engine events until Completed, returning every streamed view.
    async fn run_to_completion(
        rx: &mut tokio::sync::broadcast::Receiver<EngineEvent>,
    ) -> Vec<(usize, View)> {
        let mut frames = Vec::new();
        loop {
            match rx.recv().await.unwrap() {
                EngineEvent::Step { cursor, view, .. } => frames.push((cursor, view)),
                EngineEvent::Completed => return frames,
                EngineEvent::Reset => {}
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_streams_every_step_then_completes() {
        let engine = sequence_engine(6);
        let mut rx = engine.subscribe();
        engine.start_run(AlgorithmId::BubbleSort).await.unwrap();

        let frames = run_to_completion(&mut rx).await;
        let total = frames.len();
        assert!(total > 0);

        // Cursors are exactly 1..=total, in order.
        let cursors: Vec<_> = frames.iter().map(|(c, _)| *c).collect();
        assert_eq!(cursors, (1..=total).collect::<Vec<_>>());

        // Final streamed view is sorted.
        let View::Bars(bars) = &frames.last().unwrap().1 else {
            panic!()
        };
        assert!(bars.values.windows(2).all(|w| w[0] <= w[1]));

        let snapshot = engine.snapshot().await;
        let status = snapshot.status.session.unwrap();
        assert_eq!(status.state, PlaybackState::Finished);
        assert_eq!(status.cursor, total);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_leaves_no_pending_ticks() {
        let engine = sequence_engine(20);
        let mut rx = engine.subscribe();
        engine.start_run(AlgorithmId::BubbleSort).await.unwrap();

        // Let at least one tick land, then reset mid-run.
        loop {
            if let EngineEvent::Step { .. } = rx.recv().await.unwrap() {
                break;
            }
        }
        engine.reset().await;

        // Everything queued before the reset is a Step; then the Reset marker.
        loop {
            match rx.recv().await.unwrap() {
                EngineEvent::Step { .. } => {}
                EngineEvent::Reset => break,
                EngineEvent::Completed => panic!("completed after reset"),
            }
        }

        // Wait far past the old interval: the stale tick must not fire.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        let snapshot = engine.snapshot().await;
        assert!(snapshot.status.session.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_resume_matches_uninterrupted_run() {
        let straight = sequence_engine(8);
        let interrupted = sequence_engine(8);

        let mut rx_a = straight.subscribe();
        straight.start_run(AlgorithmId::InsertionSort).await.unwrap();
        let frames_a = run_to_completion(&mut rx_a).await;

        let mut rx_b = interrupted.subscribe();
        interrupted
            .start_run(AlgorithmId::InsertionSort)
            .await
            .unwrap();
        let mut frames_b = Vec::new();
        for _ in 0..3 {
            if let EngineEvent::Step { cursor, view, .. } = rx_b.recv().await.unwrap() {
                frames_b.push((cursor, view));
            }
        }
        interrupted.pause().await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        interrupted.resume().await.unwrap();
        frames_b.extend(run_to_completion(&mut rx_b).await);

        // Same dataset (same seed), same algorithm: identical frame sequences.
        assert_eq!(frames_a, frames_b);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_the_cursor() {
        let engine = sequence_engine(20);
        let mut rx = engine.subscribe();
        engine.start_run(AlgorithmId::BubbleSort).await.unwrap();

        loop {
            if let EngineEvent::Step { .. } = rx.recv().await.unwrap() {
                break;
            }
        }
        engine.pause().await.unwrap();
        let cursor = engine.snapshot().await.status.session.unwrap().cursor;

        tokio::time::sleep(Duration::from_secs(5)).await;
        let after = engine.snapshot().await.status.session.unwrap();
        assert_eq!(after.cursor, cursor);
        assert_eq!(after.state, PlaybackState::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_dataset_completes_immediately() {
        let engine = sequence_engine(0);
        let mut rx = engine.subscribe();
        engine.start_run(AlgorithmId::MergeSort).await.unwrap();

        assert!(matches!(rx.recv().await.unwrap(), EngineEvent::Completed));
        let status = engine.snapshot().await.status.session.unwrap();
        assert_eq!(status.state, PlaybackState::Finished);
        assert_eq!(status.total_steps, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_changes_apply_to_the_next_run_only() {
        let engine = sequence_engine(4);
        engine.set_speed(100).await;

        let mut rx = engine.subscribe();
        engine.start_run(AlgorithmId::QuickSort).await.unwrap();
        let before = engine.snapshot().await.status.session.unwrap().interval_ms;
        assert_eq!(before, 1);

        // Mid-run change must not touch the in-flight session.
        engine.set_speed(1).await;
        let during = engine.snapshot().await.status.session.unwrap().interval_ms;
        assert_eq!(during, 1);

        run_to_completion(&mut rx).await;
        engine.start_run(AlgorithmId::QuickSort).await.unwrap();
        let next = engine.snapshot().await.status.session.unwrap().interval_ms;
        assert_eq!(next, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn edits_rejected_while_running_and_allowed_after_reset() {
        let config = DatasetConfig::default();
        let engine = Engine::new(DatasetKind::Grid, config);
        engine.start_run(AlgorithmId::Dijkstra).await.unwrap();

        let pos = GridPos::new(0, 0);
        assert!(matches!(
            engine.toggle_wall(pos).await,
            Err(EngineError::EditWhileRunning)
        ));

        engine.reset().await;
        engine.toggle_wall(pos).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn traversal_without_start_node_does_not_start() {
        let engine = Engine::new(DatasetKind::Graph, DatasetConfig::default());

        let err = engine.start_run(AlgorithmId::Bfs).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Recorder(RecorderError::NoStartSelected)
        ));
        assert!(engine.snapshot().await.status.session.is_none());

        engine.select_start_node(Some(NodeId(0))).await.unwrap();
        engine.start_run(AlgorithmId::Bfs).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn mismatched_algorithm_is_rejected() {
        let engine = sequence_engine(4);
        let err = engine.start_run(AlgorithmId::Dijkstra).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Recorder(RecorderError::WrongDataset { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn resume_without_pause_is_an_error() {
        let engine = sequence_engine(4);
        assert!(matches!(
            engine.resume().await,
            Err(EngineError::NothingToResume)
        ));
        assert!(matches!(engine.pause().await, Err(EngineError::NoSession)));
    }
}
