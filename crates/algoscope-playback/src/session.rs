//! One live replay of a recorded trace.
//!
//! A session owns the trace, a monotonically non-decreasing cursor over its
//! playback steps (primary events first, then the shortest-path phase), the
//! run/pause state and the view the steps are applied into. Timing lives in
//! the engine; `step` is pure state so it can be tested without a clock.

use std::time::Duration;

use algoscope_dataset::Dataset;
use algoscope_trace::{NodeRef, StepEvent, Trace, View};
use serde::{Deserialize, Serialize};

/// Run state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Ticks are being applied
    Playing,
    /// Suspended; cursor and view preserved for resume
    Paused,
    /// Every step applied; reached exactly once
    Finished,
}

/// Which part of the trace is being replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Primary event list (all visualizers)
    Visiting,
    /// Shortest-path list (pathfinding only)
    Path,
    /// Nothing left to apply
    Done,
}

/// What a single tick applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum AppliedStep {
    Event(StepEvent),
    PathNode(NodeRef),
}

/// Result of applying one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// Steps applied so far; monotonically non-decreasing
    pub cursor: usize,
    /// Phase after this step
    pub phase: Phase,
    pub step: AppliedStep,
    /// True exactly for the final step of the final phase
    pub finished: bool,
}

/// The live replay of one trace.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    trace: Trace,
    cursor: usize,
    state: PlaybackState,
    phase: Phase,
    view: View,
    interval: Duration,
}

impl PlaybackSession {
    /// Start a session over a freshly recorded trace. An empty trace is
    /// already finished.
    pub fn new(dataset: &Dataset, trace: Trace, interval: Duration) -> Self {
        let (state, phase) = if trace.is_empty() {
            (PlaybackState::Finished, Phase::Done)
        } else {
            (PlaybackState::Playing, Phase::Visiting)
        };
        Self {
            view: View::of(dataset),
            trace,
            cursor: 0,
            state,
            phase,
            interval,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_steps(&self) -> usize {
        self.trace.total_steps()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Tick interval captured when the session started.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.trace.total_steps() == 0 {
            1.0
        } else {
            self.cursor as f64 / self.trace.total_steps() as f64
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PlaybackState::Playing | PlaybackState::Paused)
    }

    /// Suspend; a later `resume` continues from the same cursor.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Apply the step at the cursor. Returns `None` when paused or finished.
    pub fn step(&mut self) -> Option<Applied> {
        if self.state != PlaybackState::Playing {
            return None;
        }

        let step = if self.cursor < self.trace.events.len() {
            let event = self.trace.events[self.cursor].clone();
            self.view.apply(&event);
            AppliedStep::Event(event)
        } else {
            let node = self.trace.path[self.cursor - self.trace.events.len()];
            self.view.mark_path(node);
            AppliedStep::PathNode(node)
        };

        self.cursor += 1;
        self.phase = if self.cursor >= self.trace.total_steps() {
            self.state = PlaybackState::Finished;
            Phase::Done
        } else if self.cursor >= self.trace.events.len() {
            Phase::Path
        } else {
            Phase::Visiting
        };

        Some(Applied {
            cursor: self.cursor,
            phase: self.phase,
            step,
            finished: self.state == PlaybackState::Finished,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoscope_dataset::{Grid, GridPos, Sequence};
    use algoscope_trace::{record, AlgorithmId};

    const TICK: Duration = Duration::from_millis(51);

    fn sorting_session() -> (Dataset, PlaybackSession) {
        let dataset = Dataset::Sequence(Sequence::new(vec![5, 3, 8, 1]));
        let trace = record(&dataset, AlgorithmId::BubbleSort).unwrap();
        let session = PlaybackSession::new(&dataset, trace, TICK);
        (dataset, session)
    }

    #[test]
    fn cursor_is_monotonic_until_finished() {
        let (_, mut session) = sorting_session();
        let mut last = 0;
        while let Some(applied) = session.step() {
            assert!(applied.cursor > last);
            last = applied.cursor;
        }
        assert_eq!(session.state(), PlaybackState::Finished);
        assert_eq!(last, session.total_steps());
    }

    #[test]
    fn finishes_exactly_once() {
        let (_, mut session) = sorting_session();
        let mut finishes = 0;
        while let Some(applied) = session.step() {
            if applied.finished {
                finishes += 1;
            }
        }
        assert_eq!(finishes, 1);
        assert!(session.step().is_none());
        assert!(session.step().is_none());
    }

    #[test]
    fn pause_blocks_stepping_and_resume_continues() {
        let (_, mut session) = sorting_session();
        session.step().unwrap();
        session.step().unwrap();
        let cursor = session.cursor();

        session.pause();
        assert_eq!(session.state(), PlaybackState::Paused);
        assert!(session.step().is_none());
        assert_eq!(session.cursor(), cursor);

        session.resume();
        let applied = session.step().unwrap();
        assert_eq!(applied.cursor, cursor + 1);
    }

    #[test]
    fn pausing_does_not_change_outcome() {
        let (_, mut straight) = sorting_session();
        let (_, mut interrupted) = sorting_session();

        while straight.step().is_some() {}

        for _ in 0..5 {
            interrupted.step();
        }
        interrupted.pause();
        interrupted.resume();
        while interrupted.step().is_some() {}

        assert_eq!(straight.view(), interrupted.view());
        assert_eq!(straight.cursor(), interrupted.cursor());
    }

    #[test]
    fn empty_trace_is_born_finished() {
        let dataset = Dataset::Sequence(Sequence::new(vec![]));
        let trace = record(&dataset, AlgorithmId::QuickSort).unwrap();
        let session = PlaybackSession::new(&dataset, trace, TICK);

        assert_eq!(session.state(), PlaybackState::Finished);
        assert_eq!(session.phase(), Phase::Done);
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn pathfinding_transitions_into_path_phase() {
        let grid = Grid::new(3, 4, GridPos::new(1, 0), GridPos::new(1, 3)).unwrap();
        let dataset = Dataset::Grid(grid);
        let trace = record(&dataset, AlgorithmId::Dijkstra).unwrap();
        assert!(!trace.path.is_empty());

        let events = trace.events.len();
        let mut session = PlaybackSession::new(&dataset, trace, TICK);

        let mut saw_path_phase = false;
        while let Some(applied) = session.step() {
            match applied.phase {
                Phase::Visiting => assert!(applied.cursor < events),
                Phase::Path => {
                    saw_path_phase = true;
                    assert!(matches!(applied.step, AppliedStep::PathNode(_)) || applied.cursor == events);
                }
                Phase::Done => {}
            }
        }
        assert!(saw_path_phase);
    }

    #[test]
    fn progress_runs_zero_to_one() {
        let (_, mut session) = sorting_session();
        assert_eq!(session.progress(), 0.0);
        while session.step().is_some() {}
        assert_eq!(session.progress(), 1.0);
    }
}
