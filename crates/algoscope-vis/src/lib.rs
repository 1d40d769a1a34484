//! Algoscope Visualizer Server
//!
//! Interactive algorithm visualization with playback controls.
//!
//! # Architecture
//!
//! - **Recorders** (`algoscope-trace`): run an algorithm, record a step-event
//!   timeline
//! - **Playback** (`algoscope-playback`): replay the timeline into visual
//!   state at a controlled cadence
//! - **Server** (this crate): REST controls + WebSocket frame streaming to
//!   the browser frontend
//!
//! # Usage
//!
//! ```ignore
//! let server = VisServer::default();
//! server.serve(3000).await;
//! ```

mod server;

pub use server::{VisServer, VisualizerId};
