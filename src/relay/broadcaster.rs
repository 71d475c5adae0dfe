//! Broadcaster
//!
//! Tracks zero-or-one live viewer connection and forwards every protocol
//! line to it verbatim. A newly attached viewer first receives a replay of
//! the most recently closed CONFIG chunk, in chronological order, before any
//! live traffic. Delivery failures are logged and never close the slot.

use tokio::sync::mpsc;

use crate::protocol::Chunk;

/// Handle to a connected viewer's outbound line stream
///
/// The transport side owns the receiving end and drains it into the socket;
/// dropping the receiver makes `send` fail, which the broadcaster treats as
/// a delivery error, not a disconnect.
#[derive(Debug, Clone)]
pub struct ViewerHandle {
    id: u64,
    tx: mpsc::UnboundedSender<String>,
}

impl ViewerHandle {
    /// Create a handle around the transport's line sender
    pub fn new(id: u64, tx: mpsc::UnboundedSender<String>) -> Self {
        Self { id, tx }
    }

    /// Viewer id, unique per accepted connection
    pub fn id(&self) -> u64 {
        self.id
    }

    fn send(&self, line: &str) -> Result<(), ()> {
        self.tx.send(line.to_string()).map_err(|_| ())
    }
}

/// Single-slot line fan-out to the viewer
#[derive(Debug, Default)]
pub struct Broadcaster {
    viewer: Option<ViewerHandle>,
}

impl Broadcaster {
    /// Create a broadcaster with no viewer attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a viewer is currently attached
    pub fn has_viewer(&self) -> bool {
        self.viewer.is_some()
    }

    /// Forward one line to the viewer, if any
    ///
    /// A send failure is logged but leaves the slot untouched; the transport
    /// reports the actual close as its own event.
    pub fn forward(&self, line: &str) {
        let Some(viewer) = &self.viewer else {
            return;
        };

        if viewer.send(line).is_err() {
            tracing::error!(viewer_id = viewer.id, line, "failed to deliver line to viewer");
        }
    }

    /// Attach a viewer, replacing any previous one (last-writer-wins)
    ///
    /// Replays the latest closed CONFIG chunk before any live traffic
    /// reaches the new connection.
    pub fn attach(&mut self, viewer: ViewerHandle, latest_config: Option<&Chunk>) {
        let viewer_id = viewer.id;
        if let Some(previous) = self.viewer.replace(viewer) {
            tracing::warn!(viewer_id = previous.id, "viewer slot overwritten");
        }
        tracing::info!(viewer_id, "viewer connected");

        if let Some(chunk) = latest_config {
            self.forward_all(chunk.replay_lines());
        }
    }

    /// Detach the viewer with the given id
    ///
    /// A close event for a connection that has already been replaced is
    /// ignored, so a stale close cannot evict a newer viewer.
    pub fn detach(&mut self, viewer_id: u64) {
        match &self.viewer {
            Some(viewer) if viewer.id == viewer_id => {
                self.viewer = None;
                tracing::info!(viewer_id, "viewer disconnected");
            }
            _ => {
                tracing::debug!(viewer_id, "close for stale viewer, ignored");
            }
        }
    }

    fn forward_all(&self, lines: &[String]) {
        for line in lines {
            self.forward(line);
        }
    }
}
