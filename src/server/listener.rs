//! Viewer listener
//!
//! Accepts WebSocket connections from the viewer page and turns them into
//! session events. Each accepted connection gets a writer task draining the
//! broadcaster's line stream into the socket and a reader loop that only
//! watches for close. The session itself decides which connection holds the
//! viewer slot.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use crate::error::Result;
use crate::relay::ViewerHandle;
use crate::session::SessionEvent;

/// WebSocket accept loop feeding viewer events into a session
pub struct ViewerListener {
    bind_addr: SocketAddr,
    events: mpsc::UnboundedSender<SessionEvent>,
    next_viewer_id: AtomicU64,
}

impl ViewerListener {
    /// Create a listener that reports connections on the given event channel
    pub fn new(bind_addr: SocketAddr, events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self {
            bind_addr,
            events,
            next_viewer_id: AtomicU64::new(1),
        }
    }

    /// Run the accept loop
    ///
    /// This method blocks until the listener socket fails to bind; accept
    /// errors are logged and do not stop the loop.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "viewer listener ready");

        loop {
            match listener.accept().await {
                Ok((socket, peer_addr)) => {
                    self.handle_connection(socket, peer_addr);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to accept viewer connection");
                }
            }
        }
    }

    fn handle_connection(&self, socket: TcpStream, peer_addr: SocketAddr) {
        let viewer_id = self.next_viewer_id.fetch_add(1, Ordering::Relaxed);
        let events = self.events.clone();

        tracing::debug!(viewer_id, peer = %peer_addr, "viewer connection accepted");

        tokio::spawn(async move {
            if let Err(e) = serve_viewer(viewer_id, socket, events).await {
                tracing::debug!(viewer_id, error = %e, "viewer connection error");
            }
            tracing::debug!(viewer_id, "viewer connection closed");
        });
    }
}

async fn serve_viewer(
    viewer_id: u64,
    socket: TcpStream,
    events: mpsc::UnboundedSender<SessionEvent>,
) -> Result<()> {
    let ws = accept_async(socket).await?;
    let (mut sink, mut stream) = ws.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let handle = ViewerHandle::new(viewer_id, tx);

    if events.send(SessionEvent::ViewerConnected(handle)).is_err() {
        // Session is gone; nothing to serve
        return Ok(());
    }

    let writer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            // Delivery failure is logged, never closes the connection
            if let Err(e) = sink.send(Message::text(line)).await {
                tracing::error!(viewer_id, error = %e, "failed to deliver line to viewer");
            }
        }
    });

    // Inbound payloads are ignored; we only care about the close
    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    writer.abort();
    let _ = events.send(SessionEvent::ViewerClosed(viewer_id));

    Ok(())
}
