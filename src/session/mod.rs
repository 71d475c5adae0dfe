//! Session
//!
//! One session owns the whole pipeline: the protocol engine, the broadcaster,
//! and (when a rate is configured) the delivery queue. It consumes the event
//! channel alone, so protocol state and chunk storage never see concurrent
//! access. There is no drain contract: when the event channel closes, queued
//! but unprocessed lines are simply dropped with the session.

pub mod event;

pub use event::SessionEvent;

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::protocol::{ChunkType, Engine};
use crate::relay::{Broadcaster, DeliveryQueue};
use crate::schema::SchemaRegistry;

/// The pipeline behind one input stream and one viewer slot
pub struct Session {
    engine: Engine,
    broadcaster: Broadcaster,
    queue: DeliveryQueue,
    rate: Option<u32>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl Session {
    /// Create a session consuming the given event channel
    ///
    /// A positive `rate` caps forwarding at that many lines per second;
    /// `None` (or zero) processes lines synchronously on arrival.
    pub fn new(
        registry: SchemaRegistry,
        rate: Option<u32>,
        events: mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Self {
        Self {
            engine: Engine::new(registry),
            broadcaster: Broadcaster::new(),
            queue: DeliveryQueue::new(),
            rate: rate.filter(|r| *r > 0),
            events,
        }
    }

    /// Convenience constructor for the event channel
    pub fn channel() -> (
        mpsc::UnboundedSender<SessionEvent>,
        mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        mpsc::unbounded_channel()
    }

    /// Run the session until the event channel closes
    pub async fn run(mut self) {
        match self.rate {
            Some(rate) => self.run_paced(rate).await,
            None => self.run_immediate().await,
        }
        tracing::info!("session finished");
    }

    async fn run_immediate(&mut self) {
        while let Some(event) = self.events.recv().await {
            self.dispatch(event);
        }
    }

    /// Rate-limited mode: lines are queued on arrival and drained one per
    /// tick; connect/close events are still handled as they come in.
    async fn run_paced(&mut self, rate: u32) {
        let period = Duration::from_secs_f64(1.0 / f64::from(rate));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                event = self.events.recv() => {
                    match event {
                        Some(SessionEvent::Line(line)) => self.queue.push(line),
                        Some(other) => self.dispatch(other),
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    // Empty queue at a tick is a no-op
                    if let Some(line) = self.queue.pop() {
                        self.process_line(&line);
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Line(line) => self.process_line(&line),
            SessionEvent::ViewerConnected(handle) => {
                let latest_config = self.engine.store().latest(ChunkType::Config);
                self.broadcaster.attach(handle, latest_config);
            }
            SessionEvent::ViewerClosed(viewer_id) => {
                self.broadcaster.detach(viewer_id);
            }
        }
    }

    fn process_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        let _ = self.engine.handle_line(line);

        // Broadcast-everything policy: valid or not, the line goes out
        self.broadcaster.forward(line);
    }
}
