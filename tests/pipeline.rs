//! End-to-end pipeline tests: feed events into a running session and watch
//! what reaches the viewer.

use std::time::Duration;

use tokio::sync::mpsc;

use scrawl::relay::ViewerHandle;
use scrawl::schema::SchemaRegistry;
use scrawl::session::{Session, SessionEvent};

fn viewer(id: u64) -> (ViewerHandle, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ViewerHandle::new(id, tx), rx)
}

async fn collect(mut rx: mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(line) = rx.recv().await {
        lines.push(line);
    }
    lines
}

#[tokio::test]
async fn late_joiner_gets_config_replay_then_live_traffic() {
    let (tx, rx) = Session::channel();
    let session = Session::new(SchemaRegistry::standard(), None, rx);
    let task = tokio::spawn(session.run());

    for line in ["$CONFIG", "canvas_size 640 480", "$END_CONFIG"] {
        tx.send(SessionEvent::Line(line.to_string())).unwrap();
    }

    let (handle, viewer_rx) = viewer(1);
    tx.send(SessionEvent::ViewerConnected(handle)).unwrap();

    for line in ["$FRAME", "stroke", "$END_FRAME"] {
        tx.send(SessionEvent::Line(line.to_string())).unwrap();
    }

    drop(tx);
    task.await.unwrap();

    assert_eq!(
        collect(viewer_rx).await,
        vec![
            "$CONFIG",
            "canvas_size 640 480",
            "$END_CONFIG",
            "$FRAME",
            "stroke",
            "$END_FRAME",
        ]
    );
}

#[tokio::test]
async fn malformed_lines_are_forwarded_verbatim_in_order() {
    let (tx, rx) = Session::channel();
    let session = Session::new(SchemaRegistry::standard(), None, rx);
    let task = tokio::spawn(session.run());

    let (handle, viewer_rx) = viewer(1);
    tx.send(SessionEvent::ViewerConnected(handle)).unwrap();

    let input = [
        "$FRAME",
        "bogus_command 1 2",
        "canvas_size 640",
        "$END_CONFIG",
        "orphan line",
    ];
    for line in input {
        tx.send(SessionEvent::Line(line.to_string())).unwrap();
    }

    drop(tx);
    task.await.unwrap();

    // Every line exactly once, verbatim, in arrival order
    assert_eq!(collect(viewer_rx).await, input);
}

#[tokio::test]
async fn sequential_viewers_get_identical_replays() {
    let (tx, rx) = Session::channel();
    let session = Session::new(SchemaRegistry::standard(), None, rx);
    let task = tokio::spawn(session.run());

    for line in ["$CONFIG", "letterbox_color 0 0 0", "$END_CONFIG"] {
        tx.send(SessionEvent::Line(line.to_string())).unwrap();
    }

    let (first, first_rx) = viewer(1);
    tx.send(SessionEvent::ViewerConnected(first)).unwrap();
    tx.send(SessionEvent::ViewerClosed(1)).unwrap();

    // FRAME traffic between the two connections must not affect the replay
    for line in ["$FRAME", "fill_rect 0 0 5 5", "$END_FRAME"] {
        tx.send(SessionEvent::Line(line.to_string())).unwrap();
    }

    let (second, second_rx) = viewer(2);
    tx.send(SessionEvent::ViewerConnected(second)).unwrap();

    drop(tx);
    task.await.unwrap();

    let expected = ["$CONFIG", "letterbox_color 0 0 0", "$END_CONFIG"];
    assert_eq!(collect(first_rx).await, expected);
    assert_eq!(collect(second_rx).await, expected);
}

#[tokio::test(start_paused = true)]
async fn rate_limiting_delays_but_never_reorders_or_drops() {
    let (tx, rx) = Session::channel();
    let session = Session::new(SchemaRegistry::standard(), Some(2), rx);
    let _task = tokio::spawn(session.run());

    let (handle, mut viewer_rx) = viewer(1);
    tx.send(SessionEvent::ViewerConnected(handle)).unwrap();

    let input = [
        "$FRAME",
        "begin_path",
        "move_to 0 0",
        "line_to 10 10",
        "$END_FRAME",
    ];
    for line in input {
        tx.send(SessionEvent::Line(line.to_string())).unwrap();
    }

    let start = tokio::time::Instant::now();
    let mut received = Vec::new();
    for _ in 0..input.len() {
        let line = viewer_rx.recv().await.unwrap();
        received.push((line, start.elapsed()));
    }

    // Original order, none dropped or duplicated
    let lines: Vec<&str> = received.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(lines, input);

    // Rate 2 means at least 500ms between consecutive deliveries
    for pair in received.windows(2) {
        let gap = pair[1].1 - pair[0].1;
        assert!(
            gap >= Duration::from_millis(500),
            "lines delivered {}ms apart",
            gap.as_millis()
        );
    }
}

#[tokio::test]
async fn empty_lines_are_dropped() {
    let (tx, rx) = Session::channel();
    let session = Session::new(SchemaRegistry::standard(), None, rx);
    let task = tokio::spawn(session.run());

    let (handle, viewer_rx) = viewer(1);
    tx.send(SessionEvent::ViewerConnected(handle)).unwrap();

    for line in ["$FRAME", "", "stroke", "", "$END_FRAME"] {
        tx.send(SessionEvent::Line(line.to_string())).unwrap();
    }

    drop(tx);
    task.await.unwrap();

    assert_eq!(collect(viewer_rx).await, vec!["$FRAME", "stroke", "$END_FRAME"]);
}
