use std::sync::mpsc;
use std::time::Duration;

use fileproc_engine::{
    run_channel, ChannelSettings, EngineCommand, EngineConfig, EngineEvent, EngineHandle,
};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

fn settings_for(addr: std::net::SocketAddr) -> ChannelSettings {
    ChannelSettings {
        ws_url: format!("ws://{addr}/api/v1/ws"),
    }
}

#[tokio::test]
async fn channel_reports_up_frames_and_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut socket = accept_async(stream).await.expect("handshake");
        socket
            .send(Message::Text(r#"{"file_name":"a.txt","status":"processing","progress":50}"#.into()))
            .await
            .expect("send frame 1");
        socket
            .send(Message::Text(r#"{"file_name":"a.txt","status":"completed","progress":100}"#.into()))
            .await
            .expect("send frame 2");
        socket.close(None).await.expect("close");
    });

    let (event_tx, event_rx) = mpsc::channel();
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    run_channel(
        settings_for(addr),
        "client-1".to_string(),
        event_tx,
        shutdown_rx,
    )
    .await;
    server.await.expect("server task");
    drop(shutdown_tx);

    let events: Vec<EngineEvent> = event_rx.try_iter().collect();
    assert!(matches!(events[0], EngineEvent::ChannelUp));
    assert!(
        matches!(&events[1], EngineEvent::ChannelFrame(text) if text.contains("processing"))
    );
    assert!(
        matches!(&events[2], EngineEvent::ChannelFrame(text) if text.contains("completed"))
    );
    assert!(matches!(events[3], EngineEvent::ChannelDown { error: None }));
    assert_eq!(events.len(), 4);
}

#[tokio::test]
async fn close_request_sends_a_close_frame_to_the_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut socket = accept_async(stream).await.expect("handshake");
        // Drain until the client's close frame arrives.
        while let Some(Ok(message)) = socket.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    let (event_tx, event_rx) = mpsc::channel();
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let channel = tokio::spawn(run_channel(
        settings_for(addr),
        "client-2".to_string(),
        event_tx,
        shutdown_rx,
    ));

    // Wait for the handshake before requesting the close.
    let up = tokio::task::spawn_blocking(move || {
        let first = event_rx.recv_timeout(Duration::from_secs(5));
        (first, event_rx)
    })
    .await
    .expect("join");
    assert!(matches!(up.0, Ok(EngineEvent::ChannelUp)));
    let event_rx = up.1;

    shutdown_tx.send(true).expect("signal close");
    channel.await.expect("channel task");
    server.await.expect("server task");

    let events: Vec<EngineEvent> = event_rx.try_iter().collect();
    assert!(events
        .iter()
        .any(|event| matches!(event, EngineEvent::ChannelDown { error: None })));
}

#[tokio::test]
async fn failed_connect_reports_down_with_an_error() {
    // Nothing is listening on this address once the listener is dropped.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let (event_tx, event_rx) = mpsc::channel();
    let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    run_channel(
        settings_for(addr),
        "client-3".to_string(),
        event_tx,
        shutdown_rx,
    )
    .await;

    let events: Vec<EngineEvent> = event_rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        EngineEvent::ChannelDown { error: Some(_) }
    ));
}

#[test]
fn engine_runs_the_channel_lifecycle_end_to_end() {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let (addr_tx, addr_rx) = mpsc::channel();

    runtime.spawn(async move {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        addr_tx.send(listener.local_addr().expect("addr")).expect("send addr");
        let (stream, _) = listener.accept().await.expect("accept");
        let mut socket = accept_async(stream).await.expect("handshake");
        socket
            .send(Message::Text(r#"{"file_name":"a.txt","status":"queued","progress":0}"#.into()))
            .await
            .expect("send frame");
        while let Some(Ok(message)) = socket.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    let addr = addr_rx.recv_timeout(Duration::from_secs(5)).expect("addr");
    let config = EngineConfig {
        channel: settings_for(addr),
        close_check_delay: Duration::from_millis(50),
        ..EngineConfig::default()
    };
    let (engine, events) = EngineHandle::new(config);

    engine.send(EngineCommand::OpenChannel {
        client_id: "client-4".to_string(),
    });
    let up = events.recv_timeout(Duration::from_secs(5)).expect("up");
    assert!(matches!(up, EngineEvent::ChannelUp));

    let frame = events.recv_timeout(Duration::from_secs(5)).expect("frame");
    assert!(matches!(&frame, EngineEvent::ChannelFrame(text) if text.contains("queued")));

    engine.send(EngineCommand::ScheduleCloseCheck);
    let due = events.recv_timeout(Duration::from_secs(5)).expect("due");
    assert!(matches!(due, EngineEvent::CloseCheckDue));

    engine.send(EngineCommand::CloseChannel);
    let down = events.recv_timeout(Duration::from_secs(5)).expect("down");
    assert!(matches!(down, EngineEvent::ChannelDown { error: None }));
}
