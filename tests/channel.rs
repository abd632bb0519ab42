//! End-to-end tests driving the bridge against an in-process WebSocket
//! server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use dashboard_bridge::auth::CookieStore;
use dashboard_bridge::config::BridgeConfig;
use dashboard_bridge::domain::{EventBus, ProjectId};
use dashboard_bridge::endpoint::PageLocation;
use dashboard_bridge::ws::bridge::{ChannelState, JobsBridge};

fn test_config(addr: SocketAddr, endpoint_override: Option<String>) -> BridgeConfig {
    BridgeConfig {
        location: PageLocation {
            secure: false,
            host: addr.to_string(),
            path: "/app/dashboard/jobs".to_string(),
        },
        endpoint_override,
        cookies: String::new(),
        event_bus_capacity: 16,
        watch_project: None,
    }
}

async fn next_text(socket: &mut WebSocketStream<TcpStream>) -> String {
    match timeout(Duration::from_secs(5), socket.next()).await {
        Ok(Some(Ok(Message::Text(text)))) => text.to_string(),
        other => panic!("expected a text frame, got {other:?}"),
    }
}

#[tokio::test]
async fn connect_auth_listen_and_relay() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let project = ProjectId::new();

    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();

        let auth = next_text(&mut socket).await;
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&auth).unwrap(),
            serde_json::json!({"event": "auth", "data": "XYZ"})
        );

        let listen = next_text(&mut socket).await;
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&listen).unwrap(),
            serde_json::json!({"event": "listen:jobs", "data": project.to_string()})
        );

        socket
            .send(Message::text(r#"{"event":"notify:jobs","data":{"id":7}}"#))
            .await
            .unwrap();
        socket.close(None).await.unwrap();
    });

    let config = test_config(addr, None);
    let bus = EventBus::new(16);
    let mut notifications = bus.subscribe();
    let cookies = Arc::new(CookieStore::new("a=1; token=XYZ; b=2"));

    let (bridge, task) = JobsBridge::connect(&config, cookies, bus);
    bridge.listen_jobs(project);

    let notification = timeout(Duration::from_secs(5), notifications.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(notification.payload, serde_json::json!({"id": 7}));

    server.await.unwrap();
    let result = timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    assert!(result.is_ok());
    assert_eq!(bridge.state(), ChannelState::Disconnected);
}

#[tokio::test]
async fn missing_token_still_authenticates_with_an_empty_value() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut socket = accept_async(tcp).await.unwrap();

        let auth = next_text(&mut socket).await;
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&auth).unwrap(),
            serde_json::json!({"event": "auth", "data": ""})
        );

        socket.close(None).await.unwrap();
    });

    // The override plays the hard-coded development endpoint: the channel
    // path still comes from the page location.
    let config = test_config(addr, Some(format!("ws://{addr}")));
    assert_eq!(config.channel_url(), format!("ws://{addr}/app/socket.io/"));

    let bus = EventBus::new(16);
    let cookies = Arc::new(CookieStore::new("a=1; b=2"));

    let (mut bridge, task) = JobsBridge::connect(&config, cookies, bus);

    server.await.unwrap();
    let result = timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    assert!(result.is_ok());
    assert!(bridge.wait_for(ChannelState::Disconnected).await);
}
