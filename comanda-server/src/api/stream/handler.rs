//! WebSocket snapshot streams
//!
//! GET /api/stream/{orders|customers|menu|settings}
//!
//! Protocol, server → client only:
//! - one full snapshot message on connect
//! - one full snapshot message after every change in the collection
//! - periodic pings to keep idle connections alive
//!
//! Snapshots, not diffs: a lagged subscriber just gets the next snapshot,
//! so nothing needs replaying.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::Duration;

use crate::core::ServerState;

/// Which collection a session is streaming
#[derive(Debug, Clone, Copy)]
enum Feed {
    Orders,
    Customers,
    Menu,
    Settings,
}

impl Feed {
    fn collection(self) -> &'static str {
        match self {
            Feed::Orders => crate::store::paths::ORDERS,
            Feed::Customers => crate::store::paths::CUSTOMERS,
            Feed::Menu => crate::store::paths::MENU,
            Feed::Settings => crate::store::paths::SETTINGS,
        }
    }
}

#[derive(Debug, Serialize)]
struct StreamMessage {
    collection: &'static str,
    data: serde_json::Value,
}

pub async fn orders(State(state): State<ServerState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_session(socket, state, Feed::Orders))
}

pub async fn customers(
    State(state): State<ServerState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_session(socket, state, Feed::Customers))
}

pub async fn menu(State(state): State<ServerState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_session(socket, state, Feed::Menu))
}

pub async fn settings(
    State(state): State<ServerState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_session(socket, state, Feed::Settings))
}

async fn stream_session(socket: WebSocket, state: ServerState, feed: Feed) {
    let (mut sink, mut stream) = socket.split();

    tracing::info!(collection = feed.collection(), "Stream subscriber connected");

    let mut rx = state.store.subscribe(feed.collection());

    // Initial full snapshot
    if send_snapshot(&mut sink, &state, feed).await.is_err() {
        return;
    }

    let mut ping_interval = tokio::time::interval(Duration::from_secs(30));
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            event = rx.recv() => {
                match event {
                    Ok(_) => {
                        if send_snapshot(&mut sink, &state, feed).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            collection = feed.collection(),
                            skipped,
                            "Stream subscriber lagged, resending snapshot"
                        );
                        if send_snapshot(&mut sink, &state, feed).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // clients only listen
                    Some(Err(_)) => break,
                }
            }
        }
    }

    tracing::info!(collection = feed.collection(), "Stream subscriber disconnected");
}

/// Load the current collection and push it down the socket.
/// A load failure is logged and skipped; a send failure ends the session.
async fn send_snapshot(
    sink: &mut SplitSink<WebSocket, Message>,
    state: &ServerState,
    feed: Feed,
) -> Result<(), ()> {
    let data = match load_snapshot(state, feed).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(collection = feed.collection(), error = %e, "Snapshot load failed");
            return Ok(());
        }
    };

    let message = StreamMessage {
        collection: feed.collection(),
        data,
    };
    let text = serde_json::to_string(&message).map_err(|_| ())?;
    sink.send(Message::Text(text.into())).await.map_err(|_| ())
}

async fn load_snapshot(
    state: &ServerState,
    feed: Feed,
) -> crate::utils::AppResult<serde_json::Value> {
    let value = match feed {
        Feed::Orders => serde_json::to_value(state.orders.fetch_all().await?),
        Feed::Customers => serde_json::to_value(state.customers.fetch_all().await?),
        Feed::Menu => serde_json::to_value(state.menu.fetch_all().await?),
        Feed::Settings => serde_json::to_value(state.settings.get().await?),
    };
    value.map_err(|e| crate::utils::AppError::internal(e.to_string()))
}
