use std::fmt::Display;
use std::ops::ControlFlow;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures::{Sink, SinkExt, Stream, StreamExt};
use pollbox_core::error::CoreError;
use pollbox_core::results::PollResults;
use pollbox_core::session::Session;
use pollbox_core::types::DbId;
use pollbox_events::{PollEvent, PollEventKind};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::service::PollService;
use crate::state::AppState;

/// Interval between keep-alive pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Frames pushed to live-results clients as JSON text messages.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    /// Current results, sent on connect and after every change to the poll.
    Results { data: PollResults },
    /// The poll was deleted; the server closes the socket after this frame.
    PollDeleted { poll_id: DbId },
}

/// GET /api/v1/polls/{id}/live
///
/// Unknown polls are rejected with 404 before the upgrade. Results are
/// computed for the caller's session so `has_user_voted` and `user_vote`
/// reflect the connected user.
pub async fn live_results(
    ws: WebSocketUpgrade,
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(poll_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    state.polls.get(poll_id).await?;
    let session = user.map(|u| u.session());
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, poll_id, session)))
}

async fn handle_socket(socket: WebSocket, state: AppState, poll_id: DbId, session: Option<Session>) {
    // Subscribe before the first snapshot so no change slips in between.
    let events = state.event_bus.subscribe();
    let (sink, stream) = socket.split();
    run_live(sink, stream, events, &state.polls, poll_id, session.as_ref()).await;
}

/// Drive one live-results connection until the client leaves, the poll is
/// deleted or the event bus shuts down.
///
/// `events` must be subscribed before this is called.
async fn run_live<S, R, E>(
    mut sink: S,
    mut stream: R,
    mut events: broadcast::Receiver<PollEvent>,
    polls: &PollService,
    poll_id: DbId,
    session: Option<&Session>,
) where
    S: Sink<Message> + Unpin,
    S::Error: Display,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let conn_id = uuid::Uuid::new_v4().to_string();
    let user_id = session.map(|s| s.user_id);
    tracing::info!(conn_id = %conn_id, poll_id, ?user_id, "Live results socket connected");

    let mut heartbeat = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));
    heartbeat.tick().await;

    let mut flow = push_snapshot(&mut sink, polls, poll_id, session).await;

    while flow.is_continue() {
        flow = tokio::select! {
            event = events.recv() => match event {
                Ok(event) if event.poll_id != poll_id => ControlFlow::Continue(()),
                Ok(event) if event.kind == PollEventKind::PollDeleted => {
                    let _ = send(&mut sink, &LiveMessage::PollDeleted { poll_id }).await;
                    ControlFlow::Break(())
                }
                Ok(_) => push_snapshot(&mut sink, polls, poll_id, session).await,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(conn_id = %conn_id, poll_id, skipped, "Live results subscriber lagged");
                    push_snapshot(&mut sink, polls, poll_id, session).await
                }
                Err(RecvError::Closed) => ControlFlow::Break(()),
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => ControlFlow::Break(()),
                Some(Ok(Message::Pong(_))) => {
                    tracing::trace!(conn_id = %conn_id, "Pong received");
                    ControlFlow::Continue(())
                }
                // Clients have nothing to say on this channel.
                Some(Ok(_)) => ControlFlow::Continue(()),
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    ControlFlow::Break(())
                }
            },
            _ = heartbeat.tick() => {
                if sink.send(Message::Ping(Bytes::new())).await.is_err() {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        };
    }

    let _ = sink.send(Message::Close(None)).await;
    tracing::info!(conn_id = %conn_id, poll_id, "Live results socket disconnected");
}

/// Recompute results and push them. Breaks if the socket is gone or the
/// poll vanished.
async fn push_snapshot<S>(
    sink: &mut S,
    polls: &PollService,
    poll_id: DbId,
    session: Option<&Session>,
) -> ControlFlow<()>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    match polls.results(poll_id, session).await {
        Ok(results) => send(sink, &LiveMessage::Results { data: results }).await,
        Err(AppError::Core(CoreError::NotFound { .. })) => {
            let _ = send(sink, &LiveMessage::PollDeleted { poll_id }).await;
            ControlFlow::Break(())
        }
        Err(err) => {
            tracing::error!(poll_id, error = %err, "Failed to compute live results");
            ControlFlow::Break(())
        }
    }
}

async fn send<S>(sink: &mut S, msg: &LiveMessage) -> ControlFlow<()>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let text = match serde_json::to_string(msg) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize live message");
            return ControlFlow::Break(());
        }
    };
    match sink.send(Message::Text(text.into())).await {
        Ok(()) => ControlFlow::Continue(()),
        Err(e) => {
            tracing::debug!(error = %e, "WebSocket sink closed");
            ControlFlow::Break(())
        }
    }
}
