//! Background threads behind the channel façade.
//!
//! The socket worker owns a current-thread tokio runtime and the
//! WebSocket connection; parsed events cross a bounded queue to the
//! dispatcher thread, which runs listeners. The façade talks to the
//! socket worker over a command channel.

use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use soundtouch_api::events::{parse_frame, ChannelState};
use soundtouch_api::Notification;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::config::NotifyConfig;
use crate::queue::DispatchQueue;
use crate::registry::ListenerRegistry;

/// Subprotocol the device expects during the WebSocket handshake.
pub(crate) const SUBPROTOCOL: &str = "gabbo";

/// Ping payload the device firmware answers.
const KEEP_ALIVE: &[u8] = b"KeepAlive";

/// Delays between reconnect attempts; the last entry repeats.
const BACKOFF: [Duration; 5] = [
    Duration::from_millis(250),
    Duration::from_millis(500),
    Duration::from_secs(1),
    Duration::from_secs(2),
    Duration::from_secs(5),
];

/// How often blocked loops look for pending commands.
const COMMAND_POLL: Duration = Duration::from_millis(10);

/// Instructions from the façade to the socket worker.
pub(crate) enum Command {
    /// Stop reading, send a close frame, and exit without reconnecting.
    Close,
}

/// Why the read loop ended.
enum Exit {
    /// A close was requested.
    Closed,
    /// The socket dropped on its own.
    Dropped,
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Spawns the thread that owns the WebSocket connection.
///
/// The thread builds its own current-thread tokio runtime; every async
/// operation of the channel lives inside it.
pub(crate) fn spawn_socket_worker(
    url: Url,
    config: NotifyConfig,
    queue: Arc<DispatchQueue>,
    state: Arc<Mutex<ChannelState>>,
    commands: Receiver<Command>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("soundtouch-notify-ws".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    tracing::error!("could not build the notification runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(run_socket(url, config, queue, state, commands));
        })
}

/// Spawns the thread that pops the queue and runs listeners.
pub(crate) fn spawn_dispatcher(
    queue: Arc<DispatchQueue>,
    registry: Arc<ListenerRegistry>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("soundtouch-notify-dispatch".to_string())
        .spawn(move || {
            while let Some(event) = queue.pop() {
                registry.dispatch(&event);
            }
            tracing::debug!("dispatcher drained and stopped");
        })
}

/// Records a lifecycle transition and surfaces it as an event.
fn set_state(state: &Mutex<ChannelState>, queue: &DispatchQueue, next: ChannelState) {
    let mut current = state.lock().unwrap_or_else(PoisonError::into_inner);
    if *current == next {
        return;
    }
    tracing::debug!("notification channel {} -> {}", *current, next);
    *current = next;
    queue.push(Notification::ChannelState(next));
}

/// The delay before the next attempt; repeats the cap once reached.
fn next_backoff(failures: &mut usize) -> Duration {
    let delay = BACKOFF[(*failures).min(BACKOFF.len() - 1)];
    *failures += 1;
    delay
}

/// Connect-read-reconnect loop of the socket worker.
async fn run_socket(
    url: Url,
    config: NotifyConfig,
    queue: Arc<DispatchQueue>,
    state: Arc<Mutex<ChannelState>>,
    commands: Receiver<Command>,
) {
    let mut failures = 0usize;
    loop {
        set_state(&state, &queue, ChannelState::Connecting);
        let socket = match connect(&url).await {
            Ok(socket) => socket,
            Err(err) => {
                tracing::warn!("connect to {} failed: {}", url, err);
                set_state(&state, &queue, ChannelState::Failed);
                if !config.reconnect {
                    return;
                }
                if !wait_backoff(&commands, next_backoff(&mut failures)).await {
                    set_state(&state, &queue, ChannelState::Disconnected);
                    return;
                }
                continue;
            }
        };
        failures = 0;
        set_state(&state, &queue, ChannelState::Connected);

        match read_frames(socket, &config, &queue, &state, &commands).await {
            Exit::Closed => {
                set_state(&state, &queue, ChannelState::Disconnected);
                return;
            }
            Exit::Dropped => {
                set_state(&state, &queue, ChannelState::Failed);
                if !config.reconnect {
                    return;
                }
                if !wait_backoff(&commands, next_backoff(&mut failures)).await {
                    set_state(&state, &queue, ChannelState::Disconnected);
                    return;
                }
            }
        }
    }
}

/// Opens the socket with the device's subprotocol.
async fn connect(url: &Url) -> Result<WsStream, tokio_tungstenite::tungstenite::Error> {
    let mut request = url.as_str().into_client_request()?;
    request
        .headers_mut()
        .insert("Sec-WebSocket-Protocol", HeaderValue::from_static(SUBPROTOCOL));
    let (socket, response) = connect_async(request).await?;
    tracing::debug!(
        "notification socket to {} open, handshake status {}",
        url,
        response.status()
    );
    Ok(socket)
}

/// Reads frames until the socket drops or a close is commanded.
async fn read_frames(
    socket: WsStream,
    config: &NotifyConfig,
    queue: &DispatchQueue,
    state: &Mutex<ChannelState>,
    commands: &Receiver<Command>,
) -> Exit {
    let (mut sink, mut stream) = socket.split();

    let ping_enabled = !config.ping_interval.is_zero();
    let ping_period = if ping_enabled {
        config.ping_interval
    } else {
        // Never fires; the arm below is also gated off.
        Duration::from_secs(86_400)
    };
    let mut ping =
        tokio::time::interval_at(tokio::time::Instant::now() + ping_period, ping_period);
    let mut poll = tokio::time::interval(COMMAND_POLL);

    set_state(state, queue, ChannelState::Reading);
    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => match parse_frame(&text) {
                    Ok(events) => {
                        for event in events {
                            queue.push(event);
                        }
                    }
                    Err(err) => tracing::warn!("discarding a malformed frame: {}", err),
                },
                Some(Ok(Message::Ping(payload))) => {
                    if sink.send(Message::Pong(payload)).await.is_err() {
                        return Exit::Dropped;
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!("device closed the socket: {:?}", frame);
                    return Exit::Dropped;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::warn!("notification socket read failed: {}", err);
                    return Exit::Dropped;
                }
                None => return Exit::Dropped,
            },
            _ = ping.tick(), if ping_enabled => {
                if sink
                    .send(Message::Ping(Bytes::from_static(KEEP_ALIVE)))
                    .await
                    .is_err()
                {
                    return Exit::Dropped;
                }
            }
            _ = poll.tick() => match commands.try_recv() {
                Ok(Command::Close) | Err(TryRecvError::Disconnected) => {
                    let _ = sink.send(Message::Close(None)).await;
                    return Exit::Closed;
                }
                Err(TryRecvError::Empty) => {}
            },
        }
    }
}

/// Sleeps out a reconnect delay while still answering close commands.
///
/// Returns false when the wait was interrupted by a close.
async fn wait_backoff(commands: &Receiver<Command>, delay: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + delay;
    loop {
        match commands.try_recv() {
            Ok(Command::Close) | Err(TryRecvError::Disconnected) => return false,
            Err(TryRecvError::Empty) => {}
        }
        if tokio::time::Instant::now() >= deadline {
            return true;
        }
        tokio::time::sleep(COMMAND_POLL).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn test_backoff_staircase_caps_at_five_seconds() {
        let mut failures = 0;
        let delays: Vec<Duration> = (0..7).map(|_| next_backoff(&mut failures)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(250),
                Duration::from_millis(500),
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(5),
                Duration::from_secs(5),
                Duration::from_secs(5),
            ]
        );
    }

    #[test]
    fn test_wait_backoff_runs_the_full_delay() {
        let (_tx, rx) = mpsc::channel();
        let started = std::time::Instant::now();
        assert!(tokio_test::block_on(wait_backoff(
            &rx,
            Duration::from_millis(30)
        )));
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_wait_backoff_yields_to_a_close_command() {
        let (tx, rx) = mpsc::channel();
        tx.send(Command::Close).expect("send close");
        assert!(!tokio_test::block_on(wait_backoff(
            &rx,
            Duration::from_secs(60)
        )));
    }

    #[test]
    fn test_set_state_reports_each_transition_once() {
        let state = Mutex::new(ChannelState::Disconnected);
        let queue = DispatchQueue::new(8);

        set_state(&state, &queue, ChannelState::Connecting);
        set_state(&state, &queue, ChannelState::Connecting);
        set_state(&state, &queue, ChannelState::Connected);
        queue.close();

        let mut seen = Vec::new();
        while let Some(Notification::ChannelState(next)) = queue.pop() {
            seen.push(next);
        }
        assert_eq!(seen, vec![ChannelState::Connecting, ChannelState::Connected]);
    }
}
