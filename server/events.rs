use std::io::Write;
use std::time::Duration;

use tiny_http::Request;

use affinity_nn::worker::Event;

use crate::state::SharedState;

/// `GET /events`: Server-Sent Events handler.
///
/// Consumes `request` (takes ownership so we can call `into_writer`) and
/// drives a long-lived loop that:
/// 1. Replays every event recorded so far, so late subscribers see the
///    whole run.
/// 2. Tries to receive a worker event with a 500 ms timeout.
/// 3. On success, records it and writes an `event: <type>` frame.
/// 4. On timeout, writes a keep-alive `: ping` comment.
/// 5. On channel disconnect (worker shut down), closes the stream.
///
/// Client reconnection is handled natively by `EventSource`.
///
/// The worker has a single event channel, so this stream expects one live
/// subscriber at a time: concurrent subscribers contend for the receiver
/// and each live event reaches exactly one of them. Late or reconnecting
/// subscribers catch up through the history replay.
pub fn handle(request: Request, state: SharedState) {
    let mut writer = request.into_writer();

    // Write HTTP response headers manually (tiny_http into_writer path).
    let header = "HTTP/1.1 200 OK\r\n\
                  Content-Type: text/event-stream\r\n\
                  Cache-Control: no-cache\r\n\
                  Connection: keep-alive\r\n\
                  X-Accel-Buffering: no\r\n\
                  \r\n";
    if write_all(&mut writer, header.as_bytes()).is_err() {
        return;
    }

    // Clone the receiver handle and the history out so we don't hold the
    // state lock while writing to the socket.
    let (rx_arc, history) = {
        let st = state.lock().unwrap();
        (st.event_rx.clone(), st.history.clone())
    };

    for event in &history {
        if send_event(&mut writer, event).is_err() {
            return;
        }
    }

    // Main receive loop.
    loop {
        let result = {
            let rx = rx_arc.lock().unwrap();
            rx.recv_timeout(Duration::from_millis(500))
        };

        match result {
            Ok(event) => {
                {
                    let mut st = state.lock().unwrap();
                    st.history.push(event.clone());
                }
                if send_event(&mut writer, &event).is_err() {
                    return;
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Keep-alive ping.
                if write_all(&mut writer, b": ping\n\n").is_err() {
                    return;
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                // Worker thread is gone; nothing more will ever arrive.
                return;
            }
        }
    }
}

/// Writes one SSE frame named after the event's wire tag.
fn send_event<W: Write>(w: &mut W, event: &Event) -> std::io::Result<()> {
    if let Ok(json) = serde_json::to_string(event) {
        let frame = format!("event: {}\ndata: {}\n\n", event.kind(), json);
        write_all(w, frame.as_bytes())?;
    }
    Ok(())
}

/// Writes all bytes to the writer, returning `Err` on any I/O failure.
fn write_all<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    w.write_all(data)?;
    w.flush()
}
