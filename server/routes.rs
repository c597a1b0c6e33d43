use std::io::Cursor;

use tiny_http::{Header, Method, Request, Response, StatusCode};

use affinity_nn::catalog;
use affinity_nn::worker::Request as WorkerRequest;

use crate::events;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn json_response(status: u16, body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        vec![Header::from_bytes(b"Content-Type", b"application/json").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

/// The path component of a request url, query string stripped.
fn path_of(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches one incoming request.
///
/// Ordinary handlers hand a response back and the dispatcher responds; the
/// SSE handler takes ownership of the request and streams until the client
/// hangs up.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = path_of(&url).to_owned();

    // SSE is long-lived; its handler takes ownership and drives the stream.
    if method == Method::Get && path == "/events" {
        events::handle(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        (Method::Post, "/message") => handle_message(&mut request, state),
        (Method::Get, "/catalog") => handle_catalog(),
        _ => not_found(),
    };

    let _ = request.respond(response);
}

/// `POST /message`: parse one worker message and enqueue it.
///
/// The worker replies through `/events`, so acceptance is all this route
/// reports: 202 on success, 400 on a body that is not a valid message.
fn handle_message(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);

    let message: WorkerRequest = match serde_json::from_str(&body) {
        Ok(m) => m,
        Err(e) => {
            let payload = serde_json::json!({ "error": e.to_string() });
            return json_response(400, payload.to_string());
        }
    };

    let st = state.lock().unwrap();
    if st.requests.send(message).is_err() {
        let payload = serde_json::json!({ "error": "worker thread is gone" });
        return json_response(500, payload.to_string());
    }

    json_response(202, r#"{"status":"accepted"}"#.to_string())
}

/// `GET /catalog`: the product catalog the worker trains against by default.
fn handle_catalog() -> Response<Cursor<Vec<u8>>> {
    let products = catalog::load_default();
    match serde_json::to_string(&products) {
        Ok(body) => json_response(200, body),
        Err(e) => {
            let payload = serde_json::json!({ "error": e.to_string() });
            json_response(500, payload.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_of_strips_the_query_string() {
        assert_eq!(path_of("/message"), "/message");
        assert_eq!(path_of("/events?since=3"), "/events");
        assert_eq!(path_of("/?a=1&b=2"), "/");
    }

    #[test]
    fn helper_responses_carry_their_status() {
        assert_eq!(json_response(202, "{}".into()).status_code().0, 202);
        assert_eq!(not_found().status_code().0, 404);
    }
}
