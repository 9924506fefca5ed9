//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of bytes of a text body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// Spreadsheets and other binary bodies are passed through untouched and
/// only their size is logged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let Some(bytes) = buffer_body(body).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    log_request(&parts, &describe_body(parts.headers.get(CONTENT_TYPE), &bytes));

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let (parts, body) = response.into_parts();
    let Some(bytes) = buffer_body(body).await else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    log_response(&parts, &describe_body(parts.headers.get(CONTENT_TYPE), &bytes));

    Response::from_parts(parts, Body::from(bytes))
}

async fn buffer_body(body: Body) -> Option<Bytes> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .inspect_err(|error| tracing::error!("could not read body: {error}"))
        .ok()
}

/// The loggable form of a body: the text itself, or a size for binary data.
enum BodyText<'a> {
    Text(&'a str),
    Binary(usize),
}

fn describe_body<'a>(
    content_type: Option<&axum::http::HeaderValue>,
    bytes: &'a [u8],
) -> BodyText<'a> {
    let content_type = content_type
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if is_binary_content_type(content_type) {
        return BodyText::Binary(bytes.len());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => BodyText::Text(text),
        Err(_) => BodyText::Binary(bytes.len()),
    }
}

fn is_binary_content_type(content_type: &str) -> bool {
    content_type.starts_with("multipart/")
        || content_type.starts_with("application/vnd.openxmlformats")
        || content_type.starts_with("application/octet-stream")
}

/// The longest prefix of `text` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character.
fn truncate(text: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(text.len());

    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &BodyText) {
    match body {
        BodyText::Binary(length) => {
            tracing::info!("Received request: {headers:#?}\nbody: <{length} bytes>");
        }
        BodyText::Text(body) if body.len() > LOG_BODY_LENGTH_LIMIT => {
            tracing::info!(
                "Received request: {headers:#?}\nbody: {:}...",
                truncate(body)
            );
            tracing::debug!("Full request body: {body:?}");
        }
        BodyText::Text(body) => {
            tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
        }
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &BodyText) {
    match body {
        BodyText::Binary(length) => {
            tracing::info!("Sending response: {headers:#?}\nbody: <{length} bytes>");
        }
        BodyText::Text(body) if body.len() > LOG_BODY_LENGTH_LIMIT => {
            tracing::info!(
                "Sending response: {headers:#?}\nbody: {:}...",
                truncate(body)
            );
            tracing::debug!("Full response body: {body:?}");
        }
        BodyText::Text(body) => {
            tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
        }
    }
}
