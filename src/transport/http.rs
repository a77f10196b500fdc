//! HTTP transport
//!
//! Translates HTTP requests into relay operations and relay outcomes into
//! status codes:
//! - 200: accepted, or healthy
//! - 403: bad credential on the internal surface
//! - 404: unknown path, or a path belonging to the other surface
//! - 405: method not served on that path, with an `Allow` header
//! - 413: webhook body larger than the configured limit
//! - 500: retry-inducing refusal (buffer full, consumer unreachable,
//!   unreadable body)

use std::convert::Infallible;
use std::net::{TcpListener, ToSocketAddrs};
use std::sync::Arc;

use hyper::body::HttpBody;
use hyper::header::{ALLOW, CONTENT_TYPE, HeaderValue};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::relay::ingest::normalize_body;
use crate::liveness::Reachability;
use crate::relay::{IngestOutcome, RelayState};
use crate::transport::surface::{AUTH_HEADER, Route, Surface};
use crate::utils::error::RelayError;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const PUBLIC_METHODS: &str = "GET, HEAD, POST";
const INTERNAL_METHODS: &str = "GET";

/// Why a webhook body could not be read.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("body exceeds {0} bytes")]
    TooLarge(usize),

    #[error(transparent)]
    Read(#[from] hyper::Error),
}

/// Binds a non-blocking listener for `addr` (`host:port`).
///
/// The host may be an IP literal or a name such as `localhost`; every
/// resolved address is tried in order.
pub fn bind_listener(addr: &str) -> Result<TcpListener, RelayError> {
    let resolved: Vec<_> = addr
        .to_socket_addrs()
        .map_err(|e| RelayError::Address(format!("{addr}: {e}")))?
        .collect();
    if resolved.is_empty() {
        return Err(RelayError::Address(format!("{addr}: no address found")));
    }
    let listener = TcpListener::bind(&resolved[..])?;
    listener.set_nonblocking(true)?;
    Ok(listener)
}

/// Serves one surface on `listener` until `shutdown` resolves, then lets
/// in-flight requests finish.
pub async fn serve<F>(
    listener: TcpListener,
    surface: Surface,
    state: Arc<RelayState>,
    shutdown: F,
) -> Result<(), RelayError>
where
    F: Future<Output = ()>,
{
    let addr = listener.local_addr()?;

    let make_svc = make_service_fn(move |_conn| {
        let state = Arc::clone(&state);
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let state = Arc::clone(&state);
                handle_request(req, surface, state)
            }))
        }
    });

    let server = Server::from_tcp(listener)?
        .serve(make_svc)
        .with_graceful_shutdown(shutdown);

    info!("{} surface listening on http://{}", surface, addr);
    server.await?;
    info!("{} surface stopped", surface);
    Ok(())
}

pub async fn handle_request(
    req: Request<Body>,
    surface: Surface,
    state: Arc<RelayState>,
) -> Result<Response<Body>, Infallible> {
    let path = req.uri().path().to_string();
    debug!("{} request: {} {}", surface, req.method(), path);

    let response = match surface.route(&path) {
        Route::Ingest => handle_public(req, &state).await,
        Route::Retrieve => handle_internal(req, &state),
        Route::CrossSurface => {
            warn!("access to {} from {} surface denied", path, surface);
            status_only(StatusCode::NOT_FOUND)
        }
        Route::NotFound => status_only(StatusCode::NOT_FOUND),
    };
    Ok(response)
}

async fn handle_public(req: Request<Body>, state: &RelayState) -> Response<Body> {
    let method = req.method().clone();
    match method {
        Method::HEAD | Method::GET => status_only(health_status(state.reachability())),
        Method::POST => {
            let body = read_body(req.into_body(), state.max_body_bytes());
            match state.ingest(body).await {
                Ok(outcome) => status_only(ingest_status(outcome)),
                Err(e @ BodyError::TooLarge(_)) => {
                    warn!("rejected webhook body: {}", e);
                    status_only(StatusCode::PAYLOAD_TOO_LARGE)
                }
                Err(e) => {
                    warn!("failed to read webhook body: {}", e);
                    status_only(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        _ => method_not_allowed(PUBLIC_METHODS),
    }
}

fn handle_internal(req: Request<Body>, state: &RelayState) -> Response<Body> {
    if req.method() != Method::GET {
        return method_not_allowed(INTERNAL_METHODS);
    }

    let credential = req
        .headers()
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok());

    match state.poll(credential) {
        Ok(batch) => {
            let payload = batch.to_payload();
            if !payload.is_empty() {
                debug!("transferred messages, sz: {}", payload.len());
            }
            let mut response = Response::new(Body::from(payload));
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            response
        }
        Err(_) => status_only(StatusCode::FORBIDDEN),
    }
}

/// Reads at most `limit` bytes of `body`.
///
/// A declared length over the limit is refused before anything is read;
/// otherwise chunks are collected until the limit would be crossed.
pub async fn read_body(mut body: Body, limit: usize) -> Result<String, BodyError> {
    if body.size_hint().lower() > limit as u64 {
        return Err(BodyError::TooLarge(limit));
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = body.data().await {
        let chunk = chunk?;
        if bytes.len() + chunk.len() > limit {
            return Err(BodyError::TooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(normalize_body(&String::from_utf8_lossy(&bytes)))
}

/// Status for a public HEAD/GET health check.
pub fn health_status(reachability: Reachability) -> StatusCode {
    match reachability {
        Reachability::Alive => StatusCode::OK,
        Reachability::Unreachable => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status for a public POST; refusals ask the sender to retry.
pub fn ingest_status(outcome: IngestOutcome) -> StatusCode {
    if outcome.is_accepted() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn status_only(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

fn method_not_allowed(allowed: &'static str) -> Response<Body> {
    let mut response = status_only(StatusCode::METHOD_NOT_ALLOWED);
    response
        .headers_mut()
        .insert(ALLOW, HeaderValue::from_static(allowed));
    response
}
