//! Listener surfaces
//!
//! The relay runs two listeners. The public one takes webhooks from the
//! outside world; the internal one serves the consumer. A path that belongs
//! to the other listener is answered as if it did not exist.

use std::fmt;

/// Path prefix of the public webhook.
pub const PUBLIC_PREFIX: &str = "/api/hooks/public";

/// Path prefix of the internal retrieval API.
pub const INTERNAL_PREFIX: &str = "/internal/api/hooks";

/// Everything under this prefix is internal-only.
pub const INTERNAL_ROOT: &str = "/internal";

/// Header carrying the shared secret on the internal surface.
pub const AUTH_HEADER: &str = "x-hookbuf-auth";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Public,
    Internal,
}

/// Where a request path leads on a given surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Ingest,
    Retrieve,
    /// A path served by the other listener.
    CrossSurface,
    NotFound,
}

impl Surface {
    pub fn route(self, path: &str) -> Route {
        match self {
            Surface::Public if path.starts_with(INTERNAL_ROOT) => Route::CrossSurface,
            Surface::Public if under(path, PUBLIC_PREFIX) => Route::Ingest,
            Surface::Internal if under(path, PUBLIC_PREFIX) => Route::CrossSurface,
            Surface::Internal if under(path, INTERNAL_PREFIX) => Route::Retrieve,
            _ => Route::NotFound,
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Public => write!(f, "public"),
            Surface::Internal => write!(f, "internal"),
        }
    }
}

/// `prefix` itself or anything below it, but not `prefix` followed by other
/// characters (`/api/hooks/publicity` is not under `/api/hooks/public`).
fn under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
