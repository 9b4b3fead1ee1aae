//! Content load errors.

use crate::path::ContentPath;
use crate::platform::TransportError;

/// Why a route could not be displayed.
///
/// Every variant is caught at the router boundary and rendered as an
/// [`ErrorView`](crate::ErrorView); none of them propagate further.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// No sidebar entry matches the path.
    #[error("page not found: {path}")]
    NotFound {
        /// Normalized path that had no entry.
        path: ContentPath,
    },
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The server answered 2xx with a blank body.
    #[error("empty response")]
    EmptyBody,
    /// The request failed before any response arrived.
    #[error("network error: {0}")]
    Network(#[from] TransportError),
}
