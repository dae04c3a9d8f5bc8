//! Fetch boundary for gamedata-watch.
//!
//! Retrieves a tracked resource from its origin URL and parses it according
//! to its [`ResourceKind`]. Failures are typed: the caller aborts the run
//! without touching the snapshot. Each call is synchronous and bounded by a
//! request timeout.

pub mod error;
pub mod http;

pub use error::{FetchError, FetchResult};
pub use http::HttpFetcher;

use gdw_types::{Document, ResourceKind};

/// Origin-side boundary: `fetch(url) -> Document | FetchError`.
pub trait Fetcher: Send + Sync {
    /// Fetch and parse the resource at `url` as `kind`.
    fn fetch(&self, url: &str, kind: ResourceKind) -> FetchResult<Document>;
}
