use std::time::Duration;

use tracing::debug;

use gdw_types::{Document, ResourceKind};

use crate::error::{FetchError, FetchResult};
use crate::Fetcher;

/// Per-request timeout. Bounds the worst-case stall of a run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> FetchResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, kind: ResourceKind) -> FetchResult<Document> {
        debug!(url, ?kind, "fetching resource");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        match kind {
            ResourceKind::Text => Ok(Document::Text(response.text()?)),
            ResourceKind::Json => {
                let value = response
                    .json()
                    .map_err(|e| FetchError::Decode {
                        url: url.to_string(),
                        reason: e.to_string(),
                    })?;
                Ok(Document::Structured(value))
            }
        }
    }
}
